use parley::TurnDetails;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

/// Print a per-turn match report to stderr so replies on stdout stay clean.
pub fn print_turn(input: &str, details: &TurnDetails, color: bool) {
    let palette = ansi::Palette::new(color);

    eprintln!("{}", palette.bold(palette.paint(format!("turn: \"{input}\""), ansi::CYAN)));

    if details.candidates.is_empty() {
        eprintln!("  {}", palette.dim("candidates: none"));
    } else {
        eprintln!("  candidates ({}):", details.candidates.len());
        for candidate in &details.candidates {
            let bindings = candidate
                .bindings
                .iter()
                .map(|(name, fragment)| format!("?{name} = \"{fragment}\""))
                .collect::<Vec<_>>()
                .join("  ");
            eprintln!("    {} {}", palette.paint(&candidate.rule, ansi::GREEN), palette.dim(bindings));
        }
    }

    match &details.chosen {
        Some(name) if details.used_fallback => {
            eprintln!("  chosen: {} {}", palette.paint(name, ansi::YELLOW), palette.dim("(fallback)"));
        }
        Some(name) => eprintln!("  chosen: {}", palette.paint(name, ansi::GREEN)),
        None => eprintln!("  chosen: {}", palette.dim("none")),
    }

    let search = format!(
        "search: {} states across {} rules in {:.1?}",
        details.select.states(),
        details.select.per_rule.len(),
        details.select.total,
    );
    eprintln!("  {}", palette.dim(&search));
    if details.select.budget_exhausted() {
        eprintln!("  {}", palette.paint("warning: state budget exhausted; match list may be incomplete", ansi::YELLOW));
    }

    for entry in &details.select.per_rule {
        if entry.metrics.matches > 0 {
            let line = format!(
                "{}: states={} matches={} in {:.1?}",
                entry.rule, entry.metrics.states, entry.metrics.matches, entry.metrics.duration,
            );
            eprintln!("    {}", palette.dim(&line));
        }
    }
    eprintln!();
}
