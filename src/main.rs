mod debug_report;

use parley::script::{builtin, loader};
use parley::session::{Session, Turn};
use parley::{DEFAULT_MAX_STATES, Options, SelectionPolicy};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let script = match &config.script_path {
        Some(path) => match loader::from_path(path) {
            Ok(script) => script,
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(2);
            }
        },
        None => builtin::script().clone(),
    };

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let options = Options { max_states: config.max_states };
    let mut session = Session::new(script, config.policy, options, rng);

    println!("{}", session.greeting());

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                eprintln!("error: failed to read input: {err}");
                std::process::exit(1);
            }
        }

        let turn = if config.trace {
            let (turn, details) = session.turn_traced(&line);
            if let Some(details) = &details {
                debug_report::print_turn(line.trim(), details, config.color);
            }
            turn
        } else {
            session.turn(&line)
        };

        match turn {
            Turn::Halt => break,
            Turn::Reply(text) => println!("{text}"),
        }
    }

    println!("goodbye");
}

struct CliConfig {
    script_path: Option<PathBuf>,
    seed: Option<u64>,
    policy: SelectionPolicy,
    max_states: usize,
    trace: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut script_path: Option<PathBuf> = None;
    let mut seed: Option<u64> = None;
    let mut policy = SelectionPolicy::First;
    let mut max_states = DEFAULT_MAX_STATES;
    let mut trace = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("parley {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--trace" => trace = true,
            "--script" | "-s" => {
                let value = args.next().ok_or_else(|| "error: --script expects a path".to_string())?;
                script_path = Some(PathBuf::from(value));
            }
            "--seed" => {
                let value = args.next().ok_or_else(|| "error: --seed expects a value".to_string())?;
                seed = Some(parse_seed(&value)?);
            }
            "--policy" => {
                let value = args.next().ok_or_else(|| "error: --policy expects a value".to_string())?;
                policy = parse_policy(&value)?;
            }
            "--max-states" => {
                let value = args.next().ok_or_else(|| "error: --max-states expects a value".to_string())?;
                max_states = parse_max_states(&value)?;
            }
            _ if arg.starts_with("--script=") => {
                script_path = Some(PathBuf::from(arg.trim_start_matches("--script=")));
            }
            _ if arg.starts_with("--seed=") => {
                seed = Some(parse_seed(arg.trim_start_matches("--seed="))?);
            }
            _ if arg.starts_with("--policy=") => {
                policy = parse_policy(arg.trim_start_matches("--policy="))?;
            }
            _ if arg.starts_with("--max-states=") => {
                max_states = parse_max_states(arg.trim_start_matches("--max-states="))?;
            }
            _ => {
                return Err(format!("error: unknown option '{arg}'\n\n{}", help_text()));
            }
        }
    }

    Ok(CliConfig { script_path, seed, policy, max_states, trace, color })
}

fn parse_seed(value: &str) -> Result<u64, String> {
    value.parse().map_err(|_| format!("error: invalid --seed '{value}' (expected an unsigned integer)"))
}

fn parse_max_states(value: &str) -> Result<usize, String> {
    match value.parse() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("error: invalid --max-states '{value}' (expected a positive integer)")),
    }
}

fn parse_policy(value: &str) -> Result<SelectionPolicy, String> {
    match value {
        "first" => Ok(SelectionPolicy::First),
        "random" => Ok(SelectionPolicy::Random),
        "longest" => Ok(SelectionPolicy::LongestBound),
        _ => Err(format!("error: invalid --policy '{value}' (expected first, random, or longest)")),
    }
}

fn help_text() -> String {
    format!(
        "parley {version}

Rule-based conversational responder REPL.

Usage:
  parley [OPTIONS]

Options:
  -s, --script <path>     YAML rule script to load. Default: built-in doctor script.
  --seed <n>              Seed the RNG for a reproducible session.
  --policy <name>         Candidate selection policy: first (default), random, longest.
  --max-states <n>        Search-state budget per pattern match. Default: {default_max}.
  --trace                 Print a per-turn match report.
  --color                 Force ANSI color output.
  --no-color              Disable ANSI color output.
  -h, --help              Show this help message.
  -V, --version           Print version information.

Halt words: quit, halt, exit, stop.

Exit codes:
  0  Success.
  1  Internal error.
  2  Invalid arguments or unloadable script.
",
        version = env!("CARGO_PKG_VERSION"),
        default_max = DEFAULT_MAX_STATES
    )
}
