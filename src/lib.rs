extern crate self as parley;

use std::collections::HashMap;
use std::fmt;

#[macro_use]
mod macros;
mod api;
mod engine;
pub mod script;
pub mod session;

pub use api::{
    CandidateSummary, DEFAULT_MAX_STATES, MISSING, Options, Reply, ReplyVerbose, SelectionPolicy, TurnDetails,
    fill, find_candidates, respond_verbose_with, respond_with, swap_person, synthesize, tokenize,
};
pub use engine::{MatchMetrics, RuleMatchMetrics, SelectMetrics};

// --- Core data model ---------------------------------------------------------

/// An atomic unit of user input or of a bound fragment.
pub type Word = String;

/// One element of a pattern or response template.
///
/// In the persisted script format a variable is written with a leading `?`
/// sigil (`?X`, `?topic`); everything else is a literal. Terms are classified
/// once at load time so the engine never re-inspects sigils.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// A literal word that must match input exactly.
    Lit(String),
    /// A variable that binds to a (possibly empty) run of input words.
    Var(String),
}

impl Term {
    /// Classify a single whitespace token from a script.
    pub fn parse(word: &str) -> Self {
        match word.strip_prefix('?') {
            Some(name) if !name.is_empty() => Term::Var(name.to_string()),
            _ => Term::Lit(word.to_string()),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Lit(word) => write!(f, "{word}"),
            Term::Var(name) => write!(f, "?{name}"),
        }
    }
}

/// Whitespace-tokenize script text into terms.
pub fn parse_terms(text: &str) -> Vec<Term> {
    text.split_whitespace().map(Term::parse).collect()
}

/// A conversational rule: a pattern plus the response templates it can fill.
///
/// Rules are immutable once constructed. The loader guarantees a non-empty
/// pattern and a non-empty response list, so the engine never has to
/// re-validate them.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Display name used in traces; defaults to the pattern's source text.
    pub name: String,
    pub pattern: Vec<Term>,
    pub responses: Vec<Vec<Term>>,
}

impl Rule {
    pub fn new(pattern: Vec<Term>, responses: Vec<Vec<Term>>) -> Self {
        let name = pattern.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(" ");
        Rule { name, pattern, responses }
    }
}

/// An ordered rule set. Order is significant: it defines candidate priority
/// and is fixed for the lifetime of a session.
#[derive(Debug, Clone, Default)]
pub struct Script {
    rules: Vec<Rule>,
}

impl Script {
    pub fn new(rules: Vec<Rule>) -> Self {
        Script { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Variable bindings produced by a match: variable name to matched fragment.
///
/// Bindings are extended by copying, never in place, so sibling branches of
/// the search can never observe each other's entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    map: HashMap<String, Vec<Word>>,
}

impl Bindings {
    pub fn new() -> Self {
        Bindings::default()
    }

    pub fn get(&self, name: &str) -> Option<&[Word]> {
        self.map.get(name).map(Vec::as_slice)
    }

    /// Return a copy of these bindings extended with one new entry.
    pub(crate) fn with(&self, name: &str, fragment: Vec<Word>) -> Bindings {
        let mut map = self.map.clone();
        map.insert(name.to_string(), fragment);
        Bindings { map }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Word])> {
        self.map.iter().map(|(name, fragment)| (name.as_str(), fragment.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl FromIterator<(String, Vec<Word>)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Word>)>>(iter: I) -> Self {
        Bindings { map: iter.into_iter().collect() }
    }
}

/// A successful match: a rule together with the bindings that made it match.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub rule: &'a Rule,
    pub bindings: Bindings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_classification() {
        assert_eq!(Term::parse("hello"), Term::Lit("hello".to_string()));
        assert_eq!(Term::parse("?X"), Term::Var("X".to_string()));
        // A bare sigil is not a variable.
        assert_eq!(Term::parse("?"), Term::Lit("?".to_string()));
    }

    #[test]
    fn rule_name_defaults_to_pattern_text() {
        let rule = rule!(pattern: "?X I want ?Y", responses: ["why do you want ?Y"]);
        assert_eq!(rule.name, "?X I want ?Y");
    }

    #[test]
    fn bindings_extend_by_copy() {
        let base = Bindings::new();
        let extended = base.with("X", vec!["a".to_string()]);
        assert!(base.get("X").is_none());
        assert_eq!(extended.get("X"), Some(&["a".to_string()][..]));
    }
}
