//! Backtracking pattern matcher.
//!
//! This module is the operational core of the engine: given an input word
//! sequence and a pattern of literal and variable terms, enumerate *every*
//! binding assignment under which pattern and input consume each other
//! exactly.
//!
//! The search runs over an explicit first-in-first-out work queue of
//! immutable [`MatchState`]s rather than call-stack recursion, so a state
//! budget can be enforced without risking stack exhaustion on adversarial
//! input.
//!
//! ```text
//! queue: [ (input, pattern, {}) ]
//!    │
//!    ├─ pattern and input both empty        -> success, record bindings
//!    ├─ pattern empty, input left over      -> drop
//!    ├─ head is Lit(w), input starts with w -> advance both by one
//!    ├─ head is Var already bound to b      -> input must start with b; consume it
//!    └─ head is Var unseen                  -> one child per split of the input,
//!                                             bindings extended by copy
//! ```
//!
//! Because children are enqueued in increasing-prefix-length order and the
//! queue is FIFO, the shortest-prefix binding for the first unseen variable
//! is always reported before longer ones.
//!
//! A variable that occurs more than once in a pattern must reproduce its
//! first fragment exactly at every later occurrence; branches that cannot are
//! dropped silently. Matching is a search, not a validation step.
//!
//! Worst case is exponential in the number of free variables versus input
//! length. Conversational lines are short, so this is acceptable, but callers
//! must pass a `max_states` budget; when the budget runs out the search stops
//! and returns whatever successes it has found, flagging the truncation in
//! [`MatchMetrics`].

use super::metrics::MatchMetrics;
use super::splitter::splits;
use crate::{Bindings, Term, Word};
use std::collections::VecDeque;
use std::time::Instant;

/// One partially explored match: what is left of the input, what is left of
/// the pattern, and the bindings accumulated so far. Transient; never
/// escapes the search.
struct MatchState<'a> {
    input: &'a [Word],
    pattern: &'a [Term],
    bindings: Bindings,
}

/// Enumerate all bindings that make `pattern` consume `input` exactly.
///
/// Results are ordered by the breadth-first traversal; see the module docs.
pub fn match_terms(input: &[Word], pattern: &[Term], max_states: usize) -> Vec<Bindings> {
    match_terms_with_metrics(input, pattern, max_states).0
}

/// As [`match_terms`], but also reports how much work the search did.
pub fn match_terms_with_metrics(input: &[Word], pattern: &[Term], max_states: usize) -> (Vec<Bindings>, MatchMetrics) {
    let start = Instant::now();
    let debug = std::env::var_os("PARLEY_DEBUG_MATCH").is_some();

    let mut successes: Vec<Bindings> = Vec::new();
    let mut queue: VecDeque<MatchState<'_>> = VecDeque::new();
    queue.push_back(MatchState { input, pattern, bindings: Bindings::new() });

    let mut states = 0usize;
    let mut budget_exhausted = false;

    while let Some(state) = queue.pop_front() {
        if states >= max_states {
            budget_exhausted = true;
            break;
        }
        states += 1;

        let Some((head, rest)) = state.pattern.split_first() else {
            // Pattern exhausted: success only if the input is too.
            if state.input.is_empty() {
                if debug {
                    eprintln!("[match:success] bindings={:?}", state.bindings);
                }
                successes.push(state.bindings);
            }
            continue;
        };

        match head {
            Term::Lit(word) => {
                if let Some((first, tail)) = state.input.split_first() {
                    if first == word {
                        queue.push_back(MatchState { input: tail, pattern: rest, bindings: state.bindings });
                    }
                }
            }
            Term::Var(name) => match state.bindings.get(name) {
                // Seen before: the input must reproduce the fragment exactly.
                Some(fragment) => {
                    if state.input.len() >= fragment.len() && &state.input[..fragment.len()] == fragment {
                        queue.push_back(MatchState {
                            input: &state.input[fragment.len()..],
                            pattern: rest,
                            bindings: state.bindings,
                        });
                    }
                }
                // Unseen: branch over every cut of the remaining input.
                // Bindings are extended by copy so siblings stay independent.
                None => {
                    for (prefix, suffix) in splits(state.input) {
                        queue.push_back(MatchState {
                            input: suffix,
                            pattern: rest,
                            bindings: state.bindings.with(name, prefix.to_vec()),
                        });
                    }
                }
            },
        }
    }

    let metrics =
        MatchMetrics { states, matches: successes.len(), budget_exhausted, duration: start.elapsed() };
    if debug {
        eprintln!(
            "[match:done] states={} matches={} budget_exhausted={}",
            metrics.states, metrics.matches, metrics.budget_exhausted
        );
    }
    (successes, metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize;

    const BUDGET: usize = 10_000;

    fn bindings(entries: &[(&str, &str)]) -> Bindings {
        entries.iter().map(|(name, fragment)| (name.to_string(), tokenize(fragment))).collect()
    }

    #[test]
    fn literal_only_pattern_matches_itself() {
        let results = match_terms(&tokenize("hello there"), &terms!("hello there"), BUDGET);
        assert_eq!(results, vec![Bindings::new()]);
    }

    #[test]
    fn literal_mismatch_fails() {
        assert!(match_terms(&tokenize("hello there"), &terms!("goodbye there"), BUDGET).is_empty());
    }

    #[test]
    fn leftover_input_fails() {
        assert!(match_terms(&tokenize("hello there friend"), &terms!("hello there"), BUDGET).is_empty());
    }

    #[test]
    fn leftover_pattern_fails() {
        assert!(match_terms(&tokenize("hello"), &terms!("hello there"), BUDGET).is_empty());
    }

    #[test]
    fn empty_input_empty_pattern_is_one_trivial_match() {
        let results = match_terms(&[], &[], BUDGET);
        assert_eq!(results, vec![Bindings::new()]);
    }

    #[test]
    fn variable_can_bind_empty_fragment() {
        let results = match_terms(&tokenize("hello"), &terms!("?X hello ?Y"), BUDGET);
        assert_eq!(results, vec![bindings(&[("X", ""), ("Y", "")])]);
    }

    #[test]
    fn surrounding_variables_capture_fragments() {
        let results = match_terms(&tokenize("sometimes I want to be happy"), &terms!("?X I want ?Y"), BUDGET);
        assert_eq!(results, vec![bindings(&[("X", "sometimes"), ("Y", "to be happy")])]);
    }

    #[test]
    fn enumeration_is_exhaustive_and_shortest_prefix_first() {
        let results = match_terms(&tokenize("a b"), &terms!("?X ?Y"), BUDGET);
        assert_eq!(
            results,
            vec![
                bindings(&[("X", ""), ("Y", "a b")]),
                bindings(&[("X", "a"), ("Y", "b")]),
                bindings(&[("X", "a b"), ("Y", "")]),
            ]
        );
    }

    #[test]
    fn repeated_variable_must_rebind_identically() {
        let results = match_terms(&tokenize("a b a b"), &terms!("?X ?X"), BUDGET);
        assert_eq!(results, vec![bindings(&[("X", "a b")])]);
    }

    #[test]
    fn repeated_variable_with_separator() {
        let results = match_terms(&tokenize("a b is a b"), &terms!("?X is ?X"), BUDGET);
        assert_eq!(results, vec![bindings(&[("X", "a b")])]);

        assert!(match_terms(&tokenize("a b is a c"), &terms!("?X is ?X"), BUDGET).is_empty());
    }

    #[test]
    fn budget_exhaustion_stops_the_search() {
        let (results, metrics) = match_terms_with_metrics(&tokenize("a b c"), &terms!("?X ?Y ?Z"), 1);
        assert!(results.is_empty());
        assert!(metrics.budget_exhausted);
        assert_eq!(metrics.states, 1);

        // The same search completes under a real budget.
        let (results, metrics) = match_terms_with_metrics(&tokenize("a b c"), &terms!("?X ?Y ?Z"), BUDGET);
        assert_eq!(results.len(), 10);
        assert!(!metrics.budget_exhausted);
    }

    #[test]
    fn rerunning_yields_identical_ordering() {
        let input = tokenize("a b c d");
        let pattern = terms!("?X ?Y");
        assert_eq!(match_terms(&input, &pattern, BUDGET), match_terms(&input, &pattern, BUDGET));
    }
}
