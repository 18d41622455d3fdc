//! Rule selection.
//!
//! Runs the matcher against every rule of a script, in script order, and
//! collects every (rule, bindings) candidate. Picking a winner is *not* this
//! module's job: the selection policy lives at the orchestration boundary
//! (see `SelectionPolicy` in `api.rs`), so alternative policies can be
//! substituted without touching the matching engine.

use super::matcher::match_terms_with_metrics;
use super::metrics::{RuleMatchMetrics, SelectMetrics};
use crate::{Candidate, Options, Script, Word};
use std::time::Instant;

/// Find every candidate match of `input` across the script.
///
/// Outer order follows script order, inner order follows the matcher's
/// result order for that rule. Empty when nothing matches; that is not an
/// error, the caller decides the fallback.
pub fn find_candidates<'a>(script: &'a Script, input: &[Word], options: &Options) -> Vec<Candidate<'a>> {
    find_candidates_with_metrics(script, input, options).0
}

/// As [`find_candidates`], but with per-rule search counters for traces.
pub fn find_candidates_with_metrics<'a>(
    script: &'a Script,
    input: &[Word],
    options: &Options,
) -> (Vec<Candidate<'a>>, SelectMetrics) {
    let start = Instant::now();
    let debug = std::env::var_os("PARLEY_DEBUG_MATCH").is_some();

    let mut candidates = Vec::new();
    let mut per_rule = Vec::with_capacity(script.len());

    for rule in script.rules() {
        let (matches, metrics) = match_terms_with_metrics(input, &rule.pattern, options.max_states);
        if debug && !matches.is_empty() {
            eprintln!("[select:rule] name=\"{}\" matches={}", rule.name, matches.len());
        }
        per_rule.push(RuleMatchMetrics { rule: rule.name.clone(), metrics });
        candidates.extend(matches.into_iter().map(|bindings| Candidate { rule, bindings }));
    }

    (candidates, SelectMetrics { total: start.elapsed(), per_rule })
}
