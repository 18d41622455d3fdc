//! Engine run metrics.
//!
//! Small structs used to observe what a match run did: how many search
//! states were explored, whether the state budget cut the search short, and
//! how long each stage took.
//!
//! Metrics are opt-in:
//!
//! - `match_terms` / `find_candidates` for normal operation.
//! - the `*_with_metrics` variants for traces and regression hunting.

use std::time::Duration;

/// Counters for one pattern-vs-input search.
#[derive(Debug, Default, Clone)]
pub struct MatchMetrics {
    /// Number of match states dequeued before the search ended.
    pub states: usize,
    /// Number of successful bindings recorded.
    pub matches: usize,
    /// True if the search stopped because it hit `Options::max_states`.
    pub budget_exhausted: bool,
    /// Elapsed wall time for the search.
    pub duration: Duration,
}

/// One rule's search counters, labeled for trace output.
#[derive(Debug, Clone)]
pub struct RuleMatchMetrics {
    /// Display name of the rule that was matched against.
    pub rule: String,
    pub metrics: MatchMetrics,
}

/// Counters for a whole-script candidate selection.
#[derive(Debug, Default, Clone)]
pub struct SelectMetrics {
    /// Elapsed wall time across all rules.
    pub total: Duration,
    /// Per-rule counters, in script order (one entry per rule).
    pub per_rule: Vec<RuleMatchMetrics>,
}

impl SelectMetrics {
    /// Total search states explored across all rules.
    pub fn states(&self) -> usize {
        self.per_rule.iter().map(|r| r.metrics.states).sum()
    }

    /// True if any rule's search was cut short by the state budget.
    pub fn budget_exhausted(&self) -> bool {
        self.per_rule.iter().any(|r| r.metrics.budget_exhausted)
    }
}
