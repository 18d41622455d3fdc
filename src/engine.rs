//! Matching and synthesis engine.
//!
//! This module is the *public entry point* for the responder engine. The
//! algorithmic core lives in focused submodules under `src/engine/` while
//! public paths stay stable (for example `crate::engine::find_candidates`).
//!
//! ## How the parts work together
//!
//! At a high level, answering one utterance is a pipeline:
//!
//! ```text
//! input words ──┐
//!               │  find_candidates            (select.rs)
//! script ───────┼─ per rule: match_terms      (matcher.rs)
//!               │    └─ splits                (splitter.rs)
//!               v
//!        Vec<Candidate>  (rule, bindings) in script order
//!               │
//!               │  caller picks one (SelectionPolicy, api.rs)
//!               v
//!        swap_person                          (swap.rs)
//!               │
//!               v
//!        synthesize / fill                    (fill.rs)
//!               │
//!               v
//!          output words
//! ```
//!
//! The matcher is a breadth-first backtracking search over immutable match
//! states. Worst-case branching is exponential in the number of free
//! variables versus input length; conversational lines are short, so in
//! practice the search is tiny, but every entry point still carries a
//! configurable state budget (`Options::max_states`) so adversarial input
//! cannot blow up the queue.
//!
//! ## Responsibilities by module
//!
//! - `splitter.rs`: every (prefix, suffix) cut of a word sequence.
//! - `matcher.rs`: the backtracking search enumerating all consistent
//!   bindings for one pattern against one input.
//! - `select.rs`: applies the matcher across a whole script, in rule order.
//! - `swap.rs`: perspective-swaps the words inside bound fragments.
//! - `fill.rs`: template selection (injected RNG) and slot filling.
//! - `metrics.rs`: optional timing/count data for runs.
//!
//! ## Debugging
//!
//! Set `PARLEY_DEBUG_MATCH=1` to print match and selection traces.

#[path = "engine/fill.rs"]
mod fill;
#[path = "engine/matcher.rs"]
mod matcher;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/select.rs"]
mod select;
#[path = "engine/splitter.rs"]
mod splitter;
#[path = "engine/swap.rs"]
mod swap;

pub use fill::{MISSING, fill, synthesize};
#[allow(unused_imports)]
pub use matcher::{match_terms, match_terms_with_metrics};
pub use metrics::{MatchMetrics, RuleMatchMetrics, SelectMetrics};
pub use select::{find_candidates, find_candidates_with_metrics};
pub use swap::swap_person;
