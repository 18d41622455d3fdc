use crate::engine::{self, SelectMetrics};
use crate::{Candidate, Script, Word};
use rand::Rng;
use rand::seq::SliceRandom;
use std::time::{Duration, Instant};

pub use crate::engine::{MISSING, fill, swap_person, synthesize};

/// Default upper bound on search states per pattern match.
///
/// Generous for conversational lines (a few words, a couple of variables)
/// while keeping pathological input from exploding the work queue.
pub const DEFAULT_MAX_STATES: usize = 10_000;

/// Options that affect matching behavior.
#[derive(Debug, Clone)]
pub struct Options {
    /// Search-node budget per pattern match; see [`DEFAULT_MAX_STATES`].
    pub max_states: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options { max_states: DEFAULT_MAX_STATES }
    }
}

/// Whitespace-tokenize a raw input line.
pub fn tokenize(line: &str) -> Vec<Word> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Find every (rule, bindings) candidate for `input` across the script.
///
/// Ordered by script order, then by the matcher's result order. This only
/// *enumerates* candidates; picking one is the caller's job (see
/// [`SelectionPolicy`]).
pub fn find_candidates<'a>(script: &'a Script, input: &[Word], options: &Options) -> Vec<Candidate<'a>> {
    engine::find_candidates(script, input, options)
}

/// How the orchestration layer picks among match candidates.
///
/// This is deliberately a value at the boundary rather than logic inside the
/// matcher, so policies can be swapped without touching the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    /// Use the first candidate in script order.
    #[default]
    First,
    /// Pick uniformly at random among all candidates.
    Random,
    /// Prefer the candidate whose variables capture the most input words;
    /// ties go to the earlier candidate.
    LongestBound,
}

impl SelectionPolicy {
    /// Pick one candidate, or `None` if there are none.
    pub fn choose<'c, 'a, R: Rng + ?Sized>(
        &self,
        candidates: &'c [Candidate<'a>],
        rng: &mut R,
    ) -> Option<&'c Candidate<'a>> {
        match self {
            SelectionPolicy::First => candidates.first(),
            SelectionPolicy::Random => candidates.choose(rng),
            SelectionPolicy::LongestBound => {
                let mut best: Option<&Candidate<'_>> = None;
                for candidate in candidates {
                    if best.is_none_or(|b| bound_words(candidate) > bound_words(b)) {
                        best = Some(candidate);
                    }
                }
                best
            }
        }
    }
}

fn bound_words(candidate: &Candidate<'_>) -> usize {
    candidate.bindings.iter().map(|(_, fragment)| fragment.len()).sum()
}

/// A synthesized reply for one input line.
#[derive(Debug, Clone)]
pub struct Reply {
    /// The filled response, word by word.
    pub tokens: Vec<Word>,
    /// The filled response joined with single spaces.
    pub text: String,
    /// Total elapsed time spent matching + synthesizing.
    pub elapsed: Duration,
}

/// Match `line` against the script and synthesize one reply.
///
/// Composition of the whole pipeline: tokenize, enumerate candidates, apply
/// `policy`, perspective-swap the winner's bindings, fill a template. Returns
/// `None` when no rule matches; the caller decides the fallback.
///
/// # Example
/// ```
/// use parley::script::builtin;
/// use parley::{Options, SelectionPolicy, respond_with};
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let reply = respond_with(
///     builtin::script(),
///     "sometimes I want to be happy",
///     &SelectionPolicy::First,
///     &Options::default(),
///     &mut rng,
/// )
/// .unwrap();
/// assert!(reply.text.ends_with("to be happy") || reply.text.contains("to be happy soon"));
/// ```
pub fn respond_with<R: Rng + ?Sized>(
    script: &Script,
    line: &str,
    policy: &SelectionPolicy,
    options: &Options,
    rng: &mut R,
) -> Option<Reply> {
    let start = Instant::now();
    let input = tokenize(line);
    let candidates = engine::find_candidates(script, &input, options);
    let chosen = policy.choose(&candidates, rng)?;
    let swapped = swap_person(&chosen.bindings);
    let tokens = synthesize(chosen.rule, &swapped, rng);
    let text = tokens.join(" ");
    Some(Reply { tokens, text, elapsed: start.elapsed() })
}

/// A candidate condensed for trace output.
#[derive(Debug, Clone)]
pub struct CandidateSummary {
    /// Display name of the matched rule.
    pub rule: String,
    /// Bindings as (variable, joined fragment) pairs, sorted by variable.
    pub bindings: Vec<(String, String)>,
}

impl CandidateSummary {
    fn new(candidate: &Candidate<'_>) -> Self {
        let mut bindings: Vec<(String, String)> =
            candidate.bindings.iter().map(|(name, fragment)| (name.to_string(), fragment.join(" "))).collect();
        bindings.sort();
        CandidateSummary { rule: candidate.rule.name.clone(), bindings }
    }
}

/// Extra details returned by [`respond_verbose_with`].
///
/// Compact on purpose: enough for the trace report without dumping internal
/// search state.
#[derive(Debug, Clone)]
pub struct TurnDetails {
    /// Total elapsed time for the turn.
    pub total: Duration,
    /// Per-rule search counters.
    pub select: SelectMetrics,
    /// Every candidate, in selection order.
    pub candidates: Vec<CandidateSummary>,
    /// Display name of the rule the policy picked, if any.
    pub chosen: Option<String>,
    /// True when the session substituted its fallback rule.
    pub used_fallback: bool,
}

/// Result from [`respond_verbose_with`].
#[derive(Debug, Clone)]
pub struct ReplyVerbose {
    /// The synthesized reply, `None` when no rule matched.
    pub reply: Option<Reply>,
    pub details: TurnDetails,
}

/// As [`respond_with`], but also returns candidate and timing details.
///
/// Useful for script debugging (`--trace` in the CLI). The plain
/// [`respond_with`] path does not allocate these extra traces.
pub fn respond_verbose_with<R: Rng + ?Sized>(
    script: &Script,
    line: &str,
    policy: &SelectionPolicy,
    options: &Options,
    rng: &mut R,
) -> ReplyVerbose {
    let start = Instant::now();
    let input = tokenize(line);
    let (candidates, select) = engine::find_candidates_with_metrics(script, &input, options);
    let summaries: Vec<CandidateSummary> = candidates.iter().map(CandidateSummary::new).collect();

    let reply = policy.choose(&candidates, rng).map(|chosen| {
        let swapped = swap_person(&chosen.bindings);
        let tokens = synthesize(chosen.rule, &swapped, rng);
        let text = tokens.join(" ");
        (chosen.rule.name.clone(), tokens, text)
    });

    let chosen = reply.as_ref().map(|(name, _, _)| name.clone());
    let total = start.elapsed();
    ReplyVerbose {
        reply: reply.map(|(_, tokens, text)| Reply { tokens, text, elapsed: total }),
        details: TurnDetails { total, select, candidates: summaries, chosen, used_fallback: false },
    }
}
