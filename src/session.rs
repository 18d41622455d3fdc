//! Conversation orchestration.
//!
//! A [`Session`] owns everything one conversation needs: the script, the
//! fallback rule, the candidate-selection policy, the matcher options, and
//! the randomness source. The engine itself never loops and never falls
//! back; those decisions live here, at the boundary, where they can be
//! configured per session.
//!
//! Per turn:
//!
//! ```text
//! line ── tokenize ── halt word?  ── yes ──> Turn::Halt
//!                        │ no
//!                        v
//!            find_candidates + policy
//!                        │
//!          none? ── fallback rule, empty bindings
//!                        │
//!                        v
//!            swap_person ── synthesize ──> Turn::Reply
//! ```

use crate::script::builtin;
use crate::{
    Bindings, Options, Rule, Script, SelectionPolicy, TurnDetails, respond_verbose_with, respond_with, synthesize,
    tokenize,
};
use rand::Rng;

/// Reserved words that end the conversation when they are the entire input.
pub const HALT_WORDS: &[&str] = &["quit", "halt", "exit", "stop"];

/// Outcome of a single conversational turn.
#[derive(Debug, Clone, PartialEq)]
pub enum Turn {
    /// The input was a halt word; the conversation is over.
    Halt,
    /// A synthesized reply, already joined into a line.
    Reply(String),
}

/// One conversation over a fixed script.
pub struct Session<R: Rng> {
    script: Script,
    fallback: Rule,
    policy: SelectionPolicy,
    options: Options,
    rng: R,
}

impl<R: Rng> Session<R> {
    pub fn new(script: Script, policy: SelectionPolicy, options: Options, rng: R) -> Self {
        Session { script, fallback: builtin::fallback_rule().clone(), policy, options, rng }
    }

    /// Replace the default catch-all used when no rule matches.
    pub fn with_fallback(mut self, fallback: Rule) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn greeting(&self) -> &'static str {
        "Hello. What seems to be the problem?"
    }

    /// Run one turn of the conversation.
    pub fn turn(&mut self, line: &str) -> Turn {
        if is_halt(line) {
            return Turn::Halt;
        }
        match respond_with(&self.script, line, &self.policy, &self.options, &mut self.rng) {
            Some(reply) => Turn::Reply(reply.text),
            None => Turn::Reply(self.fallback_reply()),
        }
    }

    /// Run one turn and also report match details for trace output.
    ///
    /// A halted turn carries no details: the selector is never invoked for
    /// halt words.
    pub fn turn_traced(&mut self, line: &str) -> (Turn, Option<TurnDetails>) {
        if is_halt(line) {
            return (Turn::Halt, None);
        }
        let verbose = respond_verbose_with(&self.script, line, &self.policy, &self.options, &mut self.rng);
        let mut details = verbose.details;
        match verbose.reply {
            Some(reply) => (Turn::Reply(reply.text), Some(details)),
            None => {
                details.used_fallback = true;
                details.chosen = Some(self.fallback.name.clone());
                (Turn::Reply(self.fallback_reply()), Some(details))
            }
        }
    }

    fn fallback_reply(&mut self) -> String {
        // The fallback's responses reference no variables, so empty bindings
        // can never surface the MISSING sentinel.
        synthesize(&self.fallback, &Bindings::new(), &mut self.rng).join(" ")
    }
}

fn is_halt(line: &str) -> bool {
    let input = tokenize(line);
    matches!(input.as_slice(), [word] if HALT_WORDS.contains(&word.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session() -> Session<StdRng> {
        Session::new(
            builtin::script().clone(),
            SelectionPolicy::First,
            Options::default(),
            StdRng::seed_from_u64(11),
        )
    }

    #[test]
    fn halt_words_end_the_session() {
        let mut s = session();
        for word in HALT_WORDS {
            assert_eq!(s.turn(word), Turn::Halt);
            assert_eq!(s.turn(&format!("  {word}  ")), Turn::Halt);
        }
    }

    #[test]
    fn halt_word_inside_a_sentence_does_not_halt() {
        let mut s = session();
        assert!(matches!(s.turn("I want to quit my job"), Turn::Reply(_)));
    }

    #[test]
    fn halting_never_reaches_the_selector() {
        let mut s = session();
        let (turn, details) = s.turn_traced("quit");
        assert_eq!(turn, Turn::Halt);
        assert!(details.is_none());
    }

    #[test]
    fn unmatched_input_gets_the_fallback_reply() {
        let mut s = session();
        let (turn, details) = s.turn_traced("zyzzyva");
        let details = details.unwrap();
        assert!(details.used_fallback);
        assert!(details.candidates.is_empty());

        let Turn::Reply(text) = turn else { panic!("expected a reply") };
        let fallback_texts: Vec<String> =
            builtin::fallback_rule().responses.iter().map(|r| r.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(" ")).collect();
        assert!(fallback_texts.contains(&text), "unexpected fallback reply: {text}");
    }

    #[test]
    fn custom_fallback_is_honored() {
        let quiet = rule!(pattern: "?X", responses: ["hmm"]);
        let mut s = session().with_fallback(quiet);
        assert_eq!(s.turn("zyzzyva"), Turn::Reply("hmm".to_string()));
    }

    #[test]
    fn matched_input_is_answered_from_the_script() {
        let mut s = session();
        let (turn, details) = s.turn_traced("I am sad today");
        let details = details.unwrap();
        assert!(!details.used_fallback);
        assert_eq!(details.chosen.as_deref(), Some("?X I am sad ?Y"));
        assert!(matches!(turn, Turn::Reply(_)));
    }
}
