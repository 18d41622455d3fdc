//! Response synthesis.
//!
//! Given a chosen rule and a bindings map (already perspective-swapped if the
//! caller wants that), pick one response template and fill its slots:
//!
//! - literal words are copied verbatim;
//! - a variable reference is replaced by its bound fragment, spliced in flat;
//! - a variable with no binding degrades to a single visible [`MISSING`]
//!   word. Degraded-but-visible output beats a hard error here: a script
//!   typo should read strangely, not kill the conversation.
//!
//! Template choice is uniformly random over the rule's responses, with the
//! randomness source injected by the caller so tests and sessions can be
//! reproducible.

use crate::{Bindings, Rule, Term, Word};
use rand::Rng;
use rand::seq::SliceRandom;

/// Sentinel word emitted for a variable reference with no binding.
pub const MISSING: &str = "MISSING";

/// Fill one response template from the bindings.
pub fn fill(template: &[Term], bindings: &Bindings) -> Vec<Word> {
    let mut out = Vec::with_capacity(template.len());
    for term in template {
        match term {
            Term::Lit(word) => out.push(word.clone()),
            Term::Var(name) => match bindings.get(name) {
                Some(fragment) => out.extend(fragment.iter().cloned()),
                None => out.push(MISSING.to_string()),
            },
        }
    }
    out
}

/// Pick one of the rule's response templates uniformly at random and fill it.
pub fn synthesize<R: Rng + ?Sized>(rule: &Rule, bindings: &Bindings, rng: &mut R) -> Vec<Word> {
    // Loaders validate that every rule has at least one response.
    let template = rule.responses.choose(rng).expect("rule has at least one response");
    fill(template, bindings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn bindings(entries: &[(&str, &str)]) -> Bindings {
        entries.iter().map(|(name, fragment)| (name.to_string(), tokenize(fragment))).collect()
    }

    #[test]
    fn fills_variable_slots_by_splicing() {
        let filled = fill(&terms!("why do you want ?Y"), &bindings(&[("Y", "to be happy")]));
        assert_eq!(filled.join(" "), "why do you want to be happy");
    }

    #[test]
    fn literal_only_template_is_unchanged() {
        let template = terms!("I am sorry to hear you are depressed");
        let filled = fill(&template, &bindings(&[("X", "i"), ("Y", "am sad today")]));
        assert_eq!(filled.join(" "), "I am sorry to hear you are depressed");
    }

    #[test]
    fn unbound_reference_degrades_to_sentinel() {
        let filled = fill(&terms!("tell me about ?Z"), &bindings(&[("Y", "whatever")]));
        assert_eq!(filled.join(" "), "tell me about MISSING");
    }

    #[test]
    fn empty_fragment_splices_to_nothing() {
        let filled = fill(&terms!("go on ?X"), &bindings(&[("X", "")]));
        assert_eq!(filled.join(" "), "go on");
    }

    #[test]
    fn single_template_rule_is_deterministic() {
        let rule = rule!(pattern: "?X I want ?Y", responses: ["why do you want ?Y"]);
        let b = bindings(&[("Y", "to be happy")]);

        let mut rng_a = StdRng::seed_from_u64(1);
        let mut rng_b = StdRng::seed_from_u64(999);
        assert_eq!(synthesize(&rule, &b, &mut rng_a), synthesize(&rule, &b, &mut rng_b));
    }

    #[test]
    fn chosen_template_always_comes_from_the_rule() {
        let rule = rule!(
            pattern: "?X I want ?Y",
            responses: ["why do you want ?Y", "suppose you got ?Y soon", "what would it mean if you got ?Y"],
        );
        let b = bindings(&[("Y", "a nap")]);

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..32 {
            let reply = synthesize(&rule, &b, &mut rng).join(" ");
            assert!(
                ["why do you want a nap", "suppose you got a nap soon", "what would it mean if you got a nap"]
                    .contains(&reply.as_str()),
                "unexpected reply: {reply}"
            );
        }
    }
}
