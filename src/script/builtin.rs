//! Built-in doctor script.
//!
//! A default rule set in the classic psychotherapist register, usable
//! without loading any file. Order matters: more specific patterns ("I am
//! sad") sit above the general forms ("I am") so the first-candidate policy
//! prefers them.

use crate::{Rule, Script};
use once_cell::sync::Lazy;

static DOCTOR: Lazy<Script> = Lazy::new(|| {
    Script::new(vec![
        rule!(
            pattern: "?X hello ?Y",
            responses: ["how do you do. please state your problem"],
        ),
        rule!(
            pattern: "?X computer ?Y",
            responses: [
                "do computers worry you",
                "what do you think about machines",
                "why do you mention computers",
                "what do you think machines have to do with your problem",
            ],
        ),
        rule!(
            pattern: "?X sorry ?Y",
            responses: ["please don't apologize", "apologies are not necessary"],
        ),
        rule!(
            pattern: "?X I remember ?Y",
            responses: [
                "do you often think of ?Y",
                "does thinking of ?Y bring anything else to mind",
                "why do you remember ?Y just now",
            ],
        ),
        rule!(
            pattern: "?X I dreamed ?Y",
            responses: ["really ?Y", "have you ever fantasized ?Y while you were awake"],
        ),
        rule!(
            pattern: "?X I want ?Y",
            responses: [
                "what would it mean if you got ?Y",
                "why do you want ?Y",
                "suppose you got ?Y soon",
            ],
        ),
        rule!(
            pattern: "?X I am sad ?Y",
            responses: ["I am sorry to hear you are depressed", "I'm sure it's not pleasant to be sad"],
        ),
        rule!(
            pattern: "?X are like ?Y",
            responses: ["what resemblance do you see between ?X and ?Y"],
        ),
        rule!(
            pattern: "?X I was ?Y",
            responses: ["were you really", "perhaps I already knew you were ?Y"],
        ),
        rule!(
            pattern: "?X I am ?Y",
            responses: ["why do you think you are ?Y", "how long have you been ?Y"],
        ),
        rule!(
            pattern: "?X am I ?Y",
            responses: ["do you believe you are ?Y", "would you want to be ?Y"],
        ),
        rule!(
            pattern: "?X you are ?Y",
            responses: ["what makes you think I am ?Y"],
        ),
        rule!(
            pattern: "?X because ?Y",
            responses: ["is that the real reason", "what other reasons come to mind"],
        ),
        rule!(
            pattern: "?X mother ?Y",
            responses: ["tell me more about your family"],
        ),
        rule!(
            pattern: "?X father ?Y",
            responses: ["tell me more about your family"],
        ),
        rule!(
            pattern: "?X I feel ?Y",
            responses: ["do you often feel ?Y"],
        ),
        rule!(
            pattern: "?X I felt ?Y",
            responses: ["what other feelings do you have"],
        ),
    ])
});

static FALLBACK: Lazy<Rule> = Lazy::new(|| {
    rule!(
        pattern: "?X",
        responses: [
            "please go on",
            "tell me more about that",
            "i see",
            "very interesting",
            "can you elaborate on that",
        ],
    )
});

/// The default doctor script.
pub fn script() -> &'static Script {
    &DOCTOR
}

/// Catch-all rule a session uses when no script rule matches. Its responses
/// reference no variables, so it synthesizes cleanly from empty bindings.
pub fn fallback_rule() -> &'static Rule {
    &FALLBACK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Term;

    #[test]
    fn every_rule_is_well_formed() {
        for rule in script().rules() {
            assert!(!rule.pattern.is_empty(), "rule '{}' has an empty pattern", rule.name);
            assert!(!rule.responses.is_empty(), "rule '{}' has no responses", rule.name);
            for response in &rule.responses {
                assert!(!response.is_empty(), "rule '{}' has an empty response", rule.name);
            }
        }
    }

    #[test]
    fn response_variables_are_bound_by_their_pattern() {
        // A builtin response must never synthesize the MISSING sentinel.
        for rule in script().rules().iter().chain([fallback_rule()]) {
            let pattern_vars: Vec<&String> =
                rule.pattern.iter().filter_map(|t| match t { Term::Var(name) => Some(name), _ => None }).collect();
            for response in &rule.responses {
                for term in response {
                    if let Term::Var(name) = term {
                        assert!(pattern_vars.contains(&name), "rule '{}' references unbound ?{}", rule.name, name);
                    }
                }
            }
        }
    }

    #[test]
    fn specific_rules_precede_general_ones() {
        let names: Vec<&str> = script().rules().iter().map(|r| r.name.as_str()).collect();
        let sad = names.iter().position(|n| *n == "?X I am sad ?Y").unwrap();
        let am = names.iter().position(|n| *n == "?X I am ?Y").unwrap();
        assert!(sad < am);
    }
}
