//! Pronoun perspective swap.
//!
//! A matched fragment is spoken from the user's perspective ("my dog hates
//! me"); echoed back verbatim it would come out in the wrong person. Before
//! filling a response template, every word of every bound fragment is run
//! through a fixed first-person/second-person table.
//!
//! Only *bindings* pass through here. Literal template words are written in
//! the responder's own voice and are never touched.

use crate::{Bindings, Word};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Fixed perspective-swap table. Symmetric in intent (first person to second
/// person and back), though individual entries need not be mutual inverses:
/// both "me" and "i" map to "you", while "you" maps back to "i".
static PRONOUN_SWAPS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("i", "you"),
        ("me", "you"),
        ("my", "your"),
        ("mine", "yours"),
        ("am", "are"),
        ("you", "i"),
        ("your", "my"),
        ("yours", "mine"),
    ])
});

/// Return new bindings with every fragment word perspective-swapped.
///
/// Lookup is ASCII case-insensitive, so a typed "I" swaps like "i"; words
/// without a table entry pass through unchanged. Pure; the input bindings
/// are not mutated.
pub fn swap_person(bindings: &Bindings) -> Bindings {
    bindings
        .iter()
        .map(|(name, fragment)| (name.to_string(), fragment.iter().map(|word| swap_word(word)).collect()))
        .collect()
}

fn swap_word(word: &str) -> Word {
    match PRONOUN_SWAPS.get(word.to_ascii_lowercase().as_str()) {
        Some(swapped) => (*swapped).to_string(),
        None => word.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize;

    fn bindings(entries: &[(&str, &str)]) -> Bindings {
        entries.iter().map(|(name, fragment)| (name.to_string(), tokenize(fragment))).collect()
    }

    #[test]
    fn swaps_first_and_second_person() {
        let swapped = swap_person(&bindings(&[("X", "i am angry at you")]));
        assert_eq!(swapped.get("X"), Some(&tokenize("you are angry at i")[..]));
    }

    #[test]
    fn possessives_swap_both_ways() {
        let swapped = swap_person(&bindings(&[("X", "my dog ate your homework")]));
        assert_eq!(swapped.get("X"), Some(&tokenize("your dog ate my homework")[..]));
    }

    #[test]
    fn capitalized_i_swaps_too() {
        let swapped = swap_person(&bindings(&[("X", "I think"), ("Y", "mine")]));
        assert_eq!(swapped.get("X"), Some(&tokenize("you think")[..]));
        assert_eq!(swapped.get("Y"), Some(&tokenize("yours")[..]));
    }

    #[test]
    fn unlisted_words_pass_through() {
        let original = bindings(&[("X", "the computer is slow")]);
        let swapped = swap_person(&original);
        assert_eq!(swapped, original);
    }

    #[test]
    fn input_bindings_are_untouched() {
        let original = bindings(&[("X", "my problem")]);
        let _ = swap_person(&original);
        assert_eq!(original.get("X"), Some(&tokenize("my problem")[..]));
    }
}
