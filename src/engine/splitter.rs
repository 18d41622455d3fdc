//! Sequence splitting.
//!
//! The matcher binds an unseen variable by trying every way the remaining
//! input can be cut into a (prefix, suffix) pair: the prefix becomes the
//! candidate fragment, the suffix is what the rest of the pattern must still
//! consume. Both sides may be empty.

/// Return every (prefix, suffix) cut of `items`, in increasing prefix length.
///
/// For a sequence of length `n` this yields exactly `n + 1` pairs, and for
/// every pair the concatenation of prefix and suffix is the original
/// sequence. Pure; no allocation beyond the iterator itself.
pub(crate) fn splits<T>(items: &[T]) -> impl Iterator<Item = (&[T], &[T])> {
    (0..=items.len()).map(move |i| items.split_at(i))
}
