//! Order-preserving deduplication.
//!
//! Given a sequence of keys that may repeat, yield each distinct key exactly
//! once, in the order of its first occurrence:
//!
//! ```
//! use sectioned::uniqued::Uniqued;
//!
//! let keys: Vec<_> = ["b", "a", "b", "c", "a"].into_iter().uniqued().collect();
//! assert_eq!(keys, ["b", "a", "c"]);
//! ```
//!
//! The adapter keeps a set of keys already yielded. Each incoming key is
//! tested and inserted in a single `insert` call, so a key recurring
//! immediately or much later is always recognized as a repeat.

use std::hash::Hash;

use rustc_hash::FxHashSet;

/// Iterator adapter yielding the first occurrence of every distinct item.
///
/// Created by [`Uniqued::uniqued`].
pub struct Unique<I: Iterator> {
    iter: I,
    seen: FxHashSet<I::Item>,
}

impl<I> Iterator for Unique<I>
where
    I: Iterator,
    I::Item: Eq + Hash + Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        for item in self.iter.by_ref() {
            if self.seen.insert(item.clone()) {
                return Some(item);
            }
        }
        return None;
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.iter.size_hint();
        // Everything left may be a repeat, but at least one new item remains
        // when the set is empty and the input is not.
        let lower = if self.seen.is_empty() { lower.min(1) } else { 0 };
        return (lower, upper);
    }
}

/// Extension trait adding [`uniqued`](Uniqued::uniqued) to every iterator
/// over hashable items.
pub trait Uniqued: Iterator + Sized {
    /// Yield each distinct item once, in first-occurrence order.
    fn uniqued(self) -> Unique<Self>
    where
        Self::Item: Eq + Hash + Clone,
    {
        return Unique {
            iter: self,
            seen: FxHashSet::default(),
        };
    }
}

impl<I: Iterator> Uniqued for I {}

/// Collect the distinct keys of `keys` in first-occurrence order.
///
/// Empty input yields an empty vector.
pub fn dedupe_keep_first<K, I>(keys: I) -> Vec<K>
where
    I: IntoIterator<Item = K>,
    K: Eq + Hash + Clone,
{
    return keys.into_iter().uniqued().collect();
}
