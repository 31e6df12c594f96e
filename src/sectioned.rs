//! Grouping a flat, ordered list of elements into sections.
//!
//! Elements are bucketed by a key extracted from each one. Sections come out
//! in the order in which their key first appears in the input, and each
//! section keeps its elements in input order:
//!
//! ```text
//! input:    (a,1) (b,2) (a,3) (c,4) (b,5)
//! sections: a:[1,3]  b:[2,5]  c:[4]
//! ```
//!
//! Concatenating the sections does not reproduce the input when keys
//! interleave; elements are redistributed into key-homogeneous buckets.
//!
//! A [`SectionedResults`] is a snapshot. It is never updated in place: to
//! reflect new data, build a new one (see [`SectionedResults::rebuild`]).

use std::fmt;
use std::hash::Hash;
use std::ops::Index;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::{trace, warn};

use crate::uniqued::Uniqued;
use crate::view::{Identifiable, RandomAccess, ViewError};

/// A shared key extractor, stored by [`SectionedResults`] so the same
/// grouping can be applied to a later snapshot.
pub type KeyFn<E, K> = Arc<dyn Fn(&E) -> K + Send + Sync>;

/// Group `elements` by `key_of` into sections.
///
/// `key_of` is called exactly once per element. Empty input yields no
/// sections.
pub fn section<K, E, I, F>(elements: I, mut key_of: F) -> Vec<Section<K, E>>
where
    I: IntoIterator<Item = E>,
    K: Eq + Hash + Clone,
    F: FnMut(&E) -> K,
{
    let mut buckets: FxHashMap<K, Vec<E>> = FxHashMap::default();
    let mut element_count = 0usize;

    // One streaming pass: every element lands in its bucket while its key
    // flows on to the deduplicator, so only distinct keys are retained.
    let order: Vec<K> = elements
        .into_iter()
        .map(|element| {
            let key = key_of(&element);
            buckets.entry(key.clone()).or_default().push(element);
            element_count += 1;
            key
        })
        .uniqued()
        .collect();

    let mut sections = Vec::with_capacity(buckets.len());
    for key in order {
        let bucket = buckets.remove(&key);
        debug_assert!(bucket.is_some(), "distinct key has no bucket");
        let Some(elements) = bucket else {
            warn!(section = sections.len(), "skipping key without a bucket");
            continue;
        };
        sections.push(Section { id: key, elements });
    }

    trace!(elements = element_count, sections = sections.len(), "sectioned elements");
    return sections;
}

/// A group of elements sharing one key, in input order.
///
/// Never empty: sections only exist for keys that occurred.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Section<K, E> {
    id: K,
    elements: Vec<E>,
}

impl<K, E> Section<K, E> {
    /// The key shared by every element of the section.
    pub fn id(&self) -> &K {
        return &self.id;
    }

    /// The section's elements, in input order.
    pub fn elements(&self) -> &[E] {
        return &self.elements;
    }

    /// Take ownership of the elements, dropping the key.
    pub fn into_elements(self) -> Vec<E> {
        return self.elements;
    }

    /// Split into the key and the elements.
    pub fn into_parts(self) -> (K, Vec<E>) {
        return (self.id, self.elements);
    }
}

impl<K, E> Identifiable for Section<K, E> {
    type Id = K;

    fn id(&self) -> &K {
        return &self.id;
    }
}

impl<K, E> RandomAccess for Section<K, E> {
    type Element = E;

    fn as_slice(&self) -> &[E] {
        return &self.elements;
    }
}

impl<K, E> Index<usize> for Section<K, E> {
    type Output = E;

    fn index(&self, index: usize) -> &E {
        return &self.elements[index];
    }
}

impl<K, E> IntoIterator for Section<K, E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        return self.elements.into_iter();
    }
}

impl<'a, K, E> IntoIterator for &'a Section<K, E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        return self.elements.iter();
    }
}

/// Elements grouped into ordered sections, together with the key extractor
/// that produced the grouping.
///
/// Invariants:
/// - every key appears in at most one section;
/// - sections are ordered by the first occurrence of their key in the input;
/// - inside a section, elements keep their relative input order.
pub struct SectionedResults<K, E> {
    key_of: KeyFn<E, K>,
    sections: Vec<Section<K, E>>,
}

impl<K, E> SectionedResults<K, E>
where
    K: Eq + Hash + Clone,
{
    /// Section `elements` by `key_of`.
    pub fn new<I, F>(elements: I, key_of: F) -> SectionedResults<K, E>
    where
        I: IntoIterator<Item = E>,
        F: Fn(&E) -> K + Send + Sync + 'static,
    {
        return Self::from_key_fn(elements, Arc::new(key_of));
    }

    /// Section `elements` with an already shared key extractor.
    pub fn from_key_fn<I>(elements: I, key_of: KeyFn<E, K>) -> SectionedResults<K, E>
    where
        I: IntoIterator<Item = E>,
    {
        let sections = section(elements, |element| key_of(element));
        return SectionedResults { key_of, sections };
    }

    /// Build fresh results from a newer snapshot, grouped the same way.
    ///
    /// `self` is left untouched; callers replace their held results with the
    /// returned value.
    pub fn rebuild<I>(&self, elements: I) -> SectionedResults<K, E>
    where
        I: IntoIterator<Item = E>,
    {
        return Self::from_key_fn(elements, Arc::clone(&self.key_of));
    }

    /// Index of the section whose key is `id`.
    pub fn position(&self, id: &K) -> Option<usize> {
        return self.sections.iter().position(|section| section.id == *id);
    }

    /// The section whose key is `id`.
    pub fn section(&self, id: &K) -> Option<&Section<K, E>> {
        return self.sections.iter().find(|section| section.id == *id);
    }
}

impl<K, E> SectionedResults<K, E> {
    /// Apply the stored key extractor to `element`.
    pub fn key_of(&self, element: &E) -> K {
        return (self.key_of)(element);
    }

    /// The shared key extractor, for reuse with another snapshot.
    pub fn key_fn(&self) -> &KeyFn<E, K> {
        return &self.key_of;
    }

    /// All sections, in first-occurrence order of their keys.
    pub fn sections(&self) -> &[Section<K, E>] {
        return &self.sections;
    }

    /// Take ownership of the section list.
    pub fn into_sections(self) -> Vec<Section<K, E>> {
        return self.sections;
    }

    /// Total number of elements across all sections.
    pub fn element_count(&self) -> usize {
        return self.sections.iter().map(|section| section.elements.len()).sum();
    }

    /// Iterate over every element, section by section.
    pub fn elements(&self) -> impl DoubleEndedIterator<Item = &E> {
        return self.sections.iter().flat_map(|section| section.elements.iter());
    }

    /// Checked two-level lookup: element `element` of section `section`.
    pub fn element_at(&self, section: usize, element: usize) -> Result<&E, ViewError> {
        return self.at(section)?.at(element);
    }
}

impl<K: Clone, E: Clone> Clone for SectionedResults<K, E> {
    fn clone(&self) -> Self {
        return SectionedResults {
            key_of: Arc::clone(&self.key_of),
            sections: self.sections.clone(),
        };
    }
}

impl<K: fmt::Debug, E: fmt::Debug> fmt::Debug for SectionedResults<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f
            .debug_struct("SectionedResults")
            .field("sections", &self.sections)
            .finish_non_exhaustive();
    }
}

/// Results compare by their sections; the key extractor is not compared.
impl<K: PartialEq, E: PartialEq> PartialEq for SectionedResults<K, E> {
    fn eq(&self, other: &Self) -> bool {
        return self.sections == other.sections;
    }
}

impl<K: Eq, E: Eq> Eq for SectionedResults<K, E> {}

impl<K, E> RandomAccess for SectionedResults<K, E> {
    type Element = Section<K, E>;

    fn as_slice(&self) -> &[Section<K, E>] {
        return &self.sections;
    }
}

impl<K, E> Index<usize> for SectionedResults<K, E> {
    type Output = Section<K, E>;

    fn index(&self, index: usize) -> &Section<K, E> {
        return &self.sections[index];
    }
}

impl<K, E> IntoIterator for SectionedResults<K, E> {
    type Item = Section<K, E>;
    type IntoIter = std::vec::IntoIter<Section<K, E>>;

    fn into_iter(self) -> Self::IntoIter {
        return self.sections.into_iter();
    }
}

impl<'a, K, E> IntoIterator for &'a SectionedResults<K, E> {
    type Item = &'a Section<K, E>;
    type IntoIter = std::slice::Iter<'a, Section<K, E>>;

    fn into_iter(self) -> Self::IntoIter {
        return self.sections.iter();
    }
}

#[cfg(feature = "serde")]
impl<K: serde::Serialize, E: serde::Serialize> serde::Serialize for SectionedResults<K, E> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        return serializer.collect_seq(&self.sections);
    }
}
