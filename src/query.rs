//! Sectioned queries over an external element source.
//!
//! The storage layer that owns the elements is not part of this crate. It is
//! modelled by [`ElementSource`]: something that can hand out its current
//! snapshot of elements, and that may report an error from its most recent
//! fetch. A [`SectionedQuery`] pairs a source with a key extractor and
//! re-sections the current snapshot every time [`SectionedQuery::results`]
//! is called. Nothing is cached and nothing is pushed: callers decide when
//! to rebuild and replace the results they hold.

use std::convert::Infallible;
use std::hash::Hash;
use std::sync::Arc;

use tracing::debug_span;

use crate::sectioned::{KeyFn, SectionedResults};

/// A pull-based provider of elements, such as a live database query.
pub trait ElementSource {
    /// The element type handed out in snapshots.
    type Element;

    /// The error a fetch may have produced.
    type Error;

    /// The current elements, in the order the source defines.
    fn snapshot(&self) -> Vec<Self::Element>;

    /// The error encountered during the most recent fetch, if any.
    fn fetch_error(&self) -> Option<&Self::Error> {
        return None;
    }

    /// Refresh the source's notion of "current". Sources that are always
    /// current need not override this.
    fn update(&mut self) {}
}

/// A source plus a key extractor.
pub struct SectionedQuery<S: ElementSource, K> {
    source: S,
    key_of: KeyFn<S::Element, K>,
}

impl<S, K> SectionedQuery<S, K>
where
    S: ElementSource,
    K: Eq + Hash + Clone,
{
    /// Create a sectioned query grouping `source`'s elements by `key_of`.
    pub fn new<F>(source: S, key_of: F) -> SectionedQuery<S, K>
    where
        F: Fn(&S::Element) -> K + Send + Sync + 'static,
    {
        return SectionedQuery {
            source,
            key_of: Arc::new(key_of),
        };
    }

    /// Create a sectioned query with an already shared key extractor.
    pub fn with_key_fn(source: S, key_of: KeyFn<S::Element, K>) -> SectionedQuery<S, K> {
        return SectionedQuery { source, key_of };
    }

    /// Section the source's current snapshot.
    ///
    /// Every call reads a fresh snapshot and builds new results from scratch.
    pub fn results(&self) -> SectionedResults<K, S::Element> {
        let _span = debug_span!("sectioned_query_results").entered();
        let elements = self.source.snapshot();
        return SectionedResults::from_key_fn(elements, Arc::clone(&self.key_of));
    }
}

impl<S: ElementSource, K> SectionedQuery<S, K> {
    /// The source's most recent fetch error, exactly as the source reports it.
    pub fn fetch_error(&self) -> Option<&S::Error> {
        return self.source.fetch_error();
    }

    /// Ask the source to refresh.
    pub fn update(&mut self) {
        self.source.update();
    }

    pub fn source(&self) -> &S {
        return &self.source;
    }

    pub fn source_mut(&mut self) -> &mut S {
        return &mut self.source;
    }

    pub fn into_source(self) -> S {
        return self.source;
    }

    pub fn key_fn(&self) -> &KeyFn<S::Element, K> {
        return &self.key_of;
    }
}

/// An in-memory [`ElementSource`].
///
/// Holds a current snapshot and an optional staged one. Staged elements only
/// become current on [`update`](ElementSource::update), which mirrors how a
/// live query exposes a new fetch.
#[derive(Clone, Debug)]
pub struct VecSource<E, X = Infallible> {
    current: Vec<E>,
    staged: Option<Vec<E>>,
    error: Option<X>,
}

impl<E, X> Default for VecSource<E, X> {
    fn default() -> Self {
        return VecSource {
            current: Vec::new(),
            staged: None,
            error: None,
        };
    }
}

impl<E, X> VecSource<E, X> {
    pub fn new(elements: Vec<E>) -> VecSource<E, X> {
        return VecSource {
            current: elements,
            staged: None,
            error: None,
        };
    }

    /// The current elements.
    pub fn elements(&self) -> &[E] {
        return &self.current;
    }

    /// Replace the current elements immediately.
    pub fn replace(&mut self, elements: Vec<E>) {
        self.current = elements;
        self.staged = None;
    }

    /// Append to the current elements immediately.
    pub fn push(&mut self, element: E) {
        self.current.push(element);
    }

    /// Stage elements that become current on the next update.
    pub fn stage(&mut self, elements: Vec<E>) {
        self.staged = Some(elements);
    }

    pub fn has_staged(&self) -> bool {
        return self.staged.is_some();
    }

    /// Record a fetch error. The current elements are kept.
    pub fn fail(&mut self, error: X) {
        self.error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

impl<E: Clone, X> ElementSource for VecSource<E, X> {
    type Element = E;
    type Error = X;

    fn snapshot(&self) -> Vec<E> {
        return self.current.clone();
    }

    fn fetch_error(&self) -> Option<&X> {
        return self.error.as_ref();
    }

    fn update(&mut self) {
        if let Some(staged) = self.staged.take() {
            self.current = staged;
            self.error = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::RandomAccess;

    fn source() -> VecSource<(char, u32), String> {
        return VecSource::new(vec![('x', 1), ('y', 2), ('x', 3)]);
    }

    #[test]
    fn results_follow_the_snapshot() {
        let mut query = SectionedQuery::new(source(), |pair: &(char, u32)| pair.0);
        assert_eq!(query.results().len(), 2);

        query.source_mut().push(('z', 4));
        let results = query.results();
        assert_eq!(results.len(), 3);
        assert_eq!(results[2].id(), &'z');
    }

    #[test]
    fn staged_elements_wait_for_update() {
        let mut query = SectionedQuery::new(source(), |pair: &(char, u32)| pair.0);
        query.source_mut().stage(vec![('q', 9)]);
        assert_eq!(query.results().len(), 2);

        query.update();
        let results = query.results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].elements(), &[('q', 9)]);
        assert!(!query.source().has_staged());
    }

    #[test]
    fn fetch_error_passes_through() {
        let mut query = SectionedQuery::new(source(), |pair: &(char, u32)| pair.0);
        assert!(query.fetch_error().is_none());

        query.source_mut().fail("disk on fire".to_string());
        assert_eq!(query.fetch_error().map(String::as_str), Some("disk on fire"));
        // Stale elements are still served.
        assert_eq!(query.results().element_count(), 3);

        query.source_mut().clear_error();
        assert!(query.fetch_error().is_none());
    }

    #[test]
    fn replace_drops_staged_elements() {
        let mut source = source();
        source.stage(vec![('s', 1)]);
        source.replace(vec![('r', 2), ('r', 3)]);
        assert!(!source.has_staged());

        let query = SectionedQuery::new(source, |pair: &(char, u32)| pair.0);
        assert_eq!(query.results().len(), 1);
        assert_eq!(query.into_source().elements().len(), 2);
    }

    #[test]
    fn default_source_is_empty() {
        let query = SectionedQuery::new(VecSource::<u8>::default(), |n: &u8| *n);
        let results = query.results();
        assert!(results.is_empty());
        assert!(query.fetch_error().is_none());
    }
}
