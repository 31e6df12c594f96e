//! Read-only random-access views.
//!
//! Both levels of a [`SectionedResults`](crate::SectionedResults) (the list
//! of sections, and the elements inside each section) are exposed through
//! the same [`RandomAccess`] trait. Implementors only provide
//! [`as_slice`](RandomAccess::as_slice); counting, checked indexing,
//! iteration in both directions and slicing come for free.
//!
//! A [`Slice`] is a borrowed, contiguous sub-range that keeps the indices of
//! the collection it was cut from: if `view.slice(2..5)` succeeds, the slice
//! accepts indices `2`, `3` and `4`, and `slice.at(2)` is `view.at(2)`.

use std::fmt;
use std::iter::Zip;
use std::ops::{Bound, Index, Range, RangeBounds};

/// Error returned by checked view operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// An index outside `start..end` was requested.
    #[error("index {index} out of bounds for {start}..{end}")]
    OutOfBounds {
        index: usize,
        start: usize,
        end: usize,
    },
    /// A slice range was reversed or reached outside `lower..upper`.
    #[error("range {start}..{end} is not within {lower}..{upper}")]
    InvalidRange {
        start: usize,
        end: usize,
        lower: usize,
        upper: usize,
    },
}

/// A value with a stable identity, usable as a grouping or render key.
pub trait Identifiable {
    type Id;

    /// The identity of this value.
    fn id(&self) -> &Self::Id;
}

/// An immutable, indexable, countable and iterable sequence.
///
/// Indices run from [`start_index`](RandomAccess::start_index) (zero for
/// whole collections) up to, but excluding,
/// [`end_index`](RandomAccess::end_index).
pub trait RandomAccess {
    /// The type of the items in the view.
    type Element;

    /// The items in index order. Item `i` of the returned slice sits at
    /// index `start_index() + i`.
    fn as_slice(&self) -> &[Self::Element];

    /// The first valid index.
    fn start_index(&self) -> usize {
        return 0;
    }

    /// One past the last valid index.
    fn end_index(&self) -> usize {
        return self.start_index() + self.len();
    }

    /// The valid indices, in ascending order.
    fn indices(&self) -> Range<usize> {
        return self.start_index()..self.end_index();
    }

    /// Number of items.
    fn len(&self) -> usize {
        return self.as_slice().len();
    }

    fn is_empty(&self) -> bool {
        return self.len() == 0;
    }

    /// Get the item at `index`, failing with [`ViewError::OutOfBounds`]
    /// outside [`indices`](RandomAccess::indices).
    fn at(&self, index: usize) -> Result<&Self::Element, ViewError> {
        let start = self.start_index();
        let end = self.end_index();
        if index < start || index >= end {
            return Err(ViewError::OutOfBounds { index, start, end });
        }
        return Ok(&self.as_slice()[index - start]);
    }

    /// Like [`at`](RandomAccess::at), without the error details.
    fn get(&self, index: usize) -> Option<&Self::Element> {
        return self.at(index).ok();
    }

    fn first(&self) -> Option<&Self::Element> {
        return self.as_slice().first();
    }

    fn last(&self) -> Option<&Self::Element> {
        return self.as_slice().last();
    }

    /// Iterate over the items. The iterator is double-ended and knows its
    /// exact length.
    fn iter(&self) -> std::slice::Iter<'_, Self::Element> {
        return self.as_slice().iter();
    }

    /// Iterate over `(index, item)` pairs, using this view's indices.
    fn indexed(&self) -> Zip<Range<usize>, std::slice::Iter<'_, Self::Element>> {
        return self.indices().zip(self.iter());
    }

    /// Borrow a contiguous sub-range without copying.
    ///
    /// The range is expressed in this view's indices and must lie within
    /// [`indices`](RandomAccess::indices); the resulting [`Slice`] keeps
    /// those indices.
    fn slice<R>(&self, range: R) -> Result<Slice<'_, Self::Element>, ViewError>
    where
        R: RangeBounds<usize>,
        Self: Sized,
    {
        let lower = self.start_index();
        let upper = self.end_index();

        let start = match range.start_bound() {
            Bound::Included(&start) => Some(start),
            Bound::Excluded(&start) => start.checked_add(1),
            Bound::Unbounded => Some(lower),
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end.checked_add(1),
            Bound::Excluded(&end) => Some(end),
            Bound::Unbounded => Some(upper),
        };

        let invalid = |start: Option<usize>, end: Option<usize>| ViewError::InvalidRange {
            start: start.unwrap_or(usize::MAX),
            end: end.unwrap_or(usize::MAX),
            lower,
            upper,
        };
        let (Some(start), Some(end)) = (start, end) else {
            return Err(invalid(start, end));
        };
        if start > end || start < lower || end > upper {
            return Err(invalid(Some(start), Some(end)));
        }

        return Ok(Slice {
            elements: &self.as_slice()[start - lower..end - lower],
            start,
        });
    }
}

/// A borrowed contiguous sub-range of a [`RandomAccess`] view.
///
/// Shares indices with the view it was cut from.
pub struct Slice<'a, T> {
    elements: &'a [T],
    start: usize,
}

impl<'a, T> Slice<'a, T> {
    /// The items of the slice, with the lifetime of the underlying view.
    pub fn elements(&self) -> &'a [T] {
        return self.elements;
    }
}

impl<T> Clone for Slice<'_, T> {
    fn clone(&self) -> Self {
        return *self;
    }
}

impl<T> Copy for Slice<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Slice<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f
            .debug_struct("Slice")
            .field("indices", &self.indices())
            .field("elements", &self.elements)
            .finish();
    }
}

impl<T: PartialEq> PartialEq for Slice<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        return self.start == other.start && self.elements == other.elements;
    }
}

impl<T> RandomAccess for Slice<'_, T> {
    type Element = T;

    fn as_slice(&self) -> &[T] {
        return self.elements;
    }

    fn start_index(&self) -> usize {
        return self.start;
    }
}

impl<T> Index<usize> for Slice<'_, T> {
    type Output = T;

    /// Panics when `index` is outside the slice's indices.
    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(element) => return element,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<'a, T> IntoIterator for Slice<'a, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        return self.elements.iter();
    }
}

impl<'a, T> IntoIterator for &Slice<'a, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        return self.elements.iter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Letters(Vec<char>);

    impl RandomAccess for Letters {
        type Element = char;

        fn as_slice(&self) -> &[char] {
            return &self.0;
        }
    }

    fn letters() -> Letters {
        return Letters("abcdef".chars().collect());
    }

    #[test]
    fn counts_and_indices() {
        let view = letters();
        assert_eq!(view.len(), 6);
        assert!(!view.is_empty());
        assert_eq!(view.indices(), 0..6);
        assert_eq!(view.first(), Some(&'a'));
        assert_eq!(view.last(), Some(&'f'));
    }

    #[test]
    fn at_checks_bounds() {
        let view = letters();
        assert_eq!(view.at(0), Ok(&'a'));
        assert_eq!(view.at(5), Ok(&'f'));
        assert_eq!(
            view.at(6),
            Err(ViewError::OutOfBounds { index: 6, start: 0, end: 6 })
        );
        assert_eq!(view.get(usize::MAX), None);
    }

    #[test]
    fn empty_view() {
        let view = Letters(Vec::new());
        assert!(view.is_empty());
        assert!(view.first().is_none());
        assert!(matches!(view.at(0), Err(ViewError::OutOfBounds { .. })));
        assert_eq!(view.slice(..).map(|s| s.len()), Ok(0));
    }

    #[test]
    fn iterates_both_ways() {
        let view = letters();
        let forward: String = view.iter().collect();
        let backward: String = view.iter().rev().collect();
        assert_eq!(forward, "abcdef");
        assert_eq!(backward, "fedcba");
        assert_eq!(view.iter().len(), 6);
    }

    #[test]
    fn slice_shares_indices() {
        let view = letters();
        let slice = view.slice(2..5).unwrap();
        assert_eq!(slice.len(), 3);
        assert_eq!(slice.indices(), 2..5);
        assert_eq!(slice.at(2), Ok(&'c'));
        assert_eq!(slice.at(4), Ok(&'e'));
        assert_eq!(slice[3], 'd');
        assert!(matches!(slice.at(0), Err(ViewError::OutOfBounds { index: 0, start: 2, end: 5 })));
        assert!(matches!(slice.at(5), Err(ViewError::OutOfBounds { .. })));
    }

    #[test]
    fn slice_of_slice() {
        let view = letters();
        let outer = view.slice(1..).unwrap();
        let inner = outer.slice(3..=4).unwrap();
        assert_eq!(inner.indices(), 3..5);
        assert_eq!(inner.elements(), &['d', 'e']);
        assert!(outer.slice(0..2).is_err());
    }

    #[test]
    fn slice_range_forms() {
        let view = letters();
        assert_eq!(view.slice(..).unwrap().len(), 6);
        assert_eq!(view.slice(..2).unwrap().elements(), &['a', 'b']);
        assert_eq!(view.slice(4..).unwrap().elements(), &['e', 'f']);
        assert_eq!(view.slice(3..3).unwrap().len(), 0);
    }

    #[test]
    fn invalid_slices() {
        let view = letters();
        assert_eq!(
            view.slice(2..7),
            Err(ViewError::InvalidRange { start: 2, end: 7, lower: 0, upper: 6 })
        );
        #[allow(clippy::reversed_empty_ranges)]
        let reversed = view.slice(4..2);
        assert!(matches!(reversed, Err(ViewError::InvalidRange { .. })));
        assert!(view.slice(..=usize::MAX).is_err());
    }

    #[test]
    fn indexed_uses_view_indices() {
        let view = letters();
        let slice = view.slice(3..).unwrap();
        let pairs: Vec<_> = slice.indexed().map(|(i, c)| (i, *c)).collect();
        assert_eq!(pairs, vec![(3, 'd'), (4, 'e'), (5, 'f')]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_operator_panics() {
        let view = letters();
        let slice = view.slice(0..2).unwrap();
        let _ = slice[2];
    }

    #[test]
    fn error_messages() {
        let err = ViewError::OutOfBounds { index: 3, start: 0, end: 3 };
        assert_eq!(err.to_string(), "index 3 out of bounds for 0..3");
    }
}
