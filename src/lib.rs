//! Sectioned - group a flat, ordered list of records into ordered sections.
//!
//! Given elements in some order and a function extracting a grouping key
//! from each one, build a list of sections where:
//!
//! - sections appear in the order their key first occurs in the input,
//! - each section holds its elements in input order,
//! - no key appears in more than one section.
//!
//! Both the section list and each section are read-only random-access views
//! (see [`view::RandomAccess`]).
//!
//! # Quick Start
//!
//! ```
//! use sectioned::{RandomAccess, SectionedResults};
//!
//! let rows = vec![("a", 1), ("b", 2), ("a", 3), ("c", 4), ("b", 5)];
//! let results = SectionedResults::new(rows, |row| row.0);
//!
//! assert_eq!(results.len(), 3);
//! assert_eq!(results[0].id(), &"a");
//! assert_eq!(results[0].elements(), &[("a", 1), ("a", 3)]);
//! assert!(results.at(3).is_err());
//! ```
//!
//! # Keeping results current
//!
//! Results are snapshots. When the underlying data changes, build new ones,
//! either with [`SectionedResults::rebuild`] or by asking a
//! [`query::SectionedQuery`] for fresh [`results`](query::SectionedQuery::results).

pub mod query;
pub mod sectioned;
pub mod uniqued;
pub mod view;

pub use query::{ElementSource, SectionedQuery, VecSource};
pub use sectioned::{section, KeyFn, Section, SectionedResults};
pub use uniqued::{dedupe_keep_first, Uniqued};
pub use view::{Identifiable, RandomAccess, Slice, ViewError};
