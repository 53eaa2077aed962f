//! Symbol index and approximate matching.
//!
//! This module holds the per-source symbol index built from an inventory,
//! the subsequence matcher that ranks its keys against a query, and the
//! similarity-based suggestions offered for mistyped source names.

pub(crate) mod index;
pub(crate) mod matcher;
pub(crate) mod suggest;

pub use index::SymbolIndex;
pub use matcher::{fuzzy_match, subsequence_span};
pub use suggest::suggest_sources;
