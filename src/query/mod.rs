// ============================================================================
// Query Engine
// ============================================================================
//
// evaluate() is a pure function of (collection, query): filter, then a stable
// sort with pinned records first. It runs synchronously on every change and
// never mutates the collection it reads.
//
// ============================================================================

pub mod filter;
pub mod sort;

pub use filter::{Filters, RecordFilter, ValueRange};
pub use sort::{SortDirection, SortKey, SortSpec, locale_cmp, sort_records};

use crate::core::Record;
use crate::storage::Collection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Search text, structured filters and ordering
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub filters: Filters,
    #[serde(default)]
    pub sort: SortSpec,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Clear search text and filters, keeping the current ordering
    pub fn reset(&mut self) {
        self.text.clear();
        self.filters = Filters::default();
    }

    pub fn matches(&self, record: &Record) -> bool {
        RecordFilter::new(&self.text, &self.filters).matches(record)
    }
}

/// Derive the ordered view of `collection` for `query`
pub fn evaluate(collection: &Collection, query: &Query) -> Vec<Arc<Record>> {
    let filter = RecordFilter::new(&query.text, &query.filters);
    let mut result: Vec<Arc<Record>> = collection
        .iter()
        .filter(|record| filter.matches(record))
        .cloned()
        .collect();

    sort_records(&mut result, &query.sort);
    result
}
