//! Item directory: the read-only catalog of application records.
//!
//! The core never mutates records in place. After a destructive batch the
//! consumer asks the directory to [`Catalog::refresh`] from its source.

pub mod filter;

pub use filter::{batch_targets, eligible_for, visible_items};

use crate::state::AppItem;

/// Capability for (re)loading the catalog's item records.
///
/// Implemented by the simulated backend in this repo; a real deployment
/// would implement it over whatever serves `{id, installed, can_update}`
/// records.
pub trait CatalogSource {
    /// Produce the current item records, in display order.
    fn load(&self) -> Vec<AppItem>;
}

/// Ordered directory of catalog items, keyed by their stable identifiers.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Items in display order. Identifiers are unique.
    items: Vec<AppItem>,
}

impl Catalog {
    /// Build a directory from item records, dropping duplicate identifiers
    /// (first record wins).
    #[must_use]
    pub fn new(items: Vec<AppItem>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let items = items
            .into_iter()
            .filter(|it| seen.insert(it.id.clone()))
            .collect();
        Self { items }
    }

    /// Build a directory by pulling records from a source.
    #[must_use]
    pub fn from_source(source: &dyn CatalogSource) -> Self {
        Self::new(source.load())
    }

    /// All items in display order.
    #[must_use]
    pub fn items(&self) -> &[AppItem] {
        &self.items
    }

    /// Look up an item by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&AppItem> {
        self.items.iter().find(|it| it.id == id)
    }

    /// Display name for an identifier, falling back to the identifier
    /// itself when the item is unknown.
    #[must_use]
    pub fn name_of<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map_or(id, |it| it.name.as_str())
    }

    /// Sorted, de-duplicated category labels across all items.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut cats: Vec<String> = self
            .items
            .iter()
            .map(|it| it.category.clone())
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();
        cats.sort();
        cats
    }

    /// Re-pull all records from the source, replacing the directory's
    /// contents. Called by consumers after a batch completes.
    pub fn refresh(&mut self, source: &dyn CatalogSource) {
        let fresh = Self::new(source.load());
        tracing::debug!(
            before = self.items.len(),
            after = fresh.items.len(),
            "catalog refreshed"
        );
        self.items = fresh.items;
    }
}
