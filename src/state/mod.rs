//! Modularized state module.
//!
//! Value types live in `types`, the tab-scoped selection store in
//! `selection`. Public API is re-exported under `crate::state::*`.

pub mod selection;
pub mod types;

pub use selection::SelectionState;
pub use types::{
    AppItem, BatchSnapshot, HistoryEntry, ItemProgress, ItemStatus, OperationKind, View,
};
