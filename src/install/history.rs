//! In-memory operation history, one record stream per item.
//!
//! Session-scoped: nothing is persisted. Consumers query an item's entries
//! to render a history panel.

use std::collections::HashMap;

use crate::state::HistoryEntry;

/// Append-only operation events keyed by item identifier.
#[derive(Debug, Default)]
pub struct OperationHistory {
    /// Events per item, oldest first.
    entries: HashMap<String, Vec<HistoryEntry>>,
}

impl OperationHistory {
    /// Construct an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event for `id` with the current timestamp.
    ///
    /// Inputs:
    /// - `id`: Item identifier
    /// - `action`: Operation verb ("install", "update", ...)
    /// - `status`: Event status ("started", "success", "failed")
    /// - `message`: Human-readable message
    pub fn record(&mut self, id: &str, action: &str, status: &str, message: &str) {
        let entry = HistoryEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            action: action.to_string(),
            status: status.to_string(),
            message: message.to_string(),
        };
        tracing::debug!(id = %id, action = %action, status = %status, "history event");
        self.entries.entry(id.to_string()).or_default().push(entry);
    }

    /// Events recorded for `id`, oldest first. Empty for unknown ids.
    #[must_use]
    pub fn entries_for(&self, id: &str) -> &[HistoryEntry] {
        self.entries.get(id).map_or(&[], Vec::as_slice)
    }
}
