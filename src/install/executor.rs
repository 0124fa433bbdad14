//! Operation executor boundary.
//!
//! The executor is a capability interface with a single method so the
//! engine can run against a real backend or a deterministic test double.

use futures::future::BoxFuture;

use crate::state::OperationKind;

/// Settled result of one operation on one item.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct OperationOutcome {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Short human-readable outcome text. Informational only, never parsed.
    pub message: String,
}

impl OperationOutcome {
    /// Successful outcome with the given message.
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Failed outcome with the given message.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Performs install/update/uninstall/launch operations asynchronously.
///
/// Calls may fail per item, independently; an `Err` settlement is treated
/// by every consumer exactly like `OperationOutcome { success: false, .. }`.
/// Implementations must tolerate unknown identifiers (reporting them as
/// failures) rather than panicking.
pub trait OperationExecutor: Send + Sync {
    /// Perform `kind` on the item identified by `id` and settle with the
    /// outcome, or with an error message when the call itself fell over.
    fn perform<'a>(
        &'a self,
        id: &'a str,
        kind: OperationKind,
    ) -> BoxFuture<'a, Result<OperationOutcome, String>>;
}
