//! Single-item operation driver.
//!
//! One-off installs, updates, uninstalls and launches share this path: a
//! `started` history record, one executor call, and a terminal record. An
//! executor error settles as a failed outcome, never as a propagated error.

use crate::install::executor::{OperationExecutor, OperationOutcome};
use crate::install::history::OperationHistory;
use crate::state::OperationKind;

/// What: Perform one operation on one item, recording its history.
///
/// Inputs:
/// - `executor`: Backend performing the operation
/// - `history`: History store receiving the started/terminal records
/// - `id`: Target item identifier
/// - `kind`: Operation verb
///
/// Output:
/// - The settled outcome; an executor `Err` is mapped to a failed outcome.
pub async fn perform_single(
    executor: &dyn OperationExecutor,
    history: &mut OperationHistory,
    id: &str,
    kind: OperationKind,
) -> OperationOutcome {
    history.record(
        id,
        kind.as_str(),
        "started",
        &format!("{}...", kind.active_label()),
    );
    tracing::info!(id = %id, kind = kind.as_str(), "single operation dispatched");

    let outcome = match executor.perform(id, kind).await {
        Ok(outcome) => outcome,
        Err(e) => OperationOutcome::failed(format!("Error: {e}")),
    };

    let status = if outcome.success { "success" } else { "failed" };
    history.record(id, kind.as_str(), status, &outcome.message);
    if outcome.success {
        tracing::info!(id = %id, kind = kind.as_str(), "single operation completed");
    } else {
        tracing::warn!(id = %id, kind = kind.as_str(), message = %outcome.message, "single operation failed");
    }
    outcome
}
