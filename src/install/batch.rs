//! Batch operation progress engine.
//!
//! One parameterized engine drives install, update and uninstall batches:
//! targets are processed strictly one after another, each item walks
//! `Pending -> Active(kind) -> Completed | Failed`, and a fresh
//! [`BatchSnapshot`] is published after every transition. Item failures are
//! contained; the engine always attempts every remaining target.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

use crate::install::executor::{OperationExecutor, OperationOutcome};
use crate::state::{BatchSnapshot, ItemProgress, ItemStatus, OperationKind};

/// Why a `run` request was rejected before any batch state was created.
///
/// Rejections are caller misuse, never per-item failures: no snapshot is
/// produced and no executor call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchRejected {
    /// The target list was empty.
    Empty,
    /// A prior invocation on this runner has not finished yet.
    InFlight,
}

impl fmt::Display for BatchRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "batch request has no targets"),
            Self::InFlight => write!(f, "a batch is already in flight"),
        }
    }
}

impl std::error::Error for BatchRejected {}

/// Sequential batch driver bound to one executor, publishing snapshots
/// through a watch channel.
///
/// The runner owns the mutable snapshot of the invocation it is driving;
/// consumers only ever receive clones. One runner corresponds to one batch
/// dialog: at most one invocation is in flight at a time, and the terminal
/// snapshot stays readable until the next invocation replaces it.
pub struct BatchRunner {
    /// Backend performing the per-item operations.
    executor: Arc<dyn OperationExecutor>,
    /// Guard enforcing the single-in-flight contract.
    running: AtomicBool,
    /// Publication side of the snapshot channel. `None` until a first
    /// batch starts.
    snapshot_tx: watch::Sender<Option<BatchSnapshot>>,
}

impl BatchRunner {
    /// Create a runner over the given executor.
    #[must_use]
    pub fn new(executor: Arc<dyn OperationExecutor>) -> Self {
        let (snapshot_tx, _) = watch::channel(None);
        Self {
            executor,
            running: AtomicBool::new(false),
            snapshot_tx,
        }
    }

    /// Subscribe to snapshot publications. Receivers observe the latest
    /// published snapshot; `None` means no batch has started yet.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<BatchSnapshot>> {
        self.snapshot_tx.subscribe()
    }

    /// Latest published snapshot, if any.
    #[must_use]
    pub fn current(&self) -> Option<BatchSnapshot> {
        self.snapshot_tx.borrow().clone()
    }

    /// Whether an invocation is currently in flight.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Drive `kind` over every identifier in `ids`, in order, and return
    /// the terminal snapshot.
    ///
    /// # Errors
    ///
    /// - [`BatchRejected::Empty`] when `ids` is empty.
    /// - [`BatchRejected::InFlight`] when a prior invocation is unfinished;
    ///   the in-flight batch is unaffected by the rejected call.
    pub async fn run(
        &self,
        ids: &[String],
        kind: OperationKind,
    ) -> Result<BatchSnapshot, BatchRejected> {
        if ids.is_empty() {
            tracing::warn!(kind = kind.as_str(), "rejected batch with no targets");
            return Err(BatchRejected::Empty);
        }
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!(
                kind = kind.as_str(),
                total = ids.len(),
                "rejected batch while another is in flight"
            );
            return Err(BatchRejected::InFlight);
        }

        tracing::info!(
            kind = kind.as_str(),
            total = ids.len(),
            targets = %ids.join(" "),
            "batch started"
        );

        let mut snap = BatchSnapshot {
            total: ids.len(),
            completed: 0,
            failed: 0,
            progress: ids
                .iter()
                .map(|id| ItemProgress {
                    id: id.clone(),
                    status: ItemStatus::Pending,
                    progress: 0,
                    message: "Waiting".to_string(),
                })
                .collect(),
        };
        self.publish(&snap);

        for idx in 0..snap.progress.len() {
            let id = snap.progress[idx].id.clone();

            {
                let row = &mut snap.progress[idx];
                row.status = ItemStatus::Active(kind);
                row.progress = 10;
                row.message = format!("{}...", kind.active_label());
            }
            self.publish(&snap);
            tracing::debug!(id = %id, kind = kind.as_str(), "operation dispatched");

            let settled = match self.executor.perform(&id, kind).await {
                Ok(outcome) => outcome,
                Err(e) => OperationOutcome::failed(format!("Error: {e}")),
            };

            {
                let row = &mut snap.progress[idx];
                row.status = if settled.success {
                    ItemStatus::Completed
                } else {
                    ItemStatus::Failed
                };
                row.progress = 100;
                row.message = settled.message;
            }
            recount(&mut snap);
            self.publish(&snap);

            if settled.success {
                tracing::info!(id = %id, kind = kind.as_str(), "operation completed");
            } else {
                tracing::warn!(id = %id, kind = kind.as_str(), "operation failed");
            }
        }

        self.running.store(false, Ordering::Release);
        tracing::info!(
            kind = kind.as_str(),
            total = snap.total,
            completed = snap.completed,
            failed = snap.failed,
            "batch finished"
        );
        Ok(snap)
    }

    /// Publish a fresh clone of the snapshot to all subscribers.
    fn publish(&self, snap: &BatchSnapshot) {
        self.snapshot_tx.send_replace(Some(snap.clone()));
    }
}

/// Recompute the aggregate counters from the per-item rows.
fn recount(snap: &mut BatchSnapshot) {
    snap.completed = snap
        .progress
        .iter()
        .filter(|p| p.status == ItemStatus::Completed)
        .count();
    snap.failed = snap
        .progress
        .iter()
        .filter(|p| p.status == ItemStatus::Failed)
        .count();
}
