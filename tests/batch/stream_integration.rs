//! Snapshot stream properties observed through a live subscription.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;

use apphub::install::{BatchRunner, OperationExecutor, OperationOutcome};
use apphub::state::{BatchSnapshot, ItemStatus, OperationKind};

/// Slow double so the subscriber gets scheduled between publications.
struct Slow {
    fail: Vec<String>,
}

impl OperationExecutor for Slow {
    fn perform<'a>(
        &'a self,
        id: &'a str,
        _kind: OperationKind,
    ) -> BoxFuture<'a, Result<OperationOutcome, String>> {
        Box::pin(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            if self.fail.iter().any(|f| f.as_str() == id) {
                Ok(OperationOutcome::failed(format!("{id} failed")))
            } else {
                Ok(OperationOutcome::ok(format!("{id} done")))
            }
        })
    }
}

/// Rank a status for regression checks: Pending < Active < terminal.
fn rank(status: ItemStatus) -> u8 {
    match status {
        ItemStatus::Pending => 0,
        ItemStatus::Active(_) => 1,
        ItemStatus::Completed | ItemStatus::Failed => 2,
    }
}

#[tokio::test]
/// What: Published snapshots are monotonic and statuses never regress
///
/// - Input: Five targets (one failing) with a collector draining the watch channel
/// - Output: settled counts non-decreasing across observations; no per-item
///   status moves backwards; the last observation is the finished batch
async fn snapshot_stream_is_monotonic() {
    let exec = Arc::new(Slow {
        fail: vec!["d".to_string()],
    });
    let runner = Arc::new(BatchRunner::new(exec));
    let mut rx = runner.subscribe();

    let collector = tokio::spawn(async move {
        let mut observed: Vec<BatchSnapshot> = Vec::new();
        while rx.changed().await.is_ok() {
            if let Some(snap) = rx.borrow().clone() {
                observed.push(snap);
            }
        }
        observed
    });

    let targets: Vec<String> = ["a", "b", "c", "d", "e"]
        .iter()
        .map(ToString::to_string)
        .collect();
    let terminal = runner
        .run(&targets, OperationKind::Uninstall)
        .await
        .expect("batch runs");

    // Dropping the only runner closes the channel and ends the collector.
    drop(runner);
    let observed = collector.await.expect("collector join");

    assert!(!observed.is_empty());
    let mut last_settled = 0;
    for snap in &observed {
        let settled = snap.completed + snap.failed;
        assert!(settled >= last_settled, "settled count regressed");
        last_settled = settled;
        assert_eq!(snap.total, targets.len());
    }
    for pair in observed.windows(2) {
        for (before, after) in pair[0].progress.iter().zip(&pair[1].progress) {
            assert_eq!(before.id, after.id);
            assert!(
                rank(after.status) >= rank(before.status),
                "status regressed for {}",
                before.id
            );
            if before.status.is_terminal() {
                assert_eq!(before.status, after.status, "terminal status changed");
            }
        }
    }

    let last = observed.last().expect("at least one snapshot");
    assert!(last.is_finished());
    assert_eq!(last.completed, terminal.completed);
    assert_eq!(last.failed, terminal.failed);
    assert_eq!(terminal.failed, 1);
}

#[tokio::test]
/// What: The current-value accessor tracks the live batch
///
/// - Input: A subscriber awaiting the first publication of a two-target batch
/// - Output: The first observation shows the fixed total before completion
async fn current_value_available_mid_batch() {
    let exec = Arc::new(Slow { fail: Vec::new() });
    let runner = Arc::new(BatchRunner::new(exec));
    let mut rx = runner.subscribe();

    let watcher = tokio::spawn(async move {
        rx.changed().await.expect("first publication");
        let snap = rx.borrow().clone().expect("snapshot present");
        (snap.total, snap.is_finished())
    });

    let targets: Vec<String> = ["x", "y"].iter().map(ToString::to_string).collect();
    runner
        .run(&targets, OperationKind::Install)
        .await
        .expect("batch runs");

    let (total, finished_at_first_sight) = watcher.await.expect("watcher join");
    assert_eq!(total, 2);
    assert!(!finished_at_first_sight);
}
