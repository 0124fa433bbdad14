//! Engine contract scenarios driven through the public API.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;

use apphub::install::{BatchRejected, BatchRunner, OperationExecutor, OperationOutcome};
use apphub::state::{BatchSnapshot, ItemStatus, OperationKind};

/// Deterministic double: fails scripted ids and records call order.
struct Scripted {
    fail: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl Scripted {
    fn new(fail: &[&str]) -> Self {
        Self {
            fail: fail.iter().map(ToString::to_string).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl OperationExecutor for Scripted {
    fn perform<'a>(
        &'a self,
        id: &'a str,
        _kind: OperationKind,
    ) -> BoxFuture<'a, Result<OperationOutcome, String>> {
        Box::pin(async move {
            self.calls.lock().expect("calls lock").push(id.to_string());
            if self.fail.contains(id) {
                Ok(OperationOutcome::failed(format!("{id} failed")))
            } else {
                Ok(OperationOutcome::ok(format!("{id} done")))
            }
        })
    }
}

/// Double that asserts it is never entered re-entrantly and yields to the
/// scheduler while "working".
struct Exclusive {
    in_flight: AtomicUsize,
    max_seen: AtomicUsize,
}

impl OperationExecutor for Exclusive {
    fn perform<'a>(
        &'a self,
        _id: &'a str,
        _kind: OperationKind,
    ) -> BoxFuture<'a, Result<OperationOutcome, String>> {
        Box::pin(async move {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_seen.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(OperationOutcome::ok("done"))
        })
    }
}

/// Double that records the runner-published status of its own target at
/// the moment the executor is entered.
struct Probe {
    runner: Mutex<Option<Arc<BatchRunner>>>,
    seen: Mutex<Vec<(String, ItemStatus)>>,
}

impl OperationExecutor for Probe {
    fn perform<'a>(
        &'a self,
        id: &'a str,
        _kind: OperationKind,
    ) -> BoxFuture<'a, Result<OperationOutcome, String>> {
        Box::pin(async move {
            let snapshot: Option<BatchSnapshot> = self
                .runner
                .lock()
                .expect("runner lock")
                .as_ref()
                .and_then(|r| r.current());
            let status = snapshot
                .and_then(|s| s.progress.iter().find(|p| p.id == id).map(|p| p.status))
                .expect("own row visible while active");
            self.seen.lock().expect("seen lock").push((id.to_string(), status));
            Ok(OperationOutcome::ok("done"))
        })
    }
}

fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

#[tokio::test]
/// What: Terminal snapshot covers every target exactly once, in order
///
/// - Input: Four targets with one scripted failure, per batch kind
/// - Output: total == 4, completed + failed == total, ids unique and ordered
async fn terminal_snapshot_covers_all_targets_in_order() {
    for kind in [
        OperationKind::Install,
        OperationKind::Update,
        OperationKind::Uninstall,
    ] {
        let exec = Arc::new(Scripted::new(&["bad"]));
        let runner = BatchRunner::new(exec.clone());
        let targets = ids(&["alpha", "bad", "beta", "gamma"]);
        let snap = runner.run(&targets, kind).await.expect("batch runs");

        assert_eq!(snap.total, targets.len());
        assert_eq!(snap.completed + snap.failed, snap.total);
        assert_eq!(snap.completed, 3);
        assert_eq!(snap.failed, 1);
        assert!(snap.is_finished());

        let seen: Vec<&str> = snap.progress.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(seen, vec!["alpha", "bad", "beta", "gamma"]);
        let unique: HashSet<&&str> = seen.iter().collect();
        assert_eq!(unique.len(), seen.len());
        assert_eq!(exec.calls.lock().expect("calls lock").clone(), targets);
    }
}

#[tokio::test]
/// What: Empty target lists never start a batch
///
/// - Input: run([], Install)
/// - Output: Err(Empty), no snapshot, zero executor calls
async fn empty_batch_rejected_without_executor_calls() {
    let exec = Arc::new(Scripted::new(&[]));
    let runner = BatchRunner::new(exec.clone());
    let err = runner
        .run(&[], OperationKind::Install)
        .await
        .expect_err("must reject");
    assert_eq!(err, BatchRejected::Empty);
    assert!(runner.current().is_none());
    assert!(exec.calls.lock().expect("calls lock").is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
/// What: The driver never overlaps executor calls
///
/// - Input: Six targets against an executor that tracks concurrent entries
/// - Output: Maximum observed concurrency is exactly one
async fn driver_is_strictly_sequential() {
    let exec = Arc::new(Exclusive {
        in_flight: AtomicUsize::new(0),
        max_seen: AtomicUsize::new(0),
    });
    let runner = BatchRunner::new(exec.clone());
    let targets = ids(&["a", "b", "c", "d", "e", "f"]);
    let snap = runner
        .run(&targets, OperationKind::Update)
        .await
        .expect("batch runs");
    assert!(snap.is_finished());
    assert_eq!(exec.max_seen.load(Ordering::SeqCst), 1);
}

#[tokio::test]
/// What: Each item is Active exactly when its executor call is entered
///
/// - Input: Probe executor reading the published snapshot at call time
/// - Output: Every probed status is Active(kind); terminal snapshot settles each row
async fn items_are_active_while_their_call_is_in_flight() {
    let exec = Arc::new(Probe {
        runner: Mutex::new(None),
        seen: Mutex::new(Vec::new()),
    });
    let runner = Arc::new(BatchRunner::new(exec.clone()));
    *exec.runner.lock().expect("runner lock") = Some(Arc::clone(&runner));

    let targets = ids(&["one", "two", "three"]);
    let snap = runner
        .run(&targets, OperationKind::Install)
        .await
        .expect("batch runs");

    let seen = exec.seen.lock().expect("seen lock").clone();
    assert_eq!(seen.len(), 3);
    for (id, status) in &seen {
        assert_eq!(
            *status,
            ItemStatus::Active(OperationKind::Install),
            "{id} was not active at dispatch"
        );
    }
    assert!(snap.progress.iter().all(|p| p.status.is_terminal()));
}
