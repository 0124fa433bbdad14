//! Demo runtime wiring the catalog, selection store and batch engine.
//!
//! Plays the role the dashboard UI plays in production: it selects items
//! through the selection store, derives ordered batch targets through the
//! item directory, launches the engine, renders published snapshots, then
//! clears the selection and refreshes the catalog.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use crate::args::Args;
use crate::catalog::{Catalog, batch_targets, visible_items};
use crate::config::Settings;
use crate::install::{
    BatchRunner, OperationExecutor, OperationHistory, SimulatedBackend, perform_single,
};
use crate::state::{BatchSnapshot, ItemStatus, OperationKind, SelectionState, View};

/// Shared result alias for runtime errors surfaced to `main`.
type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Everything the demo session owns: the backend, directory, selection
/// store and history, plus output preferences.
struct Dashboard {
    /// Simulated backend serving records and performing operations.
    backend: Arc<SimulatedBackend>,
    /// Item directory, refreshed after every batch.
    catalog: Catalog,
    /// Tab-scoped selection store.
    selection: SelectionState,
    /// Per-item operation history for this session.
    history: OperationHistory,
    /// Whether to emit JSON instead of text.
    json: bool,
}

/// What: Execute the CLI-requested dashboard actions.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - `Ok(())` after all requested actions ran; `Err` on invalid arguments.
///
/// # Errors
/// - Returns `Err` when `--view` names an unknown view.
pub async fn run(args: &Args) -> Result<()> {
    let view = View::from_key(&args.view)
        .ok_or_else(|| format!("unknown view: {} (try all, installed, not-installed, updates)", args.view))?;
    let settings = Settings::load();
    let delay_ms = args.delay_ms.unwrap_or(settings.operation_delay_ms);
    let delay = Duration::from_millis(delay_ms);
    let failure_rate = args.failure_rate.unwrap_or(settings.failure_rate);
    tracing::info!(delay_ms, failure_rate, "dashboard session starting");

    let backend = Arc::new(SimulatedBackend::with_sample_catalog(delay, failure_rate));
    let mut dash = Dashboard {
        catalog: Catalog::from_source(backend.as_ref()),
        backend,
        selection: SelectionState::new(),
        history: OperationHistory::new(),
        json: args.json,
    };

    let mut acted = false;
    if !args.install.is_empty() {
        acted = true;
        dash.run_batch(&args.install, OperationKind::Install, View::NotInstalled)
            .await;
    }
    if args.update_all {
        acted = true;
        let ids: Vec<String> = dash
            .catalog
            .items()
            .iter()
            .filter(|it| it.can_update)
            .map(|it| it.id.clone())
            .collect();
        dash.run_batch(&ids, OperationKind::Update, View::Updates)
            .await;
    } else if !args.update.is_empty() {
        acted = true;
        dash.run_batch(&args.update, OperationKind::Update, View::Updates)
            .await;
    }
    if !args.uninstall.is_empty() {
        acted = true;
        dash.run_batch(&args.uninstall, OperationKind::Uninstall, View::Installed)
            .await;
    }
    if let Some(id) = &args.launch {
        acted = true;
        dash.launch(id).await;
    }
    if let Some(id) = &args.logs {
        acted = true;
        dash.print_logs(id);
    }
    if args.list || !acted {
        dash.print_listing(view, args.category.as_deref(), args.search.as_deref());
    }
    Ok(())
}

impl Dashboard {
    /// Stage the requested ids in the view's selection, derive ordered
    /// targets through the directory, drive the batch, then clear the
    /// selection and refresh the catalog.
    async fn run_batch(&mut self, requested: &[String], kind: OperationKind, view: View) {
        self.selection.set_active_view(view);
        self.selection.select_all(requested.iter().cloned());

        let targets = batch_targets(&self.catalog, self.selection.active_selection(), view);
        let dropped: Vec<&String> = requested
            .iter()
            .filter(|id| !targets.contains(*id))
            .collect();
        for id in dropped {
            println!("skipping {id}: not eligible to {}", kind.as_str());
        }
        if targets.is_empty() {
            println!("nothing to {}", kind.as_str());
            self.selection.clear();
            return;
        }

        let executor: Arc<dyn OperationExecutor> = self.backend.clone();
        let runner = BatchRunner::new(executor);
        let printer = if self.json {
            None
        } else {
            println!("{} {} item(s):", kind.active_label(), targets.len());
            Some(spawn_printer(&runner, names_by_id(&self.catalog)))
        };

        let outcome = runner.run(&targets, kind).await;
        drop(runner);
        if let Some(handle) = printer {
            let _ = handle.await;
        }

        match outcome {
            Ok(snap) => {
                for row in &snap.progress {
                    let status = if row.status == ItemStatus::Completed {
                        "success"
                    } else {
                        "failed"
                    };
                    self.history.record(&row.id, kind.as_str(), status, &row.message);
                }
                if self.json {
                    match serde_json::to_string_pretty(&snap) {
                        Ok(body) => println!("{body}"),
                        Err(e) => tracing::error!(error = %e, "failed to encode snapshot"),
                    }
                } else {
                    println!(
                        "{} finished: {} ok, {} failed, {} total",
                        kind.active_label(),
                        snap.completed,
                        snap.failed,
                        snap.total
                    );
                }
            }
            Err(e) => {
                tracing::error!(error = %e, kind = kind.as_str(), "batch rejected");
                eprintln!("batch rejected: {e}");
            }
        }

        self.selection.clear();
        self.catalog.refresh(self.backend.as_ref());
    }

    /// Launch one item through the single-operation path.
    async fn launch(&mut self, id: &str) {
        let outcome = perform_single(
            self.backend.as_ref(),
            &mut self.history,
            id,
            OperationKind::Launch,
        )
        .await;
        println!("{}", outcome.message);
    }

    /// Print this session's operation history for an item.
    fn print_logs(&self, id: &str) {
        let entries = self.history.entries_for(id);
        if entries.is_empty() {
            println!("no history recorded for {id} this session");
            return;
        }
        for entry in entries {
            println!(
                "{} {:<9} {:<7} {}",
                entry.timestamp, entry.action, entry.status, entry.message
            );
        }
    }

    /// Print the filtered catalog listing.
    fn print_listing(&self, view: View, category: Option<&str>, search: Option<&str>) {
        let items = visible_items(
            self.catalog.items(),
            view,
            category,
            search.unwrap_or_default(),
        );
        if self.json {
            match serde_json::to_string_pretty(&items) {
                Ok(body) => println!("{body}"),
                Err(e) => tracing::error!(error = %e, "failed to encode listing"),
            }
            return;
        }
        if items.is_empty() {
            println!("no items match");
            return;
        }
        for it in items {
            let mark = if it.installed { "[x]" } else { "[ ]" };
            let version = it
                .current_version
                .as_deref()
                .or(it.latest_version.as_deref())
                .unwrap_or("-");
            let update = if it.can_update {
                it.latest_version
                    .as_deref()
                    .map_or_else(|| " (update available)".to_string(), |v| format!(" (-> {v})"))
            } else {
                String::new()
            };
            println!(
                "{mark} {:<10} {:<22} {version:<8} {}{update}",
                it.id, it.name, it.category
            );
        }
    }
}

/// Display names keyed by id, for the progress printer.
fn names_by_id(catalog: &Catalog) -> HashMap<String, String> {
    catalog
        .items()
        .iter()
        .map(|it| (it.id.clone(), it.name.clone()))
        .collect()
}

/// Spawn a task printing newly announced and newly settled rows from the
/// runner's snapshot stream until the runner is dropped.
fn spawn_printer(
    runner: &BatchRunner,
    names: HashMap<String, String>,
) -> tokio::task::JoinHandle<()> {
    let mut rx = runner.subscribe();
    tokio::spawn(async move {
        let mut announced: HashSet<String> = HashSet::new();
        let mut settled: HashSet<String> = HashSet::new();
        while rx.changed().await.is_ok() {
            let snap: Option<BatchSnapshot> = rx.borrow().clone();
            let Some(snap) = snap else { continue };
            for row in &snap.progress {
                let name = names.get(&row.id).map_or(row.id.as_str(), String::as_str);
                match row.status {
                    ItemStatus::Active(_) => {
                        if announced.insert(row.id.clone()) {
                            println!("  -> {name}: {}", row.message);
                        }
                    }
                    ItemStatus::Completed => {
                        if settled.insert(row.id.clone()) {
                            println!("  ok {name}: {} [{}%]", row.message, snap.overall_percent());
                        }
                    }
                    ItemStatus::Failed => {
                        if settled.insert(row.id.clone()) {
                            println!("  !! {name}: {} [{}%]", row.message, snap.overall_percent());
                        }
                    }
                    ItemStatus::Pending => {}
                }
            }
        }
    })
}
