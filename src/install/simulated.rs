//! Simulated backend for driving the dashboard without a real installer.
//!
//! Serves a catalog and performs paced, failure-injecting operations
//! against it, flipping installed/updatable flags as operations succeed.
//! The demo binary runs entirely against this backend; tests prefer
//! deterministic doubles.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use futures::future::BoxFuture;

use crate::catalog::CatalogSource;
use crate::install::executor::{OperationExecutor, OperationOutcome};
use crate::state::{AppItem, OperationKind};

/// In-memory application records plus operation pacing and failure
/// injection knobs.
pub struct SimulatedBackend {
    /// Current records, mutated as operations succeed.
    records: Mutex<Vec<AppItem>>,
    /// Sleep applied to every operation call.
    delay: Duration,
    /// Probability in `[0.0, 1.0]` that an otherwise valid operation fails.
    failure_rate: f64,
}

impl SimulatedBackend {
    /// Build a backend over the given records.
    #[must_use]
    pub fn new(records: Vec<AppItem>, delay: Duration, failure_rate: f64) -> Self {
        Self {
            records: Mutex::new(records),
            delay,
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }

    /// Build a backend over the built-in sample catalog.
    #[must_use]
    pub fn with_sample_catalog(delay: Duration, failure_rate: f64) -> Self {
        Self::new(sample_catalog(), delay, failure_rate)
    }

    /// Apply a successful operation to the record, returning the outcome
    /// message.
    fn apply(item: &mut AppItem, kind: OperationKind) -> OperationOutcome {
        match kind {
            OperationKind::Install => {
                item.installed = true;
                item.current_version = item.latest_version.clone();
                item.can_update = false;
                OperationOutcome::ok(format!("{} installed successfully", item.name))
            }
            OperationKind::Update => {
                if !item.installed {
                    return OperationOutcome::failed(format!("{} is not installed", item.name));
                }
                item.current_version = item.latest_version.clone();
                item.can_update = false;
                OperationOutcome::ok(format!("{} updated successfully", item.name))
            }
            OperationKind::Uninstall => {
                if !item.installed {
                    return OperationOutcome::failed(format!("{} is not installed", item.name));
                }
                item.installed = false;
                item.current_version = None;
                item.can_update = false;
                OperationOutcome::ok(format!("{} uninstalled successfully", item.name))
            }
            OperationKind::Launch => {
                if item.installed {
                    OperationOutcome::ok(format!("{} launched", item.name))
                } else {
                    OperationOutcome::failed(format!("{} is not installed", item.name))
                }
            }
        }
    }
}

impl CatalogSource for SimulatedBackend {
    fn load(&self) -> Vec<AppItem> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl OperationExecutor for SimulatedBackend {
    fn perform<'a>(
        &'a self,
        id: &'a str,
        kind: OperationKind,
    ) -> BoxFuture<'a, Result<OperationOutcome, String>> {
        Box::pin(async move {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if self.failure_rate > 0.0 && rand::random::<f64>() < self.failure_rate {
                return Ok(OperationOutcome::failed(format!(
                    "{} {id} failed",
                    kind.as_str()
                )));
            }
            let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
            let Some(item) = records.iter_mut().find(|it| it.id == id) else {
                return Ok(OperationOutcome::failed(format!("application {id} not found")));
            };
            Ok(Self::apply(item, kind))
        })
    }
}

/// Built-in sample catalog used by the demo binary.
fn sample_catalog() -> Vec<AppItem> {
    let item = |id: &str,
                name: &str,
                description: &str,
                category: &str,
                installed: bool,
                current: Option<&str>,
                latest: &str| AppItem {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        installed,
        current_version: current.map(ToString::to_string),
        latest_version: Some(latest.to_string()),
        can_update: installed && current.is_some_and(|c| c != latest),
    };
    vec![
        item(
            "firefox",
            "Firefox",
            "Fast, private web browser",
            "Browsers",
            true,
            Some("128.0"),
            "129.0",
        ),
        item(
            "vscode",
            "Visual Studio Code",
            "Extensible code editor",
            "Development",
            true,
            Some("1.92"),
            "1.92",
        ),
        item(
            "docker",
            "Docker",
            "Container runtime and tooling",
            "Development",
            true,
            Some("26.1"),
            "27.0",
        ),
        item(
            "slack",
            "Slack",
            "Team messaging client",
            "Communication",
            false,
            None,
            "4.39",
        ),
        item(
            "spotify",
            "Spotify",
            "Music streaming client",
            "Media",
            false,
            None,
            "1.2.40",
        ),
        item(
            "gimp",
            "GIMP",
            "Raster image editor",
            "Media",
            false,
            None,
            "2.10.38",
        ),
        item(
            "htop",
            "htop",
            "Interactive process viewer",
            "Utilities",
            true,
            Some("3.3"),
            "3.3",
        ),
        item(
            "obsidian",
            "Obsidian",
            "Markdown knowledge base",
            "Productivity",
            false,
            None,
            "1.6.7",
        ),
    ]
}
