//! Core value types used by apphub state.

/// Named filter over the catalog that also scopes selection.
///
/// Each view owns an independent selection set; see
/// [`crate::state::SelectionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Every catalog item.
    All,
    /// Items currently installed.
    Installed,
    /// Items not currently installed.
    NotInstalled,
    /// Installed items with an update available.
    Updates,
}

impl View {
    /// All views, in tab order.
    pub const ALL_VIEWS: [Self; 4] = [
        Self::All,
        Self::Installed,
        Self::NotInstalled,
        Self::Updates,
    ];

    /// Return the string key used on the CLI and in settings for this view.
    ///
    /// Inputs: none
    ///
    /// Output: Static key string.
    #[must_use]
    pub const fn as_key(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Installed => "installed",
            Self::NotInstalled => "not-installed",
            Self::Updates => "updates",
        }
    }

    /// Parse a view from its key or legacy aliases.
    ///
    /// Inputs: `s` key string (case-insensitive).
    ///
    /// Output: `Some(View)` on recognized value; `None` otherwise.
    #[must_use]
    pub fn from_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(Self::All),
            "installed" => Some(Self::Installed),
            "not-installed" | "not_installed" | "available" => Some(Self::NotInstalled),
            "updates" | "updatable" => Some(Self::Updates),
            _ => None,
        }
    }
}

/// Verb applied to each target of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum OperationKind {
    /// Install an application that is not present.
    Install,
    /// Update an installed application to its latest version.
    Update,
    /// Remove an installed application.
    Uninstall,
    /// Start an installed application. Only used for single-item
    /// operations; the dashboard never batches launches.
    Launch,
}

impl OperationKind {
    /// Return the lowercase verb used for history records and log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Update => "update",
            Self::Uninstall => "uninstall",
            Self::Launch => "launch",
        }
    }

    /// Return the in-flight label shown while an item is being processed
    /// (e.g. "Installing").
    #[must_use]
    pub const fn active_label(self) -> &'static str {
        match self {
            Self::Install => "Installing",
            Self::Update => "Updating",
            Self::Uninstall => "Uninstalling",
            Self::Launch => "Launching",
        }
    }
}

/// Status of one target during a batch invocation.
///
/// The lifecycle per item is `Pending -> Active(kind) -> Completed | Failed`.
/// `Completed` and `Failed` are terminal; no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ItemStatus {
    /// Not reached by the sequential driver yet.
    Pending,
    /// The operation for this item is in flight.
    Active(OperationKind),
    /// The executor reported success.
    Completed,
    /// The executor reported failure or its call errored.
    Failed,
}

impl ItemStatus {
    /// Whether this status is terminal (`Completed` or `Failed`).
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Per-target progress row inside a [`BatchSnapshot`].
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ItemProgress {
    /// Target identifier as given at batch start.
    pub id: String,
    /// Current status of this target.
    pub status: ItemStatus,
    /// Progress percentage in `0..=100`.
    pub progress: u8,
    /// Short human-readable status or outcome text. Informational only.
    pub message: String,
}

/// Point-in-time view of a batch invocation's aggregate and per-item
/// progress.
///
/// `total` is fixed at batch start; `completed + failed` only grows until it
/// equals `total`. The `progress` rows preserve the target order given to
/// the engine.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BatchSnapshot {
    /// Number of targets, fixed at batch start.
    pub total: usize,
    /// Targets that reached `Completed`.
    pub completed: usize,
    /// Targets that reached `Failed`.
    pub failed: usize,
    /// Per-target rows in original target order.
    pub progress: Vec<ItemProgress>,
}

impl BatchSnapshot {
    /// Whether the invocation has settled every target.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.completed + self.failed == self.total
    }

    /// Overall percentage for a progress bar, computed against the targets
    /// the driver has already reached (rows past `Pending`). Returns 0 when
    /// no target has been reached yet.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn overall_percent(&self) -> u8 {
        let active_total = self
            .progress
            .iter()
            .filter(|p| p.status != ItemStatus::Pending)
            .count();
        if active_total == 0 {
            return 0;
        }
        let settled = self.completed + self.failed;
        (settled as f64 / active_total as f64 * 100.0).round() as u8
    }
}

/// Catalog item record as served by the item directory.
///
/// Read-only from the core's perspective; a batch completion triggers a
/// directory refresh rather than an in-place mutation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AppItem {
    /// Unique, session-stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// One-line description suitable for list display.
    pub description: String,
    /// Category label (e.g. "Development").
    pub category: String,
    /// Whether the application is currently installed.
    pub installed: bool,
    /// Installed version, when installed and known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_version: Option<String>,
    /// Latest available version, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_version: Option<String>,
    /// Whether an update is available for this item.
    #[serde(default)]
    pub can_update: bool,
}

/// One recorded operation event for an item's history.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HistoryEntry {
    /// RFC 3339 timestamp of the event.
    pub timestamp: String,
    /// Operation verb ("install", "update", "uninstall", "launch").
    pub action: String,
    /// Event status ("started", "success", "failed").
    pub status: String,
    /// Human-readable message accompanying the event.
    pub message: String,
}
