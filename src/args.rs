//! Command-line argument definition.

use clap::Parser;

/// apphub - dashboard core for browsing, installing, updating and
/// uninstalling catalog applications
#[derive(Parser, Debug)]
#[command(name = "apphub")]
#[command(version)]
#[command(
    about = "Browse, install, update and uninstall catalog applications",
    long_about = None
)]
pub struct Args {
    /// List catalog items for the selected view
    #[arg(short, long)]
    pub list: bool,

    /// Filter view: all, installed, not-installed, updates
    #[arg(long, default_value = "all")]
    pub view: String,

    /// Filter listings by category
    #[arg(long)]
    pub category: Option<String>,

    /// Fuzzy search over names and descriptions
    #[arg(short, long)]
    pub search: Option<String>,

    /// Install the given item ids as one batch
    #[arg(short, long, num_args = 1..)]
    pub install: Vec<String>,

    /// Update the given item ids as one batch
    #[arg(short, long, num_args = 1..)]
    pub update: Vec<String>,

    /// Update every item that has an update available
    #[arg(long)]
    pub update_all: bool,

    /// Uninstall the given item ids as one batch
    #[arg(short = 'r', long, num_args = 1..)]
    pub uninstall: Vec<String>,

    /// Launch a single item
    #[arg(long)]
    pub launch: Option<String>,

    /// Print the operation history recorded for an item this session
    #[arg(long)]
    pub logs: Option<String>,

    /// Emit listings and terminal snapshots as JSON
    #[arg(long)]
    pub json: bool,

    /// Simulated per-operation delay in milliseconds (overrides settings)
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Simulated failure rate in [0.0, 1.0] (overrides settings)
    #[arg(long)]
    pub failure_rate: Option<f64>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
