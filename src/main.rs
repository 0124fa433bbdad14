//! apphub binary entrypoint kept minimal. The runtime lives in `app`.

mod app;
mod args;
mod catalog;
mod config;
mod install;
mod state;

use std::fmt;
use std::sync::OnceLock;

use clap::Parser;

/// Timestamp formatter for the log file: "YYYY-MM-DD HH:MM:SS".
struct AppTimer;

impl tracing_subscriber::fmt::time::FormatTime for AppTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        w.write_str(&ts)
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Initialize tracing, writing to `<config>/logs/apphub.log`, with a
/// stderr fallback when the file cannot be opened.
fn init_logging(default_level: &str) {
    let mut log_path = config::logs_dir();
    log_path.push("apphub.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(AppTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(true)
                .with_timer(AppTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    let parsed = args::Args::parse();
    init_logging(&parsed.log_level);
    tracing::info!("apphub starting");
    if let Err(err) = app::run(&parsed).await {
        tracing::error!(error = ?err, "application error");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
    tracing::info!("apphub exited");
}
