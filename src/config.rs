//! Configuration directories and user settings.
//!
//! Settings live in `settings.toml` under the config directory; a missing
//! or unreadable file falls back to defaults so the dashboard always
//! starts.

use std::env;
use std::path::{Path, PathBuf};

/// Return `$HOME/.config/apphub`, ensuring it exists.
///
/// Inputs: none
///
/// Output: `Some(PathBuf)` when HOME is set and the directory can be
/// created; `None` otherwise.
fn home_config_dir() -> Option<PathBuf> {
    if let Ok(home) = env::var("HOME") {
        let dir = Path::new(&home).join(".config").join("apphub");
        if std::fs::create_dir_all(&dir).is_ok() {
            return Some(dir);
        }
    }
    None
}

/// Config directory for apphub (ensured to exist).
///
/// Prefers `$HOME/.config/apphub`, falling back to `XDG_CONFIG_HOME` (or
/// `~/.config`) when HOME is unusable.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(dir) = home_config_dir() {
        return dir;
    }
    let base = env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map_or_else(
            || {
                let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
                Path::new(&home).join(".config")
            },
            PathBuf::from,
        );
    let dir = base.join("apphub");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Logs directory under config: `.../apphub/logs` (ensured to exist).
#[must_use]
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// User-tunable settings for the simulated backend and batch pacing.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Per-operation delay applied by the simulated backend, milliseconds.
    pub operation_delay_ms: u64,
    /// Failure injection probability in `[0.0, 1.0]`.
    pub failure_rate: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            operation_delay_ms: 800,
            failure_rate: 0.1,
        }
    }
}

impl Settings {
    /// Load settings from `settings.toml` in the config directory.
    ///
    /// Missing file or parse errors fall back to [`Settings::default`],
    /// with a warning on parse errors.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&config_dir().join("settings.toml"))
    }

    /// Load settings from an explicit path, falling back to defaults.
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        let Ok(body) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str(&body) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid settings file; using defaults");
                Self::default()
            }
        }
    }
}
