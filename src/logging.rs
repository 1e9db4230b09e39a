//! File-backed `tracing` setup. The terminal belongs to the TUI, so events
//! never go to stdout or stderr.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, Result};

/// Environment variable that overrides the configured level.
pub const LOG_ENV: &str = "HR_LOG";

/// Install the global subscriber writing to `path`.
pub fn init(path: &Path, level: &str) -> Result<()> {
    let filter = build_filter(level, std::env::var(LOG_ENV).ok())?;

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    // Only fails when a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();
    Ok(())
}

/// Filter from the env override when present, else from the configured level.
fn build_filter(level: &str, env: Option<String>) -> Result<EnvFilter> {
    let directive = env.filter(|v| !v.trim().is_empty());
    let source = directive.as_deref().unwrap_or(level);
    EnvFilter::try_new(source)
        .map_err(|e| AppError::InvalidConfig(format!("log level {source:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_is_used_without_env() {
        let filter = build_filter("debug", None).unwrap();
        assert!(filter.to_string().contains("debug"));
    }

    #[test]
    fn env_overrides_configured_level() {
        let filter = build_filter("info", Some("hacker_reader_tui=trace".into())).unwrap();
        assert!(filter.to_string().contains("hacker_reader_tui=trace"));
    }

    #[test]
    fn blank_env_is_ignored() {
        let filter = build_filter("warn", Some("  ".into())).unwrap();
        assert!(filter.to_string().contains("warn"));
    }

    #[test]
    fn bad_level_is_invalid_config() {
        let err = build_filter("hacker_reader_tui=loud", None).unwrap_err();
        assert!(matches!(err, AppError::InvalidConfig(_)));
    }

    #[test]
    fn init_creates_log_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("hr.log");
        init(&path, "info").unwrap();
        assert!(path.exists());
    }
}
