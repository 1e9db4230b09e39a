//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--feed`, `--no-mouse`, `--theme`, `--log-file`)
//! 2. Explicit `--config` file
//! 3. `$HR_CONFIG` environment variable (path to config file)
//! 4. Project-local `.hr.toml` in the current working directory
//! 5. Global `~/.config/hacker-reader/config.toml`
//! 6. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::nav::DEFAULT_PREFETCH;
use crate::scheduler::{DEFAULT_FETCH_INTERVAL_MS, DEFAULT_TIMEOUT_SECS};
use crate::source::Feed;

// ── Section configs ──────────────────────────────────────────────────────────

/// General application settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable mouse wheel support.
    pub mouse: Option<bool>,
    /// Ranked list shown at the root: "top", "new", "best", "ask", "show", "job".
    pub feed: Option<String>,
}

/// Remote API and fetch pacing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct NetworkConfig {
    /// Base URL of the item API.
    pub api_url: Option<String>,
    /// Prefix of an item's discussion page; the id is appended.
    pub item_url: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Interval between fetch batches in milliseconds.
    pub fetch_interval_ms: Option<u64>,
    /// Children queued ahead of the hovered item.
    pub prefetch: Option<usize>,
}

/// Layout settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LayoutConfig {
    /// Content width cap in columns.
    pub max_width: Option<u16>,
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "info" or "hacker_reader_tui=debug".
    pub level: Option<String>,
    /// Log file path.
    pub file: Option<String>,
}

/// Color settings for a single theme palette.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub title_bg: Option<String>,
    pub title_fg: Option<String>,
    pub fg: Option<String>,
    pub secondary_fg: Option<String>,
    pub link_fg: Option<String>,
    pub score_fg: Option<String>,
    pub cursor_fg: Option<String>,
    pub separator_fg: Option<String>,
    pub border_fg: Option<String>,
    pub status_bg: Option<String>,
    pub status_fg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark", "light", "custom".
    pub scheme: Option<String>,
    /// Custom color overrides.
    pub custom: Option<ThemeColorsConfig>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub network: NetworkConfig,
    pub layout: LayoutConfig,
    pub logging: LoggingConfig,
    pub theme: ThemeConfig,
}

// ── Default constants ────────────────────────────────────────────────────────

pub const DEFAULT_API_URL: &str = "https://hacker-news.firebaseio.com/v0";
pub const DEFAULT_ITEM_URL: &str = "https://news.ycombinator.com/item?id=";
/// Default content width cap.
pub const DEFAULT_MAX_WIDTH: u16 = 135;
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path; `load` handles that one.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("HR_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".hr.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("hacker-reader").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning printed to stderr).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            // Logging is not up yet; the terminal is still ours.
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self`; `Some` values in `other` win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                mouse: other.general.mouse.or(self.general.mouse),
                feed: other.general.feed.clone().or(self.general.feed),
            },
            network: NetworkConfig {
                api_url: other.network.api_url.clone().or(self.network.api_url),
                item_url: other.network.item_url.clone().or(self.network.item_url),
                timeout_secs: other.network.timeout_secs.or(self.network.timeout_secs),
                fetch_interval_ms: other
                    .network
                    .fetch_interval_ms
                    .or(self.network.fetch_interval_ms),
                prefetch: other.network.prefetch.or(self.network.prefetch),
            },
            layout: LayoutConfig {
                max_width: other.layout.max_width.or(self.layout.max_width),
            },
            logging: LoggingConfig {
                level: other.logging.level.clone().or(self.logging.level),
                file: other.logging.file.clone().or(self.logging.file),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
                custom: other.theme.custom.clone().or(self.theme.custom),
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        let mut config = AppConfig::default();

        // Walk in reverse so that highest-priority (env var) overwrites lower.
        for path in candidate_paths().iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    /// Whether mouse support is enabled.
    pub fn mouse_enabled(&self) -> bool {
        self.general.mouse.unwrap_or(true)
    }

    /// Feed shown at the root.
    pub fn feed(&self) -> Feed {
        self.general
            .feed
            .as_deref()
            .map(Feed::from_name)
            .unwrap_or_default()
    }

    pub fn api_url(&self) -> &str {
        self.network.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn item_url(&self) -> &str {
        self.network.item_url.as_deref().unwrap_or(DEFAULT_ITEM_URL)
    }

    /// Per-request timeout in seconds (never zero).
    pub fn timeout_secs(&self) -> u64 {
        self.network
            .timeout_secs
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .max(1)
    }

    /// Fetch tick interval in milliseconds (never zero).
    pub fn fetch_interval_ms(&self) -> u64 {
        self.network
            .fetch_interval_ms
            .unwrap_or(DEFAULT_FETCH_INTERVAL_MS)
            .max(1)
    }

    /// Look-ahead depth when the cursor moves.
    pub fn prefetch(&self) -> usize {
        self.network.prefetch.unwrap_or(DEFAULT_PREFETCH)
    }

    /// Content width cap in columns.
    pub fn max_width(&self) -> u16 {
        self.layout.max_width.unwrap_or(DEFAULT_MAX_WIDTH)
    }

    /// Log filter directive.
    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Log file path: configured, else `<cache dir>/hacker-reader/hr.log`.
    pub fn log_file(&self) -> PathBuf {
        match &self.logging.file {
            Some(file) => PathBuf::from(file),
            None => dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("hacker-reader")
                .join("hr.log"),
        }
    }

    /// Theme scheme: "dark", "light", or "custom".
    pub fn theme_scheme(&self) -> &str {
        self.theme.scheme.as_deref().unwrap_or("dark")
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_values() {
        let cfg = AppConfig::default();
        assert!(cfg.mouse_enabled());
        assert_eq!(cfg.feed(), Feed::Top);
        assert_eq!(cfg.api_url(), "https://hacker-news.firebaseio.com/v0");
        assert_eq!(cfg.item_url(), "https://news.ycombinator.com/item?id=");
        assert_eq!(cfg.timeout_secs(), 10);
        assert_eq!(cfg.fetch_interval_ms(), 1000);
        assert_eq!(cfg.prefetch(), 2);
        assert_eq!(cfg.max_width(), 135);
        assert_eq!(cfg.log_level(), "info");
        assert!(cfg.log_file().ends_with("hacker-reader/hr.log"));
        assert_eq!(cfg.theme_scheme(), "dark");
    }

    #[test]
    fn test_toml_parsing_full() {
        let toml = r#"
[general]
mouse = false
feed = "ask"

[network]
api_url = "http://localhost:8080/v0"
item_url = "http://localhost:8080/item?id="
timeout_secs = 3
fetch_interval_ms = 250
prefetch = 5

[layout]
max_width = 100

[logging]
level = "debug"
file = "/tmp/hr-test.log"

[theme]
scheme = "light"
"#;
        let cfg: AppConfig = toml::from_str(toml).expect("parse failed");
        assert!(!cfg.mouse_enabled());
        assert_eq!(cfg.feed(), Feed::Ask);
        assert_eq!(cfg.api_url(), "http://localhost:8080/v0");
        assert_eq!(cfg.item_url(), "http://localhost:8080/item?id=");
        assert_eq!(cfg.timeout_secs(), 3);
        assert_eq!(cfg.fetch_interval_ms(), 250);
        assert_eq!(cfg.prefetch(), 5);
        assert_eq!(cfg.max_width(), 100);
        assert_eq!(cfg.log_level(), "debug");
        assert_eq!(cfg.log_file(), PathBuf::from("/tmp/hr-test.log"));
        assert_eq!(cfg.theme_scheme(), "light");
    }

    #[test]
    fn test_toml_parsing_partial() {
        let toml = r#"
[network]
prefetch = 0
"#;
        let cfg: AppConfig = toml::from_str(toml).expect("parse failed");
        assert_eq!(cfg.prefetch(), 0);
        assert_eq!(cfg.timeout_secs(), 10);
        assert!(cfg.mouse_enabled());
    }

    #[test]
    fn test_unknown_feed_falls_back_to_top() {
        let cfg: AppConfig = toml::from_str("[general]\nfeed = \"frontpage\"").expect("parse");
        assert_eq!(cfg.feed(), Feed::Top);
    }

    #[test]
    fn test_zero_timeout_is_raised() {
        let cfg: AppConfig = toml::from_str("[network]\ntimeout_secs = 0").expect("parse");
        assert_eq!(cfg.timeout_secs(), 1);
    }

    #[test]
    fn test_zero_interval_is_raised() {
        let cfg: AppConfig =
            toml::from_str("[network]\nfetch_interval_ms = 0").expect("parse");
        assert_eq!(cfg.fetch_interval_ms(), 1);
    }

    #[test]
    fn test_merge_overrides() {
        let base = AppConfig {
            general: GeneralConfig {
                mouse: Some(false),
                feed: Some("best".into()),
            },
            network: NetworkConfig {
                timeout_secs: Some(4),
                prefetch: Some(3),
                ..Default::default()
            },
            ..Default::default()
        };
        let over = AppConfig {
            general: GeneralConfig {
                feed: Some("new".into()),
                ..Default::default()
            },
            network: NetworkConfig {
                prefetch: Some(1),
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = base.merge(&over);
        assert_eq!(merged.feed(), Feed::New);
        assert!(!merged.mouse_enabled());
        assert_eq!(merged.prefetch(), 1);
        assert_eq!(merged.timeout_secs(), 4);
    }

    #[test]
    fn test_merge_none_does_not_clear_some() {
        let base = AppConfig {
            layout: LayoutConfig {
                max_width: Some(80),
            },
            logging: LoggingConfig {
                level: Some("trace".into()),
                file: None,
            },
            ..Default::default()
        };

        let merged = base.merge(&AppConfig::default());
        assert_eq!(merged.max_width(), 80);
        assert_eq!(merged.log_level(), "trace");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("test-config.toml");
        let mut f = std::fs::File::create(&cfg_path).expect("create");
        writeln!(
            f,
            r#"
[general]
feed = "show"

[layout]
max_width = 90
"#
        )
        .expect("write");

        let cfg = load_file(&cfg_path).expect("load");
        assert_eq!(cfg.feed(), Feed::Show);
        assert_eq!(cfg.max_width(), 90);
        assert_eq!(cfg.prefetch(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_file(Path::new("/nonexistent/config.toml")).is_none());
    }

    #[test]
    fn test_load_invalid_toml_returns_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("bad.toml");
        std::fs::write(&cfg_path, "this is { not valid toml").expect("write");
        assert!(load_file(&cfg_path).is_none());
    }

    #[test]
    fn test_load_with_cli_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("config.toml");
        std::fs::write(
            &cfg_path,
            r#"
[general]
mouse = false
feed = "job"
"#,
        )
        .expect("write");

        let cli_overrides = AppConfig {
            general: GeneralConfig {
                feed: Some("best".into()),
                ..Default::default()
            },
            ..Default::default()
        };

        let cfg = AppConfig::load(Some(&cfg_path), Some(&cli_overrides));
        assert_eq!(cfg.feed(), Feed::Best);
        assert!(!cfg.mouse_enabled());
    }

    #[test]
    fn test_theme_custom_colors() {
        let toml = r##"
[theme]
scheme = "custom"

[theme.custom]
title_bg = "#1a1b26"
cursor_fg = "#c0caf5"
"##;
        let cfg: AppConfig = toml::from_str(toml).expect("parse");
        assert_eq!(cfg.theme_scheme(), "custom");
        let custom = cfg.theme.custom.as_ref().expect("custom present");
        assert_eq!(custom.title_bg.as_deref(), Some("#1a1b26"));
        assert_eq!(custom.cursor_fg.as_deref(), Some("#c0caf5"));
        assert!(custom.border_fg.is_none());
    }
}
