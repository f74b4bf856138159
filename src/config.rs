//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` (or the file named by `CDLS_CONFIG`) relative
//! to the current working directory, then applies environment overrides.
//! Content-store and calendar credentials come from the environment only.

use std::{
    env,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::AppError;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address the site listens on.
    pub bind: String,
}

/// Content store configuration (`[content]` plus `SANITY_*` env vars).
#[derive(Debug, Clone)]
pub struct ContentConfig {
    /// Project identifier. `None` disables all content fetching.
    pub project_id: Option<String>,
    pub dataset: String,
    /// Query API version, sent as `v{api_version}` in the URL path.
    pub api_version: String,
    /// Read through the edge cache (`apicdn`) instead of the live API.
    pub use_cdn: bool,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Local JSON snapshot used instead of the remote store when set.
    pub snapshot: Option<PathBuf>,
}

impl ContentConfig {
    pub fn is_configured(&self) -> bool {
        self.project_id.is_some() || self.snapshot.is_some()
    }
}

/// Remote calendar configuration (`[calendar]` plus `GOOGLE_CALENDAR_*` env vars).
#[derive(Debug, Clone)]
pub struct CalendarConfig {
    pub api_key: Option<String>,
    pub calendar_id: Option<String>,
    /// Fixed UTC offset used for date keys and month ranges.
    /// `None` means the server's local time zone.
    pub timezone_offset_minutes: Option<i32>,
    pub max_results: u32,
    pub timeout_seconds: u64,
}

impl CalendarConfig {
    /// Both the API key and calendar id are required to fetch.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.calendar_id.is_some()
    }
}

/// Fully-resolved site configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub site_name: String,
    pub log_level: String,
    pub server: ServerConfig,
    pub content: ContentConfig,
    pub calendar: CalendarConfig,
}

/// Values normally taken from the process environment.
///
/// Tests build this directly instead of mutating env vars.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub bind: Option<String>,
    pub log_level: Option<String>,
    pub project_id: Option<String>,
    pub dataset: Option<String>,
    pub snapshot: Option<String>,
    pub calendar_api_key: Option<String>,
    pub calendar_id: Option<String>,
}

impl EnvOverrides {
    /// Read overrides from the process environment. Empty values count as unset.
    pub fn from_env() -> Self {
        Self {
            bind: env_var(&["CDLS_BIND"]),
            log_level: env_var(&["CDLS_LOG_LEVEL"]),
            project_id: env_var(&["SANITY_PROJECT_ID", "NEXT_PUBLIC_SANITY_PROJECT_ID"]),
            dataset: env_var(&["SANITY_DATASET", "NEXT_PUBLIC_SANITY_DATASET"]),
            snapshot: env_var(&["CDLS_CONTENT_SNAPSHOT"]),
            calendar_api_key: env_var(&[
                "GOOGLE_CALENDAR_API_KEY",
                "NEXT_PUBLIC_GOOGLE_CALENDAR_API_KEY",
            ]),
            calendar_id: env_var(&["GOOGLE_CALENDAR_ID", "NEXT_PUBLIC_GOOGLE_CALENDAR_ID"]),
        }
    }
}

fn env_var(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

/// Raw TOML shape: `serde` target before resolution.
#[derive(Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    site: RawSite,
    #[serde(default)]
    server: RawServer,
    #[serde(default)]
    content: RawContent,
    #[serde(default)]
    calendar: RawCalendar,
}

#[derive(Deserialize)]
struct RawSite {
    #[serde(default = "default_site_name")]
    name: String,
    #[serde(default = "default_log_level")]
    log_level: String,
}

impl Default for RawSite {
    fn default() -> Self {
        Self { name: default_site_name(), log_level: default_log_level() }
    }
}

#[derive(Deserialize)]
struct RawServer {
    #[serde(default = "default_bind")]
    bind: String,
}

impl Default for RawServer {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

#[derive(Deserialize)]
struct RawContent {
    #[serde(default = "default_dataset")]
    dataset: String,
    #[serde(default = "default_api_version")]
    api_version: String,
    #[serde(default = "default_true")]
    use_cdn: bool,
    #[serde(default = "default_timeout_seconds")]
    timeout_seconds: u64,
    #[serde(default)]
    snapshot: Option<String>,
}

impl Default for RawContent {
    fn default() -> Self {
        Self {
            dataset: default_dataset(),
            api_version: default_api_version(),
            use_cdn: true,
            timeout_seconds: default_timeout_seconds(),
            snapshot: None,
        }
    }
}

#[derive(Deserialize)]
struct RawCalendar {
    #[serde(default)]
    timezone_offset_minutes: Option<i32>,
    #[serde(default = "default_max_results")]
    max_results: u32,
    #[serde(default = "default_timeout_seconds")]
    timeout_seconds: u64,
}

impl Default for RawCalendar {
    fn default() -> Self {
        Self {
            timezone_offset_minutes: None,
            max_results: default_max_results(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_site_name() -> String { "CDLS".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_bind() -> String { "127.0.0.1:3000".to_string() }
fn default_dataset() -> String { "production".to_string() }
fn default_api_version() -> String { "2024-01-01".to_string() }
fn default_timeout_seconds() -> u64 { 10 }
fn default_max_results() -> u32 { 100 }

fn default_true() -> bool {
    true
}

/// Load config from `CDLS_CONFIG` or `config/default.toml`, then apply env-var overrides.
pub fn load() -> Result<Config, AppError> {
    let path = env::var("CDLS_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    load_from(Path::new(&path), &EnvOverrides::from_env())
}

/// Internal loader: accepts an explicit path and overrides.
pub fn load_from(path: &Path, overrides: &EnvOverrides) -> Result<Config, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    let parsed: RawConfig = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    resolve(parsed, overrides)
}

fn resolve(parsed: RawConfig, overrides: &EnvOverrides) -> Result<Config, AppError> {
    if let Some(offset) = parsed.calendar.timezone_offset_minutes {
        if offset.abs() >= 24 * 60 {
            return Err(AppError::Config(format!(
                "calendar.timezone_offset_minutes out of range: {offset}"
            )));
        }
    }

    let snapshot = overrides
        .snapshot
        .as_deref()
        .or(parsed.content.snapshot.as_deref())
        .map(expand_home);

    Ok(Config {
        site_name: parsed.site.name,
        log_level: overrides.log_level.clone().unwrap_or(parsed.site.log_level),
        server: ServerConfig {
            bind: overrides.bind.clone().unwrap_or(parsed.server.bind),
        },
        content: ContentConfig {
            project_id: overrides.project_id.clone(),
            dataset: overrides.dataset.clone().unwrap_or(parsed.content.dataset),
            api_version: parsed.content.api_version,
            use_cdn: parsed.content.use_cdn,
            timeout_seconds: parsed.content.timeout_seconds,
            snapshot,
        },
        calendar: CalendarConfig {
            api_key: overrides.calendar_api_key.clone(),
            calendar_id: overrides.calendar_id.clone(),
            timezone_offset_minutes: parsed.calendar.timezone_offset_minutes,
            max_results: parsed.calendar.max_results,
            timeout_seconds: parsed.calendar.timeout_seconds,
        },
    })
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

// ── test helpers ──────────────────────────────────────────────────────────────

impl Config {
    /// Safe `Config` for tests: no content store, no calendar, UTC dates,
    /// ephemeral bind address.
    pub fn unconfigured() -> Self {
        Self {
            site_name: default_site_name(),
            log_level: default_log_level(),
            server: ServerConfig { bind: "127.0.0.1:0".into() },
            content: ContentConfig {
                project_id: None,
                dataset: default_dataset(),
                api_version: default_api_version(),
                use_cdn: false,
                timeout_seconds: 1,
                snapshot: None,
            },
            calendar: CalendarConfig {
                api_key: None,
                calendar_id: None,
                timezone_offset_minutes: Some(0),
                max_results: default_max_results(),
                timeout_seconds: 1,
            },
        }
    }
}
