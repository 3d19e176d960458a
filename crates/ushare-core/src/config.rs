use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Used when the identity endpoint is not configured, so the app still loads
/// and auth calls fail as remote errors instead of crashing at startup.
pub const PLACEHOLDER_IDENTITY_URL: &str = "https://placeholder.supabase.co";
pub const PLACEHOLDER_API_KEY: &str = "placeholder-key";

/// Remote identity service (GoTrue-compatible `/auth/v1` endpoints).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl IdentityConfig {
    /// Base URL to use; anything that is not an http(s) URL becomes the placeholder.
    pub fn effective_base_url(&self) -> &str {
        match self.base_url.as_deref() {
            Some(u) if u.starts_with("http") => u.trim_end_matches('/'),
            _ => PLACEHOLDER_IDENTITY_URL,
        }
    }

    pub fn effective_api_key(&self) -> &str {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .unwrap_or(PLACEHOLDER_API_KEY)
    }

    pub fn is_configured(&self) -> bool {
        self.effective_base_url() != PLACEHOLDER_IDENTITY_URL
            && self.effective_api_key() != PLACEHOLDER_API_KEY
    }
}

/// Profile search tuning (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Delay after the last keystroke before a query is sent.
    pub debounce_ms: u64,
    /// Queries shorter than this (after trimming) clear results without a request.
    pub min_query_len: usize,
    /// Maximum number of results per query.
    pub limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_query_len: 2,
            limit: 5,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// What to do when a link submission arrives while another one is still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitPolicy {
    /// Let duplicates through; each one reaches the store.
    #[default]
    Allow,
    /// Drop the duplicate silently.
    Ignore,
    /// Fail the duplicate with `CoreError::InFlight`.
    Reject,
    /// Wait until the pending submission finishes, then run.
    Queue,
}

/// Global configuration loaded from `~/.config/ushare/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UshareConfig {
    /// Origin used for shareable profile URLs (`{public_base_url}/u/{handle}`).
    pub public_base_url: String,
    /// Duplicate-submission handling for link create/update.
    #[serde(default)]
    pub submit_policy: SubmitPolicy,
    /// Optional override for the SQLite database location.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

impl Default for UshareConfig {
    fn default() -> Self {
        Self {
            public_base_url: "http://localhost:5173".to_string(),
            submit_policy: SubmitPolicy::default(),
            database_path: None,
            identity: IdentityConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ushare")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<UshareConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = UshareConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: UshareConfig = toml::from_str(&data)?;
    if !cfg.identity.is_configured() {
        tracing::warn!("identity service not configured; authentication will not work");
    }
    Ok(cfg)
}
