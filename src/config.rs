//! Viewer configuration: defaults, then an optional TOML file, then the environment.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::RetryPolicy;

pub const DEFAULT_BASE_URL: &str = "https://api.nasa.gov/planetary";
pub const DEMO_API_KEY: &str = "DEMO_KEY";
pub const DEFAULT_WINDOW_DAYS: u32 = 120;
pub const DEFAULT_RETRIES: u32 = 2;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    /// Days before today covered by the initial list fetch.
    pub window_days: u32,
    /// `None` means the SQLite file in the user's data directory.
    pub database_url: Option<String>,
    /// Prefix stripped from routing paths, e.g. `/CS-409-MP2`.
    pub base_path: Option<String>,
    pub retries: u32,
    pub retry_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: DEMO_API_KEY.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            window_days: DEFAULT_WINDOW_DAYS,
            database_url: None,
            base_path: None,
            retries: DEFAULT_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

/// On-disk shape; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api_key: Option<String>,
    base_url: Option<String>,
    window_days: Option<u32>,
    database_url: Option<String>,
    base_path: Option<String>,
    retries: Option<u32>,
    retry_delay_ms: Option<u64>,
}

impl Config {
    /// Resolve configuration. An explicit `path` must exist; the default
    /// location is skipped silently when absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = Self::default();
        match path {
            Some(p) => cfg.merge_file(p)?,
            None => {
                if let Some(p) = default_config_path() {
                    if p.exists() { cfg.merge_file(&p)?; }
                }
            }
        }
        cfg.merge_env(|k| std::env::var(k).ok());
        if cfg.api_key == DEMO_API_KEY {
            tracing::warn!("no API key configured; using the shared DEMO_KEY (low rate limits)");
        }
        Ok(cfg)
    }

    fn merge_file(&mut self, path: &Path) -> Result<()> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file: {}", path.display()))?;
        let file: FileConfig = toml::from_str(&raw)
            .with_context(|| format!("parsing config file: {}", path.display()))?;
        self.merge(file);
        Ok(())
    }

    fn merge(&mut self, f: FileConfig) {
        if let Some(v) = f.api_key { self.api_key = v; }
        if let Some(v) = f.base_url { self.base_url = v; }
        if let Some(v) = f.window_days { self.window_days = v; }
        if let Some(v) = f.database_url { self.database_url = Some(v); }
        if let Some(v) = f.base_path { self.base_path = Some(v); }
        if let Some(v) = f.retries { self.retries = v; }
        if let Some(v) = f.retry_delay_ms { self.retry_delay_ms = v; }
    }

    /// Environment overrides. Unparseable numbers keep the previous value.
    fn merge_env(&mut self, get: impl Fn(&str) -> Option<String>) {
        let nonempty = |k: &str| get(k).filter(|v| !v.trim().is_empty());
        if let Some(v) = nonempty("APODVIEW_API_KEY").or_else(|| nonempty("NASA_API_KEY")) { self.api_key = v; }
        if let Some(v) = nonempty("APODVIEW_BASE_URL") { self.base_url = v; }
        if let Some(v) = nonempty("APODVIEW_WINDOW_DAYS").and_then(|v| v.parse().ok()) { self.window_days = v; }
        if let Some(v) = nonempty("APODVIEW_DATABASE_URL") { self.database_url = Some(v); }
        if let Some(v) = nonempty("APODVIEW_BASE_PATH") { self.base_path = Some(v); }
        if let Some(v) = nonempty("APODVIEW_RETRIES").and_then(|v| v.parse().ok()) { self.retries = v; }
        if let Some(v) = nonempty("APODVIEW_RETRY_DELAY_MS").and_then(|v| v.parse().ok()) { self.retry_delay_ms = v; }
        self.base_url = self.base_url.trim_end_matches('/').to_string();
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy { retries: self.retries, base_delay: Duration::from_millis(self.retry_delay_ms) }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "apodview", "apodview").map(|p| p.config_dir().join("config.toml"))
}
