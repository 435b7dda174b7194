// src/config/settings.rs
//
// Application configuration
//
// PRINCIPLES:
// - Explicit sources: file first, environment overrides second
// - Validated once, at startup
// - No hidden globals: the loaded value is passed to AppState

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{AppError, AppResult};

pub const ENV_URL: &str = "STREAMHUB_URL";
pub const ENV_API_KEY: &str = "STREAMHUB_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "STREAMHUB_TIMEOUT_SECS";
pub const ENV_CACHE_REFRESH: &str = "STREAMHUB_CACHE_REFRESH";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_ADMIN_PAGE_SIZE: usize = 10;
const DEFAULT_ADMIN_AVATAR: &str = "https://i.pravatar.cc/150?img=1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub cache_refresh: CacheRefresh,

    /// Profile selected automatically when an admin signs in
    #[serde(default)]
    pub admin_profile: AdminProfileConfig,

    #[serde(default = "default_admin_page_size")]
    pub admin_page_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    #[serde(default)]
    pub url: String,

    /// Public (anon) API key sent with every request
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminProfileConfig {
    pub name: String,
    pub avatar: String,
}

/// How the content cache catches up after a mutation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheRefresh {
    /// Re-read only the affected entry and splice it into the cache
    #[default]
    Targeted,
    /// Re-read the whole catalog
    Full,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_admin_page_size() -> usize {
    DEFAULT_ADMIN_PAGE_SIZE
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            remote: RemoteConfig::default(),
            cache_refresh: CacheRefresh::default(),
            admin_profile: AdminProfileConfig::default(),
            admin_page_size: DEFAULT_ADMIN_PAGE_SIZE,
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for AdminProfileConfig {
    fn default() -> Self {
        Self {
            name: "Admin".to_string(),
            avatar: DEFAULT_ADMIN_AVATAR.to_string(),
        }
    }
}

impl FromStr for CacheRefresh {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "targeted" => Ok(CacheRefresh::Targeted),
            "full" => Ok(CacheRefresh::Full),
            other => Err(AppError::Config(format!(
                "Unknown cache refresh policy '{}'",
                other
            ))),
        }
    }
}

/// Default configuration file location.
///
/// Path structure: {CONFIG_DIR}/streamhub/config.toml
pub fn default_config_path() -> AppResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| AppError::Config("Could not determine config directory".to_string()))?;

    Ok(config_dir.join("streamhub").join("config.toml"))
}

impl AppConfig {
    pub fn from_toml_str(raw: &str) -> AppResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Load configuration for the running process.
    ///
    /// Order:
    /// 1. `.env` in the working directory (if any) is merged into the environment
    /// 2. `path`, or the default config file when it exists, or built-in defaults
    /// 3. `STREAMHUB_*` environment variables override file values
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        if let Ok(env_file) = dotenvy::dotenv() {
            log::debug!("Loaded environment from {}", env_file.display());
        }

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = default_config_path()?;
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `STREAMHUB_*` overrides from an arbitrary key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_URL) {
            self.remote.url = url;
        }
        if let Some(key) = lookup(ENV_API_KEY) {
            self.remote.api_key = key;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            self.remote.timeout_secs = timeout.trim().parse().map_err(|_| {
                AppError::Config(format!("{} must be a number of seconds", ENV_TIMEOUT_SECS))
            })?;
        }
        if let Some(policy) = lookup(ENV_CACHE_REFRESH) {
            self.cache_refresh = policy.parse()?;
        }
        Ok(())
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.remote.url.trim().is_empty() {
            return Err(AppError::Config(format!(
                "Remote URL is not set (use [remote].url or {})",
                ENV_URL
            )));
        }
        reqwest::Url::parse(&self.remote.url)
            .map_err(|e| AppError::Config(format!("Invalid remote URL: {}", e)))?;

        if self.remote.api_key.trim().is_empty() {
            return Err(AppError::Config(format!(
                "API key is not set (use [remote].api_key or {})",
                ENV_API_KEY
            )));
        }
        if self.remote.timeout_secs == 0 {
            return Err(AppError::Config("Timeout must be positive".to_string()));
        }
        if self.admin_page_size == 0 {
            return Err(AppError::Config("Admin page size must be positive".to_string()));
        }
        Ok(())
    }
}
