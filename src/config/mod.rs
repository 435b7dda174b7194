// src/config/mod.rs
//
// Configuration module
//
// Provides:
// - Remote service endpoint and credentials
// - Cache refresh policy
// - File + environment loading

pub mod settings;

pub use settings::{
    default_config_path, AdminProfileConfig, AppConfig, CacheRefresh, RemoteConfig, ENV_API_KEY,
    ENV_CACHE_REFRESH, ENV_TIMEOUT_SECS, ENV_URL,
};
