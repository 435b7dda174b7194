// src/application/state.rs

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::integrations::RestAuthGateway;
use crate::remote::RestClient;
use crate::repositories::{
    RestContentRepository, RestEpisodeRepository, RestGenreRepository, RestSeasonRepository,
    RestUserRepository,
};
use crate::services::{AuthStore, ContentStore};

/// Application context handed to every command.
/// Owns one store of each kind; nothing lives in globals.
pub struct AppState {
    pub config: AppConfig,
    pub content_store: Arc<ContentStore>,
    pub auth_store: Arc<AuthStore>,
}

impl AppState {
    pub fn new(config: AppConfig, content_store: Arc<ContentStore>, auth_store: Arc<AuthStore>) -> Self {
        Self {
            config,
            content_store,
            auth_store,
        }
    }

    /// Wire the REST-backed repositories and stores from configuration
    pub fn from_config(config: AppConfig) -> AppResult<Self> {
        let client = Arc::new(RestClient::new(&config.remote)?);
        log::info!(
            "Using remote service at {} (cache refresh: {:?})",
            client.base_url(),
            config.cache_refresh
        );

        let content_store = Arc::new(ContentStore::new(
            Arc::new(RestContentRepository::new(client.clone())),
            Arc::new(RestGenreRepository::new(client.clone())),
            Arc::new(RestSeasonRepository::new(client.clone())),
            Arc::new(RestEpisodeRepository::new(client.clone())),
            config.cache_refresh,
        ));

        let auth_store = Arc::new(AuthStore::new(
            Arc::new(RestAuthGateway::new(client.clone())),
            Arc::new(RestUserRepository::new(client)),
            config.admin_profile.clone(),
        ));

        Ok(Self::new(config, content_store, auth_store))
    }
}
