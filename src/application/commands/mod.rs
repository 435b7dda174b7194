// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between a UI and the stores
// - Commands accept DTOs and string ids, return DTOs
// - Commands handle error conversion (ErrorResponse JSON)
// - Commands NEVER contain business logic

pub mod admin_commands;
pub mod auth_commands;
pub mod catalog_commands;

pub use admin_commands::*;
pub use auth_commands::*;
pub use catalog_commands::*;

use uuid::Uuid;

use crate::application::error_handling::{CommandResult, ErrorResponse};
use crate::domain::DomainError;

/// Parse an id coming from the UI; malformed ids are validation errors
pub(crate) fn parse_id(raw: &str, what: &str) -> CommandResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|e| ErrorResponse::validation(format!("Invalid {} id '{}': {}", what, raw, e)).to_json())
}

pub(crate) fn invalid_input(error: DomainError) -> String {
    ErrorResponse::validation(error.to_string()).to_json()
}

#[cfg(test)]
pub(crate) mod test_state {
    use std::sync::Arc;

    use crate::application::AppState;
    use crate::config::{AppConfig, CacheRefresh};
    use crate::integrations::MockAuthGateway;
    use crate::repositories::MockUserRepository;
    use crate::services::test_support::{store_over, FakeCatalog};
    use crate::services::AuthStore;

    /// AppState over the in-memory catalog and the given auth mocks
    pub(crate) fn app_state(
        catalog: &Arc<FakeCatalog>,
        gateway: MockAuthGateway,
        users: MockUserRepository,
    ) -> AppState {
        let config = AppConfig::default();
        let content_store = Arc::new(store_over(catalog, CacheRefresh::Targeted));
        let auth_store = Arc::new(AuthStore::new(
            Arc::new(gateway),
            Arc::new(users),
            config.admin_profile.clone(),
        ));
        AppState::new(config, content_store, auth_store)
    }

    pub(crate) fn catalog_state(catalog: &Arc<FakeCatalog>) -> AppState {
        app_state(catalog, MockAuthGateway::new(), MockUserRepository::new())
    }
}
