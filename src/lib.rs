// src/lib.rs
// StreamHub - Catalog and account data access for a streaming front end
//
// Architecture:
// - Domain-centric: catalog and account types with their invariants
// - Explicit: no globals, every store lives in AppState
// - Remote-first: the hosted service owns all state, stores are caches
// - Application Layer: command boundary with DTOs and error responses

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod domain;
pub mod error;
pub mod remote;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    validate_content_changes,
    validate_episode_changes,
    validate_new_content,
    validate_new_episode,
    validate_new_season,
    validate_season_changes,
    // Catalog
    Content,
    ContentChanges,
    ContentType,
    DomainError,
    Episode,
    EpisodeChanges,
    Genre,
    NewContent,
    NewEpisode,
    NewSeason,
    // Accounts
    Profile,
    Season,
    SeasonChanges,
    User,
};

// ============================================================================
// PUBLIC API - Error Types & Configuration
// ============================================================================

pub use config::{AppConfig, CacheRefresh};
pub use error::{AppError, AppResult, RemoteError};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    ContentRepository,
    EpisodeRepository,
    GenreRepository,
    RestContentRepository,
    RestEpisodeRepository,
    RestGenreRepository,
    RestSeasonRepository,
    RestUserRepository,
    SeasonRepository,
    UserRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    AuthPhase,
    AuthState,
    // Auth Store
    AuthStore,
    BrowseCategory,
    BrowseSection,
    ContentPage,
    ContentState,
    // Content Store
    ContentStore,
    SearchFilter,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;

// Re-export application submodules
pub use application::commands;
pub use application::dto;

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{AuthGateway, AuthSession, RestAuthGateway};
pub use remote::RestClient;
