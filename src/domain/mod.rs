// src/domain/mod.rs
//
// Domain Root
//
// All other modules import from `crate::domain::*`

pub mod content;
pub mod user;

// Catalog
pub use content::{
    validate_content_changes, validate_episode_changes, validate_new_content,
    validate_new_episode, validate_new_season, validate_season_changes, Content, ContentChanges,
    ContentType, Episode, EpisodeChanges, Genre, NewContent, NewEpisode, NewSeason, Season,
    SeasonChanges,
};

// Accounts
pub use user::{Profile, User};

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
