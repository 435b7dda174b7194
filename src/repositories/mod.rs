// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic, NO caching
// - Wire rows are validated here and leave as domain types
// - NO cross-repository calls

pub mod content_repository;
pub mod episode_repository;
pub mod genre_repository;
pub mod season_repository;
pub mod user_repository;

pub use content_repository::{ContentRepository, RestContentRepository};
pub use episode_repository::{EpisodeRepository, RestEpisodeRepository};
pub use genre_repository::{GenreRepository, RestGenreRepository};
pub use season_repository::{RestSeasonRepository, SeasonRepository};
pub use user_repository::{RestUserRepository, UserRepository};

#[cfg(test)]
pub use user_repository::MockUserRepository;

use crate::domain::DomainError;
use crate::error::{AppError, AppResult};

/// Nullable text column, read as empty text
pub(crate) fn text(value: Option<String>) -> String {
    value.unwrap_or_default()
}

/// Season/episode number column; the database does not forbid negatives
pub(crate) fn ordinal(column: &str, value: i64) -> AppResult<u32> {
    u32::try_from(value).map_err(|_| {
        AppError::Domain(DomainError::InvariantViolation(format!(
            "{} out of range: {}",
            column, value
        )))
    })
}

/// Convert nested rows, dropping (and logging) the ones that do not convert
pub(crate) fn keep_valid<R, T>(rows: Vec<R>, what: &str) -> Vec<T>
where
    T: TryFrom<R, Error = AppError>,
{
    rows.into_iter()
        .filter_map(|row| match T::try_from(row) {
            Ok(item) => Some(item),
            Err(e) => {
                log::warn!("Skipping invalid {} row: {}", what, e);
                None
            }
        })
        .collect()
}
