use super::changes::{ContentChanges, EpisodeChanges, NewContent, NewEpisode, NewSeason, SeasonChanges};
use crate::domain::{DomainError, DomainResult};

/// Validates a create request before it reaches the remote service
pub fn validate_new_content(content: &NewContent) -> DomainResult<()> {
    validate_title("Content", &content.title)?;
    validate_genres(&content.genre)?;
    Ok(())
}

pub fn validate_content_changes(changes: &ContentChanges) -> DomainResult<()> {
    if let Some(title) = &changes.title {
        validate_title("Content", title)?;
    }
    if let Some(genres) = &changes.genre {
        validate_genres(genres)?;
    }
    Ok(())
}

pub fn validate_new_season(season: &NewSeason) -> DomainResult<()> {
    validate_number("Season", season.season_number)
}

pub fn validate_season_changes(changes: &SeasonChanges) -> DomainResult<()> {
    if let Some(number) = changes.season_number {
        validate_number("Season", number)?;
    }
    Ok(())
}

pub fn validate_new_episode(episode: &NewEpisode) -> DomainResult<()> {
    validate_number("Episode", episode.episode_number)?;
    validate_title("Episode", &episode.title)
}

pub fn validate_episode_changes(changes: &EpisodeChanges) -> DomainResult<()> {
    if let Some(number) = changes.episode_number {
        validate_number("Episode", number)?;
    }
    if let Some(title) = &changes.title {
        validate_title("Episode", title)?;
    }
    Ok(())
}

fn validate_title(entity: &str, title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(format!(
            "{} title cannot be empty",
            entity
        )));
    }
    Ok(())
}

/// Season and episode numbers start at 1
fn validate_number(entity: &str, number: u32) -> DomainResult<()> {
    if number == 0 {
        return Err(DomainError::InvariantViolation(format!(
            "{} number must be at least 1",
            entity
        )));
    }
    Ok(())
}

fn validate_genres(genres: &[String]) -> DomainResult<()> {
    if genres.iter().any(|g| g.trim().is_empty()) {
        return Err(DomainError::InvariantViolation(
            "Genre names cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Invariants that hold for catalog entries:
///
/// 1. Titles are never blank
/// 2. Season numbers are unique within a series, episode numbers within a season
///    (enforced by the remote schema, only the >= 1 lower bound is checked here)
/// 3. At most one entry should be featured; nothing enforces it

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::ContentType;

    fn new_content(title: &str) -> NewContent {
        NewContent {
            title: title.to_string(),
            description: "A heist drama".to_string(),
            kind: ContentType::Series,
            genre: vec!["Crime".to_string()],
            release_year: 2017,
            maturity_rating: "TV-MA".to_string(),
            duration: "5 Seasons".to_string(),
            poster_image: String::new(),
            backdrop_image: String::new(),
            trailer_url: String::new(),
            featured: false,
        }
    }

    #[test]
    fn test_valid_content() {
        assert!(validate_new_content(&new_content("Money Heist")).is_ok());
    }

    #[test]
    fn test_blank_title_fails() {
        assert!(validate_new_content(&new_content("  ")).is_err());
    }

    #[test]
    fn test_blank_genre_fails() {
        let mut content = new_content("Money Heist");
        content.genre.push(" ".to_string());
        assert!(validate_new_content(&content).is_err());
    }

    #[test]
    fn test_season_zero_fails() {
        let season = NewSeason {
            season_number: 0,
            title: "Pilot season".to_string(),
            description: String::new(),
        };
        assert!(validate_new_season(&season).is_err());
    }

    #[test]
    fn test_empty_changes_are_valid() {
        assert!(validate_content_changes(&ContentChanges::default()).is_ok());
        assert!(validate_season_changes(&SeasonChanges::default()).is_ok());
        assert!(validate_episode_changes(&EpisodeChanges::default()).is_ok());
    }

    #[test]
    fn test_episode_change_to_blank_title_fails() {
        let changes = EpisodeChanges {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(validate_episode_changes(&changes).is_err());
    }
}
