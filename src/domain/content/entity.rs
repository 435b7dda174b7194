use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::DomainError;

/// A catalog entry: either a movie or a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Identifier assigned by the remote service
    pub id: Uuid,

    pub title: String,

    pub description: String,

    /// Movie or series
    #[serde(rename = "type")]
    pub kind: ContentType,

    /// Flat list of genre names
    pub genre: Vec<String>,

    pub release_year: i32,

    /// Free-form rating label ("PG-13", "TV-MA", ...)
    pub maturity_rating: String,

    /// Display duration ("2h 15m", "3 Seasons", ...)
    pub duration: String,

    pub poster_image: String,

    pub backdrop_image: String,

    pub trailer_url: String,

    /// Promoted to the home banner
    pub featured: bool,

    /// Creation timestamp on the remote service
    pub created_at: DateTime<Utc>,

    /// Seasons ordered by number.
    /// `None` when the rows were loaded without nested relations (search, featured).
    pub seasons: Option<Vec<Season>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movie,
    Series,
}

/// A season of a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub id: Uuid,

    /// Parent series row (not the content id)
    pub series_id: Uuid,

    /// Unique within the series
    pub season_number: u32,

    pub title: String,

    pub description: String,

    /// Episodes ordered by number
    pub episodes: Vec<Episode>,
}

/// Entry of the genre lookup table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: Uuid,

    pub season_id: Uuid,

    /// Unique within the season
    pub episode_number: u32,

    pub title: String,

    pub description: String,

    pub duration: String,

    pub thumbnail: String,

    pub video_url: String,
}

impl Content {
    /// Case-insensitive exact match against any of the genre names
    pub fn has_genre(&self, genre: &str) -> bool {
        let wanted = genre.to_lowercase();
        self.genre.iter().any(|g| g.to_lowercase() == wanted)
    }

    pub fn is_series(&self) -> bool {
        self.kind == ContentType::Series
    }

    pub fn season(&self, season_id: Uuid) -> Option<&Season> {
        self.seasons
            .as_deref()
            .and_then(|seasons| seasons.iter().find(|s| s.id == season_id))
    }

    pub fn contains_season(&self, season_id: Uuid) -> bool {
        self.season(season_id).is_some()
    }

    pub fn contains_episode(&self, episode_id: Uuid) -> bool {
        self.seasons.as_deref().is_some_and(|seasons| {
            seasons
                .iter()
                .any(|s| s.episodes.iter().any(|e| e.id == episode_id))
        })
    }

    /// Orders seasons by number and the episodes of each season by number
    pub fn sort_seasons(&mut self) {
        if let Some(seasons) = self.seasons.as_mut() {
            seasons.sort_by_key(|s| s.season_number);
            for season in seasons.iter_mut() {
                season.episodes.sort_by_key(|e| e.episode_number);
            }
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentType::Movie => write!(f, "movie"),
            ContentType::Series => write!(f, "series"),
        }
    }
}

impl FromStr for ContentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" => Ok(ContentType::Movie),
            "series" => Ok(ContentType::Series),
            other => Err(DomainError::InvariantViolation(format!(
                "Unknown content type '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(genres: &[&str]) -> Content {
        Content {
            id: Uuid::new_v4(),
            title: "Dark".to_string(),
            description: String::new(),
            kind: ContentType::Series,
            genre: genres.iter().map(|g| g.to_string()).collect(),
            release_year: 2017,
            maturity_rating: "TV-MA".to_string(),
            duration: "3 Seasons".to_string(),
            poster_image: String::new(),
            backdrop_image: String::new(),
            trailer_url: String::new(),
            featured: false,
            created_at: Utc::now(),
            seasons: Some(Vec::new()),
        }
    }

    #[test]
    fn test_has_genre_ignores_case() {
        let content = sample(&["Sci-Fi", "Thriller"]);
        assert!(content.has_genre("sci-fi"));
        assert!(content.has_genre("THRILLER"));
        assert!(!content.has_genre("thrill"));
    }

    #[test]
    fn test_sort_seasons_orders_nested_rows() {
        let mut content = sample(&[]);
        let series_id = Uuid::new_v4();
        let season = |n: u32, eps: &[u32]| {
            let id = Uuid::new_v4();
            Season {
                id,
                series_id,
                season_number: n,
                title: format!("Season {}", n),
                description: String::new(),
                episodes: eps
                    .iter()
                    .map(|&e| Episode {
                        id: Uuid::new_v4(),
                        season_id: id,
                        episode_number: e,
                        title: format!("Episode {}", e),
                        description: String::new(),
                        duration: "50m".to_string(),
                        thumbnail: String::new(),
                        video_url: String::new(),
                    })
                    .collect(),
            }
        };
        content.seasons = Some(vec![season(2, &[3, 1, 2]), season(1, &[2, 1])]);

        content.sort_seasons();

        let seasons = content.seasons.unwrap();
        assert_eq!(seasons[0].season_number, 1);
        assert_eq!(seasons[1].season_number, 2);
        let numbers: Vec<u32> = seasons[1].episodes.iter().map(|e| e.episode_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_content_type_round_trips_through_text() {
        assert_eq!("Movie".parse::<ContentType>().unwrap(), ContentType::Movie);
        assert_eq!(ContentType::Series.to_string(), "series");
        assert!("documentary".parse::<ContentType>().is_err());
    }

    #[test]
    fn test_serializes_kind_as_type() {
        let json = serde_json::to_value(sample(&["Drama"])).unwrap();
        assert_eq!(json["type"], "series");
        assert_eq!(json["genre"][0], "Drama");
    }
}
