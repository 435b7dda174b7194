use serde::{Deserialize, Serialize};

use super::entity::ContentType;

/// Everything needed to create a catalog entry (the id comes from the remote service)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContent {
    pub title: String,
    pub description: String,
    pub kind: ContentType,
    pub genre: Vec<String>,
    pub release_year: i32,
    pub maturity_rating: String,
    pub duration: String,
    pub poster_image: String,
    pub backdrop_image: String,
    pub trailer_url: String,
    pub featured: bool,
}

/// Partial update of a catalog entry.
/// `None` leaves the column untouched; `genre: Some(..)` replaces the whole genre list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub kind: Option<ContentType>,
    pub genre: Option<Vec<String>>,
    pub release_year: Option<i32>,
    pub maturity_rating: Option<String>,
    pub duration: Option<String>,
    pub poster_image: Option<String>,
    pub backdrop_image: Option<String>,
    pub trailer_url: Option<String>,
    pub featured: Option<bool>,
}

impl ContentChanges {
    /// True when at least one column of the content row changes
    pub fn touches_columns(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.kind.is_some()
            || self.release_year.is_some()
            || self.maturity_rating.is_some()
            || self.duration.is_some()
            || self.poster_image.is_some()
            || self.backdrop_image.is_some()
            || self.trailer_url.is_some()
            || self.featured.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSeason {
    pub season_number: u32,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonChanges {
    pub season_number: Option<u32>,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEpisode {
    pub episode_number: u32,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub thumbnail: String,
    pub video_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeChanges {
    pub episode_number: Option<u32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub thumbnail: Option<String>,
    pub video_url: Option<String>,
}
