pub mod changes;
pub mod entity;
pub mod invariants;

pub use changes::{ContentChanges, EpisodeChanges, NewContent, NewEpisode, NewSeason, SeasonChanges};
pub use entity::{Content, ContentType, Episode, Genre, Season};
pub use invariants::{
    validate_content_changes, validate_episode_changes, validate_new_content, validate_new_episode,
    validate_new_season, validate_season_changes,
};
