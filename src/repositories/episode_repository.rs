// src/repositories/episode_repository.rs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::content::{Episode, EpisodeChanges, NewEpisode};
use crate::error::{AppError, AppResult};
use crate::remote::{Query, RestClient};
use crate::repositories::{ordinal, text};

const EPISODES_TABLE: &str = "episodes";

#[async_trait]
pub trait EpisodeRepository: Send + Sync {
    async fn insert(&self, season_id: Uuid, episode: &NewEpisode) -> AppResult<Episode>;
    async fn update(&self, id: Uuid, changes: &EpisodeChanges) -> AppResult<()>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// `episodes` row, also embedded under seasons in catalog reads
#[derive(Debug, Deserialize)]
pub(crate) struct EpisodeRow {
    id: Uuid,
    season_id: Uuid,
    episode_number: i64,
    title: Option<String>,
    description: Option<String>,
    duration: Option<String>,
    thumbnail: Option<String>,
    video_url: Option<String>,
}

impl TryFrom<EpisodeRow> for Episode {
    type Error = AppError;

    fn try_from(row: EpisodeRow) -> AppResult<Self> {
        Ok(Self {
            id: row.id,
            season_id: row.season_id,
            episode_number: ordinal("episode_number", row.episode_number)?,
            title: text(row.title),
            description: text(row.description),
            duration: text(row.duration),
            thumbnail: text(row.thumbnail),
            video_url: text(row.video_url),
        })
    }
}

#[derive(Debug, Serialize)]
struct EpisodeColumns<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    season_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    episode_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnail: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    video_url: Option<&'a str>,
}

impl<'a> EpisodeColumns<'a> {
    fn insert(season_id: Uuid, episode: &'a NewEpisode) -> Self {
        Self {
            season_id: Some(season_id),
            episode_number: Some(episode.episode_number),
            title: Some(&episode.title),
            description: Some(&episode.description),
            duration: Some(&episode.duration),
            thumbnail: Some(&episode.thumbnail),
            video_url: Some(&episode.video_url),
        }
    }

    fn update(changes: &'a EpisodeChanges) -> Self {
        Self {
            season_id: None,
            episode_number: changes.episode_number,
            title: changes.title.as_deref(),
            description: changes.description.as_deref(),
            duration: changes.duration.as_deref(),
            thumbnail: changes.thumbnail.as_deref(),
            video_url: changes.video_url.as_deref(),
        }
    }

    fn is_empty(&self) -> bool {
        self.episode_number.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.duration.is_none()
            && self.thumbnail.is_none()
            && self.video_url.is_none()
    }
}

pub struct RestEpisodeRepository {
    client: Arc<RestClient>,
}

impl RestEpisodeRepository {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EpisodeRepository for RestEpisodeRepository {
    async fn insert(&self, season_id: Uuid, episode: &NewEpisode) -> AppResult<Episode> {
        let row: EpisodeRow = self
            .client
            .insert(EPISODES_TABLE, &EpisodeColumns::insert(season_id, episode))
            .await?;
        row.try_into()
    }

    async fn update(&self, id: Uuid, changes: &EpisodeChanges) -> AppResult<()> {
        let columns = EpisodeColumns::update(changes);
        if columns.is_empty() {
            return Ok(());
        }
        self.client
            .update(EPISODES_TABLE, &Query::new().eq("id", id), &columns)
            .await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.client
            .delete(EPISODES_TABLE, &Query::new().eq("id", id))
            .await
    }
}
