// src/repositories/season_repository.rs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::content::{Episode, NewSeason, Season, SeasonChanges};
use crate::error::{AppError, AppResult};
use crate::remote::{Query, RestClient};
use crate::repositories::episode_repository::EpisodeRow;
use crate::repositories::{keep_valid, ordinal, text};

const SERIES_TABLE: &str = "series";
const SEASONS_TABLE: &str = "seasons";

#[async_trait]
pub trait SeasonRepository: Send + Sync {
    /// `series` row attached to a content entry, if the entry is a series
    async fn find_series_id(&self, content_id: Uuid) -> AppResult<Option<Uuid>>;
    async fn insert(&self, series_id: Uuid, season: &NewSeason) -> AppResult<Season>;
    async fn update(&self, id: Uuid, changes: &SeasonChanges) -> AppResult<()>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// `seasons` row, with episodes when selected as a nested relation
#[derive(Debug, Deserialize)]
pub(crate) struct SeasonRow {
    id: Uuid,
    series_id: Uuid,
    season_number: i64,
    title: Option<String>,
    description: Option<String>,
    #[serde(default)]
    episodes: Vec<EpisodeRow>,
}

impl TryFrom<SeasonRow> for Season {
    type Error = AppError;

    fn try_from(row: SeasonRow) -> AppResult<Self> {
        let season_number = ordinal("season_number", row.season_number)?;
        let mut episodes: Vec<Episode> = keep_valid(row.episodes, "episode");
        episodes.sort_by_key(|e| e.episode_number);

        Ok(Self {
            id: row.id,
            series_id: row.series_id,
            season_number,
            title: text(row.title),
            description: text(row.description),
            episodes,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SeriesIdRow {
    id: Uuid,
}

#[derive(Debug, Serialize)]
struct SeasonColumns<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    series_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    season_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

pub struct RestSeasonRepository {
    client: Arc<RestClient>,
}

impl RestSeasonRepository {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SeasonRepository for RestSeasonRepository {
    async fn find_series_id(&self, content_id: Uuid) -> AppResult<Option<Uuid>> {
        let query = Query::new().select("id").eq("content_id", content_id);
        let row: Option<SeriesIdRow> = self.client.select_maybe_single(SERIES_TABLE, &query).await?;
        Ok(row.map(|r| r.id))
    }

    async fn insert(&self, series_id: Uuid, season: &NewSeason) -> AppResult<Season> {
        let columns = SeasonColumns {
            series_id: Some(series_id),
            season_number: Some(season.season_number),
            title: Some(&season.title),
            description: Some(&season.description),
        };
        let row: SeasonRow = self.client.insert(SEASONS_TABLE, &columns).await?;
        row.try_into()
    }

    async fn update(&self, id: Uuid, changes: &SeasonChanges) -> AppResult<()> {
        if changes.season_number.is_none() && changes.title.is_none() && changes.description.is_none() {
            return Ok(());
        }
        let columns = SeasonColumns {
            series_id: None,
            season_number: changes.season_number,
            title: changes.title.as_deref(),
            description: changes.description.as_deref(),
        };
        self.client
            .update(SEASONS_TABLE, &Query::new().eq("id", id), &columns)
            .await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.client
            .delete(SEASONS_TABLE, &Query::new().eq("id", id))
            .await
    }
}
