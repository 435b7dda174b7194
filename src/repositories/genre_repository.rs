// src/repositories/genre_repository.rs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::content::Genre;
use crate::error::AppResult;
use crate::remote::{Order, Query, RestClient};

const GENRES_TABLE: &str = "genres";
const CONTENT_GENRES_TABLE: &str = "content_genres";

#[async_trait]
pub trait GenreRepository: Send + Sync {
    async fn list_all(&self) -> AppResult<Vec<Genre>>;

    /// Drop every genre link of a content entry, then link the given genres
    async fn replace_for_content(&self, content_id: Uuid, genre_ids: &[Uuid]) -> AppResult<()>;
}

#[derive(Debug, Deserialize)]
struct GenreRow {
    id: Uuid,
    name: String,
}

#[derive(Debug, Serialize)]
struct ContentGenreLink {
    content_id: Uuid,
    genre_id: Uuid,
}

pub struct RestGenreRepository {
    client: Arc<RestClient>,
}

impl RestGenreRepository {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GenreRepository for RestGenreRepository {
    async fn list_all(&self) -> AppResult<Vec<Genre>> {
        let query = Query::new().select("id, name").order("name", Order::Ascending);
        let rows: Vec<GenreRow> = self.client.select(GENRES_TABLE, &query).await?;

        Ok(rows
            .into_iter()
            .map(|row| Genre {
                id: row.id,
                name: row.name,
            })
            .collect())
    }

    async fn replace_for_content(&self, content_id: Uuid, genre_ids: &[Uuid]) -> AppResult<()> {
        self.client
            .delete(CONTENT_GENRES_TABLE, &Query::new().eq("content_id", content_id))
            .await?;

        let links: Vec<ContentGenreLink> = genre_ids
            .iter()
            .map(|&genre_id| ContentGenreLink {
                content_id,
                genre_id,
            })
            .collect();

        self.client.insert_many(CONTENT_GENRES_TABLE, &links).await
    }
}
