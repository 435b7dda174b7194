// src/repositories/content_repository.rs
//
// Catalog persistence
//
// Reads select the content row together with its genre join rows and, for
// catalog reads, the series -> seasons -> episodes tree. The join rows are
// flattened to a list of genre names before anything leaves this module.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::content::{Content, ContentChanges, ContentType, NewContent, Season};
use crate::error::{AppError, AppResult, RemoteError};
use crate::remote::{contains_pattern, OneOrMany, Order, Query, RestClient};
use crate::repositories::season_repository::SeasonRow;
use crate::repositories::{keep_valid, text};

const CONTENT_TABLE: &str = "content";
const CREATE_CONTENT_RPC: &str = "create_content_with_genres";

/// Content with genres and the full season/episode tree
const CATALOG_SELECT: &str = "
    *,
    content_genres ( genres (name) ),
    series ( id, seasons ( *, episodes (*) ) )
";

/// Content with genres only
const LISTING_SELECT: &str = "
    *,
    content_genres ( genres (name) )
";

#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Whole catalog with seasons, newest first
    async fn list_all(&self) -> AppResult<Vec<Content>>;

    /// One entry with seasons
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Content>>;

    /// The entry flagged as featured. More than one flagged row is an error.
    async fn find_featured(&self) -> AppResult<Option<Content>>;

    /// Case-insensitive substring match on the title, newest first, without seasons
    async fn search_by_title(&self, query: &str) -> AppResult<Vec<Content>>;

    /// Insert the row and attach genres by name in one server-side call
    async fn create_with_genres(&self, content: &NewContent) -> AppResult<Uuid>;

    /// Update the content columns only; genres go through GenreRepository
    async fn update(&self, id: Uuid, changes: &ContentChanges) -> AppResult<()>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

// ============================================================================
// WIRE ROWS
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct ContentRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    #[serde(rename = "type")]
    kind: ContentType,
    release_year: Option<i32>,
    maturity_rating: Option<String>,
    duration: Option<String>,
    poster_image: Option<String>,
    backdrop_image: Option<String>,
    trailer_url: Option<String>,
    featured: Option<bool>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    content_genres: Option<Vec<ContentGenreRow>>,
    #[serde(default)]
    series: Option<OneOrMany<SeriesRow>>,
}

#[derive(Debug, Deserialize)]
struct ContentGenreRow {
    genres: Option<GenreNameRow>,
}

#[derive(Debug, Deserialize)]
struct GenreNameRow {
    name: String,
}

#[derive(Debug, Deserialize)]
struct SeriesRow {
    #[allow(dead_code)] // selected so the relation is embedded
    id: Uuid,
    #[serde(default)]
    seasons: Vec<SeasonRow>,
}

impl ContentRow {
    /// Normalize into the domain shape.
    ///
    /// `with_seasons` is set for catalog reads: a movie (or a series without a
    /// series row yet) then gets an empty season list instead of `None`.
    pub(crate) fn into_content(self, with_seasons: bool) -> Content {
        let genre = self
            .content_genres
            .unwrap_or_default()
            .into_iter()
            .filter_map(|cg| cg.genres.map(|g| g.name))
            .collect();

        let seasons = with_seasons.then(|| {
            self.series
                .and_then(OneOrMany::into_first)
                .map(|series| keep_valid::<_, Season>(series.seasons, "season"))
                .unwrap_or_default()
        });

        let mut content = Content {
            id: self.id,
            title: self.title,
            description: text(self.description),
            kind: self.kind,
            genre,
            release_year: self.release_year.unwrap_or_default(),
            maturity_rating: text(self.maturity_rating),
            duration: text(self.duration),
            poster_image: text(self.poster_image),
            backdrop_image: text(self.backdrop_image),
            trailer_url: text(self.trailer_url),
            featured: self.featured.unwrap_or(false),
            created_at: self.created_at,
            seasons,
        };
        content.sort_seasons();
        content
    }
}

/// Title search query; the text is matched as typed, surrounding spaces included
fn title_search(text: &str) -> Query {
    Query::new()
        .select(LISTING_SELECT)
        .ilike("title", &contains_pattern(text))
        .order("created_at", Order::Descending)
}

/// Arguments of `create_content_with_genres`
#[derive(Debug, Serialize)]
struct CreateContentArgs<'a> {
    p_title: &'a str,
    p_description: &'a str,
    p_type: ContentType,
    p_release_year: i32,
    p_maturity_rating: &'a str,
    p_duration: &'a str,
    p_poster_image: &'a str,
    p_backdrop_image: &'a str,
    p_trailer_url: &'a str,
    p_featured: bool,
    p_genre_names: &'a [String],
}

impl<'a> From<&'a NewContent> for CreateContentArgs<'a> {
    fn from(content: &'a NewContent) -> Self {
        Self {
            p_title: &content.title,
            p_description: &content.description,
            p_type: content.kind,
            p_release_year: content.release_year,
            p_maturity_rating: &content.maturity_rating,
            p_duration: &content.duration,
            p_poster_image: &content.poster_image,
            p_backdrop_image: &content.backdrop_image,
            p_trailer_url: &content.trailer_url,
            p_featured: content.featured,
            p_genre_names: &content.genre,
        }
    }
}

/// The procedure may return the new id, the new row, or a one-row set
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CreatedContent {
    Id(Uuid),
    Row { id: Uuid },
    Rows(Vec<IdRow>),
}

#[derive(Debug, Deserialize)]
struct IdRow {
    id: Uuid,
}

impl CreatedContent {
    fn id(self) -> Option<Uuid> {
        match self {
            CreatedContent::Id(id) | CreatedContent::Row { id } => Some(id),
            CreatedContent::Rows(rows) => rows.into_iter().next().map(|r| r.id),
        }
    }
}

#[derive(Debug, Serialize)]
struct ContentColumns<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<ContentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    release_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maturity_rating: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    poster_image: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    backdrop_image: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trailer_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    featured: Option<bool>,
}

impl<'a> From<&'a ContentChanges> for ContentColumns<'a> {
    fn from(changes: &'a ContentChanges) -> Self {
        Self {
            title: changes.title.as_deref(),
            description: changes.description.as_deref(),
            kind: changes.kind,
            release_year: changes.release_year,
            maturity_rating: changes.maturity_rating.as_deref(),
            duration: changes.duration.as_deref(),
            poster_image: changes.poster_image.as_deref(),
            backdrop_image: changes.backdrop_image.as_deref(),
            trailer_url: changes.trailer_url.as_deref(),
            featured: changes.featured,
        }
    }
}

// ============================================================================
// REST IMPLEMENTATION
// ============================================================================

pub struct RestContentRepository {
    client: Arc<RestClient>,
}

impl RestContentRepository {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentRepository for RestContentRepository {
    async fn list_all(&self) -> AppResult<Vec<Content>> {
        let query = Query::new()
            .select(CATALOG_SELECT)
            .order("created_at", Order::Descending);

        let rows: Vec<ContentRow> = self.client.select(CONTENT_TABLE, &query).await?;
        Ok(rows.into_iter().map(|row| row.into_content(true)).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Content>> {
        let query = Query::new().select(CATALOG_SELECT).eq("id", id);

        let row: Option<ContentRow> = self.client.select_maybe_single(CONTENT_TABLE, &query).await?;
        Ok(row.map(|row| row.into_content(true)))
    }

    async fn find_featured(&self) -> AppResult<Option<Content>> {
        let query = Query::new().select(LISTING_SELECT).eq("featured", true);

        let row: Option<ContentRow> = self.client.select_maybe_single(CONTENT_TABLE, &query).await?;
        Ok(row.map(|row| row.into_content(false)))
    }

    async fn search_by_title(&self, query: &str) -> AppResult<Vec<Content>> {
        let query = title_search(query);

        let rows: Vec<ContentRow> = self.client.select(CONTENT_TABLE, &query).await?;
        Ok(rows.into_iter().map(|row| row.into_content(false)).collect())
    }

    async fn create_with_genres(&self, content: &NewContent) -> AppResult<Uuid> {
        let created: CreatedContent = self
            .client
            .rpc(CREATE_CONTENT_RPC, &CreateContentArgs::from(content))
            .await?;

        created.id().ok_or_else(|| {
            AppError::Remote(RemoteError::new(
                500,
                format!("{} returned no content id", CREATE_CONTENT_RPC),
            ))
        })
    }

    async fn update(&self, id: Uuid, changes: &ContentChanges) -> AppResult<()> {
        if !changes.touches_columns() {
            return Ok(());
        }
        self.client
            .update(CONTENT_TABLE, &Query::new().eq("id", id), &ContentColumns::from(changes))
            .await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.client
            .delete(CONTENT_TABLE, &Query::new().eq("id", id))
            .await
    }
}
