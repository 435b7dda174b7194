// src/services/test_support.rs
//
// In-memory catalog backend for store tests
//
// Implements every catalog repository over one shared table set, counts
// remote calls and can be told to fail the next call.

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::config::CacheRefresh;
use crate::domain::content::{
    Content, ContentChanges, ContentType, Episode, EpisodeChanges, Genre, NewContent, NewEpisode,
    NewSeason, Season, SeasonChanges,
};
use crate::error::{AppError, AppResult, RemoteError};
use crate::repositories::{ContentRepository, EpisodeRepository, GenreRepository, SeasonRepository};
use crate::services::ContentStore;

#[derive(Default)]
struct Tables {
    contents: Vec<Content>,
    genres: Vec<Genre>,
    /// (content id, series id)
    series: Vec<(Uuid, Uuid)>,
}

#[derive(Default)]
pub(crate) struct FakeCatalog {
    tables: Mutex<Tables>,
    fail_next: Mutex<Option<String>>,
    remote_calls: AtomicUsize,
    list_calls: AtomicUsize,
}

impl FakeCatalog {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    pub(crate) fn seed(&self, content: Content) {
        let mut tables = self.tables();
        if content.is_series() {
            let series_id = content
                .seasons
                .as_ref()
                .and_then(|s| s.first())
                .map(|s| s.series_id)
                .unwrap_or_else(Uuid::new_v4);
            tables.series.push((content.id, series_id));
        }
        tables.contents.push(content);
    }

    pub(crate) fn seed_genres(&self, names: &[&str]) {
        let mut tables = self.tables();
        for name in names {
            tables.genres.push(Genre {
                id: Uuid::new_v4(),
                name: name.to_string(),
            });
        }
    }

    /// Remove a row behind the store's back
    pub(crate) fn remove_out_of_band(&self, id: Uuid) {
        self.tables().contents.retain(|c| c.id != id);
    }

    pub(crate) fn stored(&self, id: Uuid) -> Option<Content> {
        self.tables().contents.iter().find(|c| c.id == id).cloned()
    }

    /// The next remote call fails with `message`
    pub(crate) fn fail_next(&self, message: &str) {
        *self.fail_next.lock().unwrap() = Some(message.to_string());
    }

    pub(crate) fn remote_calls(&self) -> usize {
        self.remote_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn enter(&self) -> AppResult<()> {
        self.remote_calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_next.lock().unwrap().take() {
            Some(message) => Err(AppError::Remote(RemoteError::new(500, message))),
            None => Ok(()),
        }
    }

    fn find_season_mut(tables: &mut Tables, season_id: Uuid) -> Option<&mut Season> {
        tables
            .contents
            .iter_mut()
            .filter_map(|c| c.seasons.as_mut())
            .flat_map(|seasons| seasons.iter_mut())
            .find(|s| s.id == season_id)
    }
}

/// Store wired to the fake for every repository seam
pub(crate) fn store_over(catalog: &Arc<FakeCatalog>, refresh: CacheRefresh) -> ContentStore {
    ContentStore::new(
        catalog.clone(),
        catalog.clone(),
        catalog.clone(),
        catalog.clone(),
        refresh,
    )
}

/// Catalog entry created `day` days after 2024-01-01
pub(crate) fn entry(title: &str, kind: ContentType, genres: &[&str], day: i64) -> Content {
    Content {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: format!("About {}", title),
        kind,
        genre: genres.iter().map(|g| g.to_string()).collect(),
        release_year: 2000 + day as i32,
        maturity_rating: "PG-13".to_string(),
        duration: "2h".to_string(),
        poster_image: format!("https://img.example/{}.jpg", day),
        backdrop_image: String::new(),
        trailer_url: String::new(),
        featured: false,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(day),
        seasons: Some(vec![]),
    }
}

pub(crate) fn movie(title: &str, genres: &[&str], day: i64) -> Content {
    entry(title, ContentType::Movie, genres, day)
}

/// Series with `seasons` seasons of `episodes` episodes each
pub(crate) fn series(title: &str, genres: &[&str], day: i64, seasons: u32, episodes: u32) -> Content {
    let mut content = entry(title, ContentType::Series, genres, day);
    let series_id = Uuid::new_v4();
    content.seasons = Some(
        (1..=seasons)
            .map(|n| {
                let season_id = Uuid::new_v4();
                Season {
                    id: season_id,
                    series_id,
                    season_number: n,
                    title: format!("Season {}", n),
                    description: String::new(),
                    episodes: (1..=episodes)
                        .map(|e| Episode {
                            id: Uuid::new_v4(),
                            season_id,
                            episode_number: e,
                            title: format!("Episode {}", e),
                            description: String::new(),
                            duration: "45m".to_string(),
                            thumbnail: String::new(),
                            video_url: String::new(),
                        })
                        .collect(),
                }
            })
            .collect(),
    );
    content
}

fn listing(mut content: Content) -> Content {
    content.seasons = None;
    content
}

#[async_trait]
impl ContentRepository for FakeCatalog {
    async fn list_all(&self) -> AppResult<Vec<Content>> {
        self.enter()?;
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let mut contents = self.tables().contents.clone();
        contents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(contents)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Content>> {
        self.enter()?;
        Ok(self.stored(id))
    }

    async fn find_featured(&self) -> AppResult<Option<Content>> {
        self.enter()?;
        let featured: Vec<Content> = self
            .tables()
            .contents
            .iter()
            .filter(|c| c.featured)
            .cloned()
            .collect();
        if featured.len() > 1 {
            return Err(AppError::Remote(
                RemoteError::new(406, "JSON object requested, multiple rows returned")
                    .with_code("PGRST116"),
            ));
        }
        Ok(featured.into_iter().next().map(listing))
    }

    async fn search_by_title(&self, query: &str) -> AppResult<Vec<Content>> {
        self.enter()?;
        let needle = query.to_lowercase();
        let mut found: Vec<Content> = self
            .tables()
            .contents
            .iter()
            .filter(|c| c.title.to_lowercase().contains(&needle))
            .cloned()
            .map(listing)
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn create_with_genres(&self, content: &NewContent) -> AppResult<Uuid> {
        self.enter()?;
        let mut tables = self.tables();
        let newest = tables
            .contents
            .iter()
            .map(|c| c.created_at)
            .max()
            .unwrap_or_else(|| Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

        let id = Uuid::new_v4();
        if content.kind == ContentType::Series {
            tables.series.push((id, Uuid::new_v4()));
        }
        tables.contents.push(Content {
            id,
            title: content.title.clone(),
            description: content.description.clone(),
            kind: content.kind,
            genre: content.genre.clone(),
            release_year: content.release_year,
            maturity_rating: content.maturity_rating.clone(),
            duration: content.duration.clone(),
            poster_image: content.poster_image.clone(),
            backdrop_image: content.backdrop_image.clone(),
            trailer_url: content.trailer_url.clone(),
            featured: content.featured,
            created_at: newest + Duration::seconds(1),
            seasons: Some(vec![]),
        });
        Ok(id)
    }

    async fn update(&self, id: Uuid, changes: &ContentChanges) -> AppResult<()> {
        self.enter()?;
        let mut tables = self.tables();
        if let Some(c) = tables.contents.iter_mut().find(|c| c.id == id) {
            if let Some(v) = &changes.title {
                c.title = v.clone();
            }
            if let Some(v) = &changes.description {
                c.description = v.clone();
            }
            if let Some(v) = changes.kind {
                c.kind = v;
            }
            if let Some(v) = changes.release_year {
                c.release_year = v;
            }
            if let Some(v) = &changes.maturity_rating {
                c.maturity_rating = v.clone();
            }
            if let Some(v) = &changes.duration {
                c.duration = v.clone();
            }
            if let Some(v) = changes.featured {
                c.featured = v;
            }
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.enter()?;
        let mut tables = self.tables();
        tables.contents.retain(|c| c.id != id);
        tables.series.retain(|(content_id, _)| *content_id != id);
        Ok(())
    }
}

#[async_trait]
impl GenreRepository for FakeCatalog {
    async fn list_all(&self) -> AppResult<Vec<Genre>> {
        self.enter()?;
        Ok(self.tables().genres.clone())
    }

    async fn replace_for_content(&self, content_id: Uuid, genre_ids: &[Uuid]) -> AppResult<()> {
        self.enter()?;
        let mut tables = self.tables();
        let names: Vec<String> = genre_ids
            .iter()
            .filter_map(|id| tables.genres.iter().find(|g| g.id == *id))
            .map(|g| g.name.clone())
            .collect();
        if let Some(c) = tables.contents.iter_mut().find(|c| c.id == content_id) {
            c.genre = names;
        }
        Ok(())
    }
}

#[async_trait]
impl SeasonRepository for FakeCatalog {
    async fn find_series_id(&self, content_id: Uuid) -> AppResult<Option<Uuid>> {
        self.enter()?;
        Ok(self
            .tables()
            .series
            .iter()
            .find(|(c, _)| *c == content_id)
            .map(|(_, s)| *s))
    }

    async fn insert(&self, series_id: Uuid, season: &NewSeason) -> AppResult<Season> {
        self.enter()?;
        let mut tables = self.tables();
        let content_id = tables
            .series
            .iter()
            .find(|(_, s)| *s == series_id)
            .map(|(c, _)| *c)
            .ok_or_else(|| AppError::Remote(RemoteError::new(409, "foreign key violation")))?;

        let created = Season {
            id: Uuid::new_v4(),
            series_id,
            season_number: season.season_number,
            title: season.title.clone(),
            description: season.description.clone(),
            episodes: vec![],
        };
        if let Some(c) = tables.contents.iter_mut().find(|c| c.id == content_id) {
            c.seasons.get_or_insert_with(Vec::new).push(created.clone());
            c.sort_seasons();
        }
        Ok(created)
    }

    async fn update(&self, id: Uuid, changes: &SeasonChanges) -> AppResult<()> {
        self.enter()?;
        let mut tables = self.tables();
        if let Some(season) = Self::find_season_mut(&mut tables, id) {
            if let Some(n) = changes.season_number {
                season.season_number = n;
            }
            if let Some(v) = &changes.title {
                season.title = v.clone();
            }
            if let Some(v) = &changes.description {
                season.description = v.clone();
            }
        }
        for c in tables.contents.iter_mut() {
            c.sort_seasons();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.enter()?;
        for c in self.tables().contents.iter_mut() {
            if let Some(seasons) = c.seasons.as_mut() {
                seasons.retain(|s| s.id != id);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl EpisodeRepository for FakeCatalog {
    async fn insert(&self, season_id: Uuid, episode: &NewEpisode) -> AppResult<Episode> {
        self.enter()?;
        let mut tables = self.tables();
        let season = Self::find_season_mut(&mut tables, season_id)
            .ok_or_else(|| AppError::Remote(RemoteError::new(409, "foreign key violation")))?;

        let created = Episode {
            id: Uuid::new_v4(),
            season_id,
            episode_number: episode.episode_number,
            title: episode.title.clone(),
            description: episode.description.clone(),
            duration: episode.duration.clone(),
            thumbnail: episode.thumbnail.clone(),
            video_url: episode.video_url.clone(),
        };
        season.episodes.push(created.clone());
        season.episodes.sort_by_key(|e| e.episode_number);
        Ok(created)
    }

    async fn update(&self, id: Uuid, changes: &EpisodeChanges) -> AppResult<()> {
        self.enter()?;
        for c in self.tables().contents.iter_mut() {
            for season in c.seasons.iter_mut().flatten() {
                for e in season.episodes.iter_mut().filter(|e| e.id == id) {
                    if let Some(n) = changes.episode_number {
                        e.episode_number = n;
                    }
                    if let Some(v) = &changes.title {
                        e.title = v.clone();
                    }
                }
            }
            c.sort_seasons();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.enter()?;
        for c in self.tables().contents.iter_mut() {
            for season in c.seasons.iter_mut().flatten() {
                season.episodes.retain(|e| e.id != id);
            }
        }
        Ok(())
    }
}
