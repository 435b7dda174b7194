// src/services/content_store.rs
//
// Catalog store: remote reads, in-memory snapshot, mutations
//
// ARCHITECTURE:
// - Repositories do the remote I/O, this service owns the cache
// - Snapshot entries are shared (`Arc<Content>`), lookups hand out the same pointer
// - After a successful write the cache catches up per `CacheRefresh`
// - Targeted catch-up needs a complete snapshot; before the first full fetch
//   every mutation refetches the catalog
//
// CRITICAL RULES:
// - The state lock is never held across an await
// - Any failure is recorded on `error` AND returned; no retry, no rollback
// - Overlapping fetches are not sequenced: the last one to resolve wins

use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::config::CacheRefresh;
use crate::domain::content::{
    validate_content_changes, validate_episode_changes, validate_new_content,
    validate_new_episode, validate_new_season, validate_season_changes, Content, ContentChanges,
    Episode, EpisodeChanges, Genre, NewContent, NewEpisode, NewSeason, Season, SeasonChanges,
};
use crate::error::{AppError, AppResult};
use crate::repositories::{ContentRepository, EpisodeRepository, GenreRepository, SeasonRepository};

/// Observable store state
#[derive(Debug, Clone, Default)]
pub struct ContentState {
    pub contents: Vec<Arc<Content>>,
    pub featured: Option<Arc<Content>>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// A full catalog fetch has completed at least once
    pub loaded: bool,
}

pub struct ContentStore {
    content_repo: Arc<dyn ContentRepository>,
    genre_repo: Arc<dyn GenreRepository>,
    season_repo: Arc<dyn SeasonRepository>,
    episode_repo: Arc<dyn EpisodeRepository>,
    refresh: CacheRefresh,
    state: Mutex<ContentState>,
}

impl ContentStore {
    pub fn new(
        content_repo: Arc<dyn ContentRepository>,
        genre_repo: Arc<dyn GenreRepository>,
        season_repo: Arc<dyn SeasonRepository>,
        episode_repo: Arc<dyn EpisodeRepository>,
        refresh: CacheRefresh,
    ) -> Self {
        Self {
            content_repo,
            genre_repo,
            season_repo,
            episode_repo,
            refresh,
            state: Mutex::new(ContentState::default()),
        }
    }

    pub fn refresh_policy(&self) -> CacheRefresh {
        self.refresh
    }

    // ========================================================================
    // STATE ACCESS
    // ========================================================================

    fn lock(&self) -> MutexGuard<'_, ContentState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Consistent copy of the whole state
    pub fn snapshot(&self) -> ContentState {
        self.lock().clone()
    }

    pub fn contents(&self) -> Vec<Arc<Content>> {
        self.lock().contents.clone()
    }

    pub fn featured(&self) -> Option<Arc<Content>> {
        self.lock().featured.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().is_loading
    }

    /// True once `contents` mirrors the whole remote catalog
    pub fn is_loaded(&self) -> bool {
        self.lock().loaded
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn clear_error(&self) {
        self.lock().error = None;
    }

    fn begin_loading(&self) {
        let mut state = self.lock();
        state.is_loading = true;
        state.error = None;
    }

    /// Record a failure on the store and hand it back to the caller
    fn fail(&self, action: &str, error: AppError) -> AppError {
        log::warn!("Failed to {}: {}", action, error);
        let mut state = self.lock();
        state.error = Some(error.to_string());
        state.is_loading = false;
        error
    }

    // ========================================================================
    // READS
    // ========================================================================

    /// Replace the snapshot with the whole catalog, newest first
    pub async fn fetch_contents(&self) -> AppResult<Vec<Arc<Content>>> {
        self.begin_loading();

        let contents = match self.content_repo.list_all().await {
            Ok(contents) => contents,
            Err(e) => return Err(self.fail("fetch contents", e)),
        };

        let contents: Vec<Arc<Content>> = contents.into_iter().map(Arc::new).collect();
        let featured_count = contents.iter().filter(|c| c.featured).count();
        if featured_count > 1 {
            log::warn!("{} entries are flagged as featured, expected one", featured_count);
        }
        log::debug!("Fetched {} catalog entries", contents.len());

        let mut state = self.lock();
        state.contents = contents.clone();
        state.loaded = true;
        state.is_loading = false;
        Ok(contents)
    }

    /// Load the featured entry. Remote failures degrade to "no featured entry".
    pub async fn fetch_featured(&self) -> Option<Arc<Content>> {
        self.begin_loading();

        let featured = match self.content_repo.find_featured().await {
            Ok(Some(content)) => Some(Arc::new(content)),
            Ok(None) => {
                log::warn!("No featured content found");
                None
            }
            Err(e) => {
                log::warn!("Error fetching featured content: {}", e);
                None
            }
        };

        let mut state = self.lock();
        state.featured = featured.clone();
        state.is_loading = false;
        featured
    }

    /// Title search against the remote service. The result is not cached.
    pub async fn search_contents(&self, query: &str) -> AppResult<Vec<Content>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        self.content_repo
            .search_by_title(query)
            .await
            .map_err(|e| self.fail("search contents", e))
    }

    /// Entries of the snapshot carrying `genre` (case-insensitive)
    pub fn get_contents_by_genre(&self, genre: &str) -> Vec<Arc<Content>> {
        self.lock()
            .contents
            .iter()
            .filter(|c| c.has_genre(genre))
            .cloned()
            .collect()
    }

    pub fn get_content_by_id(&self, id: Uuid) -> Option<Arc<Content>> {
        self.lock().contents.iter().find(|c| c.id == id).cloned()
    }

    // ========================================================================
    // CONTENT MUTATIONS
    // ========================================================================

    pub async fn add_content(&self, content: NewContent) -> AppResult<Arc<Content>> {
        validate_new_content(&content).map_err(|e| self.fail("add content", e.into()))?;

        let id = self
            .content_repo
            .create_with_genres(&content)
            .await
            .map_err(|e| self.fail("add content", e))?;
        log::info!("Created content {} ({})", id, content.title);

        self.catch_up(Some(id)).await?;

        self.get_content_by_id(id)
            .ok_or_else(|| self.fail("add content", AppError::not_found(format!("Content {}", id))))
    }

    pub async fn update_content(&self, id: Uuid, changes: ContentChanges) -> AppResult<()> {
        validate_content_changes(&changes).map_err(|e| self.fail("update content", e.into()))?;

        self.content_repo
            .update(id, &changes)
            .await
            .map_err(|e| self.fail("update content", e))?;

        if let Some(names) = &changes.genre {
            self.replace_genres(id, names)
                .await
                .map_err(|e| self.fail("update content genres", e))?;
        }

        log::info!("Updated content {}", id);
        self.catch_up(Some(id)).await
    }

    pub async fn delete_content(&self, id: Uuid) -> AppResult<()> {
        self.content_repo
            .delete(id)
            .await
            .map_err(|e| self.fail("delete content", e))?;
        log::info!("Deleted content {}", id);

        if self.targeted() {
            self.remove_cached(id);
            Ok(())
        } else {
            self.fetch_contents().await.map(|_| ())
        }
    }

    async fn replace_genres(&self, content_id: Uuid, names: &[String]) -> AppResult<()> {
        let known = self.genre_repo.list_all().await?;
        let genre_ids = resolve_genre_ids(names, &known);
        self.genre_repo.replace_for_content(content_id, &genre_ids).await
    }

    // ========================================================================
    // SEASON MUTATIONS
    // ========================================================================

    pub async fn add_season(&self, content_id: Uuid, season: NewSeason) -> AppResult<Season> {
        validate_new_season(&season).map_err(|e| self.fail("add season", e.into()))?;

        let series_id = self
            .season_repo
            .find_series_id(content_id)
            .await
            .and_then(|found| found.ok_or_else(|| AppError::not_found("Series")))
            .map_err(|e| self.fail("add season", e))?;

        let created = self
            .season_repo
            .insert(series_id, &season)
            .await
            .map_err(|e| self.fail("add season", e))?;
        log::info!("Created season {} of content {}", created.season_number, content_id);

        self.catch_up(Some(content_id)).await?;
        Ok(created)
    }

    pub async fn update_season(&self, season_id: Uuid, changes: SeasonChanges) -> AppResult<()> {
        validate_season_changes(&changes).map_err(|e| self.fail("update season", e.into()))?;
        let owner = self.owner_of_season(season_id);

        self.season_repo
            .update(season_id, &changes)
            .await
            .map_err(|e| self.fail("update season", e))?;

        self.catch_up(owner).await
    }

    pub async fn delete_season(&self, season_id: Uuid) -> AppResult<()> {
        let owner = self.owner_of_season(season_id);

        self.season_repo
            .delete(season_id)
            .await
            .map_err(|e| self.fail("delete season", e))?;

        self.catch_up(owner).await
    }

    // ========================================================================
    // EPISODE MUTATIONS
    // ========================================================================

    pub async fn add_episode(&self, season_id: Uuid, episode: NewEpisode) -> AppResult<Episode> {
        validate_new_episode(&episode).map_err(|e| self.fail("add episode", e.into()))?;
        let owner = self.owner_of_season(season_id);

        let created = self
            .episode_repo
            .insert(season_id, &episode)
            .await
            .map_err(|e| self.fail("add episode", e))?;

        self.catch_up(owner).await?;
        Ok(created)
    }

    pub async fn update_episode(&self, episode_id: Uuid, changes: EpisodeChanges) -> AppResult<()> {
        validate_episode_changes(&changes).map_err(|e| self.fail("update episode", e.into()))?;
        let owner = self.owner_of_episode(episode_id);

        self.episode_repo
            .update(episode_id, &changes)
            .await
            .map_err(|e| self.fail("update episode", e))?;

        self.catch_up(owner).await
    }

    pub async fn delete_episode(&self, episode_id: Uuid) -> AppResult<()> {
        let owner = self.owner_of_episode(episode_id);

        self.episode_repo
            .delete(episode_id)
            .await
            .map_err(|e| self.fail("delete episode", e))?;

        self.catch_up(owner).await
    }

    // ========================================================================
    // CACHE MAINTENANCE
    // ========================================================================

    /// Targeted updates apply only on top of a complete snapshot
    fn targeted(&self) -> bool {
        self.refresh == CacheRefresh::Targeted && self.is_loaded()
    }

    /// Bring the cache up to date after a write to `owner` (None = unknown owner)
    async fn catch_up(&self, owner: Option<Uuid>) -> AppResult<()> {
        if !self.targeted() {
            return self.fetch_contents().await.map(|_| ());
        }
        match owner {
            Some(id) => self.refresh_content(id).await,
            None => {
                log::debug!("Owner not cached, refetching the whole catalog");
                self.fetch_contents().await.map(|_| ())
            }
        }
    }

    /// Re-read one entry and splice it into the snapshot
    async fn refresh_content(&self, id: Uuid) -> AppResult<()> {
        let fresh = self
            .content_repo
            .get_by_id(id)
            .await
            .map_err(|e| self.fail("refresh content", e))?;

        match fresh {
            Some(content) => {
                log::debug!("Refreshed cached content {}", id);
                let content = Arc::new(content);
                let mut state = self.lock();
                splice(&mut state.contents, content.clone());
                sync_featured(&mut state.featured, &content);
            }
            None => {
                log::debug!("Content {} no longer exists, dropping it from the cache", id);
                self.remove_cached(id);
            }
        }
        Ok(())
    }

    fn remove_cached(&self, id: Uuid) {
        let mut state = self.lock();
        state.contents.retain(|c| c.id != id);
        if state.featured.as_ref().is_some_and(|f| f.id == id) {
            state.featured = None;
        }
    }

    fn owner_of_season(&self, season_id: Uuid) -> Option<Uuid> {
        self.lock()
            .contents
            .iter()
            .find(|c| c.contains_season(season_id))
            .map(|c| c.id)
    }

    fn owner_of_episode(&self, episode_id: Uuid) -> Option<Uuid> {
        self.lock()
            .contents
            .iter()
            .find(|c| c.contains_episode(episode_id))
            .map(|c| c.id)
    }
}

/// Map genre names to ids by exact name; unknown names are dropped
fn resolve_genre_ids(names: &[String], known: &[Genre]) -> Vec<Uuid> {
    names
        .iter()
        .filter_map(|name| {
            let found = known.iter().find(|g| &g.name == name).map(|g| g.id);
            if found.is_none() {
                log::warn!("Unknown genre '{}' ignored", name);
            }
            found
        })
        .collect()
}

/// Replace the entry with the same id, or insert it keeping newest-first order
fn splice(contents: &mut Vec<Arc<Content>>, content: Arc<Content>) {
    if let Some(slot) = contents.iter_mut().find(|c| c.id == content.id) {
        *slot = content;
        return;
    }
    let position = contents
        .iter()
        .position(|c| c.created_at <= content.created_at)
        .unwrap_or(contents.len());
    contents.insert(position, content);
}

/// Keep the featured slot consistent with a refreshed entry
fn sync_featured(featured: &mut Option<Arc<Content>>, content: &Arc<Content>) {
    let same_entry = featured.as_ref().is_some_and(|f| f.id == content.id);
    if same_entry {
        *featured = content.featured.then(|| content.clone());
    }
}
