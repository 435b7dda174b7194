// src/application/commands/admin_commands.rs
//
// Admin Command Handlers (content table, content/season/episode CRUD)
//
// RULES:
// - Accept DTOs
// - Call the content store
// - Return DTOs
// - Never contain business logic

use super::catalog_commands::ensure_catalog;
use super::{invalid_input, parse_id};
use crate::application::dto::{
    ContentDto, ContentPageDto, CreateContentDto, CreateEpisodeDto, CreateSeasonDto, EpisodeDto,
    SeasonDto, UpdateContentDto, UpdateEpisodeDto, UpdateSeasonDto,
};
use crate::application::error_handling::{CommandResult, ToErrorResponse};
use crate::application::state::AppState;
use crate::domain::content::{ContentChanges, NewContent};
use crate::services::catalog_views::{filter_admin_contents, paginate};

/// Filtered, paginated content table (pages are 1-based)
pub async fn list_admin_contents(
    state: &AppState,
    query: Option<String>,
    page: Option<usize>,
) -> CommandResult<ContentPageDto> {
    ensure_catalog(state).await?;
    let store = &state.content_store;

    let filtered = filter_admin_contents(&store.contents(), query.as_deref().unwrap_or_default());
    let page = paginate(filtered, page.unwrap_or(1), state.config.admin_page_size);
    Ok(ContentPageDto::from(&page))
}

// ============================================================================
// CONTENT
// ============================================================================

pub async fn create_content(state: &AppState, dto: CreateContentDto) -> CommandResult<ContentDto> {
    let content = NewContent::try_from(dto).map_err(invalid_input)?;

    let created = state
        .content_store
        .add_content(content)
        .await
        .to_error_response()?;
    Ok(ContentDto::from(created.as_ref()))
}

pub async fn update_content(state: &AppState, content_id: String, dto: UpdateContentDto) -> CommandResult<()> {
    let id = parse_id(&content_id, "content")?;
    let changes = ContentChanges::try_from(dto).map_err(invalid_input)?;

    state
        .content_store
        .update_content(id, changes)
        .await
        .to_error_response()
}

pub async fn delete_content(state: &AppState, content_id: String) -> CommandResult<()> {
    let id = parse_id(&content_id, "content")?;
    state.content_store.delete_content(id).await.to_error_response()
}

// ============================================================================
// SEASONS
// ============================================================================

pub async fn add_season(state: &AppState, content_id: String, dto: CreateSeasonDto) -> CommandResult<SeasonDto> {
    let id = parse_id(&content_id, "content")?;

    let season = state
        .content_store
        .add_season(id, dto.into())
        .await
        .to_error_response()?;
    Ok(SeasonDto::from(&season))
}

pub async fn update_season(state: &AppState, season_id: String, dto: UpdateSeasonDto) -> CommandResult<()> {
    let id = parse_id(&season_id, "season")?;
    state
        .content_store
        .update_season(id, dto.into())
        .await
        .to_error_response()
}

pub async fn delete_season(state: &AppState, season_id: String) -> CommandResult<()> {
    let id = parse_id(&season_id, "season")?;
    state.content_store.delete_season(id).await.to_error_response()
}

// ============================================================================
// EPISODES
// ============================================================================

pub async fn add_episode(state: &AppState, season_id: String, dto: CreateEpisodeDto) -> CommandResult<EpisodeDto> {
    let id = parse_id(&season_id, "season")?;

    let episode = state
        .content_store
        .add_episode(id, dto.into())
        .await
        .to_error_response()?;
    Ok(EpisodeDto::from(&episode))
}

pub async fn update_episode(state: &AppState, episode_id: String, dto: UpdateEpisodeDto) -> CommandResult<()> {
    let id = parse_id(&episode_id, "episode")?;
    state
        .content_store
        .update_episode(id, dto.into())
        .await
        .to_error_response()
}

pub async fn delete_episode(state: &AppState, episode_id: String) -> CommandResult<()> {
    let id = parse_id(&episode_id, "episode")?;
    state.content_store.delete_episode(id).await.to_error_response()
}

/// Reset the error shown by the admin pages
pub fn clear_content_error(state: &AppState) {
    state.content_store.clear_error();
}
