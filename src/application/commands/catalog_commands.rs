// src/application/commands/catalog_commands.rs
//
// Catalog Command Handlers (browse, search, title detail)
//
// RULES:
// - Accept DTOs / raw params
// - Call the content store and catalog views
// - Return DTOs
// - Never contain business logic

use std::str::FromStr;

use super::{invalid_input, parse_id};
use crate::application::dto::{
    content_dtos, BrowsePageDto, BrowseSectionDto, ContentDto, SearchResultsDto, TitleDetailDto,
};
use crate::application::error_handling::{CommandResult, ToErrorResponse};
use crate::application::state::AppState;
use crate::services::catalog_views::{
    browse_sections, filter_search_results, more_like_this, search_suggestions, BrowseCategory,
    SearchFilter,
};

/// Catalog snapshot, fetched once unless a full fetch already completed
pub(crate) async fn ensure_catalog(state: &AppState) -> CommandResult<()> {
    if !state.content_store.is_loaded() {
        state.content_store.fetch_contents().await.to_error_response()?;
    }
    Ok(())
}

/// Browse page: featured banner plus content rows for an optional category
pub async fn get_browse_page(state: &AppState, category: Option<String>) -> CommandResult<BrowsePageDto> {
    let category = BrowseCategory::from_param(category.as_deref());
    let store = &state.content_store;

    let (contents, featured) = tokio::join!(store.fetch_contents(), store.fetch_featured());
    let contents = contents.to_error_response()?;

    let sections = browse_sections(&contents, category);
    log::debug!("Browse page ({:?}): {} rows", category, sections.len());

    Ok(BrowsePageDto {
        featured: featured.as_deref().map(ContentDto::from),
        sections: sections.iter().map(BrowseSectionDto::from).collect(),
    })
}

/// Title search with a type filter (`all`, `movies`, `series`)
pub async fn search_catalog(
    state: &AppState,
    query: String,
    filter: Option<String>,
) -> CommandResult<SearchResultsDto> {
    let filter = filter
        .as_deref()
        .map(SearchFilter::from_str)
        .transpose()
        .map_err(invalid_input)?
        .unwrap_or_default();

    ensure_catalog(state).await?;

    let results = state
        .content_store
        .search_contents(&query)
        .await
        .to_error_response()?;
    let results = filter_search_results(results, filter);

    let suggestions = if query.trim().is_empty() {
        content_dtos(&search_suggestions(&state.content_store.contents()))
    } else {
        Vec::new()
    };

    Ok(SearchResultsDto {
        query,
        filter: filter.as_str().to_string(),
        results: results.iter().map(ContentDto::from).collect(),
        suggestions,
    })
}

/// One title with its "more like this" row; unknown ids yield `None`
pub async fn get_title_detail(state: &AppState, content_id: String) -> CommandResult<Option<TitleDetailDto>> {
    let id = parse_id(&content_id, "content")?;
    ensure_catalog(state).await?;

    let store = &state.content_store;
    let Some(content) = store.get_content_by_id(id) else {
        return Ok(None);
    };

    let similar = more_like_this(&store.contents(), &content);
    Ok(Some(TitleDetailDto {
        content: ContentDto::from(content.as_ref()),
        more_like_this: content_dtos(&similar),
    }))
}

/// Cached entries carrying a genre (case-insensitive)
pub async fn get_contents_by_genre(state: &AppState, genre: String) -> CommandResult<Vec<ContentDto>> {
    ensure_catalog(state).await?;
    Ok(content_dtos(&state.content_store.get_contents_by_genre(&genre)))
}
