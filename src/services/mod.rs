// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod auth_store;
pub mod catalog_views;
pub mod content_store;

#[cfg(test)]
pub(crate) mod test_support;


pub use auth_store::{AuthPhase, AuthState, AuthStore};

pub use content_store::{ContentState, ContentStore};

pub use catalog_views::{
    browse_sections,
    filter_admin_contents,
    filter_search_results,
    more_like_this,
    paginate,
    search_suggestions,
    BrowseCategory,
    BrowseSection,
    ContentPage,
    SearchFilter,
};
