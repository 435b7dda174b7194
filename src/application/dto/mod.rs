// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations (camelCase, string ids)
// - DTOs NEVER leak domain invariants
// - Output DTOs convert FROM domain entities; input DTOs are parsed by commands

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::content::{
    Content, ContentChanges, ContentType, Episode, EpisodeChanges, NewContent, NewEpisode,
    NewSeason, Season, SeasonChanges,
};
use crate::domain::user::{Profile, User};
use crate::domain::DomainError;
use crate::services::{AuthPhase, AuthState, BrowseSection, ContentPage};

// ============================================================================
// CATALOG DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDto {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub genre: Vec<String>,
    pub release_year: i32,
    pub maturity_rating: String,
    pub duration: String,
    pub poster_image: String,
    pub backdrop_image: String,
    pub trailer_url: String,
    pub featured: bool,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasons: Option<Vec<SeasonDto>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonDto {
    pub id: String,
    pub series_id: String,
    pub season_number: u32,
    pub title: String,
    pub description: String,
    pub episodes: Vec<EpisodeDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeDto {
    pub id: String,
    pub season_id: String,
    pub episode_number: u32,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub thumbnail: String,
    pub video_url: String,
}

impl From<&Content> for ContentDto {
    fn from(content: &Content) -> Self {
        Self {
            id: content.id.to_string(),
            title: content.title.clone(),
            description: content.description.clone(),
            kind: content.kind.to_string(),
            genre: content.genre.clone(),
            release_year: content.release_year,
            maturity_rating: content.maturity_rating.clone(),
            duration: content.duration.clone(),
            poster_image: content.poster_image.clone(),
            backdrop_image: content.backdrop_image.clone(),
            trailer_url: content.trailer_url.clone(),
            featured: content.featured,
            created_at: content.created_at.to_rfc3339(),
            seasons: content
                .seasons
                .as_ref()
                .map(|seasons| seasons.iter().map(SeasonDto::from).collect()),
        }
    }
}

impl From<&Season> for SeasonDto {
    fn from(season: &Season) -> Self {
        Self {
            id: season.id.to_string(),
            series_id: season.series_id.to_string(),
            season_number: season.season_number,
            title: season.title.clone(),
            description: season.description.clone(),
            episodes: season.episodes.iter().map(EpisodeDto::from).collect(),
        }
    }
}

impl From<&Episode> for EpisodeDto {
    fn from(episode: &Episode) -> Self {
        Self {
            id: episode.id.to_string(),
            season_id: episode.season_id.to_string(),
            episode_number: episode.episode_number,
            title: episode.title.clone(),
            description: episode.description.clone(),
            duration: episode.duration.clone(),
            thumbnail: episode.thumbnail.clone(),
            video_url: episode.video_url.clone(),
        }
    }
}

/// Convert any list of (shared) entries
pub fn content_dtos<C: AsRef<Content>>(contents: &[C]) -> Vec<ContentDto> {
    contents.iter().map(|c| ContentDto::from(c.as_ref())).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseSectionDto {
    pub title: String,
    pub contents: Vec<ContentDto>,
}

impl From<&BrowseSection> for BrowseSectionDto {
    fn from(section: &BrowseSection) -> Self {
        Self {
            title: section.title.clone(),
            contents: content_dtos(&section.contents),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowsePageDto {
    pub featured: Option<ContentDto>,
    pub sections: Vec<BrowseSectionDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultsDto {
    pub query: String,
    pub filter: String,
    pub results: Vec<ContentDto>,
    /// Filled while the query is empty
    pub suggestions: Vec<ContentDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleDetailDto {
    pub content: ContentDto,
    pub more_like_this: Vec<ContentDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPageDto {
    pub items: Vec<ContentDto>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl From<&ContentPage> for ContentPageDto {
    fn from(page: &ContentPage) -> Self {
        Self {
            items: content_dtos(&page.items),
            page: page.page,
            total_pages: page.total_pages,
            total_items: page.total_items,
        }
    }
}

// ============================================================================
// CATALOG INPUT DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContentDto {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub genre: Vec<String>,
    pub release_year: i32,
    #[serde(default)]
    pub maturity_rating: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub poster_image: String,
    #[serde(default)]
    pub backdrop_image: String,
    #[serde(default)]
    pub trailer_url: String,
    #[serde(default)]
    pub featured: bool,
}

impl TryFrom<CreateContentDto> for NewContent {
    type Error = DomainError;

    fn try_from(dto: CreateContentDto) -> Result<Self, Self::Error> {
        Ok(Self {
            title: dto.title,
            description: dto.description,
            kind: ContentType::from_str(&dto.kind)?,
            genre: dto.genre,
            release_year: dto.release_year,
            maturity_rating: dto.maturity_rating,
            duration: dto.duration,
            poster_image: dto.poster_image,
            backdrop_image: dto.backdrop_image,
            trailer_url: dto.trailer_url,
            featured: dto.featured,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateContentDto {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub genre: Option<Vec<String>>,
    pub release_year: Option<i32>,
    pub maturity_rating: Option<String>,
    pub duration: Option<String>,
    pub poster_image: Option<String>,
    pub backdrop_image: Option<String>,
    pub trailer_url: Option<String>,
    pub featured: Option<bool>,
}

impl TryFrom<UpdateContentDto> for ContentChanges {
    type Error = DomainError;

    fn try_from(dto: UpdateContentDto) -> Result<Self, Self::Error> {
        Ok(Self {
            title: dto.title,
            description: dto.description,
            kind: dto.kind.as_deref().map(ContentType::from_str).transpose()?,
            genre: dto.genre,
            release_year: dto.release_year,
            maturity_rating: dto.maturity_rating,
            duration: dto.duration,
            poster_image: dto.poster_image,
            backdrop_image: dto.backdrop_image,
            trailer_url: dto.trailer_url,
            featured: dto.featured,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSeasonDto {
    pub season_number: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl From<CreateSeasonDto> for NewSeason {
    fn from(dto: CreateSeasonDto) -> Self {
        Self {
            season_number: dto.season_number,
            title: dto.title,
            description: dto.description,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateSeasonDto {
    pub season_number: Option<u32>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl From<UpdateSeasonDto> for SeasonChanges {
    fn from(dto: UpdateSeasonDto) -> Self {
        Self {
            season_number: dto.season_number,
            title: dto.title,
            description: dto.description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEpisodeDto {
    pub episode_number: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub video_url: String,
}

impl From<CreateEpisodeDto> for NewEpisode {
    fn from(dto: CreateEpisodeDto) -> Self {
        Self {
            episode_number: dto.episode_number,
            title: dto.title,
            description: dto.description,
            duration: dto.duration,
            thumbnail: dto.thumbnail,
            video_url: dto.video_url,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateEpisodeDto {
    pub episode_number: Option<u32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub thumbnail: Option<String>,
    pub video_url: Option<String>,
}

impl From<UpdateEpisodeDto> for EpisodeChanges {
    fn from(dto: UpdateEpisodeDto) -> Self {
        Self {
            episode_number: dto.episode_number,
            title: dto.title,
            description: dto.description,
            duration: dto.duration,
            thumbnail: dto.thumbnail,
            video_url: dto.video_url,
        }
    }
}

// ============================================================================
// ACCOUNT DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsDto {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDto {
    pub id: String,
    pub name: String,
    pub avatar: String,
}

impl From<&Profile> for ProfileDto {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id.to_string(),
            name: profile.name.clone(),
            avatar: profile.avatar.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub is_admin: bool,
    pub profiles: Vec<ProfileDto>,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            is_admin: user.is_admin,
            profiles: user.profiles.iter().map(ProfileDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub user: Option<UserDto>,
    pub is_authenticated: bool,
    pub current_profile: Option<ProfileDto>,
    pub has_selected_profile: bool,
    pub is_loading: bool,
    pub error: Option<String>,
    pub phase: AuthPhase,
}

impl From<&AuthState> for SessionDto {
    fn from(state: &AuthState) -> Self {
        Self {
            user: state.user.as_ref().map(UserDto::from),
            is_authenticated: state.is_authenticated,
            current_profile: state.current_profile.as_ref().map(ProfileDto::from),
            has_selected_profile: state.has_selected_profile,
            is_loading: state.is_loading,
            error: state.error.clone(),
            phase: state.phase(),
        }
    }
}
