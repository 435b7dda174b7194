// src/repositories/user_repository.rs

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::user::{Profile, User};
use crate::error::AppResult;
use crate::remote::{Query, RestClient};
use crate::repositories::text;

const USERS_TABLE: &str = "users";
const USER_SELECT: &str = "id, email, is_admin, profiles (id, name, avatar_url)";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Account record with its profiles. The record is created server-side
    /// when the auth user signs up.
    async fn get_with_profiles(&self, user_id: Uuid) -> AppResult<Option<User>>;
}

#[derive(Debug, Deserialize)]
struct UserRow {
    id: Uuid,
    email: Option<String>,
    is_admin: Option<bool>,
    #[serde(default)]
    profiles: Option<Vec<ProfileRow>>,
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    id: Uuid,
    name: Option<String>,
    avatar_url: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: text(row.email),
            is_admin: row.is_admin.unwrap_or(false),
            profiles: row
                .profiles
                .unwrap_or_default()
                .into_iter()
                .map(|p| Profile::new(p.id, text(p.name), text(p.avatar_url)))
                .collect(),
        }
    }
}

pub struct RestUserRepository {
    client: Arc<RestClient>,
}

impl RestUserRepository {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserRepository for RestUserRepository {
    async fn get_with_profiles(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let query = Query::new().select(USER_SELECT).eq("id", user_id);
        let row: Option<UserRow> = self.client.select_maybe_single(USERS_TABLE, &query).await?;
        Ok(row.map(User::from))
    }
}
