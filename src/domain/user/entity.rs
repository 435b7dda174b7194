use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An account with its viewing profiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub is_admin: bool,
    pub profiles: Vec<Profile>,
}

/// A named viewing persona under one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub avatar: String,
}

impl User {
    pub fn profile(&self, profile_id: Uuid) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == profile_id)
    }
}

impl Profile {
    pub fn new(id: Uuid, name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            avatar: avatar.into(),
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
