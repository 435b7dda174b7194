// src/integrations/auth/client.rs
//
// Hosted auth integration
//
// ARCHITECTURE:
// - Password sign-in, sign-up, sign-out, recovery e-mail, password change
// - Shares the RestClient so the session token it obtains is used by every
//   later table call
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN: it knows nothing about profiles
// - Sign-out always drops the local token, even when the remote call fails

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, AppResult, RemoteError};
use crate::remote::RestClient;

/// Result of a successful authentication
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub user_id: Uuid,
    pub email: Option<String>,
    /// Absent when sign-up still waits for e-mail confirmation
    pub access_token: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> AppResult<AuthSession>;

    /// `None` when the service accepted the request but returned no user
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<Option<AuthSession>>;

    async fn sign_out(&self) -> AppResult<()>;

    async fn reset_password_for_email(&self, email: &str) -> AppResult<()>;

    async fn update_password(&self, new_password: &str) -> AppResult<()>;
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: Uuid,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

/// Sign-up answers with a session, or with the bare user when
/// confirmation is pending
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(TokenResponse),
    User(AuthUser),
    Empty(serde_json::Value),
}

pub struct RestAuthGateway {
    client: Arc<RestClient>,
}

impl RestAuthGateway {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }

    fn start_session(&self, token: TokenResponse) -> AuthSession {
        self.client.set_access_token(Some(token.access_token.clone()));
        AuthSession {
            user_id: token.user.id,
            email: token.user.email,
            access_token: Some(token.access_token),
        }
    }
}

#[async_trait]
impl AuthGateway for RestAuthGateway {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let request = self
            .client
            .request(Method::POST, &self.client.auth_url("token"))
            .query(&[("grant_type", "password")])
            .json(&Credentials { email, password });

        let response = self.client.execute(request).await?;
        let token: TokenResponse = response.json().await?;

        log::debug!("Signed in user {}", token.user.id);
        Ok(self.start_session(token))
    }

    async fn sign_up(&self, email: &str, password: &str) -> AppResult<Option<AuthSession>> {
        let request = self
            .client
            .request(Method::POST, &self.client.auth_url("signup"))
            .json(&Credentials { email, password });

        let response = self.client.execute(request).await?;
        let body: SignUpResponse = response.json().await?;

        Ok(match body {
            SignUpResponse::Session(token) => Some(self.start_session(token)),
            SignUpResponse::User(user) => {
                log::info!("User {} registered, confirmation pending", user.id);
                Some(AuthSession {
                    user_id: user.id,
                    email: user.email,
                    access_token: None,
                })
            }
            SignUpResponse::Empty(_) => None,
        })
    }

    async fn sign_out(&self) -> AppResult<()> {
        let result = if self.client.has_session() {
            let request = self
                .client
                .request(Method::POST, &self.client.auth_url("logout"));
            self.client.execute(request).await.map(|_| ())
        } else {
            Ok(())
        };

        self.client.set_access_token(None);
        result
    }

    async fn reset_password_for_email(&self, email: &str) -> AppResult<()> {
        let request = self
            .client
            .request(Method::POST, &self.client.auth_url("recover"))
            .json(&serde_json::json!({ "email": email }));

        self.client.execute(request).await?;
        Ok(())
    }

    async fn update_password(&self, new_password: &str) -> AppResult<()> {
        if !self.client.has_session() {
            return Err(AppError::Remote(RemoteError::new(401, "Auth session missing!")));
        }

        let request = self
            .client
            .request(Method::PUT, &self.client.auth_url("user"))
            .json(&serde_json::json!({ "password": new_password }));

        self.client.execute(request).await?;
        Ok(())
    }
}
