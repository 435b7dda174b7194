// src/services/auth_store.rs
//
// Session store: sign-in/out, registration, password flows, profile choice
//
// STATE MACHINE:
//   Anonymous -> Authenticated (no profile) -> ProfileSelected
//   Admin accounts go straight to ProfileSelected with the configured admin profile.
//   logout returns every state to Anonymous.
//
// CRITICAL RULES:
// - Failures are recorded on `error` AND returned
// - logout clears the session locally even when the remote sign-out fails
// - The state lock is never held across an await

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::config::AdminProfileConfig;
use crate::domain::user::{Profile, User};
use crate::domain::DomainError;
use crate::error::{AppError, AppResult};
use crate::integrations::AuthGateway;
use crate::repositories::UserRepository;

pub const ACCOUNT_EXISTS_MESSAGE: &str =
    "An account with this email already exists. Please sign in instead.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthPhase {
    Anonymous,
    Authenticated,
    ProfileSelected,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub current_profile: Option<Profile>,
    pub has_selected_profile: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    pub fn phase(&self) -> AuthPhase {
        match (self.is_authenticated, self.has_selected_profile) {
            (false, _) => AuthPhase::Anonymous,
            (true, false) => AuthPhase::Authenticated,
            (true, true) => AuthPhase::ProfileSelected,
        }
    }

    fn sign_out(&mut self) {
        self.user = None;
        self.is_authenticated = false;
        self.current_profile = None;
        self.has_selected_profile = false;
    }
}

pub struct AuthStore {
    gateway: Arc<dyn AuthGateway>,
    users: Arc<dyn UserRepository>,
    admin_profile: AdminProfileConfig,
    state: Mutex<AuthState>,
}

impl AuthStore {
    pub fn new(
        gateway: Arc<dyn AuthGateway>,
        users: Arc<dyn UserRepository>,
        admin_profile: AdminProfileConfig,
    ) -> Self {
        Self {
            gateway,
            users,
            admin_profile,
            state: Mutex::new(AuthState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AuthState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn snapshot(&self) -> AuthState {
        self.lock().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().is_authenticated
    }

    pub fn user(&self) -> Option<User> {
        self.lock().user.clone()
    }

    pub fn current_profile(&self) -> Option<Profile> {
        self.lock().current_profile.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn clear_error(&self) {
        self.lock().error = None;
    }

    /// Profile selected automatically for admin accounts
    pub fn admin_profile(&self) -> Profile {
        Profile::new(
            Uuid::nil(),
            self.admin_profile.name.clone(),
            self.admin_profile.avatar.clone(),
        )
    }

    fn begin(&self) {
        let mut state = self.lock();
        state.is_loading = true;
        state.error = None;
    }

    fn finish(&self, result: AppResult<()>) -> AppResult<()> {
        let mut state = self.lock();
        state.is_loading = false;
        if let Err(e) = &result {
            state.error = Some(e.to_string());
        }
        result
    }

    // ========================================================================
    // SIGN-IN / REGISTRATION
    // ========================================================================

    pub async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        self.begin();

        let result = match self.gateway.sign_in_with_password(email, password).await {
            Ok(session) => self.load_user_or_sign_out(session.user_id).await,
            Err(e) => Err(e),
        };

        self.settle("log in", result)
    }

    pub async fn register(&self, email: &str, password: &str) -> AppResult<User> {
        self.begin();

        let result = match self.gateway.sign_up(email, password).await {
            Ok(Some(session)) => self.load_user_or_sign_out(session.user_id).await,
            Ok(None) => Err(AppError::Other("Registration failed".to_string())),
            Err(e) => Err(reword_registration_error(e)),
        };

        self.settle("register", result)
    }

    async fn load_user(&self, user_id: Uuid) -> AppResult<User> {
        self.users
            .get_with_profiles(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User data"))
    }

    /// A session whose account record cannot be loaded is ended remotely as
    /// well, so later calls do not run with its token.
    async fn load_user_or_sign_out(&self, user_id: Uuid) -> AppResult<User> {
        let result = self.load_user(user_id).await;
        if result.is_err() {
            if let Err(e) = self.gateway.sign_out().await {
                log::warn!("Failed to end session of user {}: {}", user_id, e);
            }
        }
        result
    }

    /// Apply the outcome of login/register to the session state
    fn settle(&self, action: &str, result: AppResult<User>) -> AppResult<User> {
        let admin_profile = self.admin_profile();
        let mut state = self.lock();
        state.is_loading = false;

        match result {
            Ok(user) => {
                log::info!("User {} signed in (admin: {})", user.id, user.is_admin);
                state.current_profile = user.is_admin.then_some(admin_profile);
                state.has_selected_profile = user.is_admin;
                state.is_authenticated = true;
                state.user = Some(user.clone());
                state.error = None;
                Ok(user)
            }
            Err(e) => {
                log::warn!("Failed to {}: {}", action, e);
                state.sign_out();
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    // ========================================================================
    // SIGN-OUT
    // ========================================================================

    pub async fn logout(&self) -> AppResult<()> {
        let result = self.gateway.sign_out().await;

        let mut state = self.lock();
        state.sign_out();
        match &result {
            Ok(()) => state.error = None,
            Err(e) => {
                log::warn!("Remote sign-out failed, session cleared locally: {}", e);
                state.error = Some(e.to_string());
            }
        }
        result
    }

    // ========================================================================
    // PROFILES
    // ========================================================================

    pub fn select_profile(&self, profile: Profile) -> AppResult<()> {
        let mut state = self.lock();
        if !state.is_authenticated {
            return Err(DomainError::InvalidStateTransition(
                "Cannot select a profile while signed out".to_string(),
            )
            .into());
        }

        log::debug!("Selected profile {}", profile);
        state.current_profile = Some(profile);
        state.has_selected_profile = true;
        Ok(())
    }

    /// Select one of the signed-in user's profiles (or the admin profile)
    pub fn select_profile_by_id(&self, profile_id: Uuid) -> AppResult<Profile> {
        let admin_profile = self.admin_profile();
        let profile = {
            let state = self.lock();
            let user = state.user.as_ref().ok_or_else(|| {
                AppError::from(DomainError::InvalidStateTransition(
                    "Cannot select a profile while signed out".to_string(),
                ))
            })?;

            match user.profile(profile_id) {
                Some(profile) => profile.clone(),
                None if user.is_admin && profile_id == admin_profile.id => admin_profile,
                None => return Err(AppError::not_found(format!("Profile {}", profile_id))),
            }
        };

        self.select_profile(profile.clone())?;
        Ok(profile)
    }

    // ========================================================================
    // PASSWORDS
    // ========================================================================

    pub async fn reset_password(&self, email: &str) -> AppResult<()> {
        self.begin();
        let result = self.gateway.reset_password_for_email(email).await;
        self.finish(result)
    }

    pub async fn update_password(&self, new_password: &str) -> AppResult<()> {
        self.begin();
        let result = self.gateway.update_password(new_password).await;
        self.finish(result)
    }
}

fn reword_registration_error(error: AppError) -> AppError {
    match error {
        AppError::Remote(mut remote) if remote.message.contains("already registered") => {
            remote.message = ACCOUNT_EXISTS_MESSAGE.to_string();
            AppError::Remote(remote)
        }
        other => other,
    }
}
