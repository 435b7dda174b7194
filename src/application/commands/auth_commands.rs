// src/application/commands/auth_commands.rs
//
// Account Command Handlers
//
// RULES:
// - Accept DTOs
// - Call the auth store
// - Return the resulting session snapshot
// - Never contain business logic

use super::parse_id;
use crate::application::dto::{CredentialsDto, ProfileDto, SessionDto};
use crate::application::error_handling::{CommandResult, ErrorResponse, ToErrorResponse};
use crate::application::state::AppState;

/// Current session state
pub fn get_session(state: &AppState) -> SessionDto {
    SessionDto::from(&state.auth_store.snapshot())
}

pub async fn login(state: &AppState, dto: CredentialsDto) -> CommandResult<SessionDto> {
    state
        .auth_store
        .login(dto.email.trim(), &dto.password)
        .await
        .to_error_response()?;
    Ok(get_session(state))
}

pub async fn register(state: &AppState, dto: CredentialsDto) -> CommandResult<SessionDto> {
    if dto.password.is_empty() {
        return Err(ErrorResponse::validation("Password cannot be empty").to_json());
    }

    state
        .auth_store
        .register(dto.email.trim(), &dto.password)
        .await
        .to_error_response()?;
    Ok(get_session(state))
}

/// Sign out. The local session is cleared even when this returns an error.
pub async fn logout(state: &AppState) -> CommandResult<SessionDto> {
    state.auth_store.logout().await.to_error_response()?;
    Ok(get_session(state))
}

pub async fn select_profile(state: &AppState, profile_id: String) -> CommandResult<ProfileDto> {
    let id = parse_id(&profile_id, "profile")?;

    let profile = state
        .auth_store
        .select_profile_by_id(id)
        .to_error_response()?;
    Ok(ProfileDto::from(&profile))
}

pub async fn reset_password(state: &AppState, email: String) -> CommandResult<()> {
    state
        .auth_store
        .reset_password(email.trim())
        .await
        .to_error_response()
}

pub async fn update_password(state: &AppState, new_password: String) -> CommandResult<()> {
    if new_password.is_empty() {
        return Err(ErrorResponse::validation("Password cannot be empty").to_json());
    }

    state
        .auth_store
        .update_password(&new_password)
        .await
        .to_error_response()
}

pub fn clear_auth_error(state: &AppState) {
    state.auth_store.clear_error();
}
