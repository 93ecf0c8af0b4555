//! Session commands for the hosted auth service
//!
//! The frontend gate calls `auth_get_status` on startup and routes to the
//! login view when no session is cached.

use std::sync::Arc;
use tauri::State;

use crate::db::AppState;
use crate::session::{
  clear_session, load_session, refresh_session, save_session, sign_in, sign_out, AuthConfig,
  AuthError, AuthStatus,
};

#[tauri::command]
pub async fn auth_sign_in(
  state: State<'_, Arc<AppState>>,
  email: String,
  password: String,
) -> Result<AuthStatus, AuthError> {
  let config = AuthConfig::from_env()?;
  let tokens = sign_in(&config, &email, &password).await?;
  save_session(&state.db, &tokens).await?;

  Ok(AuthStatus::from_state(load_session(&state.db).await?))
}

#[tauri::command]
pub async fn auth_get_status(
  state: State<'_, Arc<AppState>>,
) -> Result<AuthStatus, AuthError> {
  Ok(AuthStatus::from_state(load_session(&state.db).await?))
}

#[tauri::command]
pub async fn auth_refresh_session(
  state: State<'_, Arc<AppState>>,
) -> Result<AuthStatus, AuthError> {
  let config = AuthConfig::from_env()?;

  let current = load_session(&state.db)
    .await?
    .ok_or(AuthError::NotAuthenticated)?;
  let refresh_token = current.refresh_token.ok_or(AuthError::NotAuthenticated)?;

  let tokens = refresh_session(&config, &refresh_token).await?;
  save_session(&state.db, &tokens).await?;

  Ok(AuthStatus::from_state(load_session(&state.db).await?))
}

/// Revoke upstream when possible, always drop the local cache.
#[tauri::command]
pub async fn auth_sign_out(
  state: State<'_, Arc<AppState>>,
) -> Result<(), AuthError> {
  if let Some(session) = load_session(&state.db).await? {
    if let (Ok(config), Some(token)) = (AuthConfig::from_env(), session.access_token) {
      if let Err(e) = sign_out(&config, &token).await {
        eprintln!("Upstream sign-out failed (clearing local session anyway): {}", e);
      }
    }
  }

  clear_session(&state.db).await
}
