use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::env;
use url::Url;

use crate::models::SessionState;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const AUTH_TOKEN_PATH: &str = "auth/v1/token";
const AUTH_LOGOUT_PATH: &str = "auth/v1/logout";
const TOKEN_REFRESH_BUFFER_MINUTES: i64 = 5;

/// ---------------------------------------------------------------------------
/// Auth Service Configuration
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AuthConfig {
  pub base_url: String,
  pub anon_key: String,
}

impl AuthConfig {
  pub fn from_env() -> Result<Self, AuthError> {
    Ok(Self {
      base_url: env::var("FUEL_AUTH_URL")
        .map_err(|_| AuthError::MissingConfig("FUEL_AUTH_URL".into()))?,
      anon_key: env::var("FUEL_AUTH_ANON_KEY")
        .map_err(|_| AuthError::MissingConfig("FUEL_AUTH_ANON_KEY".into()))?,
    })
  }

  fn endpoint(&self, path: &str, grant_type: Option<&str>) -> Result<Url, AuthError> {
    let base = Url::parse(&self.base_url)
      .map_err(|e| AuthError::Auth(format!("Invalid auth URL: {}", e)))?;
    let mut url = base
      .join(path)
      .map_err(|e| AuthError::Auth(format!("Invalid auth endpoint: {}", e)))?;
    if let Some(grant) = grant_type {
      url.query_pairs_mut().append_pair("grant_type", grant);
    }
    Ok(url)
  }
}

/// ---------------------------------------------------------------------------
/// Token Data Structures
/// ---------------------------------------------------------------------------

/// Response from the auth service token endpoint
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
  pub access_token: String,
  pub refresh_token: String,
  /// Lifetime in seconds from issue
  pub expires_in: i64,
  pub user: Option<UserInfo>,
}

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
pub struct UserInfo {
  pub id: String,
  pub email: Option<String>,
}

/// Stored session tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTokens {
  pub access_token: String,
  pub refresh_token: String,
  pub expires_at: DateTime<Utc>,
  pub email: Option<String>,
}

impl SessionTokens {
  pub fn from_response(resp: TokenResponse) -> Self {
    Self {
      access_token: resp.access_token,
      refresh_token: resp.refresh_token,
      expires_at: Utc::now() + Duration::seconds(resp.expires_in),
      email: resp.user.and_then(|u| u.email),
    }
  }

  pub fn needs_refresh(&self) -> bool {
    let buffer = Duration::minutes(TOKEN_REFRESH_BUFFER_MINUTES);
    Utc::now() + buffer >= self.expires_at
  }
}

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
  #[error("Missing configuration: {0}")]
  MissingConfig(String),

  #[error("HTTP request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("Auth error: {0}")]
  Auth(String),

  #[error("Database error: {0}")]
  Database(String),

  #[error("Not signed in")]
  NotAuthenticated,
}

impl Serialize for AuthError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Password Sign-In
/// ---------------------------------------------------------------------------

pub async fn sign_in(
  config: &AuthConfig,
  email: &str,
  password: &str,
) -> Result<SessionTokens, AuthError> {
  let client = Client::new();
  let url = config.endpoint(AUTH_TOKEN_PATH, Some("password"))?;

  let response = client
    .post(url)
    .header("apikey", &config.anon_key)
    .json(&serde_json::json!({ "email": email, "password": password }))
    .send()
    .await?;

  if !response.status().is_success() {
    let error_text = response.text().await.unwrap_or_default();
    return Err(AuthError::Auth(format!("Sign-in failed: {}", error_text)));
  }

  let response_text = response.text().await?;
  let token_response: TokenResponse = serde_json::from_str(&response_text)
    .map_err(|e| AuthError::Auth(format!("Failed to parse sign-in response: {}", e)))?;

  Ok(SessionTokens::from_response(token_response))
}

/// ---------------------------------------------------------------------------
/// Token Refresh
/// ---------------------------------------------------------------------------

pub async fn refresh_session(
  config: &AuthConfig,
  refresh_token: &str,
) -> Result<SessionTokens, AuthError> {
  let client = Client::new();
  let url = config.endpoint(AUTH_TOKEN_PATH, Some("refresh_token"))?;

  let response = client
    .post(url)
    .header("apikey", &config.anon_key)
    .json(&serde_json::json!({ "refresh_token": refresh_token }))
    .send()
    .await?;

  if !response.status().is_success() {
    let error_text = response.text().await.unwrap_or_default();
    return Err(AuthError::Auth(format!("Refresh failed: {}", error_text)));
  }

  let response_text = response.text().await?;
  let token_response: TokenResponse = serde_json::from_str(&response_text)
    .map_err(|e| AuthError::Auth(format!("Failed to parse refresh response: {}", e)))?;

  Ok(SessionTokens::from_response(token_response))
}

/// ---------------------------------------------------------------------------
/// Sign-Out
/// ---------------------------------------------------------------------------

/// Revoke the session upstream. An already-expired token is fine; the local
/// cache is cleared either way by the caller.
pub async fn sign_out(config: &AuthConfig, access_token: &str) -> Result<(), AuthError> {
  let client = Client::new();
  let url = config.endpoint(AUTH_LOGOUT_PATH, None)?;

  let response = client
    .post(url)
    .header("apikey", &config.anon_key)
    .header("Authorization", format!("Bearer {}", access_token))
    .send()
    .await?;

  if !response.status().is_success() && response.status() != reqwest::StatusCode::UNAUTHORIZED {
    let error_text = response.text().await.unwrap_or_default();
    return Err(AuthError::Auth(format!("Sign-out failed: {}", error_text)));
  }

  Ok(())
}

/// ---------------------------------------------------------------------------
/// Session Cache (session_state table)
/// ---------------------------------------------------------------------------

pub async fn save_session(pool: &SqlitePool, tokens: &SessionTokens) -> Result<(), AuthError> {
  sqlx::query(
    r#"
    INSERT INTO session_state (id, email, access_token, refresh_token, token_expires_at, signed_in_at)
    VALUES (1, ?1, ?2, ?3, ?4, ?5)
    ON CONFLICT(id) DO UPDATE SET
      email = excluded.email,
      access_token = excluded.access_token,
      refresh_token = excluded.refresh_token,
      token_expires_at = excluded.token_expires_at,
      signed_in_at = excluded.signed_in_at
    "#,
  )
  .bind(tokens.email.as_deref())
  .bind(&tokens.access_token)
  .bind(&tokens.refresh_token)
  .bind(tokens.expires_at)
  .bind(Utc::now())
  .execute(pool)
  .await
  .map_err(|e| AuthError::Database(format!("Failed to save session: {}", e)))?;

  Ok(())
}

pub async fn load_session(pool: &SqlitePool) -> Result<Option<SessionState>, AuthError> {
  sqlx::query_as::<_, SessionState>("SELECT * FROM session_state WHERE id = 1")
    .fetch_optional(pool)
    .await
    .map_err(|e| AuthError::Database(format!("Failed to load session: {}", e)))
}

pub async fn clear_session(pool: &SqlitePool) -> Result<(), AuthError> {
  sqlx::query("DELETE FROM session_state WHERE id = 1")
    .execute(pool)
    .await
    .map_err(|e| AuthError::Database(format!("Failed to clear session: {}", e)))?;

  Ok(())
}

/// ---------------------------------------------------------------------------
/// Session Status (auth gate)
/// ---------------------------------------------------------------------------

/// What the startup gate needs to decide between dashboard and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthStatus {
  pub signed_in: bool,
  pub email: Option<String>,
  pub expires_at: Option<DateTime<Utc>>,
  pub needs_refresh: bool,
}

impl AuthStatus {
  pub fn from_state(state: Option<SessionState>) -> Self {
    match state {
      Some(state) if state.access_token.is_some() => {
        let needs_refresh = state
          .token_expires_at
          .map(|exp| Utc::now() + Duration::minutes(TOKEN_REFRESH_BUFFER_MINUTES) >= exp)
          .unwrap_or(true);
        Self {
          signed_in: true,
          email: state.email,
          expires_at: state.token_expires_at,
          needs_refresh,
        }
      }
      _ => Self {
        signed_in: false,
        email: None,
        expires_at: None,
        needs_refresh: false,
      },
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
