use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cached sign-in for the hosted auth service, single row with id = 1.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SessionState {
  pub id: i64,
  pub email: Option<String>,
  pub access_token: Option<String>,
  pub refresh_token: Option<String>,
  pub token_expires_at: Option<DateTime<Utc>>,
  pub signed_in_at: Option<DateTime<Utc>>,
}
