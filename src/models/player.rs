use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Player {
  pub id: i64,
  pub name: String,
  /// Used by the UEFA screen for g/kg -> grams conversion, not by the
  /// compliance engine.
  pub body_mass_kg: f64,
  pub created_at: Option<DateTime<Utc>>,
}
