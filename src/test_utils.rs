//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Roster and week seeding
//! - Mock data factories
//! - Helper assertions

use crate::compliance::{DayIntake, MacroPair};
use crate::models::{DayLabel, NewFuelLog};
use chrono::NaiveDate;
use sqlx::SqlitePool;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  // Run migrations
  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Seed two players ("Player 1"/"Player 2" at 75 kg) and return their ids
pub async fn seed_test_players(pool: &SqlitePool) -> Vec<i64> {
  let mut ids = Vec::new();

  for name in ["Player 1", "Player 2"] {
    let result = sqlx::query("INSERT INTO players (name, body_mass_kg) VALUES (?1, 75)")
      .bind(name)
      .execute(pool)
      .await
      .expect("Failed to insert test player");

    ids.push(result.last_insert_rowid());
  }

  ids
}

/// Seed a two-entry game week for one player: CHO and PRO recorded, fat left
/// blank. Returns the inserted log ids.
pub async fn seed_test_week(pool: &SqlitePool, player_id: i64, game_week: i64) -> Vec<i64> {
  let days = [
    (NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(), DayLabel::MdMinus1),
    (NaiveDate::from_ymd_opt(2025, 8, 2).unwrap(), DayLabel::Md),
  ];

  let mut ids = Vec::new();

  for (log_date, day_label) in days {
    let log = NewFuelLog {
      player_id,
      game_week,
      log_date,
      day_label,
      cho_advised_g: Some(480.0),
      cho_actual_g: Some(455.0),
      pro_advised_g: Some(180.0),
      pro_actual_g: Some(190.0),
      fat_advised_g: None,
      fat_actual_g: None,
      notes: None,
    };
    ids.push(
      crate::fuel::insert_log(pool, &log)
        .await
        .expect("Failed to seed test week"),
    );
  }

  ids
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// Create a mock day intake for engine tests
pub fn mock_day_intake(cho_advised: f64, cho_actual: f64) -> DayIntake {
  DayIntake {
    cho: MacroPair::new(Some(cho_advised), Some(cho_actual)),
    pro: MacroPair::new(Some(180.0), Some(190.0)),
    fat: MacroPair::new(Some(95.0), Some(102.0)),
  }
}

/// Create a mock fuel log insert for a given date
pub fn mock_new_fuel_log(player_id: i64, log_date: NaiveDate) -> NewFuelLog {
  NewFuelLog {
    player_id,
    game_week: 1,
    log_date,
    day_label: DayLabel::MdMinus1,
    cho_advised_g: Some(480.0),
    cho_actual_g: Some(455.0),
    pro_advised_g: Some(180.0),
    pro_actual_g: Some(190.0),
    fat_advised_g: Some(95.0),
    fat_actual_g: Some(102.0),
    notes: Some("test entry".to_string()),
  }
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = f64::abs($left - $right);
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    // Verify key tables exist
    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('players', 'fuel_logs', 'uefa_guidance', 'session_state')"
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert!(tables.len() >= 4, "Expected at least 4 tables, got {}", tables.len());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_players_returns_ids() {
    let pool = setup_test_db().await;

    let ids = seed_test_players(&pool).await;
    assert_eq!(ids.len(), 2);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM players")
      .fetch_one(&pool)
      .await
      .expect("Failed to count players");

    assert_eq!(count, 2);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_week_inserts_entries() {
    let pool = setup_test_db().await;
    let players = seed_test_players(&pool).await;

    let ids = seed_test_week(&pool, players[0], 1).await;
    assert_eq!(ids.len(), 2);

    let count: i64 =
      sqlx::query_scalar("SELECT COUNT(*) FROM fuel_logs WHERE player_id = ?1 AND game_week = 1")
        .bind(players[0])
        .fetch_one(&pool)
        .await
        .expect("Failed to count fuel logs");

    assert_eq!(count, 2);

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_mock_factories_create_valid_data() {
    let intake = mock_day_intake(480.0, 455.0);
    assert_eq!(intake.cho.advised, Some(480.0));
    assert!(intake.cho.pct_off().is_some());

    let log = mock_new_fuel_log(1, NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
    assert_eq!(log.player_id, 1);
    assert_eq!(log.day_label, DayLabel::MdMinus1);
  }

  #[test]
  fn test_assert_approx_eq_macro() {
    assert_approx_eq!(0.1 + 0.2, 0.3, 1e-9);
  }
}
