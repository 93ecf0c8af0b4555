pub mod fuel;
pub mod guidance;
pub mod session;

use crate::db::AppState;
use crate::models::Player;
use std::sync::Arc;
use tauri::State;

#[tauri::command]
pub async fn get_players(
  state: State<'_, Arc<AppState>>,
) -> Result<Vec<Player>, String> {
  sqlx::query_as::<_, Player>(
    "SELECT id, name, body_mass_kg, created_at FROM players ORDER BY created_at"
  )
  .fetch_all(&state.db)
  .await
  .map_err(|e| format!("Failed to fetch players: {}", e))
}

/// Partial in-place edit from the Players screen; unset fields keep their
/// current value.
#[tauri::command]
pub async fn update_player(
  state: State<'_, Arc<AppState>>,
  id: i64,
  name: Option<String>,
  body_mass_kg: Option<f64>,
) -> Result<(), String> {
  sqlx::query(
    r#"
    UPDATE players SET
      name = COALESCE(?1, name),
      body_mass_kg = COALESCE(?2, body_mass_kg)
    WHERE id = ?3
    "#,
  )
  .bind(name)
  .bind(body_mass_kg)
  .bind(id)
  .execute(&state.db)
  .await
  .map_err(|e| format!("Failed to update player {}: {}", id, e))?;

  Ok(())
}

/// First-run helper: create "Player 1"/"Player 2" at 75 kg iff the roster is
/// empty, then return the roster.
#[tauri::command]
pub async fn seed_players(
  state: State<'_, Arc<AppState>>,
) -> Result<Vec<Player>, String> {
  let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM players")
    .fetch_one(&state.db)
    .await
    .map_err(|e| format!("Failed to count players: {}", e))?;

  if count == 0 {
    for name in ["Player 1", "Player 2"] {
      sqlx::query("INSERT INTO players (name, body_mass_kg) VALUES (?1, 75)")
        .bind(name)
        .execute(&state.db)
        .await
        .map_err(|e| format!("Failed to seed players: {}", e))?;
    }
  }

  get_players(state).await
}
