//! UEFA reference screen commands

use std::sync::Arc;
use tauri::State;

use crate::db::AppState;
use crate::guidance::{load_guidance_lines, GuidanceLine};

/// Guidance rows with g/kg ranges and, when a player is selected, the
/// converted gram ranges for their body mass.
#[tauri::command]
pub async fn get_uefa_guidance(
    state: State<'_, Arc<AppState>>,
    player_id: Option<i64>,
) -> Result<Vec<GuidanceLine>, String> {
    let body_mass_kg = match player_id {
        Some(id) => sqlx::query_scalar::<_, f64>("SELECT body_mass_kg FROM players WHERE id = ?1")
            .bind(id)
            .fetch_optional(&state.db)
            .await
            .map_err(|e| format!("Failed to fetch player {}: {}", id, e))?,
        None => None,
    };

    load_guidance_lines(&state.db, body_mass_kg).await
}
