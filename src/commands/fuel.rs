//! Fuel Log and report commands
//!
//! Gram fields arrive as the raw form text; parsing is lenient (blank or
//! junk means "not recorded") so a half-filled day can still be saved.

use chrono::NaiveDate;
use std::sync::Arc;
use tauri::State;

use crate::compliance::parse_grams;
use crate::db::AppState;
use crate::fuel::{delete_log, insert_log, load_week_report, WeekReport};
use crate::models::{DayLabel, NewFuelLog};

/// Totals, badges and entry rows for one player/week. The Dashboard and
/// Weekly Report screens both render from this.
#[tauri::command]
pub async fn get_week_report(
  state: State<'_, Arc<AppState>>,
  player_id: i64,
  game_week: i64,
) -> Result<WeekReport, String> {
  load_week_report(&state.db, player_id, game_week).await
}

#[tauri::command]
#[allow(clippy::too_many_arguments)]
pub async fn add_fuel_log(
  state: State<'_, Arc<AppState>>,
  player_id: i64,
  game_week: i64,
  log_date: String,
  day_label: String,
  cho_advised: String,
  cho_actual: String,
  pro_advised: String,
  pro_actual: String,
  fat_advised: String,
  fat_actual: String,
  notes: String,
) -> Result<i64, String> {
  if game_week < 1 {
    return Err(format!("Game week must be positive, got {}", game_week));
  }

  let log_date = NaiveDate::parse_from_str(&log_date, "%Y-%m-%d")
    .map_err(|e| format!("Invalid log date '{}': {}", log_date, e))?;
  let day_label: DayLabel = day_label.parse()?;

  let notes = notes.trim();
  let log = NewFuelLog {
    player_id,
    game_week,
    log_date,
    day_label,
    cho_advised_g: parse_grams(&cho_advised),
    cho_actual_g: parse_grams(&cho_actual),
    pro_advised_g: parse_grams(&pro_advised),
    pro_actual_g: parse_grams(&pro_actual),
    fat_advised_g: parse_grams(&fat_advised),
    fat_actual_g: parse_grams(&fat_actual),
    notes: if notes.is_empty() { None } else { Some(notes.to_string()) },
  };

  insert_log(&state.db, &log).await
}

#[tauri::command]
pub async fn delete_fuel_log(
  state: State<'_, Arc<AppState>>,
  id: i64,
) -> Result<(), String> {
  delete_log(&state.db, id).await
}

/// Day labels in form-select order, so the frontend doesn't hardcode them.
#[tauri::command]
pub fn get_day_labels() -> Vec<&'static str> {
  DayLabel::ALL.iter().map(|d| d.as_str()).collect()
}
