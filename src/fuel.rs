//! Fuel log storage and weekly report assembly
//!
//! One game week = the set of fuel_logs rows for (player, game_week),
//! ordered by date. The Dashboard and Weekly Report screens both consume
//! the same `WeekReport`: per-macro totals with compliance badges plus the
//! entry rows with per-macro % off and a row tone.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::compliance::{
    aggregate_week, format_pct, ComplianceStatus, Macro, WeekMacroTotals,
};
use crate::models::{FuelLog, NewFuelLog};

// ---------------------------------------------------------------------------
/// Database Operations
// ---------------------------------------------------------------------------

/// Load one player's entries for a game week, oldest date first.
pub async fn load_week_logs(
    pool: &SqlitePool,
    player_id: i64,
    game_week: i64,
) -> Result<Vec<FuelLog>, String> {
    sqlx::query_as::<_, FuelLog>(
        r#"
        SELECT id, player_id, game_week, log_date, day_label,
               cho_advised_g, cho_actual_g, pro_advised_g, pro_actual_g,
               fat_advised_g, fat_actual_g, notes, created_at
        FROM fuel_logs
        WHERE player_id = ?1 AND game_week = ?2
        ORDER BY log_date ASC
        "#,
    )
    .bind(player_id)
    .bind(game_week)
    .fetch_all(pool)
    .await
    .map_err(|e| format!("Failed to load fuel logs: {}", e))
}

/// Insert a new entry, returning its id. Edits are add-new + delete-old;
/// rows are never updated in place.
pub async fn insert_log(pool: &SqlitePool, log: &NewFuelLog) -> Result<i64, String> {
    let result = sqlx::query(
        r#"
        INSERT INTO fuel_logs (
            player_id, game_week, log_date, day_label,
            cho_advised_g, cho_actual_g, pro_advised_g, pro_actual_g,
            fat_advised_g, fat_actual_g, notes
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
        "#,
    )
    .bind(log.player_id)
    .bind(log.game_week)
    .bind(log.log_date)
    .bind(log.day_label.as_str())
    .bind(log.cho_advised_g)
    .bind(log.cho_actual_g)
    .bind(log.pro_advised_g)
    .bind(log.pro_actual_g)
    .bind(log.fat_advised_g)
    .bind(log.fat_actual_g)
    .bind(log.notes.as_deref())
    .execute(pool)
    .await
    .map_err(|e| format!("Failed to insert fuel log: {}", e))?;

    Ok(result.last_insert_rowid())
}

/// Delete one entry by id.
pub async fn delete_log(pool: &SqlitePool, id: i64) -> Result<(), String> {
    sqlx::query("DELETE FROM fuel_logs WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| format!("Failed to delete fuel log {}: {}", id, e))?;

    Ok(())
}

// ---------------------------------------------------------------------------
/// Week Report Views
// ---------------------------------------------------------------------------

/// Totals + compliance badge for one macro over the week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroSummary {
    pub key: Macro,
    pub label: String,
    pub advised_total: f64,
    pub actual_total: f64,
    pub pct_off: Option<f64>,
    pub pct_text: String,
    pub status_label: String,
    pub status_tone: String,
}

impl MacroSummary {
    fn build(m: Macro, totals: WeekMacroTotals) -> Self {
        let status = ComplianceStatus::from_pct_off(totals.pct_off);
        Self {
            key: m,
            label: m.display_label().to_string(),
            advised_total: totals.advised_total,
            actual_total: totals.actual_total,
            pct_off: totals.pct_off,
            pct_text: format_pct(totals.pct_off),
            status_label: status.label().to_string(),
            status_tone: status.tone().as_str().to_string(),
        }
    }
}

/// One table row as the screens render it: raw grams plus the formatted
/// per-macro % off, and a traffic-light tone for the whole row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRow {
    #[serde(flatten)]
    pub log: FuelLog,
    pub cho_pct_text: String,
    pub pro_pct_text: String,
    pub fat_pct_text: String,
    pub row_tone: String,
}

impl LogRow {
    fn build(log: FuelLog) -> Self {
        let intake = log.intake();
        // Row colouring keys off the CHO status, as the screens always have
        let cho_status = ComplianceStatus::from_pct_off(intake.cho.pct_off());
        Self {
            cho_pct_text: format_pct(intake.cho.pct_off()),
            pro_pct_text: format_pct(intake.pro.pct_off()),
            fat_pct_text: format_pct(intake.fat.pct_off()),
            row_tone: cho_status.tone().as_str().to_string(),
            log,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekReport {
    pub cho: MacroSummary,
    pub pro: MacroSummary,
    pub fat: MacroSummary,
    pub entries: Vec<LogRow>,
}

/// Assemble the week report from already-loaded rows. Pure; the engine does
/// all arithmetic.
pub fn build_week_report(logs: Vec<FuelLog>) -> WeekReport {
    let intakes: Vec<_> = logs.iter().map(|l| l.intake()).collect();

    WeekReport {
        cho: MacroSummary::build(Macro::Cho, aggregate_week(&intakes, Macro::Cho)),
        pro: MacroSummary::build(Macro::Pro, aggregate_week(&intakes, Macro::Pro)),
        fat: MacroSummary::build(Macro::Fat, aggregate_week(&intakes, Macro::Fat)),
        entries: logs.into_iter().map(LogRow::build).collect(),
    }
}

/// Load + assemble in one call for the command layer.
pub async fn load_week_report(
    pool: &SqlitePool,
    player_id: i64,
    game_week: i64,
) -> Result<WeekReport, String> {
    let logs = load_week_logs(pool, player_id, game_week).await?;
    Ok(build_week_report(logs))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
