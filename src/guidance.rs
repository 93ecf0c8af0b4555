//! UEFA guidance reference panel
//!
//! Read-only g/kg guidance rows seeded by migration, converted to total
//! grams for a selected player's body mass. The daily plan itself is entered
//! in total grams; this screen is reference only.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
/// Guidance Rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GuidanceRow {
    pub id: i64,
    pub label: String,
    pub g_per_kg_low: Option<f64>,
    pub g_per_kg_high: Option<f64>,
    pub notes: Option<String>,
}

/// Load all guidance rows in their seeded order.
pub async fn load_guidance(pool: &SqlitePool) -> Result<Vec<GuidanceRow>, String> {
    sqlx::query_as::<_, GuidanceRow>(
        "SELECT id, label, g_per_kg_low, g_per_kg_high, notes FROM uefa_guidance ORDER BY id",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| format!("Failed to load UEFA guidance: {}", e))
}

// ---------------------------------------------------------------------------
/// Conversion
// ---------------------------------------------------------------------------

/// g/kg -> whole grams for a body mass, None when either side is missing.
pub fn grams_for(g_per_kg: Option<f64>, body_mass_kg: Option<f64>) -> Option<i64> {
    match (g_per_kg, body_mass_kg) {
        (Some(v), Some(kg)) => Some((v * kg).round() as i64),
        _ => None,
    }
}

fn bound_text(v: Option<f64>) -> String {
    v.map(|v| v.to_string()).unwrap_or_else(|| "—".to_string())
}

fn grams_bound_text(v: Option<i64>) -> String {
    v.map(|g| g.to_string()).unwrap_or_else(|| "—".to_string())
}

/// "6–8" for a range, "6" for a single bound, "—" when nothing is given.
pub fn g_per_kg_text(low: Option<f64>, high: Option<f64>) -> String {
    match high {
        None => bound_text(low),
        Some(high) => format!("{}–{}", bound_text(low), high),
    }
}

/// "450–600g" for a range, "450g" for a single bound, "—" when unknown.
pub fn grams_text(low: Option<f64>, high: Option<f64>, body_mass_kg: Option<f64>) -> String {
    match high {
        None => match grams_for(low, body_mass_kg) {
            None => "—".to_string(),
            Some(g) => format!("{}g", g),
        },
        Some(high) => format!(
            "{}–{}g",
            grams_bound_text(grams_for(low, body_mass_kg)),
            grams_bound_text(grams_for(Some(high), body_mass_kg)),
        ),
    }
}

// ---------------------------------------------------------------------------
/// Per-Player View
// ---------------------------------------------------------------------------

/// One guidance row rendered for a player's body mass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidanceLine {
    pub label: String,
    pub g_per_kg_text: String,
    pub grams_text: String,
    pub notes: Option<String>,
}

impl GuidanceLine {
    pub fn build(row: &GuidanceRow, body_mass_kg: Option<f64>) -> Self {
        Self {
            label: row.label.clone(),
            g_per_kg_text: g_per_kg_text(row.g_per_kg_low, row.g_per_kg_high),
            grams_text: grams_text(row.g_per_kg_low, row.g_per_kg_high, body_mass_kg),
            notes: row.notes.clone(),
        }
    }
}

/// Guidance lines converted for one player (or unconverted when no player
/// is selected yet).
pub async fn load_guidance_lines(
    pool: &SqlitePool,
    body_mass_kg: Option<f64>,
) -> Result<Vec<GuidanceLine>, String> {
    let rows = load_guidance(pool).await?;
    Ok(rows.iter().map(|r| GuidanceLine::build(r, body_mass_kg)).collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
