use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::compliance::{DayIntake, MacroPair};

/// Day position relative to match day. Stored as TEXT; inserts are
/// validated through `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayLabel {
  #[serde(rename = "MD")]
  Md,
  #[serde(rename = "MD+1")]
  MdPlus1,
  #[serde(rename = "MD+2")]
  MdPlus2,
  #[serde(rename = "MD+3")]
  MdPlus3,
  #[serde(rename = "MD+4")]
  MdPlus4,
  #[serde(rename = "MD-2")]
  MdMinus2,
  #[serde(rename = "MD-1")]
  MdMinus1,
}

impl DayLabel {
  /// Form-select order used by the Fuel Log screen.
  pub const ALL: [DayLabel; 7] = [
    DayLabel::Md,
    DayLabel::MdPlus1,
    DayLabel::MdPlus2,
    DayLabel::MdPlus3,
    DayLabel::MdPlus4,
    DayLabel::MdMinus2,
    DayLabel::MdMinus1,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      DayLabel::Md => "MD",
      DayLabel::MdPlus1 => "MD+1",
      DayLabel::MdPlus2 => "MD+2",
      DayLabel::MdPlus3 => "MD+3",
      DayLabel::MdPlus4 => "MD+4",
      DayLabel::MdMinus2 => "MD-2",
      DayLabel::MdMinus1 => "MD-1",
    }
  }
}

impl std::fmt::Display for DayLabel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl std::str::FromStr for DayLabel {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "MD" => Ok(DayLabel::Md),
      "MD+1" => Ok(DayLabel::MdPlus1),
      "MD+2" => Ok(DayLabel::MdPlus2),
      "MD+3" => Ok(DayLabel::MdPlus3),
      "MD+4" => Ok(DayLabel::MdPlus4),
      "MD-2" => Ok(DayLabel::MdMinus2),
      "MD-1" => Ok(DayLabel::MdMinus1),
      _ => Err(format!("Unknown day label: {}", s)),
    }
  }
}

/// One daily macro-intake record. Any of the six gram fields may be
/// unrecorded, which is not the same as zero.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FuelLog {
  pub id: i64,
  pub player_id: i64,
  pub game_week: i64,
  pub log_date: NaiveDate,
  pub day_label: String,
  pub cho_advised_g: Option<f64>,
  pub cho_actual_g: Option<f64>,
  pub pro_advised_g: Option<f64>,
  pub pro_actual_g: Option<f64>,
  pub fat_advised_g: Option<f64>,
  pub fat_actual_g: Option<f64>,
  pub notes: Option<String>,
  pub created_at: Option<DateTime<Utc>>,
}

impl FuelLog {
  /// Project the row into the engine's input shape.
  pub fn intake(&self) -> DayIntake {
    DayIntake {
      cho: MacroPair::new(self.cho_advised_g, self.cho_actual_g),
      pro: MacroPair::new(self.pro_advised_g, self.pro_actual_g),
      fat: MacroPair::new(self.fat_advised_g, self.fat_actual_g),
    }
  }
}

/// For inserting new fuel logs (without id, created_at)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFuelLog {
  pub player_id: i64,
  pub game_week: i64,
  pub log_date: NaiveDate,
  pub day_label: DayLabel,
  pub cho_advised_g: Option<f64>,
  pub cho_actual_g: Option<f64>,
  pub pro_advised_g: Option<f64>,
  pub pro_actual_g: Option<f64>,
  pub fat_advised_g: Option<f64>,
  pub fat_actual_g: Option<f64>,
  pub notes: Option<String>,
}
