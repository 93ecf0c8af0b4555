//! Deterministic compliance layer for fuel intake
//!
//! Every screen used to re-derive % off and traffic-light status on its own;
//! this module is the single home for that arithmetic. All functions are
//! total: malformed input degrades to an "unknown" value, never an error.

use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Deviation (% off advised)
/// ---------------------------------------------------------------------------

/// Signed deviation of actual from advised: (actual - advised) / advised.
///
/// `None` when advised is missing, advised is zero, or actual is missing.
/// A coach who recorded nothing is not a coach who recorded zero grams.
pub fn pct_off(actual: Option<f64>, advised: Option<f64>) -> Option<f64> {
  match (actual, advised) {
    (Some(actual), Some(advised)) if advised != 0.0 => Some((actual - advised) / advised),
    _ => None,
  }
}

/// ---------------------------------------------------------------------------
/// Traffic-light status
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
  Good,
  Warn,
  Bad,
}

impl Tone {
  pub fn as_str(&self) -> &'static str {
    match self {
      Tone::Good => "good",
      Tone::Warn => "warn",
      Tone::Bad => "bad",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
  OnTarget,    // |% off| <= 10%
  SlightlyOff, // 10% < |% off| <= 20%
  WayOff,      // |% off| > 20%
  Unknown,     // deviation undefined
}

impl ComplianceStatus {
  /// Classify a deviation. Both thresholds are inclusive: exactly 10% is
  /// ON TARGET, exactly 20% is SLIGHTLY OFF.
  pub fn from_pct_off(p: Option<f64>) -> Self {
    let p = match p {
      Some(p) if p.is_finite() => p,
      _ => return ComplianceStatus::Unknown,
    };
    let a = p.abs();
    if a <= 0.10 {
      ComplianceStatus::OnTarget
    } else if a <= 0.20 {
      ComplianceStatus::SlightlyOff
    } else {
      ComplianceStatus::WayOff
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      ComplianceStatus::OnTarget => "ON TARGET",
      ComplianceStatus::SlightlyOff => "SLIGHTLY OFF",
      ComplianceStatus::WayOff => ">20% OFF",
      ComplianceStatus::Unknown => "—",
    }
  }

  /// Unknown shares the warn tone with SLIGHTLY OFF; the label tells them
  /// apart, the badge colour does not.
  pub fn tone(&self) -> Tone {
    match self {
      ComplianceStatus::OnTarget => Tone::Good,
      ComplianceStatus::SlightlyOff => Tone::Warn,
      ComplianceStatus::WayOff => Tone::Bad,
      ComplianceStatus::Unknown => Tone::Warn,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Formatting and input parsing
/// ---------------------------------------------------------------------------

/// Render a deviation as a whole-number percentage, "—" when unknown.
/// Standard rounding (half away from zero), sign preserved: -0.256 -> "-26%".
pub fn format_pct(p: Option<f64>) -> String {
  match p {
    Some(p) if p.is_finite() => format!("{}%", (p * 100.0).round() as i64),
    _ => "—".to_string(),
  }
}

/// Lenient gram-field parser. Blank or unparseable input is "not recorded"
/// (`None`), never a validation error; the caller decides whether to reject.
pub fn parse_grams(text: &str) -> Option<f64> {
  let t = text.trim();
  if t.is_empty() {
    return None;
  }
  t.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// ---------------------------------------------------------------------------
/// Macros and weekly aggregation
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Macro {
  Cho,
  Pro,
  Fat,
}

impl Macro {
  /// Card/table heading used by the dashboard screens.
  pub fn display_label(&self) -> &'static str {
    match self {
      Macro::Cho => "Carbs (CHO)",
      Macro::Pro => "Protein (PRO)",
      Macro::Fat => "Fat (FAT)",
    }
  }
}

/// Advised/actual grams for one macro on one day. Either side may be
/// unrecorded.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MacroPair {
  pub advised: Option<f64>,
  pub actual: Option<f64>,
}

impl MacroPair {
  pub fn new(advised: Option<f64>, actual: Option<f64>) -> Self {
    Self { advised, actual }
  }

  pub fn pct_off(&self) -> Option<f64> {
    pct_off(self.actual, self.advised)
  }
}

/// One day's intake across the three macros, decoupled from the storage row.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DayIntake {
  pub cho: MacroPair,
  pub pro: MacroPair,
  pub fat: MacroPair,
}

impl DayIntake {
  pub fn pair(&self, m: Macro) -> MacroPair {
    match m {
      Macro::Cho => self.cho,
      Macro::Pro => self.pro,
      Macro::Fat => self.fat,
    }
  }
}

/// Weekly totals for one macro plus the deviation of the totals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeekMacroTotals {
  pub advised_total: f64,
  pub actual_total: f64,
  pub pct_off: Option<f64>,
}

/// Sum a week of entries for one macro, unrecorded values counting as 0.
///
/// The deviation of the totals treats a zero sum as "no data" on either
/// side, unlike the per-entry rule where an explicit 0 g actual is
/// meaningful. Existing weekly reports were produced under this reading, so
/// it is kept; see DESIGN.md before changing it.
pub fn aggregate_week(entries: &[DayIntake], m: Macro) -> WeekMacroTotals {
  let advised_total: f64 = entries.iter().map(|e| e.pair(m).advised.unwrap_or(0.0)).sum();
  let actual_total: f64 = entries.iter().map(|e| e.pair(m).actual.unwrap_or(0.0)).sum();

  WeekMacroTotals {
    advised_total,
    actual_total,
    pct_off: pct_off(nonzero(actual_total), nonzero(advised_total)),
  }
}

fn nonzero(v: f64) -> Option<f64> {
  if v == 0.0 {
    None
  } else {
    Some(v)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  fn day(cho: (Option<f64>, Option<f64>)) -> DayIntake {
    DayIntake {
      cho: MacroPair::new(cho.0, cho.1),
      ..Default::default()
    }
  }

  #[test]
  fn test_pct_off_undefined_cases() {
    assert_eq!(pct_off(Some(100.0), Some(0.0)), None);
    assert_eq!(pct_off(Some(100.0), None), None);
    assert_eq!(pct_off(None, Some(100.0)), None);
    assert_eq!(pct_off(None, None), None);
  }

  #[test]
  fn test_pct_off_signed_and_unrounded() {
    assert_eq!(pct_off(Some(110.0), Some(100.0)), Some(0.10));
    assert_eq!(pct_off(Some(120.0), Some(100.0)), Some(0.20));
    assert_eq!(pct_off(Some(70.0), Some(100.0)), Some(-0.30));
    // Explicit zero actual is a real recording, 100% under advised
    assert_eq!(pct_off(Some(0.0), Some(100.0)), Some(-1.0));
  }

  #[test]
  fn test_status_boundaries_are_inclusive() {
    assert_eq!(
      ComplianceStatus::from_pct_off(Some(0.10)),
      ComplianceStatus::OnTarget
    );
    assert_eq!(
      ComplianceStatus::from_pct_off(Some(0.1000001)),
      ComplianceStatus::SlightlyOff
    );
    assert_eq!(
      ComplianceStatus::from_pct_off(Some(0.20)),
      ComplianceStatus::SlightlyOff
    );
    assert_eq!(
      ComplianceStatus::from_pct_off(Some(0.2000001)),
      ComplianceStatus::WayOff
    );
    // Sign is irrelevant to the tier
    assert_eq!(
      ComplianceStatus::from_pct_off(Some(-0.10)),
      ComplianceStatus::OnTarget
    );
    assert_eq!(
      ComplianceStatus::from_pct_off(Some(-0.35)),
      ComplianceStatus::WayOff
    );
  }

  #[test]
  fn test_status_unknown_and_tones() {
    assert_eq!(
      ComplianceStatus::from_pct_off(None),
      ComplianceStatus::Unknown
    );
    assert_eq!(
      ComplianceStatus::from_pct_off(Some(f64::NAN)),
      ComplianceStatus::Unknown
    );

    assert_eq!(ComplianceStatus::OnTarget.label(), "ON TARGET");
    assert_eq!(ComplianceStatus::SlightlyOff.label(), "SLIGHTLY OFF");
    assert_eq!(ComplianceStatus::WayOff.label(), ">20% OFF");
    assert_eq!(ComplianceStatus::Unknown.label(), "—");

    assert_eq!(ComplianceStatus::OnTarget.tone(), Tone::Good);
    assert_eq!(ComplianceStatus::SlightlyOff.tone(), Tone::Warn);
    assert_eq!(ComplianceStatus::WayOff.tone(), Tone::Bad);
    // Unknown renders warn, same as SLIGHTLY OFF; only the label differs
    assert_eq!(ComplianceStatus::Unknown.tone(), Tone::Warn);
  }

  #[test]
  fn test_format_pct() {
    assert_eq!(format_pct(None), "—");
    assert_eq!(format_pct(Some(-0.256)), "-26%");
    assert_eq!(format_pct(Some(0.15)), "15%");
    assert_eq!(format_pct(Some(0.0)), "0%");
    assert_eq!(format_pct(Some(-0.30)), "-30%");
    assert_eq!(format_pct(Some(f64::NAN)), "—");
  }

  #[test]
  fn test_parse_grams() {
    assert_eq!(parse_grams(""), None);
    assert_eq!(parse_grams("  "), None);
    assert_eq!(parse_grams("abc"), None);
    assert_eq!(parse_grams("42.5"), Some(42.5));
    assert_eq!(parse_grams("-3"), Some(-3.0));
    assert_eq!(parse_grams(" 480 "), Some(480.0));
    // parse::<f64> accepts "inf"; the field does not
    assert_eq!(parse_grams("inf"), None);
    assert_eq!(parse_grams("NaN"), None);
  }

  #[test]
  fn test_aggregate_week_empty_is_unknown() {
    let totals = aggregate_week(&[], Macro::Cho);
    assert_eq!(totals.advised_total, 0.0);
    assert_eq!(totals.actual_total, 0.0);
    assert_eq!(totals.pct_off, None);
  }

  #[test]
  fn test_aggregate_week_single_entry() {
    let entries = vec![day((Some(480.0), Some(455.0)))];
    let totals = aggregate_week(&entries, Macro::Cho);

    assert_eq!(totals.advised_total, 480.0);
    assert_eq!(totals.actual_total, 455.0);

    let p = totals.pct_off.expect("deviation should be defined");
    assert!((p - (455.0 - 480.0) / 480.0).abs() < 1e-12);
    assert_eq!(
      ComplianceStatus::from_pct_off(totals.pct_off),
      ComplianceStatus::OnTarget
    );
  }

  #[test]
  fn test_aggregate_week_unrecorded_counts_as_zero() {
    let entries = vec![
      day((Some(480.0), Some(455.0))),
      day((None, Some(100.0))),
      day((Some(120.0), None)),
    ];
    let totals = aggregate_week(&entries, Macro::Cho);
    assert_eq!(totals.advised_total, 600.0);
    assert_eq!(totals.actual_total, 555.0);
  }

  #[test]
  fn entry_zero_is_meaningful_but_aggregate_zero_is_absent() {
    // Per-entry: an explicit 0 g actual computes a real deviation
    assert_eq!(pct_off(Some(0.0), Some(100.0)), Some(-1.0));

    // Weekly totals: a zero actual sum is indistinguishable from "no data"
    let entries = vec![day((Some(100.0), Some(0.0)))];
    let totals = aggregate_week(&entries, Macro::Cho);
    assert_eq!(totals.actual_total, 0.0);
    assert_eq!(totals.pct_off, None);

    // Same on the advised side
    let entries = vec![day((Some(0.0), Some(90.0)))];
    assert_eq!(aggregate_week(&entries, Macro::Cho).pct_off, None);
  }

  #[test]
  fn test_macros_aggregate_independently() {
    let entries = vec![DayIntake {
      cho: MacroPair::new(Some(480.0), Some(455.0)),
      pro: MacroPair::new(Some(180.0), Some(190.0)),
      fat: MacroPair::new(None, None),
    }];

    let cho = aggregate_week(&entries, Macro::Cho);
    let pro = aggregate_week(&entries, Macro::Pro);
    let fat = aggregate_week(&entries, Macro::Fat);

    assert_eq!(cho.advised_total, 480.0);
    assert_eq!(pro.actual_total, 190.0);
    assert_eq!(fat.pct_off, None);
  }

  #[test]
  fn test_engine_is_pure() {
    let entries = vec![day((Some(480.0), Some(455.0)))];
    let a = aggregate_week(&entries, Macro::Cho);
    let b = aggregate_week(&entries, Macro::Cho);
    assert_eq!(a.pct_off, b.pct_off);
    assert_eq!(format_pct(a.pct_off), format_pct(b.pct_off));
  }
}
