use serde::{Deserialize, Serialize};

/// Recall quality on a 0-5 scale (0 = complete miss, 3 = baseline correct, 5 = instant recall)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quality(u8);

impl Quality {
  pub const MIN: Quality = Quality(0);
  pub const BASELINE: Quality = Quality(3);
  pub const MAX: Quality = Quality(5);

  /// Build a quality from any integer, clamping into 0..=5.
  ///
  /// Values outside the scale are pinned to the nearest end rather than
  /// extrapolated, so the mastery delta always stays within [-0.6, +0.4].
  pub fn clamped(raw: i64) -> Self {
    Self(raw.clamp(Self::MIN.0 as i64, Self::MAX.0 as i64) as u8)
  }

  /// Strict constructor for callers that want to reject out-of-range input
  pub fn from_u8(value: u8) -> Option<Self> {
    if value <= Self::MAX.0 {
      Some(Self(value))
    } else {
      None
    }
  }

  /// Map a quiz score percentage onto the quality scale
  pub fn from_score_percentage(percentage: f64) -> Self {
    let q = if percentage >= 90.0 {
      5
    } else if percentage >= 80.0 {
      4
    } else if percentage >= 60.0 {
      3
    } else if percentage >= 40.0 {
      2
    } else if percentage >= 20.0 {
      1
    } else {
      0
    };
    Self(q)
  }

  pub fn value(self) -> u8 {
    self.0
  }

  /// Change applied to mastery for this quality: (q - 3) * 0.2
  pub fn mastery_delta(self) -> f64 {
    (self.0 as f64 - 3.0) * 0.2
  }

  pub fn is_correct(self) -> bool {
    self >= Self::BASELINE
  }
}

impl Default for Quality {
  fn default() -> Self {
    Self::BASELINE
  }
}

impl TryFrom<u8> for Quality {
  type Error = String;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Self::from_u8(value).ok_or_else(|| format!("quality {} is outside 0-5", value))
  }
}

impl From<Quality> for u8 {
  fn from(quality: Quality) -> Self {
    quality.0
  }
}

impl std::fmt::Display for Quality {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_clamped_within_range() {
    for raw in 0..=5 {
      assert_eq!(Quality::clamped(raw).value(), raw as u8);
    }
  }

  #[test]
  fn test_clamped_out_of_range() {
    assert_eq!(Quality::clamped(-4), Quality::MIN);
    assert_eq!(Quality::clamped(9), Quality::MAX);
    assert_eq!(Quality::clamped(i64::MAX), Quality::MAX);
  }

  #[test]
  fn test_from_u8_strict() {
    assert_eq!(Quality::from_u8(0), Some(Quality::MIN));
    assert_eq!(Quality::from_u8(5), Some(Quality::MAX));
    assert_eq!(Quality::from_u8(6), None);
    assert_eq!(Quality::from_u8(255), None);
  }

  #[test]
  fn test_from_score_percentage_thresholds() {
    assert_eq!(Quality::from_score_percentage(100.0).value(), 5);
    assert_eq!(Quality::from_score_percentage(90.0).value(), 5);
    assert_eq!(Quality::from_score_percentage(89.9).value(), 4);
    assert_eq!(Quality::from_score_percentage(80.0).value(), 4);
    assert_eq!(Quality::from_score_percentage(60.0).value(), 3);
    assert_eq!(Quality::from_score_percentage(59.0).value(), 2);
    assert_eq!(Quality::from_score_percentage(20.0).value(), 1);
    assert_eq!(Quality::from_score_percentage(19.9).value(), 0);
    assert_eq!(Quality::from_score_percentage(0.0).value(), 0);
  }

  #[test]
  fn test_mastery_delta_asymmetric() {
    assert!((Quality::MIN.mastery_delta() + 0.6).abs() < 1e-9);
    assert!(Quality::BASELINE.mastery_delta().abs() < 1e-9);
    assert!((Quality::MAX.mastery_delta() - 0.4).abs() < 1e-9);
  }

  #[test]
  fn test_is_correct() {
    assert!(!Quality::clamped(2).is_correct());
    assert!(Quality::BASELINE.is_correct());
    assert!(Quality::MAX.is_correct());
  }

  #[test]
  fn test_default_is_baseline() {
    assert_eq!(Quality::default(), Quality::BASELINE);
  }

  #[test]
  fn test_serde_as_integer() {
    let q: Quality = serde_json::from_str("4").unwrap();
    assert_eq!(q.value(), 4);
    assert_eq!(serde_json::to_string(&Quality::MAX).unwrap(), "5");
  }

  #[test]
  fn test_serde_rejects_out_of_range() {
    assert!(serde_json::from_str::<Quality>("6").is_err());
  }
}
