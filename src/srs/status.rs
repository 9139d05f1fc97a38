use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MS_PER_DAY: f64 = 86_400_000.0;

/// Where a concept sits relative to its next review, for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
  /// Never scheduled
  New,
  Overdue,
  DueToday,
  Upcoming,
}

impl ReviewStatus {
  pub fn from_next_review(next_review: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
    match next_review.map(|at| days_until(at, now)) {
      None => Self::New,
      Some(d) if d < 0 => Self::Overdue,
      Some(0) => Self::DueToday,
      Some(_) => Self::Upcoming,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::New => "new",
      Self::Overdue => "overdue",
      Self::DueToday => "due_today",
      Self::Upcoming => "upcoming",
    }
  }
}

/// Whole days until `at`, rounded up (partial days count as a full day ahead)
pub fn days_until(at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
  let ms = (at - now).num_milliseconds() as f64;
  (ms / MS_PER_DAY).ceil() as i64
}

/// Short human description such as "Due tomorrow" or "3 days overdue"
pub fn describe_next_review(next_review: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
  let Some(at) = next_review else {
    return "Not scheduled".to_string();
  };

  let days = days_until(at, now);
  match days {
    d if d < 0 => {
      let overdue = d.abs();
      if overdue == 1 {
        "1 day overdue".to_string()
      } else {
        format!("{} days overdue", overdue)
      }
    }
    0 => "Due today".to_string(),
    1 => "Due tomorrow".to_string(),
    d if d < 7 => format!("Due in {} days", d),
    d if d < 30 => format!("Due in {} weeks", (d + 6) / 7),
    d => format!("Due in {} months", (d + 29) / 30),
  }
}
