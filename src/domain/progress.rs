use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Quality;
use crate::srs::{self, Schedulable};

/// Scheduling state for one (learner, concept) pair.
///
/// A fresh state has both counters at zero and no timestamps. An absent
/// `next_review` means the concept is due immediately.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
  pub review_count: u32,
  /// Continuous proficiency estimate, always within [0, 5]
  pub mastery_level: f64,
  pub last_reviewed: Option<DateTime<Utc>>,
  pub next_review: Option<DateTime<Utc>>,
}

impl ReviewState {
  pub fn new() -> Self {
    Self::default()
  }

  /// Process one review submission at `now`, returning the successor state.
  pub fn apply(&self, quality: Quality, now: DateTime<Utc>) -> ReviewState {
    let scheduled = srs::schedule_next_review(self.review_count, self.mastery_level, quality, now);
    ReviewState {
      review_count: scheduled.review_count,
      mastery_level: scheduled.mastery_level,
      last_reviewed: Some(now),
      next_review: Some(scheduled.next_review),
    }
  }

  pub fn is_due(&self, now: DateTime<Utc>) -> bool {
    srs::is_due(self.next_review, now)
  }
}

/// Outcome of a single scheduling step, with the effective quality echoed back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledReview {
  pub review_count: u32,
  pub mastery_level: f64,
  pub next_review: DateTime<Utc>,
  pub quality: Quality,
}

/// Persisted progress record: a `ReviewState` keyed by learner and concept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningProgress {
  pub id: i64,
  pub user_id: String,
  pub concept_id: String,
  #[serde(flatten)]
  pub state: ReviewState,
}

impl LearningProgress {
  /// Unsaved record for a learner's first review of a concept
  pub fn new(user_id: &str, concept_id: &str) -> Self {
    Self {
      id: 0,
      user_id: user_id.to_string(),
      concept_id: concept_id.to_string(),
      state: ReviewState::new(),
    }
  }
}

impl Schedulable for ReviewState {
  fn next_review(&self) -> Option<DateTime<Utc>> {
    self.next_review
  }
}

impl Schedulable for LearningProgress {
  fn next_review(&self) -> Option<DateTime<Utc>> {
    self.state.next_review
  }
}
