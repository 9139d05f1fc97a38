use chrono::{DateTime, Duration, Utc};

use crate::domain::{Quality, ScheduledReview};

/// Base interval in days, indexed by review count
pub const BASE_INTERVALS: [i64; 6] = [1, 3, 7, 14, 30, 60];

/// Base interval once a concept has been reviewed six or more times
pub const DEFAULT_BASE_INTERVAL: i64 = 365;

pub const MIN_MASTERY: f64 = 0.0;
pub const MAX_MASTERY: f64 = 5.0;

/// Interval stretch per mastery point (mastery 5 => 1.5x)
const MASTERY_STRETCH: f64 = 0.1;

pub fn base_interval(review_count: u32) -> i64 {
  BASE_INTERVALS
    .get(review_count as usize)
    .copied()
    .unwrap_or(DEFAULT_BASE_INTERVAL)
}

fn clamp_mastery(mastery_level: f64) -> f64 {
  if mastery_level.is_finite() {
    mastery_level.clamp(MIN_MASTERY, MAX_MASTERY)
  } else {
    MIN_MASTERY
  }
}

/// Days until the next review: floor(base * (1 + mastery * 0.1))
pub fn adjusted_interval(review_count: u32, mastery_level: f64) -> i64 {
  let base = base_interval(review_count);
  let mastery = clamp_mastery(mastery_level);
  (base as f64 * (1.0 + mastery * MASTERY_STRETCH)).floor() as i64
}

/// Next review time counted from `anchor` (usually the last review)
pub fn compute_next_review(
  review_count: u32,
  mastery_level: f64,
  anchor: DateTime<Utc>,
) -> DateTime<Utc> {
  anchor + Duration::days(adjusted_interval(review_count, mastery_level))
}

/// Like `compute_next_review`, anchoring on `now` when there is no previous review
pub fn compute_next_review_from(
  review_count: u32,
  mastery_level: f64,
  last_reviewed: Option<DateTime<Utc>>,
  now: DateTime<Utc>,
) -> DateTime<Utc> {
  compute_next_review(review_count, mastery_level, last_reviewed.unwrap_or(now))
}

/// Process one review submission.
///
/// Increments the review count, moves mastery by `(quality - 3) * 0.2`
/// within [0, 5] and schedules the next review from `now`. Interval
/// stretching uses the whole-number mastery tier, not the fractional value.
pub fn schedule_next_review(
  review_count: u32,
  mastery_level: f64,
  quality: Quality,
  now: DateTime<Utc>,
) -> ScheduledReview {
  let new_review_count = review_count.saturating_add(1);
  let new_mastery = clamp_mastery(mastery_level + quality.mastery_delta());
  let next_review = compute_next_review(new_review_count, new_mastery.trunc(), now);

  tracing::debug!(
    review_count = new_review_count,
    mastery = new_mastery,
    quality = quality.value(),
    %next_review,
    "scheduled next review"
  );

  ScheduledReview {
    review_count: new_review_count,
    mastery_level: new_mastery,
    next_review,
    quality,
  }
}
