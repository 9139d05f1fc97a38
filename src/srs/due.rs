//! Due-set selection.
//!
//! Due-ness is never stored: an item is due when its next review is absent
//! or not later than the query time. Due items come back most overdue first,
//! with never-scheduled items ahead of everything else.

use chrono::{DateTime, Utc};

/// Anything carrying an optional next-review time
pub trait Schedulable {
  fn next_review(&self) -> Option<DateTime<Utc>>;
}

pub fn is_due(next_review: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
  next_review.map_or(true, |at| at <= now)
}

/// Select the due ids from `(id, next_review)` pairs, ordered ascending by
/// next review. Absent times sort first; ties keep input order.
pub fn select_due<I: Clone>(now: DateTime<Utc>, states: &[(I, Option<DateTime<Utc>>)]) -> Vec<I> {
  let mut due: Vec<_> = states
    .iter()
    .filter(|(_, next_review)| is_due(*next_review, now))
    .collect();

  // Option orders None before Some; sort_by_key is stable
  due.sort_by_key(|(_, next_review)| *next_review);

  due.into_iter().map(|(id, _)| id.clone()).collect()
}

/// Same selection as `select_due`, over borrowed items
pub fn due_items<T: Schedulable>(now: DateTime<Utc>, items: &[T]) -> Vec<&T> {
  let mut due: Vec<&T> = items
    .iter()
    .filter(|item| is_due(item.next_review(), now))
    .collect();
  due.sort_by_key(|item| item.next_review());
  due
}
