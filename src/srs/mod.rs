pub mod due;
pub mod scheduler;
pub mod status;

pub use due::{due_items, is_due, select_due, Schedulable};
pub use scheduler::{
  adjusted_interval, base_interval, compute_next_review, compute_next_review_from,
  schedule_next_review,
};
pub use status::{describe_next_review, ReviewStatus};
