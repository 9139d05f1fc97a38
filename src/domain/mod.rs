pub mod progress;
pub mod quality;

pub use progress::{LearningProgress, ReviewState, ScheduledReview};
pub use quality::Quality;
