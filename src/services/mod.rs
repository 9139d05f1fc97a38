pub mod review;

pub use review::{due_for_review, submit_quiz, submit_review, QuizSubmission, ReviewError};
