//! Quiz submission and due-list handling over the progress store.
//!
//! The scheduler itself is pure; these functions own the read-modify-write
//! around it. Each submission runs inside one transaction so concurrent
//! submissions for the same learner and concept are serialized.

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::Serialize;
use std::collections::HashMap;

use crate::db;
use crate::domain::{LearningProgress, Quality};
use crate::quiz::{self, QuizQuestion, QuizScore};
use crate::srs;

#[derive(Debug)]
pub enum ReviewError {
    Db(rusqlite::Error),
    EmptyId(&'static str),
}

impl std::fmt::Display for ReviewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(e) => write!(f, "Database error: {}", e),
            Self::EmptyId(field) => write!(f, "{} must not be empty", field),
        }
    }
}

impl std::error::Error for ReviewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Db(e) => Some(e),
            Self::EmptyId(_) => None,
        }
    }
}

impl From<rusqlite::Error> for ReviewError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Db(e)
    }
}

/// Result of grading a quiz and rescheduling its concept
#[derive(Debug, Clone, Serialize)]
pub struct QuizSubmission {
    pub score: QuizScore,
    pub quality: Quality,
    pub progress: LearningProgress,
}

fn require_id(value: &str, field: &'static str) -> Result<(), ReviewError> {
    if value.trim().is_empty() {
        return Err(ReviewError::EmptyId(field));
    }
    Ok(())
}

/// Record one review of a concept and return the updated progress.
///
/// Loads the learner's progress (creating it on first review), advances it
/// with the scheduler, stamps `last_reviewed = now` and logs the quality.
pub fn submit_review(
    conn: &mut Connection,
    user_id: &str,
    concept_id: &str,
    quality: Quality,
    now: DateTime<Utc>,
) -> Result<LearningProgress, ReviewError> {
    require_id(user_id, "user_id")?;
    require_id(concept_id, "concept_id")?;

    let tx = conn.transaction()?;

    let mut progress = match db::get_progress(&tx, user_id, concept_id)? {
        Some(existing) => existing,
        None => {
            tracing::debug!("Creating progress for {} / {}", user_id, concept_id);
            LearningProgress::new(user_id, concept_id)
        }
    };

    progress.state = progress.state.apply(quality, now);
    progress.id = db::upsert_progress(&tx, &progress)?;
    db::insert_review_log(&tx, user_id, concept_id, quality, now)?;

    tx.commit()?;

    tracing::info!(
        user_id,
        concept_id,
        quality = quality.value(),
        review_count = progress.state.review_count,
        mastery = progress.state.mastery_level,
        "Review recorded"
    );

    Ok(progress)
}

/// Grade a quiz for a concept and reschedule it.
///
/// When `quality` is not supplied it is derived from the score percentage.
pub fn submit_quiz(
    conn: &mut Connection,
    user_id: &str,
    concept_id: &str,
    questions: &[QuizQuestion],
    answers: &HashMap<String, String>,
    quality: Option<Quality>,
    now: DateTime<Utc>,
) -> Result<QuizSubmission, ReviewError> {
    let score = quiz::score_answers(questions, answers);
    let quality = quality.unwrap_or_else(|| score.quality());
    tracing::debug!(
        "Quiz for {} scored {}/{} ({:.0}%)",
        concept_id,
        score.score,
        score.total,
        score.percentage
    );

    let progress = submit_review(conn, user_id, concept_id, quality, now)?;
    Ok(QuizSubmission {
        score,
        quality,
        progress,
    })
}

/// Concepts due for review for a learner, most overdue first
pub fn due_for_review(
    conn: &Connection,
    user_id: &str,
    now: DateTime<Utc>,
) -> Result<Vec<LearningProgress>, ReviewError> {
    require_id(user_id, "user_id")?;

    let all = db::get_user_progress(conn, user_id)?;
    let due: Vec<LearningProgress> = srs::due_items(now, &all).into_iter().cloned().collect();
    tracing::debug!("{} of {} concepts due for {}", due.len(), all.len(), user_id);
    Ok(due)
}
