//! Learning progress records (one per learner and concept)

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Result};

use crate::domain::{LearningProgress, ReviewState};

const PROGRESS_COLUMNS: &str =
    "id, user_id, concept_id, mastery_level, review_count, last_reviewed, next_review";

pub fn get_progress(
    conn: &Connection,
    user_id: &str,
    concept_id: &str,
) -> Result<Option<LearningProgress>> {
    conn.query_row(
        &format!(
            "SELECT {} FROM learning_progress WHERE user_id = ?1 AND concept_id = ?2",
            PROGRESS_COLUMNS
        ),
        params![user_id, concept_id],
        row_to_progress,
    )
    .optional()
}

/// All progress records for a learner, in insertion order
pub fn get_user_progress(conn: &Connection, user_id: &str) -> Result<Vec<LearningProgress>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM learning_progress WHERE user_id = ?1 ORDER BY id",
        PROGRESS_COLUMNS
    ))?;

    let records = stmt
        .query_map(params![user_id], row_to_progress)?
        .collect::<Result<Vec<_>>>()?;

    Ok(records)
}

/// Insert or replace the state for (user, concept), returning the record id
pub fn upsert_progress(conn: &Connection, progress: &LearningProgress) -> Result<i64> {
    let state = &progress.state;
    conn.query_row(
        r#"
    INSERT INTO learning_progress
      (user_id, concept_id, mastery_level, review_count, last_reviewed, next_review)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    ON CONFLICT (user_id, concept_id) DO UPDATE SET
      mastery_level = excluded.mastery_level,
      review_count = excluded.review_count,
      last_reviewed = excluded.last_reviewed,
      next_review = excluded.next_review
    RETURNING id
    "#,
        params![
            progress.user_id,
            progress.concept_id,
            state.mastery_level,
            state.review_count,
            state.last_reviewed.map(|dt| dt.to_rfc3339()),
            state.next_review.map(|dt| dt.to_rfc3339()),
        ],
        |row| row.get(0),
    )
}

/// Clear next_review for every concept a learner has, making them all due
pub fn make_all_due(conn: &Connection, user_id: &str) -> Result<usize> {
    conn.execute(
        "UPDATE learning_progress SET next_review = NULL WHERE user_id = ?1",
        params![user_id],
    )
}

fn parse_timestamp(idx: usize, value: Option<String>) -> Result<Option<DateTime<Utc>>> {
    value
        .map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
        })
        .transpose()
}

/// Convert a database row to a LearningProgress struct
pub(crate) fn row_to_progress(row: &rusqlite::Row) -> Result<LearningProgress> {
    let last_reviewed: Option<String> = row.get(5)?;
    let next_review: Option<String> = row.get(6)?;

    Ok(LearningProgress {
        id: row.get(0)?,
        user_id: row.get(1)?,
        concept_id: row.get(2)?,
        state: ReviewState {
            mastery_level: row.get(3)?,
            review_count: row.get(4)?,
            last_reviewed: parse_timestamp(5, last_reviewed)?,
            next_review: parse_timestamp(6, next_review)?,
        },
    })
}
