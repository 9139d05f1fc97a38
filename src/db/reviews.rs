//! Review logging

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};
use serde::Serialize;

use crate::domain::Quality;

/// One processed review submission, kept for analytics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewLog {
    pub id: i64,
    pub user_id: String,
    pub concept_id: String,
    pub quality: Quality,
    pub reviewed_at: DateTime<Utc>,
}

pub fn insert_review_log(
    conn: &Connection,
    user_id: &str,
    concept_id: &str,
    quality: Quality,
    reviewed_at: DateTime<Utc>,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO review_logs (user_id, concept_id, quality, reviewed_at) VALUES (?1, ?2, ?3, ?4)",
        params![user_id, concept_id, quality.value(), reviewed_at.to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Review history for one concept, oldest first
pub fn get_review_logs(conn: &Connection, user_id: &str, concept_id: &str) -> Result<Vec<ReviewLog>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, user_id, concept_id, quality, reviewed_at
    FROM review_logs
    WHERE user_id = ?1 AND concept_id = ?2
    ORDER BY reviewed_at ASC, id ASC
    "#,
    )?;

    let logs = stmt
        .query_map(params![user_id, concept_id], |row| {
            let quality: i64 = row.get(3)?;
            let reviewed_at_str: String = row.get(4)?;
            Ok(ReviewLog {
                id: row.get(0)?,
                user_id: row.get(1)?,
                concept_id: row.get(2)?,
                quality: Quality::clamped(quality),
                reviewed_at: DateTime::parse_from_rfc3339(&reviewed_at_str)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(
                            4,
                            rusqlite::types::Type::Text,
                            Box::new(e),
                        )
                    })?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::run_migrations;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_insert_and_read_logs() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let t0 = Utc.with_ymd_and_hms(2025, 5, 1, 10, 0, 0).unwrap();

        insert_review_log(&conn, "alice", "osmosis", Quality::clamped(4), t0 + Duration::days(3)).unwrap();
        insert_review_log(&conn, "alice", "osmosis", Quality::MIN, t0).unwrap();
        insert_review_log(&conn, "alice", "diffusion", Quality::MAX, t0).unwrap();

        let logs = get_review_logs(&conn, "alice", "osmosis").unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].quality, Quality::MIN);
        assert_eq!(logs[0].reviewed_at, t0);
        assert_eq!(logs[1].quality.value(), 4);
    }
}
