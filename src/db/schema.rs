use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
  // Create tables with COMPLETE schema for new databases
  // Migrations below handle upgrades for existing databases
  conn.execute_batch(
    r#"
    CREATE TABLE IF NOT EXISTS learning_progress (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      user_id TEXT NOT NULL,
      concept_id TEXT NOT NULL,
      mastery_level REAL NOT NULL DEFAULT 0,
      review_count INTEGER NOT NULL DEFAULT 0,
      last_reviewed TEXT,
      next_review TEXT,
      UNIQUE (user_id, concept_id)
    );

    CREATE TABLE IF NOT EXISTS review_logs (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      user_id TEXT NOT NULL,
      concept_id TEXT NOT NULL,
      quality INTEGER NOT NULL,
      reviewed_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_learning_progress_user ON learning_progress(user_id);
    CREATE INDEX IF NOT EXISTS idx_learning_progress_next_review ON learning_progress(next_review);
    "#,
  )?;

  // Migration: databases created before review logs carried a learner
  add_column_if_missing(conn, "review_logs", "user_id", "TEXT NOT NULL DEFAULT ''")?;

  conn.execute_batch(
    "CREATE INDEX IF NOT EXISTS idx_review_logs_user_concept ON review_logs(user_id, concept_id);",
  )?;

  Ok(())
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
  conn
    .prepare(&format!("SELECT {} FROM {} LIMIT 1", column, table))
    .is_ok()
}

/// Add a column if it doesn't already exist
fn add_column_if_missing(conn: &Connection, table: &str, column: &str, column_def: &str) -> Result<()> {
  if !column_exists(conn, table, column) {
    conn.execute(
      &format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, column_def),
      [],
    )?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_migrations_are_idempotent() {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    run_migrations(&conn).unwrap();
    assert!(column_exists(&conn, "learning_progress", "next_review"));
    assert!(column_exists(&conn, "review_logs", "user_id"));
  }

  #[test]
  fn test_migration_adds_missing_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn
      .execute_batch(
        "CREATE TABLE review_logs (id INTEGER PRIMARY KEY, concept_id TEXT NOT NULL, quality INTEGER NOT NULL, reviewed_at TEXT NOT NULL);",
      )
      .unwrap();
    assert!(!column_exists(&conn, "review_logs", "user_id"));
    run_migrations(&conn).unwrap();
    assert!(column_exists(&conn, "review_logs", "user_id"));
  }
}
