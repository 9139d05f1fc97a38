pub mod progress;
pub mod reviews;
pub mod schema;

use rusqlite::{Connection, Result};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

// Re-export all public items from submodules
pub use progress::*;
pub use reviews::*;
pub use schema::run_migrations;

pub type DbPool = Arc<Mutex<Connection>>;

/// Extension trait for logging errors before discarding them
pub trait LogOnError<T> {
    /// Log the error at warn level and return None
    fn log_warn(self, context: &str) -> Option<T>;
    /// Log the error at warn level and return the default
    fn log_warn_default(self, context: &str) -> T
    where
        T: Default;
}

impl<T, E: std::fmt::Display> LogOnError<T> for std::result::Result<T, E> {
    fn log_warn(self, context: &str) -> Option<T> {
        match self {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("{}: {}", context, e);
                None
            }
        }
    }

    fn log_warn_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("{}: {}", context, e);
                T::default()
            }
        }
    }
}

/// Error returned when database lock cannot be acquired
#[derive(Debug)]
pub struct DbLockError;

impl std::fmt::Display for DbLockError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "Database unavailable")
  }
}

impl std::error::Error for DbLockError {}

/// Try to acquire the database lock, returning an error if poisoned
pub fn try_lock(pool: &DbPool) -> std::result::Result<MutexGuard<'_, Connection>, DbLockError> {
  pool.lock().map_err(|_: PoisonError<_>| {
    tracing::error!("Database mutex poisoned - a thread panicked while holding the lock");
    DbLockError
  })
}

pub fn init_db(path: &Path) -> Result<DbPool> {
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent)
      .log_warn(&format!("Could not create database directory {}", parent.display()));
  }

  // Create backup before migrations if database exists
  if path.exists() {
    let backup_path = path.with_extension("db.backup");
    std::fs::copy(path, &backup_path).log_warn("Could not create database backup");
  }

  let conn = Connection::open(path)?;
  run_migrations(&conn)?;
  tracing::debug!("Database ready at {}", path.display());
  Ok(Arc::new(Mutex::new(conn)))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_log_warn_passes_ok_through() {
    let ok: std::result::Result<i32, String> = Ok(7);
    assert_eq!(ok.log_warn("ctx"), Some(7));
  }

  #[test]
  fn test_log_warn_default_on_error() {
    let err: std::result::Result<Vec<i32>, String> = Err("boom".into());
    assert!(err.log_warn_default("ctx").is_empty());
  }

  #[test]
  fn test_init_db_creates_parent_and_backup() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("nested").join("study.db");

    {
      let pool = init_db(&path).unwrap();
      let conn = try_lock(&pool).unwrap();
      upsert_progress(&conn, &crate::domain::LearningProgress::new("alice", "a")).unwrap();
    }
    assert!(path.exists());

    // Reopening an existing database snapshots it first
    let pool = init_db(&path).unwrap();
    assert!(path.with_extension("db.backup").exists());
    let conn = try_lock(&pool).unwrap();
    assert_eq!(get_user_progress(&conn, "alice").unwrap().len(), 1);
  }
}
