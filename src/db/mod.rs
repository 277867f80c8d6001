pub mod articles;
pub mod favorites;
pub mod kv;
pub mod practice;
pub mod progress;
pub mod schema;
pub mod stats;

use rusqlite::{Connection, Result};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::StoreError;

// Re-export all public items from submodules
pub use articles::*;
pub use favorites::*;
pub use kv::{read_bucket, write_bucket, Bucket};
pub use practice::*;
pub use progress::*;
pub use schema::run_migrations;
pub use stats::*;

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

/// Try to acquire the database lock, returning an error if poisoned
pub fn try_lock(pool: &DbPool) -> std::result::Result<MutexGuard<'_, Connection>, StoreError> {
    pool.lock().map_err(|_: PoisonError<_>| {
        tracing::error!("Database mutex poisoned - a thread panicked while holding the lock");
        StoreError::LockPoisoned
    })
}

pub fn init_db(path: &Path) -> Result<DbPool> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    let conn = Connection::open(path)?;
    run_migrations(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// Fresh store that lives as long as the connection
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    run_migrations(&conn)?;
    Ok(conn)
}

/// In-memory store wrapped for sharing with async tasks
pub fn in_memory_pool() -> Result<DbPool> {
    Ok(Arc::new(Mutex::new(open_in_memory()?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_log_warn_default_on_error() {
        let result: std::result::Result<Vec<u8>, String> = Err("boom".into());
        assert!(result.log_warn_default("ctx").is_empty());
    }

    #[test]
    fn test_log_warn_passes_ok() {
        let result: std::result::Result<u8, String> = Ok(3);
        assert_eq!(result.log_warn("ctx"), Some(3));
    }

    #[test]
    fn test_init_db_creates_parent_and_persists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/ielts.db");

        {
            let pool = init_db(&path).unwrap();
            let conn = try_lock(&pool).unwrap();
            write_bucket(&conn, Bucket::Streak, &vec![7]);
        }

        let pool = init_db(&path).unwrap();
        let conn = try_lock(&pool).unwrap();
        let back: Vec<i32> = read_bucket(&conn, Bucket::Streak);
        assert_eq!(back, vec![7]);
    }
}
