//! Snapshot repository: the single key-value slot for the task sequence.
//!
//! # Responsibility
//! - Persist the entire task sequence as one serialized value under a
//!   fixed key.
//! - Restore the sequence on startup.
//!
//! # Invariants
//! - A save serializes and rewrites the whole sequence atomically.
//! - An absent or undecodable stored value loads as an empty sequence,
//!   never as an error.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::task::Task;
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed key under which the serialized task sequence is stored.
pub const SNAPSHOT_KEY: &str = "tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for snapshot load/save operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Serialize(serde_json::Error),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingSnapshotTable,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to encode task snapshot: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection has schema version {actual_version}, expected {expected_version}; \
                 open it through `open_db` so migrations run"
            ),
            Self::MissingSnapshotTable => write!(f, "required table `snapshots` is missing"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingSnapshotTable => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Storage contract for the task sequence slot.
pub trait SnapshotRepository {
    /// Loads the persisted sequence.
    ///
    /// Absent or undecodable stored data yields an empty sequence.
    fn load_tasks(&self) -> RepoResult<Vec<Task>>;

    /// Serializes and rewrites the whole sequence under the fixed key.
    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()>;
}

/// SQLite-backed snapshot repository.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Wraps a connection after checking that migrations have been applied.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is behind this
    ///   binary's latest migration.
    /// - `MissingSnapshotTable` when the version claims readiness but the
    ///   slot table is absent.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version < expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let table_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'snapshots';",
            [],
            |row| row.get(0),
        )?;
        if table_count == 0 {
            return Err(RepoError::MissingSnapshotTable);
        }

        Ok(Self { conn })
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn load_tasks(&self) -> RepoResult<Vec<Task>> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM snapshots WHERE key = ?1;",
                [SNAPSHOT_KEY],
                |row| row.get(0),
            )
            .optional()?;

        let Some(raw) = stored else {
            info!("event=snapshot_load module=repo status=empty");
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Task>>(&raw) {
            Ok(tasks) => {
                info!(
                    "event=snapshot_load module=repo status=ok count={}",
                    tasks.len()
                );
                Ok(tasks)
            }
            Err(err) => {
                // Undecodable stored data is treated the same as no saved data.
                warn!("event=snapshot_load module=repo status=corrupt error={err}");
                Ok(Vec::new())
            }
        }
    }

    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()> {
        let encoded = serde_json::to_string(tasks)?;

        self.conn.execute(
            "INSERT INTO snapshots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![SNAPSHOT_KEY, encoded],
        )?;

        info!(
            "event=snapshot_save module=repo status=ok count={}",
            tasks.len()
        );
        Ok(())
    }
}
