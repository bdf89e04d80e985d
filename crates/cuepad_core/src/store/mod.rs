//! Session snapshot persistence backed by redb.

/// Table definitions shared by storage code.
pub mod tables;

use crate::{error::AppError, models::SessionSnapshot};
use redb::{ReadableDatabase, ReadableTable};
use std::path::Path;
use std::sync::Arc;
use tables::{REDB_FILE_NAME, SESSIONS};

/// Key-value store for editor session snapshots.
///
/// Snapshots round-trip losslessly through [`save`](Self::save) and
/// [`load`](Self::load); a malformed row is treated as "no snapshot" rather
/// than an error, so a corrupted store can never prevent an editor from
/// starting.
pub struct SessionStore {
    db: Arc<redb::Database>,
}

impl SessionStore {
    /// Open (or create) the store under the given directory.
    ///
    /// # Arguments
    /// - `dir`: Directory that holds the database file; created if missing.
    ///
    /// # Returns
    /// An initialized [`SessionStore`].
    ///
    /// # Errors
    /// Returns an error when the directory cannot be created or redb fails to
    /// open or initialize the database.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, AppError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|err| {
            AppError::StorageMessage(format!(
                "Failed to create store directory {}: {}",
                dir.display(),
                err
            ))
        })?;
        let db = redb::Database::create(dir.join(REDB_FILE_NAME))?;
        Self::from_shared(Arc::new(db))
    }

    /// Build a store handle from an existing shared redb instance.
    ///
    /// Used when several widgets in one process share a database file.
    ///
    /// # Returns
    /// A [`SessionStore`] bound to `db` with tables initialized.
    ///
    /// # Errors
    /// Returns an error when table initialization fails.
    pub fn from_shared(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(SESSIONS)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Clone this handle for another widget in the same process.
    ///
    /// # Returns
    /// A new [`SessionStore`] sharing the underlying redb instance.
    ///
    /// # Errors
    /// Returns an error when table initialization fails.
    pub fn share(&self) -> Result<Self, AppError> {
        Self::from_shared(self.db.clone())
    }

    /// Persist a snapshot under `key`, replacing any previous row.
    ///
    /// # Returns
    /// `Ok(())` when the write commits.
    ///
    /// # Errors
    /// Returns an error when serialization or storage operations fail.
    pub fn save(&self, key: &str, snapshot: &SessionSnapshot) -> Result<(), AppError> {
        let encoded = bincode::serialize(snapshot)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut sessions = write_txn.open_table(SESSIONS)?;
            sessions.insert(key, encoded.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Load the snapshot stored under `key`.
    ///
    /// A row that fails to decode is logged and reported as absent; stale
    /// bytes from an incompatible version must degrade to a fresh session,
    /// not a startup failure.
    ///
    /// # Returns
    /// `Ok(Some(snapshot))` when a decodable row exists, `Ok(None)` otherwise.
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    pub fn load(&self, key: &str) -> Result<Option<SessionSnapshot>, AppError> {
        let read_txn = self.db.begin_read()?;
        let sessions = read_txn.open_table(SESSIONS)?;
        let Some(guard) = sessions.get(key)? else {
            return Ok(None);
        };
        match bincode::deserialize(guard.value()) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(err) => {
                tracing::warn!("Discarding malformed snapshot for key '{}': {}", key, err);
                Ok(None)
            }
        }
    }

    /// Remove the snapshot stored under `key`.
    ///
    /// # Returns
    /// `Ok(true)` when a row was removed, `Ok(false)` when the key was absent.
    ///
    /// # Errors
    /// Returns an error when storage operations fail.
    pub fn remove(&self, key: &str) -> Result<bool, AppError> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut sessions = write_txn.open_table(SESSIONS)?;
            let existed = sessions.remove(key)?.is_some();
            existed
        };
        write_txn.commit()?;
        Ok(removed)
    }
}
