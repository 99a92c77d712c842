// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use std::path::Path;

use tokio_rusqlite::Connection;

use postbox_core::PostboxError;

/// Handle to the single SQLite connection.
///
/// Opening runs PRAGMA setup and all pending migrations. Query modules
/// accept `&Database` and go through [`Database::connection`].
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (creating if necessary) the database at `path` and migrate it.
    ///
    /// `wal_mode` toggles the journal mode; WAL is what production runs.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, PostboxError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| PostboxError::Storage {
                source: Box::new(e),
            })?;
        }

        let conn = Connection::open(path)
            .await
            .map_err(|e| PostboxError::Storage {
                source: Box::new(e),
            })?;

        let journal_mode = if wal_mode { "WAL" } else { "DELETE" };
        let pragmas = format!(
            "PRAGMA journal_mode={journal_mode};
             PRAGMA synchronous=NORMAL;
             PRAGMA foreign_keys=ON;
             PRAGMA busy_timeout=5000;"
        );
        conn.call(move |conn| {
            conn.execute_batch(&pragmas)?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        let migrated = conn
            .call(move |conn| {
                Ok::<_, rusqlite::Error>(crate::migrations::run_migrations(conn))
            })
            .await
            .map_err(map_tr_err)?;
        migrated?;

        tracing::debug!(path, "database opened and migrated");
        Ok(Self { conn })
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoint the WAL and release the connection.
    pub async fn close(&self) -> Result<(), PostboxError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        tracing::debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Map a tokio-rusqlite error into the workspace error type.
pub fn map_tr_err(e: tokio_rusqlite::Error) -> PostboxError {
    PostboxError::Storage {
        source: Box::new(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_database_file_and_parent_dirs() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested/dir/test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        assert!(db_path.exists(), "database file should be created");
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn open_is_idempotent_across_reopens() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("reopen.db");
        let path = db_path.to_str().unwrap();

        let db = Database::open(path, true).await.unwrap();
        db.close().await.unwrap();
        drop(db);

        // Second open re-runs migrations as a no-op.
        let db = Database::open(path, true).await.unwrap();
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn open_without_wal_uses_delete_journal() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nowal.db");
        let db = Database::open(db_path.to_str().unwrap(), false).await.unwrap();

        let mode: String = db
            .connection()
            .call(|conn| {
                let mode =
                    conn.query_row("PRAGMA journal_mode;", [], |row| row.get(0))?;
                Ok::<_, rusqlite::Error>(mode)
            })
            .await
            .unwrap();
        assert_eq!(mode.to_lowercase(), "delete");
    }
}
