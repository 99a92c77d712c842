// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the `FormRepo` and `MessageStore` traits.

use async_trait::async_trait;
use tracing::debug;

use postbox_config::model::StorageConfig;
use postbox_core::{Form, FormRepo, Message, MessageStore, PostboxError};

use crate::database::Database;
use crate::queries;

/// SQLite-backed storage.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. One instance is shared behind `Arc` by everything
/// that needs the repository or the archive.
pub struct SqliteStorage {
    db: Database,
}

impl SqliteStorage {
    /// Open the database at the configured path, running migrations.
    pub async fn open(config: &StorageConfig) -> Result<Self, PostboxError> {
        let db = Database::open(&config.database_path, config.wal_mode).await?;
        debug!(path = %config.database_path, "SQLite storage initialized");
        Ok(Self { db })
    }

    /// The underlying database handle (used by tests and maintenance tasks).
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Checkpoint and release the connection.
    pub async fn close(&self) -> Result<(), PostboxError> {
        self.db.close().await
    }
}

#[async_trait]
impl FormRepo for SqliteStorage {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Form>, PostboxError> {
        queries::forms::get_form_by_identifier(&self.db, identifier).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Form>, PostboxError> {
        queries::forms::get_form_by_id(&self.db, id).await
    }

    async fn list(&self) -> Result<Vec<Form>, PostboxError> {
        queries::forms::list_forms(&self.db).await
    }

    async fn insert(&self, form: &Form) -> Result<(), PostboxError> {
        queries::forms::insert_form(&self.db, form).await
    }

    async fn update(&self, form: &Form) -> Result<(), PostboxError> {
        queries::forms::update_form(&self.db, form).await
    }

    async fn delete(&self, id: &str) -> Result<(), PostboxError> {
        queries::forms::delete_form(&self.db, id).await
    }
}

#[async_trait]
impl MessageStore for SqliteStorage {
    async fn archive(&self, message: &Message) -> Result<(), PostboxError> {
        queries::messages::insert_message(&self.db, message).await
    }
}
