// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Repository traits for form definitions and the message archive.

use async_trait::async_trait;

use crate::error::PostboxError;
use crate::types::{Form, Message};

/// Lookup and CRUD capability for [`Form`] definitions.
///
/// A lookup miss is `Ok(None)`, never an error; `Err` is reserved for the
/// backend itself failing (connection, query, corruption).
#[async_trait]
pub trait FormRepo: Send + Sync {
    /// Find a form by its URL-safe identifier slug.
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Form>, PostboxError>;

    /// Find a form by its opaque id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Form>, PostboxError>;

    /// List all forms, ordered by name.
    async fn list(&self) -> Result<Vec<Form>, PostboxError>;

    /// Insert a new form. The identifier must be unique.
    async fn insert(&self, form: &Form) -> Result<(), PostboxError>;

    /// Update an existing form by id.
    async fn update(&self, form: &Form) -> Result<(), PostboxError>;

    /// Delete a form by id. Deleting an unknown id is a no-op.
    async fn delete(&self, id: &str) -> Result<(), PostboxError>;
}

/// Persistence capability for submitted messages.
///
/// Submissions are archived before delivery so a transport failure never
/// loses them.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persist a filled message. The form back-reference must be set.
    async fn archive(&self, message: &Message) -> Result<(), PostboxError>;
}
