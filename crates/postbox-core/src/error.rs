// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Postbox contact-form backend.

use thiserror::Error;

/// The primary error type used across all Postbox capability traits and
/// core operations.
#[derive(Debug, Error)]
pub enum PostboxError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, migration).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Mail transport errors (address parsing, connection, protocol).
    ///
    /// Per-recipient delivery failures are NOT reported here; those land in
    /// the sender's failed-recipients map.
    #[error("mail error: {message}")]
    Mail {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A precondition on the input was unmet (unresolved form reference,
    /// entity of the wrong kind).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
