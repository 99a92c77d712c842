// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Postbox contact-form backend.
//!
//! This crate provides the foundational trait definitions, error types, and
//! domain types used throughout the Postbox workspace. Storage and mail
//! backends implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PostboxError;
pub use types::{Entity, Form, MenuIntent, MenuItem, Message};

// Re-export all capability traits at crate root.
pub use traits::{FormRepo, MailSender, MenuBuilder, MessageStore};
