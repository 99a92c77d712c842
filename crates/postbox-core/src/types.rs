// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Postbox workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A configured contact-form definition.
///
/// Forms are managed through the admin API and are read-only at message
/// submission time. The `identifier` is a unique URL-safe slug; submissions
/// reference forms by it (or, as a fallback, by `id`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    /// Opaque unique id (UUID string).
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    /// Unique URL-safe slug used by submissions.
    pub identifier: String,
    /// Recipient display name.
    pub to_name: String,
    /// Recipient email address.
    pub to_email: String,
    /// Redirect target after a successful submission.
    pub success_url: String,
    /// Redirect target after a failed submission.
    pub failure_url: String,
    /// Maximum permitted message-body length in characters. Zero = unlimited.
    pub max_body_length: u32,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// RFC 3339 last-update timestamp.
    pub updated_at: String,
}

/// One submitted contact-form instance, tied to exactly one [`Form`].
///
/// The `form` back-reference is set during entity fill, and only when the
/// referenced form resolves. Messages are created per submission and never
/// updated after delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Opaque unique id (UUID string).
    pub id: String,
    /// Back-reference to the resolved form, set by a successful fill.
    pub form: Option<Form>,
    pub subject: String,
    pub body: String,
    pub from_name: String,
    pub from_email: String,
    pub from_phone: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl Message {
    /// Create an empty message with the given id, timestamped now-by-caller.
    ///
    /// All content fields start blank; entity fill populates them.
    pub fn new(id: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            form: None,
            subject: String::new(),
            body: String::new(),
            from_name: String::new(),
            from_email: String::new(),
            from_phone: String::new(),
            created_at: created_at.into(),
        }
    }
}

/// An entity managed by the repo-backed execute services.
///
/// Fill operations take an `Entity` and reject the wrong kind with
/// [`PostboxError::InvalidInput`](crate::PostboxError::InvalidInput).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    Form(Form),
    Message(Message),
}

impl Entity {
    /// Short kind label used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Entity::Form(_) => "form",
            Entity::Message(_) => "message",
        }
    }
}

/// Intents a host navigation menu may expose.
///
/// The contact contributor only decorates menus carrying [`MenuIntent::Primary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum MenuIntent {
    Primary,
    Secondary,
    Footer,
}

/// A single navigation menu item contributed to the host admin shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Translation key or literal label, e.g. `contact:forms`.
    pub label: String,
    /// Route the item links to. Empty for pure dropdown toggles.
    pub route: String,
    /// Icon name in the host shell's icon set.
    pub icon: String,
    /// Admin-resource permission string gating visibility, if any.
    pub resource: Option<String>,
    /// Nested child items (rendered as a dropdown when non-empty).
    pub children: Vec<MenuItem>,
}
