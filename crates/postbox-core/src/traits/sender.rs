// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mail delivery trait for contact-form submissions.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::PostboxError;
use crate::types::Message;

/// Outbound email capability.
///
/// Delivery is a single best-effort attempt. Per-recipient failures are
/// recorded and exposed via [`MailSender::failed_recipients`] rather than
/// raised; `Err` is reserved for the message itself being unsendable
/// (unresolved form, malformed configured sender address).
#[async_trait]
pub trait MailSender: Send + Sync {
    /// Deliver the message to its form's recipient.
    ///
    /// Returns the number of recipients successfully notified.
    async fn send(&self, message: &Message) -> Result<usize, PostboxError>;

    /// Recipient address -> failure reason for the last send attempt.
    async fn failed_recipients(&self) -> BTreeMap<String, String>;
}
