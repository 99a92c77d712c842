// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability trait definitions for the Postbox backend.
//!
//! Services receive these as constructor-injected trait objects; the
//! concrete implementations live in `postbox-storage` and `postbox-email`.

pub mod menu;
pub mod repository;
pub mod sender;

pub use menu::MenuBuilder;
pub use repository::{FormRepo, MessageStore};
pub use sender::MailSender;
