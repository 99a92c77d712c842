// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Execute services for the Postbox contact-form backend.
//!
//! `MessageService` drives one submission end to end: resolve the referenced
//! form (with a single-slot memo), validate the raw fields against the
//! form's rules, fill the message entity, and delegate delivery to the
//! configured sender. `FormService` is the parallel CRUD path for managing
//! form definitions.

pub mod form;
pub mod message;
pub mod slug;
pub mod validation;

pub use form::FormService;
pub use message::{FillOutcome, MessageService};
pub use slug::slugify;
pub use validation::{SubmissionValidator, validate_form_fields};
