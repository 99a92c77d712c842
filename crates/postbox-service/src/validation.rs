// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field validation for contact-form submissions and form definitions.
//!
//! Validators collect every error instead of failing fast; the result is a
//! field -> message map that maps straight onto an HTTP 422 problem body.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"));

/// Whether `value` looks like a deliverable mail address.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Validator for message submissions, configured per form.
///
/// The only per-form constraint is the maximum body length; zero means
/// unlimited.
#[derive(Debug, Clone, Default)]
pub struct SubmissionValidator {
    max_body_length: u32,
}

impl SubmissionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound the body length. Zero leaves it unbounded.
    pub fn with_max_body_length(mut self, max_body_length: u32) -> Self {
        self.max_body_length = max_body_length;
        self
    }

    /// Validate raw submitted fields.
    ///
    /// Returns field -> error message; an empty map means valid.
    pub fn validate(&self, fields: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();

        for field in ["subject", "body", "from_name", "from_email"] {
            if fields.get(field).is_none_or(|v| v.trim().is_empty()) {
                errors.insert(field.to_string(), "required".to_string());
            }
        }

        if let Some(from_email) = fields.get("from_email")
            && !from_email.trim().is_empty()
            && !is_valid_email(from_email.trim())
        {
            errors.insert(
                "from_email".to_string(),
                "must be a valid email address".to_string(),
            );
        }

        if self.max_body_length > 0
            && let Some(body) = fields.get("body")
            && body.chars().count() > self.max_body_length as usize
        {
            errors.insert(
                "body".to_string(),
                format!("must be at most {} characters", self.max_body_length),
            );
        }

        errors
    }
}

/// Validate raw form-definition fields.
///
/// Returns field -> error message; an empty map means valid.
pub fn validate_form_fields(fields: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();

    if fields.get("name").is_none_or(|v| v.trim().is_empty()) {
        errors.insert("name".to_string(), "required".to_string());
    }

    match fields.get("to_email").map(|v| v.trim()) {
        None | Some("") => {
            errors.insert("to_email".to_string(), "required".to_string());
        }
        Some(to_email) if !is_valid_email(to_email) => {
            errors.insert(
                "to_email".to_string(),
                "must be a valid email address".to_string(),
            );
        }
        _ => {}
    }

    if let Some(raw) = fields.get("max_body_length")
        && !raw.trim().is_empty()
        && raw.trim().parse::<u32>().is_err()
    {
        errors.insert(
            "max_body_length".to_string(),
            "must be a non-negative number".to_string(),
        );
    }

    errors
}
