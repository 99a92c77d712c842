// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! RFC 7807 problem responses.

use std::collections::BTreeMap;

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// An `application/problem+json` body.
#[derive(Debug, Serialize)]
pub struct Problem {
    /// Problem type URI; `about:blank` when no base URL is configured.
    #[serde(rename = "type")]
    pub problem_type: String,
    /// Short human-readable summary.
    pub title: String,
    /// HTTP status, duplicated into the body per RFC 7807.
    pub status: u16,
    /// Occurrence-specific explanation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Field -> error message, for validation problems.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, String>,
}

impl Problem {
    /// Build a problem with its type derived from `base_url` and `slug`.
    pub fn new(base_url: Option<&str>, slug: &str, title: &str, status: StatusCode) -> Self {
        let problem_type = match base_url {
            Some(base) => format!("{}/{slug}", base.trim_end_matches('/')),
            None => "about:blank".to_string(),
        };
        Self {
            problem_type,
            title: title.to_string(),
            status: status.as_u16(),
            detail: None,
            errors: BTreeMap::new(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_errors(mut self, errors: BTreeMap<String, String>) -> Self {
        self.errors = errors;
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            Json(self),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_defaults_to_about_blank() {
        let problem = Problem::new(None, "validation", "Invalid input", StatusCode::BAD_REQUEST);
        assert_eq!(problem.problem_type, "about:blank");
        assert_eq!(problem.status, 400);
    }

    #[test]
    fn type_joins_base_url_and_slug() {
        let problem = Problem::new(
            Some("https://api.example.com/problems/"),
            "validation",
            "Invalid input",
            StatusCode::UNPROCESSABLE_ENTITY,
        );
        assert_eq!(
            problem.problem_type,
            "https://api.example.com/problems/validation"
        );
    }

    #[test]
    fn empty_optional_fields_are_omitted_from_json() {
        let problem = Problem::new(None, "internal", "Server error", StatusCode::INTERNAL_SERVER_ERROR);
        let json = serde_json::to_string(&problem).unwrap();
        assert!(!json.contains("detail"));
        assert!(!json.contains("errors"));
    }

    #[test]
    fn errors_map_is_serialized_when_present() {
        let errors = BTreeMap::from([("body".to_string(), "required".to_string())]);
        let problem = Problem::new(None, "validation", "Invalid input", StatusCode::UNPROCESSABLE_ENTITY)
            .with_errors(errors);
        let json = serde_json::to_string(&problem).unwrap();
        assert!(json.contains("\"errors\":{\"body\":\"required\"}"));
    }
}
