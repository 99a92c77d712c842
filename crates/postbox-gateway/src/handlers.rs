// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the contact API.
//!
//! `POST /api/messages` drives the full submission pipeline: validate
//! against the referenced form, fill the entity, archive, deliver. The
//! remaining message verbs are 501 stubs. `/api/forms` is the admin CRUD
//! surface over form definitions.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use postbox_core::{Entity, Form, PostboxError};
use postbox_service::{FillOutcome, MessageService};

use crate::problem::Problem;
use crate::server::GatewayState;

const MSG_CREATE_FAILURE: &str = "creating message failed";
const FORM_WRITE_FAILURE: &str = "writing form failed";

/// Request body for `POST /api/messages`.
///
/// Everything besides `form_id` is passed through to the form's validator
/// as raw fields.
#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    /// Identifier (or id) of the form this submission belongs to.
    pub form_id: String,
    /// Raw submitted fields: subject, body, from_name, from_email, from_phone.
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_secs: u64,
}

/// Response body for `GET /api/forms`.
#[derive(Debug, Serialize)]
pub struct FormListResponse {
    pub forms: Vec<Form>,
}

/// POST /api/messages
///
/// 204 on success; 422 with a field-error map on validation failure; 400
/// for an unknown form or malformed body; 500 otherwise.
pub async fn create_message(
    State(state): State<GatewayState>,
    payload: Result<Json<CreateMessageRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(&state, rejection),
    };

    let mut service = state.messages.lock().await;

    let errors = match service.validate(&body.form_id, &body.fields).await {
        Ok(errors) => errors,
        Err(e) => return service_problem(&state, MSG_CREATE_FAILURE, e),
    };
    if !errors.is_empty() {
        return Problem::new(
            state.problem_base_url.as_deref(),
            "validation",
            MSG_CREATE_FAILURE,
            StatusCode::UNPROCESSABLE_ENTITY,
        )
        .with_errors(errors)
        .into_response();
    }

    let entity = Entity::Message(MessageService::new_message());
    let message = match service.fill_entity(&body.form_id, entity, &body.fields).await {
        Ok(FillOutcome::Filled(message)) => message,
        Ok(FillOutcome::Unresolved(_)) => {
            // The form vanished between validate and fill.
            return service_problem(
                &state,
                MSG_CREATE_FAILURE,
                PostboxError::InvalidInput(format!("unknown form `{}`", body.form_id)),
            );
        }
        Err(e) => return service_problem(&state, MSG_CREATE_FAILURE, e),
    };

    if let Err(e) = state.archive.archive(&message).await {
        return service_problem(&state, MSG_CREATE_FAILURE, e);
    }

    match service.send(&message).await {
        Ok(0) => {
            let failed = service.failed_recipients().await;
            warn!(?failed, message_id = %message.id, "message archived but delivery failed");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => service_problem(&state, MSG_CREATE_FAILURE, e),
    }
}

/// GET /api/messages (not implemented).
pub async fn list_messages() -> StatusCode {
    StatusCode::NOT_IMPLEMENTED
}

/// GET /api/messages/{id} (not implemented).
pub async fn get_message(Path(_id): Path<String>) -> StatusCode {
    StatusCode::NOT_IMPLEMENTED
}

/// PUT /api/messages/{id} (not implemented).
pub async fn update_message(Path(_id): Path<String>) -> StatusCode {
    StatusCode::NOT_IMPLEMENTED
}

/// DELETE /api/messages/{id} (not implemented).
pub async fn delete_message(Path(_id): Path<String>) -> StatusCode {
    StatusCode::NOT_IMPLEMENTED
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
    })
}

/// GET /api/forms
pub async fn list_forms(State(state): State<GatewayState>) -> Response {
    match state.forms.list().await {
        Ok(forms) => Json(FormListResponse { forms }).into_response(),
        Err(e) => service_problem(&state, "listing forms failed", e),
    }
}

/// POST /api/forms
pub async fn create_form(
    State(state): State<GatewayState>,
    payload: Result<Json<BTreeMap<String, String>>, JsonRejection>,
) -> Response {
    let Json(fields) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(&state, rejection),
    };

    let errors = state.forms.validate(&fields);
    if !errors.is_empty() {
        return Problem::new(
            state.problem_base_url.as_deref(),
            "validation",
            FORM_WRITE_FAILURE,
            StatusCode::UNPROCESSABLE_ENTITY,
        )
        .with_errors(errors)
        .into_response();
    }

    match state.forms.create(&fields).await {
        Ok(form) => (StatusCode::CREATED, Json(form)).into_response(),
        Err(e) => service_problem(&state, FORM_WRITE_FAILURE, e),
    }
}

/// GET /api/forms/{id}
pub async fn get_form(State(state): State<GatewayState>, Path(id): Path<String>) -> Response {
    match state.forms.get(&id).await {
        Ok(Some(form)) => Json(form).into_response(),
        Ok(None) => form_not_found(&state, &id),
        Err(e) => service_problem(&state, "reading form failed", e),
    }
}

/// PUT /api/forms/{id}
pub async fn update_form(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    payload: Result<Json<BTreeMap<String, String>>, JsonRejection>,
) -> Response {
    let Json(fields) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(&state, rejection),
    };

    let errors = state.forms.validate(&fields);
    if !errors.is_empty() {
        return Problem::new(
            state.problem_base_url.as_deref(),
            "validation",
            FORM_WRITE_FAILURE,
            StatusCode::UNPROCESSABLE_ENTITY,
        )
        .with_errors(errors)
        .into_response();
    }

    match state.forms.update(&id, &fields).await {
        Ok(Some(form)) => Json(form).into_response(),
        Ok(None) => form_not_found(&state, &id),
        Err(e) => service_problem(&state, FORM_WRITE_FAILURE, e),
    }
}

/// DELETE /api/forms/{id}
pub async fn delete_form(State(state): State<GatewayState>, Path(id): Path<String>) -> Response {
    match state.forms.delete(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => service_problem(&state, "deleting form failed", e),
    }
}

fn malformed_body(state: &GatewayState, rejection: JsonRejection) -> Response {
    Problem::new(
        state.problem_base_url.as_deref(),
        "malformed-body",
        "malformed request body",
        StatusCode::BAD_REQUEST,
    )
    .with_detail(rejection.body_text())
    .into_response()
}

fn form_not_found(state: &GatewayState, id: &str) -> Response {
    Problem::new(
        state.problem_base_url.as_deref(),
        "not-found",
        "form not found",
        StatusCode::NOT_FOUND,
    )
    .with_detail(format!("no form with id `{id}`"))
    .into_response()
}

/// Convert a service error into a problem response, logging it.
fn service_problem(state: &GatewayState, title: &str, err: PostboxError) -> Response {
    error!(error = %err, "{title}");
    match err {
        PostboxError::InvalidInput(detail) => Problem::new(
            state.problem_base_url.as_deref(),
            "invalid-input",
            title,
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .into_response(),
        _ => Problem::new(
            state.problem_base_url.as_deref(),
            "internal",
            title,
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .into_response(),
    }
}
