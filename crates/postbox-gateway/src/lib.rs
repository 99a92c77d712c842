// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP API gateway for the Postbox contact-form backend.
//!
//! Exposes the public submission endpoint and the admin forms CRUD surface,
//! translating service outcomes into status codes and RFC 7807 problem
//! bodies.

pub mod handlers;
pub mod problem;
pub mod server;

pub use problem::Problem;
pub use server::{GatewayState, HealthState, ServerConfig, router, start_server};
