// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./postbox.toml` > `~/.config/postbox/postbox.toml`
//! > `/etc/postbox/postbox.toml` with environment variable overrides via the
//! `POSTBOX_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::PostboxConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/postbox/postbox.toml` (system-wide)
/// 3. `~/.config/postbox/postbox.toml` (user XDG config)
/// 4. `./postbox.toml` (local directory)
/// 5. `POSTBOX_*` environment variables
pub fn load_config() -> Result<PostboxConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<PostboxConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PostboxConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PostboxConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PostboxConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PostboxConfig::default()))
        .merge(Toml::file("/etc/postbox/postbox.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("postbox/postbox.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("postbox.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `POSTBOX_SMTP_FROM_ADDRESS` must map to
/// `smtp.from_address`, not `smtp.from.address`.
fn env_provider() -> Env {
    Env::prefixed("POSTBOX_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: POSTBOX_SMTP_FROM_ADDRESS -> "smtp_from_address"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("service_", "service.", 1)
            .replacen("server_", "server.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("smtp_", "smtp.", 1);
        mapped.into()
    })
}
