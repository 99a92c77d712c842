// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Navigation menu builder trait exposed by the host admin shell.

use crate::types::{MenuIntent, MenuItem};

/// A mutable navigation menu under construction.
///
/// The host admin shell passes its builder to each module's navigation
/// contributor synchronously during menu assembly. Items are ordered by
/// ascending weight; ties keep insertion order.
pub trait MenuBuilder {
    /// Whether the menu carries the given intent.
    fn has_intent(&self, intent: MenuIntent) -> bool;

    /// Append an item at the given priority weight.
    fn add_item(&mut self, item: MenuItem, weight: i32);
}
