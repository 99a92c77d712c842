// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin navigation contribution.
//!
//! The host admin shell calls [`NavigationContributor::register`]
//! synchronously while assembling its menu. The contributor appends one
//! "Contact" dropdown (with a nested forms-list item) to menus carrying the
//! primary intent, and leaves every other menu alone.

use postbox_core::{MenuBuilder, MenuIntent, MenuItem};

/// Priority weight of the contact entry within the primary menu.
pub const BASE_WEIGHT: i32 = 900;

/// Admin resource gating the contact forms screens.
const CONTACT_FORMS_RESOURCE: &str = "contact_forms";

/// Contributes the contact module's entries to the host navigation menu.
pub struct NavigationContributor {
    forms_route: String,
}

impl NavigationContributor {
    /// Create a contributor linking to the given admin forms-list route.
    pub fn new(forms_route: impl Into<String>) -> Self {
        Self {
            forms_route: forms_route.into(),
        }
    }

    /// Decorate the menu, if it carries the primary intent.
    pub fn register(&self, menu: &mut dyn MenuBuilder) {
        if !menu.has_intent(MenuIntent::Primary) {
            return;
        }

        menu.add_item(self.contact_item(), BASE_WEIGHT);
    }

    /// The top-level "Contact" dropdown item.
    fn contact_item(&self) -> MenuItem {
        MenuItem {
            label: "contact:contact".to_string(),
            route: String::new(),
            icon: "contacts".to_string(),
            resource: Some(admin_resource(CONTACT_FORMS_RESOURCE)),
            children: vec![self.forms_item()],
        }
    }

    /// The nested forms-list item.
    fn forms_item(&self) -> MenuItem {
        MenuItem {
            label: "contact:forms".to_string(),
            route: self.forms_route.clone(),
            icon: "assignment".to_string(),
            resource: Some(admin_resource(CONTACT_FORMS_RESOURCE)),
            children: Vec::new(),
        }
    }
}

impl Default for NavigationContributor {
    fn default() -> Self {
        Self::new("/admin/contact/forms")
    }
}

fn admin_resource(resource: &str) -> String {
    format!("admin_resource_{resource}")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Menu mock recording added items.
    struct RecordingMenu {
        intents: Vec<MenuIntent>,
        items: Vec<(MenuItem, i32)>,
    }

    impl RecordingMenu {
        fn with_intents(intents: Vec<MenuIntent>) -> Self {
            Self {
                intents,
                items: Vec::new(),
            }
        }
    }

    impl MenuBuilder for RecordingMenu {
        fn has_intent(&self, intent: MenuIntent) -> bool {
            self.intents.contains(&intent)
        }

        fn add_item(&mut self, item: MenuItem, weight: i32) {
            self.items.push((item, weight));
        }
    }

    #[test]
    fn non_primary_menu_is_left_alone() {
        let mut menu = RecordingMenu::with_intents(vec![MenuIntent::Footer]);
        NavigationContributor::default().register(&mut menu);
        assert!(menu.items.is_empty());
    }

    #[test]
    fn primary_menu_gets_one_dropdown_at_base_weight() {
        let mut menu = RecordingMenu::with_intents(vec![MenuIntent::Primary]);
        NavigationContributor::default().register(&mut menu);

        assert_eq!(menu.items.len(), 1);
        let (item, weight) = &menu.items[0];
        assert_eq!(*weight, BASE_WEIGHT);
        assert_eq!(item.label, "contact:contact");
        assert_eq!(item.icon, "contacts");
        assert_eq!(
            item.resource.as_deref(),
            Some("admin_resource_contact_forms")
        );
    }

    #[test]
    fn dropdown_nests_the_forms_item() {
        let mut menu = RecordingMenu::with_intents(vec![MenuIntent::Primary]);
        NavigationContributor::new("/admin/forms").register(&mut menu);

        let (item, _) = &menu.items[0];
        assert_eq!(item.children.len(), 1);
        let child = &item.children[0];
        assert_eq!(child.label, "contact:forms");
        assert_eq!(child.route, "/admin/forms");
        assert_eq!(child.icon, "assignment");
        assert_eq!(
            child.resource.as_deref(),
            Some("admin_resource_contact_forms")
        );
        assert!(child.children.is_empty());
    }
}
