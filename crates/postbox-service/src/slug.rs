// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! URL-safe slug derivation for form identifiers.

/// Derive a lower-case, ASCII, hyphen-separated slug from a display name.
///
/// Runs of non-alphanumeric characters collapse into a single hyphen;
/// leading and trailing separators are dropped.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c.to_ascii_lowercase());
            pending_hyphen = false;
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_name() {
        assert_eq!(slugify("My Form!"), "my-form");
    }

    #[test]
    fn collapses_separator_runs() {
        assert_eq!(slugify("Contact -- Us"), "contact-us");
    }

    #[test]
    fn drops_leading_and_trailing_separators() {
        assert_eq!(slugify("  Hello  "), "hello");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(slugify("Form 2 (beta)"), "form-2-beta");
    }

    #[test]
    fn non_ascii_becomes_separator() {
        assert_eq!(slugify("café form"), "caf-form");
    }
}
