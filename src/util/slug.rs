//! Slug derivation for page names and artifact identifiers

use rand::Rng;

/// Fallback slug used when the input contains no alphanumeric characters.
/// An empty slug would produce invalid folder and archive paths downstream.
pub const DEFAULT_SLUG: &str = "landing-page";

/// Length of the random base36 suffix appended to page identifiers
const SUFFIX_LEN: usize = 5;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Derive a filesystem/URL-safe slug from a free-text page name
///
/// - Lowercase
/// - Runs of non-alphanumeric characters collapse to a single hyphen
/// - No leading or trailing hyphens
/// - Falls back to "landing-page" when nothing survives
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_sep = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }

    if out.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        out
    }
}

/// Generate a page identifier from a page name: `<slug>-<base36 suffix>`
///
/// The suffix keeps identifiers unique when the same page name is saved
/// repeatedly.
pub fn generate_page_id(page_name: &str) -> String {
    format!("{}-{}", slugify(page_name), random_suffix())
}

fn random_suffix() -> String {
    let mut rng = rand::rng();
    (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("My Cool App!"), "my-cool-app");
        assert_eq!(slugify("My Awesome Product"), "my-awesome-product");
        assert_eq!(slugify("already-slugged"), "already-slugged");
    }

    #[test]
    fn test_slugify_collapses_runs() {
        assert_eq!(slugify("a  --  b"), "a-b");
        assert_eq!(slugify("hello___world"), "hello-world");
    }

    #[test]
    fn test_slugify_trims_separators() {
        assert_eq!(slugify("  padded  "), "padded");
        assert_eq!(slugify("!!bang!!"), "bang");
    }

    #[test]
    fn test_slugify_falls_back_on_symbols_only() {
        assert_eq!(slugify("***"), DEFAULT_SLUG);
        assert_eq!(slugify(""), DEFAULT_SLUG);
        assert_eq!(slugify("   "), DEFAULT_SLUG);
    }

    #[test]
    fn test_generate_page_id_shape() {
        let id = generate_page_id("My Cool App!");
        let (slug, suffix) = id.rsplit_once('-').unwrap();
        assert_eq!(slug, "my-cool-app");
        assert_eq!(suffix.len(), 5);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    proptest! {
        #[test]
        fn slug_is_always_wellformed(input in ".{0,64}") {
            let slug = slugify(&input);
            prop_assert!(!slug.is_empty());
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
            prop_assert!(slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }
    }
}
