//! Catalog key generation.

use std::path::Path;

/// Maximum length of the slug part of a key, in characters.
pub const MAX_SLUG_LEN: usize = 30;

/// Derive the catalog key for `value` found in `file_path`.
///
/// The namespace is the lower-cased file stem with `.` turned into `_`, so
/// `Card.stories.tsx` gets its own `card_stories` namespace instead of nesting
/// under `card`. The slug is the lower-cased
/// value with every run of non-alphanumeric characters collapsed to `_`,
/// trimmed of `_` and cut to [`MAX_SLUG_LEN`] characters. Two long values
/// sharing a prefix therefore map to the same key.
///
/// ```
/// use parlai::core::key::generate_key;
///
/// assert_eq!(
///     generate_key("src/components/Hero.tsx", "Welcome to our amazing platform"),
///     "hero.welcome_to_our_amazing_platfor"
/// );
/// ```
pub fn generate_key(file_path: impl AsRef<Path>, value: &str) -> String {
    let namespace = file_path
        .as_ref()
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_lowercase().replace('.', "_"))
        .unwrap_or_default();

    format!("{}.{}", namespace, slugify(value))
}

fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_separator = false;

    for c in value.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }

    // Truncating can expose a trailing separator.
    let truncated: String = slug.chars().take(MAX_SLUG_LEN).collect();
    truncated.trim_end_matches('_').to_string()
}
