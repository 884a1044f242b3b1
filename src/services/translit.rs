//! Slug derivation
//!
//! Turns a note title into a URL-safe ASCII slug: Cyrillic characters are
//! transliterated, everything is lowercased, and runs of non-alphanumeric
//! characters collapse into single hyphens.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Maximum slug length, matching the `notes.slug` column
const MAX_SLUG_LEN: usize = 100;

/// Cyrillic-to-Latin transliteration table (lowercase)
static TRANSLIT: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ('а', "a"),
        ('б', "b"),
        ('в', "v"),
        ('г', "g"),
        ('д', "d"),
        ('е', "e"),
        ('ё', "e"),
        ('ж', "zh"),
        ('з', "z"),
        ('и', "i"),
        ('й', "j"),
        ('к', "k"),
        ('л', "l"),
        ('м', "m"),
        ('н', "n"),
        ('о', "o"),
        ('п', "p"),
        ('р', "r"),
        ('с', "s"),
        ('т', "t"),
        ('у', "u"),
        ('ф', "f"),
        ('х', "h"),
        ('ц', "c"),
        ('ч', "ch"),
        ('ш', "sh"),
        ('щ', "sch"),
        ('ъ', ""),
        ('ы', "y"),
        ('ь', ""),
        ('э', "e"),
        ('ю', "yu"),
        ('я', "ya"),
    ])
});

/// Derive a URL-safe ASCII slug from a title.
///
/// Characters with no transliteration and no ASCII-alphanumeric form are
/// treated as separators; separators collapse into single hyphens and are
/// trimmed from both ends. The result is truncated to the slug column
/// limit.
pub fn slugify(title: &str) -> String {
    let mut raw = String::with_capacity(title.len());

    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            raw.push(c);
        } else if let Some(mapped) = TRANSLIT.get(&c) {
            raw.push_str(mapped);
        } else {
            // Separator: whitespace, punctuation, untransliterable symbols
            raw.push('-');
        }
    }

    // Collapse consecutive hyphens and trim hyphens from both ends
    let mut slug = String::with_capacity(raw.len());
    let mut prev_hyphen = false;

    for c in raw.chars() {
        if c == '-' {
            if !prev_hyphen && !slug.is_empty() {
                slug.push(c);
                prev_hyphen = true;
            }
        } else {
            slug.push(c);
            prev_hyphen = false;
        }
    }

    slug.truncate(MAX_SLUG_LEN);
    slug.trim_end_matches('-').to_string()
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn slug_is_url_safe_ascii(title in "\\PC{0,80}") {
            let slug = slugify(&title);
            prop_assert!(slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }

        #[test]
        fn slug_has_no_hyphen_runs_or_edges(title in "\\PC{0,80}") {
            let slug = slugify(&title);
            prop_assert!(!slug.contains("--"));
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
        }

        #[test]
        fn slug_is_bounded(title in "\\PC{0,500}") {
            prop_assert!(slugify(&title).len() <= MAX_SLUG_LEN);
        }

        #[test]
        fn slug_is_deterministic(title in "\\PC{0,80}") {
            prop_assert_eq!(slugify(&title), slugify(&title));
        }
    }
}
