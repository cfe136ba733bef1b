//! Locale-aware name comparison.
//!
//! Approximates the default collation of a browser `localeCompare`.
//! Strings are compared on three levels: base letters after compatibility
//! decomposition (accents and case ignored), then accents, then case.
//! Canonically equivalent strings (composed `é` and `e` + U+0301) compare
//! equal.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Precomputed sort key, ordered level by level.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: String,
    secondary: String,
    tertiary: Vec<bool>,
}

/// Build the sort key of `s`.
pub fn collation_key(s: &str) -> CollationKey {
    let mut primary = String::with_capacity(s.len());
    for c in s.nfkd().filter(|&c| !is_combining_mark(c)).flat_map(char::to_lowercase) {
        match expand_letter(c) {
            Some(expansion) => primary.push_str(expansion),
            None => primary.push(c),
        }
    }

    CollationKey {
        primary,
        secondary: s.to_lowercase().nfd().collect(),
        tertiary: s.nfd().map(char::is_uppercase).collect(),
    }
}

/// Compare two names the way a locale-aware sort would.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b))
}

/// Letters with no decomposition that sort as their base letters.
fn expand_letter(c: char) -> Option<&'static str> {
    Some(match c {
        'ß' => "ss",
        'æ' => "ae",
        'œ' => "oe",
        'ø' => "o",
        'ł' => "l",
        'đ' | 'ð' => "d",
        'þ' => "th",
        'ı' => "i",
        _ => return None,
    })
}
