//! String helpers
//!
//! Offsets and lengths here count user-perceived characters (extended
//! grapheme clusters), never bytes, so `"e\u{301}"` has length 1.
//!
//! - [`filters`]: allow-list / deny-list character filters
//! - [`convert`]: decimal and currency conversion, escape reversal
//!
//! Everything is also reachable as methods through [`TextExt`]:
//!
//! ```
//! use helpful_extensions::text::TextExt;
//!
//! assert_eq!("(555) 010-2030".numbers_only(), "5550102030");
//! assert_eq!("héllo".substring_at(1, 3).unwrap(), "éll");
//! ```

pub mod convert;
pub mod filters;

use crate::core::error::{Error, Result};
use crate::numeric::{DecimalValue, Locale};
use unicode_segmentation::UnicodeSegmentation;

pub use convert::{currency_value, decimal_value, unescaped};
pub use filters::{
    characters_exempt, characters_only, exclude, is_numeric, keep, numbers_exempt, numbers_only,
    numbers_with_decimal_only, remove_special_characters,
};

/// Number of user-perceived characters in `s`.
pub fn length(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Strips leading and trailing whitespace and newlines.
pub fn trim(s: &str) -> &str {
    s.trim()
}

/// Returns `length` characters starting at character offset `location`.
///
/// # Errors
///
/// Returns [`Error::Range`] if `location + length` is past the end.
pub fn substring(s: &str, location: usize, length: usize) -> Result<&str> {
    let bounds: Vec<usize> = s
        .grapheme_indices(true)
        .map(|(idx, _)| idx)
        .chain(std::iter::once(s.len()))
        .collect();
    let len = bounds.len() - 1;

    let end = location
        .checked_add(length)
        .filter(|&end| end <= len)
        .ok_or(Error::Range {
            location,
            length,
            len,
        })?;

    Ok(&s[bounds[location]..bounds[end]])
}

/// The single character at `index`.
///
/// # Errors
///
/// Returns [`Error::Range`] if `index` is out of bounds.
pub fn char_at(s: &str, index: usize) -> Result<&str> {
    substring(s, index, 1)
}

/// Character offset of the first occurrence of `other`.
///
/// Only matches starting on a character boundary count, so a lone
/// combining mark is not found inside `"e\u{301}"`. An empty needle is
/// never found.
pub fn location_of(s: &str, other: &str) -> Option<usize> {
    if other.is_empty() {
        return None;
    }
    let starts: Vec<usize> = s.grapheme_indices(true).map(|(idx, _)| idx).collect();
    s.match_indices(other)
        .find_map(|(byte, _)| starts.binary_search(&byte).ok())
}

/// Substring containment; an empty needle is not contained.
pub fn contains(s: &str, other: &str) -> bool {
    location_of(s, other).is_some()
}

/// Method-call access to the text helpers.
///
/// `trim` and `contains` are left to `str`'s inherent methods, which already
/// behave the same way for non-empty needles.
pub trait TextExt {
    fn length(&self) -> usize;
    fn substring_at(&self, location: usize, length: usize) -> Result<&str>;
    fn char_at(&self, index: usize) -> Result<&str>;
    fn location_of(&self, other: &str) -> Option<usize>;
    fn is_numeric(&self) -> bool;
    fn numbers_only(&self) -> String;
    fn numbers_with_decimal_only(&self) -> String;
    fn numbers_exempt(&self) -> String;
    fn characters_only(&self) -> String;
    fn characters_exempt(&self) -> String;
    fn keep(&self, allowed: &str) -> String;
    fn exclude(&self, denied: &str) -> String;
    fn remove_special_characters(&self) -> String;
    fn decimal_value(&self) -> DecimalValue;
    fn currency_value(&self, locale: Locale) -> String;
    fn unescaped(&self) -> String;
}

impl TextExt for str {
    fn length(&self) -> usize {
        length(self)
    }

    fn substring_at(&self, location: usize, length: usize) -> Result<&str> {
        substring(self, location, length)
    }

    fn char_at(&self, index: usize) -> Result<&str> {
        char_at(self, index)
    }

    fn location_of(&self, other: &str) -> Option<usize> {
        location_of(self, other)
    }

    fn is_numeric(&self) -> bool {
        is_numeric(self)
    }

    fn numbers_only(&self) -> String {
        numbers_only(self)
    }

    fn numbers_with_decimal_only(&self) -> String {
        numbers_with_decimal_only(self)
    }

    fn numbers_exempt(&self) -> String {
        numbers_exempt(self)
    }

    fn characters_only(&self) -> String {
        characters_only(self)
    }

    fn characters_exempt(&self) -> String {
        characters_exempt(self)
    }

    fn keep(&self, allowed: &str) -> String {
        keep(self, allowed)
    }

    fn exclude(&self, denied: &str) -> String {
        exclude(self, denied)
    }

    fn remove_special_characters(&self) -> String {
        remove_special_characters(self)
    }

    fn decimal_value(&self) -> DecimalValue {
        decimal_value(self)
    }

    fn currency_value(&self, locale: Locale) -> String {
        currency_value(self, locale)
    }

    fn unescaped(&self) -> String {
        unescaped(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_counts_graphemes() {
        assert_eq!(length(""), 0);
        assert_eq!(length("abc"), 3);
        assert_eq!(length("e\u{301}"), 1);
        assert_eq!(length("🇨🇦!"), 2);
    }

    #[test]
    fn test_trim_whitespace_and_newlines() {
        assert_eq!(trim("  hello \n\t"), "hello");
        assert_eq!(trim("\r\nline\u{2028}"), "line");
        assert_eq!(trim("inner  space"), "inner  space");
    }

    #[test]
    fn test_substring_basic() {
        assert_eq!(substring("Hello, world", 7, 5).unwrap(), "world");
        assert_eq!(substring("abc", 0, 0).unwrap(), "");
        assert_eq!(substring("abc", 3, 0).unwrap(), "");
    }

    #[test]
    fn test_substring_multibyte() {
        assert_eq!(substring("naïve café", 6, 4).unwrap(), "café");
        assert_eq!(substring("a🇨🇦b", 1, 1).unwrap(), "🇨🇦");
    }

    #[test]
    fn test_substring_out_of_range() {
        let err = substring("abc", 2, 2).unwrap_err();
        assert!(matches!(
            err,
            Error::Range {
                location: 2,
                length: 2,
                len: 3
            }
        ));
        assert!(substring("abc", usize::MAX, 2).is_err());
    }

    #[test]
    fn test_char_at() {
        assert_eq!(char_at("rust", 0).unwrap(), "r");
        assert_eq!(char_at("rust", 3).unwrap(), "t");
        assert!(char_at("rust", 4).is_err());
    }

    #[test]
    fn test_location_of() {
        assert_eq!(location_of("hello world", "world"), Some(6));
        assert_eq!(location_of("héllo", "llo"), Some(2));
        assert_eq!(location_of("hello", "xyz"), None);
        assert_eq!(location_of("hello", ""), None);
    }

    #[test]
    fn test_location_of_skips_mid_character_matches() {
        assert_eq!(location_of("e\u{301}x", "\u{301}"), None);
        assert_eq!(location_of("e\u{301}x", "x"), Some(1));
        // first hit is inside a cluster, the one after the newline is not
        assert_eq!(location_of("e\u{301}\n\u{301}", "\u{301}"), Some(2));
        assert!(!contains("🇨🇦", "🇦"));
    }

    #[test]
    fn test_contains() {
        assert!(contains("hello world", "o w"));
        assert!(!contains("hello", "Hello"));
        assert!(!contains("hello", ""));
    }

    #[test]
    fn test_text_ext_delegates() {
        assert_eq!("a1b2".numbers_only(), "12");
        assert_eq!("a1b2".characters_only(), "ab");
        assert_eq!("abc".length(), 3);
        assert_eq!("abc".char_at(1).unwrap(), "b");
        assert_eq!("12.5".decimal_value().to_string(), "12.5");
    }
}
