//! Character allow-list and deny-list filters
//!
//! All filters work on single characters and keep the survivors in their
//! original order, so every result is a subsequence of the input.

const DIGITS: &str = "1234567890";
const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Punctuation kept by [`remove_special_characters`] on top of ASCII
/// letters, digits and space.
const SAFE_PUNCTUATION: &str = "+-*=(),.:!_";

/// True when every character is an ASCII decimal digit.
///
/// The empty string counts as numeric: it has no offending character.
///
/// # Examples
///
/// ```
/// use helpful_extensions::text::is_numeric;
///
/// assert!(is_numeric("0042"));
/// assert!(!is_numeric("4.2"));
/// ```
pub fn is_numeric(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit())
}

/// Keeps only the characters that appear in `allowed`.
pub fn keep(s: &str, allowed: &str) -> String {
    s.chars().filter(|c| allowed.contains(*c)).collect()
}

/// Drops every character that appears in `denied`.
pub fn exclude(s: &str, denied: &str) -> String {
    s.chars().filter(|c| !denied.contains(*c)).collect()
}

pub fn numbers_only(s: &str) -> String {
    keep(s, DIGITS)
}

/// Digits plus the `.` decimal point, e.g. `"$1,234.50"` -> `"1234.50"`.
pub fn numbers_with_decimal_only(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

pub fn numbers_exempt(s: &str) -> String {
    exclude(s, DIGITS)
}

pub fn characters_only(s: &str) -> String {
    keep(s, LETTERS)
}

pub fn characters_exempt(s: &str) -> String {
    exclude(s, LETTERS)
}

/// Keeps ASCII letters, digits, space and `+-*=(),.:!_`.
///
/// # Examples
///
/// ```
/// use helpful_extensions::text::remove_special_characters;
///
/// assert_eq!(remove_special_characters("Total: $5 (approx.)"), "Total: 5 (approx.)");
/// ```
pub fn remove_special_characters(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ' || SAFE_PUNCTUATION.contains(*c))
        .collect()
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn is_subsequence(needle: &str, haystack: &str) -> bool {
        let mut rest = haystack.chars();
        needle.chars().all(|c| rest.any(|h| h == c))
    }

    proptest! {
        #[test]
        fn test_numbers_only_digits_and_subsequence(input in "\\PC*") {
            let digits = numbers_only(&input);
            prop_assert!(digits.chars().all(|c| c.is_ascii_digit()));
            prop_assert!(is_subsequence(&digits, &input));
        }

        #[test]
        fn test_numbers_only_is_numeric(input in "\\PC*") {
            prop_assert!(is_numeric(&numbers_only(&input)));
        }

        #[test]
        fn test_keep_and_exclude_partition(input in "\\PC*", set in "[a-z0-9]{0,8}") {
            let kept = keep(&input, &set);
            let dropped = exclude(&input, &set);
            prop_assert_eq!(
                kept.chars().count() + dropped.chars().count(),
                input.chars().count()
            );
        }

        #[test]
        fn test_remove_special_characters_is_idempotent(input in "\\PC*") {
            let once = remove_special_characters(&input);
            prop_assert_eq!(remove_special_characters(&once), once.clone());
        }
    }
}
