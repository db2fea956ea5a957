//! Numeric conversions and escape reversal

use crate::numeric::{DecimalValue, Locale, format_currency};
use crate::text::filters::numbers_with_decimal_only;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use tracing::warn;

/// Escape tokens and the characters they stand for, in replacement order.
const ESCAPES: [(&str, &str); 7] = [
    ("\\0", "\0"),
    ("\\t", "\t"),
    ("\\n", "\n"),
    ("\\r", "\r"),
    ("\\\"", "\""),
    ("\\'", "'"),
    ("\\\\", "\\"),
];

/// Longest leading float literal after optional whitespace: sign, digits,
/// fraction and exponent. Trailing garbage is ignored, `"12abc"` reads as 12.
fn leading_number(s: &str) -> Option<&str> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut digit_count = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        digit_count += frac_end - (end + 1);
        end = frac_end;
    }

    if digit_count == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    Some(&s[..end])
}

/// Reads the text as a money amount, rounded half-to-even to 2 places.
///
/// Only positive amounts survive: negative, zero and unreadable input all
/// come back as zero, so `"-5"` and `"abc"` are both `0`. Amounts above
/// [`Decimal::MAX`] saturate to it.
///
/// # Examples
///
/// ```
/// use helpful_extensions::text::decimal_value;
///
/// assert_eq!(decimal_value("12.345").to_string(), "12.34");
/// assert_eq!(decimal_value("12.355").to_string(), "12.36");
/// assert!(decimal_value("-5").is_zero());
/// ```
pub fn decimal_value(s: &str) -> DecimalValue {
    let Some(number) = leading_number(s) else {
        return DecimalValue::ZERO;
    };

    let approx = number.parse::<f64>().unwrap_or_default();
    if approx <= 0.0 {
        return DecimalValue::ZERO;
    }

    let exact = Decimal::from_str(number)
        .or_else(|_| Decimal::from_scientific(number))
        .ok()
        .or_else(|| Decimal::from_f64(approx));
    match exact {
        Some(exact) => {
            DecimalValue::from(exact.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
        }
        None if approx >= 1.0 => {
            warn!(number, "Amount out of range, saturating to Decimal::MAX");
            DecimalValue::from(Decimal::MAX)
        }
        None => DecimalValue::ZERO,
    }
}

/// Formats whatever digits and decimal point the text holds as a currency
/// string in `locale`.
///
/// Text without digits formats as zero. A second decimal point ends the
/// number: `"1.2.3"` reads as `1.2`. Amounts above [`Decimal::MAX`] format
/// as that maximum.
///
/// # Examples
///
/// ```
/// use helpful_extensions::numeric::Locale;
/// use helpful_extensions::text::currency_value;
///
/// assert_eq!(currency_value("USD 1234.5", Locale::EnUs), "$1,234.50");
/// assert_eq!(currency_value("n/a", Locale::EnUs), "$0.00");
/// ```
pub fn currency_value(s: &str, locale: Locale) -> String {
    let digits = numbers_with_decimal_only(s);
    let mut parts = digits.split('.');
    let int_part = parts.next().unwrap_or_default();
    let frac_part = parts.next().unwrap_or_default();

    let literal = match (int_part.is_empty(), frac_part.is_empty()) {
        (true, true) => String::from("0"),
        (false, true) => int_part.to_string(),
        (true, false) => format!("0.{frac_part}"),
        (false, false) => format!("{int_part}.{frac_part}"),
    };

    let amount = match Decimal::from_str(&literal) {
        Ok(amount) => amount,
        Err(_) if !int_part.trim_start_matches('0').is_empty() => {
            warn!(%literal, "Amount out of range, saturating to Decimal::MAX");
            Decimal::MAX
        }
        Err(_) => Decimal::ZERO,
    };
    format_currency(amount, locale)
}

/// Turns the escape tokens `\0 \t \n \r \" \' \\` back into the characters
/// they stand for.
pub fn unescaped(s: &str) -> String {
    ESCAPES
        .iter()
        .fold(s.to_string(), |current, (token, literal)| {
            current.replace(token, literal)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("12.5"), Some("12.5"));
        assert_eq!(leading_number("  -3.25xyz"), Some("-3.25"));
        assert_eq!(leading_number("1e3 apples"), Some("1e3"));
        assert_eq!(leading_number("7e"), Some("7"));
        assert_eq!(leading_number(".5"), Some(".5"));
        assert_eq!(leading_number("5."), Some("5."));
        assert_eq!(leading_number("."), None);
        assert_eq!(leading_number("abc"), None);
        assert_eq!(leading_number(""), None);
    }

    #[test]
    fn test_decimal_value_bankers_rounding() {
        assert_eq!(decimal_value("12.345").inner(), dec!(12.34));
        assert_eq!(decimal_value("12.355").inner(), dec!(12.36));
        assert_eq!(decimal_value("0.125").inner(), dec!(0.12));
        assert_eq!(decimal_value("0.135").inner(), dec!(0.14));
        assert_eq!(decimal_value("2.5").inner(), dec!(2.5));
    }

    #[test]
    fn test_decimal_value_collapses_non_positive() {
        assert!(decimal_value("-5").is_zero());
        assert!(decimal_value("abc").is_zero());
        assert!(decimal_value("0").is_zero());
        assert!(decimal_value("").is_zero());
        assert!(decimal_value("-0.01").is_zero());
    }

    #[test]
    fn test_decimal_value_reads_prefix_and_exponent() {
        assert_eq!(decimal_value("  42 dollars").inner(), dec!(42));
        assert_eq!(decimal_value("1.5e2").inner(), dec!(150));
        assert_eq!(decimal_value("5.").inner(), dec!(5));
    }

    #[test]
    fn test_currency_value() {
        assert_eq!(currency_value("1234.5", Locale::EnUs), "$1,234.50");
        assert_eq!(currency_value("$ 99", Locale::EnUs), "$99.00");
        assert_eq!(currency_value("", Locale::EnUs), "$0.00");
        assert_eq!(currency_value("-7", Locale::EnUs), "$7.00");
        assert_eq!(currency_value("1.2.3", Locale::EnUs), "$1.20");
        assert_eq!(currency_value(".5", Locale::EnGb), "£0.50");
    }

    #[test]
    fn test_out_of_range_amounts_saturate() {
        assert_eq!(decimal_value("1e30").inner(), Decimal::MAX);
        assert_eq!(
            decimal_value("123456789012345678901234567890").inner(),
            Decimal::MAX
        );
        // tiny positives still round down to zero
        assert!(decimal_value("1e-40").is_zero());

        let huge = "9".repeat(30);
        let formatted = currency_value(&huge, Locale::EnUs);
        assert_eq!(formatted, format_currency(Decimal::MAX, Locale::EnUs));
        assert!(formatted.starts_with("$79,228,162,514,264,337,593,543,950,335"));
        assert_eq!(currency_value(&format!("0{huge}x"), Locale::EnUs), formatted);
    }

    #[test]
    fn test_unescaped_each_token() {
        assert_eq!(unescaped("a\\nb"), "a\nb");
        assert_eq!(unescaped("a\\tb"), "a\tb");
        assert_eq!(unescaped("say \\\"hi\\\""), "say \"hi\"");
        assert_eq!(unescaped("it\\'s"), "it's");
        assert_eq!(unescaped("nul\\0"), "nul\0");
        assert_eq!(unescaped("cr\\r"), "cr\r");
        assert_eq!(unescaped("back\\\\slash"), "back\\slash");
    }

    #[test]
    fn test_unescaped_without_tokens_is_unchanged() {
        let plain = "nothing to see here\n";
        assert_eq!(unescaped(plain), plain);
        assert_eq!(unescaped(&unescaped("x\\ny")), "x\ny");
    }
}
