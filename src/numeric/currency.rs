//! Locale-aware currency formatting
//!
//! A small fixed table of currency conventions stands in for a full
//! localization database. Amounts are rounded half-to-even to the locale's
//! fraction digits before printing.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Supported formatting locales.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-US")]
    #[strum(to_string = "en-US", serialize = "en_US")]
    EnUs,
    #[serde(rename = "en-GB")]
    #[strum(to_string = "en-GB", serialize = "en_GB")]
    EnGb,
    #[serde(rename = "de-DE")]
    #[strum(to_string = "de-DE", serialize = "de_DE")]
    DeDe,
    #[serde(rename = "fr-FR")]
    #[strum(to_string = "fr-FR", serialize = "fr_FR")]
    FrFr,
    #[serde(rename = "ja-JP")]
    #[strum(to_string = "ja-JP", serialize = "ja_JP")]
    JaJp,
}

/// How a locale writes money.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyConventions {
    pub symbol: &'static str,
    /// Symbol before the number (`$5`) rather than after (`5 €`)
    pub symbol_first: bool,
    /// Text between symbol and number
    pub symbol_gap: &'static str,
    pub group_separator: &'static str,
    pub decimal_separator: &'static str,
    pub fraction_digits: u32,
}

impl Locale {
    pub fn conventions(&self) -> CurrencyConventions {
        match self {
            Self::EnUs => CurrencyConventions {
                symbol: "$",
                symbol_first: true,
                symbol_gap: "",
                group_separator: ",",
                decimal_separator: ".",
                fraction_digits: 2,
            },
            Self::EnGb => CurrencyConventions {
                symbol: "£",
                symbol_first: true,
                symbol_gap: "",
                group_separator: ",",
                decimal_separator: ".",
                fraction_digits: 2,
            },
            Self::DeDe => CurrencyConventions {
                symbol: "€",
                symbol_first: false,
                symbol_gap: "\u{a0}",
                group_separator: ".",
                decimal_separator: ",",
                fraction_digits: 2,
            },
            Self::FrFr => CurrencyConventions {
                symbol: "€",
                symbol_first: false,
                symbol_gap: "\u{a0}",
                group_separator: "\u{202f}",
                decimal_separator: ",",
                fraction_digits: 2,
            },
            Self::JaJp => CurrencyConventions {
                symbol: "￥",
                symbol_first: true,
                symbol_gap: "",
                group_separator: ",",
                decimal_separator: ".",
                fraction_digits: 0,
            },
        }
    }

    /// Locale from the POSIX environment (`LC_ALL`, `LC_MONETARY`, `LANG`).
    ///
    /// Values like `de_DE.UTF-8` are matched on the part before the dot;
    /// anything unknown falls back to the default.
    pub fn from_env() -> Self {
        Self::from_vars(|var| std::env::var(var).ok())
    }

    /// [`Locale::from_env`] over an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        ["LC_ALL", "LC_MONETARY", "LANG"]
            .into_iter()
            .filter_map(lookup)
            .find(|value| !value.is_empty())
            .and_then(|value| {
                let tag = value.split(['.', '@']).next().unwrap_or_default();
                tag.parse().ok()
            })
            .unwrap_or_default()
    }
}

fn group_thousands(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

/// Formats `amount` in the currency style of `locale`.
///
/// Negative amounts get a leading `-`.
///
/// # Examples
///
/// ```
/// use helpful_extensions::numeric::{Locale, format_currency};
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::new(1_234_567, 1), Locale::EnUs), "$123,456.70");
/// assert_eq!(format_currency(Decimal::new(-5, 0), Locale::EnGb), "-£5.00");
/// ```
pub fn format_currency(amount: Decimal, locale: Locale) -> String {
    let conventions = locale.conventions();
    let rounded = amount.round_dp_with_strategy(
        conventions.fraction_digits,
        RoundingStrategy::MidpointNearestEven,
    );
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let digits = format!("{:.*}", conventions.fraction_digits as usize, rounded.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

    let mut number = group_thousands(int_part, conventions.group_separator);
    if !frac_part.is_empty() {
        number.push_str(conventions.decimal_separator);
        number.push_str(frac_part);
    }

    let body = if conventions.symbol_first {
        format!("{}{}{number}", conventions.symbol, conventions.symbol_gap)
    } else {
        format!("{number}{}{}", conventions.symbol_gap, conventions.symbol)
    };

    if negative { format!("-{body}") } else { body }
}
