//! Currency and calendar formatting for amounts, months, and dates.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

/// Separator conventions for a locale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl LocaleConfig {
    /// Separators for a BCP 47 tag. Unknown tags fall back to `en-US` rules.
    pub fn for_tag(tag: &str) -> Self {
        let (decimal_separator, grouping_separator) = match tag.split('-').next() {
            Some("de") | Some("es") | Some("it") | Some("nl") | Some("pt") => (',', '.'),
            Some("fr") => (',', ' '),
            _ => ('.', ','),
        };
        Self {
            language_tag: tag.to_string(),
            decimal_separator,
            grouping_separator,
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::for_tag("en-US")
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "AUD" => "A$".into(),
        "PHP" => "₱".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value);
    let (int_part, fraction) = match body.split_once('.') {
        Some((int_part, fraction)) => (int_part, Some(fraction)),
        None => (body.as_str(), None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", int_part),
    };
    let mut formatted = format!("{sign}{}", group_digits(digits, locale.grouping_separator));
    if let Some(fraction) = fraction {
        formatted.push(locale.decimal_separator);
        formatted.push_str(fraction);
    }
    formatted
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index != 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats `amount` with the currency symbol, e.g. `-$1,234.50`.
pub fn format_currency(amount: f64, code: &CurrencyCode, locale: &LocaleConfig) -> String {
    let precision = minor_units_for(code.as_str());
    let body = format_number(locale, amount.abs(), precision);
    let symbol = symbol_for(code.as_str());
    // Rounding can turn tiny negatives into zero; never print "-$0.00".
    let negative = amount < 0.0 && body.chars().any(|ch| ch.is_ascii_digit() && ch != '0');
    let sign = if negative { "-" } else { "" };
    if symbol.chars().all(|ch| ch.is_ascii_alphabetic()) {
        format!("{sign}{symbol} {body}")
    } else {
        format!("{sign}{symbol}{body}")
    }
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|index| MONTH_NAMES.get(index as usize))
        .copied()
        .unwrap_or("")
}

/// Short label such as `Oct 2026`.
pub fn month_year_short(year: i32, month: u32) -> String {
    let name = month_name(month);
    format!("{} {}", &name[..name.len().min(3)], year)
}

/// Long label such as `October 2026`.
pub fn month_year_long(year: i32, month: u32) -> String {
    format!("{} {}", month_name(month), year)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(30)
}

/// Medium date style: `15 Mar 2024`.
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{:02} {}",
        date.day(),
        month_year_short(date.year(), date.month())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_us_dollars_with_grouping() {
        let usd = CurrencyCode::default();
        let locale = LocaleConfig::default();
        assert_eq!(format_currency(1234.5, &usd, &locale), "$1,234.50");
        assert_eq!(format_currency(-1234.5, &usd, &locale), "-$1,234.50");
        assert_eq!(format_currency(0.0, &usd, &locale), "$0.00");
        assert_eq!(format_currency(-0.001, &usd, &locale), "$0.00");
        assert_eq!(format_currency(1_000_000.0, &usd, &locale), "$1,000,000.00");
    }

    #[test]
    fn respects_locale_and_minor_units() {
        let locale = LocaleConfig::for_tag("de-DE");
        assert_eq!(
            format_currency(1234.5, &CurrencyCode::new("eur"), &locale),
            "€1.234,50"
        );
        assert_eq!(
            format_currency(1234.0, &CurrencyCode::new("JPY"), &LocaleConfig::default()),
            "¥1,234"
        );
        assert_eq!(
            format_currency(5.0, &CurrencyCode::new("CHF"), &LocaleConfig::default()),
            "CHF 5.00"
        );
    }

    #[test]
    fn month_labels() {
        assert_eq!(month_year_short(2026, 10), "Oct 2026");
        assert_eq!(month_year_long(2024, 2), "February 2024");
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 12), 31);
        assert_eq!(
            format_date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()),
            "05 Mar 2024"
        );
    }
}
