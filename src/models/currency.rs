//! Currencies and display formatting
//!
//! All records are stored in the base currency. Display conversion applies a
//! user-configured rate; no rates are fetched.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;
use super::validation::UnknownVariant;

/// Supported display currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Inr,
    Jpy,
    Cad,
    Aud,
}

impl Currency {
    pub const ALL: [Currency; 7] = [
        Self::Usd,
        Self::Eur,
        Self::Gbp,
        Self::Inr,
        Self::Jpy,
        Self::Cad,
        Self::Aud,
    ];

    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Inr => "INR",
            Self::Jpy => "JPY",
            Self::Cad => "CAD",
            Self::Aud => "AUD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
            Self::Inr => "₹",
            Self::Jpy => "¥",
            Self::Cad => "C$",
            Self::Aud => "A$",
        }
    }

    /// Digits shown after the decimal point
    pub fn minor_digits(&self) -> u32 {
        match self {
            Self::Jpy => 0,
            _ => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant {
                kind: "currency",
                value: s.to_string(),
                expected: &["USD", "EUR", "GBP", "INR", "JPY", "CAD", "AUD"],
            })
    }
}

/// Converts base-currency amounts and renders them for display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrencyFormatter {
    currency: Currency,
    rate: f64,
}

impl CurrencyFormatter {
    /// Formatter with a conversion rate from the base currency
    ///
    /// Non-finite or non-positive rates fall back to 1.0.
    pub fn new(currency: Currency, rate: f64) -> Self {
        let rate = if rate.is_finite() && rate > 0.0 {
            rate
        } else {
            1.0
        };
        Self { currency, rate }
    }

    /// Formatter that does no conversion
    pub fn plain(currency: Currency) -> Self {
        Self::new(currency, 1.0)
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Convert a base-currency amount into the display currency
    pub fn convert(&self, amount: Money) -> Money {
        amount.scale(self.rate)
    }

    /// Convert and render, e.g. "$1,234.50" or "₹12,34,567.00"
    pub fn format(&self, amount: Money) -> String {
        let converted = self.convert(amount);
        let sign = if converted.is_negative() { "-" } else { "" };
        let abs = converted.abs();

        if self.currency.minor_digits() == 0 {
            let whole = (abs.cents() + 50) / 100;
            format!("{}{}{}", sign, self.currency.symbol(), group_digits(whole, false))
        } else {
            format!(
                "{}{}{}.{:02}",
                sign,
                self.currency.symbol(),
                group_digits(abs.units(), self.currency == Currency::Inr),
                abs.cents_part()
            )
        }
    }
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::plain(Currency::default())
    }
}

/// Group the digits of a non-negative whole number with commas
///
/// Indian grouping keeps the last three digits together and pairs the rest
/// (12,34,567).
fn group_digits(n: i64, indian: bool) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let group = if indian { 2 } else { 3 };

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(group);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits(0, false), "0");
        assert_eq!(group_digits(999, false), "999");
        assert_eq!(group_digits(1000, false), "1,000");
        assert_eq!(group_digits(1234567, false), "1,234,567");
        assert_eq!(group_digits(1234567, true), "12,34,567");
        assert_eq!(group_digits(100000, true), "1,00,000");
    }

    #[test]
    fn test_default_formatter_is_plain_usd() {
        let fmt = CurrencyFormatter::default();
        assert_eq!(fmt.currency(), Currency::Usd);
        assert_eq!(fmt.rate(), 1.0);
        assert_eq!(fmt.format(Money::from_cents(123450)), "$1,234.50");
        assert_eq!(fmt.format(Money::from_cents(-5)), "-$0.05");
    }

    #[test]
    fn test_format_usd() {
        let fmt = CurrencyFormatter::plain(Currency::Usd);
        assert_eq!(fmt.format(Money::from_cents(123450)), "$1,234.50");
        assert_eq!(fmt.format(Money::from_cents(-500)), "-$5.00");
        assert_eq!(fmt.format(Money::zero()), "$0.00");
    }

    #[test]
    fn test_format_inr_uses_lakh_grouping() {
        let fmt = CurrencyFormatter::plain(Currency::Inr);
        assert_eq!(fmt.format(Money::from_units(1234567)), "₹12,34,567.00");
    }

    #[test]
    fn test_format_jpy_has_no_minor_units() {
        let fmt = CurrencyFormatter::new(Currency::Jpy, 150.0);
        assert_eq!(fmt.format(Money::from_units(10)), "¥1,500");
    }

    #[test]
    fn test_conversion() {
        let fmt = CurrencyFormatter::new(Currency::Eur, 0.9);
        assert_eq!(fmt.convert(Money::from_units(100)), Money::from_units(90));
        assert_eq!(fmt.format(Money::from_units(100)), "€90.00");
    }

    #[test]
    fn test_invalid_rate_falls_back() {
        assert_eq!(CurrencyFormatter::new(Currency::Gbp, 0.0).rate(), 1.0);
        assert_eq!(CurrencyFormatter::new(Currency::Gbp, f64::NAN).rate(), 1.0);
    }

    #[test]
    fn test_parse_and_serialize() {
        assert_eq!("inr".parse::<Currency>().unwrap(), Currency::Inr);
        assert!("XYZ".parse::<Currency>().is_err());
        assert_eq!(serde_json::to_string(&Currency::Eur).unwrap(), "\"EUR\"");
    }
}
