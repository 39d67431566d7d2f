//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are shown the way Argentine shoppers read them: `.` groups
//! thousands and `,` separates decimals, e.g. `$15.000` or `$1.234,50`.
//! Whole amounts are printed without decimals.

use core::fmt;
use core::ops::Add;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (pesos, not centavos).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in whole Argentine pesos.
    #[must_use]
    pub fn ars(units: i64) -> Self {
        Self::new(Decimal::from(units), CurrencyCode::ARS)
    }

    /// A zero price in the default currency.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(Decimal::ZERO, CurrencyCode::ARS)
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency_code)
    }

    /// Format for display, e.g. `$15.000`.
    #[must_use]
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        debug_assert_eq!(
            self.currency_code, rhs.currency_code,
            "cannot add prices in different currencies"
        );
        Self::new(self.amount + rhs.amount, self.currency_code)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = (self.amount.abs() * Decimal::ONE_HUNDRED)
            .round()
            .to_u128()
            .unwrap_or(0);
        let units = cents / 100;
        let fraction = cents % 100;

        if self.amount.is_sign_negative() && cents > 0 {
            f.write_str("-")?;
        }
        f.write_str(self.currency_code.symbol())?;
        f.write_str(&group_thousands(units))?;
        if fraction > 0 {
            write!(f, ",{fraction:02}")?;
        }
        Ok(())
    }
}

/// Insert `.` between groups of three digits.
fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    ARS,
    USD,
}

impl CurrencyCode {
    /// Symbol printed before the amount.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::ARS => "$",
            Self::USD => "US$",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Price::ars(15000).to_string(), "$15.000");
        assert_eq!(Price::ars(1_234_567).to_string(), "$1.234.567");
        assert_eq!(Price::ars(999).to_string(), "$999");
        assert_eq!(Price::zero().to_string(), "$0");
    }

    #[test]
    fn test_display_decimals() {
        let price = Price::new(Decimal::new(123_450, 2), CurrencyCode::ARS);
        assert_eq!(price.to_string(), "$1.234,50");

        let price = Price::new(Decimal::new(1006, 3), CurrencyCode::ARS);
        assert_eq!(price.to_string(), "$1,01");
    }

    #[test]
    fn test_display_negative_and_usd() {
        assert_eq!(Price::ars(-2500).to_string(), "-$2.500");
        let price = Price::new(Decimal::from(20), CurrencyCode::USD);
        assert_eq!(price.display(), "US$20");
    }

    #[test]
    fn test_times_and_add() {
        let line = Price::ars(15000).times(3);
        assert_eq!(line, Price::ars(45000));
        assert_eq!(line + Price::ars(5000), Price::ars(50000));
    }

    #[test]
    fn test_serde_amount_is_string() {
        let json = serde_json::to_value(Price::ars(15000)).unwrap();
        assert_eq!(json["amount"], "15000");
        assert_eq!(json["currency_code"], "ARS");
    }
}
