//! Type-safe price representation using decimal arithmetic.
//!
//! Prices travel over the wire as plain JSON numbers (`"price": 179.9`) and
//! are displayed in Brazilian reais (`R$ 179,90`).

use std::iter::Sum;
use std::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A unit or line price in reais.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Zero reais.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a number of centavos.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price for `quantity` units.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Format for display (e.g., `R$ 1.234,50`).
    #[must_use]
    pub fn format_brl(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let plain = format!("{:.2}", rounded.abs());
        let (units, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

        let mut grouped = String::with_capacity(units.len() + units.len() / 3);
        for (i, digit) in units.chars().enumerate() {
            if i > 0 && (units.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(digit);
        }

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        format!("{sign}R$ {grouped},{cents}")
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_brl())
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_brl() {
        assert_eq!(Price::from_cents(17990).format_brl(), "R$ 179,90");
        assert_eq!(Price::from_cents(5).format_brl(), "R$ 0,05");
        assert_eq!(Price::from_cents(123_450).format_brl(), "R$ 1.234,50");
        assert_eq!(Price::from_cents(123_456_789).format_brl(), "R$ 1.234.567,89");
        assert_eq!(Price::ZERO.format_brl(), "R$ 0,00");
    }

    #[test]
    fn test_format_brl_rounds_half_away_from_zero() {
        let price = Price::new(Decimal::new(10_005, 3));
        assert_eq!(price.format_brl(), "R$ 10,01");
    }

    #[test]
    fn test_times_and_sum() {
        let unit = Price::from_cents(13990);
        assert_eq!(unit.times(3), Price::from_cents(41970));
        assert_eq!(unit.times(0), Price::ZERO);

        let total: Price = [unit, Price::from_cents(10)].into_iter().sum();
        assert_eq!(total, Price::from_cents(14000));
    }

    #[test]
    fn test_price_is_a_json_number() {
        let price: Price = serde_json::from_str("179.9").expect("deserialize");
        assert_eq!(price, Price::from_cents(17990));
        assert_eq!(serde_json::to_string(&price).expect("serialize"), "179.9");
    }
}
