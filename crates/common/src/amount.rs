//! Monetary amounts.

use serde::{Deserialize, Serialize};

/// A non-negative amount of money stored in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount {
    /// Amount in cents (e.g., 1000 = $10.00)
    cents: u64,
}

impl Amount {
    /// Creates an amount from its dollar and cent parts.
    ///
    /// Cents above 99 carry into dollars. Saturates at `u64::MAX` cents.
    pub fn of(dollars: u64, cents: u64) -> Self {
        Self {
            cents: dollars.saturating_mul(100).saturating_add(cents),
        }
    }

    /// Creates an amount from cents.
    pub fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    /// Returns zero.
    pub fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> u64 {
        self.cents
    }

    /// Returns the whole dollar part.
    pub fn dollars(&self) -> u64 {
        self.cents / 100
    }

    /// Returns the cents remaining after whole dollars.
    pub fn cents_part(&self) -> u64 {
        self.cents % 100
    }

    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Adds two amounts, or `None` on overflow.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.cents.checked_add(rhs.cents).map(Self::from_cents)
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${}.{:02}", self.dollars(), self.cents_part())
    }
}

// Saturating: totals never wrap.
impl std::ops::Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount {
            cents: self.cents.saturating_add(rhs.cents),
        }
    }
}

impl std::ops::AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |total, amount| total + amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn of_combines_dollars_and_cents() {
        let amount = Amount::of(12, 34);
        assert_eq!(amount.cents(), 1234);
        assert_eq!(amount.dollars(), 12);
        assert_eq!(amount.cents_part(), 34);
    }

    #[test]
    fn overflow_saturates_instead_of_wrapping() {
        let max = Amount::from_cents(u64::MAX);
        assert_eq!(max + Amount::of(1, 0), max);
        assert_eq!(Amount::of(u64::MAX, 99), max);

        let mut total = Amount::from_cents(u64::MAX - 1);
        total += Amount::from_cents(5);
        assert_eq!(total, max);
    }

    #[test]
    fn checked_add_reports_overflow() {
        assert_eq!(
            Amount::of(1, 50).checked_add(Amount::of(2, 0)),
            Some(Amount::of(3, 50))
        );
        assert_eq!(Amount::from_cents(u64::MAX).checked_add(Amount::from_cents(1)), None);
    }

    #[test]
    fn of_carries_cents_into_dollars() {
        assert_eq!(Amount::of(1, 150), Amount::of(2, 50));
    }

    #[test]
    fn display_formats_as_dollars() {
        assert_eq!(Amount::of(8, 0).to_string(), "$8.00");
        assert_eq!(Amount::from_cents(5).to_string(), "$0.05");
        assert_eq!(Amount::zero().to_string(), "$0.00");
    }

    #[test]
    fn amounts_add_and_sum() {
        let mut total = Amount::of(8, 0) + Amount::of(10, 0);
        assert_eq!(total, Amount::of(18, 0));

        total += Amount::from_cents(99);
        assert_eq!(total.cents(), 1899);

        let sum: Amount = [Amount::of(1, 0), Amount::of(2, 50)].into_iter().sum();
        assert_eq!(sum, Amount::of(3, 50));
    }

    #[test]
    fn empty_sum_is_zero() {
        let sum: Amount = std::iter::empty().sum();
        assert!(sum.is_zero());
    }

    #[test]
    fn amount_serialization_roundtrip() {
        let amount = Amount::of(10, 0);
        let json = serde_json::to_string(&amount).unwrap();
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, amount);
    }
}
