use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// An amount of money in cents. Signed, so it can also carry balance deltas.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);
    /// Largest balance a rule may start with. Leaves room for a doubled bet
    /// paid at 3:2 on top of a full balance without overflowing.
    pub const MAX_BALANCE: Money = Money(i64::MAX / 4);

    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Whole dollars, e.g. `Money::dollars(500)` is $500.00.
    pub const fn dollars(dollars: i64) -> Self {
        Money(dollars * 100)
    }

    /// Rounds to the nearest cent. Returns None for NaN or out of range values.
    pub fn from_dollars_f64(dollars: f64) -> Option<Self> {
        let cents = (dollars * 100.0).round();
        if !cents.is_finite() || cents.abs() > i64::MAX as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Three halves of the amount, rounded toward zero to the cent.
    pub fn three_halves(&self) -> Money {
        let halves = (self.0 / 2).saturating_mul(3);
        Money(halves.saturating_add(self.0 % 2 * 3 / 2))
    }
}

impl fmt::Display for Money {
    /// Formats as `$1,234.56` or `-$10.00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let digits = (abs / 100).to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "{sign}${grouped}.{:02}", abs % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(self.0.saturating_neg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Money::dollars(500).to_string(), "$500.00");
        assert_eq!(Money::dollars(5_000_000).to_string(), "$5,000,000.00");
        assert_eq!(Money(-1050).to_string(), "-$10.50");
        assert_eq!(Money(7).to_string(), "$0.07");
    }

    #[test]
    fn from_dollars() {
        assert_eq!(Money::from_dollars_f64(0.01), Some(Money(1)));
        assert_eq!(Money::from_dollars_f64(500.0), Some(Money::dollars(500)));
        assert_eq!(Money::from_dollars_f64(f64::NAN), None);
    }

    #[test]
    fn three_halves_rounds_down() {
        assert_eq!(Money::dollars(10).three_halves(), Money::dollars(15));
        assert_eq!(Money(101).three_halves(), Money(151));
    }

    #[test]
    fn large_amounts_do_not_overflow() {
        let max = Money::MAX_BALANCE;
        assert_eq!(max.three_halves(), Money(max.0 / 2 * 3 + max.0 % 2 * 3 / 2));
        assert!(max.three_halves() > max);
        assert_eq!(Money(i64::MAX).three_halves(), Money(i64::MAX));
        assert_eq!(Money(i64::MAX) + Money(1), Money(i64::MAX));
        assert_eq!(-Money(i64::MIN), Money(i64::MAX));
    }
}
