//! # Money Module
//!
//! Provides the `Money` type for handling sterling amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every coin the machine knows is a whole number of pence.               │
//! │                                                                         │
//! │    £2 + 50p + 2p = 252 pence                                            │
//! │                                                                         │
//! │  Change making divides and subtracts pence; floats would leave us      │
//! │  with 0.30000000000000004 of a coin.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vend_core::money::Money;
//!
//! let price = Money::from_pence(150); // £1.50
//! let paid = Money::from_pounds_pence(2, 0);
//! assert_eq!((paid - price).pence(), 50);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A sterling amount in pence.
///
/// Signed so that `tendered - price` can be inspected before deciding
/// whether any change is due.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from pence.
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::money::Money;
    ///
    /// let price = Money::from_pence(200); // £2.00
    /// assert_eq!(price.pence(), 200);
    /// ```
    #[inline]
    pub const fn from_pence(pence: i64) -> Self {
        Money(pence)
    }

    /// Creates a Money value from pounds and pence.
    ///
    /// For negative amounts only the pounds part carries the sign:
    /// `from_pounds_pence(-1, 20)` is -£1.20.
    #[inline]
    pub const fn from_pounds_pence(pounds: i64, pence: i64) -> Self {
        if pounds < 0 {
            Money(pounds * 100 - pence)
        } else {
            Money(pounds * 100 + pence)
        }
    }

    /// Returns the value in pence.
    #[inline]
    pub const fn pence(&self) -> i64 {
        self.0
    }

    /// Returns the whole pounds portion.
    #[inline]
    pub const fn pounds(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the pence portion (always 0-99).
    #[inline]
    pub const fn pence_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money the way the machine's display does: `£1.50`, `-£0.20`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}£{}.{:02}",
            sign,
            self.pounds().abs(),
            self.pence_part()
        )
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a coin count.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, count: u32) -> Self {
        Money(self.0 * i64::from(count))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pence() {
        let money = Money::from_pence(1099);
        assert_eq!(money.pence(), 1099);
        assert_eq!(money.pounds(), 10);
        assert_eq!(money.pence_part(), 99);
    }

    #[test]
    fn test_from_pounds_pence() {
        assert_eq!(Money::from_pounds_pence(2, 50).pence(), 250);
        assert_eq!(Money::from_pounds_pence(-1, 20).pence(), -120);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_pence(150)), "£1.50");
        assert_eq!(format!("{}", Money::from_pence(5)), "£0.05");
        assert_eq!(format!("{}", Money::from_pence(-20)), "-£0.20");
        assert_eq!(format!("{}", Money::zero()), "£0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_pence(200);
        let b = Money::from_pence(50);

        assert_eq!((a + b).pence(), 250);
        assert_eq!((a - b).pence(), 150);
        assert_eq!((b * 3).pence(), 150);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.pence(), 300);
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_pence(1).is_positive());
        assert!(Money::from_pence(-1).is_negative());
    }
}
