//! # Coins
//!
//! Denominations, the machine's coin bank and the greedy change maker.
//!
//! ## Change Making
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  make_change(50p) with bank {1p:100, 2p:5, 5p:1, 10p:1, 20p:1}          │
//! │                                                                         │
//! │   £2  £1  50p   → none in bank, skip                                    │
//! │   20p x1        → remaining 30                                          │
//! │   10p x1        → remaining 20                                          │
//! │   5p  x1        → remaining 15                                          │
//! │   2p  x5        → remaining 5                                           │
//! │   1p  x5        → remaining 0  ✅ commit                                │
//! │                                                                         │
//! │  Deductions are staged in a scratch map. If the remaining amount is    │
//! │  not exactly zero at the end, the live bank is never touched.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Denomination
// =============================================================================

/// A coin the machine accepts and pays out.
///
/// Variants are declared in ascending value so the derived `Ord` sorts by
/// value; iterating a `BTreeMap<Denomination, _>` in reverse walks from the
/// highest coin down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Denomination {
    OnePence,
    TwoPence,
    FivePence,
    TenPence,
    TwentyPence,
    FiftyPence,
    OnePound,
    TwoPounds,
}

impl Denomination {
    /// All denominations, lowest value first.
    pub const ALL: [Denomination; 8] = [
        Denomination::OnePence,
        Denomination::TwoPence,
        Denomination::FivePence,
        Denomination::TenPence,
        Denomination::TwentyPence,
        Denomination::FiftyPence,
        Denomination::OnePound,
        Denomination::TwoPounds,
    ];

    /// Value of one coin in pence.
    pub const fn pence(self) -> i64 {
        match self {
            Denomination::OnePence => 1,
            Denomination::TwoPence => 2,
            Denomination::FivePence => 5,
            Denomination::TenPence => 10,
            Denomination::TwentyPence => 20,
            Denomination::FiftyPence => 50,
            Denomination::OnePound => 100,
            Denomination::TwoPounds => 200,
        }
    }

    pub const fn value(self) -> Money {
        Money::from_pence(self.pence())
    }

    /// The label printed on the coin slot, e.g. `"5p"` or `"£2"`.
    pub const fn label(self) -> &'static str {
        match self {
            Denomination::OnePence => "1p",
            Denomination::TwoPence => "2p",
            Denomination::FivePence => "5p",
            Denomination::TenPence => "10p",
            Denomination::TwentyPence => "20p",
            Denomination::FiftyPence => "50p",
            Denomination::OnePound => "£1",
            Denomination::TwoPounds => "£2",
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Denomination {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        Denomination::ALL
            .into_iter()
            .find(|d| d.label() == label)
            .ok_or_else(|| CoreError::UnknownDenomination(label.to_string()))
    }
}

impl TryFrom<String> for Denomination {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Denomination> for String {
    fn from(value: Denomination) -> Self {
        value.label().to_string()
    }
}

// =============================================================================
// Change
// =============================================================================

/// Coins handed back to the customer, highest denomination first.
///
/// Only denominations with a non-zero count appear. An empty `Change` means
/// either nothing was owed or the bank could not cover the amount; the caller
/// knows which from the amount it asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    coins: Vec<(Denomination, u32)>,
}

impl Change {
    pub fn new() -> Self {
        Change::default()
    }

    /// Builds change from a pile of individual coins, grouping and ordering
    /// them highest first.
    pub fn from_coins<I>(coins: I) -> Self
    where
        I: IntoIterator<Item = Denomination>,
    {
        let mut counts: BTreeMap<Denomination, u32> = BTreeMap::new();
        for coin in coins {
            *counts.entry(coin).or_insert(0) += 1;
        }
        Change {
            coins: counts.into_iter().rev().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    /// Number of coins of `denomination`, zero if none.
    pub fn count(&self, denomination: Denomination) -> u32 {
        self.coins
            .iter()
            .find(|(d, _)| *d == denomination)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn total(&self) -> Money {
        self.coins.iter().map(|(d, n)| d.value() * *n).sum()
    }

    /// `(denomination, count)` pairs, highest denomination first.
    pub fn iter(&self) -> impl Iterator<Item = (Denomination, u32)> + '_ {
        self.coins.iter().copied()
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coins.is_empty() {
            return f.write_str("none");
        }
        let parts: Vec<String> = self
            .coins
            .iter()
            .map(|(d, n)| format!("{} x{}", d, n))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

// =============================================================================
// Coin Bank
// =============================================================================

/// Coins held by the machine for paying out change.
///
/// A denomination missing from the map is simply a count of zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoinBank {
    counts: BTreeMap<Denomination, u32>,
}

impl CoinBank {
    pub fn new() -> Self {
        CoinBank::default()
    }

    /// The standard float: one hundred of every denomination.
    pub fn standard() -> Self {
        Denomination::ALL.into_iter().map(|d| (d, 100)).collect()
    }

    pub fn count(&self, denomination: Denomination) -> u32 {
        self.counts.get(&denomination).copied().unwrap_or(0)
    }

    pub fn set(&mut self, denomination: Denomination, count: u32) {
        self.counts.insert(denomination, count);
    }

    /// Total value of every coin in the bank.
    pub fn total(&self) -> Money {
        self.counts.iter().map(|(d, n)| d.value() * *n).sum()
    }

    /// `(denomination, count)` pairs, lowest denomination first.
    pub fn iter(&self) -> impl Iterator<Item = (Denomination, u32)> + '_ {
        self.counts.iter().map(|(d, n)| (*d, *n))
    }

    /// Pays out `amount` greedily, highest denomination first.
    ///
    /// Returns the coins removed. If the bank cannot cover the exact amount,
    /// returns an empty `Change` and leaves every count unchanged.
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::coins::{CoinBank, Denomination};
    /// use vend_core::money::Money;
    ///
    /// let mut bank: CoinBank = [(Denomination::TwentyPence, 3)].into_iter().collect();
    ///
    /// assert!(bank.make_change(Money::from_pence(50)).is_empty());
    /// assert_eq!(bank.count(Denomination::TwentyPence), 3);
    ///
    /// let change = bank.make_change(Money::from_pence(40));
    /// assert_eq!(change.count(Denomination::TwentyPence), 2);
    /// assert_eq!(bank.count(Denomination::TwentyPence), 1);
    /// ```
    pub fn make_change(&mut self, amount: Money) -> Change {
        if !amount.is_positive() {
            return Change::new();
        }

        let mut remaining = amount.pence();
        let mut scratch: Vec<(Denomination, u32)> = Vec::new();

        for (&denomination, &available) in self.counts.iter().rev() {
            if remaining == 0 {
                break;
            }
            let wanted = remaining / denomination.pence();
            let take = wanted.min(i64::from(available));
            if take > 0 {
                remaining -= take * denomination.pence();
                // take <= available, which is a u32
                scratch.push((denomination, take as u32));
            }
        }

        if remaining != 0 {
            debug!(
                amount = %amount,
                short_by = remaining,
                "Coin bank cannot cover change"
            );
            return Change::new();
        }

        for (denomination, taken) in &scratch {
            if let Some(count) = self.counts.get_mut(denomination) {
                *count -= taken;
            }
        }

        Change { coins: scratch }
    }
}

impl FromIterator<(Denomination, u32)> for CoinBank {
    fn from_iter<I: IntoIterator<Item = (Denomination, u32)>>(iter: I) -> Self {
        CoinBank {
            counts: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Denomination::*;

    fn bank(pairs: &[(Denomination, u32)]) -> CoinBank {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_denomination_parsing() {
        assert_eq!("1p".parse::<Denomination>().unwrap(), OnePence);
        assert_eq!(" £2 ".parse::<Denomination>().unwrap(), TwoPounds);
        assert_eq!("50p".parse::<Denomination>().unwrap(), FiftyPence);
        assert!("£5".parse::<Denomination>().is_err());
        assert!("3p".parse::<Denomination>().is_err());
        assert!("".parse::<Denomination>().is_err());
    }

    #[test]
    fn test_denominations_ordered_by_value() {
        let mut sorted = Denomination::ALL;
        sorted.sort_by_key(|d| d.pence());
        assert_eq!(sorted, Denomination::ALL);
        assert!(TwoPounds > FiftyPence);
    }

    #[test]
    fn test_make_change_uses_highest_denominations() {
        let mut coins = bank(&[
            (OnePence, 100),
            (TwoPence, 5),
            (FivePence, 1),
            (TenPence, 1),
            (TwentyPence, 1),
        ]);

        let change = coins.make_change(Money::from_pence(50));

        let pairs: Vec<_> = change.iter().collect();
        assert_eq!(
            pairs,
            vec![
                (TwentyPence, 1),
                (TenPence, 1),
                (FivePence, 1),
                (TwoPence, 5),
                (OnePence, 5),
            ]
        );
        assert_eq!(change.total().pence(), 50);
        assert_eq!(coins.count(OnePence), 95);
        assert_eq!(coins.count(TwoPence), 0);
        assert_eq!(coins.count(TwentyPence), 0);
    }

    #[test]
    fn test_make_change_failure_leaves_bank_untouched() {
        let original = bank(&[
            (OnePence, 4),
            (TwoPence, 5),
            (FivePence, 1),
            (TenPence, 1),
            (TwentyPence, 1),
        ]);
        let mut coins = original.clone();

        let change = coins.make_change(Money::from_pence(50));

        assert!(change.is_empty());
        assert_eq!(coins, original);
    }

    #[test]
    fn test_make_change_zero_amount() {
        let mut coins = CoinBank::standard();
        assert!(coins.make_change(Money::zero()).is_empty());
        assert_eq!(coins, CoinBank::standard());
    }

    #[test]
    fn test_make_change_is_greedy_without_backtracking() {
        // 60p from {50p:1, 20p:3}: greedy takes 50p and is left with 10p.
        let original = bank(&[(FiftyPence, 1), (TwentyPence, 3)]);
        let mut coins = original.clone();
        assert!(coins.make_change(Money::from_pence(60)).is_empty());
        assert_eq!(coins, original);
    }

    #[test]
    fn test_change_from_coins_groups_highest_first() {
        let change = Change::from_coins([OnePound, TenPence, OnePound, TwoPounds]);
        let pairs: Vec<_> = change.iter().collect();
        assert_eq!(pairs, vec![(TwoPounds, 1), (OnePound, 2), (TenPence, 1)]);
        assert_eq!(change.total().pence(), 410);
        assert_eq!(change.to_string(), "£2 x1, £1 x2, 10p x1");
    }

    #[test]
    fn test_coin_bank_serializes_with_labels() {
        let coins = bank(&[(OnePence, 10), (OnePound, 5)]);
        let json = serde_json::to_string(&coins).unwrap();
        assert_eq!(json, r#"{"1p":10,"£1":5}"#);

        let back: CoinBank = serde_json::from_str(&json).unwrap();
        assert_eq!(back, coins);
    }
}
