//! # Machine Configuration
//!
//! What a machine is loaded with when it is built: stock, coins and prices.
//! Loading this from a file is the caller's business; this module only
//! defines the shape and its defaults.
//!
//! ## File Format
//! ```toml
//! [inventory]
//! haribo = [20, 200]   # [available, restock level]
//! water = [10, 100]
//!
//! [coins]
//! "1p" = 100
//! "£1" = 25
//!
//! [prices]
//! default = 100        # pence, for items without their own price
//!
//! [prices.items]
//! haribo = 150
//! ```
//!
//! Every section is optional; a missing section falls back to the defaults
//! below.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::coins::CoinBank;
use crate::inventory::Inventory;
use crate::money::Money;

/// Price charged for items without an explicit price.
pub const DEFAULT_PRICE: Money = Money::from_pence(100);

// =============================================================================
// Price List
// =============================================================================

/// Per-item prices with a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceList {
    #[serde(default = "default_price")]
    default: Money,

    #[serde(default)]
    items: BTreeMap<String, Money>,
}

fn default_price() -> Money {
    DEFAULT_PRICE
}

impl PriceList {
    /// A price list where everything costs `default`.
    pub fn flat(default: Money) -> Self {
        PriceList {
            default,
            items: BTreeMap::new(),
        }
    }

    /// chocolate £2, soda £1, crisps £1, anything else £1.
    pub fn standard() -> Self {
        let mut prices = PriceList::flat(DEFAULT_PRICE);
        prices.set("chocolate", Money::from_pence(200));
        prices.set("soda", Money::from_pence(100));
        prices.set("crisps", Money::from_pence(100));
        prices
    }

    pub fn price_of(&self, item: &str) -> Money {
        self.items.get(item).copied().unwrap_or(self.default)
    }

    pub fn set(&mut self, item: impl Into<String>, price: Money) {
        self.items.insert(item.into(), price);
    }

    pub fn default_price(&self) -> Money {
        self.default
    }

    pub fn set_default_price(&mut self, price: Money) {
        self.default = price;
    }

    /// Explicitly priced items, by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> {
        self.items.iter().map(|(name, price)| (name.as_str(), *price))
    }
}

impl Default for PriceList {
    fn default() -> Self {
        PriceList::standard()
    }
}

// =============================================================================
// Machine Config
// =============================================================================

/// Everything a `VendingMachine` is constructed from.
///
/// ## Default Values
/// - Inventory: chocolate [20, 200], soda [10, 100], crisps [15, 150]
/// - Coins: 100 of each denomination from 1p to £2
/// - Prices: chocolate £2, soda £1, crisps £1, default £1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    pub inventory: Inventory,
    pub coins: CoinBank,
    pub prices: PriceList,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            inventory: Inventory::standard(),
            coins: CoinBank::standard(),
            prices: PriceList::standard(),
        }
    }
}

impl MachineConfig {
    /// Default coins and prices with a custom inventory.
    pub fn with_inventory(inventory: Inventory) -> Self {
        MachineConfig {
            inventory,
            ..MachineConfig::default()
        }
    }

    /// Default inventory and prices with a custom coin bank.
    pub fn with_coins(coins: CoinBank) -> Self {
        MachineConfig {
            coins,
            ..MachineConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coins::Denomination;

    #[test]
    fn test_standard_prices() {
        let prices = PriceList::standard();
        assert_eq!(prices.price_of("chocolate").pence(), 200);
        assert_eq!(prices.price_of("soda").pence(), 100);
        assert_eq!(prices.price_of("crisps").pence(), 100);
        assert_eq!(prices.price_of("haribo"), DEFAULT_PRICE);
    }

    #[test]
    fn test_parse_full_toml() {
        let config: MachineConfig = toml::from_str(
            r#"
            [inventory]
            haribo = [20, 200]
            water = [10, 100]

            [coins]
            "1p" = 10
            "£2" = 5

            [prices]
            default = 80

            [prices.items]
            haribo = 150
            "#,
        )
        .unwrap();

        assert_eq!(config.inventory.levels("haribo"), Some([20, 200]));
        assert_eq!(config.inventory.levels("chocolate"), None);
        assert_eq!(config.coins.count(Denomination::OnePence), 10);
        assert_eq!(config.coins.count(Denomination::TwoPounds), 5);
        assert_eq!(config.coins.count(Denomination::FiftyPence), 0);
        assert_eq!(config.prices.price_of("haribo").pence(), 150);
        assert_eq!(config.prices.price_of("water").pence(), 80);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: MachineConfig = toml::from_str(
            r#"
            [coins]
            "50p" = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.inventory, Inventory::standard());
        assert_eq!(config.prices, PriceList::standard());
        assert_eq!(config.coins.count(Denomination::FiftyPence), 3);
    }

    #[test]
    fn test_unknown_denomination_rejected() {
        let result: Result<MachineConfig, _> = toml::from_str(
            r#"
            [coins]
            "£5" = 1
            "#,
        );
        assert!(result.is_err());
    }
}
