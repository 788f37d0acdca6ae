//! # Vending Machine
//!
//! The single stateful entity: live stock, live coins, purchase history, and
//! the snapshots that reloads restore.
//!
//! ## Purchase Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Purchase Flow                                  │
//! │                                                                         │
//! │  select_item("crisps") ──► Some("crisps")                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pay_for("crisps", tokens)                                              │
//! │       │  pulls "50p", "£1" ... until tendered >= price                  │
//! │       ▼                                                                 │
//! │  process_change("crisps", £1.50, [50p, £1])                             │
//! │       │                                                                 │
//! │       ├── change due?  calculate_change(50p)                            │
//! │       │        │                                                        │
//! │       │        ├── empty ──► Refunded { coins: 50p x1, £1 x1 }          │
//! │       │        │             (stock, coins, history untouched)          │
//! │       │        ▼                                                        │
//! │       └──────► stock -1, log_purchase ──► Vended { change }             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock is only decremented after change has been paid out (or none was
//! due), so a refused purchase never loses an item.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::coins::{Change, CoinBank, Denomination};
use crate::config::{MachineConfig, PriceList};
use crate::error::{CoreError, CoreResult};
use crate::history::PurchaseHistory;
use crate::input::TokenSource;
use crate::inventory::{Inventory, ItemRecord};
use crate::money::Money;
use crate::validation::validate_config;

/// How many best sellers `top_3_items` reports.
pub const TOP_ITEMS: usize = 3;

// =============================================================================
// Change Outcome
// =============================================================================

/// Result of settling a paid-for item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ChangeOutcome {
    /// The item was dispensed and `change` handed back (possibly none).
    Vended {
        item: String,
        price: Money,
        tendered: Money,
        change: Change,
    },

    /// Nothing was dispensed; the tendered coins go back to the customer.
    Refunded {
        item: String,
        tendered: Money,
        coins: Change,
    },
}

impl ChangeOutcome {
    pub fn is_vended(&self) -> bool {
        matches!(self, ChangeOutcome::Vended { .. })
    }

    pub fn item(&self) -> &str {
        match self {
            ChangeOutcome::Vended { item, .. } | ChangeOutcome::Refunded { item, .. } => item,
        }
    }

    /// Coins returned to the customer either way.
    pub fn returned(&self) -> &Change {
        match self {
            ChangeOutcome::Vended { change, .. } => change,
            ChangeOutcome::Refunded { coins, .. } => coins,
        }
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Read-only view of all live state, for display and JSON dumps.
#[derive(Debug, Serialize)]
pub struct MachineSnapshot<'a> {
    pub inventory: &'a Inventory,
    pub coin_bank: &'a CoinBank,
    pub coin_total: Money,
    pub purchase_history: &'a PurchaseHistory,
}

// =============================================================================
// Vending Machine
// =============================================================================

#[derive(Debug, Clone)]
pub struct VendingMachine {
    inventory: Inventory,
    coin_bank: CoinBank,
    purchase_history: PurchaseHistory,
    prices: PriceList,

    // Restored by reload_inventory / reload_coins, never mutated.
    initial_inventory: Inventory,
    initial_coins: CoinBank,
}

impl VendingMachine {
    /// Builds a machine from `config` as-is.
    pub fn new(config: MachineConfig) -> Self {
        let MachineConfig {
            inventory,
            coins,
            prices,
        } = config;

        debug!(
            items = inventory.len(),
            coin_total = %coins.total(),
            "Vending machine loaded"
        );

        VendingMachine {
            initial_inventory: inventory.clone(),
            initial_coins: coins.clone(),
            inventory,
            coin_bank: coins,
            purchase_history: PurchaseHistory::new(),
            prices,
        }
    }

    /// Builds a machine after validating `config`.
    pub fn try_new(config: MachineConfig) -> CoreResult<Self> {
        validate_config(&config)?;
        Ok(VendingMachine::new(config))
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Returns the item name if it is stocked and has units left.
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::VendingMachine;
    ///
    /// let machine = VendingMachine::default();
    /// assert_eq!(machine.select_item("chocolate"), Some("chocolate"));
    /// assert_eq!(machine.select_item("gold watch"), None);
    /// ```
    pub fn select_item(&self, input: &str) -> Option<&str> {
        self.inventory
            .get(input.trim())
            .filter(|item| item.in_stock())
            .map(|item| item.name.as_str())
    }

    /// Reads one token from `input` and selects it.
    pub fn select_next<S>(&self, input: &mut S) -> Option<&str>
    where
        S: TokenSource + ?Sized,
    {
        let token = input.next_token()?;
        self.select_item(&token)
    }

    // =========================================================================
    // Payment
    // =========================================================================

    /// Takes coins from `input` until they cover the price of `item_name`
    /// (surrounding whitespace ignored), then settles the purchase through [`process_change`].
    ///
    /// Tokens that are not a known denomination are ignored. If `input` runs
    /// dry first, nothing is mutated and `PaymentIncomplete` is returned.
    ///
    /// [`process_change`]: VendingMachine::process_change
    pub fn pay_for<S>(&mut self, item_name: &str, input: &mut S) -> CoreResult<ChangeOutcome>
    where
        S: TokenSource + ?Sized,
    {
        let item_name = item_name.trim();
        let item = self
            .inventory
            .get(item_name)
            .ok_or_else(|| CoreError::ItemNotFound(item_name.to_string()))?;
        if !item.in_stock() {
            return Err(CoreError::OutOfStock(item_name.to_string()));
        }

        let price = self.price_of(item_name);
        let mut tendered = Money::zero();
        let mut coins: Vec<Denomination> = Vec::new();

        while tendered < price {
            let Some(token) = input.next_token() else {
                warn!(item = item_name, %tendered, %price, "Input closed before payment completed");
                return Err(CoreError::PaymentIncomplete { tendered, price });
            };

            match token.parse::<Denomination>() {
                Ok(coin) => {
                    tendered += coin.value();
                    coins.push(coin);
                    debug!(item = item_name, %coin, %tendered, %price, "Coin accepted");
                }
                Err(e) => warn!(token = %token.trim(), error = %e, "Ignoring payment token"),
            }
        }

        Ok(self.process_change(item_name, tendered, &coins))
    }

    /// Settles a purchase of `item_name` for which `tendered` has been paid
    /// using `coins`.
    ///
    /// The item is dispensed only if `coins` add up to `tendered` and change
    /// for `tendered - price` can be paid out (or none is due). Otherwise
    /// stock, coin bank and history are left alone and `coins` are refunded.
    pub fn process_change(
        &mut self,
        item_name: &str,
        tendered: Money,
        coins: &[Denomination],
    ) -> ChangeOutcome {
        let refund = || ChangeOutcome::Refunded {
            item: item_name.to_string(),
            tendered,
            coins: Change::from_coins(coins.iter().copied()),
        };

        let inserted: Money = coins.iter().map(|coin| coin.value()).sum();
        if inserted != tendered {
            warn!(item = item_name, %tendered, %inserted, "Coins do not match tendered amount, refunding");
            return refund();
        }

        let price = self.price_of(item_name);
        let available = self
            .inventory
            .get(item_name)
            .is_some_and(ItemRecord::in_stock);
        if !available || tendered < price {
            warn!(item = item_name, %tendered, %price, available, "Cannot vend, refunding");
            return refund();
        }

        let due = tendered - price;
        let change = if due.is_zero() {
            Change::new()
        } else {
            let change = self.calculate_change(due);
            if change.is_empty() {
                warn!(item = item_name, %due, "Change cannot be made, refunding");
                return refund();
            }
            change
        };

        if let Some(item) = self.inventory.get_mut(item_name) {
            item.available -= 1;
        }
        self.log_purchase(item_name);

        info!(item = item_name, %price, %tendered, change = %change, "Item vended");

        ChangeOutcome::Vended {
            item: item_name.to_string(),
            price,
            tendered,
            change,
        }
    }

    /// Removes change for `amount` from the coin bank, highest denomination
    /// first.
    ///
    /// All or nothing: an empty `Change` means the bank could not cover the
    /// exact amount and was left unmodified.
    pub fn calculate_change(&mut self, amount: Money) -> Change {
        self.coin_bank.make_change(amount)
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Counts one purchase of `item_name`. Returns the new count.
    pub fn log_purchase(&mut self, item_name: &str) -> u64 {
        let count = self.purchase_history.record(item_name);
        debug!(item = item_name, count, "Purchase logged");
        count
    }

    /// The three best sellers, ties in first-purchased order.
    pub fn top_3_items(&self) -> Vec<String> {
        self.top_items(TOP_ITEMS)
    }

    pub fn top_items(&self, n: usize) -> Vec<String> {
        self.purchase_history.top(n)
    }

    // =========================================================================
    // Reloads
    // =========================================================================

    /// Puts stock back to what the machine was built with.
    pub fn reload_inventory(&mut self) {
        self.inventory = self.initial_inventory.clone();
        info!(units = self.inventory.total_units(), "Inventory reloaded");
    }

    /// Puts the coin bank back to what the machine was built with.
    pub fn reload_coins(&mut self) {
        self.coin_bank = self.initial_coins.clone();
        info!(coin_total = %self.coin_bank.total(), "Coins reloaded");
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn coin_bank(&self) -> &CoinBank {
        &self.coin_bank
    }

    pub fn purchase_history(&self) -> &PurchaseHistory {
        &self.purchase_history
    }

    pub fn price_of(&self, item_name: &str) -> Money {
        self.prices.price_of(item_name)
    }

    pub fn snapshot(&self) -> MachineSnapshot<'_> {
        MachineSnapshot {
            inventory: &self.inventory,
            coin_bank: &self.coin_bank,
            coin_total: self.coin_bank.total(),
            purchase_history: &self.purchase_history,
        }
    }
}

impl Default for VendingMachine {
    fn default() -> Self {
        VendingMachine::new(MachineConfig::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
