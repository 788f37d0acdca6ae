//! # vend-core: Pure Logic for a Simulated Vending Machine
//!
//! This crate is the **heart** of Vend. It owns stock, coins and purchase
//! history, and decides what change to give. It never touches a terminal.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Vend Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    vend-cli (terminal session)                  │   │
//! │  │    prompt ──► item name ──► coin labels ──► print change        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ TokenSource                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vend-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  machine  │  │   coins   │  │ inventory │  │  history  │  │   │
//! │  │   │ pay_for   │  │ CoinBank  │  │ ItemRecord│  │  top 3    │  │   │
//! │  │   │ reloads   │  │ Change    │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • SINGLE THREADED • DETERMINISTIC UNDER TEST           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`machine`] - The `VendingMachine` entity and its purchase flow
//! - [`coins`] - Denominations, coin bank, greedy change making
//! - [`inventory`] - Stocked items and restock levels
//! - [`history`] - Purchase counts and best sellers
//! - [`money`] - Integer pence
//! - [`input`] - Token sources the machine reads payment from
//! - [`config`] - Construction-time configuration and defaults
//! - [`validation`] - Config checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use vend_core::input::ScriptedTokens;
//! use vend_core::{Denomination, VendingMachine};
//!
//! let mut machine = VendingMachine::default();
//! let item = machine.select_item("soda").unwrap().to_string();
//!
//! // Soda costs £1; pay with a £2 coin.
//! let outcome = machine
//!     .pay_for(&item, &mut ScriptedTokens::new(["£2"]))
//!     .unwrap();
//!
//! assert!(outcome.is_vended());
//! assert_eq!(outcome.returned().count(Denomination::OnePound), 1);
//! assert_eq!(machine.inventory().levels("soda"), Some([9, 100]));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod coins;
pub mod config;
pub mod error;
pub mod history;
pub mod input;
pub mod inventory;
pub mod machine;
pub mod money;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use coins::{Change, CoinBank, Denomination};
pub use config::{MachineConfig, PriceList};
pub use error::{CoreError, CoreResult, ValidationError};
pub use history::PurchaseHistory;
pub use input::TokenSource;
pub use inventory::{Inventory, ItemRecord};
pub use machine::{ChangeOutcome, MachineSnapshot, VendingMachine};
pub use money::Money;
