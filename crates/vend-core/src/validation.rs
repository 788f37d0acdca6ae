//! # Validation Module
//!
//! Checks applied to a machine configuration before the machine is built.
//!
//! ## Usage
//! ```rust
//! use vend_core::validation::{validate_item_name, validate_price_pence};
//!
//! assert!(validate_item_name("chocolate").is_ok());
//! assert!(validate_price_pence(0).is_err());
//! ```

use crate::config::MachineConfig;
use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest item name the display can show.
pub const MAX_ITEM_NAME_LEN: usize = 50;

/// Validates an item name.
///
/// ## Rules
/// - Must not be empty or whitespace only
/// - At most `MAX_ITEM_NAME_LEN` characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "item name".to_string(),
        });
    }

    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "item name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a price in pence. Free items are not sold by this machine.
pub fn validate_price_pence(pence: i64) -> ValidationResult<()> {
    if pence <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a whole machine configuration.
///
/// ## Rules
/// - At least one item is stocked
/// - Every item name is valid
/// - The default price and every listed price are positive
///
/// Prices for items that are not stocked are allowed; they are never charged.
pub fn validate_config(config: &MachineConfig) -> ValidationResult<()> {
    if config.inventory.is_empty() {
        return Err(ValidationError::Required {
            field: "inventory".to_string(),
        });
    }

    for item in config.inventory.iter() {
        validate_item_name(&item.name)?;
    }

    validate_price_pence(config.prices.default_price().pence())?;

    for (_, price) in config.prices.iter() {
        validate_price_pence(price.pence())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::Inventory;
    use crate::money::Money;

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("chocolate").is_ok());
        assert!(validate_item_name("gold watch").is_ok());
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name("   ").is_err());
        assert!(validate_item_name(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_price_pence() {
        assert!(validate_price_pence(1).is_ok());
        assert!(validate_price_pence(0).is_err());
        assert!(validate_price_pence(-100).is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&MachineConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_inventory_rejected() {
        let config = MachineConfig {
            inventory: Inventory::new(),
            ..MachineConfig::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_custom_inventory_with_standard_prices_is_valid() {
        let inventory: Inventory = [("haribo", [20, 200]), ("water", [10, 100])]
            .into_iter()
            .collect();
        let config = MachineConfig::with_inventory(inventory);
        assert!(config.prices.price_of("chocolate").is_positive());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_non_positive_item_price_rejected() {
        let mut config = MachineConfig::default();
        config.prices.set("caviar", Money::from_pence(-5));
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_zero_default_price_rejected() {
        let mut config = MachineConfig::default();
        config.prices.set_default_price(Money::zero());
        assert!(validate_config(&config).is_err());
    }
}
