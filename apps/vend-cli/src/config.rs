//! # Machine Config Loading
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     VEND_DEFAULT_PRICE=120                                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $VEND_CONFIG, or                                                   │
//! │     ~/.config/vend/machine.toml (Linux)                                │
//! │     ~/Library/Application Support/com.vend.vend/machine.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     MachineConfig::default()                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A missing file is not an error; an unreadable or malformed one is.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use vend_core::validation::validate_config;
use vend_core::{MachineConfig, Money, ValidationError};

/// Points at a config file, overriding the platform default location.
pub const CONFIG_PATH_VAR: &str = "VEND_CONFIG";

/// Default price in pence for items without their own price.
pub const DEFAULT_PRICE_VAR: &str = "VEND_DEFAULT_PRICE";

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Invalid machine config: {0}")]
    Invalid(#[from] ValidationError),
}

/// Loads the machine configuration from file, environment and defaults.
///
/// ## Load Order (later overrides earlier)
/// 1. Default values
/// 2. Config file
/// 3. Environment variables
pub fn load(config_path: Option<PathBuf>) -> Result<MachineConfig, ConfigError> {
    let path = config_path
        .or_else(|| std::env::var(CONFIG_PATH_VAR).ok().map(PathBuf::from))
        .or_else(default_config_path);

    let mut config = match path {
        Some(path) if path.exists() => from_file(&path)?,
        Some(path) => {
            debug!(?path, "Config file not found, using defaults");
            MachineConfig::default()
        }
        None => MachineConfig::default(),
    };

    apply_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config)?;

    Ok(config)
}

/// Parses a TOML machine config file.
pub fn from_file(path: &Path) -> Result<MachineConfig, ConfigError> {
    info!(?path, "Loading machine config from file");
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Applies overrides looked up through `var`.
///
/// Takes the lookup as a function so tests do not have to touch the process
/// environment.
pub fn apply_overrides<F>(config: &mut MachineConfig, var: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = var(DEFAULT_PRICE_VAR) {
        let pence: i64 = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(DEFAULT_PRICE_VAR.to_string()))?;
        debug!(pence, "Overriding default price from environment");
        config.prices.set_default_price(Money::from_pence(pence));
    }

    Ok(())
}

/// Returns the default config file path.
fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "vend", "vend")
        .map(|dirs| dirs.config_dir().join("machine.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use vend_core::Denomination;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [inventory]
            haribo = [20, 200]

            [coins]
            "£1" = 25

            [prices.items]
            haribo = 150
            "#
        )
        .unwrap();

        let config = load(Some(file.path().to_path_buf())).unwrap();

        assert_eq!(config.inventory.levels("haribo"), Some([20, 200]));
        assert_eq!(config.coins.count(Denomination::OnePound), 25);
        assert_eq!(config.prices.price_of("haribo").pence(), 150);
    }

    #[test]
    fn test_load_inventory_only_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[inventory]\nwater = [10, 100]\nharibo = [20, 200]").unwrap();

        let config = load(Some(file.path().to_path_buf())).unwrap();

        let names: Vec<_> = config.inventory.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["water", "haribo"]);
        assert_eq!(config.prices.price_of("haribo").pence(), 100);
        assert_eq!(config.coins, MachineConfig::default().coins);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.inventory, MachineConfig::default().inventory);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[inventory]\nharibo = \"lots\"").unwrap();

        let result = load(Some(file.path().to_path_buf()));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[prices]\ndefault = 0").unwrap();

        let result = load(Some(file.path().to_path_buf()));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_default_price_override() {
        let mut config = MachineConfig::default();
        apply_overrides(&mut config, |key| {
            (key == DEFAULT_PRICE_VAR).then(|| "120".to_string())
        })
        .unwrap();
        assert_eq!(config.prices.price_of("haribo").pence(), 120);
        assert_eq!(config.prices.price_of("chocolate").pence(), 200);
    }

    #[test]
    fn test_bad_override_is_an_error() {
        let mut config = MachineConfig::default();
        let result = apply_overrides(&mut config, |_| Some("one pound".to_string()));
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }
}
