//! # Configuration
//!
//! Settings for a calculator session, read from TOML.
//!
//! Search order:
//! 1. An explicit path, when given
//! 2. `vitral.toml` next to the executable
//! 3. The embedded default below
//!
//! ```toml
//! [service]
//! base_url = "http://localhost:3000"
//! timeout_secs = 10
//! user_agent = "Vitral/0.1"
//!
//! [session]
//! company_id = "demo"
//! debounce_ms = 250
//! cart_path = "vitral-cart.json"
//!
//! [rounding]
//! glass = "round_unit_only"
//! frame = "round_unit_and_total"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{QuoteError, QuoteResult};
use crate::rounding::RoundingStrategy;

/// File name looked up next to the executable
pub const CONFIG_FILE_NAME: &str = "vitral.toml";

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[service]
base_url = "http://localhost:3000"
timeout_secs = 10
user_agent = "Vitral/0.1"

[session]
company_id = "demo"
debounce_ms = 250
cart_path = "vitral-cart.json"

[rounding]
glass = "round_unit_only"
frame = "round_unit_and_total"
"#;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub rounding: RoundingConfig,
}

/// Where the pricing service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: 10,
            user_agent: format!("Vitral/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Tenant every pricing request is scoped to
    pub company_id: String,
    /// Quiet time after the last input change before a price is fetched
    pub debounce_ms: u64,
    pub cart_path: PathBuf,
}

impl SessionConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            company_id: "demo".to_string(),
            debounce_ms: 250,
            cart_path: PathBuf::from("vitral-cart.json"),
        }
    }
}

/// Rounding strategy per calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundingConfig {
    pub glass: RoundingStrategy,
    pub frame: RoundingStrategy,
}

impl Default for RoundingConfig {
    fn default() -> Self {
        RoundingConfig {
            glass: RoundingStrategy::RoundUnitOnly,
            frame: RoundingStrategy::RoundUnitAndTotal,
        }
    }
}

impl PricingConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(contents: &str) -> QuoteResult<Self> {
        let config: PricingConfig =
            toml::from_str(contents).map_err(|e| QuoteError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> QuoteResult<()> {
        if self.service.base_url.trim().is_empty() {
            return Err(QuoteError::config("service.base_url must not be empty"));
        }
        if self.service.timeout_secs == 0 {
            return Err(QuoteError::config("service.timeout_secs must be at least 1"));
        }
        if self.session.company_id.trim().is_empty() {
            return Err(QuoteError::config("session.company_id must not be empty"));
        }
        Ok(())
    }
}

/// Load configuration following the search order above.
pub fn load_config(explicit: Option<&Path>) -> QuoteResult<PricingConfig> {
    if let Some(path) = explicit {
        tracing::info!("Loading config from: {}", path.display());
        return read_config(path);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                return read_config(&config_path);
            }
            tracing::debug!("{} not found at: {}", CONFIG_FILE_NAME, config_path.display());
        }
    }

    tracing::info!("Using default embedded configuration");
    PricingConfig::from_toml(DEFAULT_CONFIG)
}

fn read_config(path: &Path) -> QuoteResult<PricingConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        QuoteError::file_error("read config", path.display().to_string(), e.to_string())
    })?;
    PricingConfig::from_toml(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = PricingConfig::from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.session.company_id, "demo");
        assert_eq!(config.session.debounce(), Duration::from_millis(250));
        assert_eq!(config.rounding.glass, RoundingStrategy::RoundUnitOnly);
        assert_eq!(config.rounding.frame, RoundingStrategy::RoundUnitAndTotal);
    }

    #[test]
    fn test_default_matches_embedded_config() {
        let config = PricingConfig::default();
        assert_eq!(config.session, SessionConfig::default());
        assert_eq!(config.rounding, RoundingConfig::default());
        assert_eq!(config.service.base_url, "http://localhost:3000");
        assert_eq!(config.session, PricingConfig::from_toml(DEFAULT_CONFIG).unwrap().session);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let toml = "[session]\ncompany_id = \"acme\"\ndebounce_ms = 100\ncart_path = \"c.json\"\n";
        let config = PricingConfig::from_toml(toml).unwrap();
        assert_eq!(config.session.company_id, "acme");
        assert_eq!(config.service, ServiceConfig::default());
        assert_eq!(config.rounding, RoundingConfig::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let empty_url = "[service]\nbase_url = \"\"\ntimeout_secs = 5\nuser_agent = \"x\"\n";
        let err = PricingConfig::from_toml(empty_url).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");

        let bad_strategy = "[rounding]\nglass = \"round_sometimes\"\nframe = \"round_unit_only\"\n";
        assert!(PricingConfig::from_toml(bad_strategy).is_err());
    }

    #[test]
    fn test_explicit_path() {
        let path = std::env::temp_dir().join("vitral_test_config.toml");
        std::fs::write(&path, DEFAULT_CONFIG.replace("\"demo\"", "\"taller-norte\"")).unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.session.company_id, "taller-norte");
        let _ = std::fs::remove_file(&path);

        assert!(load_config(Some(Path::new("/nonexistent/vitral.toml"))).is_err());
    }
}
