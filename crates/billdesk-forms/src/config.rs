//! # Forms Configuration
//!
//! Defaults the price and invoice forms start from.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BILLDESK_CURRENCY=eur                                              │
//! │     BILLDESK_INVOICE_TEMPLATE={prefix}-{YY}{MM}-{number}               │
//! │     BILLDESK_INVOICE_PADDING=5                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $BILLDESK_CONFIG, or                                               │
//! │     ~/.config/billdesk/forms.toml (Linux)                              │
//! │     ~/Library/Application Support/com.billdesk.billdesk/forms.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     usd, first tier up to 10, graduated, INV-{YYYY}-{number}           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [currency]
//! code = "usd"
//! symbol = "$"
//! decimals = 2
//!
//! [tiers]
//! first_tier_upper = 10
//! default_mode = "graduated"
//!
//! [invoice_numbering]
//! template = "{prefix}-{YYYY}-{number}"
//! prefix = "INV"
//! padding = 4
//! reset = "yearly"
//! ```

use std::path::{Path, PathBuf};

use billdesk_core::numbering::NumberingSystem;
use billdesk_core::validation::validate_currency;
use billdesk_core::{Money, TiersMode, DEFAULT_FIRST_TIER_UPPER, MAX_TIER_BOUND};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{FormError, FormResult};

// =============================================================================
// Currency Settings
// =============================================================================

/// How amounts are entered and displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencySettings {
    /// ISO 4217 code, lowercase.
    #[serde(default = "default_currency_code")]
    pub code: String,

    /// Symbol for display.
    #[serde(default = "default_currency_symbol")]
    pub symbol: String,

    /// Number of decimal places of the minor unit.
    #[serde(default = "default_currency_decimals")]
    pub decimals: u8,
}

fn default_currency_code() -> String {
    "usd".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_currency_decimals() -> u8 {
    2
}

impl Default for CurrencySettings {
    fn default() -> Self {
        CurrencySettings {
            code: default_currency_code(),
            symbol: default_currency_symbol(),
            decimals: default_currency_decimals(),
        }
    }
}

impl CurrencySettings {
    /// Formats a minor-unit amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use billdesk_forms::config::CurrencySettings;
    ///
    /// let usd = CurrencySettings::default();
    /// assert_eq!(usd.format(1234), "$12.34");
    /// assert_eq!(usd.format(-5), "-$0.05");
    /// ```
    pub fn format(&self, cents: i64) -> String {
        Money::from_cents(cents).format(&self.symbol, self.decimals)
    }
}

// =============================================================================
// Tier Settings
// =============================================================================

/// Starting shape of a new tiered price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSettings {
    /// Upper bound of the first tier when a tiered price is added.
    #[serde(default = "default_first_tier_upper")]
    pub first_tier_upper: i64,

    #[serde(default)]
    pub default_mode: TiersMode,
}

fn default_first_tier_upper() -> i64 {
    DEFAULT_FIRST_TIER_UPPER
}

impl Default for TierSettings {
    fn default() -> Self {
        TierSettings {
            first_tier_upper: default_first_tier_upper(),
            default_mode: TiersMode::default(),
        }
    }
}

// =============================================================================
// Main Forms Configuration
// =============================================================================

/// Complete forms configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormsConfig {
    #[serde(default)]
    pub currency: CurrencySettings,

    #[serde(default)]
    pub tiers: TierSettings,

    #[serde(default)]
    pub invoice_numbering: NumberingSystem,
}

impl FormsConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, `$BILLDESK_CONFIG`, or the platform path)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> FormResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Same as [`FormsConfig::load`], reading variables through `lookup`
    /// instead of the process environment.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> FormResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = config_path
            .or_else(|| lookup("BILLDESK_CONFIG").map(PathBuf::from))
            .or_else(Self::default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load forms config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Reads and parses a TOML config file.
    pub fn from_file(path: &Path) -> FormResult<Self> {
        info!(?path, "Loading forms config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| FormError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses config from TOML text.
    pub fn from_toml_str(contents: &str) -> FormResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> FormResult<()> {
        validate_currency(&self.currency.code)?;

        if self.currency.decimals > 4 {
            return Err(FormError::InvalidConfig(format!(
                "currency.decimals must be at most 4, got {}",
                self.currency.decimals
            )));
        }

        if !(0..MAX_TIER_BOUND).contains(&self.tiers.first_tier_upper) {
            return Err(FormError::InvalidConfig(format!(
                "tiers.first_tier_upper must be between 0 and {}, got {}",
                MAX_TIER_BOUND - 1,
                self.tiers.first_tier_upper
            )));
        }

        // Any fixed date works: only the template's syntax is checked.
        let sample_date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();
        self.invoice_numbering.preview(sample_date)?;

        Ok(())
    }

    /// Applies overrides from a key lookup (the process environment in
    /// [`FormsConfig::load`]).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(code) = lookup("BILLDESK_CURRENCY") {
            debug!(currency = %code, "Overriding currency from environment");
            self.currency.code = code.to_ascii_lowercase();
        }

        if let Some(template) = lookup("BILLDESK_INVOICE_TEMPLATE") {
            debug!(template = %template, "Overriding invoice template from environment");
            self.invoice_numbering.template = template;
        }

        if let Some(padding) = lookup("BILLDESK_INVOICE_PADDING") {
            match padding.parse::<u8>() {
                Ok(p) => self.invoice_numbering.padding = p,
                Err(_) => warn!(padding = %padding, "Ignoring invalid invoice padding"),
            }
        }
    }

    /// Formats cents in the configured currency.
    pub fn format_currency(&self, cents: i64) -> String {
        self.currency.format(cents)
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "billdesk", "billdesk")
            .map(|dirs| dirs.config_dir().join("forms.toml"))
    }
}
