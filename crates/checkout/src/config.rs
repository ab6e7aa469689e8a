//! Store configuration.
//!
//! Sources, lowest to highest precedence: built-in defaults, the admin
//! panel's JSON export, environment variables.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use storefront_catalog::config::PAGE_SIZE_ENV;
use storefront_catalog::{CatalogConfig, DEFAULT_PAGE_SIZE};

use crate::currency::BASE_CURRENCY;
use crate::distance::GeoPoint;
use crate::phone::digits_of;
use crate::whatsapp::MIN_WHATSAPP_DIGITS;

pub const STORE_NAME_ENV: &str = "STOREFRONT_STORE_NAME";
pub const WHATSAPP_NUMBER_ENV: &str = "STOREFRONT_WHATSAPP_NUMBER";
pub const STORE_ADDRESS_ENV: &str = "STOREFRONT_STORE_ADDRESS";
pub const CURRENCY_ENV: &str = "STOREFRONT_CURRENCY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid store config: {0}")]
    Invalid(String),

    #[error("malformed store config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreConfig {
    pub store_name: String,
    pub whatsapp_number: String,
    pub store_address: String,
    pub store_location: GeoPoint,
    /// Display currency selected when a shopper first arrives.
    pub default_currency: String,
    pub page_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_name: "Yero Shop!".to_string(),
            whatsapp_number: "+53 54690878".to_string(),
            store_address: "Santiago de Cuba, Cuba".to_string(),
            store_location: GeoPoint {
                lat: 20.039585,
                lng: -75.849663,
            },
            default_currency: BASE_CURRENCY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store name cannot be empty".to_string()));
        }
        let digits = digits_of(&self.whatsapp_number).len();
        if digits < MIN_WHATSAPP_DIGITS {
            return Err(ConfigError::Invalid(format!(
                "WhatsApp number '{}' has {digits} digits, need at least {MIN_WHATSAPP_DIGITS}",
                self.whatsapp_number
            )));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page size must be positive".to_string()));
        }
        if GeoPoint::new(self.store_location.lat, self.store_location.lng).is_err() {
            return Err(ConfigError::Invalid(format!(
                "store location {} is out of range",
                self.store_location
            )));
        }
        Ok(())
    }

    /// Parse the admin panel's camelCase export. Missing fields take defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: StoreConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON export from disk, then apply environment overrides.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading store config {}", path.display()))?;
        let config = Self::from_json(&raw)
            .with_context(|| format!("parsing store config {}", path.display()))?
            .with_overrides(|key| std::env::var(key).ok());
        config
            .validate()
            .context("store config invalid after environment overrides")?;
        debug!(path = %path.display(), store = %config.store_name, "store config loaded");
        Ok(config)
    }

    /// Defaults with environment overrides. Invalid overrides are ignored.
    pub fn from_env() -> Self {
        let config = Self::default().with_overrides(|key| std::env::var(key).ok());
        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!(error = %e, "store config from environment is invalid; using defaults");
                Self::default()
            }
        }
    }

    pub(crate) fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let take = |key: &str, field: &mut String| match lookup(key) {
            Some(value) if !value.trim().is_empty() => *field = value.trim().to_string(),
            _ => warn!(key, default = %field, "not set; keeping configured value"),
        };
        take(STORE_NAME_ENV, &mut self.store_name);
        take(WHATSAPP_NUMBER_ENV, &mut self.whatsapp_number);
        take(STORE_ADDRESS_ENV, &mut self.store_address);
        take(CURRENCY_ENV, &mut self.default_currency);
        self.default_currency = self.default_currency.to_uppercase();

        if let Some(raw) = lookup(PAGE_SIZE_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => self.page_size = n,
                _ => warn!(value = %raw, "STOREFRONT_PAGE_SIZE is invalid; keeping configured page size"),
            }
        }
        self
    }

    pub fn catalog(&self) -> CatalogConfig {
        CatalogConfig::with_page_size(self.page_size).unwrap_or_default()
    }
}
