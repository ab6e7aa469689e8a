//! Catalog configuration.

use serde::{Deserialize, Serialize};
use tracing::warn;

use storefront_core::{DomainError, DomainResult};

use crate::paginate::DEFAULT_PAGE_SIZE;

/// Environment variable overriding the page size.
pub const PAGE_SIZE_ENV: &str = "STOREFRONT_PAGE_SIZE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogConfig {
    pub page_size: usize,
}

impl CatalogConfig {
    pub fn with_page_size(page_size: usize) -> DomainResult<Self> {
        if page_size == 0 {
            return Err(DomainError::validation("page size must be positive"));
        }
        Ok(Self { page_size })
    }

    /// Read overrides from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let Some(raw) = lookup(PAGE_SIZE_ENV) else {
            warn!(
                default = DEFAULT_PAGE_SIZE,
                "STOREFRONT_PAGE_SIZE not set; using default page size"
            );
            return Self::default();
        };
        let parsed = raw
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| Self::with_page_size(n).ok());
        parsed.unwrap_or_else(|| {
            warn!(value = %raw, "STOREFRONT_PAGE_SIZE is invalid; using default page size");
            Self::default()
        })
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
