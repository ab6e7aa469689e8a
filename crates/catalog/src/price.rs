//! Price bounds and "friendly" rounding.

use serde::{Deserialize, Serialize};
use tracing::debug;

use storefront_core::ValueObject;

use crate::product::Product;

/// Min/max price of a catalog, widened to human-friendly increments.
///
/// Invariant: `min_price <= p.price <= max_price` for every product the bounds
/// were derived from. Always ordered: `min_price <= max_price`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawPriceBounds")]
pub struct PriceBounds {
    min_price: u64,
    max_price: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPriceBounds {
    min_price: u64,
    max_price: u64,
}

impl From<RawPriceBounds> for PriceBounds {
    fn from(raw: RawPriceBounds) -> Self {
        Self::new(raw.min_price, raw.max_price)
    }
}

impl ValueObject for PriceBounds {}

impl PriceBounds {
    /// Bounds used when there is nothing to derive them from.
    pub const EMPTY_CATALOG: PriceBounds = PriceBounds::new(0, 100_000);

    /// Build bounds from two ends given in either order.
    pub const fn new(a: u64, b: u64) -> Self {
        if a <= b {
            Self {
                min_price: a,
                max_price: b,
            }
        } else {
            Self {
                min_price: b,
                max_price: a,
            }
        }
    }

    pub fn min_price(&self) -> u64 {
        self.min_price
    }

    pub fn max_price(&self) -> u64 {
        self.max_price
    }

    pub fn from_products(products: &[Product]) -> Self {
        let Some(raw_min) = products.iter().map(|p| p.price).min() else {
            return Self::EMPTY_CATALOG;
        };
        let raw_max = products.iter().map(|p| p.price).max().unwrap_or(raw_min);

        let bounds = Self::new(round_down_friendly(raw_min), round_up_friendly(raw_max));
        debug!(
            raw_min,
            raw_max,
            min_price = bounds.min_price,
            max_price = bounds.max_price,
            "derived catalog price bounds"
        );
        bounds
    }

    pub fn span(&self) -> u64 {
        self.max_price.saturating_sub(self.min_price)
    }

    /// Price filter covering the whole catalog.
    pub fn full_range(&self) -> PriceRange {
        PriceRange::new(self.min_price, self.max_price)
    }

    pub fn contains(&self, price: u64) -> bool {
        self.min_price <= price && price <= self.max_price
    }
}

impl Default for PriceBounds {
    fn default() -> Self {
        Self::EMPTY_CATALOG
    }
}

/// Derive the friendly price bounds of a product list.
pub fn normalize(products: &[Product]) -> PriceBounds {
    PriceBounds::from_products(products)
}

/// Grid step for a value, growing with its magnitude.
fn friendly_step(value: u64) -> u64 {
    match value {
        0..=100 => 10,
        101..=1_000 => 100,
        1_001..=10_000 => 1_000,
        10_001..=100_000 => 5_000,
        _ => 10_000,
    }
}

pub fn round_down_friendly(value: u64) -> u64 {
    let step = friendly_step(value);
    value / step * step
}

pub fn round_up_friendly(value: u64) -> u64 {
    let step = friendly_step(value);
    value.div_ceil(step).saturating_mul(step)
}

/// Inclusive `[lo, hi]` price filter. Always ordered: `lo <= hi`.
///
/// Serializes as a two-element array, the shape the filter panel works with.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u64; 2]", into = "[u64; 2]")]
pub struct PriceRange {
    lo: u64,
    hi: u64,
}

impl ValueObject for PriceRange {}

impl PriceRange {
    /// Build a range from two ends given in either order.
    pub fn new(a: u64, b: u64) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    pub fn lo(&self) -> u64 {
        self.lo
    }

    pub fn hi(&self) -> u64 {
        self.hi
    }

    pub fn contains(&self, price: u64) -> bool {
        self.lo <= price && price <= self.hi
    }
}

impl From<[u64; 2]> for PriceRange {
    fn from([a, b]: [u64; 2]) -> Self {
        Self::new(a, b)
    }
}

impl From<PriceRange> for [u64; 2] {
    fn from(range: PriceRange) -> Self {
        [range.lo, range.hi]
    }
}
