//! Sort strategies for the filtered product list.

use std::cmp::Reverse;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use storefront_core::DomainError;

use crate::collation::collation_key;
use crate::product::Product;

/// The four orderings offered by the store, keyed by their panel labels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SortOption {
    PriceLowToHigh,
    PriceHighToLow,
    NameAToZ,
    NameZToA,
}

impl SortOption {
    pub const ALL: [SortOption; 4] = [
        SortOption::PriceLowToHigh,
        SortOption::PriceHighToLow,
        SortOption::NameAToZ,
        SortOption::NameZToA,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortOption::PriceLowToHigh => "precio: menor a mayor",
            SortOption::PriceHighToLow => "precio: mayor a menor",
            SortOption::NameAToZ => "nombre: a a z",
            SortOption::NameZToA => "nombre: z a a",
        }
    }

    /// Stable sort of `items`, reading each item's product through `product`.
    fn sort_by_product<'p, T>(self, items: &mut [T], product: impl Fn(&T) -> &'p Product) {
        match self {
            SortOption::PriceLowToHigh => items.sort_by_key(|i| product(i).price),
            SortOption::PriceHighToLow => items.sort_by_key(|i| Reverse(product(i).price)),
            SortOption::NameAToZ => items.sort_by_cached_key(|i| collation_key(&product(i).name)),
            SortOption::NameZToA => {
                items.sort_by_cached_key(|i| Reverse(collation_key(&product(i).name)))
            }
        }
    }
}

impl FromStr for SortOption {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|o| o.label() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown sort option '{s}'")))
    }
}

impl core::fmt::Display for SortOption {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// What the shopper picked in the sort dropdown.
///
/// Kept as-is even when unrecognized, so the bad value stays visible in the
/// state and in the warning it produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortSelection {
    #[default]
    Unsorted,
    By(SortOption),
    Unrecognized(String),
}

impl SortSelection {
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return SortSelection::Unsorted;
        }
        match raw.parse::<SortOption>() {
            Ok(option) => SortSelection::By(option),
            Err(_) => SortSelection::Unrecognized(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SortSelection::Unsorted => "",
            SortSelection::By(option) => option.label(),
            SortSelection::Unrecognized(raw) => raw,
        }
    }

    /// The ordering to apply, if any. Unrecognized values log a warning.
    pub fn resolve(&self) -> Option<SortOption> {
        match self {
            SortSelection::Unsorted => None,
            SortSelection::By(option) => Some(*option),
            SortSelection::Unrecognized(raw) => {
                warn!(sort_option = %raw, "unrecognized sort option; keeping filter order");
                None
            }
        }
    }
}

impl From<SortOption> for SortSelection {
    fn from(option: SortOption) -> Self {
        SortSelection::By(option)
    }
}

impl From<String> for SortSelection {
    fn from(value: String) -> Self {
        SortSelection::parse(&value)
    }
}

impl From<SortSelection> for String {
    fn from(value: SortSelection) -> Self {
        value.as_str().to_string()
    }
}

/// Sorted copy of `products`. The input slice is left untouched.
pub fn sort_products<'p>(products: &[&'p Product], selection: &SortSelection) -> Vec<&'p Product> {
    let mut sorted = products.to_vec();
    if let Some(option) = selection.resolve() {
        option.sort_by_product(&mut sorted, |p| *p);
    }
    sorted
}

/// Sort positions into `products` in place.
pub(crate) fn sort_indices(indices: &mut [usize], products: &[Product], selection: &SortSelection) {
    if let Some(option) = selection.resolve() {
        option.sort_by_product(indices, |i| &products[*i]);
    }
}
