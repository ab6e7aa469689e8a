use serde::{Deserialize, Serialize};

use storefront_core::{Entity, ProductId};

/// A product as supplied by the upstream product data source.
///
/// Immutable from the catalog's point of view: filtering, sorting and paging
/// only ever read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    pub company: String,
    /// Price in smallest currency unit.
    pub price: u64,
    /// Average review score, 0 to 5.
    #[serde(default)]
    pub stars: f32,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        company: impl Into<String>,
        price: u64,
        stars: f32,
    ) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            description: None,
            category: category.into(),
            company: company.into(),
            price,
            stars,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Category entry from the store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_name: String,
    #[serde(default)]
    pub disabled: bool,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            category_name: name.into(),
            disabled: false,
        }
    }

    pub fn disabled(name: impl Into<String>) -> Self {
        Self {
            category_name: name.into(),
            disabled: true,
        }
    }
}

/// Names of the categories that may seed the category filter.
pub fn enabled_category_names(categories: &[Category]) -> impl Iterator<Item = &str> {
    categories
        .iter()
        .filter(|c| !c.disabled)
        .map(|c| c.category_name.as_str())
}

/// Distinct non-empty categories in first-seen order.
pub fn distinct_categories(products: &[Product]) -> Vec<&str> {
    distinct(products.iter().map(|p| p.category.as_str()))
}

/// Distinct non-empty companies (brands) in first-seen order.
pub fn distinct_companies(products: &[Product]) -> Vec<&str> {
    distinct(products.iter().map(|p| p.company.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = std::collections::HashSet::new();
    values
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .collect()
}
