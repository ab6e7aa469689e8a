//! Filter state and the per-product predicates derived from it.
//!
//! The five predicates (search, category, company, price, rating) are
//! independent and commutative: the pipeline applies them in a fixed order
//! only because cheap, selective checks first waste less work.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult};

use crate::price::PriceRange;
use crate::product::Product;
use crate::sort::SortSelection;

/// Sentinel company value meaning "every brand".
pub const ALL_COMPANIES: &str = "all";

/// Minimum ratings offered by the filter panel.
pub const RATINGS: [u8; 4] = [4, 3, 2, 1];

/// Category checkboxes.
///
/// Keys are fixed when the catalog loads; only the booleans change afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategorySelection(BTreeMap<String, bool>);

impl CategorySelection {
    /// All given names, unchecked.
    pub fn unchecked<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self(names.into_iter().map(|n| (n.to_string(), false)).collect())
    }

    /// Flip one checkbox. Returns `false` if the name is not a known category.
    pub fn toggle(&mut self, name: &str) -> bool {
        match self.0.get_mut(name) {
            Some(checked) => {
                *checked = !*checked;
                true
            }
            None => false,
        }
    }

    /// Check one checkbox. Returns `false` if the name is not a known category.
    pub fn check(&mut self, name: &str) -> bool {
        match self.0.get_mut(name) {
            Some(checked) => {
                *checked = true;
                true
            }
            None => false,
        }
    }

    pub fn uncheck_all(&mut self) {
        self.0.values_mut().for_each(|checked| *checked = false);
    }

    pub fn is_checked(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    pub fn any_checked(&self) -> bool {
        self.0.values().any(|checked| *checked)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Brand filter: every company, or exactly one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CompanyFilter {
    #[default]
    All,
    Exact(String),
}

impl CompanyFilter {
    pub fn exact(name: impl Into<String>) -> Self {
        Self::from(name.into())
    }
}

impl From<String> for CompanyFilter {
    fn from(value: String) -> Self {
        if value == ALL_COMPANIES {
            Self::All
        } else {
            Self::Exact(value)
        }
    }
}

impl From<CompanyFilter> for String {
    fn from(value: CompanyFilter) -> Self {
        match value {
            CompanyFilter::All => ALL_COMPANIES.to_string(),
            CompanyFilter::Exact(name) => name,
        }
    }
}

/// Minimum-rating filter. Serialized as `-1` (no filter) or `1..=4`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum RatingFilter {
    #[default]
    Any,
    AtLeast(u8),
}

impl RatingFilter {
    pub fn at_least(stars: u8) -> DomainResult<Self> {
        if RATINGS.contains(&stars) {
            Ok(Self::AtLeast(stars))
        } else {
            Err(DomainError::validation(format!(
                "minimum rating must be between 1 and 4, got {stars}"
            )))
        }
    }
}

impl TryFrom<i8> for RatingFilter {
    type Error = DomainError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Any),
            v if v > 0 => Self::at_least(v as u8),
            v => Err(DomainError::validation(format!("invalid rating filter {v}"))),
        }
    }
}

impl From<RatingFilter> for i8 {
    fn from(value: RatingFilter) -> Self {
        match value {
            RatingFilter::Any => -1,
            RatingFilter::AtLeast(stars) => stars as i8,
        }
    }
}

/// Current search/category/brand/price/rating/sort selections.
///
/// Mutated only through the filter container's actions, which keep the
/// invariants (fixed category keys, ordered price range, valid rating).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub(crate) search: String,
    /// `None` until the catalog has loaded.
    pub(crate) category: Option<CategorySelection>,
    pub(crate) company: CompanyFilter,
    pub(crate) price: PriceRange,
    pub(crate) rating: RatingFilter,
    pub(crate) sort_by_option: SortSelection,
}

impl FilterState {
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> Option<&CategorySelection> {
        self.category.as_ref()
    }

    pub fn company(&self) -> &CompanyFilter {
        &self.company
    }

    pub fn price(&self) -> PriceRange {
        self.price
    }

    pub fn rating(&self) -> RatingFilter {
        self.rating
    }

    pub fn sort_by_option(&self) -> &SortSelection {
        &self.sort_by_option
    }
}

/// A per-product inclusion test.
pub trait ProductPredicate {
    /// Stable name, used in traces.
    fn name(&self) -> &'static str;

    /// `false` when the predicate would accept every product.
    fn is_active(&self) -> bool;

    fn matches(&self, product: &Product) -> bool;
}

/// Case-insensitive substring match on name, description, company, category.
#[derive(Debug, Clone)]
pub struct SearchPredicate {
    needle: Option<String>,
}

impl SearchPredicate {
    pub fn new(text: &str) -> Self {
        let trimmed = text.trim();
        Self {
            needle: (!trimmed.is_empty()).then(|| trimmed.to_lowercase()),
        }
    }
}

impl ProductPredicate for SearchPredicate {
    fn name(&self) -> &'static str {
        "search"
    }

    fn is_active(&self) -> bool {
        self.needle.is_some()
    }

    fn matches(&self, product: &Product) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };
        [
            product.name.as_str(),
            product.description(),
            product.company.as_str(),
            product.category.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle.as_str()))
    }
}

/// Keeps products of checked categories; a no-op when nothing is checked.
#[derive(Debug, Clone)]
pub struct CategoryPredicate<'a> {
    selection: Option<&'a CategorySelection>,
}

impl<'a> CategoryPredicate<'a> {
    pub fn new(selection: Option<&'a CategorySelection>) -> Self {
        Self {
            selection: selection.filter(|s| s.any_checked()),
        }
    }
}

impl ProductPredicate for CategoryPredicate<'_> {
    fn name(&self) -> &'static str {
        "category"
    }

    fn is_active(&self) -> bool {
        self.selection.is_some()
    }

    fn matches(&self, product: &Product) -> bool {
        self.selection
            .is_none_or(|selection| selection.is_checked(&product.category))
    }
}

#[derive(Debug, Clone)]
pub struct CompanyPredicate<'a> {
    company: &'a CompanyFilter,
}

impl<'a> CompanyPredicate<'a> {
    pub fn new(company: &'a CompanyFilter) -> Self {
        Self { company }
    }
}

impl ProductPredicate for CompanyPredicate<'_> {
    fn name(&self) -> &'static str {
        "company"
    }

    fn is_active(&self) -> bool {
        matches!(self.company, CompanyFilter::Exact(_))
    }

    fn matches(&self, product: &Product) -> bool {
        match self.company {
            CompanyFilter::All => true,
            CompanyFilter::Exact(name) => product.company == *name,
        }
    }
}

/// Inclusive price range check. Always active.
#[derive(Debug, Clone, Copy)]
pub struct PricePredicate {
    range: PriceRange,
}

impl PricePredicate {
    pub fn new(range: PriceRange) -> Self {
        Self { range }
    }
}

impl ProductPredicate for PricePredicate {
    fn name(&self) -> &'static str {
        "price"
    }

    fn is_active(&self) -> bool {
        true
    }

    fn matches(&self, product: &Product) -> bool {
        self.range.contains(product.price)
    }
}

/// Minimum-rating-and-above check.
#[derive(Debug, Clone, Copy)]
pub struct RatingPredicate {
    rating: RatingFilter,
}

impl RatingPredicate {
    pub fn new(rating: RatingFilter) -> Self {
        Self { rating }
    }
}

impl ProductPredicate for RatingPredicate {
    fn name(&self) -> &'static str {
        "rating"
    }

    fn is_active(&self) -> bool {
        matches!(self.rating, RatingFilter::AtLeast(_))
    }

    fn matches(&self, product: &Product) -> bool {
        match self.rating {
            RatingFilter::Any => true,
            RatingFilter::AtLeast(min) => product.stars >= f32::from(min),
        }
    }
}

/// The five predicates of a [`FilterState`], in application order.
#[derive(Debug, Clone)]
pub struct FilterPipeline<'a> {
    search: SearchPredicate,
    category: CategoryPredicate<'a>,
    company: CompanyPredicate<'a>,
    price: PricePredicate,
    rating: RatingPredicate,
}

impl<'a> FilterPipeline<'a> {
    pub fn new(state: &'a FilterState) -> Self {
        Self {
            search: SearchPredicate::new(&state.search),
            category: CategoryPredicate::new(state.category.as_ref()),
            company: CompanyPredicate::new(&state.company),
            price: PricePredicate::new(state.price),
            rating: RatingPredicate::new(state.rating),
        }
    }

    /// search → category → company → price → rating.
    pub fn predicates(&self) -> [&dyn ProductPredicate; 5] {
        [
            &self.search,
            &self.category,
            &self.company,
            &self.price,
            &self.rating,
        ]
    }

    fn active(&self) -> Vec<&dyn ProductPredicate> {
        self.predicates()
            .into_iter()
            .filter(|p| p.is_active())
            .collect()
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.active().iter().all(|p| p.matches(product))
    }

    /// Positions in `products` of every product that passes, in input order.
    pub fn matching_indices(&self, products: &[Product]) -> Vec<usize> {
        let active = self.active();
        products
            .iter()
            .enumerate()
            .filter(|(_, product)| active.iter().all(|p| p.matches(product)))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn apply<'p>(&self, products: &'p [Product]) -> Vec<&'p Product> {
        self.matching_indices(products)
            .into_iter()
            .map(|i| &products[i])
            .collect()
    }
}

/// Filter `products` by `state`, keeping input order.
pub fn apply_filters<'p>(products: &'p [Product], state: &FilterState) -> Vec<&'p Product> {
    FilterPipeline::new(state).apply(products)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("1", "Smart TV", "tv", "Samsung", 100, 2.0)
                .with_description("Pantalla 4K"),
            Product::new("2", "OLED TV", "tv", "LG", 50, 3.0),
            Product::new("3", "Galaxy", "phone", "Samsung", 200, 4.0),
            Product::new("4", "Auriculares", "earphone", "Sony", 30, 5.0),
        ]
    }

    fn loaded_state() -> FilterState {
        FilterState {
            category: Some(CategorySelection::unchecked(["tv", "phone", "earphone"])),
            price: PriceRange::new(0, 500),
            ..FilterState::default()
        }
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn blank_search_matches_everything() {
        let state = FilterState {
            search: "   ".to_string(),
            ..loaded_state()
        };
        assert_eq!(apply_filters(&catalog(), &state).len(), 4);
        assert!(!SearchPredicate::new("  ").is_active());
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let products = catalog();
        let by = |text: &str| {
            let state = FilterState {
                search: text.to_string(),
                ..loaded_state()
            };
            ids(&apply_filters(&products, &state))
        };

        assert_eq!(by("oled"), vec!["2"]);
        assert_eq!(by("4k"), vec!["1"]);
        assert_eq!(by("SAMSUNG"), vec!["1", "3"]);
        assert_eq!(by("earph"), vec!["4"]);
        assert_eq!(by(" galaxy "), vec!["3"]);
    }

    #[test]
    fn no_checked_category_means_all_categories() {
        let state = loaded_state();
        assert_eq!(apply_filters(&catalog(), &state).len(), 4);
    }

    #[test]
    fn checked_categories_restrict_results() {
        let mut state = loaded_state();
        if let Some(selection) = state.category.as_mut() {
            selection.check("tv");
            selection.check("earphone");
        }
        assert_eq!(ids(&apply_filters(&catalog(), &state)), vec!["1", "2", "4"]);
    }

    #[test]
    fn company_all_is_a_no_op_and_exact_matches_exactly() {
        let mut state = loaded_state();
        assert_eq!(apply_filters(&catalog(), &state).len(), 4);

        state.company = CompanyFilter::exact("Samsung");
        assert_eq!(ids(&apply_filters(&catalog(), &state)), vec!["1", "3"]);

        state.company = CompanyFilter::exact("samsung");
        assert!(apply_filters(&catalog(), &state).is_empty());
    }

    #[test]
    fn price_range_is_inclusive() {
        let state = FilterState {
            price: PriceRange::new(50, 100),
            ..loaded_state()
        };
        assert_eq!(ids(&apply_filters(&catalog(), &state)), vec!["1", "2"]);
    }

    #[test]
    fn rating_keeps_minimum_and_above() {
        let state = FilterState {
            rating: RatingFilter::at_least(3).unwrap(),
            ..loaded_state()
        };
        assert_eq!(ids(&apply_filters(&catalog(), &state)), vec!["2", "3", "4"]);
    }

    #[test]
    fn rating_filter_validates_range() {
        assert!(RatingFilter::at_least(0).is_err());
        assert!(RatingFilter::at_least(5).is_err());
        assert_eq!(RatingFilter::try_from(-1).unwrap(), RatingFilter::Any);
        assert!(RatingFilter::try_from(-2).is_err());
        assert_eq!(i8::from(RatingFilter::AtLeast(2)), 2);
    }

    #[test]
    fn unknown_category_names_are_not_added() {
        let mut selection = CategorySelection::unchecked(["tv"]);
        assert!(!selection.toggle("radio"));
        assert!(!selection.check("radio"));
        assert_eq!(selection.names().collect::<Vec<_>>(), vec!["tv"]);
    }

    #[test]
    fn filter_state_serializes_with_panel_field_names() {
        let state = FilterState {
            rating: RatingFilter::AtLeast(4),
            company: CompanyFilter::exact("LG"),
            ..loaded_state()
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["rating"], 4);
        assert_eq!(json["company"], "LG");
        assert_eq!(json["price"], serde_json::json!([0, 500]));
        assert_eq!(json["sortByOption"], "");
        assert_eq!(json["category"]["tv"], false);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        const CATEGORIES: [&str; 3] = ["tv", "phone", "laptop"];
        const COMPANIES: [&str; 3] = ["LG", "Sony", "Apple"];

        fn arb_product() -> impl Strategy<Value = Product> {
            (
                "[a-z]{1,8}",
                0usize..3,
                0usize..3,
                0u64..10_000,
                0u8..=5,
            )
                .prop_map(|(name, cat, company, price, stars)| {
                    Product::new(
                        format!("{name}-{price}"),
                        name,
                        CATEGORIES[cat],
                        COMPANIES[company],
                        price,
                        f32::from(stars),
                    )
                })
        }

        fn arb_state() -> impl Strategy<Value = FilterState> {
            (
                prop::option::of("[a-z]{1,2}"),
                prop::collection::vec(any::<bool>(), 3),
                prop::option::of(0usize..3),
                0u64..10_000,
                0u64..10_000,
                prop::option::of(1u8..=4),
            )
                .prop_map(|(search, checks, company, a, b, rating)| {
                    let mut selection = CategorySelection::unchecked(CATEGORIES);
                    for (name, checked) in CATEGORIES.iter().zip(checks) {
                        if checked {
                            selection.check(name);
                        }
                    }
                    FilterState {
                        search: search.unwrap_or_default(),
                        category: Some(selection),
                        company: company
                            .map(|c| CompanyFilter::exact(COMPANIES[c]))
                            .unwrap_or_default(),
                        price: PriceRange::new(a, b),
                        rating: rating.map(RatingFilter::AtLeast).unwrap_or_default(),
                        sort_by_option: SortSelection::Unsorted,
                    }
                })
        }

        proptest! {
            /// Property: applying the same state twice gives the same output.
            #[test]
            fn filtering_is_idempotent(
                products in prop::collection::vec(arb_product(), 0..40),
                state in arb_state(),
            ) {
                let once = apply_filters(&products, &state);
                let twice = apply_filters(&products, &state);
                prop_assert_eq!(once, twice);
            }

            /// Property: predicate application order does not change the result set.
            #[test]
            fn predicate_order_is_irrelevant(
                products in prop::collection::vec(arb_product(), 0..40),
                state in arb_state(),
                order in Just(vec![0usize, 1, 2, 3, 4]).prop_shuffle(),
            ) {
                let pipeline = FilterPipeline::new(&state);
                let predicates = pipeline.predicates();

                let mut remaining: Vec<&Product> = products.iter().collect();
                for i in order {
                    remaining.retain(|p| predicates[i].matches(p));
                }

                prop_assert_eq!(remaining, pipeline.apply(&products));
            }
        }
    }
}
