//! Filter state container.
//!
//! Holds the loaded catalog and the shopper's [`FilterState`], and keeps the
//! derived view (matching products, current page) in step with both. All
//! mutation goes through [`FilterAction`]s reduced one at a time.

use serde::Serialize;
use tracing::{debug, warn};

use storefront_core::Reducer;

use crate::config::CatalogConfig;
use crate::filters::{CategorySelection, CompanyFilter, FilterPipeline, FilterState, RatingFilter};
use crate::paginate::{page_count, paginate, PaginatedView};
use crate::price::{PriceBounds, PriceRange};
use crate::product::{enabled_category_names, Category, Product};
use crate::sort::{sort_indices, SortSelection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerPhase {
    Uninitialized,
    Loaded,
}

/// Generic setter payload for the single-value filters.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterUpdate {
    Company(CompanyFilter),
    Rating(RatingFilter),
    Sort(SortSelection),
    Price(PriceRange),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterAction {
    /// Catalog arrived (or changed) from the product source.
    Load {
        products: Vec<Product>,
        categories: Vec<Category>,
    },
    UpdateSearch(String),
    /// Toggle one category checkbox.
    UpdateCategory(String),
    /// Force one category checkbox on.
    CheckCategory(String),
    UpdateFilter(FilterUpdate),
    ClearFilters,
    /// Move to another page of the current result; filters are not re-run.
    UpdatePagination(usize),
    ApplyFilters,
}

#[derive(Debug, Clone)]
pub struct FiltersContainer {
    all_products: Vec<Product>,
    bounds: PriceBounds,
    filters: FilterState,
    /// Positions in `all_products` of the filtered, sorted result.
    matching: Vec<usize>,
    paginate_index: usize,
    page_size: usize,
    phase: ContainerPhase,
    revision: u64,
}

impl FiltersContainer {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            all_products: Vec::new(),
            bounds: PriceBounds::EMPTY_CATALOG,
            filters: FilterState::default(),
            matching: Vec::new(),
            paginate_index: 0,
            page_size: config.page_size,
            phase: ContainerPhase::Uninitialized,
            revision: 0,
        }
    }

    pub fn phase(&self) -> ContainerPhase {
        self.phase
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn bounds(&self) -> PriceBounds {
        self.bounds
    }

    pub fn min_price(&self) -> u64 {
        self.bounds.min_price()
    }

    pub fn max_price(&self) -> u64 {
        self.bounds.max_price()
    }

    pub fn all_products(&self) -> &[Product] {
        &self.all_products
    }

    pub fn paginate_index(&self) -> usize {
        self.paginate_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Products matching the filters, before pagination.
    pub fn displayable_products_len(&self) -> usize {
        self.matching.len()
    }

    pub fn page_count(&self) -> usize {
        page_count(self.matching.len(), self.page_size)
    }

    /// The whole filtered, sorted result across all pages.
    pub fn matching_products(&self) -> impl Iterator<Item = &Product> {
        self.matching.iter().map(|&i| &self.all_products[i])
    }

    /// Products on the current page.
    pub fn filtered_products(&self) -> Vec<&Product> {
        paginate(&self.matching, self.page_size, self.paginate_index)
            .iter()
            .map(|&i| &self.all_products[i])
            .collect()
    }

    pub fn current_page(&self) -> PaginatedView {
        PaginatedView {
            items: self.filtered_products().into_iter().cloned().collect(),
            total_count: self.matching.len(),
            page_index: self.paginate_index,
        }
    }

    fn load(&mut self, products: Vec<Product>, categories: &[Category]) {
        self.bounds = PriceBounds::from_products(&products);
        self.all_products = products;
        self.filters.category = Some(CategorySelection::unchecked(enabled_category_names(
            categories,
        )));
        self.filters.price = self.bounds.full_range();
        self.phase = ContainerPhase::Loaded;
        debug!(
            products = self.all_products.len(),
            categories = self.filters.category.as_ref().map_or(0, CategorySelection::len),
            "catalog loaded into filter container"
        );
    }

    fn with_category(&mut self, name: &str, change: impl FnOnce(&mut CategorySelection, &str) -> bool) {
        let known = self
            .filters
            .category
            .as_mut()
            .is_some_and(|selection| change(selection, name));
        if !known {
            warn!(category = %name, "ignoring unknown category");
        }
    }

    fn update(&mut self, update: FilterUpdate) {
        match update {
            FilterUpdate::Company(company) => self.filters.company = company,
            FilterUpdate::Rating(rating) => self.filters.rating = rating,
            FilterUpdate::Sort(selection) => self.filters.sort_by_option = selection,
            FilterUpdate::Price(range) => self.filters.price = range,
        }
    }

    fn clear(&mut self) {
        let category = self.filters.category.take().map(|mut selection| {
            selection.uncheck_all();
            selection
        });
        self.filters = FilterState {
            category,
            price: self.bounds.full_range(),
            ..FilterState::default()
        };
    }

    /// Recompute the filtered, sorted result from the current state.
    fn rederive(&mut self) {
        let pipeline = FilterPipeline::new(&self.filters);
        let mut matching = pipeline.matching_indices(&self.all_products);
        sort_indices(&mut matching, &self.all_products, &self.filters.sort_by_option);
        self.matching = matching;
        debug!(
            matched = self.matching.len(),
            total = self.all_products.len(),
            "filters applied"
        );
    }
}

impl Default for FiltersContainer {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}

impl Reducer for FiltersContainer {
    type Action = FilterAction;

    fn reduce(&mut self, action: Self::Action) {
        match action {
            FilterAction::Load {
                products,
                categories,
            } => self.load(products, &categories),
            FilterAction::UpdateSearch(text) => self.filters.search = text,
            FilterAction::UpdateCategory(name) => {
                self.with_category(&name, |selection, name| selection.toggle(name))
            }
            FilterAction::CheckCategory(name) => {
                self.with_category(&name, |selection, name| selection.check(name))
            }
            FilterAction::UpdateFilter(update) => self.update(update),
            FilterAction::ClearFilters => self.clear(),
            FilterAction::UpdatePagination(index) => {
                self.paginate_index = index;
                self.revision += 1;
                return;
            }
            FilterAction::ApplyFilters => {}
        }

        // Every other action changes what matches: start again from page one.
        self.rederive();
        self.paginate_index = 0;
        self.revision += 1;
    }

    fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortOption;

    fn categories() -> Vec<Category> {
        vec![
            Category::new("tv"),
            Category::new("phone"),
            Category::disabled("laptop"),
        ]
    }

    fn loaded(products: Vec<Product>) -> FiltersContainer {
        let mut container = FiltersContainer::default();
        container.reduce(FilterAction::Load {
            products,
            categories: categories(),
        });
        container
    }

    fn names(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.name.clone()).collect()
    }

    fn sample() -> Vec<Product> {
        vec![
            Product::new("1", "B", "tv", "LG", 100, 3.0),
            Product::new("2", "A", "tv", "Sony", 50, 4.0),
            Product::new("3", "C", "phone", "Apple", 200, 5.0),
        ]
    }

    #[test]
    fn starts_uninitialized_and_empty() {
        let container = FiltersContainer::default();
        assert_eq!(container.phase(), ContainerPhase::Uninitialized);
        assert!(container.filters().category().is_none());
        assert!(container.filtered_products().is_empty());
        assert_eq!(container.revision(), 0);
    }

    #[test]
    fn load_seeds_enabled_categories_and_full_price_range() {
        let container = loaded(sample());

        assert_eq!(container.phase(), ContainerPhase::Loaded);
        let selection = container.filters().category().unwrap();
        assert_eq!(selection.names().collect::<Vec<_>>(), vec!["phone", "tv"]);
        assert!(!selection.any_checked());

        assert_eq!((container.min_price(), container.max_price()), (50, 200));
        assert_eq!(container.filters().price(), PriceRange::new(50, 200));
        assert_eq!(container.displayable_products_len(), 3);
        assert_eq!(container.paginate_index(), 0);
    }

    #[test]
    fn tv_category_sorted_by_ascending_price() {
        let mut container = loaded(sample());
        container.reduce_all([
            FilterAction::UpdateCategory("tv".to_string()),
            FilterAction::UpdateFilter(FilterUpdate::Price(PriceRange::new(0, 500))),
            FilterAction::UpdateFilter(FilterUpdate::Sort(SortOption::PriceLowToHigh.into())),
        ]);

        assert_eq!(names(&container.filtered_products()), vec!["A", "B"]);
        assert_eq!(container.displayable_products_len(), 2);
    }

    #[test]
    fn toggling_a_category_twice_restores_all_products() {
        let mut container = loaded(sample());
        container.reduce(FilterAction::UpdateCategory("phone".to_string()));
        assert_eq!(names(&container.filtered_products()), vec!["C"]);

        container.reduce(FilterAction::UpdateCategory("phone".to_string()));
        assert_eq!(container.displayable_products_len(), 3);
    }

    #[test]
    fn unknown_and_disabled_categories_are_ignored() {
        let mut container = loaded(sample());
        let before = container.filters().clone();

        container.reduce(FilterAction::UpdateCategory("laptop".to_string()));
        container.reduce(FilterAction::CheckCategory("radio".to_string()));

        assert_eq!(container.filters(), &before);
        assert_eq!(container.displayable_products_len(), 3);
    }

    #[test]
    fn check_category_is_idempotent() {
        let mut container = loaded(sample());
        container.reduce(FilterAction::CheckCategory("tv".to_string()));
        container.reduce(FilterAction::CheckCategory("tv".to_string()));

        assert!(container.filters().category().unwrap().is_checked("tv"));
        assert_eq!(container.displayable_products_len(), 2);
    }

    #[test]
    fn search_company_and_rating_narrow_the_result() {
        let mut container = loaded(sample());

        container.reduce(FilterAction::UpdateSearch("  sony ".to_string()));
        assert_eq!(names(&container.filtered_products()), vec!["A"]);

        container.reduce(FilterAction::UpdateSearch(String::new()));
        container.reduce(FilterAction::UpdateFilter(FilterUpdate::Company(
            CompanyFilter::exact("Apple"),
        )));
        assert_eq!(names(&container.filtered_products()), vec!["C"]);

        container.reduce(FilterAction::UpdateFilter(FilterUpdate::Company(CompanyFilter::All)));
        container.reduce(FilterAction::UpdateFilter(FilterUpdate::Rating(
            RatingFilter::at_least(4).unwrap(),
        )));
        assert_eq!(names(&container.filtered_products()), vec!["A", "C"]);
    }

    #[test]
    fn clear_filters_restores_bounds_and_unchecks_categories() {
        let mut container = loaded(sample());
        container.reduce_all([
            FilterAction::UpdateSearch("b".to_string()),
            FilterAction::UpdateCategory("tv".to_string()),
            FilterAction::UpdateFilter(FilterUpdate::Company(CompanyFilter::exact("LG"))),
            FilterAction::UpdateFilter(FilterUpdate::Price(PriceRange::new(60, 120))),
            FilterAction::UpdateFilter(FilterUpdate::Rating(RatingFilter::AtLeast(2))),
            FilterAction::UpdateFilter(FilterUpdate::Sort(SortOption::NameZToA.into())),
        ]);
        assert_eq!(container.displayable_products_len(), 1);

        container.reduce(FilterAction::ClearFilters);

        let filters = container.filters();
        assert_eq!(filters.search(), "");
        assert_eq!(filters.company(), &CompanyFilter::All);
        assert_eq!(filters.price(), PriceRange::new(container.min_price(), container.max_price()));
        assert_eq!(filters.rating(), RatingFilter::Any);
        assert_eq!(filters.sort_by_option(), &SortSelection::Unsorted);
        let selection = filters.category().unwrap();
        assert_eq!(selection.len(), 2);
        assert!(!selection.any_checked());
        assert_eq!(container.displayable_products_len(), 3);
    }

    #[test]
    fn pagination_only_moves_the_window() {
        let products: Vec<Product> = (1..=10)
            .map(|i| Product::new(i.to_string(), format!("P{i:02}"), "tv", "LG", i * 10, 3.0))
            .collect();
        let mut container = loaded(products);
        assert_eq!(container.filtered_products().len(), 9);
        assert_eq!(container.page_count(), 2);

        let revision = container.revision();
        container.reduce(FilterAction::UpdatePagination(1));
        assert_eq!(container.revision(), revision + 1);
        assert_eq!(names(&container.filtered_products()), vec!["P10"]);

        let page = container.current_page();
        assert_eq!(page.total_count, 10);
        assert_eq!(page.page_index, 1);
        assert_eq!(page.items.len(), 1);

        container.reduce(FilterAction::UpdatePagination(7));
        assert!(container.filtered_products().is_empty());
        assert_eq!(container.displayable_products_len(), 10);
    }

    #[test]
    fn filter_changes_reset_to_first_page() {
        let products: Vec<Product> = (1..=20)
            .map(|i| Product::new(i.to_string(), format!("P{i:02}"), "tv", "LG", i, 3.0))
            .collect();
        let mut container = loaded(products);

        container.reduce(FilterAction::UpdatePagination(2));
        container.reduce(FilterAction::UpdateSearch("P1".to_string()));
        assert_eq!(container.paginate_index(), 0);

        container.reduce(FilterAction::UpdatePagination(1));
        container.reduce(FilterAction::ApplyFilters);
        assert_eq!(container.paginate_index(), 0);
    }

    #[test]
    fn unrecognized_sort_keeps_filter_order() {
        let mut container = loaded(sample());
        container.reduce(FilterAction::UpdateFilter(FilterUpdate::Sort(SortSelection::parse(
            "precio: al azar",
        ))));

        assert_eq!(names(&container.filtered_products()), vec!["B", "A", "C"]);
        assert_eq!(container.filters().sort_by_option().as_str(), "precio: al azar");
    }

    #[test]
    fn reload_keeps_search_but_resets_price_and_categories() {
        let mut container = loaded(sample());
        container.reduce(FilterAction::UpdateSearch("tv".to_string()));
        container.reduce(FilterAction::UpdateCategory("tv".to_string()));

        container.reduce(FilterAction::Load {
            products: vec![Product::new("9", "Z", "tv", "LG", 1_500, 1.0)],
            categories: categories(),
        });

        assert_eq!(container.filters().search(), "tv");
        assert!(!container.filters().category().unwrap().any_checked());
        assert_eq!(container.bounds(), PriceBounds::new(1_000, 2_000));
        assert_eq!(container.displayable_products_len(), 1);
    }

    #[test]
    fn empty_catalog_gives_default_bounds_and_no_results() {
        let container = loaded(Vec::new());
        assert_eq!(container.bounds(), PriceBounds::EMPTY_CATALOG);
        assert_eq!(container.displayable_products_len(), 0);
        assert!(container.filtered_products().is_empty());
    }

    #[test]
    fn rederiving_never_touches_the_catalog() {
        let products = sample();
        let mut container = loaded(products.clone());
        container.reduce_all([
            FilterAction::UpdateFilter(FilterUpdate::Sort(SortOption::NameZToA.into())),
            FilterAction::UpdateCategory("tv".to_string()),
            FilterAction::ApplyFilters,
        ]);
        assert_eq!(container.all_products(), products.as_slice());
    }
}
