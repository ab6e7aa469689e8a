//! Catalog domain module.
//!
//! Browsing logic for the storefront: price bounds, predicate filters, sort,
//! pagination, and the filter state container that ties them together.
//! Implemented purely as deterministic domain logic (no IO, no UI).

pub mod collation;
pub mod config;
pub mod filters;
pub mod paginate;
pub mod price;
pub mod product;
pub mod search;
pub mod slider;
pub mod sort;
pub mod state;

pub use config::CatalogConfig;
pub use filters::{
    apply_filters, CategorySelection, CompanyFilter, FilterPipeline, FilterState, ProductPredicate,
    RatingFilter,
};
pub use paginate::{page_count, paginate, PaginatedView, DEFAULT_PAGE_SIZE};
pub use price::{normalize, PriceBounds, PriceRange};
pub use product::{Category, Product};
pub use search::suggestions;
pub use slider::{adjust_thumbs, price_step, slider_marks, FormatPrice, SliderMark, Thumb};
pub use sort::{sort_products, SortOption, SortSelection};
pub use state::{ContainerPhase, FilterAction, FilterUpdate, FiltersContainer};
