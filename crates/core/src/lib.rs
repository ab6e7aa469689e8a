//! `storefront-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the catalog and
//! checkout crates (no IO, no UI, no storage).

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod reducer;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{OrderId, ProductId};
pub use money::Money;
pub use reducer::Reducer;
pub use value_object::ValueObject;
