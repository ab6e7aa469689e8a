//! Checkout domain module.
//!
//! Cart, coupons, delivery and payment pricing, order summary, currencies,
//! phone validation, distance to the store, and the WhatsApp order hand-off.
//! Everything here is deterministic; the caller resolves the clock, the user
//! agent and the shopper's location at the boundary and passes them in.

pub mod cart;
pub mod config;
pub mod coupon;
pub mod currency;
pub mod delivery;
pub mod device;
pub mod distance;
pub mod order;
pub mod payment;
pub mod phone;
pub mod whatsapp;

pub use cart::{Cart, CartLine};
pub use config::{ConfigError, StoreConfig};
pub use coupon::{default_coupons, Coupon};
pub use currency::{Currency, CurrencyTable, PriceFormatter};
pub use delivery::{DeliveryZone, Fulfilment, ZoneTable};
pub use device::{Browser, DeviceCapabilities, Platform, ViewportHint};
pub use distance::{haversine_km, GeoPoint, MapLinks, TravelInfo, TravelMode};
pub use order::{OrderNumber, OrderSummary, PlaceOrder};
pub use payment::PaymentMethod;
pub use phone::{CountryCode, PhoneNumber};
pub use whatsapp::WhatsAppHandoff;
