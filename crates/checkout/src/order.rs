//! Order summary: the priced snapshot of a cart at placement time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use storefront_core::{DomainError, DomainResult, Money, OrderId};

use crate::cart::{Cart, CartLine};
use crate::coupon::Coupon;
use crate::delivery::{Fulfilment, ZoneTable};
use crate::payment::PaymentMethod;

/// Human-facing order reference, `YYYYMMDD-XXXXXX`.
///
/// The suffix is the first six hex digits of the (time-ordered) order id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    pub fn new(order_id: &OrderId, placed_at: DateTime<Utc>) -> Self {
        let hex = order_id.as_uuid().simple().to_string();
        Self(format!(
            "{}-{}",
            placed_at.format("%Y%m%d"),
            hex[..6].to_uppercase()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Command: place the current cart.
#[derive(Debug, Clone)]
pub struct PlaceOrder<'a> {
    pub cart: &'a Cart,
    pub coupon: Option<&'a Coupon>,
    pub fulfilment: Fulfilment,
    pub payment_method: PaymentMethod,
    pub order_id: OrderId,
    pub placed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedCoupon {
    pub code: String,
    pub discount_percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub order_number: OrderNumber,
    pub placed_at: DateTime<Utc>,
    pub lines: Vec<CartLine>,
    pub subtotal: Money,
    pub coupon: Option<AppliedCoupon>,
    pub discount: Money,
    pub fulfilment: Fulfilment,
    pub delivery_cost: Money,
    pub payment_method: PaymentMethod,
    pub payment_fee: Money,
    /// subtotal + delivery - discount + fee
    pub total: Money,
}

impl OrderSummary {
    pub fn place(cmd: PlaceOrder<'_>, zones: &ZoneTable) -> DomainResult<Self> {
        if cmd.cart.is_empty() {
            return Err(DomainError::validation("cannot place an order with an empty cart"));
        }

        let subtotal = cmd.cart.subtotal()?;
        let discount = match cmd.coupon {
            Some(coupon) => coupon.discount(subtotal)?,
            None => Money::ZERO,
        };
        let delivery_cost = cmd.fulfilment.cost(zones)?;
        let payment_fee = cmd.payment_method.fee(subtotal)?;
        let total = subtotal
            .checked_add(delivery_cost)?
            .checked_add(payment_fee)?
            .checked_sub(discount)?;

        let order_number = OrderNumber::new(&cmd.order_id, cmd.placed_at);
        debug!(
            order_number = %order_number,
            subtotal = subtotal.amount(),
            discount = discount.amount(),
            delivery_cost = delivery_cost.amount(),
            payment_fee = payment_fee.amount(),
            total = total.amount(),
            "order summary priced"
        );

        Ok(Self {
            order_id: cmd.order_id,
            order_number,
            placed_at: cmd.placed_at,
            lines: cmd.cart.lines().to_vec(),
            subtotal,
            coupon: cmd.coupon.map(|c| AppliedCoupon {
                code: c.code().to_string(),
                discount_percent: c.discount_percent(),
            }),
            discount,
            fulfilment: cmd.fulfilment,
            delivery_cost,
            payment_method: cmd.payment_method,
            payment_fee,
            total,
        })
    }
}
