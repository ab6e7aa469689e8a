//! Percentage discount coupons.

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Money, ValueObject};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawCoupon")]
pub struct Coupon {
    coupon_code: String,
    discount_percent: u8,
    min_cart_price_required: Money,
}

impl ValueObject for Coupon {}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCoupon {
    coupon_code: String,
    discount_percent: u8,
    min_cart_price_required: Money,
}

impl TryFrom<RawCoupon> for Coupon {
    type Error = DomainError;

    fn try_from(raw: RawCoupon) -> Result<Self, Self::Error> {
        Coupon::new(raw.coupon_code, raw.discount_percent, raw.min_cart_price_required)
    }
}

impl Coupon {
    pub fn new(
        code: impl Into<String>,
        discount_percent: u8,
        min_cart_price_required: impl Into<Money>,
    ) -> DomainResult<Self> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(DomainError::validation("coupon code cannot be empty"));
        }
        if discount_percent > 100 {
            return Err(DomainError::validation(format!(
                "coupon '{code}' discount {discount_percent}% exceeds 100%"
            )));
        }
        Ok(Self {
            coupon_code: code,
            discount_percent,
            min_cart_price_required: min_cart_price_required.into(),
        })
    }

    pub fn code(&self) -> &str {
        &self.coupon_code
    }

    pub fn discount_percent(&self) -> u8 {
        self.discount_percent
    }

    pub fn min_cart_price_required(&self) -> Money {
        self.min_cart_price_required
    }

    pub fn applies_to(&self, subtotal: Money) -> bool {
        subtotal >= self.min_cart_price_required
    }

    /// `floor(subtotal * percent / 100)`; rejected below the coupon's minimum.
    pub fn discount(&self, subtotal: Money) -> DomainResult<Money> {
        if !self.applies_to(subtotal) {
            return Err(DomainError::validation(format!(
                "coupon '{}' requires a cart of at least {}",
                self.coupon_code, self.min_cart_price_required
            )));
        }
        subtotal.percent_floor(self.discount_percent)
    }
}

/// Coupons the store ships with.
pub fn default_coupons() -> Vec<Coupon> {
    [
        ("100% AHORRO", 55, 300_000),
        ("20% REGALO", 20, 200_000),
        ("10% PROMO", 10, 100_000),
        ("5% MENOS", 5, 50_000),
    ]
    .into_iter()
    .map(|(code, percent, min)| Coupon {
        coupon_code: code.to_string(),
        discount_percent: percent,
        min_cart_price_required: Money::new(min),
    })
    .collect()
}

/// Look a coupon up by its exact code.
pub fn find_coupon<'c>(coupons: &'c [Coupon], code: &str) -> DomainResult<&'c Coupon> {
    coupons
        .iter()
        .find(|c| c.coupon_code == code)
        .ok_or_else(|| DomainError::not_found(format!("coupon '{code}'")))
}

/// Coupons usable for `subtotal`, in table order.
pub fn applicable_coupons(coupons: &[Coupon], subtotal: Money) -> Vec<&Coupon> {
    coupons.iter().filter(|c| c.applies_to(subtotal)).collect()
}
