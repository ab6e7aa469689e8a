//! Shopping cart.

use serde::{Deserialize, Serialize};

use storefront_catalog::Product;
use storefront_core::{DomainError, DomainResult, Entity, Money, ProductId};

/// One product in the cart. Price is captured when the product is added.
///
/// `quantity` is at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawCartLine")]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCartLine {
    product_id: ProductId,
    name: String,
    unit_price: Money,
    quantity: u32,
}

impl TryFrom<RawCartLine> for CartLine {
    type Error = DomainError;

    fn try_from(raw: RawCartLine) -> Result<Self, Self::Error> {
        if raw.quantity == 0 {
            return Err(DomainError::validation(format!(
                "cart line for product '{}' has zero quantity",
                raw.product_id
            )));
        }
        Ok(Self {
            product_id: raw.product_id,
            name: raw.name,
            unit_price: raw.unit_price,
            quantity: raw.quantity,
        })
    }
}

impl CartLine {
    pub fn total(&self) -> DomainResult<Money> {
        self.unit_price.checked_mul(u64::from(self.quantity))
    }
}

impl Entity for CartLine {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.product_id
    }
}

/// Lines keyed by product, in the order they were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCart")]
pub struct Cart {
    lines: Vec<CartLine>,
}

#[derive(Deserialize)]
struct RawCart {
    lines: Vec<CartLine>,
}

impl TryFrom<RawCart> for Cart {
    type Error = DomainError;

    fn try_from(raw: RawCart) -> Result<Self, Self::Error> {
        for (i, line) in raw.lines.iter().enumerate() {
            if raw.lines[..i].iter().any(|l| l.product_id == line.product_id) {
                return Err(DomainError::conflict(format!(
                    "cart has more than one line for product '{}'",
                    line.product_id
                )));
            }
        }
        Ok(Self { lines: raw.lines })
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }

    fn line_mut(&mut self, product_id: &ProductId) -> DomainResult<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|l| &l.product_id == product_id)
            .ok_or_else(|| DomainError::not_found(format!("cart line for product '{product_id}'")))
    }

    /// Add `quantity` units, merging into an existing line for the product.
    pub fn add(&mut self, product: &Product, quantity: u32) -> DomainResult<()> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity = line
                .quantity
                .checked_add(quantity)
                .ok_or_else(|| DomainError::invariant("cart line quantity overflow"))?;
            return Ok(());
        }
        self.lines.push(CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: Money::new(product.price),
            quantity,
        });
        Ok(())
    }

    pub fn increment(&mut self, product_id: &ProductId) -> DomainResult<()> {
        let line = self.line_mut(product_id)?;
        line.quantity = line
            .quantity
            .checked_add(1)
            .ok_or_else(|| DomainError::invariant("cart line quantity overflow"))?;
        Ok(())
    }

    /// Remove one unit; the line goes away when it reaches zero.
    pub fn decrement(&mut self, product_id: &ProductId) -> DomainResult<()> {
        let line = self.line_mut(product_id)?;
        line.quantity = line
            .quantity
            .checked_sub(1)
            .ok_or_else(|| DomainError::invariant("cart line quantity underflow"))?;
        if line.quantity == 0 {
            self.lines.retain(|l| &l.product_id != product_id);
        }
        Ok(())
    }

    pub fn remove(&mut self, product_id: &ProductId) -> DomainResult<CartLine> {
        let pos = self
            .lines
            .iter()
            .position(|l| &l.product_id == product_id)
            .ok_or_else(|| DomainError::not_found(format!("cart line for product '{product_id}'")))?;
        Ok(self.lines.remove(pos))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `unit_price * quantity` over all lines.
    pub fn subtotal(&self) -> DomainResult<Money> {
        self.lines
            .iter()
            .try_fold(Money::ZERO, |acc, line| acc.checked_add(line.total()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tv() -> Product {
        Product::new("tv-1", "Smart TV", "tv", "LG", 120_000, 4.0)
    }

    fn phone() -> Product {
        Product::new("ph-1", "Galaxy", "phone", "Samsung", 45_000, 4.5)
    }

    #[test]
    fn adding_same_product_merges_lines() {
        let mut cart = Cart::new();
        cart.add(&tv(), 1).unwrap();
        cart.add(&phone(), 2).unwrap();
        cart.add(&tv(), 2).unwrap();

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.line(&tv().id).unwrap().quantity, 3);
        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.subtotal().unwrap(), Money::new(3 * 120_000 + 2 * 45_000));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let err = Cart::new().add(&tv(), 0).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn decrement_to_zero_removes_the_line() {
        let mut cart = Cart::new();
        cart.add(&phone(), 1).unwrap();
        cart.increment(&phone().id).unwrap();
        assert_eq!(cart.line(&phone().id).unwrap().quantity, 2);

        cart.decrement(&phone().id).unwrap();
        cart.decrement(&phone().id).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn missing_lines_are_not_found() {
        let mut cart = Cart::new();
        let id = ProductId::new("ghost");
        assert!(matches!(cart.increment(&id), Err(DomainError::NotFound(_))));
        assert!(matches!(cart.decrement(&id), Err(DomainError::NotFound(_))));
        assert!(matches!(cart.remove(&id), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn remove_and_clear() {
        let mut cart = Cart::new();
        cart.add(&tv(), 1).unwrap();
        cart.add(&phone(), 1).unwrap();

        let removed = cart.remove(&tv().id).unwrap();
        assert_eq!(removed.name, "Smart TV");
        assert_eq!(cart.subtotal().unwrap(), Money::new(45_000));

        cart.clear();
        assert_eq!(cart.subtotal().unwrap(), Money::ZERO);
    }

    #[test]
    fn deserialized_cart_keeps_line_rules() {
        let zero = r#"{"lines":[{"productId":"x","name":"X","unitPrice":100,"quantity":0}]}"#;
        assert!(serde_json::from_str::<Cart>(zero).is_err());

        let duplicate = r#"{"lines":[
            {"productId":"x","name":"X","unitPrice":100,"quantity":1},
            {"productId":"x","name":"X","unitPrice":100,"quantity":2}
        ]}"#;
        assert!(serde_json::from_str::<Cart>(duplicate).is_err());

        let valid = r#"{"lines":[{"productId":"x","name":"X","unitPrice":100,"quantity":1}]}"#;
        let mut cart: Cart = serde_json::from_str(valid).unwrap();
        let id = ProductId::new("x");
        cart.decrement(&id).unwrap();
        assert!(cart.is_empty());
        assert!(matches!(cart.decrement(&id), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn subtotal_overflow_is_reported() {
        let mut cart = Cart::new();
        cart.add(&Product::new("x", "x", "c", "b", u64::MAX, 0.0), 2).unwrap();
        assert!(matches!(cart.subtotal(), Err(DomainError::InvariantViolation(_))));
    }
}
