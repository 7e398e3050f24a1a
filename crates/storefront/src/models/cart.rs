//! The session-owned shopping cart.
//!
//! A cart is an ordered sequence of line items with at most one line item per
//! distinct product. Each line item is a denormalized snapshot of the product
//! at the time it was first added, so catalog price changes do not
//! retroactively alter an open cart.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mi_tienda_core::ProductId;

use crate::models::product::Product;

/// A validated purchase quantity: a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

/// Raw quantity input that is not a positive integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid quantity {raw:?}: must be a positive integer")]
pub struct InvalidQuantity {
    raw: String,
}

impl Quantity {
    /// One unit.
    pub const ONE: Self = Self(1);

    /// Validate a raw quantity string from a form field.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidQuantity`] if the input does not parse as an integer
    /// or is zero. Invalid input is rejected outright, never coerced.
    pub fn parse(raw: &str) -> Result<Self, InvalidQuantity> {
        match raw.trim().parse::<u32>() {
            Ok(n) if n > 0 => Ok(Self(n)),
            _ => Err(InvalidQuantity {
                raw: raw.to_owned(),
            }),
        }
    }

    /// The underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// One product-with-quantity entry in a cart.
///
/// Serialized field names match the layout already present in live sessions,
/// so carts stored by earlier deployments keep deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub unit_price: Decimal,
    #[serde(rename = "imagenUrl")]
    pub image_url: String,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
}

impl CartLineItem {
    /// Snapshot a product into a fresh line item.
    fn snapshot(product: &Product, quantity: Quantity) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.unit_price,
            image_url: product.image_url.clone(),
            quantity: quantity.get(),
        }
    }

    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Per-session ordered collection of line items.
///
/// Invariant: at most one line item per distinct product id, each with
/// quantity >= 1. Owned exclusively by one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Add a product to the cart.
    ///
    /// If a line item for the product already exists its quantity is
    /// incremented (saturating; no upper bound is enforced otherwise) and
    /// the original snapshot is kept. Otherwise a new snapshot line item is
    /// appended.
    pub fn add(&mut self, product: &Product, quantity: Quantity) {
        match self
            .items
            .iter_mut()
            .find(|item| item.product_id == product.id)
        {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(quantity.get());
            }
            None => self.items.push(CartLineItem::snapshot(product, quantity)),
        }
    }

    /// Remove every line item. Clearing an empty cart is a no-op.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of all line item quantities, for UI badge counts.
    #[must_use]
    pub fn quantity_total(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum()
    }

    /// Sum of all line totals, rounded to 2 decimal places half-up.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items
            .iter()
            .map(CartLineItem::line_total)
            .sum::<Decimal>()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Look up the line item for a product, if present.
    #[must_use]
    pub fn line_for(&self, product_id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }
}
