//! Product catalog model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mi_tienda_core::ProductId;

/// A catalog product.
///
/// Read-only from the storefront's perspective; the cart snapshots the
/// fields it needs at add-time, so later catalog edits never alter an
/// open cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub image_url: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
