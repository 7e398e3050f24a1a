//! Cart route handlers.
//!
//! The cart lives in the caller's session and works for anonymous sessions;
//! handlers delegate to the cart manager and serialize the updated cart back
//! to the client.

use axum::{Form, Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use mi_tienda_core::ProductId;

use crate::error::{AppError, Result};
use crate::models::cart::{Cart, Quantity};
use crate::services::cart::{self, CartError};
use crate::state::AppState;

/// Add to cart form data.
///
/// `quantity` arrives as a raw string and is validated by the cart manager's
/// rules; anything that is not a positive integer is rejected.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub quantity: Option<String>,
}

/// Cart count badge payload.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u64,
}

/// Display the current cart.
///
/// A fresh or expired session yields an empty cart.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<Cart>> {
    let cart = cart::view_cart(&session).await?;
    Ok(Json(cart))
}

/// Add an item to the cart, merging with an existing line for the same
/// product, and return the updated cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Json<Cart>> {
    let quantity =
        Quantity::parse(form.quantity.as_deref().unwrap_or("1")).map_err(CartError::from)?;

    // An id that does not even parse cannot name a product.
    let product_id = form
        .product_id
        .parse::<ProductId>()
        .map_err(|_| AppError::NotFound(format!("product {}", form.product_id)))?;

    let cart = cart::add_to_cart(&session, &state.products(), product_id, quantity).await?;
    Ok(Json(cart))
}

/// Empty the cart. Idempotent; clearing an empty cart succeeds.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<StatusCode> {
    cart::clear_cart(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Cart quantity badge.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<Json<CartCount>> {
    let cart = cart::view_cart(&session).await?;
    Ok(Json(CartCount {
        count: cart.quantity_total(),
    }))
}
