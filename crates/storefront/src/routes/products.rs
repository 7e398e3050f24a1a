//! Product route handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::models::product::Product;
use crate::services::cart;
use crate::state::AppState;

/// Product listing payload, including the cart badge count the shop header
/// renders next to the list.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub cart_quantity: u64,
}

/// List all products, newest first.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<ProductListResponse>> {
    let products = state.products().list().await?;
    let cart_quantity = cart::view_cart(&session).await?.quantity_total();

    Ok(Json(ProductListResponse {
        products,
        cart_quantity,
    }))
}
