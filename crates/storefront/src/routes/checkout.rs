//! Checkout route handlers.
//!
//! Create, capture, and clear are separate requests: the provider's approval
//! UI runs client-side between pay and capture, and the cart is only emptied
//! by an explicit `/cart/clear` once the client is satisfied.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use mi_tienda_core::{CaptureId, ProviderOrderId};

use crate::error::Result;
use crate::services::{cart, checkout};
use crate::state::AppState;

/// Response to a successful order creation.
#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub id: ProviderOrderId,
}

/// Response to a successful capture.
#[derive(Debug, Serialize)]
pub struct CaptureResponse {
    #[serde(rename = "captureId")]
    pub capture_id: CaptureId,
}

/// Create a payment order for the session's cart.
///
/// Fails with 400 on an empty cart; the cart itself is never mutated here.
#[instrument(skip(state, session))]
pub async fn pay(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<CreateOrderResponse>> {
    let cart = cart::view_cart(&session).await?;
    let id = checkout::initiate_payment(state.paypal(), &cart).await?;
    Ok(Json(CreateOrderResponse { id }))
}

/// Capture a previously created payment order.
///
/// The order id round-trips through the client between pay and capture.
/// Capturing does not touch the cart.
#[instrument(skip(state))]
pub async fn capture(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<CaptureResponse>> {
    let order_id = ProviderOrderId::new(order_id);
    let capture_id = checkout::capture_payment(state.paypal(), &order_id).await?;
    Ok(Json(CaptureResponse { capture_id }))
}
