//! Checkout orchestrator.
//!
//! Turns a cart into a payment order at the external provider and later
//! captures it. Create, capture, and clear are three independently callable
//! operations: the provider's confirmation happens client-side, so the cart
//! must stay intact until the caller has judged the capture response and
//! explicitly clears it.

use thiserror::Error;

use mi_tienda_core::{CaptureId, CurrencyCode, Price, ProviderOrderId};

use crate::models::cart::Cart;

/// Order description sent to the provider.
pub const ORDER_DESCRIPTION: &str = "Compra en Mi Tienda";

/// The shop sells in a single fixed currency.
pub const ORDER_CURRENCY: CurrencyCode = CurrencyCode::Eur;

/// Errors from the external payment provider.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// HTTP transport failure, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned an error response.
    #[error("provider error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Provider response could not be interpreted.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Errors from checkout operations.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Payment was attempted on an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// The payment provider call failed; the cart is preserved and the
    /// operation is retriable.
    #[error("payment provider error: {0}")]
    Provider(#[from] PaymentError),
}

/// A single-currency order request with one purchase unit.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    /// Total to charge, already rounded for currency display.
    pub amount: Price,
    /// Human-readable order description.
    pub description: String,
}

/// Narrow capability interface onto the external payment provider.
///
/// No retry/backoff policy is layered on top; failures are surfaced as-is.
#[allow(async_fn_in_trait)]
pub trait PaymentProvider {
    /// Open a payment order; returns the provider-issued order id.
    async fn create_order(&self, order: &OrderRequest) -> Result<ProviderOrderId, PaymentError>;

    /// Finalize a previously created order; returns the capture id.
    async fn capture_order(&self, order_id: &ProviderOrderId) -> Result<CaptureId, PaymentError>;
}

/// Open a payment order for the cart's subtotal.
///
/// The cart is not mutated; the caller is responsible for round-tripping the
/// returned order id back on capture.
///
/// # Errors
///
/// `EmptyCart` if the cart has no line items (the provider is not called),
/// `Provider` wrapping any provider failure.
pub async fn initiate_payment<P: PaymentProvider>(
    provider: &P,
    cart: &Cart,
) -> Result<ProviderOrderId, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let order = OrderRequest {
        amount: Price::new(cart.subtotal(), ORDER_CURRENCY),
        description: ORDER_DESCRIPTION.to_owned(),
    };

    Ok(provider.create_order(&order).await?)
}

/// Capture a previously created payment order.
///
/// Does not clear the cart; clearing is a separate explicit operation the
/// caller invokes once it judges the capture response satisfactory.
///
/// # Errors
///
/// `Provider` wrapping any provider failure; retriable by the caller.
pub async fn capture_payment<P: PaymentProvider>(
    provider: &P,
    order_id: &ProviderOrderId,
) -> Result<CaptureId, CheckoutError> {
    Ok(provider.capture_order(order_id).await?)
}
