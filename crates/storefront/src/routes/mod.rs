//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (DB connectivity)
//!
//! # Products
//! GET  /products                - Product listing with cart badge count
//!
//! # Cart
//! GET  /cart                    - Current cart
//! POST /cart/add                - Add to cart (merges duplicate products)
//! POST /cart/clear              - Empty the cart (idempotent)
//! GET  /cart/count              - Cart quantity badge
//!
//! # Checkout
//! POST /checkout/pay            - Create a payment order from the cart
//! POST /checkout/capture/{id}   - Capture a previously created order
//! ```

pub mod cart;
pub mod checkout;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/pay", post(checkout::pay))
        .route("/capture/{order_id}", post(checkout::capture))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
}
