//! Business logic services.
//!
//! - [`cart`] - Cart manager: merge-or-append adds, clears, persistence contract
//! - [`checkout`] - Checkout orchestrator over an abstract payment provider
//! - [`paypal`] - PayPal Orders v2 client implementing the provider capability

pub mod cart;
pub mod checkout;
pub mod paypal;
