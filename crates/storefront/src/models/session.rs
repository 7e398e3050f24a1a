//! Session-related constants.
//!
//! The cart is the only state this app keeps in the session; it works for
//! anonymous sessions, no authenticated-user context is involved.

/// Session keys for cart data.
pub mod keys {
    /// Key the serialized cart is stored under.
    ///
    /// Kept as `cesta` for compatibility with sessions written by earlier
    /// deployments.
    pub const CART: &str = "cesta";
}
