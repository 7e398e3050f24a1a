//! Cart manager.
//!
//! Maintains the invariant "one line item per product, quantity >= 1" within
//! a session-owned cart. All mutations are persisted back to the owning
//! session before the operation is considered complete; a persistence failure
//! fails the whole operation and the caller must not assume the mutation
//! survived.
//!
//! Persistence and catalog access are injected capabilities ([`CartStore`],
//! [`Catalog`]) so the manager can be exercised with in-memory doubles.

use thiserror::Error;
use tower_sessions::Session;

use mi_tienda_core::ProductId;

use crate::db::{ProductRepository, RepositoryError};
use crate::models::cart::{Cart, InvalidQuantity, Quantity};
use crate::models::product::Product;
use crate::models::session_keys;

/// Errors from cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product id does not exist in the catalog.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// The requested quantity is not a positive integer.
    #[error(transparent)]
    InvalidQuantity(#[from] InvalidQuantity),

    /// The session store failed to read or write the cart.
    #[error("session store failure: {0}")]
    SessionPersist(String),

    /// Catalog lookup failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Read-only catalog lookup used when adding to a cart.
#[allow(async_fn_in_trait)]
pub trait Catalog {
    /// Find a product by id; `Ok(None)` means the product does not exist.
    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;
}

impl Catalog for ProductRepository<'_> {
    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        self.find(id).await
    }
}

/// Persistence capability for the session-owned cart.
///
/// A load on a fresh or expired session yields an empty cart, never an error;
/// only store failures are errors.
#[allow(async_fn_in_trait)]
pub trait CartStore {
    /// Load the cart owned by this session.
    async fn load(&self) -> Result<Cart, CartError>;

    /// Persist the cart back to this session.
    async fn save(&self, cart: &Cart) -> Result<(), CartError>;
}

impl CartStore for Session {
    async fn load(&self) -> Result<Cart, CartError> {
        self.get::<Cart>(session_keys::CART)
            .await
            .map(Option::unwrap_or_default)
            .map_err(|e| CartError::SessionPersist(e.to_string()))
    }

    async fn save(&self, cart: &Cart) -> Result<(), CartError> {
        self.insert(session_keys::CART, cart)
            .await
            .map_err(|e| CartError::SessionPersist(e.to_string()))
    }
}

/// Add a product to the session's cart, merging with an existing line item
/// for the same product.
///
/// The updated cart is persisted before this returns; on persistence failure
/// the mutation must be treated as lost.
///
/// # Errors
///
/// `ProductNotFound` for an unknown product id, `SessionPersist` if the
/// session store rejects the write, `Repository` if the catalog lookup fails.
pub async fn add_to_cart<S, C>(
    store: &S,
    catalog: &C,
    product_id: ProductId,
    quantity: Quantity,
) -> Result<Cart, CartError>
where
    S: CartStore,
    C: Catalog,
{
    let product = catalog
        .find_product(product_id)
        .await?
        .ok_or(CartError::ProductNotFound(product_id))?;

    let mut cart = store.load().await?;
    cart.add(&product, quantity);
    store.save(&cart).await?;

    Ok(cart)
}

/// Replace the session's cart with an empty one.
///
/// Idempotent: clearing an already empty cart is a no-op, not an error.
///
/// # Errors
///
/// `SessionPersist` if the session store rejects the write.
pub async fn clear_cart<S: CartStore>(store: &S) -> Result<Cart, CartError> {
    let cart = Cart::default();
    store.save(&cart).await?;
    Ok(cart)
}

/// Read the session's cart without mutating it.
///
/// # Errors
///
/// `SessionPersist` if the session store fails to read.
pub async fn view_cart<S: CartStore>(store: &S) -> Result<Cart, CartError> {
    store.load().await
}
