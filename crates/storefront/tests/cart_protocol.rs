//! End-to-end tests for the cart and checkout protocol, exercised against
//! in-memory doubles for the session store, the catalog, and the payment
//! provider.

#![allow(clippy::unwrap_used)]

use std::sync::Mutex;

use chrono::Utc;
use rust_decimal::Decimal;

use mi_tienda_core::{CaptureId, ProductId, ProviderOrderId};
use mi_tienda_storefront::db::RepositoryError;
use mi_tienda_storefront::models::cart::{Cart, Quantity};
use mi_tienda_storefront::models::product::Product;
use mi_tienda_storefront::services::cart::{self, CartError, CartStore, Catalog};
use mi_tienda_storefront::services::checkout::{
    self, CheckoutError, OrderRequest, PaymentError, PaymentProvider,
};

// =============================================================================
// Test doubles
// =============================================================================

/// In-memory stand-in for the session-backed cart store.
#[derive(Default)]
struct MemoryCartStore {
    cart: Mutex<Cart>,
    fail_saves: bool,
}

impl MemoryCartStore {
    fn failing_with(cart: Cart) -> Self {
        Self {
            cart: Mutex::new(cart),
            fail_saves: true,
        }
    }

    fn stored(&self) -> Cart {
        self.cart.lock().unwrap().clone()
    }
}

impl CartStore for MemoryCartStore {
    async fn load(&self) -> Result<Cart, CartError> {
        Ok(self.stored())
    }

    async fn save(&self, cart: &Cart) -> Result<(), CartError> {
        if self.fail_saves {
            return Err(CartError::SessionPersist("session store offline".into()));
        }
        *self.cart.lock().unwrap() = cart.clone();
        Ok(())
    }
}

/// Fixed product catalog.
struct StaticCatalog {
    products: Vec<Product>,
}

impl Catalog for StaticCatalog {
    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }
}

/// Recording payment provider double.
#[derive(Default)]
struct MockProvider {
    created: Mutex<Vec<OrderRequest>>,
    captured: Mutex<Vec<ProviderOrderId>>,
    fail_create: bool,
    fail_capture: bool,
}

impl MockProvider {
    fn create_calls(&self) -> Vec<OrderRequest> {
        self.created.lock().unwrap().clone()
    }

    fn capture_calls(&self) -> Vec<ProviderOrderId> {
        self.captured.lock().unwrap().clone()
    }
}

impl PaymentProvider for MockProvider {
    async fn create_order(&self, order: &OrderRequest) -> Result<ProviderOrderId, PaymentError> {
        if self.fail_create {
            return Err(PaymentError::Api {
                status: 503,
                message: "provider unavailable".into(),
            });
        }
        let mut created = self.created.lock().unwrap();
        created.push(order.clone());
        Ok(ProviderOrderId::new(format!("ORDER-{}", created.len())))
    }

    async fn capture_order(&self, order_id: &ProviderOrderId) -> Result<CaptureId, PaymentError> {
        if self.fail_capture {
            return Err(PaymentError::Api {
                status: 502,
                message: "capture declined".into(),
            });
        }
        self.captured.lock().unwrap().push(order_id.clone());
        Ok(CaptureId::new(format!("CAPTURE-{order_id}")))
    }
}

fn product(name: &str, cents: i64) -> Product {
    Product {
        id: ProductId::generate(),
        name: name.to_owned(),
        unit_price: Decimal::new(cents, 2),
        image_url: format!("/uploads/{name}.jpg"),
        description: None,
        created_at: Utc::now(),
    }
}

fn qty(raw: &str) -> Quantity {
    Quantity::parse(raw).unwrap()
}

// =============================================================================
// Cart manager
// =============================================================================

#[tokio::test]
async fn adds_for_the_same_product_merge_across_requests() {
    let p = product("taza", 999);
    let catalog = StaticCatalog {
        products: vec![p.clone()],
    };
    let store = MemoryCartStore::default();

    cart::add_to_cart(&store, &catalog, p.id, qty("2")).await.unwrap();
    let updated = cart::add_to_cart(&store, &catalog, p.id, qty("3")).await.unwrap();

    assert_eq!(updated.items().len(), 1);
    assert_eq!(updated.line_for(p.id).unwrap().quantity, 5);
    // The mutation was persisted before the operation returned.
    assert_eq!(store.stored(), updated);
}

#[tokio::test]
async fn unknown_product_fails_and_leaves_the_cart_unchanged() {
    let p = product("taza", 999);
    let catalog = StaticCatalog {
        products: vec![p.clone()],
    };
    let store = MemoryCartStore::default();

    cart::add_to_cart(&store, &catalog, p.id, qty("1")).await.unwrap();
    let before = store.stored();

    let err = cart::add_to_cart(&store, &catalog, ProductId::generate(), qty("1"))
        .await
        .unwrap_err();

    assert!(matches!(err, CartError::ProductNotFound(_)));
    assert_eq!(store.stored(), before);
}

#[tokio::test]
async fn failed_session_save_fails_the_operation_and_loses_the_mutation() {
    let p = product("taza", 999);
    let catalog = StaticCatalog {
        products: vec![p.clone()],
    };

    let mut preloaded = Cart::default();
    preloaded.add(&p, qty("1"));
    let store = MemoryCartStore::failing_with(preloaded.clone());

    let err = cart::add_to_cart(&store, &catalog, p.id, qty("4"))
        .await
        .unwrap_err();

    assert!(matches!(err, CartError::SessionPersist(_)));
    // The caller must not assume the mutation survived.
    assert_eq!(store.stored(), preloaded);
}

#[tokio::test]
async fn clear_cart_is_idempotent() {
    let p = product("taza", 999);
    let catalog = StaticCatalog {
        products: vec![p.clone()],
    };
    let store = MemoryCartStore::default();

    cart::add_to_cart(&store, &catalog, p.id, qty("2")).await.unwrap();

    cart::clear_cart(&store).await.unwrap();
    assert!(store.stored().is_empty());

    // Clearing again is a no-op, not an error.
    cart::clear_cart(&store).await.unwrap();
    assert!(store.stored().is_empty());
}

// =============================================================================
// Checkout orchestrator
// =============================================================================

#[tokio::test]
async fn empty_cart_payment_fails_without_a_provider_call() {
    let provider = MockProvider::default();

    let err = checkout::initiate_payment(&provider, &Cart::default())
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::EmptyCart));
    assert!(provider.create_calls().is_empty());
}

#[tokio::test]
async fn checkout_round_trip_charges_the_subtotal_and_preserves_the_cart() {
    let p = product("taza", 999);
    let q = product("plato", 500);
    let catalog = StaticCatalog {
        products: vec![p.clone(), q.clone()],
    };
    let store = MemoryCartStore::default();
    let provider = MockProvider::default();

    cart::add_to_cart(&store, &catalog, p.id, qty("2")).await.unwrap();
    cart::add_to_cart(&store, &catalog, q.id, qty("1")).await.unwrap();

    let cart_snapshot = cart::view_cart(&store).await.unwrap();
    assert_eq!(cart_snapshot.subtotal(), Decimal::new(2498, 2));

    // Pay: one EUR purchase unit carrying the 2 dp subtotal.
    let order_id = checkout::initiate_payment(&provider, &cart_snapshot)
        .await
        .unwrap();
    let calls = provider.create_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].amount.amount_string(), "24.98");
    assert_eq!(calls[0].amount.currency_code.code(), "EUR");
    assert_eq!(calls[0].description, "Compra en Mi Tienda");

    // Capture: finalizes the order, does not touch the cart.
    let capture_id = checkout::capture_payment(&provider, &order_id)
        .await
        .unwrap();
    assert_eq!(provider.capture_calls(), vec![order_id]);
    assert!(!capture_id.as_str().is_empty());
    assert_eq!(cart::view_cart(&store).await.unwrap(), cart_snapshot);

    // Only an explicit clear empties the cart.
    cart::clear_cart(&store).await.unwrap();
    assert!(cart::view_cart(&store).await.unwrap().is_empty());
}

#[tokio::test]
async fn provider_failure_preserves_the_cart_and_is_retriable() {
    let p = product("taza", 1000);
    let catalog = StaticCatalog {
        products: vec![p.clone()],
    };
    let store = MemoryCartStore::default();

    cart::add_to_cart(&store, &catalog, p.id, qty("1")).await.unwrap();
    let cart_snapshot = cart::view_cart(&store).await.unwrap();

    let failing = MockProvider {
        fail_create: true,
        ..MockProvider::default()
    };
    let err = checkout::initiate_payment(&failing, &cart_snapshot)
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::Provider(_)));
    assert_eq!(cart::view_cart(&store).await.unwrap(), cart_snapshot);

    // Same cart, healthy provider: the retry succeeds.
    let healthy = MockProvider::default();
    checkout::initiate_payment(&healthy, &cart_snapshot)
        .await
        .unwrap();
    assert_eq!(healthy.create_calls().len(), 1);
}

#[tokio::test]
async fn capture_failure_surfaces_the_provider_error() {
    let provider = MockProvider {
        fail_capture: true,
        ..MockProvider::default()
    };

    let err = checkout::capture_payment(&provider, &ProviderOrderId::new("ORDER-1".into()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CheckoutError::Provider(PaymentError::Api { status: 502, .. })
    ));
}
