//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::TiendaConfig;
use crate::db::ProductRepository;
use crate::services::checkout::PaymentError;
use crate::services::paypal::PaypalClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to shared resources like the
/// database pool, configuration, and the payment provider client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: TiendaConfig,
    pool: PgPool,
    paypal: PaypalClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the PayPal HTTP client fails to build.
    pub fn new(config: TiendaConfig, pool: PgPool) -> Result<Self, PaymentError> {
        let paypal = PaypalClient::new(&config.paypal)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                paypal,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &TiendaConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the PayPal client.
    #[must_use]
    pub fn paypal(&self) -> &PaypalClient {
        &self.inner.paypal
    }

    /// Product repository over the shared pool.
    #[must_use]
    pub fn products(&self) -> ProductRepository<'_> {
        ProductRepository::new(self.pool())
    }
}
