//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::middleware::SessionKeys;
use crate::stripe::PaymentClient;

/// Application state shared across all handlers.
///
/// Cloning is an `Arc` bump. The state travels through axum's `State`
/// extractor; nothing here is a module-level global.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    payments: PaymentClient,
    session_keys: SessionKeys,
}

impl AppState {
    /// Assemble the shared state from configuration and a pool.
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool) -> Self {
        let payments = PaymentClient::new(&config.stripe);
        let session_keys = SessionKeys::new(&config.session_secret);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                payments,
                session_keys,
            }),
        }
    }

    /// Server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Payment provider client.
    #[must_use]
    pub fn payments(&self) -> &PaymentClient {
        &self.inner.payments
    }

    /// Session signing keys.
    #[must_use]
    pub fn session_keys(&self) -> &SessionKeys {
        &self.inner.session_keys
    }
}
