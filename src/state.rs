//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    ai::GeminiClient,
    config::Config,
    judge::{BatchPoller, JudgeBackend},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Database connection pool
    pub db: PgPool,

    /// Code execution backend
    pub judge: Arc<dyn JudgeBackend>,

    /// Generative model client
    pub gemini: GeminiClient,

    /// Application configuration
    pub config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(db: PgPool, judge: Arc<dyn JudgeBackend>, gemini: GeminiClient, config: Config) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                db,
                judge,
                gemini,
                config,
            }),
        }
    }

    /// Get a reference to the database pool
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Get a reference to the judge backend
    pub fn judge(&self) -> &dyn JudgeBackend {
        self.inner.judge.as_ref()
    }

    /// Get a reference to the generative model client
    pub fn gemini(&self) -> &GeminiClient {
        &self.inner.gemini
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Build a poller from the configured polling parameters
    pub fn poller(&self) -> BatchPoller {
        let judge = &self.inner.config.judge;
        BatchPoller::new(judge.poll_interval(), judge.max_poll_attempts)
    }
}
