pub mod config;
pub mod entities;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod policy;
pub mod routes;
pub mod seed;
pub mod session;
pub mod store;
pub mod utils;

use std::sync::Arc;

use tokio::sync::RwLock;

pub use config::Config;
pub use error::{AppError, AppResult, DomainError};

use crate::policy::CancellationPolicy;
use crate::session::{SessionRegistry, SharedSessions};
use crate::store::{DomainStore, SharedStore};

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub sessions: SharedSessions,
    pub config: Config,
}

impl AppState {
    pub fn new(store: DomainStore, config: Config) -> Self {
        Self {
            store: store.into_shared(),
            sessions: Arc::new(RwLock::new(SessionRegistry::default())),
            config,
        }
    }

    pub fn cancellation_policy(&self) -> CancellationPolicy {
        CancellationPolicy::new(self.config.cancellation_window_days)
    }
}
