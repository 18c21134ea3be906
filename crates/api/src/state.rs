use std::sync::Arc;

use carlot_core::blob::BlobSink;
use carlot_db::DbPool;

use crate::config::ServerConfig;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
    pub blob: Arc<dyn BlobSink>,
}

impl AppState {
    pub fn new(pool: DbPool, config: ServerConfig, blob: Arc<dyn BlobSink>) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            blob,
        }
    }
}
