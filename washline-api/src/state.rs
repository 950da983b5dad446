use std::sync::Arc;

use washline_store::MemoryStore;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub auth: AuthConfig,
}
