use std::sync::Arc;

use quill_db::DbPool;

use crate::config::ServerConfig;

/// Handler state. Cloned per request, so everything inside is shared.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    /// Handlers read the auth policy (token lifetime, password length) from here.
    pub config: Arc<ServerConfig>,
}
