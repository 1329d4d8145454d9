//! Application context providing dependency injection root.

use std::sync::Arc;

use crate::config::Config;
use crate::di::Context as ContextDerive;
use crate::store::backends::memory::InMemoryStore;

/// Root application context for dependency injection.
///
/// `#[derive(Context)]` makes each field extractable via `FromRef`.
#[derive(ContextDerive, Clone)]
pub struct Context {
    /// Document store. Clones share the same documents.
    pub store: InMemoryStore,
    /// Application configuration.
    pub config: Arc<Config>,
}

impl Context {
    pub fn new(store: InMemoryStore, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
