// Application state module
// Immutable per-process state shared by every connection

use std::sync::Arc;

use super::types::Config;
use crate::logger::Logger;
use crate::memory::MemoryStore;

/// Application state
pub struct AppState {
    pub config: Config,
    pub store: MemoryStore,
    pub logger: Arc<dyn Logger>,
}

impl AppState {
    /// Build state from configuration with the given logger
    pub fn new(config: &Config, logger: Arc<dyn Logger>) -> Self {
        Self {
            config: config.clone(),
            store: MemoryStore::new(&config.memory.dir),
            logger,
        }
    }
}
