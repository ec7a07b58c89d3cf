use std::sync::Arc;
use tokio::sync::Mutex;

use crate::store::{GameStore, MemoryStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn GameStore>,
    // setup と reset を直列化する（後勝ち）
    pub setup_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(store: Arc<dyn GameStore>) -> Self {
        AppState {
            store,
            setup_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }
}
