use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{GameStore, StoreError};
use crate::models::{config::GameConfig, member::Member};

#[derive(Debug, Default)]
struct Snapshot {
    config: Option<GameConfig>,
    members: Vec<Member>,
}

// プロセス内のみ（再起動で消える）
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Snapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn load_config(&self) -> Result<Option<GameConfig>, StoreError> {
        Ok(self.inner.read().await.config.clone())
    }

    async fn replace_config(&self, config: &GameConfig) -> Result<(), StoreError> {
        self.inner.write().await.config = Some(config.clone());
        Ok(())
    }

    async fn replace_members(&self, members: &[Member]) -> Result<(), StoreError> {
        let mut snapshot = self.inner.write().await;
        snapshot.members.clear();
        snapshot.members.extend_from_slice(members);
        Ok(())
    }

    async fn load_members(&self) -> Result<Vec<Member>, StoreError> {
        Ok(self.inner.read().await.members.clone())
    }

    async fn load_member(&self, name: &str) -> Result<Option<Member>, StoreError> {
        let snapshot = self.inner.read().await;
        Ok(snapshot.members.iter().find(|m| m.name == name).cloned())
    }

    async fn reset(&self) -> Result<(), StoreError> {
        let mut snapshot = self.inner.write().await;
        snapshot.config = None;
        snapshot.members.clear();
        Ok(())
    }
}
