use async_trait::async_trait;

use crate::models::{config::GameConfig, member::Member};

pub mod memory;
pub mod supabase;

pub use memory::MemoryStore;
pub use supabase::SupabaseStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("ストアへのリクエストに失敗しました: {0}")]
    Request(String),
    #[error("ストアがステータス {status} を返しました: {body}")]
    Status { status: u16, body: String },
    #[error("ストアのレスポンスを解析できませんでした: {0}")]
    Decode(String),
}

#[async_trait]
pub trait GameStore: Send + Sync {
    async fn load_config(&self) -> Result<Option<GameConfig>, StoreError>;

    async fn replace_config(&self, config: &GameConfig) -> Result<(), StoreError>;

    // 以前のメンバーを消してから書き込む
    async fn replace_members(&self, members: &[Member]) -> Result<(), StoreError>;

    // 割り当て順（Aチーム→Bチーム）
    async fn load_members(&self) -> Result<Vec<Member>, StoreError>;

    async fn load_member(&self, name: &str) -> Result<Option<Member>, StoreError>;

    async fn reset(&self) -> Result<(), StoreError>;
}
