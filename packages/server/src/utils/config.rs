use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::Level;

use crate::store::{GameStore, MemoryStore, SupabaseStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Supabase { url: String, key: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} の値 {value:?} が不正です")]
    Invalid { var: &'static str, value: String },
    #[error("STORE_BACKEND=supabase の場合は {0} を設定してください")]
    Missing(&'static str),
}

// 起動時に一度だけ読み込む
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub cors_origins: Vec<String>,
    pub store: StoreBackend,
    pub log_level: Level,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    // 未設定の変数はデフォルト値
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = match lookup("SERVER_ADDR") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                var: "SERVER_ADDR",
                value,
            })?,
            None => SocketAddr::from(([127, 0, 0, 1], 8080)),
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let store = match lookup("STORE_BACKEND").as_deref() {
            None | Some("memory") => StoreBackend::Memory,
            Some("supabase") => StoreBackend::Supabase {
                url: lookup("SUPABASE_URL").ok_or(ConfigError::Missing("SUPABASE_URL"))?,
                key: lookup("SUPABASE_KEY").ok_or(ConfigError::Missing("SUPABASE_KEY"))?,
            },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "STORE_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let log_level = match lookup("LOG_LEVEL") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                var: "LOG_LEVEL",
                value,
            })?,
            None if cfg!(debug_assertions) => Level::DEBUG,
            None => Level::INFO,
        };

        Ok(Self {
            addr,
            cors_origins,
            store,
            log_level,
        })
    }

    // ログ用（認証情報は含めない）
    pub fn store_kind(&self) -> &'static str {
        match self.store {
            StoreBackend::Memory => "memory",
            StoreBackend::Supabase { .. } => "supabase",
        }
    }

    pub fn build_store(&self) -> Arc<dyn GameStore> {
        match &self.store {
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
            StoreBackend::Supabase { url, key } => Arc::new(SupabaseStore::new(url, key)),
        }
    }
}
