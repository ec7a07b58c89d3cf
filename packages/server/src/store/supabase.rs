use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use super::{GameStore, StoreError};
use crate::models::{
    config::{GameConfig, Mode},
    member::Member,
    role::Role,
    team::Team,
};

const CONFIG_TABLE: &str = "game_config";
const MEMBERS_TABLE: &str = "members";
// game_config は常に 1 行だけ
const CONFIG_ROW_ID: i64 = 1;

// Supabase (PostgREST) を使うストア
// テーブル: game_config (id), members (name, 並び順は position)
// メンバーの置き換えは DELETE → 一括 INSERT。書き込みの直列化は呼び出し側で行う
#[derive(Clone)]
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ConfigRow {
    id: i64,
    mode: Mode,
    team_a: Vec<String>,
    team_b: Vec<String>,
    villager_count: usize,
    werewolf_count: usize,
    large_task_pool: Vec<String>,
    small_task_pool: Vec<String>,
    large_tasks_per_member: usize,
    small_tasks_per_member: usize,
}

impl From<&GameConfig> for ConfigRow {
    fn from(config: &GameConfig) -> Self {
        Self {
            id: CONFIG_ROW_ID,
            mode: config.mode,
            team_a: config.team_a.clone(),
            team_b: config.team_b.clone(),
            villager_count: config.villager_count,
            werewolf_count: config.werewolf_count,
            large_task_pool: config.large_task_pool.clone(),
            small_task_pool: config.small_task_pool.clone(),
            large_tasks_per_member: config.large_tasks_per_member,
            small_tasks_per_member: config.small_tasks_per_member,
        }
    }
}

impl From<ConfigRow> for GameConfig {
    fn from(row: ConfigRow) -> Self {
        Self {
            mode: row.mode,
            team_a: row.team_a,
            team_b: row.team_b,
            villager_count: row.villager_count,
            werewolf_count: row.werewolf_count,
            large_task_pool: row.large_task_pool,
            small_task_pool: row.small_task_pool,
            large_tasks_per_member: row.large_tasks_per_member,
            small_tasks_per_member: row.small_tasks_per_member,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct MemberRow {
    position: usize,
    name: String,
    team: Team,
    role: Role,
    large_tasks: Vec<String>,
    small_tasks: Vec<String>,
}

impl MemberRow {
    fn new(position: usize, member: &Member) -> Self {
        Self {
            position,
            name: member.name.clone(),
            team: member.team,
            role: member.role,
            large_tasks: member.large_tasks.clone(),
            small_tasks: member.small_tasks.clone(),
        }
    }
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Self {
            name: row.name,
            team: row.team,
            role: row.role,
            large_tasks: row.large_tasks,
            small_tasks: row.small_tasks,
        }
    }
}

impl SupabaseStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn send(builder: RequestBuilder) -> Result<Response, StoreError> {
        let response = builder
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn fetch_rows<T: DeserializeOwned>(
        builder: RequestBuilder,
    ) -> Result<Vec<T>, StoreError> {
        Self::send(builder)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn delete_members(&self) -> Result<(), StoreError> {
        // PostgREST は条件なしの DELETE を拒否する
        let builder = self
            .request(Method::DELETE, MEMBERS_TABLE)
            .query(&[("position", "gte.0")]);
        Self::send(builder).await?;
        Ok(())
    }
}

#[async_trait]
impl GameStore for SupabaseStore {
    async fn load_config(&self) -> Result<Option<GameConfig>, StoreError> {
        let builder = self
            .request(Method::GET, CONFIG_TABLE)
            .query(&[("id", format!("eq.{}", CONFIG_ROW_ID)), ("select", "*".to_string())]);
        let rows: Vec<ConfigRow> = Self::fetch_rows(builder).await?;
        Ok(rows.into_iter().next().map(GameConfig::from))
    }

    async fn replace_config(&self, config: &GameConfig) -> Result<(), StoreError> {
        let builder = self
            .request(Method::POST, CONFIG_TABLE)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&ConfigRow::from(config));
        Self::send(builder).await?;
        debug!("game config upserted");
        Ok(())
    }

    async fn replace_members(&self, members: &[Member]) -> Result<(), StoreError> {
        self.delete_members().await?;
        if members.is_empty() {
            return Ok(());
        }

        let rows: Vec<MemberRow> = members
            .iter()
            .enumerate()
            .map(|(position, member)| MemberRow::new(position, member))
            .collect();
        let builder = self
            .request(Method::POST, MEMBERS_TABLE)
            .header("Prefer", "return=minimal")
            .json(&rows);
        Self::send(builder).await?;
        debug!(count = rows.len(), "members inserted");
        Ok(())
    }

    async fn load_members(&self) -> Result<Vec<Member>, StoreError> {
        let builder = self
            .request(Method::GET, MEMBERS_TABLE)
            .query(&[("select", "*"), ("order", "position.asc")]);
        let rows: Vec<MemberRow> = Self::fetch_rows(builder).await?;
        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn load_member(&self, name: &str) -> Result<Option<Member>, StoreError> {
        let builder = self
            .request(Method::GET, MEMBERS_TABLE)
            .query(&[("name", format!("eq.{}", name)), ("select", "*".to_string())]);
        let rows: Vec<MemberRow> = Self::fetch_rows(builder).await?;
        Ok(rows.into_iter().next().map(Member::from))
    }

    async fn reset(&self) -> Result<(), StoreError> {
        let builder = self
            .request(Method::DELETE, CONFIG_TABLE)
            .query(&[("id", format!("eq.{}", CONFIG_ROW_ID))]);
        Self::send(builder).await?;
        self.delete_members().await
    }
}
