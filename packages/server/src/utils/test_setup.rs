use std::sync::Once;

use async_trait::async_trait;

use crate::models::{
    config::{GameConfig, Mode},
    member::Member,
    role::Role,
    setup::{ManualAssignments, ManualTasks, SetupRequest, TaskInput},
};
use crate::store::{GameStore, StoreError};

static INIT: Once = Once::new();

pub fn setup_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

fn names(prefix: &str) -> Vec<String> {
    (1..=5).map(|i| format!("{}{}", prefix, i)).collect()
}

fn tasks(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{}-{}", prefix, i)).collect()
}

// A1..A5 と B1..B5、各チーム村人3・人狼2、大小タスク各10個（1人1個ずつ）
pub fn sample_config() -> GameConfig {
    GameConfig {
        mode: Mode::Auto,
        team_a: names("A"),
        team_b: names("B"),
        villager_count: 3,
        werewolf_count: 2,
        large_task_pool: tasks("large", 10),
        small_task_pool: tasks("small", 10),
        large_tasks_per_member: 1,
        small_tasks_per_member: 1,
    }
}

pub fn sample_request() -> SetupRequest {
    let config = sample_config();
    SetupRequest {
        mode: Mode::Auto,
        team_a: config.team_a,
        team_b: config.team_b,
        villager_count: Some(config.villager_count),
        werewolf_count: Some(config.werewolf_count),
        large_task_pool: Some(TaskInput::Items(config.large_task_pool)),
        small_task_pool: Some(TaskInput::Items(config.small_task_pool)),
        large_tasks_per_member: Some(config.large_tasks_per_member),
        small_tasks_per_member: Some(config.small_tasks_per_member),
        ..SetupRequest::default()
    }
}

// GM の割り当て: A チームの1人目だけ人狼、全員に大タスク1個
pub fn sample_manual(config: &GameConfig) -> ManualAssignments {
    let mut manual = ManualAssignments::default();
    for (index, (_, name)) in config.members_in_order().enumerate() {
        let role = if index == 0 { Role::Werewolf } else { Role::Villager };
        manual.roles.insert(name.clone(), role);
        manual
            .tasks
            .insert(name.clone(), (vec![format!("gm task for {}", name)], vec![]));
    }
    manual
}

pub fn sample_gm_request() -> SetupRequest {
    let config = sample_config();
    let manual = sample_manual(&config);
    SetupRequest {
        mode: Mode::Gm,
        team_a: config.team_a,
        team_b: config.team_b,
        roles: manual.roles,
        tasks: manual
            .tasks
            .into_iter()
            .map(|(name, (large, small))| {
                (
                    name,
                    ManualTasks {
                        large_tasks: TaskInput::Items(large),
                        small_tasks: TaskInput::Items(small),
                    },
                )
            })
            .collect(),
        ..SetupRequest::default()
    }
}

// 常に失敗するストア（永続化エラーのテスト用）
#[derive(Debug, Default)]
pub struct FailingStore;

impl FailingStore {
    fn error() -> StoreError {
        StoreError::Request("connection refused".to_string())
    }
}

#[async_trait]
impl GameStore for FailingStore {
    async fn load_config(&self) -> Result<Option<GameConfig>, StoreError> {
        Err(Self::error())
    }

    async fn replace_config(&self, _config: &GameConfig) -> Result<(), StoreError> {
        Err(Self::error())
    }

    async fn replace_members(&self, _members: &[Member]) -> Result<(), StoreError> {
        Err(Self::error())
    }

    async fn load_members(&self) -> Result<Vec<Member>, StoreError> {
        Err(Self::error())
    }

    async fn load_member(&self, _name: &str) -> Result<Option<Member>, StoreError> {
        Err(Self::error())
    }

    async fn reset(&self) -> Result<(), StoreError> {
        Err(Self::error())
    }
}
