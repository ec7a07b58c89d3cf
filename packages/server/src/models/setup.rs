use std::collections::{hash_map::Entry, HashMap};

use serde::{Deserialize, Serialize};

use super::{
    config::{GameConfig, Mode, TaskClass},
    role::Role,
};
use crate::error::ValidationError;

// タスク一覧: 配列またはテキストエリアの改行区切り
// 前後の空白を除き、空行は捨てる
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TaskInput {
    Items(Vec<String>),
    Lines(String),
}

impl Default for TaskInput {
    fn default() -> Self {
        TaskInput::Items(Vec::new())
    }
}

impl TaskInput {
    pub fn into_tasks(self) -> Vec<String> {
        let raw: Vec<String> = match self {
            TaskInput::Items(items) => items,
            TaskInput::Lines(text) => text.lines().map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|task| task.trim().to_string())
            .filter(|task| !task.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualTasks {
    #[serde(default)]
    pub large_tasks: TaskInput,
    #[serde(default)]
    pub small_tasks: TaskInput,
}

// POST /api/setup のリクエスト
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupRequest {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub team_a: Vec<String>,
    #[serde(default)]
    pub team_b: Vec<String>,
    pub villager_count: Option<usize>,
    pub werewolf_count: Option<usize>,
    pub large_task_pool: Option<TaskInput>,
    pub small_task_pool: Option<TaskInput>,
    pub large_tasks_per_member: Option<usize>,
    pub small_tasks_per_member: Option<usize>,
    // gm モードのみ
    #[serde(default)]
    pub roles: HashMap<String, Role>,
    #[serde(default)]
    pub tasks: HashMap<String, ManualTasks>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualAssignments {
    pub roles: HashMap<String, Role>,
    pub tasks: HashMap<String, (Vec<String>, Vec<String>)>,
}

impl SetupRequest {
    // auto モードでは人数・タスク一覧の省略はエラー（空扱いにしない）
    pub fn into_parts(self) -> Result<(GameConfig, ManualAssignments), ValidationError> {
        let team_a = trim_names(self.team_a);
        let team_b = trim_names(self.team_b);

        let config = match self.mode {
            Mode::Auto => GameConfig {
                mode: Mode::Auto,
                team_a,
                team_b,
                villager_count: self
                    .villager_count
                    .ok_or(ValidationError::MissingField("villagerCount"))?,
                werewolf_count: self
                    .werewolf_count
                    .ok_or(ValidationError::MissingField("werewolfCount"))?,
                large_task_pool: self
                    .large_task_pool
                    .ok_or(ValidationError::MissingPool(TaskClass::Large))?
                    .into_tasks(),
                small_task_pool: self
                    .small_task_pool
                    .ok_or(ValidationError::MissingPool(TaskClass::Small))?
                    .into_tasks(),
                large_tasks_per_member: self
                    .large_tasks_per_member
                    .ok_or(ValidationError::MissingField("largeTasksPerMember"))?,
                small_tasks_per_member: self
                    .small_tasks_per_member
                    .ok_or(ValidationError::MissingField("smallTasksPerMember"))?,
            },
            Mode::Gm => GameConfig {
                mode: Mode::Gm,
                team_a,
                team_b,
                villager_count: self.villager_count.unwrap_or_default(),
                werewolf_count: self.werewolf_count.unwrap_or_default(),
                large_task_pool: self.large_task_pool.unwrap_or_default().into_tasks(),
                small_task_pool: self.small_task_pool.unwrap_or_default().into_tasks(),
                large_tasks_per_member: self.large_tasks_per_member.unwrap_or_default(),
                small_tasks_per_member: self.small_tasks_per_member.unwrap_or_default(),
            },
        };

        let manual = ManualAssignments {
            roles: trim_keys(self.roles)?,
            tasks: trim_keys(self.tasks)?
                .into_iter()
                .map(|(name, tasks)| {
                    (
                        name,
                        (tasks.large_tasks.into_tasks(), tasks.small_tasks.into_tasks()),
                    )
                })
                .collect(),
        };

        Ok((config, manual))
    }
}

fn trim_names(names: Vec<String>) -> Vec<String> {
    names.into_iter().map(|n| n.trim().to_string()).collect()
}

// "A1" と "A1 " のように空白を除くと同じになるキーはエラー
fn trim_keys<V>(map: HashMap<String, V>) -> Result<HashMap<String, V>, ValidationError> {
    let mut trimmed = HashMap::with_capacity(map.len());
    for (name, value) in map {
        match trimmed.entry(name.trim().to_string()) {
            Entry::Occupied(entry) => {
                return Err(ValidationError::DuplicateMember(entry.key().clone()))
            }
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
        }
    }
    Ok(trimmed)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SetupResponse {
    pub success: bool,
    pub mode: Mode,
    pub member_count: usize,
}
