use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::team::{Team, TEAM_SIZE, TOTAL_MEMBERS};
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    // ゲームマスターが役職とタスクを手動で決める
    Gm,
    #[default]
    #[serde(alias = "nogm")]
    Auto,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Gm => write!(f, "gm"),
            Mode::Auto => write!(f, "auto"),
        }
    }
}

// 大タスク・小タスク
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskClass {
    Large,
    Small,
}

impl TaskClass {
    pub const ALL: [TaskClass; 2] = [TaskClass::Large, TaskClass::Small];
}

impl fmt::Display for TaskClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskClass::Large => write!(f, "大タスク"),
            TaskClass::Small => write!(f, "小タスク"),
        }
    }
}

// ゲーム設定（送信のたびに丸ごと置き換え）
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub mode: Mode,
    pub team_a: Vec<String>,
    pub team_b: Vec<String>,
    pub villager_count: usize,
    pub werewolf_count: usize,
    pub large_task_pool: Vec<String>,
    pub small_task_pool: Vec<String>,
    pub large_tasks_per_member: usize,
    pub small_tasks_per_member: usize,
}

impl GameConfig {
    pub fn roster(&self, team: Team) -> &[String] {
        match team {
            Team::A => &self.team_a,
            Team::B => &self.team_b,
        }
    }

    pub fn pool(&self, class: TaskClass) -> &[String] {
        match class {
            TaskClass::Large => &self.large_task_pool,
            TaskClass::Small => &self.small_task_pool,
        }
    }

    pub fn tasks_per_member(&self, class: TaskClass) -> usize {
        match class {
            TaskClass::Large => self.large_tasks_per_member,
            TaskClass::Small => self.small_tasks_per_member,
        }
    }

    // 割り当て順: Aチーム、次にBチーム
    pub fn members_in_order(&self) -> impl Iterator<Item = (Team, &String)> {
        Team::ALL
            .into_iter()
            .flat_map(move |team| self.roster(team).iter().map(move |name| (team, name)))
    }

    // 各チーム5人、空の名前・重複なし
    pub fn validate_rosters(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::with_capacity(TOTAL_MEMBERS);
        for team in Team::ALL {
            let roster = self.roster(team);
            if roster.len() != TEAM_SIZE {
                return Err(ValidationError::RosterSize {
                    team,
                    expected: TEAM_SIZE,
                    actual: roster.len(),
                });
            }
            for (index, name) in roster.iter().enumerate() {
                if name.trim().is_empty() {
                    return Err(ValidationError::EmptyMemberName {
                        team,
                        position: index + 1,
                    });
                }
                if !seen.insert(name.as_str()) {
                    return Err(ValidationError::DuplicateMember(name.clone()));
                }
            }
        }
        Ok(())
    }

    pub fn validate_role_counts(&self) -> Result<(), ValidationError> {
        // リクエストの値をそのまま足すのでオーバーフローに注意
        if self.villager_count.checked_add(self.werewolf_count) != Some(TEAM_SIZE) {
            return Err(ValidationError::RoleCountMismatch {
                villagers: self.villager_count,
                werewolves: self.werewolf_count,
                team_size: TEAM_SIZE,
            });
        }
        Ok(())
    }

    pub fn validate_pools(&self) -> Result<(), ValidationError> {
        for class in TaskClass::ALL {
            let pool = self.pool(class);
            let required = TOTAL_MEMBERS.saturating_mul(self.tasks_per_member(class));
            if pool.len() < required {
                return Err(ValidationError::InsufficientTasks {
                    class,
                    required,
                    available: pool.len(),
                });
            }
            let mut seen = HashSet::with_capacity(pool.len());
            if let Some(task) = pool.iter().find(|task| !seen.insert(task.as_str())) {
                return Err(ValidationError::DuplicateTask {
                    class,
                    task: task.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_rosters()?;
        self.validate_role_counts()?;
        self.validate_pools()
    }
}
