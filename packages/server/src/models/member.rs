use serde::{Deserialize, Serialize};

use super::{role::Role, team::Team};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub name: String,
    pub team: Team,
    pub role: Role,
    pub large_tasks: Vec<String>,
    pub small_tasks: Vec<String>,
}

impl Member {
    pub fn all_tasks(&self) -> impl Iterator<Item = &String> {
        self.large_tasks.iter().chain(self.small_tasks.iter())
    }
}

// 観戦者画面用
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObserverView {
    pub team_a: Vec<Member>,
    pub team_b: Vec<Member>,
}

impl ObserverView {
    pub fn from_members(members: Vec<Member>) -> Self {
        let (team_a, team_b): (Vec<Member>, Vec<Member>) =
            members.into_iter().partition(|m| m.team == Team::A);
        Self { team_a, team_b }
    }
}
