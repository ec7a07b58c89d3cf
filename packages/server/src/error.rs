use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::models::{config::TaskClass, team::Team};
use crate::store::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{team}チームは{expected}人必要です（現在{actual}人）")]
    RosterSize {
        team: Team,
        expected: usize,
        actual: usize,
    },
    #[error("{team}チーム{position}人目の名前が空です")]
    EmptyMemberName { team: Team, position: usize },
    #[error("メンバー名 {0:?} が重複しています")]
    DuplicateMember(String),
    #[error("各チームの村人と人狼の合計は{team_size}にしてください（村人{villagers}、人狼{werewolves}）")]
    RoleCountMismatch {
        villagers: usize,
        werewolves: usize,
        team_size: usize,
    },
    #[error("{0} が指定されていません")]
    MissingField(&'static str),
    #[error("{0}の一覧が指定されていません")]
    MissingPool(TaskClass),
    #[error("{class}は{required}個必要です（現在{available}個）")]
    InsufficientTasks {
        class: TaskClass,
        required: usize,
        available: usize,
    },
    #[error("{class} {task:?} が重複しています")]
    DuplicateTask { class: TaskClass, task: String },
    #[error("{0:?} の役職が未入力です")]
    MissingRole(String),
    #[error("{0:?} のタスクが未入力です")]
    MissingTasks(String),
    #[error("{0:?} はどちらのチームにもいません")]
    UnknownMember(String),
    #[error("リクエストの形式が不正です: {0}")]
    InvalidBody(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("メンバー {0:?} が見つかりません")]
    NotFound(String),
    #[error("データの保存・読み込みに失敗しました: {0}")]
    Persistence(#[from] StoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::NotFound(_) => "not_found",
            AppError::Persistence(_) => "persistence",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub kind: String,
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            success: false,
            kind: self.kind().to_string(),
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
