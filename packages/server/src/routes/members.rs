use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::{error::AppError, services::member_service, state::AppState};

pub fn routes(state: AppState) -> Router {
    Router::new()
        // 選択用のメンバー一覧
        // curl http://localhost:8080/api/members
        .route("/members", get(list_members))
        // 個人の役職とタスク
        // curl http://localhost:8080/api/member/{name}
        .route("/member/:name", get(get_member))
        // 観戦者用（チームごと）
        // curl http://localhost:8080/api/observer
        .route("/observer", get(observer_view))
        .with_state(state)
}

async fn list_members(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let members = member_service::list_members(&state).await?;
    Ok((StatusCode::OK, Json(members)))
}

async fn get_member(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let member = member_service::get_member(&state, &name).await?;
    Ok((StatusCode::OK, Json(member)))
}

async fn observer_view(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let view = member_service::observer_view(&state).await?;
    Ok((StatusCode::OK, Json(view)))
}
