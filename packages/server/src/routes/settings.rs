use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::{
    error::AppError, models::setup::SetupRequest, services::setup_service, state::AppState,
    utils::json::ValidatedJson,
};

pub fn routes(state: AppState) -> Router {
    Router::new()
        // 設定の送信と役職・タスクの割り当て
        // curl -X POST -H 'Content-Type: application/json' -d @setup.json http://localhost:8080/api/setup
        .route("/setup", post(submit_setup))
        // curl http://localhost:8080/api/settings
        // curl -X DELETE http://localhost:8080/api/settings
        .route(
            "/settings",
            get(get_settings).post(submit_setup).delete(reset_settings),
        )
        .with_state(state)
}

async fn submit_setup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SetupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = setup_service::submit_setup(&state, request).await?;
    Ok((StatusCode::OK, Json(response)))
}

async fn get_settings(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let config = setup_service::get_settings(&state).await?;
    Ok((StatusCode::OK, Json(config)))
}

async fn reset_settings(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    setup_service::reset_settings(&state).await?;
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "success": true })),
    ))
}
