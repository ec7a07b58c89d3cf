use crate::state::AppState;
use axum::{routing::get, Router};

mod members;
mod settings;

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest(
            "/api",
            settings::routes(state.clone()).merge(members::routes(state)),
        )
}
