use crate::{
    error::AppError,
    models::member::{Member, ObserverView},
    state::AppState,
};

pub async fn list_members(state: &AppState) -> Result<Vec<Member>, AppError> {
    Ok(state.store.load_members().await?)
}

pub async fn get_member(state: &AppState, name: &str) -> Result<Member, AppError> {
    state
        .store
        .load_member(name)
        .await?
        .ok_or_else(|| AppError::NotFound(name.to_string()))
}

pub async fn observer_view(state: &AppState) -> Result<ObserverView, AppError> {
    let members = list_members(state).await?;
    Ok(ObserverView::from_members(members))
}
