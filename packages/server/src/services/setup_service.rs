use tracing::{error, info, warn};

use crate::{
    error::{AppError, ValidationError},
    models::{
        config::{GameConfig, Mode},
        member::Member,
        setup::{ManualAssignments, SetupRequest, SetupResponse},
    },
    services::assignment,
    state::AppState,
    store::StoreError,
};

fn build_members(
    config: &GameConfig,
    manual: &ManualAssignments,
) -> Result<Vec<Member>, ValidationError> {
    match config.mode {
        Mode::Auto => assignment::assign(config, &mut rand::thread_rng()),
        Mode::Gm => assignment::assign_manual(config, manual),
    }
}

fn log_store_error(e: StoreError) -> AppError {
    error!(error = %e, "store operation failed");
    AppError::Persistence(e)
}

// 設定を検証して役職・タスクを割り当て、設定とメンバーを置き換える
// 検証に失敗した場合は何も書き込まない
pub async fn submit_setup(
    state: &AppState,
    request: SetupRequest,
) -> Result<SetupResponse, AppError> {
    let (config, members) = request
        .into_parts()
        .and_then(|(config, manual)| {
            let members = build_members(&config, &manual)?;
            Ok((config, members))
        })
        .map_err(|e| {
            warn!(error = %e, "setup rejected");
            AppError::Validation(e)
        })?;

    // 設定 → メンバーの順に保存。ロック中は他の送信と混ざらない
    let _guard = state.setup_lock.lock().await;
    state
        .store
        .replace_config(&config)
        .await
        .map_err(log_store_error)?;
    state
        .store
        .replace_members(&members)
        .await
        .map_err(log_store_error)?;

    info!(mode = %config.mode, members = members.len(), "setup stored");
    Ok(SetupResponse {
        success: true,
        mode: config.mode,
        member_count: members.len(),
    })
}

// 未設定の場合は空のデフォルトを返す
pub async fn get_settings(state: &AppState) -> Result<GameConfig, AppError> {
    let config = state.store.load_config().await.map_err(log_store_error)?;
    Ok(config.unwrap_or_default())
}

pub async fn reset_settings(state: &AppState) -> Result<(), AppError> {
    let _guard = state.setup_lock.lock().await;
    state.store.reset().await.map_err(log_store_error)?;
    info!("settings and members reset");
    Ok(())
}
