use std::time::Duration;

use crate::models::{ApiCredentials, ConnectionTestResult, Settings};
use crate::services::credentials;
use crate::state::AppState;

pub fn get_settings(state: &AppState) -> Result<Settings, String> {
    Ok(state.settings.clone())
}

pub fn get_credentials(state: &AppState) -> Result<Option<ApiCredentials>, String> {
    Ok(state.session()?.credentials.clone())
}

pub fn save_credentials(
    state: &AppState,
    credentials: ApiCredentials,
) -> Result<ApiCredentials, String> {
    let valid = credentials.validate().map_err(|e| e.to_string())?;
    state.session()?.credentials = Some(valid.clone());
    log::info!("Saved API credentials for {}", valid.api_url);
    Ok(valid)
}

pub async fn test_connection(
    state: &AppState,
    credentials: ApiCredentials,
) -> Result<ConnectionTestResult, String> {
    let delay = Duration::from_millis(state.settings.connection.test_delay_ms);
    credentials::test_connection(&credentials, delay)
        .await
        .map_err(|e| e.to_string())
}
