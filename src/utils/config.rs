use std::path::{Path, PathBuf};

use crate::error::{DashboardError, Result};
use crate::models::{ApiCredentials, Settings};

const ENV_API_URL: &str = "N8N_API_URL";
const ENV_API_KEY: &str = "N8N_API_KEY";
const ENV_UNCATEGORIZED_LABEL: &str = "DASHBOARD_UNCATEGORIZED_LABEL";
const ENV_SETTINGS_PATH: &str = "DASHBOARD_SETTINGS";
const ENV_FIXTURE_PATH: &str = "DASHBOARD_FIXTURE";

const DEFAULT_SETTINGS_PATH: &str = "config/settings.json";

/// Loads `.env` from the working directory or a parent. A missing file
/// is `Ok(None)`.
pub fn load_dotenv() -> std::result::Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub fn api_key_from_env() -> Option<String> {
    non_empty_env(ENV_API_KEY)
}

pub fn api_url_from_env() -> Option<String> {
    non_empty_env(ENV_API_URL)
}

pub fn apply_env_defaults(settings: &mut Settings) {
    if settings.connection.api_url.trim().is_empty() {
        settings.connection.api_url = api_url_from_env().unwrap_or_default();
    }
    if let Some(label) = non_empty_env(ENV_UNCATEGORIZED_LABEL) {
        settings.table.uncategorized_label = label;
    }
}

/// Credentials the dialog is pre-filled with before the user saves any.
pub fn default_credentials(settings: &Settings) -> Option<ApiCredentials> {
    let api_key = api_key_from_env().unwrap_or_default();
    let creds = ApiCredentials::new(settings.connection.api_url.clone(), api_key);
    creds.validate().ok()
}

pub fn settings_path() -> PathBuf {
    non_empty_env(ENV_SETTINGS_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH))
}

pub fn fixture_path() -> Option<PathBuf> {
    non_empty_env(ENV_FIXTURE_PATH).map(PathBuf::from)
}

/// A missing file yields the defaults; a malformed one is an error.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let mut settings = if path.exists() {
        let content = std::fs::read_to_string(path).map_err(|source| DashboardError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content)?
    } else {
        log::debug!("No settings at {}, using defaults", path.display());
        Settings::default()
    };
    apply_env_defaults(&mut settings);
    Ok(settings)
}
