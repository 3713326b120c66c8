use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApiCredentials {
    pub api_url: String,
    pub api_key: String,
}

impl ApiCredentials {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Trimmed copy, rejected when either field is blank.
    pub fn validate(&self) -> Result<ApiCredentials, DashboardError> {
        let api_url = self.api_url.trim();
        let api_key = self.api_key.trim();
        if api_url.is_empty() || api_key.is_empty() {
            return Err(DashboardError::MissingCredentials);
        }
        Ok(ApiCredentials::new(api_url, api_key))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionTestResult {
    pub success: bool,
    pub api_url: String,
    pub elapsed_ms: u64,
}
