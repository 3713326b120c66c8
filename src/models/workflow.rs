use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    Active,
    Inactive,
    Error,
}

impl WorkflowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Active => "active",
            WorkflowStatus::Inactive => "inactive",
            WorkflowStatus::Error => "error",
        }
    }

    /// Badge text, e.g. "Active".
    pub fn label(&self) -> &'static str {
        match self {
            WorkflowStatus::Active => "Active",
            WorkflowStatus::Inactive => "Inactive",
            WorkflowStatus::Error => "Error",
        }
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: String,
    pub name: String,
    pub status: WorkflowStatus,
    #[serde(default)]
    pub folder: Option<String>,
    pub last_run: DateTime<Utc>,
    #[serde(default)]
    pub next_run: Option<DateTime<Utc>>,
    pub execution_count: u64,
    pub error_rate: f64,
    #[serde(default)]
    pub average_execution_time: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub count: Option<u32>,
}

/// One day of the execution history chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExecutionHistoryPoint {
    pub date: String,
    pub successful: u32,
    pub failed: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_record() {
        let json = r#"{
            "id": "1",
            "name": "Lead Generation Workflow",
            "status": "active",
            "folder": "marketing",
            "lastRun": "2023-11-15T14:30:00Z",
            "nextRun": null,
            "executionCount": 1245,
            "errorRate": 0.5,
            "tags": ["leads"]
        }"#;
        let workflow: Workflow = serde_json::from_str(json).unwrap();
        assert_eq!(workflow.status, WorkflowStatus::Active);
        assert_eq!(workflow.folder.as_deref(), Some("marketing"));
        assert_eq!(workflow.execution_count, 1245);
        assert!(workflow.next_run.is_none());
        assert!(workflow.description.is_none());
    }

    #[test]
    fn missing_folder_is_unassigned() {
        let json = r#"{"id":"9","name":"n","status":"error","lastRun":"2023-01-01T00:00:00Z","executionCount":0,"errorRate":120.0}"#;
        let workflow: Workflow = serde_json::from_str(json).unwrap();
        assert!(workflow.folder.is_none());
        assert_eq!(workflow.error_rate, 120.0);
    }
}
