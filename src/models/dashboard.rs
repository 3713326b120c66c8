use serde::{Deserialize, Serialize};

use super::{ExecutionHistoryPoint, WorkflowStatus};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SidebarEntry {
    /// `None` for the "All Workflows" entry.
    pub folder_id: Option<String>,
    pub name: String,
    pub workflow_count: usize,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowCard {
    pub id: String,
    pub name: String,
    pub status: WorkflowStatus,
    pub folder_name: Option<String>,
    pub description: String,
    pub last_run: String,
    pub runs: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunTime {
    pub relative: String,
    pub formatted: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceSummary {
    pub total_executions: String,
    pub average_execution_secs: Option<f64>,
    pub error_rate: f64,
    pub error_rate_high: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistorySummary {
    pub points: Vec<ExecutionHistoryPoint>,
    pub total_successful: u64,
    pub total_failed: u64,
    /// Percentage, `None` when the series has no executions.
    pub success_rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowDetails {
    pub id: String,
    pub name: String,
    pub status: WorkflowStatus,
    pub status_label: String,
    pub last_run: RunTime,
    pub next_run: Option<RunTime>,
    pub performance: PerformanceSummary,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub history: HistorySummary,
}
