use chrono::{DateTime, Utc};

use crate::models::{
    ExecutionHistoryPoint, Folder, HistorySummary, PerformanceSummary, RunTime, Settings,
    SidebarEntry, Workflow, WorkflowCard, WorkflowDetails,
};
use crate::services::catalog::WorkflowCatalog;
use crate::utils::format::{format_count, format_date, format_relative_time, runs_label};

pub const ALL_WORKFLOWS_LABEL: &str = "All Workflows";
const NO_DESCRIPTION: &str = "No description provided";

/// Sidebar entries: "All Workflows" first, then one per folder. Exactly
/// one entry is selected; an unknown selection falls back to the first.
pub fn build_sidebar(catalog: &WorkflowCatalog, selected: Option<&str>) -> Vec<SidebarEntry> {
    let folders = catalog.folders();
    let counts = catalog.folder_counts();
    let selected = selected.filter(|id| folders.iter().any(|f| f.id == *id));

    let mut entries = Vec::with_capacity(folders.len() + 1);
    entries.push(SidebarEntry {
        folder_id: None,
        name: ALL_WORKFLOWS_LABEL.to_string(),
        workflow_count: catalog.workflows().len(),
        selected: selected.is_none(),
    });

    let mut marked = selected.is_none();
    for folder in folders {
        let is_selected = !marked && selected == Some(folder.id.as_str());
        marked |= is_selected;
        entries.push(SidebarEntry {
            folder_id: Some(folder.id.clone()),
            name: folder.name.clone(),
            workflow_count: counts.get(folder.id.as_str()).copied().unwrap_or(0),
            selected: is_selected,
        });
    }
    entries
}

pub fn panel_title(folders: &[Folder], selected: Option<&str>) -> String {
    selected
        .and_then(|id| folders.iter().find(|f| f.id == id))
        .map(|f| format!("{} Workflows", f.name))
        .unwrap_or_else(|| ALL_WORKFLOWS_LABEL.to_string())
}

/// Grid view cards, in input order.
pub fn build_cards<'a>(
    workflows: impl IntoIterator<Item = &'a Workflow>,
    folders: &[Folder],
    settings: &Settings,
) -> Vec<WorkflowCard> {
    workflows
        .into_iter()
        .map(|workflow| WorkflowCard {
            id: workflow.id.clone(),
            name: workflow.name.clone(),
            status: workflow.status,
            folder_name: workflow
                .folder
                .as_deref()
                .and_then(|id| folders.iter().find(|f| f.id == id))
                .map(|f| f.name.clone()),
            description: workflow
                .description
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or(NO_DESCRIPTION)
                .to_string(),
            last_run: format_date(&workflow.last_run, &settings.table.date_format),
            runs: runs_label(workflow.execution_count),
        })
        .collect()
}

fn run_time(date: &DateTime<Utc>, now: &DateTime<Utc>, settings: &Settings) -> RunTime {
    RunTime {
        relative: format_relative_time(date, now),
        formatted: format_date(date, &settings.table.long_date_format),
    }
}

pub fn summarize_history(points: &[ExecutionHistoryPoint]) -> HistorySummary {
    let total_successful: u64 = points.iter().map(|p| u64::from(p.successful)).sum();
    let total_failed: u64 = points.iter().map(|p| u64::from(p.failed)).sum();
    let total = total_successful + total_failed;
    let success_rate = if total == 0 {
        None
    } else {
        Some(total_successful as f64 * 100.0 / total as f64)
    };
    HistorySummary {
        points: points.to_vec(),
        total_successful,
        total_failed,
        success_rate,
    }
}

pub fn build_details(
    workflow: &Workflow,
    history: &[ExecutionHistoryPoint],
    now: DateTime<Utc>,
    settings: &Settings,
) -> WorkflowDetails {
    WorkflowDetails {
        id: workflow.id.clone(),
        name: workflow.name.clone(),
        status: workflow.status,
        status_label: workflow.status.label().to_string(),
        last_run: run_time(&workflow.last_run, &now, settings),
        next_run: workflow.next_run.as_ref().map(|next| run_time(next, &now, settings)),
        performance: PerformanceSummary {
            total_executions: format_count(workflow.execution_count),
            average_execution_secs: workflow.average_execution_time,
            error_rate: workflow.error_rate,
            error_rate_high: workflow.error_rate > settings.table.error_rate_threshold,
        },
        description: workflow.description.clone(),
        tags: workflow.tags.clone(),
        history: summarize_history(history),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn sidebar_marks_all_when_nothing_selected() {
        let catalog = WorkflowCatalog::mock().unwrap();
        let entries = build_sidebar(&catalog, None);
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].name, "All Workflows");
        assert_eq!(entries[0].workflow_count, 6);
        assert_eq!(entries.iter().filter(|e| e.selected).count(), 1);
        assert!(entries[0].selected);
    }

    #[test]
    fn sidebar_marks_selected_folder() {
        let catalog = WorkflowCatalog::mock().unwrap();
        let entries = build_sidebar(&catalog, Some("sales"));
        let selected: Vec<&SidebarEntry> = entries.iter().filter(|e| e.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].folder_id.as_deref(), Some("sales"));
        assert_eq!(selected[0].workflow_count, 1);
    }

    #[test]
    fn sidebar_unknown_selection_falls_back_to_all() {
        let catalog = WorkflowCatalog::mock().unwrap();
        let entries = build_sidebar(&catalog, Some("ghost"));
        assert!(entries[0].selected);
        assert_eq!(entries.iter().filter(|e| e.selected).count(), 1);
    }

    #[test]
    fn panel_title_names_folder() {
        let catalog = WorkflowCatalog::mock().unwrap();
        assert_eq!(panel_title(catalog.folders(), Some("marketing")), "Marketing Workflows");
        assert_eq!(panel_title(catalog.folders(), None), "All Workflows");
        assert_eq!(panel_title(catalog.folders(), Some("ghost")), "All Workflows");
    }

    #[test]
    fn cards_fill_in_missing_description() {
        let catalog = WorkflowCatalog::mock().unwrap();
        let mut workflow = catalog.workflow("4").unwrap().clone();
        workflow.description = Some("   ".to_string());
        workflow.folder = Some("ghost".to_string());
        let cards = build_cards([&workflow], catalog.folders(), &Settings::default());
        assert_eq!(cards[0].description, "No description provided");
        assert_eq!(cards[0].folder_name, None);
        assert_eq!(cards[0].last_run, "10/11/2023 09:15");
        assert_eq!(cards[0].runs, "423 runs");
    }

    #[test]
    fn details_flag_high_error_rate() {
        let catalog = WorkflowCatalog::mock().unwrap();
        let workflow = catalog.workflow("3").unwrap();
        let now = Utc.with_ymd_and_hms(2023, 11, 14, 18, 45, 0).unwrap();
        let details = build_details(workflow, catalog.execution_history("3"), now, &Settings::default());
        assert_eq!(details.status_label, "Error");
        assert!(details.performance.error_rate_high);
        assert_eq!(details.performance.total_executions, "567");
        assert_eq!(details.last_run.relative, "about 2 hours ago");
        assert_eq!(details.last_run.formatted, "Nov 14, 2023 at 4:45 PM");
        assert_eq!(details.next_run.unwrap().relative, "in about 22 hours");
        assert_eq!(details.history.total_successful, 45);
        assert_eq!(details.history.total_failed, 12);
    }

    #[test]
    fn details_without_next_run_or_history() {
        let catalog = WorkflowCatalog::mock().unwrap();
        let workflow = catalog.workflow("4").unwrap();
        let now = Utc.with_ymd_and_hms(2023, 11, 15, 9, 15, 0).unwrap();
        let details = build_details(workflow, catalog.execution_history("4"), now, &Settings::default());
        assert!(details.next_run.is_none());
        assert!(!details.performance.error_rate_high);
        assert_eq!(details.history.success_rate, None);
        assert_eq!(details.last_run.relative, "5 days ago");
    }

    #[test]
    fn history_success_rate() {
        let points = vec![
            ExecutionHistoryPoint { date: "d1".to_string(), successful: 3, failed: 1 },
            ExecutionHistoryPoint { date: "d2".to_string(), successful: 0, failed: 0 },
        ];
        let summary = summarize_history(&points);
        assert_eq!(summary.success_rate, Some(75.0));
        assert_eq!(summary.points.len(), 2);
    }

    #[test]
    fn history_totals_do_not_overflow() {
        let points = vec![
            ExecutionHistoryPoint { date: "d1".to_string(), successful: u32::MAX, failed: 0 },
            ExecutionHistoryPoint { date: "d2".to_string(), successful: 0, failed: 1 },
        ];
        let summary = summarize_history(&points);
        assert_eq!(summary.total_successful, u64::from(u32::MAX));
        assert_eq!(summary.total_failed, 1);
        assert!(summary.success_rate.is_some_and(|rate| rate < 100.0));
    }
}
