use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::models::{ExecutionHistoryPoint, Folder, Workflow};

const MOCK_DATA: &str = include_str!("../../fixtures/mock_data.json");

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogDocument {
    #[serde(default)]
    folders: Vec<Folder>,
    #[serde(default)]
    workflows: Vec<Workflow>,
    #[serde(default)]
    execution_history: HashMap<String, Vec<ExecutionHistoryPoint>>,
}

/// Read-only store of the records the dashboard shows.
#[derive(Debug, Clone, Default)]
pub struct WorkflowCatalog {
    folders: Vec<Folder>,
    workflows: Vec<Workflow>,
    history: HashMap<String, Vec<ExecutionHistoryPoint>>,
}

impl WorkflowCatalog {
    pub fn from_parts(
        folders: Vec<Folder>,
        workflows: Vec<Workflow>,
        history: HashMap<String, Vec<ExecutionHistoryPoint>>,
    ) -> Result<Self> {
        ensure_unique("folder", folders.iter().map(|f| f.id.as_str()))?;
        ensure_unique("workflow", workflows.iter().map(|w| w.id.as_str()))?;

        let known: HashSet<&str> = folders.iter().map(|f| f.id.as_str()).collect();
        for workflow in &workflows {
            if let Some(folder) = workflow.folder.as_deref() {
                if !known.contains(folder) {
                    log::warn!(
                        "Workflow {} references unknown folder {:?}; it will be shown as uncategorized",
                        workflow.id,
                        folder
                    );
                }
            }
        }

        Ok(Self {
            folders,
            workflows,
            history,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        Self::from_parts(doc.folders, doc.workflows, doc.execution_history)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| DashboardError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json_str(&content)?;
        log::info!(
            "Loaded {} workflows and {} folders from {}",
            catalog.workflows.len(),
            catalog.folders.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Built-in demo data.
    pub fn mock() -> Result<Self> {
        Self::from_json_str(MOCK_DATA)
    }

    pub fn workflows(&self) -> &[Workflow] {
        &self.workflows
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn workflow(&self, id: &str) -> Option<&Workflow> {
        self.workflows.iter().find(|w| w.id == id)
    }

    pub fn folder(&self, id: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == id)
    }

    /// Workflows whose raw folder id matches the selection; all of them
    /// when nothing is selected.
    pub fn filtered(&self, folder: Option<&str>) -> Vec<&Workflow> {
        match folder {
            Some(id) => self
                .workflows
                .iter()
                .filter(|w| w.folder.as_deref() == Some(id))
                .collect(),
            None => self.workflows.iter().collect(),
        }
    }

    /// Member count per known folder id. Folders without members map to 0.
    pub fn folder_counts(&self) -> HashMap<&str, usize> {
        let mut counts: HashMap<&str, usize> =
            self.folders.iter().map(|f| (f.id.as_str(), 0)).collect();
        for workflow in &self.workflows {
            if let Some(count) = workflow.folder.as_deref().and_then(|id| counts.get_mut(id)) {
                *count += 1;
            }
        }
        counts
    }

    pub fn execution_history(&self, workflow_id: &str) -> &[ExecutionHistoryPoint] {
        self.history
            .get(workflow_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn ensure_unique<'a>(kind: &'static str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DashboardError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_catalog_loads() {
        let catalog = WorkflowCatalog::mock().unwrap();
        assert_eq!(catalog.folders().len(), 4);
        assert_eq!(catalog.workflows().len(), 6);
        assert_eq!(catalog.execution_history("1").len(), 7);
        assert!(catalog.execution_history("6").is_empty());
    }

    #[test]
    fn filtered_matches_raw_folder_id() {
        let catalog = WorkflowCatalog::mock().unwrap();
        let marketing: Vec<&str> = catalog
            .filtered(Some("marketing"))
            .iter()
            .map(|w| w.id.as_str())
            .collect();
        assert_eq!(marketing, vec!["1", "4", "6"]);
        assert_eq!(catalog.filtered(None).len(), 6);
        assert!(catalog.filtered(Some("nope")).is_empty());
    }

    #[test]
    fn folder_counts_cover_every_folder() {
        let catalog = WorkflowCatalog::mock().unwrap();
        let counts = catalog.folder_counts();
        assert_eq!(counts["marketing"], 3);
        assert_eq!(counts["operations"], 2);
        assert_eq!(counts["sales"], 1);
        assert_eq!(counts["all"], 0);
    }

    #[test]
    fn duplicate_workflow_ids_are_rejected() {
        let json = r#"{
            "workflows": [
                {"id":"1","name":"a","status":"active","lastRun":"2023-01-01T00:00:00Z","executionCount":1,"errorRate":0},
                {"id":"1","name":"b","status":"active","lastRun":"2023-01-01T00:00:00Z","executionCount":1,"errorRate":0}
            ]
        }"#;
        let err = WorkflowCatalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, DashboardError::DuplicateId { kind: "workflow", .. }));
    }

    #[test]
    fn malformed_fixture_is_an_error() {
        let err = WorkflowCatalog::from_json_str("{\"workflows\": 3}").unwrap_err();
        assert!(matches!(err, DashboardError::Fixture(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = WorkflowCatalog::from_path(Path::new("/nonexistent/fixture.json")).unwrap_err();
        assert!(matches!(err, DashboardError::Io { .. }));
    }

    #[test]
    fn empty_document_is_empty_catalog() {
        let catalog = WorkflowCatalog::from_json_str("{}").unwrap();
        assert!(catalog.workflows().is_empty());
        assert!(catalog.workflow("1").is_none());
    }
}
