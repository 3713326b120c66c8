use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Please fill in all fields")]
    MissingCredentials,

    #[error("Workflow not found: {0}")]
    UnknownWorkflow(String),

    #[error("No workflow selected")]
    NoWorkflowSelected,

    #[error("Duplicate {kind} id in fixture: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Failed to parse fixture: {0}")]
    Fixture(#[from] serde_json::Error),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DashboardError>;
