pub mod commands;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

pub use error::DashboardError;
pub use services::catalog::WorkflowCatalog;
pub use services::table_projector::TableProjector;
pub use state::{AppState, DashboardSession};
