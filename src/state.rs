use std::sync::{Mutex, MutexGuard};

use crate::models::{ApiCredentials, ExpansionState, Settings, SortState, Theme, ViewMode};
use crate::services::catalog::WorkflowCatalog;
use crate::services::table_state::initial_expansion;
use crate::utils::config::default_credentials;

/// Per-view UI state. Lives as long as the dashboard session.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSession {
    pub selected_folder: Option<String>,
    pub sort: SortState,
    pub expansion: ExpansionState,
    pub view_mode: ViewMode,
    pub theme: Theme,
    pub selected_workflow: Option<String>,
    pub credentials: Option<ApiCredentials>,
}

impl DashboardSession {
    pub fn new(settings: &Settings) -> Self {
        Self {
            selected_folder: None,
            sort: SortState::Unsorted,
            expansion: initial_expansion(None),
            view_mode: settings.general.view_mode,
            theme: settings.general.theme,
            selected_workflow: None,
            credentials: default_credentials(settings),
        }
    }
}

/// Shared state handed to every command.
pub struct AppState {
    pub catalog: WorkflowCatalog,
    pub settings: Settings,
    session: Mutex<DashboardSession>,
}

impl AppState {
    pub fn new(catalog: WorkflowCatalog, settings: Settings) -> Self {
        let session = DashboardSession::new(&settings);
        Self {
            catalog,
            settings,
            session: Mutex::new(session),
        }
    }

    pub fn session(&self) -> Result<MutexGuard<'_, DashboardSession>, String> {
        self.session.lock().map_err(|e| e.to_string())
    }
}
