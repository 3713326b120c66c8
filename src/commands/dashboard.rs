use crate::models::{SidebarEntry, Theme, ViewMode};
use crate::services::dashboard::{build_sidebar, panel_title};
use crate::services::table_state;
use crate::state::AppState;

pub fn get_folders(state: &AppState) -> Result<Vec<SidebarEntry>, String> {
    let session = state.session()?;
    Ok(build_sidebar(&state.catalog, session.selected_folder.as_deref()))
}

/// `None` shows every workflow. Selecting a folder also opens its group.
pub fn select_folder(state: &AppState, folder_id: Option<String>) -> Result<(), String> {
    let mut session = state.session()?;
    if let Some(id) = folder_id.as_deref() {
        if state.catalog.folder(id).is_none() {
            log::warn!("Selected folder {:?} is not in the catalog", id);
        }
    }
    let expansion = std::mem::take(&mut session.expansion);
    session.expansion = table_state::select_folder(expansion, folder_id.as_deref());
    session.selected_folder = folder_id;
    Ok(())
}

pub fn get_panel_title(state: &AppState) -> Result<String, String> {
    let session = state.session()?;
    Ok(panel_title(state.catalog.folders(), session.selected_folder.as_deref()))
}

pub fn set_view_mode(state: &AppState, mode: ViewMode) -> Result<ViewMode, String> {
    let mut session = state.session()?;
    session.view_mode = mode;
    Ok(session.view_mode)
}

pub fn toggle_theme(state: &AppState) -> Result<Theme, String> {
    let mut session = state.session()?;
    session.theme = session.theme.toggled();
    Ok(session.theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::workflow::get_workflow_table;
    use crate::models::{GroupKey, Settings, TableRow};
    use crate::services::catalog::WorkflowCatalog;

    fn app() -> AppState {
        AppState::new(WorkflowCatalog::mock().unwrap(), Settings::default())
    }

    #[test]
    fn selecting_folder_filters_and_expands() {
        let state = app();
        select_folder(&state, Some("operations".to_string())).unwrap();
        let table = get_workflow_table(&state).unwrap();
        assert_eq!(table.rows.len(), 3);
        assert!(matches!(
            &table.rows[0],
            TableRow::GroupHeader { group_key: GroupKey::Folder(id), expanded: true, member_count: 2, .. } if id == "operations"
        ));
        assert_eq!(get_panel_title(&state).unwrap(), "Operations Workflows");

        let sidebar = get_folders(&state).unwrap();
        let selected: Vec<_> = sidebar.iter().filter(|e| e.selected).collect();
        assert_eq!(selected[0].name, "Operations");
    }

    #[test]
    fn clearing_selection_keeps_expansion() {
        let state = app();
        select_folder(&state, Some("sales".to_string())).unwrap();
        select_folder(&state, None).unwrap();
        let session = state.session().unwrap();
        assert!(session.selected_folder.is_none());
        assert!(session.expansion.is_expanded(&GroupKey::Folder("sales".to_string())));
    }

    #[test]
    fn theme_and_view_mode() {
        let state = app();
        assert_eq!(toggle_theme(&state).unwrap(), Theme::Light);
        assert_eq!(set_view_mode(&state, ViewMode::List).unwrap(), ViewMode::List);
    }
}
