use crate::error::DashboardError;
use crate::models::{GroupKey, SortField, SortState, TableProjection, WorkflowCard, WorkflowDetails};
use crate::services::dashboard::{build_cards, build_details};
use crate::services::table_projector::TableProjector;
use crate::services::table_state;
use crate::state::AppState;

pub fn get_workflow_table(state: &AppState) -> Result<TableProjection<'_>, String> {
    let session = state.session()?;
    let projector = TableProjector::new(
        state.catalog.folders(),
        &state.settings.table.uncategorized_label,
    );
    Ok(projector.project(
        state.catalog.workflows(),
        session.selected_folder.as_deref(),
        session.sort,
        &session.expansion,
    ))
}

/// Unknown column names leave the sort untouched.
pub fn toggle_sort(state: &AppState, column: &str) -> Result<SortState, String> {
    let mut session = state.session()?;
    match SortField::parse(column) {
        Some(field) => {
            session.sort = table_state::toggle_sort(session.sort, field);
            log::debug!("Sort is now {:?}", session.sort);
        }
        None => log::warn!("Ignoring sort on unknown column {:?}", column),
    }
    Ok(session.sort)
}

/// Returns the group's new expanded flag.
pub fn toggle_folder(state: &AppState, group_key: &str) -> Result<bool, String> {
    let mut session = state.session()?;
    let key = GroupKey::parse(group_key);
    let expansion = std::mem::take(&mut session.expansion);
    session.expansion = table_state::toggle_expansion(expansion, &key);
    Ok(session.expansion.is_expanded(&key))
}

pub fn get_workflow_cards(state: &AppState) -> Result<Vec<WorkflowCard>, String> {
    let session = state.session()?;
    let workflows = state.catalog.filtered(session.selected_folder.as_deref());
    Ok(build_cards(workflows, state.catalog.folders(), &state.settings))
}

pub fn open_workflow(state: &AppState, workflow_id: &str) -> Result<WorkflowDetails, String> {
    let workflow = state
        .catalog
        .workflow(workflow_id)
        .ok_or_else(|| DashboardError::UnknownWorkflow(workflow_id.to_string()).to_string())?;
    state.session()?.selected_workflow = Some(workflow.id.clone());
    Ok(build_details(
        workflow,
        state.catalog.execution_history(&workflow.id),
        chrono::Utc::now(),
        &state.settings,
    ))
}

pub fn close_workflow(state: &AppState) -> Result<(), String> {
    state.session()?.selected_workflow = None;
    Ok(())
}

pub fn get_workflow_details(state: &AppState) -> Result<WorkflowDetails, String> {
    let selected = state
        .session()?
        .selected_workflow
        .clone()
        .ok_or_else(|| DashboardError::NoWorkflowSelected.to_string())?;
    let workflow = state
        .catalog
        .workflow(&selected)
        .ok_or_else(|| DashboardError::UnknownWorkflow(selected.clone()).to_string())?;
    Ok(build_details(
        workflow,
        state.catalog.execution_history(&selected),
        chrono::Utc::now(),
        &state.settings,
    ))
}
