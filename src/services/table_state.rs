use crate::models::{ExpansionState, GroupKey, SortDirection, SortField, SortState};

/// Column header click: a new column starts ascending, then the same
/// column goes descending, then back to unsorted.
pub fn toggle_sort(state: SortState, column: SortField) -> SortState {
    match state {
        SortState::Active { field, direction } if field == column => match direction {
            SortDirection::Ascending => SortState::active(column, SortDirection::Descending),
            SortDirection::Descending => SortState::Unsorted,
        },
        _ => SortState::active(column, SortDirection::Ascending),
    }
}

/// Group header click.
pub fn toggle_expansion(mut state: ExpansionState, key: &GroupKey) -> ExpansionState {
    let expanded = state.is_expanded(key);
    state.set(key.clone(), !expanded);
    state
}

/// Sidebar selection. Opens the selected folder's group and leaves every
/// other stored flag alone.
pub fn select_folder(mut state: ExpansionState, folder: Option<&str>) -> ExpansionState {
    if let Some(id) = folder {
        state.set(GroupKey::Folder(id.to_string()), true);
    }
    state
}

/// State for a freshly mounted table: everything collapsed except the
/// active filter's group.
pub fn initial_expansion(active_folder: Option<&str>) -> ExpansionState {
    select_folder(ExpansionState::default(), active_folder)
}
