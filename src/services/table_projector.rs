use std::cmp::Ordering;
use std::collections::HashMap;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::{
    ColumnHeader, ExpansionState, Folder, GroupKey, SortDirection, SortField, SortState,
    TableProjection, TableRow, Workflow,
};

/// Turns workflow and folder records into the grouped, sorted row list the
/// list view renders. Built once per folder set; `project` is pure and is
/// re-run on every interaction.
pub struct TableProjector<'a> {
    folders: &'a [Folder],
    by_id: HashMap<&'a str, &'a Folder>,
    uncategorized_label: &'a str,
}

impl<'a> TableProjector<'a> {
    pub fn new(folders: &'a [Folder], uncategorized_label: &'a str) -> Self {
        let by_id = folders.iter().map(|f| (f.id.as_str(), f)).collect();
        Self {
            folders,
            by_id,
            uncategorized_label,
        }
    }

    pub fn resolve_folder(&self, workflow: &Workflow) -> Option<&'a Folder> {
        workflow
            .folder
            .as_deref()
            .and_then(|id| self.by_id.get(id).copied())
    }

    /// Dangling folder references land in the uncategorized group.
    pub fn group_key(&self, workflow: &Workflow) -> GroupKey {
        match self.resolve_folder(workflow) {
            Some(folder) => GroupKey::Folder(folder.id.clone()),
            None => GroupKey::Uncategorized,
        }
    }

    pub fn folder_display_name(&self, workflow: &Workflow) -> &'a str {
        self.resolve_folder(workflow)
            .map(|f| f.name.as_str())
            .unwrap_or(self.uncategorized_label)
    }

    fn group_display_name(&self, key: &GroupKey) -> String {
        match key {
            GroupKey::Folder(id) => self
                .by_id
                .get(id.as_str())
                .map(|f| f.name.clone())
                .unwrap_or_else(|| self.uncategorized_label.to_string()),
            GroupKey::Uncategorized => self.uncategorized_label.to_string(),
        }
    }

    pub fn project<'w>(
        &self,
        workflows: &'w [Workflow],
        active_folder: Option<&str>,
        sort: SortState,
        expansion: &ExpansionState,
    ) -> TableProjection<'w> {
        let columns = SortField::ALL
            .iter()
            .map(|&field| ColumnHeader {
                field,
                label: field.label(),
                indicator: sort.indicator_for(field),
            })
            .collect();

        let mut buckets: HashMap<GroupKey, Vec<&'w Workflow>> = HashMap::new();
        for workflow in workflows {
            buckets.entry(self.group_key(workflow)).or_default().push(workflow);
        }

        let order: Vec<GroupKey> = match active_folder {
            Some(id) => vec![GroupKey::Folder(id.to_string())],
            None => self
                .folders
                .iter()
                .map(|f| GroupKey::Folder(f.id.clone()))
                .chain(std::iter::once(GroupKey::Uncategorized))
                .collect(),
        };

        let mut rows = Vec::new();
        for key in order {
            // `remove` also keeps a repeated folder id from emitting twice.
            let Some(mut members) = buckets.remove(&key) else {
                continue;
            };
            if members.is_empty() {
                continue;
            }
            self.sort_members(&mut members, sort);

            let expanded = expansion.is_expanded(&key);
            rows.push(TableRow::GroupHeader {
                display_name: self.group_display_name(&key),
                member_count: members.len(),
                expanded,
                group_key: key,
            });
            if expanded {
                rows.extend(members.into_iter().map(|workflow| TableRow::WorkflowRow {
                    resolved_folder_display_name: self.folder_display_name(workflow).to_string(),
                    workflow,
                }));
            }
        }

        log::debug!(
            "Projected {} workflows into {} rows (filter: {:?}, sort: {:?})",
            workflows.len(),
            rows.len(),
            active_folder,
            sort
        );

        TableProjection { columns, rows }
    }

    /// Stable, so ties keep their input order in both directions.
    fn sort_members(&self, members: &mut [&Workflow], sort: SortState) {
        let SortState::Active { field, direction } = sort else {
            return;
        };
        members.sort_by(|a, b| {
            let ordering = self.compare(a, b, field);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    fn compare(&self, a: &Workflow, b: &Workflow, field: SortField) -> Ordering {
        match field {
            SortField::Name => collate(&a.name, &b.name),
            SortField::Status => collate(a.status.as_str(), b.status.as_str()),
            SortField::Folder => collate(self.folder_display_name(a), self.folder_display_name(b)),
            SortField::LastRun => a.last_run.cmp(&b.last_run),
            SortField::ExecutionCount => a.execution_count.cmp(&b.execution_count),
            SortField::ErrorRate => a.error_rate.total_cmp(&b.error_rate),
        }
    }
}

/// Locale-style ordering: base letters first (accents and case ignored),
/// then unaccented before accented, then lowercase before uppercase.
pub fn collate(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| {
            for (x, y) in a.chars().zip(b.chars()) {
                if x != y {
                    return match (x.is_lowercase(), y.is_lowercase()) {
                        (true, false) => Ordering::Less,
                        (false, true) => Ordering::Greater,
                        _ => x.cmp(&y),
                    };
                }
            }
            a.len().cmp(&b.len())
        })
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().filter(|c| !is_combining_mark(*c)).flat_map(char::to_lowercase)
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}
