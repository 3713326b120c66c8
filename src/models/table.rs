use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Workflow;

pub const UNCATEGORIZED_KEY: &str = "uncategorized";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Name,
    Status,
    Folder,
    LastRun,
    ExecutionCount,
    ErrorRate,
}

impl SortField {
    pub const ALL: [SortField; 6] = [
        SortField::Name,
        SortField::Status,
        SortField::Folder,
        SortField::LastRun,
        SortField::ExecutionCount,
        SortField::ErrorRate,
    ];

    /// Accepts the camelCase column ids used on the wire plus their
    /// snake_case and kebab-case spellings. Anything else is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "name" => Some(SortField::Name),
            "status" => Some(SortField::Status),
            "folder" => Some(SortField::Folder),
            "lastRun" | "last_run" | "last-run" => Some(SortField::LastRun),
            "executionCount" | "execution_count" | "execution-count" | "executions" => {
                Some(SortField::ExecutionCount)
            }
            "errorRate" | "error_rate" | "error-rate" => Some(SortField::ErrorRate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Status => "status",
            SortField::Folder => "folder",
            SortField::LastRun => "lastRun",
            SortField::ExecutionCount => "executionCount",
            SortField::ErrorRate => "errorRate",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortField::Name => "Name",
            SortField::Status => "Status",
            SortField::Folder => "Folder",
            SortField::LastRun => "Last Run",
            SortField::ExecutionCount => "Executions",
            SortField::ErrorRate => "Error Rate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "asc" | "ascending" => Some(SortDirection::Ascending),
            "desc" | "descending" => Some(SortDirection::Descending),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortState {
    #[default]
    Unsorted,
    Active {
        field: SortField,
        direction: SortDirection,
    },
}

impl SortState {
    pub fn active(field: SortField, direction: SortDirection) -> Self {
        SortState::Active { field, direction }
    }

    pub fn indicator_for(&self, column: SortField) -> SortIndicator {
        match *self {
            SortState::Active { field, direction } if field == column => match direction {
                SortDirection::Ascending => SortIndicator::Ascending,
                SortDirection::Descending => SortIndicator::Descending,
            },
            _ => SortIndicator::Unsorted,
        }
    }
}

/// Loose `(field, direction)` pair as it arrives from a caller. Unknown
/// or missing parts normalize to [`SortState::Unsorted`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDirective {
    pub field: Option<String>,
    pub direction: Option<String>,
}

impl SortDirective {
    pub fn into_state(self) -> SortState {
        let field = self.field.as_deref().and_then(SortField::parse);
        let direction = self.direction.as_deref().and_then(SortDirection::parse);
        match (field, direction) {
            (Some(field), Some(direction)) => SortState::Active { field, direction },
            _ => SortState::Unsorted,
        }
    }
}

impl From<SortState> for SortDirective {
    fn from(state: SortState) -> Self {
        match state {
            SortState::Unsorted => SortDirective::default(),
            SortState::Active { field, direction } => SortDirective {
                field: Some(field.as_str().to_string()),
                direction: Some(
                    match direction {
                        SortDirection::Ascending => "asc",
                        SortDirection::Descending => "desc",
                    }
                    .to_string(),
                ),
            },
        }
    }
}

impl Serialize for SortState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SortDirective::from(*self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SortState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(SortDirective::deserialize(deserializer)?.into_state())
    }
}

/// Bucket identity: a folder id, or the synthetic group for workflows
/// without a resolvable folder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKey {
    Folder(String),
    Uncategorized,
}

impl GroupKey {
    pub fn parse(raw: &str) -> Self {
        if raw == UNCATEGORIZED_KEY {
            GroupKey::Uncategorized
        } else {
            GroupKey::Folder(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            GroupKey::Folder(id) => id,
            GroupKey::Uncategorized => UNCATEGORIZED_KEY,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Serialize for GroupKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GroupKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(GroupKey::parse(&raw))
    }
}

/// Per-group expand/collapse flags. Groups with no entry are collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionState {
    groups: HashMap<GroupKey, bool>,
}

impl ExpansionState {
    pub fn is_expanded(&self, key: &GroupKey) -> bool {
        self.groups.get(key).copied().unwrap_or(false)
    }

    pub fn set(&mut self, key: GroupKey, expanded: bool) {
        self.groups.insert(key, expanded);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortIndicator {
    Unsorted,
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnHeader {
    pub field: SortField,
    pub label: &'static str,
    pub indicator: SortIndicator,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TableRow<'a> {
    GroupHeader {
        group_key: GroupKey,
        display_name: String,
        member_count: usize,
        expanded: bool,
    },
    WorkflowRow {
        workflow: &'a Workflow,
        resolved_folder_display_name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableProjection<'a> {
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<TableRow<'a>>,
}

impl TableProjection<'_> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
