use indexmap::IndexMap;
use serde::Serialize;

use crate::model::{ParameterRow, WorkItemId};

/// One resolved row as the host sees it: its bindings plus the label it is
/// reported under.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowReport {
    pub id: WorkItemId,
    pub title: String,
    pub display_name: String,
    pub parameters: IndexMap<String, String>,
}

impl RowReport {
    pub fn from_row(row: &ParameterRow, method: &str) -> Self {
        RowReport {
            id: row.id,
            title: row.title.clone(),
            display_name: row.display_name(method),
            parameters: row.parameters.clone(),
        }
    }
}
