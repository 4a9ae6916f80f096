use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Work item type label a record must carry to be resolved.
pub const TEST_CASE: &str = "Test Case";

pub type WorkItemId = u32;

/// A work item as returned by the tracking service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseRecord {
    pub id: WorkItemId,
    pub work_item_type: String,
    #[serde(default)]
    pub title: String,
    /// Inline table XML or a shared reference JSON.
    #[serde(default)]
    pub test_data_source: String,
    /// Shared data set XML, populated on shared parameter work items.
    #[serde(default)]
    pub test_parameters: String,
}

impl TestCaseRecord {
    pub fn new(id: WorkItemId, work_item_type: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            work_item_type: work_item_type.into(),
            title: title.into(),
            test_data_source: String::new(),
            test_parameters: String::new(),
        }
    }

    pub fn with_data_source(mut self, raw: impl Into<String>) -> Self {
        self.test_data_source = raw.into();
        self
    }

    pub fn with_parameters(mut self, raw: impl Into<String>) -> Self {
        self.test_parameters = raw.into();
        self
    }

    pub fn is_test_case(&self) -> bool {
        self.work_item_type == TEST_CASE
    }

    pub fn has_parameter_data(&self) -> bool {
        !self.test_data_source.trim().is_empty() || !self.test_parameters.trim().is_empty()
    }
}

/// One set of name/value bindings handed to a single test execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterRow {
    pub id: WorkItemId,
    pub title: String,
    pub parameters: IndexMap<String, String>,
}

impl ParameterRow {
    pub fn new(id: WorkItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            parameters: IndexMap::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parameters.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.parameters.values().map(String::as_str)
    }

    /// Label rendered by the host, e.g. `login_works (alice,secret)`.
    pub fn display_name(&self, method: &str) -> String {
        let values: Vec<&str> = self.values().collect();
        format!("{method} ({})", values.join(","))
    }
}

/// Pointer from a test case to parameters stored on a shared work item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedReference {
    #[serde(default)]
    pub parameter_map: Vec<ParameterMapping>,
    #[serde(default)]
    pub shared_parameter_data_set_ids: Vec<WorkItemId>,
    #[serde(default)]
    pub row_mapping_type: i32,
}

impl SharedReference {
    /// Only the first data set is ever dereferenced.
    pub fn primary_data_set(&self) -> Option<WorkItemId> {
        self.shared_parameter_data_set_ids.first().copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterMapping {
    #[serde(default)]
    pub local_param_name: String,
    #[serde(default)]
    pub shared_parameter_name: String,
    #[serde(default)]
    pub shared_parameter_data_set_id: WorkItemId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedDataSet {
    pub param_names: Vec<String>,
    pub last_id: Option<String>,
    pub rows: Vec<DataRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataRow {
    pub id: Option<String>,
    pub values: Vec<Kvp>,
}

impl DataRow {
    /// First pair whose decoded key matches exactly.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|kvp| kvp.key == key)
            .map(|kvp| kvp.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kvp {
    pub key: String,
    pub value: String,
}

impl Kvp {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
