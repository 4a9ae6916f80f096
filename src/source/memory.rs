use std::collections::HashMap;

use tracing::trace;

use super::WorkItemSource;
use crate::error::SourceError;
use crate::model::{TestCaseRecord, WorkItemId};

/// Work items held in memory, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: HashMap<WorkItemId, TestCaseRecord>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = TestCaseRecord>) -> Self {
        let mut source = Self::new();
        for record in records {
            source.insert(record);
        }
        source
    }

    /// Replaces any record already stored under the same id.
    pub fn insert(&mut self, record: TestCaseRecord) {
        self.records.insert(record.id, record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl WorkItemSource for MemorySource {
    fn fetch(&self, id: WorkItemId) -> Result<TestCaseRecord, SourceError> {
        trace!(id, "fetching work item from memory");
        self.records
            .get(&id)
            .cloned()
            .ok_or_else(|| SourceError::not_found(id))
    }
}
