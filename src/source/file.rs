use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, trace};

use super::{MemorySource, WorkItemSource};
use crate::error::SourceError;
use crate::model::{TestCaseRecord, WorkItemId};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordsFile {
    #[serde(default)]
    work_items: Vec<TestCaseRecord>,
}

/// Work items loaded from a JSON or YAML records file, standing in for the
/// tracking service.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    records: MemorySource,
}

impl FileSource {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let path = path.as_ref();
        trace!(path = %path.display(), "loading records file");

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let content = fs::read_to_string(path).map_err(|e| SourceError::read_error(path, e))?;

        let file: RecordsFile = match extension {
            "json" => serde_json::from_str(&content)
                .map_err(|e| SourceError::parse_error(path, e.to_string()))?,
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .map_err(|e| SourceError::parse_error(path, e.to_string()))?,
            _ => return Err(SourceError::unsupported_format(extension)),
        };

        debug!(count = file.work_items.len(), "loaded work items");
        Ok(Self {
            records: MemorySource::from_records(file.work_items),
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl WorkItemSource for FileSource {
    fn fetch(&self, id: WorkItemId) -> Result<TestCaseRecord, SourceError> {
        self.records.fetch(id)
    }
}
