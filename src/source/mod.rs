//! Work item lookup. The resolver takes any [`WorkItemSource`], so the
//! tracking service client, a records file, or a test closure all fit.

pub mod file;
pub mod memory;

pub use file::FileSource;
pub use memory::MemorySource;

use crate::error::SourceError;
use crate::model::{TestCaseRecord, WorkItemId};

pub trait WorkItemSource {
    /// Blocks until the work item is available or the lookup fails.
    fn fetch(&self, id: WorkItemId) -> Result<TestCaseRecord, SourceError>;
}

impl<F> WorkItemSource for F
where
    F: Fn(WorkItemId) -> Result<TestCaseRecord, SourceError>,
{
    fn fetch(&self, id: WorkItemId) -> Result<TestCaseRecord, SourceError> {
        self(id)
    }
}
