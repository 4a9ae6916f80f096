//! Test Case Parameters
//!
//! Resolves a test case work item into the ordered parameter rows a
//! data-driven test runner iterates, whether the data is stored inline on the
//! test case or on a shared parameter work item it references.

pub mod cli;
pub mod error;
pub mod logging;
pub mod model;
pub mod output;
pub mod parser;
pub mod resolver;
pub mod sniffer;
pub mod source;

pub use error::{PayloadError, ResolveError, SourceError};
pub use model::{ParameterRow, TestCaseRecord, WorkItemId, TEST_CASE};
pub use resolver::ParameterResolver;
pub use sniffer::{classify, PayloadFormat};
pub use source::{FileSource, MemorySource, WorkItemSource};
