use thiserror::Error;

use super::{PayloadError, SourceError};
use crate::model::WorkItemId;

/// Terminal failure of a single resolution. Every variant names the test case.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("work item {id} is not a Test Case (found '{work_item_type}')")]
    NotATestCase {
        id: WorkItemId,
        work_item_type: String,
    },

    #[error("unable to find parameter data in test case {id}")]
    MissingParameterData { id: WorkItemId },

    #[error("unrecognized parameter data format in test case {id}")]
    UnrecognizedFormat { id: WorkItemId },

    #[error("malformed inline table in test case {id}: {message}")]
    MalformedTable { id: WorkItemId, message: String },

    #[error("malformed shared parameter reference in test case {id}: {message}")]
    MalformedReference { id: WorkItemId, message: String },

    #[error("malformed shared parameter data set {data_set_id} (test case {id}): {message}")]
    MalformedDataSet {
        id: WorkItemId,
        data_set_id: WorkItemId,
        message: String,
    },

    #[error("column '{column}' not found in shared parameter data set {data_set_id} (test case {id})")]
    ColumnNotFound {
        id: WorkItemId,
        data_set_id: WorkItemId,
        column: String,
    },

    #[error("failed to fetch work item {work_item} (test case {id}): {source}")]
    Fetch {
        id: WorkItemId,
        work_item: WorkItemId,
        source: SourceError,
    },
}

impl ResolveError {
    pub fn not_a_test_case(id: WorkItemId, work_item_type: impl Into<String>) -> Self {
        Self::NotATestCase {
            id,
            work_item_type: work_item_type.into(),
        }
    }

    pub fn missing_parameter_data(id: WorkItemId) -> Self {
        Self::MissingParameterData { id }
    }

    pub fn unrecognized_format(id: WorkItemId) -> Self {
        Self::UnrecognizedFormat { id }
    }

    pub fn column_not_found(
        id: WorkItemId,
        data_set_id: WorkItemId,
        column: impl Into<String>,
    ) -> Self {
        Self::ColumnNotFound {
            id,
            data_set_id,
            column: column.into(),
        }
    }

    pub fn fetch(id: WorkItemId, work_item: WorkItemId, source: SourceError) -> Self {
        Self::Fetch {
            id,
            work_item,
            source,
        }
    }

    /// Attaches ids to a parser failure on the test case's own payload.
    pub fn from_payload(id: WorkItemId, err: PayloadError) -> Self {
        match err {
            PayloadError::MalformedTable { message } => Self::MalformedTable { id, message },
            PayloadError::MalformedReference { message } => {
                Self::MalformedReference { id, message }
            }
            PayloadError::MissingParameterMap => Self::MissingParameterData { id },
            PayloadError::MalformedDataSet { message } => Self::MalformedDataSet {
                id,
                data_set_id: id,
                message,
            },
        }
    }

    /// Attaches ids to a failure parsing the shared data set record.
    pub fn from_data_set(id: WorkItemId, data_set_id: WorkItemId, err: PayloadError) -> Self {
        match err {
            PayloadError::MalformedDataSet { message } => Self::MalformedDataSet {
                id,
                data_set_id,
                message,
            },
            other => Self::from_payload(id, other),
        }
    }

    /// The test case this resolution was started for.
    pub fn test_case_id(&self) -> WorkItemId {
        match self {
            Self::NotATestCase { id, .. }
            | Self::MissingParameterData { id }
            | Self::UnrecognizedFormat { id }
            | Self::MalformedTable { id, .. }
            | Self::MalformedReference { id, .. }
            | Self::MalformedDataSet { id, .. }
            | Self::ColumnNotFound { id, .. }
            | Self::Fetch { id, .. } => *id,
        }
    }

    pub fn data_set_id(&self) -> Option<WorkItemId> {
        match self {
            Self::MalformedDataSet { data_set_id, .. }
            | Self::ColumnNotFound { data_set_id, .. } => Some(*data_set_id),
            Self::Fetch { id, work_item, .. } if id != work_item => Some(*work_item),
            _ => None,
        }
    }
}
