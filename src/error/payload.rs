use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("malformed inline table: {message}")]
    MalformedTable { message: String },

    #[error("malformed shared parameter reference: {message}")]
    MalformedReference { message: String },

    #[error("shared parameter reference has no parameter mappings")]
    MissingParameterMap,

    #[error("malformed shared parameter data set: {message}")]
    MalformedDataSet { message: String },
}

impl PayloadError {
    pub fn malformed_table(message: impl Into<String>) -> Self {
        Self::MalformedTable {
            message: message.into(),
        }
    }

    pub fn malformed_reference(message: impl Into<String>) -> Self {
        Self::MalformedReference {
            message: message.into(),
        }
    }

    pub fn malformed_data_set(message: impl Into<String>) -> Self {
        Self::MalformedDataSet {
            message: message.into(),
        }
    }
}
