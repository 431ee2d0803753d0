//! Error kinds for a dump run
//!
//! Every variant is fatal: nothing is caught or recovered inside the crate,
//! the run aborts and the error surfaces at the process boundary.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DumpError>;

#[derive(Debug, Error)]
pub enum DumpError {
    /// Reaching the API or decoding its body failed.
    #[error("failed to fetch cosmetics: {0}")]
    FetchFailure(String),

    /// The API answered, but its `status` field was not 200.
    #[error("unexpected status code while querying cosmetic api: {0}")]
    UnexpectedStatus(serde_json::Number),

    /// A record lacks a field the transformation requires, or has it with the wrong shape.
    #[error("malformed cosmetic at index {index}: {reason} `{path}`")]
    MalformedRecord {
        index: usize,
        path: String,
        reason: &'static str,
    },

    /// A partition key that cannot be used as a file name.
    #[error("partition key {0:?} is not a valid file name")]
    InvalidPartitionKey(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl DumpError {
    pub(crate) fn missing(index: usize, path: impl Into<String>) -> Self {
        DumpError::MalformedRecord {
            index,
            path: path.into(),
            reason: "missing field",
        }
    }

    pub(crate) fn wrong_type(index: usize, path: impl Into<String>) -> Self {
        DumpError::MalformedRecord {
            index,
            path: path.into(),
            reason: "unexpected type for",
        }
    }

    pub(crate) fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        DumpError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<reqwest::Error> for DumpError {
    fn from(err: reqwest::Error) -> Self {
        DumpError::FetchFailure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_record_message() {
        let err = DumpError::missing(3, "variants[0].options");
        assert_eq!(
            err.to_string(),
            "malformed cosmetic at index 3: missing field `variants[0].options`"
        );
    }

    #[test]
    fn test_status_message() {
        let err = DumpError::UnexpectedStatus(503.into());
        assert!(err.to_string().contains("503"));
    }
}
