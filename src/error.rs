//! Error types for the Sociogram engine

use crate::graph::GraphError;
use thiserror::Error;

/// Errors that can occur while turning a rating matrix into a sociogram
#[derive(Error, Debug)]
pub enum SociogramError {
    /// Row/column index sets differ, ids repeat, or the table is ragged
    #[error("Malformed matrix: {reason}")]
    MalformedMatrix { reason: String },

    /// Cell holds a token outside the symbol table
    #[error("Unrecognized rating token {token:?} at row {row:?}, column {column:?}")]
    UnrecognizedRatingToken {
        token: String,
        row: String,
        column: String,
    },

    /// Configuration or category lookup failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Graph construction error
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SociogramError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        SociogramError::MalformedMatrix {
            reason: reason.into(),
        }
    }
}

pub type SociogramResult<T> = Result<T, SociogramError>;
