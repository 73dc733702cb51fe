use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Which stage of the pipeline asked for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Filter,
    Sort,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRole::Filter => write!(f, "filter"),
            ColumnRole::Sort => write!(f, "sort"),
        }
    }
}

/// Every way a single run can fail. All of them abort the run with no output.
#[derive(Debug, Error)]
pub enum SiftError {
    #[error("both -filter and -value must be specified")]
    MissingArgument,

    #[error("{role} column not found: {name}")]
    ColumnNotFound { role: ColumnRole, name: String },

    #[error("unsupported sort type: {0}")]
    UnsupportedSortDirection(String),

    #[error("unsupported sort mode: {0}")]
    UnsupportedSortMode(String),

    #[error("numeric sort requested but {}", describe_bad_value(.value))]
    NumericValidationFailed { value: String },

    #[error("opening {}", .path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("reading CSV input")]
    InputParse(#[source] csv::Error),

    #[error("writing CSV output")]
    OutputWrite(#[source] csv::Error),

    #[error("writing output")]
    OutputIo(#[source] io::Error),
}

fn describe_bad_value(value: &str) -> String {
    if value.is_empty() {
        "empty value found".to_string()
    } else {
        format!("non-numeric value found: {value}")
    }
}

pub type Result<T> = std::result::Result<T, SiftError>;
