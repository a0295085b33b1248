use std::path::PathBuf;
use thiserror::Error;

/// Exit status for validation and I/O failures (`-1` as seen by the shell).
pub const EXIT_FAILURE: i32 = 255;

/// Exit status for a malformed command line.
pub const EXIT_USAGE: i32 = 1;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Usage(String),

    #[error("Error: The label set of vector {line} is empty")]
    EmptyLine { line: usize },

    #[error("Error: The label set of vector {line} contains non-numeric labels")]
    NonNumericLabel { line: usize, token: String },

    #[error("Error: The label set of vector {line} has duplicate labels")]
    DuplicateLabel { line: usize, label: String },

    #[error(
        "Error: The label set of vector {line} has non-positive integer labels, \
         label range should be [1,L] where L is total number of labels"
    )]
    NonPositiveLabel { line: usize, label: String },

    #[error("Error: The label set of vector {line} has label {label} larger than the maximum label id {max}")]
    LabelOutOfRange { line: usize, label: String, max: u64 },

    #[error("Error reading file: {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error reading file: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_) => EXIT_USAGE,
            Error::EmptyLine { .. }
            | Error::NonNumericLabel { .. }
            | Error::DuplicateLabel { .. }
            | Error::NonPositiveLabel { .. }
            | Error::LabelOutOfRange { .. }
            | Error::Open { .. }
            | Error::Io(_) => EXIT_FAILURE,
        }
    }

    /// Stable name of the failure kind, used by the JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Usage(_) => "usage",
            Error::EmptyLine { .. } => "empty_line",
            Error::NonNumericLabel { .. } => "non_numeric_label",
            Error::DuplicateLabel { .. } => "duplicate_label",
            Error::NonPositiveLabel { .. } => "non_positive_label",
            Error::LabelOutOfRange { .. } => "label_out_of_range",
            Error::Open { .. } | Error::Io(_) => "file_io",
        }
    }

    /// 0-based index of the offending line, for per-line failures
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::EmptyLine { line }
            | Error::NonNumericLabel { line, .. }
            | Error::DuplicateLabel { line, .. }
            | Error::NonPositiveLabel { line, .. }
            | Error::LabelOutOfRange { line, .. } => Some(*line),
            Error::Usage(_) | Error::Open { .. } | Error::Io(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
