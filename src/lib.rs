//! labelcheck - Validate multi-label files
//!
//! A label file has one line per vector, each line a comma-separated list
//! of distinct positive label ids. Validation stops at the first bad line.
//! Once the whole file is accepted, adjacent label ids are compared by
//! frequency and a warning is raised wherever a larger id is more frequent
//! than the id before it.
//!
//! # Example
//!
//! ```no_run
//! use labelcheck::validator;
//! use std::path::Path;
//!
//! let report = validator::validate_file(Path::new("base_labels.txt"))?;
//! for warning in &report.warnings {
//!     println!("label {} is more frequent than {}", warning.label, warning.previous_label);
//! }
//! # Ok::<(), labelcheck::error::Error>(())
//! ```

pub mod cli;
pub mod error;
pub mod model;
pub mod validator;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{FrequencyTable, LabelSet, OrderWarning, ValidationReport};
