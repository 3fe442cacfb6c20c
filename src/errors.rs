//! Errors
//!
//! Custom error types used throughout the `debias` crate.
use thiserror::Error;

/// Errors that can occur while auditing or correcting a dataset.
#[derive(Debug, Error)]
pub enum DebiasError {
    /// Row count of the data does not match the target length.
    #[error("Data has {0} rows, but the target vector has {1} values.")]
    DimensionMismatch(usize, usize),
    /// A report entry points at a column that does not exist.
    #[error("Report entry references feature {0}, but the data only has {1} columns.")]
    InvalidFeatureIndex(usize, usize),
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
    /// Invalid value parsing.
    #[error("Invalid value {0} passed for {1}, expected one of {2}.")]
    ParseString(String, String, String),
    /// A pluggable probe model failed to fit or predict.
    #[error("Probe model failure: {0}")]
    ProbeFailure(String),
    /// Unable to write a report to file.
    #[error("Unable to write report to file: {0}")]
    UnableToWrite(String),
    /// Unable to read a report from file.
    #[error("Unable to read report from a file {0}")]
    UnableToRead(String),
}
