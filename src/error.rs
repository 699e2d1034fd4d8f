//! Error Types for mathkit
//!
//! Every failure the command line can hit is a variant here. Library code
//! returns these; only the binaries turn them into a process exit.

use std::fmt;

use crate::seed::{MAX_SEED_BITS, MAX_SEED_VALUE_STR};

/// Unified error type for mathkit operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    /// The `-s=` value contains something other than decimal digits
    InvalidSeedFormat(String),
    /// The `-s=` value does not fit in 32 bits
    SeedOverflow(String),
    /// More than one `-s=` option was supplied
    DuplicateSeedOption,
    /// A token that is neither a seed option nor a help flag
    UnrecognizedArgument(String),
    /// Writing to the console failed
    IoError(String),
    /// Invalid benchmark configuration
    ConfigError(String),
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::InvalidSeedFormat(value) => write!(f, "{} is NOT a digit!!!", value),
            MathError::SeedOverflow(value) => write!(
                f,
                "{} is too long, max seed value is {} = 2^{} - 1 !!!",
                value, MAX_SEED_VALUE_STR, MAX_SEED_BITS
            ),
            MathError::DuplicateSeedOption => write!(f, "Multiple seed values inputted!!!"),
            MathError::UnrecognizedArgument(arg) => {
                write!(f, "invalid argument {} detected!!!", arg)
            }
            MathError::IoError(msg) => write!(f, "I/O error: {}", msg),
            MathError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for MathError {}

impl MathError {
    /// Process exit status the binaries report for this error
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Console diagnostic framed by blank lines; only the duplicate-seed error
    /// is printed without indentation.
    pub fn diagnostic(&self) -> String {
        match self {
            MathError::DuplicateSeedOption => format!("\nERROR: {}\n", self),
            _ => format!("\n   ERROR: {}\n", self),
        }
    }
}

/// Result type alias for mathkit operations
pub type Result<T> = std::result::Result<T, MathError>;

impl From<std::io::Error> for MathError {
    fn from(err: std::io::Error) -> Self {
        MathError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for MathError {
    fn from(err: serde_json::Error) -> Self {
        MathError::IoError(format!("JSON error: {}", err))
    }
}
