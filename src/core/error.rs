//! Error handling and error types for Hoeffding Rust.
//!
//! Construction and persistence failures are reported through
//! [`HoeffdingError`]. Per-example problems during training (missing values,
//! NaN targets, non-positive weights) are never errors: the observation is
//! skipped instead.

use std::io;
use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum HoeffdingError {
    /// Configuration and validation errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// A feature name that is not part of the model
    #[error("Unknown feature: {name:?}")]
    UnknownFeature { name: String },

    /// A feature whose kind or strategy cannot be used in this position
    #[error("Unsupported feature {name:?}: {reason}")]
    UnsupportedFeature { name: String, reason: String },

    /// Model serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// A field tag that is not part of the tree stream
    #[error("Unexpected field tag {tag}")]
    UnexpectedField { tag: u64 },

    /// A known field tag carrying the wrong wire type
    #[error("Field {tag} has wire type {actual}, expected {expected}")]
    WireType { tag: u64, expected: u8, actual: u8 },

    /// File I/O errors
    #[error("I/O error: {source}")]
    IO {
        #[from]
        source: io::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// Bincode serialization errors
    #[error("Bincode error: {source}")]
    Bincode {
        #[from]
        source: bincode::Error,
    },
}

/// Type alias for Results using HoeffdingError
pub type Result<T> = std::result::Result<T, HoeffdingError>;

impl HoeffdingError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        HoeffdingError::Config {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        HoeffdingError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown feature error
    pub fn unknown_feature<S: Into<String>>(name: S) -> Self {
        HoeffdingError::UnknownFeature { name: name.into() }
    }

    /// Create an unsupported feature error
    pub fn unsupported_feature<N, R>(name: N, reason: R) -> Self
    where
        N: Into<String>,
        R: Into<String>,
    {
        HoeffdingError::UnsupportedFeature {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        HoeffdingError::Serialization {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable.
    ///
    /// Decoding errors leave a partially read tree behind which callers must
    /// discard, so none of them are recoverable.
    pub fn is_recoverable(&self) -> bool {
        match self {
            HoeffdingError::Config { .. } => false,
            HoeffdingError::InvalidParameter { .. } => false,
            HoeffdingError::UnknownFeature { .. } => false,
            HoeffdingError::UnsupportedFeature { .. } => false,
            HoeffdingError::Serialization { .. } => false,
            HoeffdingError::UnexpectedField { .. } => false,
            HoeffdingError::WireType { .. } => false,
            HoeffdingError::IO { source } => matches!(
                source.kind(),
                io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
            ),
            HoeffdingError::Json { .. } => false,
            HoeffdingError::Bincode { .. } => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            HoeffdingError::Config { .. } => "config",
            HoeffdingError::InvalidParameter { .. } => "invalid_parameter",
            HoeffdingError::UnknownFeature { .. } => "unknown_feature",
            HoeffdingError::UnsupportedFeature { .. } => "unsupported_feature",
            HoeffdingError::Serialization { .. } => "serialization",
            HoeffdingError::UnexpectedField { .. } => "unexpected_field",
            HoeffdingError::WireType { .. } => "wire_type",
            HoeffdingError::IO { .. } => "io",
            HoeffdingError::Json { .. } => "json",
            HoeffdingError::Bincode { .. } => "bincode",
        }
    }
}

/// Convenience macros for error creation
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::core::error::HoeffdingError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::HoeffdingError::config(format!($fmt, $($arg)*))
    };
}

/// Create a serialization error, with optional formatting
#[macro_export]
macro_rules! serialization_error {
    ($msg:expr) => {
        $crate::core::error::HoeffdingError::serialization($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::HoeffdingError::serialization(format!($fmt, $($arg)*))
    };
}

/// Return early with the given error unless the condition holds
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}
