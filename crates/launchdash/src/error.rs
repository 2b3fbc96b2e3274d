//! Error types for launchdash.
//!
//! Queries over the dataset never fail; everything here belongs to the edges
//! of the system: reading the CSV, loading configuration, parsing control
//! values that arrive as text, and running the HTTP server.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for launchdash operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Dataset Errors ===
    /// Failed to open the dataset file.
    #[error("failed to open dataset at {path}: {source}")]
    DatasetOpen {
        /// Path to the CSV file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A row of the dataset could not be deserialized.
    #[error("failed to parse dataset row at line {line}: {message}")]
    DatasetParse {
        /// 1-based line number in the CSV source (0 if unknown).
        line: u64,
        /// Description of what went wrong.
        message: String,
    },

    /// A row parsed but violates a record invariant.
    #[error("invalid launch record at line {line}: {message}")]
    InvalidRecord {
        /// 1-based line number in the CSV source.
        line: u64,
        /// Description of the violated invariant.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Dashboard Errors ===
    /// A control value could not be interpreted.
    #[error("invalid control value: {message}")]
    InvalidSelection {
        /// Description of the bad input.
        message: String,
    },

    /// A second callback was registered for an output that already has one.
    #[error("a callback is already registered for output '{output}'")]
    DuplicateCallback {
        /// Id of the chart output.
        output: &'static str,
    },

    // === Server Errors ===
    /// The HTTP server failed.
    #[error("server error: {message}")]
    Server {
        /// Description of what went wrong.
        message: String,
    },

    // === I/O Errors ===
    /// File system or socket operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for launchdash operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map_or(0, csv::Position::line);
        Self::DatasetParse {
            line,
            message: err.to_string(),
        }
    }
}

impl Error {
    /// Create an invalid selection error.
    #[must_use]
    pub fn invalid_selection(message: impl Into<String>) -> Self {
        Self::InvalidSelection {
            message: message.into(),
        }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_selection("low bound is not a number");
        assert_eq!(
            err.to_string(),
            "invalid control value: low bound is not a number"
        );

        let err = Error::server("address in use");
        assert_eq!(err.to_string(), "server error: address in use");
    }

    #[test]
    fn test_dataset_open_error_display() {
        let err = Error::DatasetOpen {
            path: PathBuf::from("/nonexistent/launches.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/nonexistent/launches.csv"));
    }

    #[test]
    fn test_invalid_record_display() {
        let err = Error::InvalidRecord {
            line: 7,
            message: "payload mass must not be negative".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid launch record at line 7: payload mass must not be negative"
        );
    }

    #[test]
    fn test_duplicate_callback_display() {
        let err = Error::DuplicateCallback {
            output: "success-pie-chart",
        };
        assert!(err.to_string().contains("success-pie-chart"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "slider step must be greater than 0".to_string(),
        };
        assert!(err.to_string().contains("slider step"));
    }

    #[test]
    fn test_from_csv_error_carries_line() {
        let data = "Launch Site,class\nKSC LC-39A,not-a-number\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let result: std::result::Result<Vec<(String, u8)>, csv::Error> =
            reader.deserialize().collect();
        let err: Error = result.unwrap_err().into();
        match err {
            Error::DatasetParse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("address in use"));
    }
}
