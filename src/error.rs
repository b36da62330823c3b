// SPDX-License-Identifier: AGPL-3.0-or-later

//! Error types for Monitoring Plugin

use std::io;
use thiserror::Error;

use crate::thresholds::ThresholdError;

/// Result type alias for monitoring plugin operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Monitoring Plugin
///
/// Validation errors are returned at the call that caused them; the caller
/// decides whether to downgrade the check to UNKNOWN or ignore them.
#[derive(Error, Debug)]
pub enum Error {
    /// Metric name is empty
    #[error("metric name cannot be an empty string")]
    EmptyMetricName,

    /// Metric name contains `=` or `'`
    #[error("metric name can not contain the equal sign or single quote ('): {0}")]
    InvalidMetricName(String),

    /// Label contains `=` or `'`
    #[error("label can not contain the equal sign or single quote ('): {0}")]
    InvalidLabel(String),

    /// Unit contains digits, `;` or quotes
    #[error("unit can not contain numbers, semicolon or quotes: {0}")]
    InvalidUnit(String),

    /// Display bounds are inverted
    #[error("min cannot be larger than max")]
    MinGreaterThanMax,

    /// Value below the display minimum
    #[error("value cannot be smaller than min")]
    ValueBelowMin,

    /// Value above the display maximum
    #[error("value cannot be larger than max")]
    ValueAboveMax,

    /// Threshold ordering or range syntax error
    #[error("invalid thresholds: {0}")]
    Threshold(#[from] ThresholdError),

    /// A point with the same metric and label was already added
    #[error("duplicate metric: {}", describe_key(.metric, .label))]
    DuplicateMetric { metric: String, label: String },

    /// Number could not be parsed
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn describe_key(metric: &str, label: &str) -> String {
    if label.is_empty() {
        format!("'{}'", metric)
    } else {
        format!("'{}' (label '{}')", metric, label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_duplicate_without_label() {
        let err = Error::DuplicateMetric {
            metric: "load".to_string(),
            label: String::new(),
        };
        assert_eq!(err.to_string(), "duplicate metric: 'load'");
    }

    #[test]
    fn test_error_display_duplicate_with_label() {
        let err = Error::DuplicateMetric {
            metric: "disk_usage".to_string(),
            label: "/var".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate metric: 'disk_usage' (label '/var')");
    }

    #[test]
    fn test_error_from_threshold() {
        let err: Error = ThresholdError::WarningRange.into();
        assert_eq!(
            err.to_string(),
            "invalid thresholds: warning min and max are invalid"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file missing");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ invalid json }}}").unwrap_err();
        let err: Error = json_err.into();
        assert!(err.to_string().contains("JSON error"));
    }

    #[test]
    fn test_error_configuration() {
        let err = Error::Configuration("replacement is empty".to_string());
        assert_eq!(err.to_string(), "Configuration error: replacement is empty");
    }
}
