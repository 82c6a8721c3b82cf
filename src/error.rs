//! Error types for the Gratuity Engine.
//!
//! The allocation functions themselves are total and never fail. Errors only
//! come from the surfaces around them: configuration loading, closing an
//! event, normalizing stored records, the event registry and export.

use thiserror::Error;

/// The main error type for the Gratuity Engine.
///
/// # Example
///
/// ```
/// use gratuity_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/restaurant.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/restaurant.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A required event field was blank when closing an event.
    #[error("Missing required event field: {field}")]
    MissingEventField {
        /// The name of the blank field.
        field: String,
    },

    /// A stored closed-event record could not be normalized.
    #[error("Invalid closed event record: {message}")]
    InvalidRecord {
        /// A description of what was wrong with the record.
        message: String,
    },

    /// No closed event exists with the given report id.
    #[error("Closed event not found: {report_id}")]
    EventNotFound {
        /// The report id that was looked up.
        report_id: String,
    },

    /// A closed event with the same report id was already recorded.
    #[error("Closed event already recorded: {report_id}")]
    DuplicateEvent {
        /// The report id that is already taken.
        report_id: String,
    },

    /// A table could not be written out.
    #[error("Export failed: {message}")]
    ExportError {
        /// A description of the export failure.
        message: String,
    },
}

impl From<csv::Error> for EngineError {
    fn from(error: csv::Error) -> Self {
        EngineError::ExportError {
            message: error.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_missing_event_field_displays_field() {
        let error = EngineError::MissingEventField {
            field: "event_name".to_string(),
        };
        assert_eq!(error.to_string(), "Missing required event field: event_name");
    }

    #[test]
    fn test_invalid_record_displays_message() {
        let error = EngineError::InvalidRecord {
            message: "event date is missing".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid closed event record: event date is missing"
        );
    }

    #[test]
    fn test_event_not_found_displays_report_id() {
        let error = EngineError::EventNotFound {
            report_id: "2026-01-04_DINNER_1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Closed event not found: 2026-01-04_DINNER_1"
        );
    }

    #[test]
    fn test_duplicate_event_displays_report_id() {
        let error = EngineError::DuplicateEvent {
            report_id: "2026-01-04_DINNER_1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Closed event already recorded: 2026-01-04_DINNER_1"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_missing_field() -> EngineResult<()> {
            Err(EngineError::MissingEventField {
                field: "event_name".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_missing_field()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
