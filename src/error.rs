//! Error types for the Take-Home Pay Engine.
//!
//! The calculation pipeline itself is total and never fails. Errors only
//! arise while loading or validating reference tables, and while validating
//! caller input at the API boundary.

use thiserror::Error;

/// The main error type for the Take-Home Pay Engine.
///
/// # Example
///
/// ```
/// use take_home_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/prefectures.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/prefectures.yaml"
/// );
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

    /// A reference table is structurally invalid (gaps, overlaps, no
    /// unbounded final entry, duplicate codes, ...).
    #[error("Invalid table '{table}': {message}")]
    InvalidTable {
        /// The table that failed validation.
        table: String,
        /// A description of what made the table invalid.
        message: String,
    },

    /// Caller-supplied input violated a precondition.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

impl EngineError {
    pub(crate) fn invalid_table(table: &str, message: impl Into<String>) -> Self {
        EngineError::InvalidTable {
            table: table.to_string(),
            message: message.into(),
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
    fn test_invalid_table_displays_table_and_message() {
        let error = EngineError::invalid_table("remuneration_grades", "gap at 63000");
        assert_eq!(
            error.to_string(),
            "Invalid table 'remuneration_grades': gap at 63000"
        );
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::InvalidInput {
            field: "monthly_salary".to_string(),
            message: "must be greater than zero".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid input field 'monthly_salary': must be greater than zero"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_table() -> EngineResult<()> {
            Err(EngineError::invalid_table("income_tax", "empty"))
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_table()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
