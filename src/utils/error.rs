use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Io,
    Data,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Bad invocation; nothing was read.
    Medium,
    /// The run was aborted on its input or output.
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl EtlError {
    pub fn processing(message: impl Into<String>) -> Self {
        EtlError::ProcessingError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::InvalidConfigValueError { .. } | EtlError::ConfigValidationError { .. } => {
                ErrorCategory::Configuration
            }
            EtlError::IoError(_) => ErrorCategory::Io,
            EtlError::CsvError(e) if e.is_io_error() => ErrorCategory::Io,
            EtlError::CsvError(_) | EtlError::ProcessingError { .. } => ErrorCategory::Data,
            EtlError::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Io | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                format!("File not found: {}", e)
            }
            EtlError::IoError(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                format!("Permission denied: {}", e)
            }
            EtlError::CsvError(e) => format!("Could not read the CSV table: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the command-line flags and the --config file (see --help)"
            }
            ErrorCategory::Io => "Check that the input file exists and the output directory is writable",
            ErrorCategory::Data => {
                "Make sure the input is a comma-delimited file with a header row and consistent field counts"
            }
            ErrorCategory::Internal => "Re-run with --verbose and report the log output",
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_is_high_severity() {
        let err = EtlError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "input.csv",
        ));
        assert_eq!(err.category(), ErrorCategory::Io);
        assert_eq!(err.severity().exit_code(), 1);
        assert!(err.user_friendly_message().starts_with("File not found"));
    }

    #[test]
    fn test_config_errors_exit_with_usage_code() {
        let err = EtlError::InvalidConfigValueError {
            field: "date_formats".to_string(),
            value: "%Q".to_string(),
            reason: "bad pattern".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity().exit_code(), 2);
        assert!(err.to_string().contains("date_formats"));
    }

    #[test]
    fn test_processing_error_is_data_category() {
        let err = EtlError::processing("row 3 has 5 fields");
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }
}
