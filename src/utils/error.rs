use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Pricing payload error: {message}")]
    PayloadError { message: String },

    #[error("No rate at program {program_index}, rate {rate_index}")]
    SelectionOutOfRange {
        program_index: usize,
        rate_index: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Data,
    Selection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl QuoteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            QuoteError::IoError(_) => ErrorCategory::Io,
            QuoteError::ConfigValidationError { .. }
            | QuoteError::InvalidConfigValueError { .. }
            | QuoteError::MissingConfigError { .. } => ErrorCategory::Configuration,
            QuoteError::SerializationError(_)
            | QuoteError::CsvError(_)
            | QuoteError::PayloadError { .. } => ErrorCategory::Data,
            QuoteError::SelectionOutOfRange { .. } => ErrorCategory::Selection,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Selection => ErrorSeverity::Low,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            QuoteError::IoError(e) => format!("Could not read or write a file: {}", e),
            QuoteError::SerializationError(e) => {
                format!("The pricing response is not valid JSON: {}", e)
            }
            QuoteError::CsvError(e) => format!("Could not write the CSV report: {}", e),
            QuoteError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            QuoteError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            QuoteError::MissingConfigError { field } => {
                format!("Configuration value '{}' is required", field)
            }
            QuoteError::PayloadError { message } => {
                format!("The pricing response has an unexpected shape: {}", message)
            }
            QuoteError::SelectionOutOfRange { .. } => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "Check that the input file exists and the output directory is writable",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags and run again",
            ErrorCategory::Data => "Make sure the input is the JSON array returned by the pricing endpoint",
            ErrorCategory::Selection => "Pick a program and rate index from the current result set",
        }
    }
}

pub type Result<T> = std::result::Result<T, QuoteError>;
