//! Error types for sheet-notifier.

use std::fmt;

/// Result type alias for sheet-notifier operations.
pub type Result<T> = std::result::Result<T, NotifierError>;

/// Errors that can occur while loading configuration, polling the sheet,
/// or delivering notifications.
#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    /// Failed to load configuration from a source.
    #[error("Failed to load configuration: {0}")]
    Config(String),

    /// Configuration validation failed.
    #[error("Configuration validation failed: {0}")]
    Validation(String),

    /// The sheet could not be fetched (transport error or non-success status).
    #[error("Failed to fetch sheet: {0}")]
    Fetch(String),

    /// The fetched body could not be parsed as delimited text.
    #[error("Failed to parse sheet: {0}")]
    Parse(String),

    /// The fetched body contained no rows.
    #[error("Sheet response was empty")]
    EmptyResponse,

    /// The parsed sheet does not have the shape the watcher expects.
    #[error("Unexpected sheet shape: {0}")]
    Shape(String),

    /// The webhook rejected the message or could not be reached.
    #[error("Webhook delivery failed: {0}")]
    Delivery(String),

    /// A manual notification could not be built from the requested row.
    #[error("Cannot build manual message: {0}")]
    Manual(String),
}

impl NotifierError {
    /// Whether the poll loop should simply retry on the next interval.
    ///
    /// Everything except configuration problems is transient from the
    /// loop's point of view.
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::Config(_) | Self::Validation(_))
    }
}

/// Validation error for configuration validation.
#[derive(Debug)]
pub enum ValidationError {
    /// Custom validation error with a message.
    Custom(String),

    /// A specific field has an invalid value.
    InvalidField {
        /// The field name/path
        field: String,
        /// The reason why it's invalid
        reason: String,
    },

    /// Multiple validation errors occurred.
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Create a custom validation error.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Create an invalid field error.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Collapse a list of errors: `None` if empty, the error itself if
    /// there is one, `Multiple` otherwise.
    pub fn from_list(mut errors: Vec<ValidationError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Self::Multiple(errors)),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(msg) => write!(f, "{}", msg),
            Self::InvalidField { field, reason } => {
                write!(f, "Field '{}' is invalid: {}", field, reason)
            }
            Self::Multiple(errors) => {
                writeln!(f, "Multiple validation errors:")?;
                for (i, err) in errors.iter().enumerate() {
                    writeln!(f, "  {}. {}", i + 1, err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for NotifierError {
    fn from(err: ValidationError) -> Self {
        NotifierError::Validation(err.to_string())
    }
}
