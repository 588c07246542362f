//! Error types for the CMDB inventory
//!
//! Every fallible operation in the crate returns `Result<T, Error>`.
//! Each variant belongs to one of the coarse [`ErrorKind`]s the host
//! runtime reports on a failed inventory load.

use thiserror::Error;

/// The main error type for the CMDB inventory
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Requirement Errors
    // ============================================================================
    #[error("Requirement not satisfied: {message}")]
    Requirement { message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Fetch Errors
    // ============================================================================
    #[error("Failed to fetch JSON inventory data from CMDB: {url} (HTTP {status})")]
    FetchStatus { url: String, status: u16 },

    #[error("An error occurred fetching inventory data, the original error is: {message}")]
    Fetch { message: String },

    // ============================================================================
    // Payload Errors
    // ============================================================================
    #[error("Unable to validate data, the original error is: {message}")]
    Validation { message: String },

    #[error("Unable to transform data: {message}")]
    Transform { message: String },

    // ============================================================================
    // Inventory Errors
    // ============================================================================
    #[error("Inventory error: {message}")]
    Inventory { message: String },

    // ============================================================================
    // Output Errors
    // ============================================================================
    #[error("Output error: {message}")]
    Output { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required capability is unavailable
    Requirement,
    /// The plugin configuration is missing or malformed
    Config,
    /// The CMDB could not be reached or answered with a non-200 status
    Fetch,
    /// The payload does not conform to the bundled schema
    Validation,
    /// The payload conforms but cannot be turned into registrations
    Transform,
    /// The inventory sink rejected a call
    Inventory,
    /// The loaded inventory could not be rendered
    Output,
}

impl Error {
    /// Create a requirement error
    pub fn requirement(message: impl Into<String>) -> Self {
        Self::Requirement {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a fetch error for a non-200 response
    pub fn fetch_status(url: impl Into<String>, status: u16) -> Self {
        Self::FetchStatus {
            url: url.into(),
            status,
        }
    }

    /// Create a fetch error wrapping a transport failure
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a transform error
    pub fn transform(message: impl Into<String>) -> Self {
        Self::Transform {
            message: message.into(),
        }
    }

    /// Create an inventory error
    pub fn inventory(message: impl Into<String>) -> Self {
        Self::Inventory {
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Requirement { .. } => ErrorKind::Requirement,
            Error::Config { .. }
            | Error::MissingConfigField { .. }
            | Error::InvalidConfigValue { .. }
            | Error::YamlParse(_)
            | Error::JsonParse(_)
            | Error::Io(_) => ErrorKind::Config,
            Error::FetchStatus { .. } | Error::Fetch { .. } => ErrorKind::Fetch,
            Error::Validation { .. } => ErrorKind::Validation,
            Error::Transform { .. } => ErrorKind::Transform,
            Error::Inventory { .. } => ErrorKind::Inventory,
            Error::Output { .. } => ErrorKind::Output,
        }
    }
}

/// Result type alias for the CMDB inventory
pub type Result<T> = std::result::Result<T, Error>;
