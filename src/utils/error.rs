use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShippingError {
    #[error("No vessel available for max weight {max_weight} and capacity {capacity}")]
    AllocationUnavailable { max_weight: i32, capacity: i32 },

    #[error("Vessel locator transport error: {message}")]
    TransportError { message: String },

    #[error("Invalid request: field '{field}' {reason}")]
    InvalidRequest { field: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl From<reqwest::Error> for ShippingError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else if err.is_connect() {
            format!("connection failed: {}", err)
        } else {
            err.to_string()
        };
        ShippingError::TransportError { message }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Allocation,
    Transport,
    Validation,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ShippingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ShippingError::AllocationUnavailable { .. } => ErrorCategory::Allocation,
            ShippingError::TransportError { .. } => ErrorCategory::Transport,
            ShippingError::InvalidRequest { .. } => ErrorCategory::Validation,
            ShippingError::ConfigError { .. }
            | ShippingError::InvalidConfigValueError { .. }
            | ShippingError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ShippingError::IoError(_) | ShippingError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    /// Per-call failures never exceed `Medium`; only startup problems are fatal.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Allocation | ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Transport => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn is_allocation_unavailable(&self) -> bool {
        matches!(self, ShippingError::AllocationUnavailable { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ShippingError::TransportError { .. })
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ShippingError::AllocationUnavailable { .. } => {
                "Retry later or split the shipment into smaller consignments"
            }
            ShippingError::TransportError { .. } => {
                "Check that the vessel service is running and reachable"
            }
            ShippingError::InvalidRequest { .. } => {
                "Send a non-negative weight and at least one container"
            }
            ShippingError::ConfigError { .. }
            | ShippingError::InvalidConfigValueError { .. }
            | ShippingError::MissingConfigError { .. } => {
                "Review the configuration file and command line flags"
            }
            ShippingError::IoError(_) => "Check file paths and permissions",
            ShippingError::SerializationError(_) => "Check that the payload is valid JSON",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ShippingError::AllocationUnavailable { .. } => {
                "No vessel can currently carry this consignment".to_string()
            }
            ShippingError::TransportError { .. } => {
                "The vessel service could not be reached".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShippingError>;
