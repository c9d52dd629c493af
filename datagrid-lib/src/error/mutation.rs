//! Per-row mutation errors

/// Failure of a single host mutation during a bulk operation.
///
/// Hosts map their own API errors into this type. The optional status is
/// typically the HTTP status of the failed REST call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationError {
    /// HTTP status code, if the failure came from an HTTP call.
    pub status: Option<u16>,
    /// Human-readable message.
    pub message: String,
}

impl MutationError {
    /// Creates an error with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    /// Creates an error carrying an HTTP status.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for MutationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "[{}] {}", status, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for MutationError {}
