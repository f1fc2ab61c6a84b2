use thiserror::Error;

/// Message shown for every connectivity-class failure (network, abort, timeout).
pub const CONNECTIVITY_MESSAGE: &str =
    "Unable to reach the recipe service. Please check your connection and try again.";

/// Errors that can occur while talking to the recipe API or wiring the client
#[derive(Error, Debug)]
pub enum FridgeError {
    /// The API answered with a non-2xx status
    #[error("Request failed with status {status}")]
    Http { status: u16 },

    /// Connection could not be established or was dropped
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// The response body did not have the expected shape
    #[error("Invalid response format from API: {0}")]
    InvalidResponse(String),

    /// No API key in configuration or environment
    #[error("No API key configured. Set FRIDGE_MATE__API_KEY or SPOONACULAR_API_KEY")]
    MissingApiKey,

    /// Caller supplied unusable input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP client or runtime could not be built
    #[error("Client error: {0}")]
    Client(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl FridgeError {
    /// Classify a transport error, splitting timeouts out of generic network failures.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FridgeError::Timeout
        } else {
            FridgeError::Network(err)
        }
    }

    /// True for failures caused by the network rather than by the API's answer.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, FridgeError::Network(_) | FridgeError::Timeout)
    }

    /// Text suitable for showing in place of a list that failed to load.
    pub fn user_message(&self) -> String {
        if self.is_connectivity() {
            CONNECTIVITY_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_message_includes_status() {
        let err = FridgeError::Http { status: 402 };
        assert_eq!(err.user_message(), "Request failed with status 402");
        assert!(!err.is_connectivity());
    }

    #[test]
    fn test_timeout_uses_connectivity_message() {
        let err = FridgeError::Timeout;
        assert!(err.is_connectivity());
        assert_eq!(err.user_message(), CONNECTIVITY_MESSAGE);
    }

    #[test]
    fn test_invalid_response_is_distinct_from_network() {
        let err = FridgeError::InvalidResponse("expected an array".to_string());
        assert!(!err.is_connectivity());
        assert_eq!(
            err.user_message(),
            "Invalid response format from API: expected an array"
        );
    }
}
