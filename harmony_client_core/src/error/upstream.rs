//! Errors raised by the remote Harmony service or the path to it

use thiserror::Error;

/// Failures of the remote collaborator
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// The request never produced a response (DNS, connect, TLS, timeout)
    #[error("Failed to reach the maestro: {message}")]
    Transport { message: String },

    /// The API answered with a non-success status
    #[error("Harmony API error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// The response body could not be decoded
    #[error("Unexpected response from the maestro: {message}")]
    Decode { message: String },
}

impl UpstreamError {
    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a server error with status and message
    pub fn server_error(status: u16, message: &str) -> Self {
        Self::ServerError {
            status,
            message: message.to_string(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Whether trying the same call again later might succeed.
    ///
    /// Baton never retries on its own; this only shapes the hint shown to the user.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::ServerError { status, .. } => matches!(status, 502..=504),
            Self::Decode { .. } => false,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::server_error(status.as_u16(), &err.to_string())
        } else {
            Self::transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error() {
        let error = UpstreamError::transport("connection refused");
        assert!(error.to_string().contains("connection refused"));
        assert!(error.is_transient());
    }

    #[test]
    fn test_server_error() {
        let error = UpstreamError::server_error(503, "maintenance");
        assert!(error.to_string().contains("503"));
        assert!(error.to_string().contains("maintenance"));
        assert!(error.is_transient());
    }

    #[test]
    fn test_client_side_status_is_not_transient() {
        let error = UpstreamError::server_error(422, "name taken");
        assert!(!error.is_transient());
    }

    #[test]
    fn test_decode_error() {
        let error = UpstreamError::decode("expected value at line 1");
        assert!(error.to_string().contains("Unexpected response"));
        assert!(!error.is_transient());
    }
}
