//! Failures raised inside the client before they are folded into an
//! [`AudioGenerationResponse`](crate::response::AudioGenerationResponse).

use thiserror::Error;

/// Errors that can occur while talking to the MCP server.
///
/// The facade never returns these to callers of the generation operations;
/// their `Display` text becomes the `message` of a failed response.
/// The type is `Clone` so a failed connection can be reported to every
/// caller that waits on it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The connection to the server could not be established
    #[error("Failed to connect to MCP server: {0}")]
    Connect(String),

    /// The tool call itself failed (transport or protocol error)
    #[error("Tool call failed: {0}")]
    Request(String),

    /// The request arguments could not be encoded
    #[error("Failed to encode request: {0}")]
    Encode(String),

    /// A payload could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The client was closed before the operation started
    #[error("Client is closed")]
    Closed,
}

impl ClientError {
    /// Create a new connection error.
    pub fn connect(message: impl Into<String>) -> Self {
        ClientError::Connect(message.into())
    }

    /// Create a new request error.
    pub fn request(message: impl Into<String>) -> Self {
        ClientError::Request(message.into())
    }

    /// Create a new encoding error.
    pub fn encode(message: impl Into<String>) -> Self {
        ClientError::Encode(message.into())
    }

    /// Create a new decoding error.
    pub fn decode(message: impl Into<String>) -> Self {
        ClientError::Decode(message.into())
    }
}
