//! Generation gateway contract.
//!
//! Every AI-backed piece of text in the application goes through a
//! [`GenerationGateway`]. The gateway is stateless: the conversational mode
//! receives the whole transcript on each call instead of holding a session.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Speaker of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    /// Role name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

/// One entry of the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

/// Failure of a single gateway invocation. Callers treat every variant as
/// terminal for that invocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// No API key was configured.
    #[error("generation gateway is not configured")]
    NotConfigured,

    /// The request could not be sent or the backend answered with an error.
    #[error("generation request failed{}: {message}", status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Request {
        status: Option<u16>,
        message: String,
        retryable: bool,
    },

    /// The backend answered without any text.
    #[error("generation backend returned no text")]
    EmptyResponse,

    /// The response body could not be decoded.
    #[error("malformed generation response: {0}")]
    Malformed(String),
}

impl GatewayError {
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            status: None,
            message: message.into(),
            retryable: false,
        }
    }
}

/// External text-generation capability.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Sends a single instruction and returns the generated text.
    async fn generate(&self, instruction: &str) -> Result<String, GatewayError>;

    /// Continues a conversation. `transcript` ends with the newest user turn.
    async fn converse(
        &self,
        system_instruction: &str,
        transcript: &[ChatTurn],
    ) -> Result<String, GatewayError>;
}
