//! Generation gateway implementations.

pub mod gemini_api_agent;
pub mod unconfigured;

use std::sync::Arc;

use genr_core::config::GeminiConfig;
use genr_core::gateway::GenerationGateway;
use tracing::warn;

pub use gemini_api_agent::GeminiApiAgent;
pub use unconfigured::UnconfiguredGateway;

/// Builds the gateway for `config`. Without an API key every call fails with
/// `GatewayError::NotConfigured`.
pub fn gateway_from_config(config: &GeminiConfig) -> Arc<dyn GenerationGateway> {
    match config.api_key() {
        Some(key) => Arc::new(GeminiApiAgent::new(key, config.model.clone())),
        None => {
            warn!("No Gemini API key configured; AI features are unavailable");
            Arc::new(UnconfiguredGateway)
        }
    }
}
