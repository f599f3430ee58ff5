use async_trait::async_trait;
use genr_core::gateway::{ChatTurn, GatewayError, GenerationGateway};

/// Gateway used when no API key is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredGateway;

#[async_trait]
impl GenerationGateway for UnconfiguredGateway {
    async fn generate(&self, _instruction: &str) -> Result<String, GatewayError> {
        Err(GatewayError::NotConfigured)
    }

    async fn converse(
        &self,
        _system_instruction: &str,
        _transcript: &[ChatTurn],
    ) -> Result<String, GatewayError> {
        Err(GatewayError::NotConfigured)
    }
}
