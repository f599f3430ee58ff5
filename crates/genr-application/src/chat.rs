//! Mr. GenR, the conversational assistant.

use std::sync::Arc;

use genr_core::error::Result;
use genr_core::gateway::{ChatTurn, GenerationGateway};
use tracing::{debug, warn};

use crate::prompts::{ASSISTANT_SYSTEM_INSTRUCTION, ASSISTANT_WELCOME};
use crate::workbench::{Activity, Workbench};

pub const CHAT_FAILED_MESSAGE: &str = "Oops! Gangguan saat menghubungi Mr. GenR. Coba lagi sesaat.";

/// What the chat window shows after a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatReply {
    /// Blank input; nothing was sent.
    Ignored,
    Answer(String),
    /// The gateway failed. The user's turn stays in the history.
    Failed(String),
}

pub struct ChatAssistant {
    workbench: Arc<Workbench>,
    gateway: Arc<dyn GenerationGateway>,
}

impl ChatAssistant {
    pub fn new(workbench: Arc<Workbench>, gateway: Arc<dyn GenerationGateway>) -> Self {
        Self { workbench, gateway }
    }

    pub fn greeting(&self) -> &'static str {
        ASSISTANT_WELCOME
    }

    pub async fn history(&self) -> Vec<ChatTurn> {
        self.workbench
            .read(|state| state.chat_history.clone())
            .await
    }

    pub async fn send_message(&self, text: &str) -> Result<ChatReply> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(ChatReply::Ignored);
        }

        let _guard = self.workbench.begin(Activity::Chat)?;
        let transcript = self
            .workbench
            .update(|state| {
                state.chat_history.push(ChatTurn::user(text));
                state.chat_history.clone()
            })
            .await?;

        debug!(turns = transcript.len(), "Sending chat transcript");
        match self
            .gateway
            .converse(ASSISTANT_SYSTEM_INSTRUCTION, &transcript)
            .await
        {
            Ok(answer) => {
                self.workbench
                    .update(|state| state.chat_history.push(ChatTurn::model(answer.clone())))
                    .await?;
                Ok(ChatReply::Answer(answer))
            }
            Err(e) => {
                warn!(error = %e, "Chat request failed");
                self.workbench.persist().await?;
                Ok(ChatReply::Failed(CHAT_FAILED_MESSAGE.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedGateway, workbench};
    use genr_core::gateway::{ChatRole, GatewayError};

    #[tokio::test]
    async fn test_conversation_keeps_transcript() {
        let workbench = workbench();
        let gateway = Arc::new(ScriptedGateway::new(vec![
            Ok("Halo juga!".into()),
            Err(GatewayError::request("timeout")),
        ]));
        let chat = ChatAssistant::new(workbench.clone(), gateway.clone());

        assert_eq!(chat.send_message("  ").await.unwrap(), ChatReply::Ignored);
        assert_eq!(
            chat.send_message("Halo").await.unwrap(),
            ChatReply::Answer("Halo juga!".into())
        );
        assert_eq!(
            chat.send_message("Tempo lagu sedih?").await.unwrap(),
            ChatReply::Failed(CHAT_FAILED_MESSAGE.into())
        );

        let history = chat.history().await;
        let roles: Vec<_> = history.iter().map(|turn| turn.role).collect();
        assert_eq!(roles, [ChatRole::User, ChatRole::Model, ChatRole::User]);

        let transcripts = gateway.transcripts();
        assert_eq!(transcripts.len(), 2);
        assert_eq!(transcripts[1].len(), 3);
        assert_eq!(transcripts[1][2].text, "Tempo lagu sedih?");
    }
}
