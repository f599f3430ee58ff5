//! Test doubles shared by the unit tests of this crate.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use genr_core::gateway::{ChatTurn, GatewayError, GenerationGateway};
use genr_core::state::ApplicationState;
use genr_infrastructure::{KvStateRepository, MemoryStore};

use crate::workbench::Workbench;

/// Gateway that answers from a fixed script and records what it was asked.
/// An exhausted script fails every further call.
pub struct ScriptedGateway {
    answers: Mutex<VecDeque<Result<String, GatewayError>>>,
    instructions: Mutex<Vec<String>>,
    transcripts: Mutex<Vec<Vec<ChatTurn>>>,
}

impl ScriptedGateway {
    pub fn new(answers: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            instructions: Mutex::new(Vec::new()),
            transcripts: Mutex::new(Vec::new()),
        }
    }

    pub fn instructions(&self) -> Vec<String> {
        self.instructions.lock().unwrap().clone()
    }

    pub fn transcripts(&self) -> Vec<Vec<ChatTurn>> {
        self.transcripts.lock().unwrap().clone()
    }

    fn next_answer(&self) -> Result<String, GatewayError> {
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::request("script exhausted")))
    }
}

#[async_trait]
impl GenerationGateway for ScriptedGateway {
    async fn generate(&self, instruction: &str) -> Result<String, GatewayError> {
        self.instructions
            .lock()
            .unwrap()
            .push(instruction.to_string());
        self.next_answer()
    }

    async fn converse(
        &self,
        _system_instruction: &str,
        transcript: &[ChatTurn],
    ) -> Result<String, GatewayError> {
        self.transcripts.lock().unwrap().push(transcript.to_vec());
        self.next_answer()
    }
}

/// Workbench for user `budi` backed by an in-memory store.
pub fn workbench() -> Arc<Workbench> {
    workbench_with_store().1
}

/// Workbench for "budi" together with the store its snapshots land in.
pub fn workbench_with_store() -> (Arc<MemoryStore>, Arc<Workbench>) {
    let store = Arc::new(MemoryStore::new());
    let repository = Arc::new(KvStateRepository::new(store.clone()));
    let workbench = Arc::new(Workbench::new(
        "budi",
        ApplicationState::default(),
        repository,
    ));
    (store, workbench)
}
