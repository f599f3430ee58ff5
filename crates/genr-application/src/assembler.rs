//! Final prompt assembly.

use std::sync::Arc;

use chrono::Utc;
use genr_core::components::{FinalMusicPrompt, PromptOrigin};
use genr_core::error::Result;
use genr_core::gateway::GenerationGateway;
use genr_core::notification::Notice;
use genr_core::prompt::{PromptData, fallback_prompt};
use tracing::{info, warn};

use crate::prompts;
use crate::steps::ask;
use crate::workbench::{Activity, Workbench};

pub struct PromptAssembler {
    workbench: Arc<Workbench>,
    gateway: Arc<dyn GenerationGateway>,
}

impl PromptAssembler {
    pub fn new(workbench: Arc<Workbench>, gateway: Arc<dyn GenerationGateway>) -> Self {
        Self { workbench, gateway }
    }

    /// Builds the final prompt from the collected components.
    ///
    /// The gateway enriches the template; when it fails or answers with
    /// nothing the deterministic template is used instead.
    pub async fn assemble(&self) -> Result<FinalMusicPrompt> {
        let _guard = self.workbench.begin(Activity::Assembly)?;
        let data = self
            .workbench
            .read(|state| PromptData::from_components(&state.collected))
            .await;

        let instruction = prompts::final_prompt_instruction(&data)?;
        let prompt = match ask(self.gateway.as_ref(), &instruction).await {
            Ok(text) => FinalMusicPrompt {
                text,
                origin: PromptOrigin::AiEnriched,
            },
            Err(e) => {
                warn!(error = %e, "Final prompt enrichment failed, using fallback template");
                FinalMusicPrompt {
                    text: fallback_prompt(&data),
                    origin: PromptOrigin::Fallback,
                }
            }
        };
        info!(origin = ?prompt.origin, chars = prompt.text.len(), "Final prompt assembled");

        self.workbench
            .update(|state| {
                let notice = match prompt.origin {
                    PromptOrigin::AiEnriched => Notice::final_prompt_enriched(),
                    PromptOrigin::Fallback => Notice::final_prompt_fallback(),
                };
                state.push_notification(notice, Utc::now());
                state.final_music_prompt = Some(prompt.clone());
                prompt
            })
            .await
    }

    pub async fn current(&self) -> Option<FinalMusicPrompt> {
        self.workbench
            .read(|state| state.final_music_prompt.clone())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedGateway, workbench};
    use genr_core::components::{LyricLanguage, PromptComponent};
    use genr_core::gateway::GatewayError;

    #[tokio::test]
    async fn test_enriched_prompt_is_stored() {
        let workbench = workbench();
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok(
            "Genre: Pop, Mood: Bahagia, 120 BPM".into()
        )]));
        let assembler = PromptAssembler::new(workbench.clone(), gateway.clone());

        let prompt = assembler.assemble().await.unwrap();
        assert_eq!(prompt.origin, PromptOrigin::AiEnriched);
        assert_eq!(assembler.current().await, Some(prompt));
        assert!(gateway.instructions()[0].contains("TEMPLATE WAJIB"));

        let state = workbench.snapshot().await;
        assert_eq!(state.notifications[0].title, "Prompt Musik Final Tersusun!");
    }

    #[tokio::test]
    async fn test_gateway_failure_falls_back() {
        let workbench = workbench();
        workbench
            .update(|state| {
                state.collected.insert(PromptComponent::Lyrics {
                    text: "Senja\n\n[Verse 1]\nLangit jingga".into(),
                    language: LyricLanguage::JapaneseRomaji,
                });
                state.collected.insert(PromptComponent::GenreMood {
                    text: "Jazz, Nostalgia.".into(),
                });
            })
            .await
            .unwrap();
        let gateway = Arc::new(ScriptedGateway::new(vec![Err(GatewayError::NotConfigured)]));
        let assembler = PromptAssembler::new(workbench.clone(), gateway);

        let prompt = assembler.assemble().await.unwrap();
        assert_eq!(prompt.origin, PromptOrigin::Fallback);
        assert_eq!(
            prompt.text,
            "Genre: Jazz, Mood: Nostalgia, Instruments: Tidak ditentukan\n\
             Bahasa: Jepang (Romaji),\n\
             Judul Lagu : Senja\n\
             Vokalis: Instrumental (tidak ada vokalis),\n\
             Include these lyrics:\n\n\
             [Verse 1]\n\
             Langit jingga"
        );
        let state = workbench.snapshot().await;
        assert_eq!(state.notifications[0].title, "Prompt Musik (Fallback)");
    }

    #[tokio::test]
    async fn test_empty_answer_falls_back() {
        let workbench = workbench();
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok("   ".into())]));
        let prompt = PromptAssembler::new(workbench, gateway)
            .assemble()
            .await
            .unwrap();
        assert_eq!(prompt.origin, PromptOrigin::Fallback);
        assert!(prompt.text.ends_with("Music Type: Instrumental (Tidak ada lirik)"));
    }

    #[tokio::test]
    async fn test_second_assembly_is_busy() {
        let workbench = workbench();
        let gateway = Arc::new(ScriptedGateway::new(vec![]));
        let assembler = PromptAssembler::new(workbench.clone(), gateway);
        let _guard = workbench.begin(Activity::Assembly).unwrap();
        assert!(assembler.assemble().await.unwrap_err().is_busy());
    }
}
