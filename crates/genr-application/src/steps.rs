//! Use cases behind the five generator cards.
//!
//! Validation and gateway failures end up in the step's `output` as
//! [`StepOutcome`] values; `Err` is reserved for busy, render and persistence
//! failures.

use std::sync::Arc;

use chrono::Utc;
use genr_core::components::{LyricLanguage, language_label};
use genr_core::error::Result;
use genr_core::gateway::{GatewayError, GenerationGateway};
use genr_core::notification::Notice;
use genr_core::state::SendOutcome;
use genr_core::workflow::steps::{
    EMPTY_DESCRIPTION_MESSAGE, EMPTY_TITLE_MESSAGE, INSTRUMENT_FAILED_MESSAGE,
    LYRICS_FAILED_MESSAGE, VOCALIST_FAILED_MESSAGE,
};
use genr_core::workflow::{
    ComponentKind, GenreMoodStep, InstrumentsStep, StepKind, StepOutcome, StepRecord,
    VocalistRequest, answer_matches_artist,
};
use tracing::{info, warn};

use crate::prompts;
use crate::workbench::{Activity, Workbench};

/// Trimmed gateway answer, treating a blank answer as a failure.
pub(crate) async fn ask(
    gateway: &dyn GenerationGateway,
    instruction: &str,
) -> std::result::Result<String, GatewayError> {
    let answer = gateway.generate(instruction).await?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Err(GatewayError::EmptyResponse);
    }
    Ok(answer.to_string())
}

pub struct StepController {
    workbench: Arc<Workbench>,
    gateway: Arc<dyn GenerationGateway>,
}

impl StepController {
    pub fn new(workbench: Arc<Workbench>, gateway: Arc<dyn GenerationGateway>) -> Self {
        Self { workbench, gateway }
    }

    /// Generates lyrics for `title` in `language`.
    pub async fn generate_lyrics(
        &self,
        title: &str,
        language: LyricLanguage,
    ) -> Result<StepOutcome> {
        let song_title = title.trim().to_string();
        if song_title.is_empty() {
            let outcome = StepOutcome::ValidationError(EMPTY_TITLE_MESSAGE.to_string());
            return self
                .workbench
                .update(|state| {
                    state.lyrics.song_title = title.to_string();
                    state.lyrics.language = language;
                    state.lyrics.record(outcome.clone());
                    outcome
                })
                .await;
        }

        let _guard = self.workbench.begin(Activity::Step(StepKind::Lyrics))?;
        let instruction = prompts::lyrics_instruction(&song_title, &language)?;
        let outcome = match ask(self.gateway.as_ref(), &instruction).await {
            Ok(lyrics) => {
                info!(title = %song_title, language = %language, "Lyrics generated");
                StepOutcome::Success(lyrics)
            }
            Err(e) => {
                warn!(error = %e, "Lyrics generation failed");
                StepOutcome::ServiceError(LYRICS_FAILED_MESSAGE.to_string())
            }
        };

        self.workbench
            .update(|state| {
                if outcome.is_success() {
                    let notice =
                        Notice::lyrics_generated(&song_title, &language_label(Some(&language)));
                    state.push_notification(notice, Utc::now());
                }
                state.lyrics.song_title = title.to_string();
                state.lyrics.language = language;
                state.lyrics.record(outcome.clone());
                outcome
            })
            .await
    }

    /// Combines the selected genres and mood.
    pub async fn generate_genre_mood(
        &self,
        genres: Vec<String>,
        mood: Option<String>,
    ) -> Result<StepOutcome> {
        let outcome = GenreMoodStep::combine(&genres, mood.as_deref());
        self.workbench
            .update(|state| {
                if let StepOutcome::Success(text) = &outcome {
                    state.push_notification(Notice::genre_mood_generated(text), Utc::now());
                }
                state.genre_mood.selected_genres = genres;
                state.genre_mood.selected_mood = mood;
                state.genre_mood.record(outcome.clone());
                outcome
            })
            .await
    }

    /// Combines the selected main and additional instruments.
    pub async fn generate_instruments(
        &self,
        main: Vec<String>,
        additional: Vec<String>,
    ) -> Result<StepOutcome> {
        let outcome = InstrumentsStep::combine(&main, &additional);
        self.workbench
            .update(|state| {
                if let StepOutcome::Success(text) = &outcome {
                    state.push_notification(Notice::instruments_generated(text), Utc::now());
                }
                state.instruments.selected_main = main;
                state.instruments.selected_additional = additional;
                state.instruments.record(outcome.clone());
                outcome
            })
            .await
    }

    /// Describes the vocalist, asking the gateway when an artist reference
    /// is given.
    pub async fn generate_vocalist(&self, request: VocalistRequest) -> Result<StepOutcome> {
        let Some(artist) = request.artist().map(str::to_string) else {
            let outcome = match request.describe_manual() {
                Ok(text) => StepOutcome::Success(text),
                Err(reason) => StepOutcome::ValidationError(reason),
            };
            return self
                .workbench
                .update(|state| {
                    if let StepOutcome::Success(text) = &outcome {
                        state.push_notification(Notice::vocalist_generated(text), Utc::now());
                    }
                    state.vocalist.request = request;
                    state.vocalist.record(outcome.clone());
                    outcome
                })
                .await;
        };

        let _guard = self.workbench.begin(Activity::Step(StepKind::Vocalist))?;
        let instruction = prompts::vocalist_artist_instruction(&artist)?;
        let mut notices = Vec::new();
        let outcome = match ask(self.gateway.as_ref(), &instruction).await {
            Ok(answer) => {
                let text = if answer_matches_artist(&answer, &artist) {
                    answer
                } else {
                    info!(%artist, "Artist lookup answer unusable, using manual selection");
                    notices.push(Notice::vocalist_artist_fallback());
                    request.describe_artist_fallback(&artist)
                };
                notices.push(Notice::vocalist_designed(&artist));
                StepOutcome::Success(text)
            }
            Err(e) => {
                warn!(error = %e, %artist, "Vocalist design failed");
                StepOutcome::ServiceError(VOCALIST_FAILED_MESSAGE.to_string())
            }
        };

        self.workbench
            .update(|state| {
                let now = Utc::now();
                for notice in notices {
                    state.push_notification(notice, now);
                }
                state.vocalist.request = request;
                state.vocalist.record(outcome.clone());
                outcome
            })
            .await
    }

    /// Turns a free-form description into an instrument prompt.
    pub async fn generate_instrument_specific(&self, description: &str) -> Result<StepOutcome> {
        let input = description.trim().to_string();
        if input.is_empty() {
            let outcome = StepOutcome::ValidationError(EMPTY_DESCRIPTION_MESSAGE.to_string());
            return self
                .workbench
                .update(|state| {
                    state.instrument_specific.input = description.to_string();
                    state.instrument_specific.record(outcome.clone());
                    outcome
                })
                .await;
        }

        let _guard = self
            .workbench
            .begin(Activity::Step(StepKind::InstrumentSpecific))?;
        let instruction = prompts::instrument_specific_instruction(&input)?;
        let outcome = match ask(self.gateway.as_ref(), &instruction).await {
            Ok(text) => StepOutcome::Success(text),
            Err(e) => {
                warn!(error = %e, "Instrument prompt generation failed");
                StepOutcome::ServiceError(INSTRUMENT_FAILED_MESSAGE.to_string())
            }
        };

        self.workbench
            .update(|state| {
                if outcome.is_success() {
                    state.push_notification(Notice::instrument_prompt_generated(), Utc::now());
                }
                state.instrument_specific.input = input;
                state.instrument_specific.record(outcome.clone());
                outcome
            })
            .await
    }

    /// Sends the output of `kind` to the final prompt collection.
    pub async fn send(&self, kind: ComponentKind) -> Result<SendOutcome> {
        let sent = self
            .workbench
            .update(|state| {
                let sent = state.send_component(kind);
                let now = Utc::now();
                match sent {
                    SendOutcome::Sent { .. } => {
                        state.push_notification(Notice::component_sent(kind), now);
                    }
                    SendOutcome::NothingToSend => {
                        state.push_notification(Notice::nothing_to_send(kind), now);
                    }
                    SendOutcome::AlreadySent => {}
                }
                sent
            })
            .await?;
        info!(component = %kind, outcome = ?sent, "Send requested");
        Ok(sent)
    }

    pub async fn output(&self, kind: StepKind) -> Option<StepOutcome> {
        self.workbench
            .read(|state| state.step(kind).output().cloned())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedGateway, workbench};

    fn controller(
        answers: Vec<std::result::Result<String, GatewayError>>,
    ) -> (Arc<Workbench>, StepController) {
        let workbench = workbench();
        let gateway = Arc::new(ScriptedGateway::new(answers));
        (workbench.clone(), StepController::new(workbench, gateway))
    }

    #[tokio::test]
    async fn test_empty_title_is_a_validation_error() {
        let (workbench, steps) = controller(vec![]);
        let outcome = steps
            .generate_lyrics("   ", LyricLanguage::English)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            StepOutcome::ValidationError("Judul lagu tidak boleh kosong.".into())
        );
        let state = workbench.snapshot().await;
        assert_eq!(state.lyrics.count, 0);
        assert_eq!(state.lyrics.language, LyricLanguage::English);
        assert!(state.notifications.is_empty());
    }

    #[tokio::test]
    async fn test_lyrics_success_and_failure() {
        let (workbench, steps) = controller(vec![
            Ok("  Senja\n\n[Verse 1]\nLangit jingga  ".into()),
            Err(GatewayError::request("boom")),
        ]);

        let outcome = steps
            .generate_lyrics("Senja", LyricLanguage::Indonesia)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            StepOutcome::Success("Senja\n\n[Verse 1]\nLangit jingga".into())
        );

        let outcome = steps
            .generate_lyrics("Senja", LyricLanguage::Indonesia)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            StepOutcome::ServiceError("Oops! Gagal membuat lirik. Coba lagi nanti.".into())
        );

        let state = workbench.snapshot().await;
        assert_eq!(state.lyrics.count, 1);
        assert_eq!(state.lyrics.song_title, "Senja");
        assert_eq!(state.notifications.len(), 1);
        assert_eq!(
            state.notifications[0].message,
            "Lirik untuk \"Senja\" (Indonesia) telah selesai."
        );
    }

    #[tokio::test]
    async fn test_blank_answer_is_a_service_error() {
        let (_, steps) = controller(vec![Ok("  \n ".into())]);
        let outcome = steps
            .generate_instrument_specific("cello")
            .await
            .unwrap();
        assert_eq!(
            outcome,
            StepOutcome::ServiceError(
                "Oops! Gagal menghasilkan prompt instrumen. Coba lagi nanti.".into()
            )
        );
    }

    #[tokio::test]
    async fn test_genre_mood_combination() {
        let (workbench, steps) = controller(vec![]);
        let outcome = steps
            .generate_genre_mood(vec!["Lo-fi Hip Hop".into()], Some("Tenang (Calm)".into()))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            StepOutcome::Success("Lo-fi Hip Hop, Tenang (Calm).".into())
        );

        let outcome = steps.generate_genre_mood(vec![], None).await.unwrap();
        assert_eq!(
            outcome,
            StepOutcome::ValidationError("Pilih minimal satu genre atau satu mood.".into())
        );

        let state = workbench.snapshot().await;
        assert_eq!(state.genre_mood.count, 1);
        assert!(state.genre_mood.selected_genres.is_empty());
    }

    #[tokio::test]
    async fn test_instruments_main_then_additional() {
        let (_, steps) = controller(vec![]);
        let outcome = steps
            .generate_instruments(vec!["Piano".into()], vec!["Biola".into(), "Cello".into()])
            .await
            .unwrap();
        assert_eq!(outcome, StepOutcome::Success("Piano, Biola, Cello.".into()));
    }

    #[tokio::test]
    async fn test_vocalist_manual_selection() {
        let (workbench, steps) = controller(vec![]);
        let both = VocalistRequest {
            male_selected: true,
            female_selected: true,
            ..Default::default()
        };
        let outcome = steps.generate_vocalist(both).await.unwrap();
        assert!(matches!(
            outcome,
            StepOutcome::ValidationError(ref m) if m.starts_with("Pilih hanya satu")
        ));

        let female = VocalistRequest {
            female_selected: true,
            female_range: Some("Alto".into()),
            ..Default::default()
        };
        let outcome = steps.generate_vocalist(female).await.unwrap();
        assert_eq!(
            outcome,
            StepOutcome::Success("Wanita, Alto (suara rendah).".into())
        );
        assert_eq!(workbench.snapshot().await.vocalist.count, 1);
    }

    #[tokio::test]
    async fn test_vocalist_artist_answer_accepted() {
        let (workbench, steps) =
            controller(vec![Ok("adele, Wanita, Mezzo-Soprano (suara sedang).".into())]);
        let request = VocalistRequest {
            artist_reference: " Adele ".into(),
            ..Default::default()
        };
        let outcome = steps.generate_vocalist(request).await.unwrap();
        assert_eq!(
            outcome,
            StepOutcome::Success("adele, Wanita, Mezzo-Soprano (suara sedang).".into())
        );
        let state = workbench.snapshot().await;
        assert_eq!(state.notifications.len(), 1);
        assert_eq!(state.notifications[0].title, "Desain Vokalis Selesai!");
    }

    #[tokio::test]
    async fn test_vocalist_artist_answer_rebuilt_from_manual_selection() {
        let (workbench, steps) =
            controller(vec![Ok("Maaf, saya tidak mengenal artis itu.".into())]);
        let request = VocalistRequest {
            male_selected: true,
            male_range: Some("Bariton".into()),
            artist_reference: "Glenn Fredly".into(),
            ..Default::default()
        };
        let outcome = steps.generate_vocalist(request).await.unwrap();
        assert_eq!(
            outcome,
            StepOutcome::Success(
                "Glenn Fredly, Pria, Bariton (suara sedang) (berdasarkan pilihan manual, AI tidak dapat memproses referensi artis secara spesifik saat ini).".into()
            )
        );

        let state = workbench.snapshot().await;
        assert_eq!(state.vocalist.count, 1);
        let titles: Vec<_> = state.notifications.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["Desain Vokalis Selesai!", "Info Tambahan Vokalis"]);
    }

    #[tokio::test]
    async fn test_instrument_progress_wraps() {
        let answers = (0..21).map(|i| Ok(format!("prompt {i}"))).collect();
        let (workbench, steps) = controller(answers);
        for _ in 0..21 {
            steps.generate_instrument_specific("pad hangat").await.unwrap();
        }
        let state = workbench.snapshot().await;
        assert_eq!(state.instrument_specific.count, 21);
        assert_eq!(state.instrument_specific.progress, 5);
    }

    #[tokio::test]
    async fn test_send_notifies_and_moves_focus() {
        let (workbench, steps) = controller(vec![]);
        assert_eq!(
            steps.send(ComponentKind::GenreMood).await.unwrap(),
            SendOutcome::NothingToSend
        );

        steps
            .generate_genre_mood(vec!["Pop".into()], None)
            .await
            .unwrap();
        assert_eq!(
            steps.send(ComponentKind::GenreMood).await.unwrap(),
            SendOutcome::Sent {
                next: Some(ComponentKind::Instruments)
            }
        );
        let before = workbench.snapshot().await;
        assert_eq!(
            steps.send(ComponentKind::GenreMood).await.unwrap(),
            SendOutcome::AlreadySent
        );
        let after = workbench.snapshot().await;
        assert_eq!(before, after);

        let titles: Vec<_> = after.notifications.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(
            titles,
            ["Komponen Terkirim!", "Kombinasi Genre & Mood Dibuat!", "Gagal Mengirim"]
        );
        assert_eq!(after.active_step, Some(ComponentKind::Instruments));
    }

    #[tokio::test]
    async fn test_concurrent_call_on_same_step_is_busy() {
        let (workbench, steps) = controller(vec![]);
        let _guard = workbench
            .begin(Activity::Step(StepKind::Lyrics))
            .unwrap();
        let err = steps
            .generate_lyrics("Senja", LyricLanguage::Indonesia)
            .await
            .unwrap_err();
        assert!(err.is_busy());
        assert!(workbench.snapshot().await.lyrics.output.is_none());
    }
}
