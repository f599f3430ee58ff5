//! GeminiApiAgent - Direct REST API implementation for Gemini.
//!
//! Both gateway modes map onto a single `generateContent` call. The
//! conversational mode sends the whole transcript every time.

use std::time::Duration;

use async_trait::async_trait;
use genr_core::gateway::{ChatTurn, GatewayError, GenerationGateway};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Gateway implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Points the agent at another endpoint, e.g. a proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String, GatewayError> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            self.base_url,
            model = self.model,
            api_key = self.api_key
        );
        debug!(model = %self.model, turns = body.contents.len(), "Sending Gemini request");

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| GatewayError::Request {
                status: None,
                message: format!("Gemini API request failed: {err}"),
                retryable: err.is_connect() || err.is_timeout(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| {
                GatewayError::Malformed(format!("Failed to parse Gemini response: {err}"))
            })?;

        let text = extract_text_response(parsed)?;
        debug!(chars = text.len(), "Received Gemini response");
        Ok(text)
    }
}

#[async_trait]
impl GenerationGateway for GeminiApiAgent {
    async fn generate(&self, instruction: &str) -> Result<String, GatewayError> {
        let request = GenerateContentRequest {
            contents: vec![Content::text("user", instruction)],
            system_instruction: None,
        };
        self.send_request(&request).await
    }

    async fn converse(
        &self,
        system_instruction: &str,
        transcript: &[ChatTurn],
    ) -> Result<String, GatewayError> {
        self.send_request(&GenerateContentRequest::conversation(
            system_instruction,
            transcript,
        ))
        .await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
}

impl GenerateContentRequest {
    fn conversation(system_instruction: &str, transcript: &[ChatTurn]) -> Self {
        Self {
            contents: transcript
                .iter()
                .map(|turn| Content::text(turn.role.as_str(), &turn.text))
                .collect(),
            system_instruction: Some(SystemInstruction {
                parts: vec![Part {
                    text: system_instruction.to_string(),
                }],
            }),
        }
    }
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

impl Content {
    fn text(role: &str, text: &str) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Concatenates the text parts of the first candidate.
fn extract_text_response(response: GenerateContentResponse) -> Result<String, GatewayError> {
    let text: String = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GatewayError::EmptyResponse);
    }
    Ok(text)
}

fn map_http_error(status: StatusCode, body: String) -> GatewayError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    let retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    GatewayError::Request {
        status: Some(status.as_u16()),
        message,
        retryable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_extract_joins_text_parts() {
        let parsed = response(json!({
            "candidates": [{ "content": { "role": "model", "parts": [
                { "text": "Senja" }, { "text": "\n\n[Verse 1]" }
            ]}}]
        }));
        assert_eq!(extract_text_response(parsed).unwrap(), "Senja\n\n[Verse 1]");
    }

    #[test]
    fn test_extract_without_text_is_empty_response() {
        for value in [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{ "finishReason": "SAFETY" }] }),
            json!({ "candidates": [{ "content": { "parts": [{ "text": "  " }] } }] }),
        ] {
            assert_eq!(
                extract_text_response(response(value)),
                Err(GatewayError::EmptyResponse)
            );
        }
    }

    #[test]
    fn test_map_http_error_reads_error_body() {
        let body = json!({
            "error": {
                "code": 429,
                "message": "Quota exceeded",
                "status": "RESOURCE_EXHAUSTED"
            }
        });
        let err = map_http_error(StatusCode::TOO_MANY_REQUESTS, body.to_string());
        assert_eq!(
            err,
            GatewayError::Request {
                status: Some(429),
                message: "RESOURCE_EXHAUSTED: Quota exceeded".into(),
                retryable: true,
            }
        );

        let err = map_http_error(StatusCode::BAD_REQUEST, "plain failure".into());
        assert!(matches!(
            err,
            GatewayError::Request {
                retryable: false,
                ref message,
                ..
            } if message == "plain failure"
        ));
    }

    #[test]
    fn test_conversation_request_shape() {
        let transcript = [
            ChatTurn::user("Halo"),
            ChatTurn::model("Hai!"),
            ChatTurn::user("Tempo?"),
        ];
        let request = GenerateContentRequest::conversation("Kamu adalah Mr. GenR", &transcript);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "Kamu adalah Mr. GenR");
        assert_eq!(value["contents"].as_array().unwrap().len(), 3);
        assert_eq!(value["contents"][1]["role"], "model");
        assert_eq!(value["contents"][2]["parts"][0]["text"], "Tempo?");
    }

    #[test]
    fn test_single_instruction_has_no_system_part() {
        let request = GenerateContentRequest {
            contents: vec![Content::text("user", "Buatkan lirik")],
            system_instruction: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("systemInstruction").is_none());
        assert_eq!(value["contents"][0]["role"], "user");
    }
}
