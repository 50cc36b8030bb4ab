//! # Certificate extraction client
//!
//! Client for the Google Gemini `generateContent` API. It sends a vaccine
//! certificate image with a fixed instruction and turns the model's textual
//! JSON reply into [ExtractedCertFields].

use async_trait::async_trait;
use base64::Engine;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use crate::{config, consts};

/// Tagged failure modes of one extraction round-trip. None of them is
/// retried; the caller is informed and may resubmit.
#[derive(Debug, Display, Error, PartialEq)]
pub enum ExtractionError {
    /// Transport-level failure reaching the service (includes the 30s timeout)
    #[display("AI request failed: {_0}")]
    RequestError(#[error(not(source))] String),
    /// Service replied with a non-success status, or no API key is configured
    #[display("{_0}")]
    ServiceError(#[error(not(source))] String),
    /// Service replied successfully but carried no text payload
    #[display("No content received from AI")]
    EmptyResponse,
    /// The text payload was not JSON, even after stripping markdown fences
    #[display("Failed to parse AI response")]
    MalformedResponse,
}

/// Fields suggested by the extraction service, each already defaulted.
/// The stored image path is attached by the caller, never by the service.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExtractedCertFields {
    pub vaccine_name: String,
    pub category: String,
    pub date_issued: String,
    pub next_due_date: String,
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Suggested field set as the model is instructed to emit it. Every field
/// defaults independently when absent or null.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDraft {
    #[serde(default)]
    vaccine_name: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    date_issued: Option<String>,
    #[serde(default)]
    next_due_date: Option<String>,
}

/// Gemini API client for certificate field extraction
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(app_config: &config::AppConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(
                    consts::EXTRACTION_TIMEOUT_SECS,
                ))
                .build()?,
            endpoint: app_config.gemini_generate_content_endpoint(),
            api_key: app_config.gemini_api_key.clone(),
        })
    }

    fn build_request(&self, image: &[u8], mime_type: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart {
                        text: Some(consts::CERT_EXTRACTION_PROMPT.to_string()),
                        inline_data: None,
                    },
                    RequestPart {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: mime_type.to_string(),
                            data: base64::engine::general_purpose::STANDARD.encode(image),
                        }),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        }
    }
}

#[async_trait]
impl crate::services::ExtractionService for GeminiClient {
    async fn extract_certificate(
        &self,
        image: &[u8],
        mime_type: &str,
    ) -> Result<ExtractedCertFields, ExtractionError> {
        if self.api_key.is_empty() {
            return Err(ExtractionError::ServiceError(
                "Gemini API key is not configured".to_string(),
            ));
        }

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&self.build_request(image, mime_type))
            .send()
            .await
            .map_err(|e| ExtractionError::RequestError(e.to_string()))?;

        if !response.status().is_success() {
            let message = response
                .json::<ErrorEnvelope>()
                .await
                .ok()
                .and_then(|envelope| envelope.error)
                .map(|detail| detail.message)
                .unwrap_or_else(|| "AI processing failed".to_string());

            return Err(ExtractionError::ServiceError(message));
        }

        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|_| ExtractionError::EmptyResponse)?;

        let reply_text = envelope
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or(ExtractionError::EmptyResponse)?;

        parse_draft_payload(&reply_text)
    }
}

/// Parses the model's textual JSON suggestion, tolerating ```json markdown
/// fences the model sometimes wraps it in despite the instruction.
pub fn parse_draft_payload(reply_text: &str) -> Result<ExtractedCertFields, ExtractionError> {
    let clean_text = reply_text.replace("```json", "").replace("```", "");

    let raw: RawDraft = serde_json::from_str(clean_text.trim())
        .map_err(|_| ExtractionError::MalformedResponse)?;

    Ok(ExtractedCertFields {
        vaccine_name: raw.vaccine_name.unwrap_or_default(),
        category: match raw.category {
            Some(category) if !category.is_empty() => category,
            _ => consts::DEFAULT_VACCINE_CATEGORY.to_string(),
        },
        date_issued: raw.date_issued.unwrap_or_default(),
        next_due_date: raw.next_due_date.unwrap_or_default(),
    })
}
