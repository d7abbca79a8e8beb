//! Google Gemini transport implementation
//!
//! Owns every Gemini-specific wire shape (request envelope, grounding
//! metadata nesting, error envelope) so nothing outside this module depends
//! on backend field names.

use super::types::{AnswerReply, AnswerRequest, Citation, ContentPart, Usage};
use super::{AnswerError, AnswerTransport};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gemini models
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeminiModel {
    Flash3Preview,
    Pro3Preview,
}

impl GeminiModel {
    pub fn api_name(self) -> &'static str {
        match self {
            GeminiModel::Flash3Preview => "gemini-3-flash-preview",
            GeminiModel::Pro3Preview => "gemini-3-pro-preview",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "gemini-3-flash-preview" => Some(GeminiModel::Flash3Preview),
            "gemini-3-pro-preview" => Some(GeminiModel::Pro3Preview),
            _ => None,
        }
    }
}

impl Default for GeminiModel {
    fn default() -> Self {
        GeminiModel::Flash3Preview
    }
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Gemini transport implementation
pub struct GeminiTransport {
    client: Client,
    api_key: String,
    base_url: String,
    model_id: String,
}

impl GeminiTransport {
    pub fn new(api_key: String, model: GeminiModel, gateway: Option<&str>) -> Self {
        let base_url = match gateway {
            Some(gw) => {
                // Gateway proxies the Gemini REST surface under its own root
                format!(
                    "{}/v1beta/models/{}:generateContent",
                    gw.trim_end_matches('/'),
                    model.api_name()
                )
            }
            None => {
                // Direct Gemini API; the googleSearch tool lives on v1beta
                format!(
                    "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
                    model.api_name()
                )
            }
        };

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            base_url,
            model_id: model.api_name().to_string(),
        }
    }

    fn translate_request(request: &AnswerRequest) -> GeminiRequest {
        let parts = request
            .parts
            .iter()
            .map(|part| match part {
                ContentPart::Text { text } => GeminiPart::Text { text: text.clone() },
                ContentPart::InlineData { mime_type, data } => GeminiPart::InlineData {
                    inline_data: GeminiInlineData {
                        mime_type: mime_type.clone(),
                        data: BASE64.encode(data),
                    },
                },
            })
            .collect();

        GeminiRequest {
            contents: vec![GeminiContent {
                role: None,
                parts,
            }],
            system_instruction: Some(GeminiContent {
                role: None,
                parts: vec![GeminiPart::Text {
                    text: request.system_instruction.clone(),
                }],
            }),
            // Live web grounding is enabled on every call
            tools: vec![GeminiTool {
                google_search: GoogleSearch {},
            }],
        }
    }

    fn normalize_response(resp: GeminiResponse) -> AnswerReply {
        let usage = resp
            .usage_metadata
            .map(|u| Usage {
                input_tokens: u64::from(u.prompt_token_count),
                output_tokens: u64::from(u.candidates_token_count),
            })
            .unwrap_or_default();

        let Some(candidate) = resp.candidates.into_iter().next() else {
            return AnswerReply {
                text: None,
                citations: Vec::new(),
                usage,
            };
        };

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| match part {
                        GeminiPart::Text { text } => Some(text),
                        GeminiPart::InlineData { .. } => None,
                    })
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|joined| !joined.is_empty());

        // Keep only chunks carrying both a title and a URI, in backend order.
        // No deduplication.
        let citations = candidate
            .grounding_metadata
            .map(|metadata| {
                metadata
                    .grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.web)
                    .filter_map(|web| match (web.title, web.uri) {
                        (Some(title), Some(uri)) if !title.is_empty() && !uri.is_empty() => {
                            Some(Citation { title, uri })
                        }
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        AnswerReply {
            text,
            citations,
            usage,
        }
    }

    fn classify_status(status: reqwest::StatusCode, message: String) -> AnswerError {
        match status.as_u16() {
            400 => AnswerError::invalid_request(format!("Invalid request: {message}")),
            401 | 403 => AnswerError::auth(format!("Authentication failed: {message}")),
            429 => AnswerError::rate_limit(format!("Rate limit exceeded: {message}")),
            500..=599 => AnswerError::server_error(format!("Server error: {message}")),
            _ => AnswerError::unknown(format!("HTTP {status}: {message}")),
        }
    }
}

#[async_trait]
impl AnswerTransport for GeminiTransport {
    async fn generate(&self, request: &AnswerRequest) -> Result<AnswerReply, AnswerError> {
        let gemini_request = Self::translate_request(request);
        let url = format!("{}?key={}", self.base_url, self.api_key);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnswerError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    AnswerError::network(format!("Connection failed: {e}"))
                } else {
                    AnswerError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnswerError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            if let Ok(error_resp) = serde_json::from_str::<GeminiErrorResponse>(&body) {
                return Err(Self::classify_status(status, error_resp.error.message));
            }
            return Err(AnswerError::unknown(format!("HTTP {status} error: {body}")));
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            AnswerError::unknown(format!("Failed to parse response: {e} - body: {body}"))
        })?;

        Ok(Self::normalize_response(gemini_response))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

// Gemini API types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    tools: Vec<GeminiTool>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum GeminiPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: GeminiInlineData,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiTool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    title: Option<String>,
    uri: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
    #[allow(dead_code)]
    code: Option<i32>,
    #[allow(dead_code)]
    status: Option<String>,
}
