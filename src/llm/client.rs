//! Answer client: the sole boundary between the conversation store and the
//! generative backend.
//!
//! Every failure mode is absorbed here and converted into renderable text.
//! From the store's point of view `answer()` always succeeds.

use super::gemini::{GeminiModel, GeminiTransport};
use super::types::{AnswerRequest, AnswerResult, AttachmentData, ContentPart};
use super::{AnswerService, AnswerTransport, LoggingTransport};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Returned without any network attempt when no credential is configured.
pub const MISSING_KEY_TEXT: &str = "Error: API Key missing.";

/// Substituted when the backend responds successfully but with no text.
pub const NO_TEXT_FALLBACK: &str = "Sorry, I couldn't generate a response.";

/// Returned for any transport failure or timeout.
pub const FAILURE_FALLBACK: &str = "Sorry, I encountered an error while trying to solve that. \
(Note: Large files or certain formats might not be supported).";

/// Appended to the content parts when an attachment is downgraded.
const UNSUPPORTED_ATTACHMENT_NOTE: &str = "\n[User attached a file that is not an image or PDF, \
so I cannot see it. I will answer based on the text provided.]";

/// A hung backend call becomes the standard failure result after this long.
const ANSWER_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the answer client
#[derive(Debug, Clone, Default)]
pub struct AnswerConfig {
    pub api_key: Option<String>,
    /// Optional proxy base URL fronting the Gemini REST surface
    pub gateway: Option<String>,
    pub model: GeminiModel,
}

impl AnswerConfig {
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|key| !key.is_empty());

        let model = std::env::var("GEMINI_MODEL")
            .ok()
            .and_then(|name| GeminiModel::from_name(&name))
            .unwrap_or_default();

        Self {
            api_key,
            gateway: std::env::var("GEMINI_GATEWAY").ok(),
            model,
        }
    }
}

/// Store-facing answer client
///
/// Holds no transport at all when no credential is configured; in that case
/// `answer()` resolves immediately with [`MISSING_KEY_TEXT`].
pub struct AnswerClient {
    transport: Option<Arc<dyn AnswerTransport>>,
    timeout: Duration,
}

impl AnswerClient {
    pub fn new(config: &AnswerConfig) -> Self {
        let transport = config.api_key.as_ref().map(|key| {
            let gemini = GeminiTransport::new(key.clone(), config.model, config.gateway.as_deref());
            Arc::new(LoggingTransport::new(Arc::new(gemini))) as Arc<dyn AnswerTransport>
        });

        if transport.is_none() {
            tracing::warn!("No Gemini API key configured. Set GEMINI_API_KEY or API_KEY.");
        }

        Self {
            transport,
            timeout: ANSWER_TIMEOUT,
        }
    }

    /// Build a client over an arbitrary transport (used by tests and by
    /// gateway deployments that construct the transport themselves).
    pub fn with_transport(transport: Arc<dyn AnswerTransport>) -> Self {
        Self {
            transport: Some(transport),
            timeout: ANSWER_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Assemble the normalized request, applying the attachment policy:
    /// only `image/*` and `application/pdf` payloads are forwarded as
    /// analyzable binary content; anything else is silently downgraded to a
    /// textual note. Deliberate capability boundary of the backend.
    pub(crate) fn build_request(
        question: &str,
        subject_context: &str,
        attachment: Option<&AttachmentData>,
    ) -> AnswerRequest {
        let mut parts = vec![ContentPart::text(question)];

        if let Some(attachment) = attachment {
            if is_supported_for_analysis(&attachment.mime_type) {
                parts.push(ContentPart::inline_data(
                    attachment.mime_type.clone(),
                    attachment.bytes.clone(),
                ));
            } else {
                parts.push(ContentPart::text(UNSUPPORTED_ATTACHMENT_NOTE));
            }
        }

        AnswerRequest {
            system_instruction: system_instruction(subject_context),
            parts,
        }
    }
}

#[async_trait]
impl AnswerService for AnswerClient {
    async fn answer(
        &self,
        question: &str,
        subject_context: &str,
        attachment: Option<&AttachmentData>,
    ) -> AnswerResult {
        let Some(transport) = &self.transport else {
            return AnswerResult::text_only(MISSING_KEY_TEXT);
        };

        let request = Self::build_request(question, subject_context, attachment);

        match timeout(self.timeout, transport.generate(&request)).await {
            Ok(Ok(reply)) => AnswerResult {
                text: reply
                    .text
                    .unwrap_or_else(|| NO_TEXT_FALLBACK.to_string()),
                citations: reply.citations,
            },
            Ok(Err(e)) => {
                tracing::error!(error = %e.message, kind = ?e.kind, "Answer request failed");
                AnswerResult::text_only(FAILURE_FALLBACK)
            }
            Err(_) => {
                tracing::error!(timeout_s = self.timeout.as_secs(), "Answer request timed out");
                AnswerResult::text_only(FAILURE_FALLBACK)
            }
        }
    }
}

/// Only images and PDFs are analyzable by the backend
fn is_supported_for_analysis(mime_type: &str) -> bool {
    mime_type.starts_with("image/") || mime_type == "application/pdf"
}

fn system_instruction(subject_context: &str) -> String {
    format!(
        "You are an expert homework solver for {subject_context}.\n\
         \n\
         Your job:\n\
         1. Directly solve and provide complete answers to any homework question.\n\
         2. Show your work step-by-step when solving math, science, or logic problems.\n\
         3. For essays or written assignments, provide a full, well-written response ready to submit.\n\
         4. Use Google Search to find accurate, up-to-date information when needed.\n\
         5. If an image or PDF is provided, analyze it and solve whatever is shown.\n\
         6. Format responses with Markdown for clarity.\n\
         7. Be thorough and provide the full answer - don't just hint or guide."
    )
}
