//! Answer-service abstraction
//!
//! Two seams, mirroring the two halves of the contract:
//! - [`AnswerTransport`]: fallible, backend-facing. One implementation per
//!   backend (currently Gemini).
//! - [`AnswerService`]: infallible, store-facing. The production
//!   implementation ([`AnswerClient`]) absorbs every transport failure into
//!   fixed fallback text, so the conversation store never handles errors.

mod client;
mod error;
mod gemini;
mod types;

#[cfg(test)]
mod proptests;
#[cfg(test)]
pub mod testing;

pub use client::{AnswerClient, AnswerConfig, FAILURE_FALLBACK, MISSING_KEY_TEXT, NO_TEXT_FALLBACK};
pub use error::{AnswerError, AnswerErrorKind};
pub use gemini::{GeminiModel, GeminiTransport};
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// Backend-facing transport: one request in, one normalized reply out.
/// Never streamed, never retried internally.
#[async_trait]
pub trait AnswerTransport: Send + Sync {
    /// Issue a single generate-answer request
    async fn generate(&self, request: &AnswerRequest) -> Result<AnswerReply, AnswerError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

/// Store-facing service: always resolves to renderable text.
#[async_trait]
pub trait AnswerService: Send + Sync {
    async fn answer(
        &self,
        question: &str,
        subject_context: &str,
        attachment: Option<&AttachmentData>,
    ) -> AnswerResult;
}

/// Logging wrapper for answer transports
pub struct LoggingTransport {
    inner: Arc<dyn AnswerTransport>,
    model_id: String,
}

impl LoggingTransport {
    pub fn new(inner: Arc<dyn AnswerTransport>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl AnswerTransport for LoggingTransport {
    async fn generate(&self, request: &AnswerRequest) -> Result<AnswerReply, AnswerError> {
        let start = std::time::Instant::now();
        let result = self.inner.generate(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    input_tokens = reply.usage.input_tokens,
                    output_tokens = reply.usage.output_tokens,
                    citations = reply.citations.len(),
                    "Answer request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    retryable = e.kind.is_retryable(),
                    "Answer request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
