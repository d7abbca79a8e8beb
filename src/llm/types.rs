//! Common types for answer-service interactions

use serde::{Deserialize, Serialize};

/// Attachment payload as received from the submission boundary: raw bytes
/// plus the self-describing MIME type. Transport encoding (base64) is the
/// backend transport's concern, not the caller's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentData {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl AttachmentData {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }
}

/// Normalized request shape passed to an [`AnswerTransport`](super::AnswerTransport).
///
/// The attachment policy (which MIME types are forwarded as binary content)
/// is applied *before* this request is built; a transport serializes the
/// parts as-is and never re-inspects MIME types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRequest {
    pub system_instruction: String,
    pub parts: Vec<ContentPart>,
}

impl AnswerRequest {
    /// Whether any part carries inline binary content.
    pub fn has_inline_data(&self) -> bool {
        self.parts
            .iter()
            .any(|part| matches!(part, ContentPart::InlineData { .. }))
    }
}

/// One entry in the ordered content-part sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text { text: String },
    InlineData { mime_type: String, data: Vec<u8> },
}

impl ContentPart {
    pub fn text(s: impl Into<String>) -> Self {
        ContentPart::Text { text: s.into() }
    }

    pub fn inline_data(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        ContentPart::InlineData {
            mime_type: mime_type.into(),
            data,
        }
    }
}

/// A web source the backend cites as evidence for a grounded claim.
///
/// Duplicates are permitted and backend ordering is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,
    pub uri: String,
}

impl Citation {
    pub fn new(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            uri: uri.into(),
        }
    }
}

/// Raw normalized reply from a transport. `text` is `None` when the backend
/// produced no usable text; the client layer substitutes the fixed fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerReply {
    pub text: Option<String>,
    pub citations: Vec<Citation>,
    pub usage: Usage,
}

/// Final result delivered to the conversation store. Always renderable:
/// failures arrive here as apologetic text, never as an error value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResult {
    pub text: String,
    pub citations: Vec<Citation>,
}

impl AnswerResult {
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            citations: Vec::new(),
        }
    }
}

/// Token usage statistics, reported when the backend includes them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}
