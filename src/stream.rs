//! Stream record types

use crate::llm::Citation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// File attached to a post: fully buffered bytes plus self-describing
/// metadata. No streaming ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// One immutable entry in a class's conversation stream.
///
/// Appended once, never edited or removed. A post always carries content or
/// an attachment, never neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub class_id: String,
    pub author_name: String,
    /// Free-form display timestamp ("12:07 PM", "Yesterday"); not parseable
    pub date: String,
    pub created_at: DateTime<Utc>,
    /// Markdown-formatted body
    pub content: String,
    pub attachment: Option<Attachment>,
    #[serde(default)]
    pub citations: Vec<Citation>,
    #[serde(default)]
    pub is_ai: bool,
}

impl Post {
    /// A user-authored submission post
    pub fn user(
        class_id: impl Into<String>,
        author_name: impl Into<String>,
        content: impl Into<String>,
        attachment: Option<Attachment>,
    ) -> Self {
        let content = content.into();
        debug_assert!(
            !content.is_empty() || attachment.is_some(),
            "a post must carry content or a file"
        );
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            class_id: class_id.into(),
            author_name: author_name.into(),
            date: now.format("%-I:%M %p").to_string(),
            created_at: now,
            content,
            attachment,
            citations: Vec::new(),
            is_ai: false,
        }
    }

    /// An AI-helper answer post
    pub fn ai(
        class_id: impl Into<String>,
        author_name: impl Into<String>,
        content: impl Into<String>,
        citations: Vec<Citation>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            class_id: class_id.into(),
            author_name: author_name.into(),
            date: "Now".to_string(),
            created_at: now,
            content: content.into(),
            attachment: None,
            citations,
            is_ai: true,
        }
    }

    /// A hand-authored seed post with a custom display date
    pub fn seed(
        class_id: impl Into<String>,
        author_name: impl Into<String>,
        date: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            class_id: class_id.into(),
            author_name: author_name.into(),
            date: date.into(),
            created_at: Utc::now(),
            content: content.into(),
            attachment: None,
            citations: Vec::new(),
            is_ai: false,
        }
    }
}
