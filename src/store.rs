//! Conversation store: the post stream and its single-flight submission gate
//!
//! Owns the append-only post sequence, the active-class selection, and the
//! pending flag. The answer-service call inside [`ConversationStore::submit`]
//! is the store's only suspend point; the stream mutex is never held across
//! it.

use crate::classes::ClassContext;
use crate::llm::{AnswerService, AttachmentData};
use crate::stream::{Attachment, Post};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Display name for user-authored posts
const USER_AUTHOR: &str = "You";

/// Rejection signals from [`ConversationStore::submit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// A submission is already awaiting an answer. The gate is the store's
    /// own, not a cooperating caller's.
    #[error("a submission is already awaiting an answer")]
    Busy,
}

struct StreamState {
    posts: Vec<Post>,
    active_class_id: String,
    pending: bool,
}

/// Mediator between user input and the answer service.
///
/// Posts are only ever appended here; presentation collaborators get
/// read-only snapshots and the two mutators `select_class` and `submit`.
pub struct ConversationStore {
    state: Mutex<StreamState>,
    classes: Vec<ClassContext>,
    service: Arc<dyn AnswerService>,
}

impl ConversationStore {
    /// The first class in the roster starts active.
    pub fn new(classes: Vec<ClassContext>, service: Arc<dyn AnswerService>) -> Self {
        let active_class_id = classes.first().map(|c| c.id.clone()).unwrap_or_default();
        Self {
            state: Mutex::new(StreamState {
                posts: Vec::new(),
                active_class_id,
                pending: false,
            }),
            classes,
            service,
        }
    }

    /// Pre-populate the stream, e.g. with [`crate::classes::seed_posts`].
    #[must_use]
    pub fn with_seed_posts(self, posts: Vec<Post>) -> Self {
        self.state.lock().unwrap().posts = posts;
        self
    }

    /// Set the active class. Stored posts are untouched; only the visible
    /// subset changes. Callers are trusted to pass ids from the roster.
    pub fn select_class(&self, class_id: &str) {
        let mut state = self.state.lock().unwrap();
        tracing::debug!(from = %state.active_class_id, to = %class_id, "Class selected");
        state.active_class_id = class_id.to_string();
    }

    /// Snapshot of the full stored sequence, all classes
    pub fn posts(&self) -> Vec<Post> {
        self.state.lock().unwrap().posts.clone()
    }

    /// Snapshot of the active class's posts, in insertion order
    pub fn visible_posts(&self) -> Vec<Post> {
        let state = self.state.lock().unwrap();
        state
            .posts
            .iter()
            .filter(|post| post.class_id == state.active_class_id)
            .cloned()
            .collect()
    }

    pub fn active_class_id(&self) -> String {
        self.state.lock().unwrap().active_class_id.clone()
    }

    /// The active class descriptor; falls back to the first roster entry
    /// when the active id is unknown.
    pub fn active_class(&self) -> Option<ClassContext> {
        let active_id = self.active_class_id();
        self.classes
            .iter()
            .find(|c| c.id == active_id)
            .or_else(|| self.classes.first())
            .cloned()
    }

    /// Whether an answer request is in flight
    pub fn is_pending(&self) -> bool {
        self.state.lock().unwrap().pending
    }

    /// Submit a question (and optional attachment) to the active class.
    ///
    /// Appends the user post and sets the pending flag before suspending on
    /// the answer service; appends exactly one AI post and clears the flag
    /// after it resolves. Failures arrive as apologetic AI-post text, never
    /// as an error from this method.
    ///
    /// Empty text with no attachment is a no-op. A call while another is
    /// pending is rejected with [`SubmitError::Busy`] without touching state.
    pub async fn submit(
        &self,
        question_text: &str,
        attachment: Option<Attachment>,
    ) -> Result<(), SubmitError> {
        if question_text.is_empty() && attachment.is_none() {
            return Ok(());
        }

        let Some(class) = self.active_class() else {
            // Empty roster; nothing sensible to post against
            return Ok(());
        };

        let prompt = if question_text.is_empty() {
            let name = attachment
                .as_ref()
                .map(|a| a.file_name.as_str())
                .unwrap_or_default();
            format!("Please analyze the attached file \"{name}\" and help me solve the problem in it.")
        } else {
            question_text.to_string()
        };

        let payload = attachment
            .as_ref()
            .map(|a| AttachmentData::new(a.bytes.clone(), a.mime_type.clone()));

        // The AI post lands in the class that was active at submission time,
        // even if the user switches classes while the answer is in flight.
        let class_id = class.id.clone();

        {
            let mut state = self.state.lock().unwrap();
            if state.pending {
                return Err(SubmitError::Busy);
            }
            state.posts.push(Post::user(
                class_id.as_str(),
                USER_AUTHOR,
                prompt.as_str(),
                attachment,
            ));
            state.pending = true;
            tracing::info!(
                class_id = %class_id,
                has_attachment = payload.is_some(),
                "Submission accepted"
            );
        }

        let result = self
            .service
            .answer(&prompt, &class.subject_context, payload.as_ref())
            .await;

        let mut state = self.state.lock().unwrap();
        state.pending = false;
        tracing::info!(
            class_id = %class_id,
            citations = result.citations.len(),
            "Answer posted"
        );
        state.posts.push(Post::ai(
            class_id.as_str(),
            class.ai_helper_name(),
            result.text,
            result.citations,
        ));
        Ok(())
    }
}
