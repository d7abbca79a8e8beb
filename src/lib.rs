//! Classroom stream core
//!
//! The reproducible heart of a classroom-style homework helper: an
//! in-memory conversation store (per-class post stream, single-flight
//! submission orchestration) and a Gemini-backed answer client that returns
//! Markdown answers with grounded web citations.
//!
//! Presentation is someone else's job: a UI collaborator renders
//! [`ConversationStore`] snapshots and drives its two mutators,
//! `select_class` and `submit`.

pub mod classes;
pub mod llm;
pub mod store;
pub mod stream;

pub use classes::{default_classes, seed_posts, ClassContext};
pub use llm::{
    AnswerClient, AnswerConfig, AnswerResult, AnswerService, AttachmentData, Citation,
};
pub use store::{ConversationStore, SubmitError};
pub use stream::{Attachment, Post};
