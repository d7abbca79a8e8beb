//! Mock implementations for testing
//!
//! These mocks enable exercising the client and store without real I/O.

use super::types::{AnswerReply, AnswerRequest, AnswerResult, AttachmentData};
use super::{AnswerError, AnswerService, AnswerTransport};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock transport that returns queued replies and records every request
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<AnswerReply, AnswerError>>>,
    /// Record of all requests made
    requests: Mutex<Vec<AnswerRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful reply
    pub fn queue_reply(&self, reply: AnswerReply) {
        self.replies.lock().unwrap().push_back(Ok(reply));
    }

    /// Queue an error reply
    pub fn queue_error(&self, error: AnswerError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<AnswerRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnswerTransport for MockTransport {
    async fn generate(&self, request: &AnswerRequest) -> Result<AnswerReply, AnswerError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AnswerError::network("No mock reply queued")))
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }
}

/// Transport that fails every request
pub struct FailingTransport;

#[async_trait]
impl AnswerTransport for FailingTransport {
    async fn generate(&self, _request: &AnswerRequest) -> Result<AnswerReply, AnswerError> {
        Err(AnswerError::server_error("Simulated backend failure"))
    }

    fn model_id(&self) -> &str {
        "failing-model"
    }
}

/// Transport that never resolves (for timeout testing)
pub struct PendingTransport;

#[async_trait]
impl AnswerTransport for PendingTransport {
    async fn generate(&self, _request: &AnswerRequest) -> Result<AnswerReply, AnswerError> {
        std::future::pending().await
    }

    fn model_id(&self) -> &str {
        "pending-model"
    }
}

/// Mock store-facing service with queued results and recorded calls
pub struct MockAnswerService {
    results: Mutex<VecDeque<AnswerResult>>,
    /// (question, subject context, attachment MIME type) per call
    calls: Mutex<Vec<(String, String, Option<String>)>>,
    /// Optional gate: when set, `answer()` waits here until released,
    /// letting tests observe in-flight state
    gate: Option<tokio::sync::Semaphore>,
}

impl MockAnswerService {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Hold every `answer()` call until a permit is added to the gate
    pub fn gated() -> Self {
        Self {
            gate: Some(tokio::sync::Semaphore::new(0)),
            ..Self::new()
        }
    }

    pub fn queue_result(&self, result: AnswerResult) {
        self.results.lock().unwrap().push_back(result);
    }

    /// Release one gated call
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub fn recorded_calls(&self) -> Vec<(String, String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAnswerService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnswerService for MockAnswerService {
    async fn answer(
        &self,
        question: &str,
        subject_context: &str,
        attachment: Option<&AttachmentData>,
    ) -> AnswerResult {
        self.calls.lock().unwrap().push((
            question.to_string(),
            subject_context.to_string(),
            attachment.map(|a| a.mime_type.clone()),
        ));

        if let Some(gate) = &self.gate {
            // Permit is intentionally forgotten so each release frees one call
            gate.acquire().await.expect("gate closed").forget();
        }

        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| AnswerResult::text_only("mock answer"))
    }
}
