//! Mock implementations for testing
//!
//! These mocks enable integration testing without real I/O.

use super::traits::Transport;
use super::{BotRuntime, SessionStore, TransportError};
use crate::generation::GenerationFlow;
use crate::llm::{LlmError, LlmRequest, LlmResponse, LlmService};
use crate::session::{ChatKey, InMemorySessionStore, UserKey};
use crate::state_machine::{Event, Mode, Reply};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

// ============================================================================
// Mock LLM Service
// ============================================================================

/// Mock LLM service that returns queued responses
pub struct MockLlmService {
    responses: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    model_id: String,
    /// Record of all requests made
    pub requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlmService {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            model_id: model_id.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response
    pub fn queue_response(&self, response: LlmResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock response queued")))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

// ============================================================================
// Recording Transport
// ============================================================================

/// Something the runtime pushed to the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Typing(ChatKey),
    Reply(ChatKey, Reply),
}

/// Transport that records everything it is asked to send
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Outbound>>,
    failures_left: Mutex<usize>,
    typing_failures_left: Mutex<usize>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` `send_reply` calls fail without recording
    pub fn fail_next_replies(&self, n: usize) {
        *self.failures_left.lock().unwrap() = n;
    }

    /// Make the next `n` `send_typing` calls fail without recording
    pub fn fail_next_typing(&self, n: usize) {
        *self.typing_failures_left.lock().unwrap() = n;
    }

    pub fn sent(&self) -> Vec<Outbound> {
        self.sent.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_reply(&self, chat: ChatKey, reply: &Reply) -> Result<(), TransportError> {
        {
            let mut failures = self.failures_left.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(TransportError("injected failure".to_string()));
            }
        }
        self.sent
            .lock()
            .unwrap()
            .push(Outbound::Reply(chat, reply.clone()));
        Ok(())
    }

    async fn send_typing(&self, chat: ChatKey) -> Result<(), TransportError> {
        {
            let mut failures = self.typing_failures_left.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(TransportError("injected typing failure".to_string()));
            }
        }
        self.sent.lock().unwrap().push(Outbound::Typing(chat));
        Ok(())
    }
}

// ============================================================================
// Log Capture
// ============================================================================

/// Buffer that collects formatted log output
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Install a thread-local subscriber writing into this buffer
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Number of lines logged at `level` (e.g. "ERROR")
    pub fn count_level(&self, level: &str) -> usize {
        self.contents()
            .lines()
            .filter(|line| line.split_whitespace().nth(1) == Some(level))
            .count()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// Test Runtime Builder
// ============================================================================

pub type MockRuntime = BotRuntime<Arc<InMemorySessionStore>, Arc<RecordingTransport>>;

/// Builder for a runtime wired to in-memory mocks
#[derive(Default)]
pub struct TestRuntime {
    llm: Option<MockLlmService>,
}

/// Built test runtime with handles to its mocks
pub struct BuiltTestRuntime {
    pub runtime: MockRuntime,
    pub sessions: Arc<InMemorySessionStore>,
    pub transport: Arc<RecordingTransport>,
    pub llm: Option<Arc<MockLlmService>>,
}

impl TestRuntime {
    pub const USER: UserKey = UserKey(1001);
    pub const CHAT: ChatKey = ChatKey(2002);

    /// Runtime without a generation client
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn llm(mut self, llm: MockLlmService) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn build(self) -> BuiltTestRuntime {
        let sessions = Arc::new(InMemorySessionStore::new());
        let transport = Arc::new(RecordingTransport::new());
        let llm = self.llm.map(Arc::new);
        let generation =
            GenerationFlow::new(llm.clone().map(|l| l as Arc<dyn LlmService>));

        BuiltTestRuntime {
            runtime: BotRuntime::new(sessions.clone(), transport.clone(), generation),
            sessions,
            transport,
            llm,
        }
    }
}

impl BuiltTestRuntime {
    /// Dispatch an event from the default user, reporting errors like production
    pub async fn dispatch(&self, event: Event) {
        self.runtime
            .handle_or_report(TestRuntime::CHAT, TestRuntime::USER, event)
            .await;
    }

    pub async fn send(&self, text: &str) {
        self.dispatch(Event::text(text)).await;
    }

    pub async fn mode(&self) -> Mode {
        self.sessions.load(TestRuntime::USER).await.unwrap().mode
    }

    pub fn outbound(&self) -> Vec<Outbound> {
        self.transport.sent()
    }

    pub fn clear_outbound(&self) {
        self.transport.clear();
    }

    /// Only the replies, in order
    pub fn replies(&self) -> Vec<Reply> {
        self.transport
            .sent()
            .into_iter()
            .filter_map(|o| match o {
                Outbound::Reply(_, reply) => Some(reply),
                Outbound::Typing(_) => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_llm_service() {
        let mock = MockLlmService::new("test-model");
        mock.queue_response(LlmResponse::text("Hello"));

        let request = LlmRequest::new("hi");
        let response = mock.complete(&request).await.unwrap();
        assert_eq!(response.text, "Hello");

        // Second call should fail (no more responses)
        let result = mock.complete(&request).await;
        assert!(result.is_err());
        assert_eq!(mock.recorded_requests().len(), 2);
    }

    #[tokio::test]
    async fn test_recording_transport_failure_injection() {
        let transport = RecordingTransport::new();
        transport.fail_next_replies(1);

        let chat = ChatKey(1);
        assert!(transport.send_reply(chat, &Reply::plain("a")).await.is_err());
        assert!(transport.send_reply(chat, &Reply::plain("b")).await.is_ok());
        transport.send_typing(chat).await.unwrap();

        assert_eq!(
            transport.sent(),
            vec![
                Outbound::Reply(chat, Reply::plain("b")),
                Outbound::Typing(chat),
            ]
        );
    }

    #[tokio::test]
    async fn test_generation_records_prompt() {
        let llm = MockLlmService::new("test-model");
        llm.queue_response(LlmResponse::text("ok"));

        let rt = TestRuntime::new().llm(llm).build();
        rt.send("як справи?").await;

        let requests = rt.llm.as_ref().unwrap().recorded_requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].prompt.ends_with("як справи?"));
    }
}
