//! Visitor chat widget: a transcript plus a single in-flight message to the chat backend.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

pub const APOLOGY_MESSAGE: &str =
    "Sorry, I'm having trouble responding right now. Please try again or call us directly.";

/// `POST /api/chat` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub response: String,
    pub thread_id: String,
}

/// Produces assistant replies, continuing the conversation named by the thread id.
pub trait ChatBackend: Send + Sync {
    fn reply(&self, request: &ChatRequest) -> Result<ChatReply, ChatError>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyMessage,
    #[error("a reply is still pending")]
    AwaitingReply,
    #[error("chat backend failed: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Visitor,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    transcript: Vec<ChatMessage>,
    thread_id: Option<String>,
    pending: bool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        Self {
            transcript: vec![ChatMessage {
                speaker: Speaker::Assistant,
                text: greeting.into(),
            }],
            ..Self::default()
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Records the visitor's message and returns the request to send. Blank input and a second
    /// send while waiting are refused without touching the transcript.
    pub fn begin_send(&mut self, message: &str) -> Result<ChatRequest, ChatError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if self.pending {
            return Err(ChatError::AwaitingReply);
        }

        self.transcript.push(ChatMessage {
            speaker: Speaker::Visitor,
            text: message.to_string(),
        });
        self.pending = true;

        Ok(ChatRequest {
            message: message.to_string(),
            thread_id: self.thread_id.clone(),
        })
    }

    /// Settles the in-flight request. Failures are shown to the visitor as an apology.
    pub fn receive(&mut self, outcome: Result<ChatReply, ChatError>) -> &ChatMessage {
        self.pending = false;
        let text = match outcome {
            Ok(reply) => {
                debug!(thread_id = %reply.thread_id, "chat reply received");
                self.thread_id = Some(reply.thread_id);
                reply.response
            }
            Err(err) => {
                warn!(error = %err, "chat backend failed");
                APOLOGY_MESSAGE.to_string()
            }
        };

        self.transcript.push(ChatMessage {
            speaker: Speaker::Assistant,
            text,
        });
        let last = self.transcript.len() - 1;
        &self.transcript[last]
    }

    pub fn send<B>(&mut self, backend: &B, message: &str) -> Result<&ChatMessage, ChatError>
    where
        B: ChatBackend + ?Sized,
    {
        let request = self.begin_send(message)?;
        let outcome = backend.reply(&request);
        Ok(self.receive(outcome))
    }
}

/// `POST /api/v1/chat`, forwarding to the configured backend.
pub fn chat_router<B>(backend: Arc<B>) -> Router
where
    B: ChatBackend + 'static,
{
    Router::new()
        .route("/api/v1/chat", post(chat_handler::<B>))
        .with_state(backend)
}

pub(crate) async fn chat_handler<B>(
    State(backend): State<Arc<B>>,
    Json(request): Json<ChatRequest>,
) -> Response
where
    B: ChatBackend + 'static,
{
    if request.message.trim().is_empty() {
        let payload = json!({ "error": ChatError::EmptyMessage.to_string() });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    }

    match backend.reply(&request) {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(err) => {
            warn!(error = %err, "chat backend failed");
            let payload = json!({ "error": err.to_string() });
            (StatusCode::BAD_GATEWAY, Json(payload)).into_response()
        }
    }
}
