use crate::backend::ChatBackend;
use crate::context::PageContextProvider;
use crate::models::{ChatContext, ChatMessage, ChatRequest, ChatRole};
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub const LOADING_TEXT: &str = "Thinking...";
pub const GREETING: &str = "hi";

/// A chat conversation bound to one page.
///
/// Sends are serialized: a second [`ChatClient::send_message`] shows its
/// user message right away but waits for the request in flight to finish
/// before issuing its own, so replies land in send order and at most one
/// loading placeholder is ever visible.
pub struct ChatClient<P, B> {
    provider: P,
    backend: B,
    messages: Mutex<Vec<ChatMessage>>,
    last_context: Mutex<Option<ChatContext>>,
    in_flight: Mutex<()>,
    next_seq: AtomicU64,
}

impl<P, B> ChatClient<P, B>
where
    P: PageContextProvider,
    B: ChatBackend,
{
    pub fn new(provider: P, backend: B) -> Self {
        Self {
            provider,
            backend,
            messages: Mutex::new(Vec::new()),
            last_context: Mutex::new(None),
            in_flight: Mutex::new(()),
            next_seq: AtomicU64::new(0),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Sends `text` with a freshly gathered context. Returns the id of the
    /// `ai` message that ends the exchange, or `None` for blank input.
    pub async fn send_message(&self, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.add_message(ChatRole::User, text).await;
        Some(self.exchange(text).await)
    }

    /// Sends the opening greeting without showing it as a user message.
    pub async fn greet(&self) -> String {
        self.exchange(GREETING).await
    }

    pub async fn gather_page_context(&self) -> ChatContext {
        let context = self.provider.gather();
        *self.last_context.lock().await = Some(context.clone());
        context
    }

    /// Context sent with the most recent request.
    pub async fn context(&self) -> Option<ChatContext> {
        self.last_context.lock().await.clone()
    }

    pub async fn add_message(&self, role: ChatRole, content: impl Into<String>) -> String {
        let message = self.new_message(role, content.into());
        let id = message.id.clone();
        self.messages.lock().await.push(message);
        id
    }

    pub async fn remove_message(&self, id: &str) -> bool {
        let mut messages = self.messages.lock().await;
        let before = messages.len();
        messages.retain(|message| message.id != id);
        messages.len() != before
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.messages.lock().await.clone()
    }

    pub async fn loading_count(&self) -> usize {
        self.messages
            .lock()
            .await
            .iter()
            .filter(|message| message.role == ChatRole::Loading)
            .count()
    }

    async fn exchange(&self, text: &str) -> String {
        let _slot = self.in_flight.lock().await;

        let context = self.gather_page_context().await;
        let loading_id = self.add_message(ChatRole::Loading, LOADING_TEXT).await;
        debug!(page = %context.current_page, "sending chat message");
        let request = ChatRequest {
            message: text.to_string(),
            context: Some(context),
        };

        let content = match self.backend.send(&request).await {
            Ok(reply) => {
                info!(chars = reply.chars().count(), "chat reply received");
                reply
            }
            Err(err) => {
                warn!(error = %err, detail = ?err, "chat request failed");
                err.user_message().to_string()
            }
        };

        let reply = self.new_message(ChatRole::Ai, content);
        let reply_id = reply.id.clone();
        let mut messages = self.messages.lock().await;
        messages.retain(|message| message.id != loading_id);
        messages.push(reply);
        reply_id
    }

    fn new_message(&self, role: ChatRole, content: String) -> ChatMessage {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        ChatMessage {
            id: format!("msg-{}-{seq}", Utc::now().timestamp_millis()),
            role,
            content,
        }
    }
}
