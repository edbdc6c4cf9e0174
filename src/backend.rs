use crate::errors::ChatError;
use crate::models::{ChatReply, ChatRequest};
use async_trait::async_trait;

pub const CHAT_PATH: &str = "/chat";

/// Delivers one chat request and yields the reply text.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<String, ChatError>;
}

/// `POST {base_url}/chat` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{CHAT_PATH}", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn send(&self, request: &ChatRequest) -> Result<String, ChatError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let reply: ChatReply =
            serde_json::from_slice(&body).map_err(|err| ChatError::Decode(err.to_string()))?;
        interpret_reply(reply)
    }
}

/// An `error` field wins over `response`; an empty `response` is no reply.
pub fn interpret_reply(reply: ChatReply) -> Result<String, ChatError> {
    if let Some(error) = reply.error.filter(|error| !error.is_empty()) {
        return Err(ChatError::Backend(error));
    }
    match reply.response {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ChatError::InvalidResponse),
    }
}
