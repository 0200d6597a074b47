//! Generative backend clients.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::BackendConfig;

use super::LlmError;

/// Generative backend abstraction (allows mocking).
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one prompt and return the raw completion text.
    async fn complete(&self, prompt: &str, json_mode: bool) -> Result<String, LlmError>;

    /// Cheap reachability probe used by the health endpoint and the
    /// upload pre-check.
    async fn check_connection(&self) -> bool;
}

/// OpenAI-compatible chat-completions client for the Groq API.
pub struct GroqClient {
    api_url: String,
    api_key: String,
    model: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl GroqClient {
    pub fn new(config: &BackendConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
            client,
        }
    }
}

/// Request body for the chat-completions endpoint.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[async_trait]
impl LlmClient for GroqClient {
    async fn complete(&self, prompt: &str, json_mode: bool) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            response_format: json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
            max_tokens: None,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    LlmError::Connection(self.api_url.clone())
                } else if e.is_timeout() {
                    LlmError::Timeout {
                        secs: self.timeout_secs,
                    }
                } else {
                    LlmError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::ResponseParsing(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| LlmError::ResponseParsing("response contained no choices".into()))
    }

    async fn check_connection(&self) -> bool {
        if self.api_key.is_empty() {
            return false;
        }

        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            response_format: None,
            max_tokens: Some(1),
        };

        match self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .timeout(Duration::from_secs(10))
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

/// Mock backend for testing — returns scripted responses in order.
pub struct MockLlmClient {
    responses: tokio::sync::Mutex<VecDeque<Result<String, LlmError>>>,
    connected: bool,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            responses: tokio::sync::Mutex::new(VecDeque::new()),
            connected: true,
        }
    }

    /// A mock whose connectivity probe always fails.
    pub fn disconnected() -> Self {
        Self {
            connected: false,
            ..Self::new()
        }
    }

    pub fn with_response(mut self, response: &str) -> Self {
        self.responses.get_mut().push_back(Ok(response.to_string()));
        self
    }

    pub fn with_failure(mut self, error: LlmError) -> Self {
        self.responses.get_mut().push_back(Err(error));
        self
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, _prompt: &str, _json_mode: bool) -> Result<String, LlmError> {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::Connection("mock exhausted".into())))
    }

    async fn check_connection(&self) -> bool {
        self.connected
    }
}
