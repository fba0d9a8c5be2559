use crate::config::Config;
use crate::error::{InterpretError, InterpretResult};
use crate::llm::receive::decode_response;
use crate::llm::CompletionEndpoint;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Instant;
use tracing::{debug, info, instrument};

pub const RESPONSE_MODE_BLOCKING: &str = "blocking";

/// Body of a `POST {base_url}/chat-messages` call.
#[derive(Serialize, Debug)]
pub struct ChatMessageRequest<'a> {
    pub query: &'a str,
    pub response_mode: &'static str,
    pub user: &'a str,
    pub inputs: Map<String, Value>,
    pub auto_generate_name: bool,
}

impl<'a> ChatMessageRequest<'a> {
    pub fn blocking(query: &'a str, user: &'a str) -> Self {
        Self {
            query,
            response_mode: RESPONSE_MODE_BLOCKING,
            user,
            inputs: Map::new(),
            auto_generate_name: false,
        }
    }
}

/// Single-shot client for the chat-messages completion API. One request,
/// no retries; the timeout is enforced by the underlying HTTP client.
pub struct ChatMessagesClient {
    client: Client,
    endpoint: String,
    api_key: String,
    user: String,
}

impl ChatMessagesClient {
    pub fn new(config: &Config) -> InterpretResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| InterpretError::Transport {
                timeout: false,
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
            api_key: config.api_key.clone(),
            user: config.user.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionEndpoint for ChatMessagesClient {
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    async fn complete(&self, query: &str) -> InterpretResult<String> {
        let body = ChatMessageRequest::blocking(query, &self.user);
        let start = Instant::now();

        info!(url = %self.endpoint, "Sending completion request");
        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        info!(
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Completion response received"
        );
        debug!(body_len = text.len(), "Decoding completion response");

        decode_response(status, &text)
    }
}

fn transport_error(e: reqwest::Error) -> InterpretError {
    InterpretError::Transport {
        timeout: e.is_timeout(),
        message: if e.is_timeout() {
            "Request timeout - the API took too long to respond".to_string()
        } else if e.is_connect() {
            format!("Connection error - unable to reach the API: {}", e)
        } else {
            format!("Network error: {}", e)
        },
    }
}
