use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::application::CompletionClient;
use crate::connector::adapter::map_transport_error;
use crate::domain::{AnalysisRequest, InvokeError};

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// OpenAI chat-completions request payload.
#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(serde::Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Minimal subset of the chat-completions response we care about.
#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// HTTP client for OpenAI-style chat-completions endpoints.
///
/// DeepSeek exposes the same protocol, so one codec serves both vendors;
/// only the base URL differs. The timeout is applied per request, keeping
/// construction infallible.
pub struct OpenAiChatClient {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl OpenAiChatClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), CHAT_COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::new(),
            url,
            timeout,
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiChatClient {
    async fn complete(&self, request: &AnalysisRequest) -> Result<String, InvokeError> {
        let payload = ApiRequest {
            model: request.spec().model(),
            temperature: request.spec().temperature(),
            max_tokens: request.spec().max_output_tokens(),
            messages: vec![
                ApiMessage {
                    role: "system",
                    content: request.prompt().system(),
                },
                ApiMessage {
                    role: "user",
                    content: request.prompt().user(),
                },
            ],
        };

        debug!("[{}] POST {} model={}", request.id(), self.url, request.spec().model());

        let response = self
            .client
            .post(&self.url)
            .timeout(self.timeout)
            .bearer_auth(request.credential().expose())
            .json(&payload)
            .send()
            .await
            .map_err(|e| map_transport_error(&e, self.timeout))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(InvokeError::api(status, body));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| InvokeError::malformed(format!("Failed to parse chat completion: {e}")))?;

        api_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| InvokeError::malformed("Chat completion contained no choices"))
    }
}
