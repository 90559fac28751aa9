use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::application::CompletionClient;
use crate::connector::adapter::map_transport_error;
use crate::domain::{AnalysisRequest, InvokeError};

const MESSAGES_PATH: &str = "/v1/messages";
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Anthropic Messages API request payload. The system instruction rides in
/// a top-level field rather than in the messages array.
#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(serde::Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Minimal subset of the Messages API response we care about.
#[derive(Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

/// HTTP client for the Anthropic Messages API.
///
/// Authenticates with the `x-api-key` header and a pinned API version. The
/// timeout is applied per request, keeping construction infallible.
pub struct AnthropicClient {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl AnthropicClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), MESSAGES_PATH);
        Self {
            client: reqwest::Client::new(),
            url,
            timeout,
        }
    }
}

#[async_trait]
impl CompletionClient for AnthropicClient {
    async fn complete(&self, request: &AnalysisRequest) -> Result<String, InvokeError> {
        let payload = ApiRequest {
            model: request.spec().model(),
            max_tokens: request.spec().max_output_tokens(),
            temperature: request.spec().temperature(),
            system: request.prompt().system(),
            messages: vec![ApiMessage {
                role: "user",
                content: request.prompt().user(),
            }],
        };

        debug!("[{}] POST {} model={}", request.id(), self.url, request.spec().model());

        let response = self
            .client
            .post(&self.url)
            .timeout(self.timeout)
            .header("x-api-key", request.credential().expose())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
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
            .map_err(|e| InvokeError::malformed(format!("Failed to parse messages response: {e}")))?;

        if api_response.content.is_empty() {
            return Err(InvokeError::malformed("Messages response contained no content blocks"));
        }

        Ok(api_response
            .content
            .into_iter()
            .map(|block| block.text)
            .collect::<Vec<_>>()
            .join(""))
    }
}
