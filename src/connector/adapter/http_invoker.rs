use std::time::Duration;

use async_trait::async_trait;

use crate::application::CompletionClient;
use crate::domain::{
    AnalysisRequest, InvokeError, ProviderCatalog, ProviderId, ANTHROPIC_BASE_URL,
    DEEPSEEK_BASE_URL, OPENAI_BASE_URL,
};

use super::{AnthropicClient, OpenAiChatClient};

/// Default per-request timeout for provider calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Production [`CompletionClient`]: one vendor client per supported
/// provider, selected by the request's resolved spec.
///
/// Routing is a closed match on [`ProviderId`], so a new vendor cannot be
/// wired in without the compiler pointing at this dispatch.
pub struct HttpInvoker {
    timeout: Duration,
    openai: OpenAiChatClient,
    anthropic: AnthropicClient,
    deepseek: OpenAiChatClient,
}

impl HttpInvoker {
    pub fn new(timeout: Duration) -> Self {
        Self::from_catalog(&ProviderCatalog::builtin(), timeout)
    }

    /// Build vendor clients from the catalog's endpoints. Providers missing
    /// from the given catalog fall back to their production base URLs, so a
    /// trimmed catalog still yields a fully wired invoker.
    pub fn from_catalog(catalog: &ProviderCatalog, timeout: Duration) -> Self {
        let base = |provider: ProviderId, fallback: &'static str| -> &'static str {
            catalog
                .lookup(provider)
                .map(|config| config.base_url())
                .unwrap_or(fallback)
        };

        Self {
            timeout,
            openai: OpenAiChatClient::new(base(ProviderId::OpenAi, OPENAI_BASE_URL), timeout),
            anthropic: AnthropicClient::new(
                base(ProviderId::Anthropic, ANTHROPIC_BASE_URL),
                timeout,
            ),
            deepseek: OpenAiChatClient::new(base(ProviderId::DeepSeek, DEEPSEEK_BASE_URL), timeout),
        }
    }

    /// Repoint one provider at a different endpoint, e.g. a local
    /// OpenAI-compatible server or a test double.
    pub fn with_base_url(mut self, provider: ProviderId, base_url: &str) -> Self {
        match provider {
            ProviderId::OpenAi => self.openai = OpenAiChatClient::new(base_url, self.timeout),
            ProviderId::Anthropic => self.anthropic = AnthropicClient::new(base_url, self.timeout),
            ProviderId::DeepSeek => self.deepseek = OpenAiChatClient::new(base_url, self.timeout),
        }
        self
    }
}

impl Default for HttpInvoker {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl CompletionClient for HttpInvoker {
    async fn complete(&self, request: &AnalysisRequest) -> Result<String, InvokeError> {
        match request.spec().provider() {
            ProviderId::OpenAi => self.openai.complete(request).await,
            ProviderId::Anthropic => self.anthropic.complete(request).await,
            ProviderId::DeepSeek => self.deepseek.complete(request).await,
        }
    }
}
