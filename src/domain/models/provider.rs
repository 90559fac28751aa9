use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::error::CatalogError;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";

/// Closed set of supported LLM vendors. Adding a vendor means adding a
/// variant here and a catalog entry, never matching on strings downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    OpenAi,
    Anthropic,
    DeepSeek,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "openai",
            ProviderId::Anthropic => "anthropic",
            ProviderId::DeepSeek => "deepseek",
        }
    }

    /// Human-facing vendor name, for hints and CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "OpenAI",
            ProviderId::Anthropic => "Anthropic",
            ProviderId::DeepSeek => "DeepSeek",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" | "gpt" => Ok(ProviderId::OpenAi),
            "anthropic" | "claude" => Ok(ProviderId::Anthropic),
            "deepseek" => Ok(ProviderId::DeepSeek),
            other => Err(CatalogError::unknown_provider(other)),
        }
    }
}

/// Wire protocol family a provider speaks. DeepSeek exposes an
/// OpenAI-compatible endpoint, so it shares the chat-completions codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiFlavor {
    OpenAiChat,
    AnthropicMessages,
}

impl ApiFlavor {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiFlavor::OpenAiChat => "openai_chat",
            ApiFlavor::AnthropicMessages => "anthropic_messages",
        }
    }
}

impl std::fmt::Display for ApiFlavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One fully-populated catalog entry: everything needed to construct a
/// request for this vendor. `models` must be non-empty; the first entry is
/// the default model.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    provider: ProviderId,
    available: bool,
    flavor: ApiFlavor,
    base_url: &'static str,
    credential_env: &'static str,
    models: &'static [&'static str],
    max_output_tokens: u32,
    default_temperature: f32,
}

impl ProviderConfig {
    pub fn new(
        provider: ProviderId,
        flavor: ApiFlavor,
        base_url: &'static str,
        credential_env: &'static str,
        models: &'static [&'static str],
        max_output_tokens: u32,
        default_temperature: f32,
    ) -> Self {
        assert!(
            !models.is_empty(),
            "catalog entry needs at least one model"
        );
        Self {
            provider,
            available: true,
            flavor,
            base_url,
            credential_env,
            models,
            max_output_tokens,
            default_temperature,
        }
    }

    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    pub fn label(&self) -> &'static str {
        self.provider.label()
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn flavor(&self) -> ApiFlavor {
        self.flavor
    }

    pub fn base_url(&self) -> &'static str {
        self.base_url
    }

    pub fn credential_env(&self) -> &'static str {
        self.credential_env
    }

    pub fn models(&self) -> &'static [&'static str] {
        self.models
    }

    pub fn default_model(&self) -> &'static str {
        // Non-emptiness is asserted at construction.
        self.models[0]
    }

    pub fn supports_model(&self, model: &str) -> bool {
        self.models.iter().any(|m| *m == model)
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    pub fn default_temperature(&self) -> f32 {
        self.default_temperature
    }
}

/// Everything an invocation needs to know about its target model, resolved
/// once by the catalog and carried through the request.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSpec {
    provider: ProviderId,
    model: String,
    max_output_tokens: u32,
    temperature: f32,
}

impl ModelSpec {
    pub fn new(
        provider: ProviderId,
        model: impl Into<String>,
        max_output_tokens: u32,
        temperature: f32,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            max_output_tokens,
            temperature,
        }
    }

    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}

/// Static registry of supported providers. Pure data: lookups never touch
/// the network and construction cannot fail.
#[derive(Debug, Clone)]
pub struct ProviderCatalog {
    entries: Vec<ProviderConfig>,
}

impl ProviderCatalog {
    pub fn new(entries: Vec<ProviderConfig>) -> Self {
        Self { entries }
    }

    /// The built-in registry: OpenAI, Anthropic, and DeepSeek with their
    /// production endpoints and supported chat models.
    pub fn builtin() -> Self {
        Self::new(vec![
            ProviderConfig::new(
                ProviderId::OpenAi,
                ApiFlavor::OpenAiChat,
                OPENAI_BASE_URL,
                "OPENAI_API_KEY",
                &["gpt-3.5-turbo", "gpt-4", "gpt-4-turbo-preview"],
                4000,
                0.3,
            ),
            ProviderConfig::new(
                ProviderId::Anthropic,
                ApiFlavor::AnthropicMessages,
                ANTHROPIC_BASE_URL,
                "ANTHROPIC_API_KEY",
                &[
                    "claude-3-5-sonnet-20241022",
                    "claude-3-haiku-20240307",
                    "claude-3-opus-20240229",
                ],
                4096,
                0.3,
            ),
            ProviderConfig::new(
                ProviderId::DeepSeek,
                ApiFlavor::OpenAiChat,
                DEEPSEEK_BASE_URL,
                "DEEPSEEK_API_KEY",
                &["deepseek-chat", "deepseek-coder", "deepseek-chat-pro"],
                4000,
                0.3,
            ),
        ])
    }

    /// Iterate the entries currently offered to users.
    pub fn providers(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.entries.iter().filter(|e| e.is_available())
    }

    /// Find the entry for `provider`, treating unavailable entries as absent.
    pub fn lookup(&self, provider: ProviderId) -> Result<&ProviderConfig, CatalogError> {
        self.entries
            .iter()
            .find(|e| e.provider() == provider && e.is_available())
            .ok_or_else(|| CatalogError::unknown_provider(provider.as_str()))
    }

    /// Validate a provider/model pair and produce the [`ModelSpec`] an
    /// invocation carries. The returned spec is always fully populated.
    pub fn resolve(&self, provider: ProviderId, model: &str) -> Result<ModelSpec, CatalogError> {
        let config = self.lookup(provider)?;
        if !config.supports_model(model) {
            return Err(CatalogError::unknown_model(provider, model, config.models()));
        }
        Ok(ModelSpec::new(
            provider,
            model,
            config.max_output_tokens(),
            config.default_temperature(),
        ))
    }

    pub fn default_model(&self, provider: ProviderId) -> Result<&'static str, CatalogError> {
        Ok(self.lookup(provider)?.default_model())
    }
}

impl Default for ProviderCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
