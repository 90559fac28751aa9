use thiserror::Error;

use crate::domain::models::ProviderId;

/// Rejection raised before any prompt is assembled.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PromptError {
    #[error("Opinion text is empty")]
    EmptyOpinion,
}

/// Failure to resolve a provider/model pair against the catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Unknown model '{model}' for provider {provider} (known models: {known})")]
    UnknownModel {
        provider: ProviderId,
        model: String,
        known: String,
    },
}

impl CatalogError {
    pub fn unknown_provider(name: impl Into<String>) -> Self {
        Self::UnknownProvider(name.into())
    }

    pub fn unknown_model(provider: ProviderId, model: impl Into<String>, known: &[&str]) -> Self {
        Self::UnknownModel {
            provider,
            model: model.into(),
            known: known.join(", "),
        }
    }

    pub fn is_unknown_provider(&self) -> bool {
        matches!(self, Self::UnknownProvider(_))
    }
}

/// Raw outcome of a single completion attempt, before classification.
///
/// Carries everything the classifier needs to place the failure in the
/// taxonomy: the transport-level shape (timeout vs. refused connection vs.
/// an HTTP status) plus whatever detail text the provider returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvokeError {
    #[error("Request did not complete within {0}s")]
    Timeout(u64),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Unexpected failure: {0}")]
    Unexpected(String),
}

impl InvokeError {
    pub fn connect(msg: impl Into<String>) -> Self {
        Self::Connect(msg.into())
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Connect(_))
    }

    /// True when the failure came back from the provider itself (an HTTP
    /// status or an unparseable body) rather than from the transport.
    pub fn is_api_level(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::Malformed(_))
    }
}
