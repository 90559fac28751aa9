use serde::{Deserialize, Serialize};

use super::ProviderId;
use crate::domain::error::CatalogError;

/// Classified failure taxonomy. Every failed submission lands on exactly
/// one of these kinds, and only transient kinds are worth retrying with
/// identical parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    EmptyInput,
    UnknownProvider,
    UnknownModel,
    Timeout,
    InvalidModel,
    InvalidCredential,
    QuotaExceeded,
    ProviderError,
    UnknownError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::EmptyInput => "empty_input",
            ErrorKind::UnknownProvider => "unknown_provider",
            ErrorKind::UnknownModel => "unknown_model",
            ErrorKind::Timeout => "timeout",
            ErrorKind::InvalidModel => "invalid_model",
            ErrorKind::InvalidCredential => "invalid_credential",
            ErrorKind::QuotaExceeded => "quota_exceeded",
            ErrorKind::ProviderError => "provider_error",
            ErrorKind::UnknownError => "unknown_error",
        }
    }

    /// Whether a retry with identical parameters may succeed. Credential,
    /// quota, and model problems need user action first, so only timeouts
    /// (including connectivity drops, which classify here) qualify.
    pub fn is_transient(&self) -> bool {
        matches!(self, ErrorKind::Timeout)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Actionable failure report handed to whatever renders the outcome: the
/// taxonomy kind, the provider it happened against, a human-readable
/// message, and an optional remediation hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    kind: ErrorKind,
    provider: ProviderId,
    message: String,
    hint: Option<String>,
}

impl Diagnosis {
    pub fn new(kind: ErrorKind, provider: ProviderId, message: impl Into<String>) -> Self {
        Self {
            kind,
            provider,
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn empty_input(provider: ProviderId) -> Self {
        Self::new(
            ErrorKind::EmptyInput,
            provider,
            "Opinion text is empty; nothing was submitted",
        )
        .with_hint("Enter a non-empty opinion to analyze.")
    }

    pub fn from_catalog(provider: ProviderId, err: &CatalogError) -> Self {
        match err {
            CatalogError::UnknownProvider(_) => Self::new(
                ErrorKind::UnknownProvider,
                provider,
                err.to_string(),
            )
            .with_hint("Supported providers: openai, anthropic, deepseek."),
            CatalogError::UnknownModel { .. } => Self::new(
                ErrorKind::UnknownModel,
                provider,
                err.to_string(),
            )
            .with_hint(format!(
                "Pick one of the listed {} models, or leave the model unset to use the default.",
                provider.label()
            )),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn is_transient(&self) -> bool {
        self.kind.is_transient()
    }

    /// Scrub every occurrence of `secret` from the message and hint.
    /// Provider error bodies sometimes echo the key that was sent; a
    /// diagnosis must be safe to log and display as-is.
    pub fn redacted(mut self, secret: &str) -> Self {
        if secret.trim().is_empty() {
            return self;
        }
        self.message = self.message.replace(secret, "[redacted]");
        if let Some(hint) = self.hint.take() {
            self.hint = Some(hint.replace(secret, "[redacted]"));
        }
        self
    }
}

impl std::fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_timeout_is_transient() {
        let kinds = [
            ErrorKind::EmptyInput,
            ErrorKind::UnknownProvider,
            ErrorKind::UnknownModel,
            ErrorKind::Timeout,
            ErrorKind::InvalidModel,
            ErrorKind::InvalidCredential,
            ErrorKind::QuotaExceeded,
            ErrorKind::ProviderError,
            ErrorKind::UnknownError,
        ];

        for kind in kinds {
            assert_eq!(kind.is_transient(), kind == ErrorKind::Timeout);
        }
    }

    #[test]
    fn test_display_includes_kind_and_message() {
        let diagnosis = Diagnosis::new(
            ErrorKind::QuotaExceeded,
            ProviderId::OpenAi,
            "API returned 429: quota exhausted",
        );

        assert_eq!(
            diagnosis.to_string(),
            "quota_exceeded: API returned 429: quota exhausted"
        );
    }

    #[test]
    fn test_redacted_scrubs_secret_from_message_and_hint() {
        let diagnosis = Diagnosis::new(
            ErrorKind::InvalidCredential,
            ProviderId::Anthropic,
            "API returned 401: key sk-ant-12345 rejected",
        )
        .with_hint("Key sk-ant-12345 looks malformed")
        .redacted("sk-ant-12345");

        assert!(!diagnosis.message().contains("sk-ant-12345"));
        assert!(diagnosis.message().contains("[redacted]"));
        assert_eq!(
            diagnosis.hint(),
            Some("Key [redacted] looks malformed")
        );
    }

    #[test]
    fn test_redacted_ignores_blank_secret() {
        let diagnosis = Diagnosis::new(
            ErrorKind::ProviderError,
            ProviderId::OpenAi,
            "API returned 500: upstream error",
        )
        .redacted("  ");

        assert_eq!(diagnosis.message(), "API returned 500: upstream error");
    }

    #[test]
    fn test_catalog_errors_map_to_taxonomy() {
        let unknown_provider = Diagnosis::from_catalog(
            ProviderId::OpenAi,
            &CatalogError::unknown_provider("mistral"),
        );
        assert_eq!(unknown_provider.kind(), ErrorKind::UnknownProvider);
        assert!(unknown_provider.message().contains("mistral"));

        let unknown_model = Diagnosis::from_catalog(
            ProviderId::OpenAi,
            &CatalogError::unknown_model(ProviderId::OpenAi, "gpt-99", &["gpt-4"]),
        );
        assert_eq!(unknown_model.kind(), ErrorKind::UnknownModel);
        assert!(unknown_model.message().contains("gpt-99"));
        assert!(unknown_model.message().contains("gpt-4"));
        assert!(unknown_model.hint().is_some());
    }
}
