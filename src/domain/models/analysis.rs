use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Diagnosis, ModelSpec};

/// Provider API secret. `Debug` is redacted and the value is only reachable
/// through [`Credential::expose`], so a stray `{:?}` in a log line cannot
/// leak it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Credential([redacted])")
    }
}

/// Two-part prompt handed to a completion endpoint: the fixed system
/// instruction plus the user's opinion text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    system: String,
    user: String,
}

impl Prompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }

    pub fn system(&self) -> &str {
        &self.system
    }

    pub fn user(&self) -> &str {
        &self.user
    }
}

/// One submission's worth of invocation state. The id is fresh per
/// submission and ties retry attempts together in the logs.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    id: String,
    spec: ModelSpec,
    prompt: Prompt,
    credential: Credential,
}

impl AnalysisRequest {
    pub fn new(spec: ModelSpec, prompt: Prompt, credential: Credential) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            spec,
            prompt,
            credential,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn spec(&self) -> &ModelSpec {
        &self.spec
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }
}

/// Successful outcome: the model's critique, verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    text: String,
}

impl Analysis {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Discriminated outcome of one submission: either the critique text or a
/// classified, actionable diagnosis.
pub type AnalysisResult = Result<Analysis, Diagnosis>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ProviderId;

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("sk-secret-value");
        let rendered = format!("{credential:?}");

        assert!(!rendered.contains("sk-secret-value"));
        assert!(rendered.contains("redacted"));
        assert_eq!(credential.expose(), "sk-secret-value");
    }

    #[test]
    fn test_credential_emptiness_ignores_whitespace() {
        assert!(Credential::new("").is_empty());
        assert!(Credential::new("   ").is_empty());
        assert!(!Credential::new("sk-1").is_empty());
    }

    #[test]
    fn test_request_ids_are_unique() {
        let spec = ModelSpec::new(ProviderId::OpenAi, "gpt-4", 4000, 0.3);
        let prompt = Prompt::new("system", "user");

        let a = AnalysisRequest::new(spec.clone(), prompt.clone(), Credential::new("k"));
        let b = AnalysisRequest::new(spec, prompt, Credential::new("k"));

        assert_ne!(a.id(), b.id());
        assert!(!a.id().is_empty());
    }
}
