use crate::domain::error::InvokeError;
use crate::domain::models::{Diagnosis, ErrorKind, ProviderId};

/// Maps a raw invocation failure onto the error taxonomy.
///
/// Pure and deterministic: the same cause always produces the same kind.
/// Transport failures are recognized by variant; provider failures by the
/// HTTP status and case-insensitive substrings of the returned detail text,
/// since the vendors agree on wording ("quota", "invalid_api_key") more
/// reliably than on response schemas.
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn classify(cause: &InvokeError, provider: ProviderId) -> Diagnosis {
        let message = cause.to_string();
        match cause {
            InvokeError::Timeout(_) | InvokeError::Connect(_) => {
                Diagnosis::new(ErrorKind::Timeout, provider, message)
                    .with_hint("Retry in a moment and check your network connection.")
            }
            InvokeError::Api { status, .. } => {
                Self::from_detail(provider, message, Some(*status), true)
            }
            InvokeError::Malformed(_) => Self::from_detail(provider, message, None, true),
            InvokeError::Unexpected(_) => Self::from_detail(provider, message, None, false),
        }
    }

    /// Substring table first, HTTP status second, then the api-level /
    /// unknown fallback. Mirrors how the vendors actually report problems:
    /// a machine-readable code inside the error body, with the status as a
    /// coarser backup.
    fn from_detail(
        provider: ProviderId,
        message: String,
        status: Option<u16>,
        api_level: bool,
    ) -> Diagnosis {
        let lower = message.to_lowercase();
        let label = provider.label();

        if lower.contains("model_not_found") || lower.contains("model not found") {
            Diagnosis::new(ErrorKind::InvalidModel, provider, message)
                .with_hint(format!("Pick a supported {label} model and resubmit."))
        } else if lower.contains("invalid_api_key") || lower.contains("authentication") {
            Self::credential_rejected(provider, message)
        } else if lower.contains("quota") || lower.contains("billing") || lower.contains("balance")
        {
            Self::quota_exhausted(provider, message)
        } else if matches!(status, Some(401) | Some(403)) {
            Self::credential_rejected(provider, message)
        } else if status == Some(429) {
            Self::quota_exhausted(provider, message)
        } else if api_level {
            Diagnosis::new(ErrorKind::ProviderError, provider, message)
                .with_hint(format!("Verify your {label} API key and network connection."))
        } else {
            Diagnosis::new(ErrorKind::UnknownError, provider, message)
        }
    }

    fn credential_rejected(provider: ProviderId, message: String) -> Diagnosis {
        let label = provider.label();
        Diagnosis::new(ErrorKind::InvalidCredential, provider, message)
            .with_hint(format!("Double-check your {label} API key."))
    }

    fn quota_exhausted(provider: ProviderId, message: String) -> Diagnosis {
        let label = provider.label();
        Diagnosis::new(ErrorKind::QuotaExceeded, provider, message)
            .with_hint(format!("Check your {label} account balance and billing status."))
    }
}
