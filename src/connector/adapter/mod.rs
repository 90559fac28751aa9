mod anthropic_client;
mod canned_client;
mod http_invoker;
mod openai_client;

pub use anthropic_client::*;
pub use canned_client::*;
pub use http_invoker::*;
pub use openai_client::*;

use std::time::Duration;

use crate::domain::InvokeError;

/// Shared mapping from reqwest transport failures to the raw invocation
/// error the classifier understands. HTTP-status failures are handled by
/// each client; this only covers errors where no response arrived.
pub(crate) fn map_transport_error(e: &reqwest::Error, timeout: Duration) -> InvokeError {
    if e.is_timeout() {
        InvokeError::Timeout(timeout.as_secs())
    } else if e.is_connect() {
        InvokeError::connect(e.to_string())
    } else {
        InvokeError::unexpected(format!("Request failed: {e}"))
    }
}
