use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::application::interfaces::CompletionClient;
use crate::application::retry_policy::RetryPolicy;
use crate::domain::{
    Analysis, AnalysisRequest, AnalysisResult, Credential, Diagnosis, PromptBuilder,
    ProviderCatalog, ProviderId,
};

/// Orchestrates one opinion analysis: validate the input, resolve the
/// provider/model pair, then drive the completion client through the retry
/// policy. Every failure leaves as a classified [`Diagnosis`], never as a
/// raw transport error.
pub struct AnalyzeOpinionUseCase {
    catalog: ProviderCatalog,
    retry_policy: RetryPolicy,
    client: Arc<dyn CompletionClient>,
}

impl AnalyzeOpinionUseCase {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            catalog: ProviderCatalog::builtin(),
            retry_policy: RetryPolicy::default(),
            client,
        }
    }

    pub fn with_catalog(mut self, catalog: ProviderCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn catalog(&self) -> &ProviderCatalog {
        &self.catalog
    }

    pub async fn submit(
        &self,
        opinion: &str,
        provider: ProviderId,
        model: &str,
        credential: Credential,
    ) -> AnalysisResult {
        let prompt = match PromptBuilder::build(opinion) {
            Ok(prompt) => prompt,
            Err(_) => {
                warn!("Rejected submission: empty opinion");
                return Err(Diagnosis::empty_input(provider));
            }
        };

        let spec = match self.catalog.resolve(provider, model) {
            Ok(spec) => spec,
            Err(e) => {
                warn!("Rejected submission: {}", e);
                return Err(Diagnosis::from_catalog(provider, &e));
            }
        };

        let request = AnalysisRequest::new(spec, prompt, credential);
        info!(
            "[{}] Analyzing opinion with {} model {}",
            request.id(),
            provider,
            request.spec().model()
        );

        let started = Instant::now();
        let outcome = self
            .retry_policy
            .execute(provider, request.credential(), || {
                self.client.complete(&request)
            })
            .await;

        match outcome {
            Ok(text) => {
                info!(
                    "[{}] Analysis completed in {:.2}s",
                    request.id(),
                    started.elapsed().as_secs_f64()
                );
                Ok(Analysis::new(text))
            }
            Err(diagnosis) => {
                // Already scrubbed of the credential by the retry layer.
                warn!("[{}] Analysis failed: {}", request.id(), diagnosis);
                Err(diagnosis)
            }
        }
    }
}
