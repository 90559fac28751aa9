use async_trait::async_trait;
use tracing::debug;

use crate::application::CompletionClient;
use crate::domain::{AnalysisRequest, InvokeError};

/// Specimen critique shown when no provider is reachable. Walks the same
/// five steps a live model is instructed to follow, applied to the stock
/// "AI will fully replace human jobs" opinion.
const CANNED_ANALYSIS: &str = "\
**1. Premise breakdown**
- Core claim: AI will fully replace human jobs
- Hidden assumption: AI capability will surpass human capability across the board
- Chain of reasoning: technological progress leads to capability growth, which leads to complete substitution

**2. Counterfactual questions**
- What if AI development runs into a technical bottleneck?
- What if humans create entirely new categories of work?
- What if society chooses to restrict where AI may be applied?

**3. Logical gaps**
- Overlooks distinctly human strengths such as emotion and creativity
- Assumes technological progress is linear
- Ignores social and cultural factors

**4. The opposing position**
AI will collaborate with humans rather than replace them: people concentrate on creative, emotional, and strategic work while AI absorbs the repetitive tasks.

**5. Boundary conditions**
The claim holds only if several conditions line up at once: sustained AI breakthroughs, broad social acceptance, and an economic structure that permits full substitution.";

/// Offline [`CompletionClient`] that answers every request with a fixed
/// specimen critique. Used for demos and as the fallback when no API
/// credential resolves; it never touches the network and never fails.
#[derive(Default)]
pub struct CannedClient;

impl CannedClient {
    pub fn new() -> Self {
        Self
    }

    pub fn analysis_text() -> &'static str {
        CANNED_ANALYSIS
    }
}

#[async_trait]
impl CompletionClient for CannedClient {
    async fn complete(&self, request: &AnalysisRequest) -> Result<String, InvokeError> {
        debug!("[{}] Serving canned analysis (offline mode)", request.id());
        Ok(CANNED_ANALYSIS.to_string())
    }
}
