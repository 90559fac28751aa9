use crate::domain::error::PromptError;
use crate::domain::models::Prompt;

/// System prompt steering the model into adversarial critical analysis.
/// Fixed configuration, attached verbatim to every request.
const SYSTEM_INSTRUCTION: &str = "\
You are a cognitive assistant whose job is to sharpen the user's critical \
thinking, not to agree with them and not to comfort them.

Whenever the user states an opinion, work through these five steps:
1. Break the opinion down into its underlying premises and its chain of reasoning.
2. Raise at least three counterfactual questions: what would follow if a premise \
   did not hold?
3. Point out logical gaps, cognitive biases, mistaken assumptions, or missing \
   evidence in the opinion.
4. Take the opposite position and simulate how an opponent would systematically \
   argue against the opinion.
5. Close with a structured summary: the key premises, the strongest opposing \
   view, and the boundary conditions under which the opinion still holds.

Rules:
- Offer no emotional comfort and do not assume the user is right.
- No vague verdicts; make every step concrete and specific.
- Reason along the causal chain, without leaps.";

/// Assembles the two-part prompt for a submission. Pure and deterministic:
/// the system half never varies, the user half is the opinion text.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Validate the opinion and pair it with the fixed system instruction.
    /// Whitespace-only input is rejected the same as empty input.
    pub fn build(opinion: &str) -> Result<Prompt, PromptError> {
        let trimmed = opinion.trim();
        if trimmed.is_empty() {
            return Err(PromptError::EmptyOpinion);
        }
        Ok(Prompt::new(SYSTEM_INSTRUCTION, trimmed))
    }

    pub fn system_instruction() -> &'static str {
        SYSTEM_INSTRUCTION
    }
}
