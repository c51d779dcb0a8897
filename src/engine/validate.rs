//! Per-step input validation.

use crate::engine::parse;
use crate::engine::state::Step;

/// Outcome of validating one user turn. Purely a predicate plus an optional
/// re-prompt; the caller decides what to do with a rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(String),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    fn rejected(message: &str) -> Self {
        Self::Rejected(message.to_string())
    }
}

/// Validate a user turn against the rules for the current step.
///
/// Pure: the same (input, step) pair always yields the same verdict. Rules
/// apply to the trimmed input. The terminal step defines no validation.
pub fn validate(input: &str, step: Step) -> Verdict {
    let input = input.trim();
    match step {
        Step::AwaitingGoal => {
            if input.chars().count() < 10 {
                return Verdict::rejected(
                    "Could you elaborate a bit more on your goal? \
                     This will help me understand better.",
                );
            }
        }
        Step::AwaitingVision => {
            // Permissive on purpose: a causal phrase OR enough length passes.
            if !input.contains(" because ")
                && !input.contains(" so that ")
                && input.chars().count() < 30
            {
                return Verdict::rejected(
                    "Could you share more about why this goal matters to you? \
                     What motivates you to achieve it?",
                );
            }
        }
        Step::AwaitingMetrics => {
            if !input.contains('\n') && !input.contains('•') && !input.contains('-') {
                return Verdict::rejected(
                    "Could you break down your metrics into multiple points? \
                     This will help track progress better.",
                );
            }
        }
        Step::AwaitingTimeline => {
            if !parse::contains_timeframe(input) {
                return Verdict::rejected(
                    "Could you specify a timeframe (e.g., 3 months, 1 year)? \
                     This helps make the goal more concrete.",
                );
            }
        }
        Step::Complete => {}
    }
    Verdict::Accepted
}
