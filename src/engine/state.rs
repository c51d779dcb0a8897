//! Conversation state for the goal-elicitation dialogue.

use serde::{Deserialize, Serialize};

use crate::engine::respond::WELCOME_TEXT;
use crate::engine::EngineError;

/// The steps of the goal-elicitation dialogue.
///
/// Progresses linearly: AwaitingGoal -> AwaitingVision -> AwaitingMetrics ->
/// AwaitingTimeline -> Complete. A step never repeats and never goes backward;
/// the engine advances by exactly one step per accepted turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    AwaitingGoal,
    AwaitingVision,
    AwaitingMetrics,
    AwaitingTimeline,
    Complete,
}

impl Step {
    /// Get the next step in the linear progression, if any.
    pub fn next(&self) -> Option<Step> {
        use Step::*;
        match self {
            AwaitingGoal => Some(AwaitingVision),
            AwaitingVision => Some(AwaitingMetrics),
            AwaitingMetrics => Some(AwaitingTimeline),
            AwaitingTimeline => Some(Complete),
            Complete => None,
        }
    }

    /// Whether this step is terminal (the dialogue is done).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// 1-based position of this step, for display.
    pub fn number(&self) -> u8 {
        match self {
            Self::AwaitingGoal => 1,
            Self::AwaitingVision => 2,
            Self::AwaitingMetrics => 3,
            Self::AwaitingTimeline => 4,
            Self::Complete => 5,
        }
    }

    /// Short label for the answer this step is waiting on.
    pub fn label(&self) -> &'static str {
        match self {
            Self::AwaitingGoal => "goal",
            Self::AwaitingVision => "vision",
            Self::AwaitingMetrics => "metrics",
            Self::AwaitingTimeline => "timeline",
            Self::Complete => "done",
        }
    }
}

impl Default for Step {
    fn default() -> Self {
        Self::AwaitingGoal
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::AwaitingGoal => "awaiting_goal",
            Self::AwaitingVision => "awaiting_vision",
            Self::AwaitingMetrics => "awaiting_metrics",
            Self::AwaitingTimeline => "awaiting_timeline",
            Self::Complete => "complete",
        };
        write!(f, "{s}")
    }
}

/// Who said a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry. Content is immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// The raw answers captured so far, one per dialogue step.
///
/// Each field is set exactly once, when its step's input is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answers {
    pub goal: Option<String>,
    pub vision: Option<String>,
    pub metrics: Option<String>,
    pub timeline: Option<String>,
}

impl Answers {
    /// Record the accepted answer for `step`. Refuses to overwrite an answer
    /// that was already captured, and refuses steps with no answer slot.
    pub(crate) fn record(&mut self, step: Step, content: &str) -> Result<(), EngineError> {
        let slot = match step {
            Step::AwaitingGoal => &mut self.goal,
            Step::AwaitingVision => &mut self.vision,
            Step::AwaitingMetrics => &mut self.metrics,
            Step::AwaitingTimeline => &mut self.timeline,
            Step::Complete => return Err(EngineError::NoAnswerSlot(step)),
        };
        if slot.is_some() {
            return Err(EngineError::AnswerAlreadyRecorded(step));
        }
        *slot = Some(content.to_string());
        Ok(())
    }
}

/// The whole conversation: transcript, current step, and captured answers.
///
/// Created fresh per goal-setting session and discarded once the goal draft
/// is emitted or the session is abandoned.
#[derive(Debug, Clone)]
pub struct ConversationState {
    pub transcript: Vec<Message>,
    pub step: Step,
    pub answers: Answers,
}

impl ConversationState {
    /// A fresh conversation, seeded with the coach's welcome message.
    pub fn new() -> Self {
        Self {
            transcript: vec![Message::assistant(WELCOME_TEXT)],
            step: Step::default(),
            answers: Answers::default(),
        }
    }

    pub fn push(&mut self, message: Message) {
        self.transcript.push(message);
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_walks_all_steps() {
        use Step::*;
        let expected = [AwaitingVision, AwaitingMetrics, AwaitingTimeline, Complete];
        let mut current = AwaitingGoal;
        for expected_next in expected {
            let next = current.next().unwrap();
            assert_eq!(next, expected_next);
            current = next;
        }
        assert!(current.next().is_none());
    }

    #[test]
    fn is_terminal() {
        assert!(Step::Complete.is_terminal());
        assert!(!Step::AwaitingGoal.is_terminal());
        assert!(!Step::AwaitingTimeline.is_terminal());
    }

    #[test]
    fn step_numbers_are_sequential() {
        use Step::*;
        let steps = [
            AwaitingGoal,
            AwaitingVision,
            AwaitingMetrics,
            AwaitingTimeline,
            Complete,
        ];
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(step.number() as usize, i + 1);
        }
    }

    #[test]
    fn display_matches_serde() {
        use Step::*;
        for step in [
            AwaitingGoal,
            AwaitingVision,
            AwaitingMetrics,
            AwaitingTimeline,
            Complete,
        ] {
            let display = format!("{step}");
            let json = serde_json::to_string(&step).unwrap();
            assert_eq!(format!("\"{display}\""), json);
        }
    }

    #[test]
    fn answers_record_once() {
        let mut answers = Answers::default();
        answers
            .record(Step::AwaitingGoal, "learn to play the guitar")
            .unwrap();
        assert_eq!(answers.goal.as_deref(), Some("learn to play the guitar"));

        let again = answers.record(Step::AwaitingGoal, "something else");
        assert!(again.is_err());
        assert_eq!(answers.goal.as_deref(), Some("learn to play the guitar"));
    }

    #[test]
    fn terminal_step_has_no_answer_slot() {
        let mut answers = Answers::default();
        assert!(answers.record(Step::Complete, "anything").is_err());
    }

    #[test]
    fn fresh_conversation_is_seeded_with_welcome() {
        let state = ConversationState::new();
        assert_eq!(state.transcript.len(), 1);
        assert_eq!(state.transcript[0].role, Role::Assistant);
        assert_eq!(state.step, Step::AwaitingGoal);
        assert_eq!(state.answers, Answers::default());
    }
}
