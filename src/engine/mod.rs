//! The goal-elicitation dialogue engine.
//!
//! A scripted 4-step conversation that captures a goal, a vision of success,
//! progress metrics, and a timeline, then emits a structured [`GoalDraft`]
//! with derived milestones. Replies are canned and rule-based; there is no
//! model inference anywhere in here.

pub mod goal;
pub mod milestone;
pub mod parse;
pub mod respond;
pub mod state;
pub mod validate;

use std::panic::{catch_unwind, AssertUnwindSafe};

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, error, warn};

use goal::GoalDraft;
use state::{Answers, ConversationState, Message, Step};
use validate::Verdict;

/// Internal failures surfaced at the turn-submission boundary.
///
/// These indicate malformed engine state, not bad user input; validation
/// rejections are a normal branch, not an error.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no captured answer for {0}")]
    MissingAnswer(&'static str),
    #[error("answer for step {0} was already recorded")]
    AnswerAlreadyRecorded(Step),
    #[error("step {0} does not accept an answer")]
    NoAnswerSlot(Step),
    #[error("no scripted reply for step {0}")]
    NoReply(Step),
}

/// Invoked exactly once per completed conversation.
pub type GoalCallback = Box<dyn FnMut(&GoalDraft)>;

/// What happened as a result of one submitted turn.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// The input failed validation; the reply is a re-prompt and the step
    /// did not advance.
    Rejected { reply: String },
    /// The input was accepted and the dialogue advanced to `step`.
    Advanced { reply: String, step: Step },
    /// The final step was accepted; the reply is the SMART summary and the
    /// goal draft was emitted.
    Completed { reply: String, draft: GoalDraft },
    /// An internal failure; the reply is a generic apology and nothing was
    /// recorded.
    Failed { reply: String },
    /// The dialogue already finished; the turn was ignored.
    Ended,
}

/// Owns one conversation and processes turns one at a time.
pub struct DialogueEngine {
    state: ConversationState,
    on_goal_created: Option<GoalCallback>,
    goal_emitted: bool,
}

impl DialogueEngine {
    pub fn new() -> Self {
        Self {
            state: ConversationState::new(),
            on_goal_created: None,
            goal_emitted: false,
        }
    }

    /// Register the one-shot completion callback.
    pub fn on_goal_created(&mut self, callback: impl FnMut(&GoalDraft) + 'static) {
        self.on_goal_created = Some(Box::new(callback));
    }

    /// The full transcript, in display order.
    pub fn transcript(&self) -> &[Message] {
        &self.state.transcript
    }

    pub fn step(&self) -> Step {
        self.state.step
    }

    pub fn answers(&self) -> &Answers {
        &self.state.answers
    }

    /// Discard the conversation and start over with a fresh seeded state.
    pub fn reset(&mut self) {
        self.state = ConversationState::new();
        self.goal_emitted = false;
    }

    /// Process one user turn.
    ///
    /// The user message is recorded in the transcript even when it is
    /// rejected. On an accepted turn the answer is captured, the scripted
    /// reply appended, and the step advanced by exactly one; the transition
    /// into the terminal step additionally emits the goal draft.
    pub fn submit_turn(&mut self, content: &str) -> TurnOutcome {
        let content = content.trim();
        let step = self.state.step;
        if step.is_terminal() {
            debug!("ignoring turn submitted after completion");
            return TurnOutcome::Ended;
        }

        self.state.push(Message::user(content));

        match validate::validate(content, step) {
            Verdict::Rejected(reply) => {
                debug!("turn rejected at step {step}");
                self.state.push(Message::assistant(&reply));
                TurnOutcome::Rejected { reply }
            }
            Verdict::Accepted => match self.accept(content) {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("failed to process turn at step {step}: {e}");
                    self.state.push(Message::assistant(respond::APOLOGY_TEXT));
                    TurnOutcome::Failed {
                        reply: respond::APOLOGY_TEXT.to_string(),
                    }
                }
            },
        }
    }

    /// Run the accepted-turn transition. Every fallible part happens on a
    /// scratch copy of the answers so a failure records nothing.
    fn accept(&mut self, content: &str) -> Result<TurnOutcome, EngineError> {
        let step = self.state.step;
        let next = step.next().ok_or(EngineError::NoReply(step))?;

        let mut answers = self.state.answers.clone();
        answers.record(step, content)?;
        let reply = respond::respond(step, &answers)?;
        let draft = if next.is_terminal() {
            Some(build_draft(&answers)?)
        } else {
            None
        };

        self.state.answers = answers;
        self.state.push(Message::assistant(&reply));
        self.state.step = next;
        debug!("advanced to step {next}");

        match draft {
            Some(draft) => {
                self.emit(&draft);
                Ok(TurnOutcome::Completed { reply, draft })
            }
            None => Ok(TurnOutcome::Advanced { reply, step: next }),
        }
    }

    /// Notify the completion callback, at most once per conversation. A
    /// panicking consumer must not unwind the conversation state.
    fn emit(&mut self, draft: &GoalDraft) {
        if self.goal_emitted {
            warn!("goal already emitted for this conversation; skipping notification");
            return;
        }
        self.goal_emitted = true;
        if let Some(callback) = self.on_goal_created.as_mut() {
            if catch_unwind(AssertUnwindSafe(|| callback(draft))).is_err() {
                error!("goal-created callback panicked; conversation state preserved");
            }
        }
    }
}

impl Default for DialogueEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn build_draft(answers: &Answers) -> Result<GoalDraft, EngineError> {
    let goal = answers
        .goal
        .as_deref()
        .ok_or(EngineError::MissingAnswer("goal"))?;
    let vision = answers
        .vision
        .as_deref()
        .ok_or(EngineError::MissingAnswer("vision"))?;
    let metrics_raw = answers
        .metrics
        .as_deref()
        .ok_or(EngineError::MissingAnswer("metrics"))?;
    let timeline = answers
        .timeline
        .as_deref()
        .ok_or(EngineError::MissingAnswer("timeline"))?;

    let metrics = parse::split_metrics(metrics_raw);
    let milestones = milestone::derive_milestones(&metrics, timeline);

    Ok(GoalDraft {
        goal: respond::capitalize_first(goal),
        vision: vision.to_string(),
        metrics,
        timeline: timeline.to_string(),
        milestones,
        created_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::state::Role;
    use super::*;

    const GOAL: &str = "I want to run a marathon";
    const VISION: &str = "I want to finally prove to myself so that I feel strong";
    const METRICS: &str = "- run 5k\n- run 10k\n- finish marathon";
    const TIMELINE: &str = "6 months";

    fn complete_dialogue(engine: &mut DialogueEngine) -> TurnOutcome {
        for input in [GOAL, VISION, METRICS] {
            let outcome = engine.submit_turn(input);
            assert!(
                matches!(outcome, TurnOutcome::Advanced { .. }),
                "expected advance for {input:?}, got {outcome:?}"
            );
        }
        engine.submit_turn(TIMELINE)
    }

    #[test]
    fn valid_input_advances_by_exactly_one_step() {
        let mut engine = DialogueEngine::new();
        assert_eq!(engine.step(), Step::AwaitingGoal);
        engine.submit_turn(GOAL);
        assert_eq!(engine.step(), Step::AwaitingVision);
        engine.submit_turn(VISION);
        assert_eq!(engine.step(), Step::AwaitingMetrics);
    }

    #[test]
    fn rejected_turn_grows_transcript_but_not_state() {
        let mut engine = DialogueEngine::new();
        let before = engine.transcript().len();

        let outcome = engine.submit_turn("guitar");

        assert!(matches!(outcome, TurnOutcome::Rejected { .. }));
        assert_eq!(engine.transcript().len(), before + 2);
        assert_eq!(engine.transcript()[before].role, Role::User);
        assert_eq!(engine.transcript()[before].content, "guitar");
        assert_eq!(engine.transcript()[before + 1].role, Role::Assistant);
        assert_eq!(engine.step(), Step::AwaitingGoal);
        assert!(engine.answers().goal.is_none());
    }

    #[test]
    fn answers_are_immutable_once_set() {
        let mut engine = DialogueEngine::new();
        engine.submit_turn(GOAL);
        engine.submit_turn(VISION);
        assert_eq!(engine.answers().goal.as_deref(), Some(GOAL));
        assert_eq!(engine.answers().vision.as_deref(), Some(VISION));
    }

    #[test]
    fn end_to_end_marathon_dialogue() {
        let calls = Rc::new(Cell::new(0u32));
        let seen = calls.clone();

        // The callback only counts; assertions in here would be swallowed by
        // the engine's panic isolation.
        let mut engine = DialogueEngine::new();
        engine.on_goal_created(move |_| seen.set(seen.get() + 1));

        let outcome = complete_dialogue(&mut engine);
        let TurnOutcome::Completed { reply, draft } = outcome else {
            panic!("expected completion, got {outcome:?}");
        };

        assert_eq!(engine.step(), Step::Complete);
        assert_eq!(calls.get(), 1);

        assert_eq!(draft.goal, "I want to run a marathon");
        assert_eq!(draft.vision, VISION);
        assert_eq!(draft.metrics, vec!["- run 5k", "- run 10k", "- finish marathon"]);
        assert_eq!(draft.timeline, TIMELINE);
        assert_eq!(draft.milestones.len(), 3);
        assert_eq!(draft.milestones[0].deadline, "33% - 60 days");
        assert_eq!(draft.milestones[1].deadline, "67% - 120 days");
        assert_eq!(draft.milestones[2].deadline, "100% - 180 days");
        assert!(reply.contains("SMART"));
    }

    #[test]
    fn extreme_timeline_amounts_complete_without_panicking() {
        let mut engine = DialogueEngine::new();
        engine.submit_turn(GOAL);
        engine.submit_turn(VISION);
        engine.submit_turn(METRICS);
        let outcome = engine.submit_turn("4000000000 years");
        let TurnOutcome::Completed { draft, .. } = outcome else {
            panic!("expected completion, got {outcome:?}");
        };
        assert_eq!(draft.milestones.len(), 3);
        assert_eq!(
            draft.milestones[2].deadline,
            format!("100% - {} days", 4_000_000_000u64 * 365)
        );
    }

    #[test]
    fn goal_is_capitalized_in_the_draft() {
        let mut engine = DialogueEngine::new();
        engine.submit_turn("run my first ultra marathon");
        engine.submit_turn(VISION);
        engine.submit_turn(METRICS);
        let outcome = engine.submit_turn(TIMELINE);
        let TurnOutcome::Completed { draft, .. } = outcome else {
            panic!("expected completion");
        };
        assert_eq!(draft.goal, "Run my first ultra marathon");
    }

    #[test]
    fn turns_after_completion_are_ignored() {
        let mut engine = DialogueEngine::new();
        complete_dialogue(&mut engine);
        let transcript_len = engine.transcript().len();

        let outcome = engine.submit_turn("one more thing");

        assert_eq!(outcome, TurnOutcome::Ended);
        assert_eq!(engine.transcript().len(), transcript_len);
        assert_eq!(engine.step(), Step::Complete);
    }

    #[test]
    fn callback_is_not_reinvoked_after_completion() {
        let calls = Rc::new(Cell::new(0u32));
        let seen = calls.clone();

        let mut engine = DialogueEngine::new();
        engine.on_goal_created(move |_| seen.set(seen.get() + 1));
        complete_dialogue(&mut engine);
        engine.submit_turn("extra turn");
        engine.submit_turn("another extra turn");

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn panicking_callback_does_not_corrupt_state() {
        let mut engine = DialogueEngine::new();
        engine.on_goal_created(|_| panic!("consumer blew up"));

        let outcome = complete_dialogue(&mut engine);

        assert!(matches!(outcome, TurnOutcome::Completed { .. }));
        assert_eq!(engine.step(), Step::Complete);
        assert_eq!(engine.answers().timeline.as_deref(), Some(TIMELINE));
        // Still usable afterwards.
        assert_eq!(engine.submit_turn("hello again"), TurnOutcome::Ended);
    }

    #[test]
    fn reset_starts_a_fresh_seeded_conversation() {
        let mut engine = DialogueEngine::new();
        complete_dialogue(&mut engine);
        engine.reset();

        assert_eq!(engine.step(), Step::AwaitingGoal);
        assert_eq!(engine.transcript().len(), 1);
        assert!(engine.answers().goal.is_none());
    }

    #[test]
    fn input_is_trimmed_before_recording() {
        let mut engine = DialogueEngine::new();
        engine.submit_turn("  I want to run a marathon  ");
        assert_eq!(engine.answers().goal.as_deref(), Some(GOAL));
        assert_eq!(engine.transcript()[1].content, GOAL);
    }
}
