//! Scripted assistant replies, one handler per dialogue step.

use crate::engine::goal::Milestone;
use crate::engine::milestone;
use crate::engine::parse;
use crate::engine::state::{Answers, Step};
use crate::engine::EngineError;

/// Seeded into every fresh conversation as the coach's opening message.
pub const WELCOME_TEXT: &str = r#"Hi there! 👋

I'm here to help you create meaningful and achievable goals. At Tandem, we believe it's important to take the time to set the right goals—ones that truly matter to you and that you can actually achieve.

Let's start with something simple: What's one goal you'd like to work towards? For example:
• "I want to learn to play the guitar"
• "I want to run a marathon"
• "I want to start my own business"

What goal would you like to work on?"#;

/// Shown when a turn hits an unexpected internal failure.
pub const APOLOGY_TEXT: &str =
    "I apologize, but I'm having trouble processing that. Could you try rephrasing it?";

/// Produce the scripted reply for an accepted turn at `step`.
///
/// Deterministic: the reply depends only on the captured answers, which by
/// this point include the answer for `step` itself. The terminal step has no
/// reply of its own.
pub fn respond(step: Step, answers: &Answers) -> Result<String, EngineError> {
    match step {
        Step::AwaitingGoal => goal_reply(answers),
        Step::AwaitingVision => vision_reply(answers),
        Step::AwaitingMetrics => metrics_reply(answers),
        Step::AwaitingTimeline => summary_reply(answers),
        Step::Complete => Err(EngineError::NoReply(step)),
    }
}

fn goal_reply(answers: &Answers) -> Result<String, EngineError> {
    let goal = require(&answers.goal, "goal")?;
    let goal = capitalize_first(goal);
    Ok(format!(
        r#""{goal}" is a fantastic goal! 🌟

I'd love to understand more about what success looks like for you. When you imagine achieving this goal:
• What would be different in your life?
• How would you feel?
• What would you be able to do that you can't do now?

For example, if your goal is learning guitar, you might say:
"I want to be able to play my favorite songs confidently, perform at local open mics, and share music with friends. This matters to me because music has always been a big part of my life."

Share your vision with me, and we'll work together to make it happen."#
    ))
}

fn vision_reply(answers: &Answers) -> Result<String, EngineError> {
    let goal = require(&answers.goal, "goal")?;
    let examples = example_metrics(goal);
    Ok(format!(
        r#"Thank you for sharing that vision! I can see why this goal matters to you.

To help you track your progress towards {goal}, let's break this down into measurable milestones.

Here are some example metrics based on your goal:
{examples}

What specific metrics would be most meaningful for tracking your progress?
Please list 2-3 concrete ways we can measure your advancement."#
    ))
}

fn metrics_reply(answers: &Answers) -> Result<String, EngineError> {
    let goal = require(&answers.goal, "goal")?;
    let vision = require(&answers.vision, "vision")?;
    let metrics = require(&answers.metrics, "metrics")?;
    Ok(format!(
        r#"Those are excellent metrics! They'll help you stay motivated and see your progress clearly.

Now, let's make this goal time-bound. Looking at what you want to achieve:
• {goal}
• {vision}
• Tracking: {metrics}

What feels like a realistic timeline for achieving this? Consider:
• Short-term (3-6 months)
• Medium-term (6-12 months)
• Long-term (1-2 years)

Remember, it's okay to be ambitious while still being realistic. When would you like to achieve this goal by?"#
    ))
}

fn summary_reply(answers: &Answers) -> Result<String, EngineError> {
    let goal = require(&answers.goal, "goal")?;
    let vision = require(&answers.vision, "vision")?;
    let metrics_raw = require(&answers.metrics, "metrics")?;
    let timeline = require(&answers.timeline, "timeline")?;

    let metric_items = parse::split_metrics(metrics_raw);
    let milestones = milestone::derive_milestones(&metric_items, timeline);

    Ok(format!(
        r#"Perfect! Let me summarize your SMART goal:

🎯 Goal: {goal}

✨ Vision of Success:
{vision}

📊 Progress Metrics:
{metrics}

⏱️ Timeline: {timeline}

I've broken this down into milestones:
{milestones}

This is a well-structured goal that follows the SMART framework:
• Specific: You've clearly defined what you want to achieve
• Measurable: We have concrete ways to track progress
• Achievable: The goal is challenging but realistic
• Relevant: It aligns with your personal vision
• Time-bound: You've set a clear timeline

Would you like to adjust anything to make this goal even more meaningful or achievable for you?"#,
        metrics = format_metric_bullets(&metric_items),
        milestones = format_milestone_bullets(&milestones),
    ))
}

/// Example metrics matched against keywords in the goal text; the first
/// matching category wins.
fn example_metrics(goal: &str) -> &'static str {
    let goal = goal.to_lowercase();
    if goal.contains("learn") || goal.contains("study") {
        return "• Hours spent practicing per week\n\
                • Number of lessons/modules completed\n\
                • Skills mastered or concepts understood\n\
                • Practice sessions completed";
    }
    if goal.contains("fitness") || goal.contains("run") || goal.contains("exercise") {
        return "• Workouts completed per week\n\
                • Distance covered or weights lifted\n\
                • Time spent exercising\n\
                • Physical measurements or progress photos";
    }
    if goal.contains("business") || goal.contains("startup") {
        return "• Revenue milestones\n\
                • Number of customers/clients\n\
                • Products/services launched\n\
                • Marketing goals achieved";
    }
    "• Weekly progress measurements\n\
     • Specific achievements or milestones\n\
     • Time invested towards the goal\n\
     • Tangible outcomes produced"
}

fn format_metric_bullets(metrics: &[String]) -> String {
    metrics
        .iter()
        .map(|metric| format!("• {metric}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_milestone_bullets(milestones: &[Milestone]) -> String {
    milestones
        .iter()
        .map(|m| format!("• {} ({})", m.title, m.deadline))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Capitalize the first letter, leaving the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn require<'a>(slot: &'a Option<String>, field: &'static str) -> Result<&'a str, EngineError> {
    slot.as_deref().ok_or(EngineError::MissingAnswer(field))
}
