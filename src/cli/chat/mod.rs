pub mod context;
pub mod prompt;
pub mod sink;

use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

use color_print::cformat;
use context::UserContext;
use eyre::Result;
use prompt::generate_prompt;
use sink::GoalSink;
use tracing::info;

use crate::engine::goal::GoalDraft;
use crate::engine::{DialogueEngine, TurnOutcome};

const HELP_TEXT: &str = "
Tandem Goal Coach

/help         Show this help dialogue
/restart      Throw the conversation away and start over
/quit         Quit the application

Answer the coach's questions to build your goal one step at a time.
";

/// Pause before a reply is shown, purely for pacing. The reply itself is
/// computed before the pause and is never lost to it.
const TYPING_DELAY: Duration = Duration::from_millis(1500);

pub struct ChatContext {
    output: Box<dyn Write>,
    interactive: bool,
    engine: DialogueEngine,
    user: UserContext,
    sink: GoalSink,
    typing_delay: Option<Duration>,
}

impl ChatContext {
    pub fn new(
        output: Box<dyn Write>,
        interactive: bool,
        no_delay: bool,
        save_dir: Option<std::path::PathBuf>,
    ) -> Self {
        let mut engine = DialogueEngine::new();
        engine.on_goal_created(|draft| {
            info!(
                "goal draft completed: {} ({} milestones)",
                draft.goal,
                draft.milestones.len()
            );
        });

        Self {
            output,
            interactive,
            engine,
            user: UserContext::from_env(),
            sink: GoalSink::new(save_dir),
            typing_delay: if no_delay { None } else { Some(TYPING_DELAY) },
        }
    }

    pub async fn run(&mut self) -> Result<ExitCode> {
        if self.interactive {
            self.print_welcome()?;
            self.run_interactive().await?;
        }

        Ok(ExitCode::SUCCESS)
    }

    fn print_welcome(&mut self) -> Result<()> {
        let banner = cformat!("<bold><green>Tandem Goal Coach</green></bold> (type /help for commands)\n");
        writeln!(self.output, "{}", banner)?;
        // The engine seeds the transcript with the coach's opening message.
        if let Some(welcome) = self.engine.transcript().first() {
            writeln!(self.output, "{}\n", welcome.content)?;
        }
        Ok(())
    }

    async fn run_interactive(&mut self) -> Result<()> {
        let mut rl = prompt::rl()?;

        loop {
            let prompt_text = generate_prompt(self.engine.step());
            let readline = rl.readline(&prompt_text);

            match readline {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    rl.add_history_entry(line.as_str());

                    if line.trim() == "/quit" {
                        break;
                    }

                    if let Err(e) = self.handle_input(&line).await {
                        writeln!(self.output, "Error: {}", e)?;
                    }
                }
                Err(e) => {
                    writeln!(self.output, "Error: {}", e)?;
                    break;
                }
            }
        }

        Ok(())
    }

    async fn handle_input(&mut self, input: &str) -> Result<()> {
        match input.trim() {
            "/help" => {
                writeln!(self.output, "{}", HELP_TEXT)?;
            }
            "/restart" => {
                self.engine.reset();
                writeln!(self.output, "Conversation restarted.\n")?;
                if let Some(welcome) = self.engine.transcript().first() {
                    writeln!(self.output, "{}\n", welcome.content)?;
                }
            }
            _ => {
                self.process_turn(input).await?;
            }
        }

        Ok(())
    }

    async fn process_turn(&mut self, input: &str) -> Result<()> {
        match self.engine.submit_turn(input) {
            TurnOutcome::Rejected { reply }
            | TurnOutcome::Advanced { reply, .. }
            | TurnOutcome::Failed { reply } => {
                self.print_reply(&reply).await?;
            }
            TurnOutcome::Completed { reply, draft } => {
                self.print_reply(&reply).await?;
                self.handle_goal_created(&draft)?;
            }
            TurnOutcome::Ended => {
                writeln!(
                    self.output,
                    "This session is finished. Use /restart to set another goal, or /quit to exit."
                )?;
            }
        }

        Ok(())
    }

    async fn print_reply(&mut self, reply: &str) -> Result<()> {
        if let Some(delay) = self.typing_delay {
            tokio::time::sleep(delay).await;
        }
        let label = cformat!("<bold><cyan>coach</cyan></bold>");
        writeln!(self.output, "\n{label}\n{reply}\n")?;
        Ok(())
    }

    /// Hand the finished draft to the sink. Best effort: on failure the JSON
    /// is shown so the user can keep it themselves.
    fn handle_goal_created(&mut self, draft: &GoalDraft) -> Result<()> {
        match self.sink.save(draft, &self.user.display_name) {
            Ok(path) => {
                writeln!(self.output, "Goal saved to {}", path.display())?;
            }
            Err(e) => {
                tracing::error!("failed to save goal draft: {e}");
                writeln!(
                    self.output,
                    "Couldn't save the goal ({}). Here it is as JSON:",
                    e
                )?;
                writeln!(self.output, "{}", serde_json::to_string_pretty(draft)?)?;
            }
        }
        Ok(())
    }
}
