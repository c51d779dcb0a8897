use rustyline::{Config, Editor, Result};

use crate::engine::state::Step;

/// Prompt string showing where the user is in the 4-question dialogue.
pub fn generate_prompt(step: Step) -> String {
    match step {
        Step::Complete => "done> ".to_string(),
        s => format!("{}/4 {}> ", s.number(), s.label()),
    }
}

pub fn rl() -> Result<Editor<()>> {
    let config = Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();
    Editor::with_config(config)
}
