use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use eyre::{eyre, Result};
use serde_json::json;

use crate::engine::goal::GoalDraft;

/// Writes finished goal drafts as JSON files, one per goal.
///
/// Stand-in for the hosted data store: writes are best-effort and a failure
/// never ends the chat session.
pub struct GoalSink {
    dir: PathBuf,
}

impl GoalSink {
    /// Use `dir` if given, otherwise `<platform data dir>/tandem/goals`.
    pub fn new(dir: Option<PathBuf>) -> Self {
        let dir = dir.unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("tandem")
                .join("goals")
        });
        Self { dir }
    }

    /// Save the draft, attributed to `owner`, and return the file path.
    pub fn save(&self, draft: &GoalDraft, owner: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| eyre!("Failed to create directory {}: {}", self.dir.display(), e))?;

        let filename = format!("goal-{}.json", Utc::now().format("%Y%m%dT%H%M%S%f"));
        let path = self.dir.join(filename);

        let record = json!({
            "owner": owner,
            "goal": draft,
        });
        let body = serde_json::to_string_pretty(&record)?;

        fs::write(&path, body)
            .map_err(|e| eyre!("Failed to write to file {}: {}", path.display(), e))?;

        tracing::debug!("saved goal draft to {}", path.display());
        Ok(path)
    }
}
