//! Milestone derivation.

use crate::engine::goal::Milestone;
use crate::engine::parse;

pub const PLACEHOLDER_TASK: &str = "To be defined";

/// Derive one milestone per metric, spread evenly across the timeline.
///
/// The metric at 1-based position `i` of `n` gets cumulative progress
/// `round(100 * i / n)` and day offset `round(total_days * i / n)`. If the metric
/// list is empty or the timeline doesn't parse, the result is empty; both
/// are defined degenerate cases, not errors.
pub fn derive_milestones(metrics: &[String], timeline: &str) -> Vec<Milestone> {
    let Some(timeline) = parse::parse_timeline(timeline) else {
        return Vec::new();
    };
    let total_days = timeline.total_days();
    let count = metrics.len();

    metrics
        .iter()
        .enumerate()
        .map(|(index, metric)| {
            let position = (index + 1) as f64;
            let progress = (100.0 * position / count as f64).round() as u32;
            let days = (total_days as f64 * position / count as f64).round() as u64;
            Milestone {
                title: metric.clone(),
                deadline: format!("{progress}% - {days} days"),
                tasks: vec![PLACEHOLDER_TASK.to_string()],
            }
        })
        .collect()
}
