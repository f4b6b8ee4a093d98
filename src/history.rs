//! Trend tracking - persist scores to .ats-lens-history.json

use crate::ResumeReport;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const HISTORY_FILENAME: &str = ".ats-lens-history.json";
const MAX_RUNS: usize = 50;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct HistoryFile {
    pub runs: Vec<HistoryRun>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRun {
    pub timestamp: String,
    pub files: HashMap<String, FileScore>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileScore {
    pub score: f64,
    /// Number of consolidated recommendations
    pub recommendations: usize,
}

/// Find project root: the nearest directory holding history, a config file or `.git`
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut dir = if start.is_file() {
        start.parent()?
    } else {
        start
    };

    loop {
        if dir.join(HISTORY_FILENAME).exists()
            || dir.join(crate::config::CONFIG_FILENAME).exists()
            || dir.join(".git").exists()
        {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}

/// Load history from project root (or create empty)
pub fn load_history(project_root: &Path) -> HistoryFile {
    let path = project_root.join(HISTORY_FILENAME);
    fs::read_to_string(&path)
        .ok()
        .and_then(|content| serde_json::from_str::<HistoryFile>(&content).ok())
        .unwrap_or_default()
}

/// Save history to project root
pub fn save_history(project_root: &Path, history: &HistoryFile) -> Result<()> {
    let path = project_root.join(HISTORY_FILENAME);
    let content = serde_json::to_string_pretty(history).context("Failed to serialize history")?;
    fs::write(&path, content)
        .with_context(|| format!("Failed to write history to {}", path.display()))
}

/// Get the previous score for a file from the latest run
pub fn previous_score(history: &HistoryFile, file_path: &Path) -> Option<f64> {
    let run = history.runs.last()?;
    let key = file_path.to_string_lossy().to_string();
    run.files.get(&key).map(|f| f.score)
}

/// Build a new run from reports and append to history
pub fn append_run(history: &mut HistoryFile, reports: &[ResumeReport]) {
    let timestamp = chrono::Utc::now().to_rfc3339();
    let files = reports
        .iter()
        .map(|r| {
            (
                r.path.to_string_lossy().to_string(),
                FileScore {
                    score: r.analysis.overall_score,
                    recommendations: r.analysis.recommendations.len(),
                },
            )
        })
        .collect();
    history.runs.push(HistoryRun { timestamp, files });
    if history.runs.len() > MAX_RUNS {
        history.runs.drain(0..history.runs.len() - MAX_RUNS);
    }
}

/// Format delta for console: "[was 72.5, down 4.0]" or "[was 72.5, up 3.0]" or ""
pub fn format_delta(previous: Option<f64>, current: f64) -> String {
    let Some(prev) = previous else {
        return String::new();
    };
    let diff = ((current - prev) * 10.0).round() / 10.0;
    if diff == 0.0 {
        return format!(" [unchanged at {:.1}]", current);
    }
    if diff > 0.0 {
        format!(" [was {:.1}, up {:.1}]", prev, diff)
    } else {
        format!(" [was {:.1}, down {:.1}]", prev, -diff)
    }
}
