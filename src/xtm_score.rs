// Score table: point computation and the flat-file top-10 store
// File layout: a fixed header line, then `name,score,elapsed_seconds` per line

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::xtm_error::{AppError, Result};

pub const SCORE_HEADER: &str = "Nombre,Puntaje";
pub const MAX_SCORES: usize = 10;
pub const MAX_NAME_LEN: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u64,
    pub elapsed_secs: u64,
}

impl ScoreEntry {
    /// Build an entry whose name fits the record format (no separators, 15 chars max)
    pub fn new(name: &str, score: u64, elapsed_secs: u64) -> Self {
        let name = name
            .chars()
            .map(|ch| if ch == ',' || ch.is_control() { ' ' } else { ch })
            .take(MAX_NAME_LEN)
            .collect();
        ScoreEntry {
            name,
            score,
            elapsed_secs,
        }
    }
}

/// Points for a finished game: base points by difficulty over elapsed seconds
pub fn compute_score(difficulty_level: usize, elapsed_secs: u64) -> u64 {
    let base = match difficulty_level {
        0 => 1000,
        1 => 2000,
        _ => 3000,
    };
    (base / elapsed_secs.max(1)).max(1)
}

/// Parse the score file body, dropping lines that do not fit the record format.
/// Works on raw bytes so one undecodable line cannot spoil the rest of the table.
pub fn parse_scores(bytes: &[u8]) -> Vec<ScoreEntry> {
    let mut entries = Vec::new();
    for (lineno, raw) in bytes.split(|&b| b == b'\n').enumerate().skip(1) {
        let Ok(line) = std::str::from_utf8(raw) else {
            warn!(line = lineno + 1, "skipping score record that is not UTF-8");
            continue;
        };
        // names keep their leading spaces; only the line ending goes
        let line = line.trim_end();
        if line.trim_start().is_empty() {
            continue;
        }
        match parse_record(line) {
            Some(entry) => entries.push(entry),
            None => warn!(line = lineno + 1, content = line, "skipping malformed score record"),
        }
    }
    entries
}

fn parse_record(line: &str) -> Option<ScoreEntry> {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() != 3 {
        return None;
    }
    let score_field = parts[1];
    if score_field.is_empty() || !score_field.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(ScoreEntry {
        name: parts[0].to_string(),
        score: score_field.parse().ok()?,
        elapsed_secs: parts[2].trim().parse().ok()?,
    })
}

/// Render a table in file form, header included
pub fn format_scores(entries: &[ScoreEntry]) -> String {
    let mut out = String::from(SCORE_HEADER);
    out.push('\n');
    for e in entries {
        out.push_str(&format!("{},{},{}\n", e.name, e.score, e.elapsed_secs));
    }
    out
}

/// Insert `entry`, keep the table sorted by score (ties stay in insertion order), cut to 10
pub fn insert_ranked(entries: &mut Vec<ScoreEntry>, entry: ScoreEntry) {
    entries.push(entry);
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(MAX_SCORES);
}

/// Score table persisted at a fixed path
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ScoreStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current table; a missing file is an empty table
    pub fn load_scores(&self) -> Result<Vec<ScoreEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let bytes = fs::read(&self.path).map_err(|e| AppError::io(&self.path, e))?;
        Ok(parse_scores(&bytes))
    }

    /// Add an entry and rewrite the whole file; returns the table as stored
    pub fn save_score(&self, entry: ScoreEntry) -> Result<Vec<ScoreEntry>> {
        let mut entries = self.load_scores()?;
        info!(name = %entry.name, score = entry.score, secs = entry.elapsed_secs, "saving score");
        insert_ranked(&mut entries, entry);
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
            }
        }
        fs::write(&self.path, format_scores(&entries)).map_err(|e| AppError::io(&self.path, e))?;
        Ok(entries)
    }
}
