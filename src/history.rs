//! Per-document score history with capped retention and trend tracking
//!
//! The history log is caller-owned: the engine only appends entries and
//! reads them back. Exceeding the capacity triggers eviction of the oldest
//! entries; it is never an error. Callers serialize concurrent appends per
//! document id.

use crate::error::{AtsInsightError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Entries retained per document; the oldest are evicted beyond this
pub const HISTORY_CAPACITY: usize = 50;

/// Number of most recent entries the trend is computed over
const TREND_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
    Neutral,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Improving => write!(f, "improving"),
            Trend::Declining => write!(f, "declining"),
            Trend::Stable => write!(f, "stable"),
            Trend::Neutral => write!(f, "neutral"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreHistoryEntry {
    pub score: u8,
    pub timestamp: DateTime<Utc>,
}

/// Chronological score log for one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreHistory {
    pub document_id: String,
    pub entries: Vec<ScoreHistoryEntry>,
    pub trend: Trend,
    pub best_score: u8,
    pub worst_score: u8,
    pub average_score: f64,
    pub total_analyses: u64,
}

impl ScoreHistory {
    pub fn new(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            entries: Vec::new(),
            trend: Trend::Neutral,
            best_score: 0,
            worst_score: 0,
            average_score: 0.0,
            total_analyses: 0,
        }
    }

    /// Append a score, keeping entries sorted by timestamp, evicting the
    /// oldest past capacity, and refreshing the summary statistics
    pub fn append(&mut self, score: u8, timestamp: DateTime<Utc>) {
        let entry = ScoreHistoryEntry { score, timestamp };
        let position = self
            .entries
            .iter()
            .rposition(|existing| existing.timestamp <= timestamp)
            .map(|index| index + 1)
            .unwrap_or(0);
        self.entries.insert(position, entry);

        while self.entries.len() > HISTORY_CAPACITY {
            self.entries.remove(0);
        }

        self.total_analyses += 1;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.trend = classify_trend(&self.entries);
        self.best_score = self.entries.iter().map(|e| e.score).max().unwrap_or(0);
        self.worst_score = self.entries.iter().map(|e| e.score).min().unwrap_or(0);
        self.average_score = if self.entries.is_empty() {
            0.0
        } else {
            self.entries.iter().map(|e| e.score as f64).sum::<f64>() / self.entries.len() as f64
        };
    }

    /// View of this history limited to the most recent `limit` entries,
    /// with statistics and trend recomputed over that window
    pub fn latest(&self, limit: usize) -> ScoreHistory {
        let start = self.entries.len().saturating_sub(limit);
        let mut limited = ScoreHistory {
            document_id: self.document_id.clone(),
            entries: self.entries[start..].to_vec(),
            trend: Trend::Neutral,
            best_score: 0,
            worst_score: 0,
            average_score: 0.0,
            total_analyses: self.total_analyses,
        };
        limited.recompute();
        limited
    }
}

/// Classify the direction of recent scores from the ordinary-least-squares
/// slope over the last five entries. Fewer than two entries is neutral; a
/// flat window is stable. The slope thresholds are fixed at plus or minus 2
/// points per step.
pub fn classify_trend(entries: &[ScoreHistoryEntry]) -> Trend {
    if entries.len() < 2 {
        return Trend::Neutral;
    }

    let start = entries.len().saturating_sub(TREND_WINDOW);
    let recent: Vec<f64> = entries[start..].iter().map(|e| e.score as f64).collect();
    let n = recent.len() as f64;

    let x_mean = (n - 1.0) / 2.0;
    let y_mean = recent.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (index, score) in recent.iter().enumerate() {
        let dx = index as f64 - x_mean;
        numerator += dx * (score - y_mean);
        denominator += dx * dx;
    }

    let slope = numerator / denominator;
    if slope > 2.0 {
        Trend::Improving
    } else if slope < -2.0 {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

/// JSON-file-backed collection of score histories, keyed by document id
#[derive(Debug, Default)]
pub struct HistoryStore {
    path: Option<PathBuf>,
    histories: HashMap<String, ScoreHistory>,
}

impl HistoryStore {
    /// In-memory store, useful for tests and embedding
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a store at the given path, creating an empty one if absent
    pub fn open(path: &Path) -> Result<Self> {
        let histories = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content).map_err(|e| {
                AtsInsightError::HistoryStore(format!(
                    "Failed to parse history store {}: {}",
                    path.display(),
                    e
                ))
            })?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path: Some(path.to_path_buf()),
            histories,
        })
    }

    /// Append a score to a document's history and persist the store
    pub fn record_score(
        &mut self,
        document_id: &str,
        score: u8,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        self.histories
            .entry(document_id.to_string())
            .or_insert_with(|| ScoreHistory::new(document_id))
            .append(score, timestamp);
        self.save()
    }

    /// History for a document limited to the most recent `limit` entries.
    /// Unknown documents yield an empty, neutral history.
    pub fn get_history(&self, document_id: &str, limit: usize) -> ScoreHistory {
        self.histories
            .get(document_id)
            .map(|history| history.latest(limit))
            .unwrap_or_else(|| ScoreHistory::new(document_id))
    }

    fn save(&self) -> Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.histories)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, minute, 0).unwrap()
    }

    fn history_with_scores(scores: &[u8]) -> ScoreHistory {
        let mut history = ScoreHistory::new("doc");
        for (index, score) in scores.iter().enumerate() {
            history.append(*score, at(index as u32));
        }
        history
    }

    #[test]
    fn test_trend_flat_history_is_stable() {
        let history = history_with_scores(&[50, 50, 50, 50, 50]);
        assert_eq!(history.trend, Trend::Stable);
    }

    #[test]
    fn test_trend_rising_history_is_improving() {
        let history = history_with_scores(&[40, 45, 50, 55, 60]);
        assert_eq!(history.trend, Trend::Improving);
    }

    #[test]
    fn test_trend_falling_history_is_declining() {
        let history = history_with_scores(&[60, 55, 50, 45, 40]);
        assert_eq!(history.trend, Trend::Declining);
    }

    #[test]
    fn test_trend_single_entry_is_neutral() {
        let history = history_with_scores(&[72]);
        assert_eq!(history.trend, Trend::Neutral);
    }

    #[test]
    fn test_trend_uses_recent_window_only() {
        // Old declining scores followed by a strong recent rise
        let history = history_with_scores(&[90, 80, 70, 40, 45, 50, 55, 60]);
        assert_eq!(history.trend, Trend::Improving);
    }

    #[test]
    fn test_capacity_evicts_oldest_first() {
        let mut history = ScoreHistory::new("doc");
        for index in 0..60u32 {
            history.append(50, at(index));
        }

        assert_eq!(history.entries.len(), HISTORY_CAPACITY);
        assert_eq!(history.total_analyses, 60);
        // The ten oldest timestamps were evicted
        assert_eq!(history.entries[0].timestamp, at(10));
    }

    #[test]
    fn test_append_keeps_entries_chronological() {
        let mut history = ScoreHistory::new("doc");
        history.append(60, at(5));
        history.append(40, at(1));
        history.append(50, at(3));

        let timestamps: Vec<_> = history.entries.iter().map(|e| e.timestamp).collect();
        assert_eq!(timestamps, vec![at(1), at(3), at(5)]);
    }

    #[test]
    fn test_statistics_refresh_on_append() {
        let history = history_with_scores(&[40, 60, 80]);

        assert_eq!(history.best_score, 80);
        assert_eq!(history.worst_score, 40);
        assert_eq!(history.average_score, 60.0);
    }

    #[test]
    fn test_latest_limits_entries() {
        let history = history_with_scores(&[10, 20, 30, 40]);
        let limited = history.latest(2);

        assert_eq!(limited.entries.len(), 2);
        assert_eq!(limited.entries[0].score, 30);
        assert_eq!(limited.best_score, 40);
        assert_eq!(limited.total_analyses, 4);
    }

    #[test]
    fn test_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut store = HistoryStore::open(&path).unwrap();
        store.record_score("resume-1", 55, at(0)).unwrap();
        store.record_score("resume-1", 65, at(1)).unwrap();

        let reopened = HistoryStore::open(&path).unwrap();
        let history = reopened.get_history("resume-1", 10);
        assert_eq!(history.entries.len(), 2);
        assert_eq!(history.entries[1].score, 65);
    }

    #[test]
    fn test_store_unknown_document_is_empty_neutral() {
        let store = HistoryStore::in_memory();
        let history = store.get_history("missing", 10);

        assert!(history.entries.is_empty());
        assert_eq!(history.trend, Trend::Neutral);
    }
}
