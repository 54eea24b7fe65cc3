//! History records and aggregate usage counters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One append-only log entry, written once per terminal analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: i64,
    pub filename: String,
    /// Names of the plugins that ran, comma-joined; for a failed submission,
    /// the faulting plugin.
    pub analyzer: String,
    pub issues_count: u32,
    pub complexity: f64,
    pub score: f64,
    /// Unix millis.
    pub created_at: i64,
}

/// Running aggregate counters, updated atomically with each history append.
///
/// Maps are `BTreeMap` so serialized output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageStats {
    pub total_analyses: u64,
    pub by_analyzer: BTreeMap<String, u64>,
    /// Per-day buckets keyed "YYYY-MM-DD" (UTC).
    pub by_date: BTreeMap<String, u64>,
    pub errors: u64,
    /// Unix millis of the most recent terminal analysis.
    pub last_analysis_at: Option<i64>,
}

impl UsageStats {
    /// Fraction of terminal analyses that failed, in [0, 1].
    pub fn error_rate(&self) -> f64 {
        if self.total_analyses == 0 {
            0.0
        } else {
            self.errors as f64 / self.total_analyses as f64
        }
    }
}

/// Read-only derivation over the history log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageSummary {
    pub total_files: u64,
    pub average_score: f64,
    pub total_issues: u64,
    pub average_complexity: f64,
    pub error_rate: f64,
    pub last_analysis_at: Option<i64>,
}
