//! The analysis record — full result of one submission.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::issue::Issue;
use super::language::Language;

/// Metric name → value map produced by plugins and merged by the orchestrator.
pub type Metrics = FxHashMap<String, f64>;

/// Lifecycle of a submission.
///
/// Transitions only `Pending → Processing → {Completed, Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl AnalysisStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStatus::Pending => "pending",
            AnalysisStatus::Processing => "processing",
            AnalysisStatus::Completed => "completed",
            AnalysisStatus::Failed => "failed",
        }
    }

    pub fn parse_str(s: &str) -> Option<AnalysisStatus> {
        match s {
            "pending" => Some(AnalysisStatus::Pending),
            "processing" => Some(AnalysisStatus::Processing),
            "completed" => Some(AnalysisStatus::Completed),
            "failed" => Some(AnalysisStatus::Failed),
            _ => None,
        }
    }

    /// Terminal states never transition again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AnalysisStatus::Completed | AnalysisStatus::Failed)
    }
}

/// Full result record for one submission.
///
/// Created on submission acceptance, mutated only by the orchestrator and the
/// persistence layer, never auto-deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub id: i64,
    pub user_id: String,
    pub language: Language,
    pub status: AnalysisStatus,
    #[serde(default)]
    pub metrics: Metrics,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    pub security_score: f64,
    pub complexity_score: f64,
    pub performance_score: f64,
    /// Quality is on a 0–1 scale; the other sub-scores are 0–10.
    pub quality_score: f64,
    pub global_score: f64,
    /// Fault description when `status == Failed`.
    pub failure: Option<String>,
    /// Unix millis.
    pub created_at: i64,
    pub updated_at: i64,
}

impl Analysis {
    /// A freshly accepted submission: pending, no results, maximum scores.
    pub fn pending(id: i64, user_id: &str, language: Language, now_ms: i64) -> Self {
        Self {
            id,
            user_id: user_id.to_string(),
            language,
            status: AnalysisStatus::Pending,
            metrics: Metrics::default(),
            issues: Vec::new(),
            suggestions: Vec::new(),
            security_score: 10.0,
            complexity_score: 10.0,
            performance_score: 10.0,
            quality_score: 1.0,
            global_score: 10.0,
            failure: None,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Average complexity metric, 0.0 when the plugin did not report one.
    pub fn complexity(&self) -> f64 {
        self.metrics.get("complexity").copied().unwrap_or(0.0)
    }
}
