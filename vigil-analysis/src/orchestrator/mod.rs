//! Analysis orchestrator — drives the submission state machine.
//!
//! `Pending → Processing → {Completed, Failed}`. Plugins run on a worker
//! thread bounded by the submission timeout; an unexpected plugin fault fails
//! the whole submission and discards every partial issue, while an
//! `UnsupportedInput` only skips that plugin.

pub mod merge;

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, RecvTimeoutError};
use rayon::prelude::*;

use vigil_core::config::EngineConfig;
use vigil_core::errors::{AnalyzeError, EngineError, StorageError, VigilErrorCode};
use vigil_core::events::{
    AnalysisCompletedEvent, AnalysisFailedEvent, AnalysisStartedEvent, EventDispatcher,
    PluginSkippedEvent,
};
use vigil_core::time;
use vigil_core::traits::{AnalysisStore, Cancellable, CancellationToken, StatsStore};
use vigil_core::types::{
    Analysis, AnalysisStatus, HistoryRecord, Language, UsageStats, UsageSummary,
};

use crate::plugins::{AnalysisRequest, AnalyzerPlugin, PluginOutput, PluginRegistry};
use crate::scoring;

/// Per-submission options supplied by the ingestion layer.
#[derive(Debug, Clone, Default)]
pub struct SubmissionOverrides {
    /// Display name recorded in history. Default: "untitled".
    pub filename: Option<String>,
    /// Deadline override for this submission.
    pub timeout_ms: Option<u64>,
    /// Restrict to these plugins; empty means the configured set.
    pub plugins: Vec<String>,
}

/// Lightweight status view for pollers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusReport {
    pub status: AnalysisStatus,
    /// 0.0 pending, 0.5 processing, 1.0 terminal.
    pub progress: f64,
}

/// The engine context: registry, stores, events, and config, all injected.
pub struct Engine {
    registry: Arc<PluginRegistry>,
    store: Arc<dyn AnalysisStore>,
    stats: Arc<dyn StatsStore>,
    events: Arc<EventDispatcher>,
    config: EngineConfig,
}

/// What one plugin produced, by name.
type PluginResult = (String, Result<PluginOutput, AnalyzeError>);

impl Engine {
    pub fn new(
        registry: Arc<PluginRegistry>,
        store: Arc<dyn AnalysisStore>,
        stats: Arc<dyn StatsStore>,
        events: Arc<EventDispatcher>,
        config: EngineConfig,
    ) -> Self {
        Self {
            registry,
            store,
            stats,
            events,
            config,
        }
    }

    /// Accept a submission and run it to a terminal state.
    ///
    /// Always returns the analysis id once the submission was accepted;
    /// plugin faults and timeouts surface as `status = Failed` on the
    /// persisted record, not as an `Err` here. `Err` means the submission
    /// could not be accepted or persisted at all.
    pub fn submit(
        &self,
        source: &[u8],
        language: Language,
        user_id: &str,
        overrides: Option<SubmissionOverrides>,
    ) -> Result<i64, EngineError> {
        let overrides = overrides.unwrap_or_default();
        let filename = overrides
            .filename
            .clone()
            .unwrap_or_else(|| "untitled".to_string());

        let accepted_at = time::now_ms();
        let id = self.store.create_pending(user_id, language, accepted_at)?;
        let mut analysis = Analysis::pending(id, user_id, language, accepted_at);

        analysis.status = AnalysisStatus::Processing;
        analysis.updated_at = time::now_ms();
        self.store.save(&analysis)?;

        let enabled = if overrides.plugins.is_empty() {
            self.config.enabled_plugins.clone()
        } else {
            overrides.plugins.clone()
        };
        let plugins = self.registry.applicable(language, &enabled);

        self.events.emit_analysis_started(&AnalysisStartedEvent {
            analysis_id: id,
            language: language.as_str().to_string(),
            plugin_count: plugins.len(),
        });
        tracing::info!(
            analysis_id = id,
            language = %language,
            plugins = plugins.len(),
            "submission accepted"
        );

        let timeout_ms = overrides
            .timeout_ms
            .unwrap_or_else(|| self.config.effective_timeout_ms());
        let started = Instant::now();

        match self.run_plugins(source, language, &filename, plugins, timeout_ms) {
            Ok(results) => {
                self.settle(analysis, results, &filename, started)?;
            }
            Err(error) => {
                self.fail(analysis, &error, &filename)?;
            }
        }
        Ok(id)
    }

    /// Status and coarse progress for one analysis.
    pub fn get_status(&self, id: i64) -> Result<StatusReport, EngineError> {
        let analysis = self.require(id)?;
        let progress = match analysis.status {
            AnalysisStatus::Pending => 0.0,
            AnalysisStatus::Processing => 0.5,
            AnalysisStatus::Completed | AnalysisStatus::Failed => 1.0,
        };
        Ok(StatusReport {
            status: analysis.status,
            progress,
        })
    }

    /// Full analysis record.
    pub fn get_result(&self, id: i64) -> Result<Analysis, EngineError> {
        self.require(id)
    }

    /// Newest-first page of one user's analyses.
    pub fn get_by_user(
        &self,
        user_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<Analysis>, EngineError> {
        Ok(self.store.get_by_user(user_id, offset, limit)?)
    }

    /// All analyses currently in `status`.
    pub fn get_by_status(&self, status: AnalysisStatus) -> Result<Vec<Analysis>, EngineError> {
        Ok(self.store.get_by_status(status)?)
    }

    /// Newest-first history records.
    pub fn get_history(&self, limit: Option<u32>) -> Result<Vec<HistoryRecord>, EngineError> {
        Ok(self.stats.get_history(limit)?)
    }

    /// Current aggregate counters.
    pub fn get_usage_stats(&self) -> Result<UsageStats, EngineError> {
        Ok(self.stats.get_usage_stats()?)
    }

    /// Read-only derivation over the history log.
    pub fn get_summary(&self) -> Result<UsageSummary, EngineError> {
        Ok(self.stats.get_summary()?)
    }

    fn require(&self, id: i64) -> Result<Analysis, EngineError> {
        self.store
            .get_with_metrics(id)?
            .ok_or(EngineError::Storage(StorageError::NotFound { id }))
    }

    /// Run all plugins on a worker thread, bounded by the submission timeout.
    ///
    /// The worker only computes; persistence stays on the calling thread, so
    /// a worker that outlives a timeout cannot touch any store.
    fn run_plugins(
        &self,
        source: &[u8],
        language: Language,
        filename: &str,
        plugins: Vec<Arc<dyn AnalyzerPlugin>>,
        timeout_ms: u64,
    ) -> Result<Vec<PluginResult>, AnalyzeError> {
        if plugins.is_empty() {
            return Ok(Vec::new());
        }

        let token = CancellationToken::new();
        let (tx, rx) = bounded::<Vec<PluginResult>>(1);

        let source: Arc<Vec<u8>> = Arc::new(source.to_vec());
        let filename = filename.to_string();
        let config = self.config.clone();
        let parallel = config.effective_parallel();
        let worker_token = token.clone();

        std::thread::spawn(move || {
            let run_one = |plugin: &Arc<dyn AnalyzerPlugin>| -> PluginResult {
                let name = plugin.name().to_string();
                let request = AnalysisRequest {
                    source: &source,
                    language,
                    filename: &filename,
                    config: &config,
                    cancel: &worker_token,
                };
                let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    plugin.analyze(&request)
                }));
                let result = match outcome {
                    Ok(result) => result,
                    Err(payload) => Err(AnalyzeError::PluginFault {
                        plugin: name.clone(),
                        message: panic_message(payload),
                    }),
                };
                // A fault abandons sibling work for this submission only.
                if let Err(error) = &result {
                    if !matches!(error, AnalyzeError::UnsupportedInput { .. }) {
                        worker_token.cancel();
                    }
                }
                (name, result)
            };

            let results: Vec<PluginResult> = if parallel {
                plugins.par_iter().map(run_one).collect()
            } else {
                plugins.iter().map(run_one).collect()
            };
            // Receiver may be gone after a timeout; nothing left to do then.
            let _ = tx.send(results);
        });

        match rx.recv_timeout(Duration::from_millis(timeout_ms)) {
            Ok(results) => Ok(results),
            Err(RecvTimeoutError::Timeout) => {
                token.cancel();
                Err(AnalyzeError::Timeout { timeout_ms })
            }
            Err(RecvTimeoutError::Disconnected) => Err(AnalyzeError::PluginFault {
                plugin: "<worker>".to_string(),
                message: "analysis worker terminated unexpectedly".to_string(),
            }),
        }
    }

    /// Fold per-plugin results into a terminal analysis.
    fn settle(
        &self,
        analysis: Analysis,
        results: Vec<PluginResult>,
        filename: &str,
        started: Instant,
    ) -> Result<(), EngineError> {
        // Fail fast on the real fault before looking at anything else:
        // sibling `Cancelled` results are collateral of the same fault and
        // must not mask its cause.
        let fault = results.iter().find_map(|(_, result)| match result {
            Err(AnalyzeError::PluginFault { plugin, message }) => {
                Some(AnalyzeError::PluginFault {
                    plugin: plugin.clone(),
                    message: message.clone(),
                })
            }
            Err(AnalyzeError::Timeout { timeout_ms }) => Some(AnalyzeError::Timeout {
                timeout_ms: *timeout_ms,
            }),
            _ => None,
        });
        if let Some(error) = fault {
            return self.fail(analysis, &error, filename);
        }
        if let Some((name, _)) = results
            .iter()
            .find(|(_, r)| matches!(r, Err(AnalyzeError::Cancelled)))
        {
            let error = AnalyzeError::PluginFault {
                plugin: name.clone(),
                message: "cancelled without a recorded fault".to_string(),
            };
            return self.fail(analysis, &error, filename);
        }

        let mut outputs = Vec::new();
        let mut ran = Vec::new();

        for (name, result) in results {
            match result {
                Ok(output) => {
                    ran.push(name);
                    outputs.push(output);
                }
                Err(AnalyzeError::UnsupportedInput { reason, .. }) => {
                    tracing::warn!(
                        analysis_id = analysis.id,
                        plugin = %name,
                        %reason,
                        "plugin skipped"
                    );
                    self.events.emit_plugin_skipped(&PluginSkippedEvent {
                        analysis_id: analysis.id,
                        plugin: name,
                        reason,
                    });
                }
                // Scanned above; nothing can reach here.
                Err(_) => {}
            }
        }

        let mut analysis = analysis;
        let (mut issues, metrics) = merge::merge_outputs(outputs);
        merge::sort_issues(&mut issues);

        let scores = scoring::score(&issues, &metrics);
        analysis.suggestions = merge::collect_suggestions(&issues);
        analysis.issues = issues;
        analysis.metrics = metrics;
        analysis.security_score = scores.security;
        analysis.complexity_score = scores.complexity;
        analysis.performance_score = scores.performance;
        analysis.quality_score = scores.quality;
        analysis.global_score = scores.global;
        analysis.status = AnalysisStatus::Completed;
        analysis.updated_at = time::now_ms();

        self.store.save(&analysis)?;

        let analyzer = if ran.is_empty() {
            "none".to_string()
        } else {
            ran.join(",")
        };
        self.stats.record(&analysis, &analyzer, filename)?;

        self.events.emit_analysis_completed(&AnalysisCompletedEvent {
            analysis_id: analysis.id,
            issue_count: analysis.issues.len(),
            global_score: analysis.global_score,
            duration_ms: started.elapsed().as_millis() as u64,
        });
        tracing::info!(
            analysis_id = analysis.id,
            issues = analysis.issues.len(),
            global_score = analysis.global_score,
            "analysis completed"
        );
        Ok(())
    }

    /// Transition to `Failed`, discarding all partial results.
    fn fail(
        &self,
        mut analysis: Analysis,
        error: &AnalyzeError,
        filename: &str,
    ) -> Result<(), EngineError> {
        analysis.status = AnalysisStatus::Failed;
        analysis.failure = Some(error.to_string());
        analysis.issues.clear();
        analysis.metrics.clear();
        analysis.suggestions.clear();
        analysis.security_score = 0.0;
        analysis.complexity_score = 0.0;
        analysis.performance_score = 0.0;
        analysis.quality_score = 0.0;
        analysis.global_score = 0.0;
        analysis.updated_at = time::now_ms();

        self.store.save(&analysis)?;

        let analyzer = match error {
            AnalyzeError::PluginFault { plugin, .. } => plugin.clone(),
            AnalyzeError::Timeout { .. } => "timeout".to_string(),
            _ => "unknown".to_string(),
        };
        self.stats.record(&analysis, &analyzer, filename)?;

        self.events.emit_analysis_failed(&AnalysisFailedEvent {
            analysis_id: analysis.id,
            error_code: error.error_code().to_string(),
            message: error.to_string(),
        });
        tracing::warn!(
            analysis_id = analysis.id,
            error = %error,
            "analysis failed"
        );
        Ok(())
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "plugin panicked".to_string()
    }
}
