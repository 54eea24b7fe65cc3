//! Pattern analyzer — the reference plugin. Consults the compiled rule
//! catalogs and reports one issue per match.

use std::sync::Arc;

use vigil_core::errors::AnalyzeError;
use vigil_core::traits::Cancellable;
use vigil_core::types::{IssueCategory, Language, Metrics};

use super::traits::{AnalysisRequest, AnalyzerPlugin, PluginOutput};
use crate::patterns::PatternRepository;

const SUPPORTED: &[Language] = &[
    Language::TypeScript,
    Language::JavaScript,
    Language::Python,
    Language::Sql,
];

const CATEGORIES: &[IssueCategory] = &[
    IssueCategory::Security,
    IssueCategory::Quality,
    IssueCategory::Performance,
];

pub struct PatternAnalyzer {
    repository: Arc<PatternRepository>,
}

impl PatternAnalyzer {
    pub fn new(repository: Arc<PatternRepository>) -> Self {
        Self { repository }
    }
}

impl AnalyzerPlugin for PatternAnalyzer {
    fn name(&self) -> &str {
        "patterns"
    }

    fn languages(&self) -> &[Language] {
        SUPPORTED
    }

    fn categories(&self) -> &[IssueCategory] {
        CATEGORIES
    }

    fn analyze(&self, request: &AnalysisRequest<'_>) -> Result<PluginOutput, AnalyzeError> {
        let text = request.text(self.name())?;
        if request.cancel.is_cancelled() {
            return Err(AnalyzeError::Cancelled);
        }

        let issues = self
            .repository
            .scan(request.language, request.filename, text);

        let mut metrics = Metrics::default();
        metrics.insert("pattern_matches".to_string(), issues.len() as f64);

        tracing::debug!(
            file = request.filename,
            language = %request.language,
            matches = issues.len(),
            "pattern scan complete"
        );

        Ok(PluginOutput { issues, metrics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_core::config::EngineConfig;
    use vigil_core::traits::CancellationToken;

    fn analyzer() -> PatternAnalyzer {
        PatternAnalyzer::new(Arc::new(PatternRepository::builtin().unwrap()))
    }

    #[test]
    fn clean_source_yields_empty_output() {
        let config = EngineConfig::default();
        let cancel = CancellationToken::new();
        let out = analyzer()
            .analyze(&AnalysisRequest {
                source: b"const x: number = 1;\n",
                language: Language::TypeScript,
                filename: "a.ts",
                config: &config,
                cancel: &cancel,
            })
            .unwrap();
        assert!(out.issues.is_empty());
        assert_eq!(out.metrics.get("pattern_matches"), Some(&0.0));
    }

    #[test]
    fn binary_source_is_skipped_not_fatal() {
        let config = EngineConfig::default();
        let cancel = CancellationToken::new();
        let err = analyzer()
            .analyze(&AnalysisRequest {
                source: b"\x00\x01binary",
                language: Language::Python,
                filename: "blob.bin",
                config: &config,
                cancel: &cancel,
            })
            .unwrap_err();
        assert!(matches!(err, AnalyzeError::UnsupportedInput { .. }));
    }

    #[test]
    fn cancelled_request_short_circuits() {
        let config = EngineConfig::default();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = analyzer()
            .analyze(&AnalysisRequest {
                source: b"eval(x)\n",
                language: Language::JavaScript,
                filename: "a.js",
                config: &config,
                cancel: &cancel,
            })
            .unwrap_err();
        assert!(matches!(err, AnalyzeError::Cancelled));
    }
}
