//! The analyzer plugin contract.

use vigil_core::config::EngineConfig;
use vigil_core::errors::AnalyzeError;
use vigil_core::traits::CancellationToken;
use vigil_core::types::{Issue, IssueCategory, Language, Metrics};

/// One submission as seen by a plugin.
pub struct AnalysisRequest<'a> {
    pub source: &'a [u8],
    pub language: Language,
    pub filename: &'a str,
    pub config: &'a EngineConfig,
    pub cancel: &'a CancellationToken,
}

impl AnalysisRequest<'_> {
    /// Decode the submission as text.
    ///
    /// Binary content (embedded NUL) or invalid UTF-8 is a structural
    /// inability to process, not a fault: the plugin is skipped and the
    /// submission continues.
    pub fn text(&self, plugin: &str) -> Result<&str, AnalyzeError> {
        if self.source.contains(&0) {
            return Err(AnalyzeError::UnsupportedInput {
                plugin: plugin.to_string(),
                reason: "binary content".to_string(),
            });
        }
        std::str::from_utf8(self.source).map_err(|_| AnalyzeError::UnsupportedInput {
            plugin: plugin.to_string(),
            reason: "invalid UTF-8".to_string(),
        })
    }
}

/// What a plugin returns: issues found plus the metrics it measured.
///
/// No matches is an empty output, not an error.
#[derive(Debug, Default)]
pub struct PluginOutput {
    pub issues: Vec<Issue>,
    pub metrics: Metrics,
}

impl PluginOutput {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Capability contract every analyzer implements.
///
/// Implementations must be stateless with respect to submissions: the same
/// request always produces the same output.
pub trait AnalyzerPlugin: Send + Sync {
    /// Unique registry name.
    fn name(&self) -> &str;

    /// Languages this plugin understands. Empty means language-agnostic:
    /// the plugin runs for every submission.
    fn languages(&self) -> &[Language];

    /// Issue categories this plugin can produce.
    fn categories(&self) -> &[IssueCategory];

    /// Analyze one submission.
    fn analyze(&self, request: &AnalysisRequest<'_>) -> Result<PluginOutput, AnalyzeError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_core::traits::CancellationToken;

    fn request<'a>(
        source: &'a [u8],
        config: &'a EngineConfig,
        cancel: &'a CancellationToken,
    ) -> AnalysisRequest<'a> {
        AnalysisRequest {
            source,
            language: Language::Python,
            filename: "t.py",
            config,
            cancel,
        }
    }

    #[test]
    fn binary_input_is_unsupported() {
        let config = EngineConfig::default();
        let cancel = CancellationToken::new();
        let req = request(b"\x00\x01\x02", &config, &cancel);
        assert!(matches!(
            req.text("p"),
            Err(AnalyzeError::UnsupportedInput { .. })
        ));
    }

    #[test]
    fn invalid_utf8_is_unsupported() {
        let config = EngineConfig::default();
        let cancel = CancellationToken::new();
        let req = request(&[0xff, 0xfe], &config, &cancel);
        assert!(matches!(
            req.text("p"),
            Err(AnalyzeError::UnsupportedInput { .. })
        ));
    }

    #[test]
    fn text_decodes_utf8() {
        let config = EngineConfig::default();
        let cancel = CancellationToken::new();
        let req = request("x = 1".as_bytes(), &config, &cancel);
        assert_eq!(req.text("p").unwrap(), "x = 1");
    }
}
