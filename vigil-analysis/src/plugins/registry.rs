//! Plugin registry — process-wide name → plugin bindings.

use std::sync::{Arc, RwLock};

use rustc_hash::FxHashMap;

use vigil_core::errors::{EngineError, RegistryError};
use vigil_core::types::Language;

use super::traits::AnalyzerPlugin;
use super::{ComplexityAnalyzer, DuplicationAnalyzer, PatternAnalyzer};
use crate::patterns::PatternRepository;

/// Name-keyed registry of analyzer plugins.
///
/// Populated single-threaded at bootstrap, before submissions start; from
/// then on the read path only takes the shared lock. `register` validates the
/// declared contract up front so a malformed plugin is rejected at
/// construction time rather than mid-analysis.
pub struct PluginRegistry {
    plugins: RwLock<FxHashMap<String, Arc<dyn AnalyzerPlugin>>>,
}

impl PluginRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            plugins: RwLock::new(FxHashMap::default()),
        }
    }

    /// A registry populated with the builtin plugins.
    pub fn bootstrap() -> Result<Self, EngineError> {
        let registry = Self::new();
        let repo = Arc::new(PatternRepository::builtin()?);
        registry.register(Arc::new(PatternAnalyzer::new(repo)))?;
        registry.register(Arc::new(ComplexityAnalyzer))?;
        registry.register(Arc::new(DuplicationAnalyzer))?;
        Ok(registry)
    }

    /// Register a plugin, validating the declared contract.
    /// Re-registration under the same name overwrites (last-write-wins).
    pub fn register(&self, plugin: Arc<dyn AnalyzerPlugin>) -> Result<(), RegistryError> {
        Self::validate(plugin.as_ref())?;
        let name = plugin.name().to_string();
        let mut plugins = self.plugins.write().expect("registry lock poisoned");
        if plugins.insert(name.clone(), plugin).is_some() {
            tracing::debug!(plugin = %name, "plugin re-registered, previous binding replaced");
        }
        Ok(())
    }

    /// Look up a plugin by name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn AnalyzerPlugin>, RegistryError> {
        self.plugins
            .read()
            .expect("registry lock poisoned")
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound {
                name: name.to_string(),
            })
    }

    /// Defensive copy of the current bindings.
    pub fn list(&self) -> FxHashMap<String, Arc<dyn AnalyzerPlugin>> {
        self.plugins.read().expect("registry lock poisoned").clone()
    }

    /// Remove every binding. Bootstrap/test reset only — never during live
    /// analysis.
    pub fn clear(&self) {
        self.plugins.write().expect("registry lock poisoned").clear();
    }

    /// Plugins applicable to a submission: declared language matches, plus
    /// language-agnostic plugins. `enabled` restricts by name when non-empty.
    /// Sorted by name so plugin order is deterministic.
    pub fn applicable(
        &self,
        language: Language,
        enabled: &[String],
    ) -> Vec<Arc<dyn AnalyzerPlugin>> {
        let plugins = self.plugins.read().expect("registry lock poisoned");
        let mut selected: Vec<Arc<dyn AnalyzerPlugin>> = plugins
            .values()
            .filter(|p| p.languages().is_empty() || p.languages().contains(&language))
            .filter(|p| enabled.is_empty() || enabled.iter().any(|n| n == p.name()))
            .cloned()
            .collect();
        selected.sort_by(|a, b| a.name().cmp(b.name()));
        selected
    }

    fn validate(plugin: &dyn AnalyzerPlugin) -> Result<(), RegistryError> {
        if plugin.name().trim().is_empty() {
            return Err(RegistryError::ContractViolation {
                name: "<unnamed>".to_string(),
                reason: "plugin name is empty".to_string(),
            });
        }
        if plugin.categories().is_empty() {
            return Err(RegistryError::ContractViolation {
                name: plugin.name().to_string(),
                reason: "plugin declares no issue categories".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}
