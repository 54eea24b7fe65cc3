//! Compiled pattern sets and the language-keyed repository.

use aho_corasick::AhoCorasick;
use rustc_hash::FxHashMap;

use vigil_core::errors::PatternError;
use vigil_core::types::{Issue, Language};

use super::catalog;
use super::types::{CompiledPattern, PatternDef};

const MAX_SNIPPET_CHARS: usize = 160;

/// One language's compiled rules plus the literal prefilter in front of them.
///
/// The prefilter runs the aho-corasick automaton over each line first; only
/// rules whose anchor literal occurred (plus the anchorless rules) get their
/// regex evaluated.
pub struct PatternSet {
    rules: FxHashMap<String, CompiledPattern>,
    /// Rule ids with an anchor, parallel to the automaton's pattern ids.
    anchored: Vec<String>,
    /// Rule ids whose regex runs on every line.
    unanchored: Vec<String>,
    prefilter: AhoCorasick,
}

impl PatternSet {
    /// Compile a builtin definition table.
    pub fn from_defs(defs: &[PatternDef]) -> Result<Self, PatternError> {
        let compiled = defs
            .iter()
            .map(CompiledPattern::from_def)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_compiled(compiled)
    }

    /// Build a set from already-compiled rules.
    pub fn from_compiled(compiled: Vec<CompiledPattern>) -> Result<Self, PatternError> {
        let mut rules = FxHashMap::default();
        let mut anchored = Vec::new();
        let mut anchors = Vec::new();
        let mut unanchored = Vec::new();

        for pattern in compiled {
            match &pattern.anchor {
                Some(anchor) => {
                    anchored.push(pattern.id.clone());
                    anchors.push(anchor.clone());
                }
                None => unanchored.push(pattern.id.clone()),
            }
            rules.insert(pattern.id.clone(), pattern);
        }

        let prefilter = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&anchors)
            .map_err(|e| PatternError::CompileFailed(format!("prefilter: {e}")))?;

        Ok(Self {
            rules,
            anchored,
            unanchored,
            prefilter,
        })
    }

    /// Read-only view of the compiled rules, keyed by rule id.
    pub fn rules(&self) -> &FxHashMap<String, CompiledPattern> {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Scan source line-wise, appending one issue per (rule, line) match.
    ///
    /// The first match of a rule on a line wins; a rule may still fire on
    /// multiple lines.
    pub fn scan(&self, file: &str, source: &str, out: &mut Vec<Issue>) {
        for (idx, line) in source.lines().enumerate() {
            let line_no = (idx + 1) as u32;

            // Anchored candidates present on this line, deduplicated.
            let mut candidates: Vec<&str> = self
                .prefilter
                .find_overlapping_iter(line)
                .map(|m| self.anchored[m.pattern().as_usize()].as_str())
                .collect();
            candidates.sort_unstable();
            candidates.dedup();
            candidates.extend(self.unanchored.iter().map(String::as_str));

            for rule_id in candidates {
                let Some(pattern) = self.rules.get(rule_id) else {
                    continue;
                };
                if let Some(m) = pattern.regex.find(line) {
                    out.push(Issue {
                        rule_id: pattern.id.clone(),
                        severity: pattern.severity,
                        category: pattern.category,
                        message: pattern.description.clone(),
                        file: file.to_string(),
                        line: line_no,
                        column: Some(m.start() as u32 + 1),
                        snippet: truncate_snippet(line.trim()),
                        suggestion: pattern.suggestion.clone(),
                        cwe_ids: pattern.cwe_ids.clone(),
                    });
                }
            }
        }
    }
}

/// Per-language catalog of compiled detection rules, built once at bootstrap
/// and shared read-only afterwards.
pub struct PatternRepository {
    by_language: FxHashMap<Language, PatternSet>,
    agnostic: PatternSet,
    empty: PatternSet,
}

impl PatternRepository {
    /// An empty repository; rules arrive via `extend_language` /
    /// `extend_agnostic` (e.g. from TOML files).
    pub fn new() -> Result<Self, PatternError> {
        Ok(Self {
            by_language: FxHashMap::default(),
            agnostic: PatternSet::from_compiled(Vec::new())?,
            empty: PatternSet::from_compiled(Vec::new())?,
        })
    }

    /// Compile the builtin catalogs.
    pub fn builtin() -> Result<Self, PatternError> {
        let mut by_language = FxHashMap::default();
        let typescript = PatternSet::from_defs(catalog::TYPESCRIPT)?;
        // JavaScript shares the TypeScript table.
        let javascript = PatternSet::from_defs(catalog::TYPESCRIPT)?;
        by_language.insert(Language::TypeScript, typescript);
        by_language.insert(Language::JavaScript, javascript);
        by_language.insert(Language::Python, PatternSet::from_defs(catalog::PYTHON)?);
        by_language.insert(Language::Sql, PatternSet::from_defs(catalog::SQL)?);

        Ok(Self {
            by_language,
            agnostic: PatternSet::from_defs(catalog::AGNOSTIC)?,
            empty: PatternSet::from_compiled(Vec::new())?,
        })
    }

    /// The compiled rules for a language, keyed by rule id.
    /// A language with no catalog yields the empty map, not an error.
    pub fn get_patterns(&self, language: Language) -> &FxHashMap<String, CompiledPattern> {
        self.language_set(language).rules()
    }

    /// The full pattern set for a language (empty set when absent).
    pub fn language_set(&self, language: Language) -> &PatternSet {
        self.by_language.get(&language).unwrap_or(&self.empty)
    }

    /// The language-agnostic set, applied to every submission.
    pub fn agnostic_set(&self) -> &PatternSet {
        &self.agnostic
    }

    /// Add compiled rules (e.g. from a TOML file) to a language's set.
    pub fn extend_language(
        &mut self,
        language: Language,
        extra: Vec<CompiledPattern>,
    ) -> Result<(), PatternError> {
        let mut compiled: Vec<CompiledPattern> = self
            .language_set(language)
            .rules()
            .values()
            .cloned()
            .collect();
        compiled.extend(extra);
        self.by_language
            .insert(language, PatternSet::from_compiled(compiled)?);
        Ok(())
    }

    /// Add compiled rules to the language-agnostic set.
    pub fn extend_agnostic(&mut self, extra: Vec<CompiledPattern>) -> Result<(), PatternError> {
        let mut compiled: Vec<CompiledPattern> =
            self.agnostic.rules().values().cloned().collect();
        compiled.extend(extra);
        self.agnostic = PatternSet::from_compiled(compiled)?;
        Ok(())
    }

    /// Scan a submission against the language's set plus the agnostic set.
    pub fn scan(&self, language: Language, file: &str, source: &str) -> Vec<Issue> {
        let mut issues = Vec::new();
        self.language_set(language).scan(file, source, &mut issues);
        self.agnostic.scan(file, source, &mut issues);
        issues
    }
}

fn truncate_snippet(line: &str) -> String {
    if line.chars().count() <= MAX_SNIPPET_CHARS {
        line.to_string()
    } else {
        line.chars().take(MAX_SNIPPET_CHARS).collect()
    }
}
