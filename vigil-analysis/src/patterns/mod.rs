//! Pattern repository — per-language catalogs of compiled detection rules.
//!
//! Catalogs are declarative data tables compiled exactly once into regex
//! matchers with an aho-corasick literal prefilter in front of them.

pub mod catalog;
pub mod repository;
pub mod toml_patterns;
pub mod types;

pub use repository::{PatternRepository, PatternSet};
pub use toml_patterns::TomlPatternLoader;
pub use types::{CompiledPattern, PatternDef};
