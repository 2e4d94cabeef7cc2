//! Lint configuration.
//!
//! Configuration is applied by the orchestrator after an analyzer has run; analyzers never
//! see it. A config file is YAML:
//!
//! ```yaml
//! disabled: [C010, B091]
//! severity:
//!   C011: error
//! buildconf: true
//! ```

use crate::diagnostics::{Diagnostic, Severity};
use crate::source::SourceKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while loading a [`LintConfig`].
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    /// The config text is not valid YAML for [`LintConfig`].
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    /// The config file could not be read.
    Io(#[from] std::io::Error),
}

/// Per-rule settings for both analyzers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    /// Rule codes that are never reported.
    pub disabled: BTreeSet<String>,
    /// Severity overrides keyed by rule code.
    pub severity: BTreeMap<String, Severity>,
    /// Analyze C buffers.
    pub c: bool,
    /// Analyze buildconf buffers.
    pub buildconf: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            disabled: BTreeSet::new(),
            severity: BTreeMap::new(),
            c: true,
            buildconf: true,
        }
    }
}

impl LintConfig {
    /// Parse a config from YAML text. An empty document yields the default config.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load a config from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Whether buffers of `kind` are analyzed at all.
    pub fn is_enabled(&self, kind: SourceKind) -> bool {
        match kind {
            SourceKind::C => self.c,
            SourceKind::Buildconf => self.buildconf,
        }
    }

    /// Whether diagnostics with rule `code` are reported.
    pub fn is_rule_enabled(&self, code: &str) -> bool {
        !self.disabled.contains(code)
    }

    /// Drop disabled rules and apply severity overrides, preserving order.
    pub fn apply(&self, diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
        diagnostics
            .into_iter()
            .filter(|d| d.code.as_deref().is_none_or(|c| self.is_rule_enabled(c)))
            .map(|mut d| {
                if let Some(&severity) = d.code.as_deref().and_then(|c| self.severity.get(c)) {
                    d.severity = severity;
                }
                d
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(
            LintConfig::from_yaml_str("").unwrap(),
            LintConfig::default()
        );
        assert_eq!(
            LintConfig::from_yaml_str("  \n").unwrap(),
            LintConfig::default()
        );
    }

    #[test]
    fn test_parse_full_config() {
        let config = LintConfig::from_yaml_str(
            "disabled: [C010, B091]\nseverity:\n  C011: error\n  B070: suggestion\nc: false\n",
        )
        .unwrap();

        assert!(!config.is_rule_enabled("C010"));
        assert!(config.is_rule_enabled("C011"));
        assert_eq!(config.severity.get("C011"), Some(&Severity::Error));
        assert_eq!(config.severity.get("B070"), Some(&Severity::Suggestion));
        assert!(!config.is_enabled(SourceKind::C));
        assert!(config.is_enabled(SourceKind::Buildconf));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = LintConfig::from_yaml_str("disable: [C010]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_apply_filters_and_overrides() {
        let config =
            LintConfig::from_yaml_str("disabled: [C010]\nseverity:\n  C011: error\n").unwrap();
        let diagnostics = vec![
            Diagnostic::new(Severity::Warning, "C010", "C: tab character on line 1.").at_line(1),
            Diagnostic::new(Severity::Warning, "C011", "C: missing semicolon on line 1.")
                .at_line(1),
            Diagnostic::classified("C: empty file."),
        ];

        let applied = config.apply(diagnostics);
        assert_eq!(applied.len(), 2);
        assert_eq!(applied[0].code.as_deref(), Some("C011"));
        assert_eq!(applied[0].severity, Severity::Error);
        assert_eq!(applied[1].message, "C: empty file.");
        assert_eq!(applied[1].severity, Severity::Error);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = LintConfig::load("/definitely/not/here/bakelint.yml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
