//! Configuration for the structural model

use serde::Deserialize;

use crate::diagnostics::DiagnosticSeverity;

/// Top-level configuration, usually taken from an editor's init options
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Keyword lookup configuration
    pub keywords: KeywordConfig,
    /// Diagnostics configuration
    pub diagnostics: DiagnosticsConfig,
}

/// Keyword lookup configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Retry a failed lookup with a leading Given/When/Then/And removed
    pub strip_bdd_prefixes: bool,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            strip_bdd_prefixes: true,
        }
    }
}

/// Diagnostics configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Enable diagnostics
    pub enabled: bool,
    /// Report definitions discarded because their name was already taken
    pub report_duplicates: bool,
    /// Severity given to duplicate definition diagnostics
    pub duplicate_severity: DiagnosticSeverity,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            report_duplicates: true,
            duplicate_severity: DiagnosticSeverity::Warning,
        }
    }
}

impl DiagnosticsConfig {
    /// Whether duplicate definitions produce diagnostics at all
    pub fn duplicates_enabled(&self) -> bool {
        self.enabled && self.report_duplicates
    }
}

impl Config {
    /// Parse configuration from initialization options
    pub fn from_init_options(options: Option<serde_json::Value>) -> Self {
        match options {
            Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                tracing::warn!("Invalid configuration, using defaults: {}", e);
                Self::default()
            }),
            None => Self::default(),
        }
    }
}
