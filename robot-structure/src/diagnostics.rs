//! Diagnostics for definitions the document refused to store
//!
//! Keyed inserts into a [`ParsedDocument`](crate::document::ParsedDocument)
//! return `false` when the name is already taken. The tokenizer decides what
//! to do with that; this module turns it into a diagnostic for the editor.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::DiagnosticsConfig;
use crate::token::ParsedToken;

/// Name reported as the diagnostic source
pub const DIAGNOSTIC_SOURCE: &str = "robot-structure";

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Information,
}

/// Kind of keyed definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Library,
    Variable,
    TestCase,
    Keyword,
}

impl DefinitionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefinitionKind::Library => "library",
            DefinitionKind::Variable => "variable",
            DefinitionKind::TestCase => "test case",
            DefinitionKind::Keyword => "keyword",
        }
    }
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message attached to a character range of the source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Character offset where the range starts
    pub start: usize,
    /// Character offset just past the range
    pub end: usize,
    pub severity: DiagnosticSeverity,
    pub code: &'static str,
    pub source: &'static str,
    pub message: String,
}

/// Create a diagnostic for a definition whose name was already taken.
///
/// `name` is the token of the rejected definition. The severity comes from
/// `config`. Returns `None` when duplicate reporting is disabled.
pub fn duplicate_definition(
    kind: DefinitionKind,
    name: &ParsedToken,
    config: &DiagnosticsConfig,
) -> Option<Diagnostic> {
    if !config.duplicates_enabled() {
        return None;
    }

    tracing::debug!(
        "Duplicate {} definition {}, creating diagnostic",
        kind,
        name.debug_string()
    );
    Some(Diagnostic {
        start: name.source_offset(),
        end: name.end_offset(),
        severity: config.duplicate_severity,
        code: "duplicate-definition",
        source: DIAGNOSTIC_SOURCE,
        message: format!(
            "Duplicate {kind} '{}'; the first definition is used",
            name.text()
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ArgumentClassifier;
    use crate::token::RawToken;

    fn name(text: &str, offset: i64) -> ParsedToken {
        RawToken::new(text, offset)
            .unwrap()
            .classify(ArgumentClassifier::NewKeyword)
    }

    #[test]
    fn test_duplicate_definition() {
        let config = DiagnosticsConfig::default();
        let diag =
            duplicate_definition(DefinitionKind::Keyword, &name("Log In", 42), &config).unwrap();

        assert_eq!(diag.start, 42);
        assert_eq!(diag.end, 48);
        assert_eq!(diag.severity, DiagnosticSeverity::Warning);
        assert_eq!(diag.code, "duplicate-definition");
        assert_eq!(diag.source, DIAGNOSTIC_SOURCE);
        assert_eq!(
            diag.message,
            "Duplicate keyword 'Log In'; the first definition is used"
        );
    }

    #[test]
    fn test_test_case_message() {
        let diag = duplicate_definition(
            DefinitionKind::TestCase,
            &name("Login Test", 0),
            &DiagnosticsConfig::default(),
        )
        .unwrap();
        assert!(diag.message.starts_with("Duplicate test case 'Login Test'"));
    }

    #[test]
    fn test_disabled() {
        let disabled = DiagnosticsConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(
            duplicate_definition(DefinitionKind::Variable, &name("${X}", 0), &disabled).is_none()
        );

        let not_reported = DiagnosticsConfig {
            report_duplicates: false,
            ..Default::default()
        };
        assert!(
            duplicate_definition(DefinitionKind::Library, &name("Lib", 0), &not_reported).is_none()
        );
    }

    #[test]
    fn test_configured_severity() {
        let config = DiagnosticsConfig {
            duplicate_severity: DiagnosticSeverity::Error,
            ..Default::default()
        };
        let diag =
            duplicate_definition(DefinitionKind::Keyword, &name("Log In", 0), &config).unwrap();
        assert_eq!(diag.severity, DiagnosticSeverity::Error);

        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["severity"], "error");
    }

    #[test]
    fn test_serializes_for_editor() {
        let diag = duplicate_definition(
            DefinitionKind::Variable,
            &name("${X}", 3),
            &DiagnosticsConfig::default(),
        )
        .unwrap();
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["start"], 3);
        assert_eq!(json["end"], 7);
    }
}
