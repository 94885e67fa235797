//! Core types for lint violations and results.

use crate::document::Span;
use miette::{
    Diagnostic, LabeledSpan, MietteError, MietteSpanContents, SourceCode, SourceSpan, SpanContents,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for lint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail lint.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(Self::Error),
            "warning" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            other => Err(format!(
                "unknown severity `{other}`. Valid values: error, warning, info"
            )),
        }
    }
}

/// Source location of a violation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Document path.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in the document.
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
    /// Source text the violation points at.
    pub raw: String,
}

impl Location {
    /// Creates a location from a node or token span.
    #[must_use]
    pub fn from_span(file: PathBuf, span: &Span) -> Self {
        Self {
            file,
            line: span.line,
            column: span.column,
            offset: span.offset,
            length: span.raw.len(),
            raw: span.raw.clone(),
        }
    }

    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
            raw: String::new(),
        }
    }
}

/// A suggested fix for a violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
}

impl Suggestion {
    /// Creates a new suggestion.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A lint violation found during analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "ML001").
    pub code: String,
    /// Rule name (e.g., "invalid-attr").
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Primary location of the violation.
    pub location: Location,
    /// Localized message.
    pub message: String,
    /// Optional suggestion for fixing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            location,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Adds a suggestion to this violation.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code,
            self.message
        )
    }
}

/// A violation viewed as a miette [`Diagnostic`] for rich terminal output.
///
/// The flagged source text is shown as a one-line snippet numbered with the
/// violation's own line.
#[derive(Debug)]
pub struct ViolationDiagnostic {
    code: String,
    message: String,
    severity: Severity,
    help: Option<String>,
    label: String,
    snippet: Option<Snippet>,
}

impl From<&Violation> for ViolationDiagnostic {
    fn from(v: &Violation) -> Self {
        let snippet = (!v.location.raw.is_empty()).then(|| Snippet {
            name: v.location.file.display().to_string(),
            raw: v.location.raw.clone(),
            line: v.location.line,
            column: v.location.column,
        });
        Self {
            code: v.code.clone(),
            message: v.message.clone(),
            severity: v.severity,
            help: v.suggestion.as_ref().map(|s| s.message.clone()),
            label: v.rule.clone(),
            snippet,
        }
    }
}

impl std::fmt::Display for ViolationDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ViolationDiagnostic {}

impl Diagnostic for ViolationDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(&self.code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.severity {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
            Severity::Info => miette::Severity::Advice,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.snippet.as_ref().map(|s| s as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let snippet = self.snippet.as_ref()?;
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(self.label.clone()),
            SourceSpan::from((0, snippet.raw.len())),
        ))))
    }
}

/// Flagged source text, placed at its line and column in the document.
#[derive(Debug)]
struct Snippet {
    name: String,
    raw: String,
    line: usize,
    column: usize,
}

impl SourceCode for Snippet {
    fn read_span<'a>(
        &'a self,
        span: &SourceSpan,
        context_lines_before: usize,
        context_lines_after: usize,
    ) -> Result<Box<dyn SpanContents<'a> + 'a>, MietteError> {
        let contents =
            self.raw
                .as_str()
                .read_span(span, context_lines_before, context_lines_after)?;
        let column = if contents.line() == 0 {
            contents.column() + self.column.saturating_sub(1)
        } else {
            contents.column()
        };
        Ok(Box::new(MietteSpanContents::new_named(
            self.name.clone(),
            contents.data(),
            *contents.span(),
            contents.line() + self.line.saturating_sub(1),
            column,
            contents.line_count(),
        )))
    }
}

/// Result of linting one or more documents.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found.
    pub violations: Vec<Violation>,
    /// Number of documents checked.
    pub documents_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_violations_at(Severity::Error)
    }

    /// Returns true if there are any warnings or errors.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.has_violations_at(Severity::Warning)
    }

    /// Checks if any violations meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.violations.iter().any(|v| v.severity >= severity)
    }

    /// Returns violations filtered by rule name.
    #[must_use]
    pub fn by_rule(&self, rule: &str) -> Vec<&Violation> {
        self.violations.iter().filter(|v| v.rule == rule).collect()
    }

    /// Counts violations by severity: `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |severity| {
            self.violations
                .iter()
                .filter(|v| v.severity == severity)
                .count()
        };
        (
            count(Severity::Error),
            count(Severity::Warning),
            count(Severity::Info),
        )
    }

    /// Adds violations from another result.
    pub fn extend(&mut self, other: Self) {
        self.violations.extend(other.violations);
        self.documents_checked += other.documents_checked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(severity: Severity) -> Violation {
        Violation::new(
            "ML001",
            "invalid-attr",
            severity,
            Location::from_span(PathBuf::from("index.html"), &Span::new(4, 9, "colspan")),
            "\"colspan\" attribute is disallow",
        )
    }

    #[test]
    fn location_from_span_keeps_raw() {
        let v = make_violation(Severity::Error);
        assert_eq!(v.location.line, 4);
        assert_eq!(v.location.column, 9);
        assert_eq!(v.location.length, 7);
        assert_eq!(v.location.raw, "colspan");
    }

    #[test]
    fn violation_display() {
        let v = make_violation(Severity::Warning);
        assert_eq!(
            v.to_string(),
            "index.html:4:9: warning [ML001] \"colspan\" attribute is disallow"
        );
    }

    #[test]
    fn severity_from_str() {
        assert_eq!("warning".parse::<Severity>(), Ok(Severity::Warning));
        assert!("critical".parse::<Severity>().is_err());
    }

    #[test]
    fn diagnostic_view() {
        let v = make_violation(Severity::Warning).with_suggestion(Suggestion::new("Remove it"));
        let diagnostic = ViolationDiagnostic::from(&v);
        assert_eq!(diagnostic.to_string(), "\"colspan\" attribute is disallow");
        assert_eq!(
            diagnostic.code().map(|c| c.to_string()),
            Some("ML001".to_string())
        );
        assert_eq!(diagnostic.severity(), Some(miette::Severity::Warning));
        assert_eq!(
            diagnostic.help().map(|h| h.to_string()),
            Some("Remove it".to_string())
        );

        let labels: Vec<LabeledSpan> = diagnostic.labels().into_iter().flatten().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].label(), Some("invalid-attr"));
        assert_eq!(labels[0].len(), 7);
    }

    #[test]
    fn diagnostic_snippet_keeps_document_position() {
        let v = make_violation(Severity::Error);
        let diagnostic = ViolationDiagnostic::from(&v);
        let source = diagnostic.source_code().expect("snippet");
        let contents = source
            .read_span(&SourceSpan::from((0, 7)), 0, 0)
            .expect("span");
        assert_eq!(contents.data(), b"colspan");
        assert_eq!(contents.line(), 3);
        assert_eq!(contents.column(), 8);
        assert_eq!(contents.name(), Some("index.html"));
    }

    #[test]
    fn diagnostic_without_raw_has_no_snippet() {
        let v = Violation::new(
            "ML003",
            "no-empty-palpable-content",
            Severity::Info,
            Location::new(PathBuf::from("index.html"), 2, 1),
            "empty",
        );
        let diagnostic = ViolationDiagnostic::from(&v);
        assert!(diagnostic.source_code().is_none());
        assert!(diagnostic.labels().is_none());
        assert_eq!(diagnostic.severity(), Some(miette::Severity::Advice));
    }

    #[test]
    fn has_violations_at_threshold() {
        let mut result = LintResult::new();
        result.violations.push(make_violation(Severity::Warning));
        assert!(!result.has_errors());
        assert!(result.has_warnings());
        assert!(result.has_violations_at(Severity::Info));
    }

    #[test]
    fn by_rule_filters_violations() {
        let mut result = LintResult::new();
        result.violations.push(make_violation(Severity::Warning));
        result.violations.push(Violation::new(
            "ML004",
            "attr-duplication",
            Severity::Error,
            Location::new(PathBuf::from("index.html"), 1, 1),
            "duplicated",
        ));
        assert_eq!(result.by_rule("invalid-attr").len(), 1);
        assert_eq!(result.by_rule("attr-duplication")[0].code, "ML004");
        assert!(result.by_rule("class-naming").is_empty());
    }

    #[test]
    fn extend_merges_counts() {
        let mut a = LintResult::new();
        a.documents_checked = 1;
        let mut b = LintResult::new();
        b.documents_checked = 1;
        b.violations.push(make_violation(Severity::Info));
        a.extend(b);
        assert_eq!(a.documents_checked, 2);
        assert_eq!(a.count_by_severity(), (0, 0, 1));
    }
}
