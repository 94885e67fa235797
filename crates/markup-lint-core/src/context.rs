//! Context types for rule execution.

use crate::document::{AttributeToken, Document, Node, Span};
use crate::i18n::Translator;
use crate::rule::Rule;
use crate::spec::SpecLookup;
use crate::types::{Location, Severity, Suggestion, Violation};
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

/// Anything a report can point at.
pub trait Scope {
    /// Default location of reports about this scope.
    fn span(&self) -> &Span;
}

impl Scope for Node<'_> {
    fn span(&self) -> &Span {
        Node::span(self)
    }
}

/// Attribute reports point at the attribute name.
impl Scope for AttributeToken {
    fn span(&self) -> &Span {
        &self.name_span
    }
}

impl Scope for Span {
    fn span(&self) -> &Span {
        self
    }
}

/// A diagnostic about to be reported.
///
/// The location defaults to the scope's span; `with_line`, `with_col` and
/// `with_raw` override parts of it.
#[derive(Debug, Clone)]
pub struct Report {
    span: Span,
    message: String,
    suggestion: Option<Suggestion>,
}

impl Report {
    /// Creates a report located at `scope`.
    #[must_use]
    pub fn new<S: Scope + ?Sized>(scope: &S, message: impl Into<String>) -> Self {
        Self {
            span: scope.span().clone(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Overrides the line.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.span.line = line;
        self
    }

    /// Overrides the column.
    #[must_use]
    pub fn with_col(mut self, column: usize) -> Self {
        self.span.column = column;
        self
    }

    /// Overrides the source text the report points at.
    #[must_use]
    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.span.raw = raw.into();
        self
    }

    /// Attaches a fix suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, message: impl Into<String>) -> Self {
        self.suggestion = Some(Suggestion::new(message));
        self
    }
}

/// Everything a rule sees while verifying one document.
///
/// A context is created per rule and per document; violations reported
/// through it are collected with [`RuleContext::into_violations`].
pub struct RuleContext<'a> {
    document: &'a Document,
    specs: &'a dyn SpecLookup,
    translator: &'a Translator,
    code: &'static str,
    name: &'static str,
    severity: Severity,
    violations: Mutex<Vec<Violation>>,
}

impl<'a> RuleContext<'a> {
    /// Creates a context for `rule` over `document`.
    #[must_use]
    pub fn new(
        document: &'a Document,
        specs: &'a dyn SpecLookup,
        translator: &'a Translator,
        rule: &dyn Rule,
    ) -> Self {
        Self {
            document,
            specs,
            translator,
            code: rule.code(),
            name: rule.name(),
            severity: rule.default_severity(),
            violations: Mutex::new(Vec::new()),
        }
    }

    /// The document being verified.
    #[must_use]
    pub fn document(&self) -> &'a Document {
        self.document
    }

    /// The attribute specification lookup.
    #[must_use]
    pub fn specs(&self) -> &'a dyn SpecLookup {
        self.specs
    }

    /// The translator for messages.
    #[must_use]
    pub fn translator(&self) -> &'a Translator {
        self.translator
    }

    /// Shorthand for [`Translator::translate`].
    #[must_use]
    pub fn t(&self, template: &str, args: &[&str]) -> String {
        self.translator.translate(template, args)
    }

    /// Records a violation. Never fails.
    pub fn report(&self, report: Report) {
        let file = self
            .document
            .path()
            .map_or_else(|| PathBuf::from("<input>"), PathBuf::from);
        let mut violation = Violation::new(
            self.code,
            self.name,
            self.severity,
            Location::from_span(file, &report.span),
            report.message,
        );
        violation.suggestion = report.suggestion;

        self.violations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(violation);
    }

    /// Number of violations reported so far.
    #[must_use]
    pub fn reported(&self) -> usize {
        self.violations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Consumes the context, returning the reported violations in order.
    #[must_use]
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
