//! Rule to forbid duplicate attributes on an element.
//!
//! Attribute names are compared case-insensitively, so `<img SRC="a" src="b">`
//! is reported. Every occurrence after the first is reported at its name.

use async_trait::async_trait;
use markup_lint_core::document::NodeKind;
use markup_lint_core::{Report, Rule, RuleContext, RuleError, Severity};
use std::collections::HashSet;

/// Rule code for attr-duplication.
pub const CODE: &str = "ML004";

/// Rule name for attr-duplication.
pub const NAME: &str = "attr-duplication";

/// Forbids writing an attribute more than once.
#[derive(Debug, Clone)]
pub struct AttrDuplication {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for AttrDuplication {
    fn default() -> Self {
        Self::new()
    }
}

impl AttrDuplication {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

#[async_trait]
impl Rule for AttrDuplication {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids duplicate attributes on an element"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    async fn verify(&self, ctx: &RuleContext<'_>) -> Result<(), RuleError> {
        ctx.document()
            .walk_on(NodeKind::Element, |node| async move {
                let mut seen = HashSet::new();
                for token in node.attributes() {
                    if seen.insert(token.name.to_ascii_lowercase()) {
                        continue;
                    }
                    let message = ctx.t(
                        "{0} is duplicated",
                        &[&ctx.t("the \"{0*}\" attribute", &[&token.name])],
                    );
                    ctx.report(
                        Report::new(token, message)
                            .with_suggestion("Remove the duplicate attribute"),
                    );
                }
                Ok(())
            })
            .await
    }
}
