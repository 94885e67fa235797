//! Rule to enforce class naming conventions.
//!
//! Every class name in a static `class` attribute must match at least one of
//! the configured regular expressions. Each offending class is reported at
//! its own position inside the attribute value.
//!
//! # Configuration
//!
//! The rule's `value` holds the pattern or patterns:
//!
//! ```toml
//! [rules.class-naming]
//! value = ["^c-[a-z][a-z0-9-]*$", "^u-[a-z]+$"]
//! ```
//!
//! With no patterns the rule reports nothing.

use async_trait::async_trait;
use markup_lint_core::document::{AttributeToken, NodeKind};
use markup_lint_core::{Report, Rule, RuleConfig, RuleContext, RuleError, Severity};
use regex::Regex;

/// Rule code for class-naming.
pub const CODE: &str = "ML002";

/// Rule name for class-naming.
pub const NAME: &str = "class-naming";

/// Checks class names against naming patterns.
#[derive(Debug, Clone)]
pub struct ClassNaming {
    /// Accepted class name patterns.
    pub patterns: Vec<Regex>,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for ClassNaming {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassNaming {
    /// Creates a rule with no patterns.
    #[must_use]
    pub fn new() -> Self {
        Self {
            patterns: Vec::new(),
            severity: Severity::Warning,
        }
    }

    /// Creates a rule from pattern sources.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is not a valid regular expression.
    pub fn with_patterns<I, S>(patterns: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                Regex::new(p.as_ref())
                    .map_err(|e| RuleError::invalid_option("value", e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            patterns,
            ..Self::new()
        })
    }

    /// Creates the rule from its configuration table.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern in `value` is not a valid regular expression.
    pub fn from_config(config: &RuleConfig) -> Result<Self, RuleError> {
        Self::with_patterns(config.value_strings())
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn is_valid(&self, class: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(class))
    }

    fn check_token(&self, ctx: &RuleContext<'_>, token: &AttributeToken) {
        let sources: Vec<&str> = self.patterns.iter().map(Regex::as_str).collect();

        for (offset, class) in class_names(&token.value) {
            if self.is_valid(class) {
                continue;
            }
            let message = ctx.t(
                "{0} should match {1:c}",
                &[
                    &ctx.t("the \"{0*}\" class name", &[class]),
                    &ctx.translator().list(&sources),
                ],
            );
            let report = match &token.value_span {
                Some(span) => Report::new(span, message)
                    .with_col(span.column + offset)
                    .with_raw(class),
                None => Report::new(token, message),
            };
            ctx.report(report);
        }
    }
}

/// Splits a class list into `(character offset, class)` pairs.
fn class_names(value: &str) -> Vec<(usize, &str)> {
    let mut names = Vec::new();
    let mut start: Option<(usize, usize)> = None;
    let mut chars = 0;

    for (byte, c) in value.char_indices() {
        match (c.is_ascii_whitespace(), start) {
            (true, Some((char_at, byte_at))) => {
                names.push((char_at, &value[byte_at..byte]));
                start = None;
            }
            (false, None) => start = Some((chars, byte)),
            _ => {}
        }
        chars += 1;
    }
    if let Some((char_at, byte_at)) = start {
        names.push((char_at, &value[byte_at..]));
    }

    names
}

#[async_trait]
impl Rule for ClassNaming {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires class names to match the configured patterns"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn default_value(&self) -> toml::Value {
        toml::Value::Array(Vec::new())
    }

    async fn verify(&self, ctx: &RuleContext<'_>) -> Result<(), RuleError> {
        if self.patterns.is_empty() {
            return Ok(());
        }

        for node in ctx.document().walk(NodeKind::Element) {
            for token in node.get_attribute_tokens("class") {
                if !token.is_dynamic_value {
                    self.check_token(ctx, token);
                }
            }
        }
        Ok(())
    }
}
