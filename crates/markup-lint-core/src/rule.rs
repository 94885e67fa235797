//! Rule trait for defining lint rules.

use crate::context::RuleContext;
use crate::types::Severity;
use async_trait::async_trait;

/// A lint rule verified against one document at a time.
///
/// Rules walk the document through [`RuleContext::document`] and report
/// findings through [`RuleContext::report`]. They never see each other's
/// results.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use markup_lint_core::document::NodeKind;
/// use markup_lint_core::{Report, Rule, RuleContext, RuleError};
///
/// pub struct NoComments;
///
/// #[async_trait]
/// impl Rule for NoComments {
///     fn name(&self) -> &'static str { "no-comments" }
///     fn code(&self) -> &'static str { "ML900" }
///
///     async fn verify(&self, ctx: &RuleContext<'_>) -> Result<(), RuleError> {
///         for node in ctx.document().walk(NodeKind::Comment) {
///             ctx.report(Report::new(&node, ctx.t("Comments are not allowed", &[])));
///         }
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "invalid-attr").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "ML001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Returns the value the rule runs with when configuration gives none.
    fn default_value(&self) -> toml::Value {
        toml::Value::Boolean(true)
    }

    /// Describes the options this rule accepts.
    fn default_options(&self) -> Vec<RuleOption> {
        Vec::new()
    }

    /// Verifies one document, reporting violations through `ctx`.
    ///
    /// # Errors
    ///
    /// Returns an error when the rule cannot complete its pass. Violations
    /// are not errors.
    async fn verify(&self, ctx: &RuleContext<'_>) -> Result<(), RuleError>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// An option a rule accepts, with its default.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOption {
    /// Option key as written in the rule's config table.
    pub name: &'static str,
    /// Value used when the key is absent.
    pub default: toml::Value,
    /// What the option changes.
    pub description: &'static str,
}

impl RuleOption {
    /// Creates an option description.
    #[must_use]
    pub fn new(
        name: &'static str,
        default: impl Into<toml::Value>,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            default: default.into(),
            description,
        }
    }
}

/// Errors that end a rule's pass over a document.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// An option has a value the rule cannot use.
    #[error("Invalid option `{option}`: {message}")]
    InvalidOption {
        /// Option key.
        option: String,
        /// What is wrong with it.
        message: String,
    },

    /// The rule could not complete.
    #[error("{0}")]
    Failed(String),
}

impl RuleError {
    /// Creates an [`RuleError::InvalidOption`].
    #[must_use]
    pub fn invalid_option(option: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            message: message.into(),
        }
    }
}
