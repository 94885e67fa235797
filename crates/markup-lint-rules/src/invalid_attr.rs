//! Rule to check that attributes exist on their element and hold valid values.
//!
//! # Detected Patterns
//!
//! - Attributes the element does not declare (`<div colspan="2">`)
//! - Values that do not fit the declared type (`<td colspan="abc">`)
//!
//! `data-*`, `aria-*` and `role` are left to other rules, and elements the
//! specification table does not know (custom elements) are skipped. Values
//! produced by template expressions are never checked.
//!
//! # Configuration
//!
//! - `attrs`: per-attribute types that replace the table, e.g.
//!   `attrs.x-size = { type = "Uint" }` or `attrs.x-mode = { type = { enum = ["a", "b"] } }`
//! - `ignore_attr_name_prefix`: attribute name prefixes to skip (e.g. `["v-", "x-on:"]`)

use async_trait::async_trait;
use markup_lint_core::attr::{check_token, InvalidKind, Verdict};
use markup_lint_core::document::{AttributeToken, Node, NodeKind};
use markup_lint_core::spec::{AttributeSpec, SpecType};
use markup_lint_core::{Report, Rule, RuleConfig, RuleContext, RuleError, RuleOption, Severity};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// Rule code for invalid-attr.
pub const CODE: &str = "ML001";

/// Rule name for invalid-attr.
pub const NAME: &str = "invalid-attr";

/// Checks attribute existence and value shape.
#[derive(Debug, Clone)]
pub struct InvalidAttr {
    /// Custom attribute declarations keyed by lower-case name.
    pub attrs: HashMap<String, AttributeSpec>,
    /// Attribute name prefixes to skip.
    pub ignore_attr_name_prefix: Vec<String>,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for InvalidAttr {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct AttrOption {
    #[serde(rename = "type")]
    ty: SpecType,
}

impl InvalidAttr {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            attrs: HashMap::new(),
            ignore_attr_name_prefix: Vec::new(),
            severity: Severity::Error,
        }
    }

    /// Creates the rule from its configuration table.
    ///
    /// # Errors
    ///
    /// Returns an error if `attrs` is not a table of attribute types.
    pub fn from_config(config: &RuleConfig) -> Result<Self, RuleError> {
        let mut rule = Self::new();

        if let Some(attrs) = config.options.get("attrs") {
            let attrs: HashMap<String, AttrOption> = attrs
                .clone()
                .try_into()
                .map_err(|e: toml::de::Error| RuleError::invalid_option("attrs", e.to_string()))?;
            for (name, option) in attrs {
                rule = rule.attr(AttributeSpec::new(name, option.ty));
            }
        }

        let prefixes = config.get_str_array("ignore_attr_name_prefix");
        Ok(rule.ignore_prefixes(&prefixes))
    }

    /// Declares a custom attribute type.
    #[must_use]
    pub fn attr(mut self, spec: AttributeSpec) -> Self {
        self.attrs.insert(spec.name.to_ascii_lowercase(), spec);
        self
    }

    /// Adds attribute name prefixes to skip.
    #[must_use]
    pub fn ignore_prefixes<S: AsRef<str>>(mut self, prefixes: &[S]) -> Self {
        self.ignore_attr_name_prefix
            .extend(prefixes.iter().map(|p| p.as_ref().to_string()));
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn is_ignored(&self, name: &str) -> bool {
        self.ignore_attr_name_prefix
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
    }

    fn check(&self, ctx: &RuleContext<'_>, node: Node<'_>, token: &AttributeToken) -> Verdict {
        if let Some(custom) = self.attrs.get(&token.name.to_ascii_lowercase()) {
            return check_token(ctx.translator(), token, true, Some(custom));
        }
        let spec = ctx.specs().attribute(node.node_name(), &token.name);
        check_token(ctx.translator(), token, false, spec)
    }
}

#[async_trait]
impl Rule for InvalidAttr {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Checks that attributes exist on their element and hold valid values"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn default_options(&self) -> Vec<RuleOption> {
        vec![
            RuleOption::new(
                "attrs",
                toml::value::Table::new(),
                "Custom attribute types, checked instead of the specification table",
            ),
            RuleOption::new(
                "ignore_attr_name_prefix",
                Vec::<toml::Value>::new(),
                "Attribute name prefixes to skip",
            ),
        ]
    }

    async fn verify(&self, ctx: &RuleContext<'_>) -> Result<(), RuleError> {
        ctx.document()
            .walk_on(NodeKind::Element, |node| async move {
                let known = ctx.specs().has_element(node.node_name());

                for token in node.attributes() {
                    if self.is_ignored(&token.name) {
                        continue;
                    }
                    if !known && !self.attrs.contains_key(&token.name.to_ascii_lowercase()) {
                        debug!("Skipping attribute on unknown element <{}>", node.node_name());
                        continue;
                    }

                    let Verdict::Invalid(invalid) = self.check(ctx, node, token) else {
                        continue;
                    };
                    let report = match invalid.kind {
                        InvalidKind::NonExistent => Report::new(token, invalid.message),
                        InvalidKind::InvalidValue => {
                            Report::new(token.value_or_name_span(), invalid.message)
                        }
                    };
                    ctx.report(report);
                }
                Ok(())
            })
            .await
    }
}
