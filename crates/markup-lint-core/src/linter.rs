//! Linter for orchestrating rule execution over documents.

use crate::config::{Config, ConfigError};
use crate::context::RuleContext;
use crate::document::Document;
use crate::i18n::{LocaleError, LocaleSet, Translator};
use crate::rule::{Rule, RuleBox, RuleError};
use crate::spec::{SpecError, SpecLookup, SpecTable};
use crate::types::{LintResult, Violation};

use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while linting.
#[derive(Debug, Error)]
pub enum LintError {
    /// A rule failed to complete its pass.
    #[error("Rule `{rule}` failed: {source}")]
    Rule {
        /// Name of the failing rule.
        rule: String,
        /// Error returned by the rule.
        #[source]
        source: RuleError,
    },

    /// The built-in specification table failed to load.
    #[error("Specification error: {0}")]
    Spec(#[from] SpecError),

    /// The requested locale is unavailable.
    #[error("Locale error: {0}")]
    Locale(#[from] LocaleError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Builder for configuring a [`Linter`].
#[derive(Default)]
pub struct LinterBuilder {
    rules: Vec<RuleBox>,
    specs: Option<Box<dyn SpecLookup>>,
    translator: Option<Translator>,
    locale: Option<String>,
    config: Option<Config>,
}

impl LinterBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the linter.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the linter.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds multiple boxed rules.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the attribute specification lookup (default: the built-in HTML table).
    #[must_use]
    pub fn specs<S: SpecLookup + 'static>(mut self, specs: S) -> Self {
        self.specs = Some(Box::new(specs));
        self
    }

    /// Sets the translator directly.
    #[must_use]
    pub fn translator(mut self, translator: Translator) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Selects a bundled locale by tag.
    #[must_use]
    pub fn locale(mut self, tag: impl Into<String>) -> Self {
        self.locale = Some(tag.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the linter.
    ///
    /// The translator is taken from [`translator`](Self::translator), then
    /// [`locale`](Self::locale), then the config's `locale`, then English.
    ///
    /// # Errors
    ///
    /// Returns an error if the locale is not bundled or the built-in
    /// specification table fails to load.
    pub fn build(self) -> Result<Linter, LintError> {
        let config = self.config.unwrap_or_default();

        let translator = match self.translator {
            Some(t) => t,
            None => match self.locale.as_deref().or(config.locale.as_deref()) {
                Some(tag) => Translator::new(LocaleSet::builtin(tag)?),
                None => Translator::english(),
            },
        };

        let specs = match self.specs {
            Some(specs) => specs,
            None => Box::new(SpecTable::html()?),
        };

        Ok(Linter {
            rules: self.rules,
            specs,
            translator,
            config,
        })
    }
}

/// The main linter that runs rules over documents.
///
/// Use [`Linter::builder()`] to construct an instance.
pub struct Linter {
    rules: Vec<RuleBox>,
    specs: Box<dyn SpecLookup>,
    translator: Translator,
    config: Config,
}

impl Linter {
    /// Creates a new builder for configuring a linter.
    #[must_use]
    pub fn builder() -> LinterBuilder {
        LinterBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the translator messages are formatted with.
    #[must_use]
    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Verifies a document against every enabled rule.
    ///
    /// Rules run one after another; violations are sorted by line, then column.
    ///
    /// # Errors
    ///
    /// Returns the first rule failure. Violations are not errors.
    pub async fn verify(&self, document: &Document) -> Result<LintResult, LintError> {
        info!(
            "Linting {} ({} nodes)",
            document
                .path()
                .map_or_else(|| "<input>".to_string(), |p| p.display().to_string()),
            document.len()
        );

        let mut result = LintResult::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name(), rule.code()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            debug!("Running rule: {}", rule.name());
            let ctx = RuleContext::new(
                document,
                self.specs.as_ref(),
                &self.translator,
                rule.as_ref(),
            );
            rule.verify(&ctx).await.map_err(|source| LintError::Rule {
                rule: rule.name().to_string(),
                source,
            })?;

            let violations = self.apply_severity_override(rule.as_ref(), ctx.into_violations());
            result.violations.extend(violations);
        }

        result.documents_checked = 1;
        result.violations.sort_by(|a, b| {
            a.location
                .line
                .cmp(&b.location.line)
                .then(a.location.column.cmp(&b.location.column))
        });

        info!("Lint complete: {} violations", result.violations.len());

        Ok(result)
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule: &dyn Rule,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule.name(), rule.code()) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Report;
    use crate::document::{NodeKind, NodeSource};
    use crate::types::Severity;
    use async_trait::async_trait;

    /// Reports every element.
    struct EveryElement;

    #[async_trait]
    impl Rule for EveryElement {
        fn name(&self) -> &'static str {
            "every-element"
        }
        fn code(&self) -> &'static str {
            "T001"
        }
        async fn verify(&self, ctx: &RuleContext<'_>) -> Result<(), RuleError> {
            ctx.document()
                .walk_on(NodeKind::Element, |node| async move {
                    ctx.report(Report::new(&node, ctx.t("Found {0*}", &[node.node_name()])));
                    Ok(())
                })
                .await
        }
    }

    struct Broken;

    #[async_trait]
    impl Rule for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }
        fn code(&self) -> &'static str {
            "T002"
        }
        async fn verify(&self, _ctx: &RuleContext<'_>) -> Result<(), RuleError> {
            Err(RuleError::Failed("boom".to_string()))
        }
    }

    fn document() -> Document {
        Document::new(vec![
            NodeSource::element("p").at(3, 1),
            NodeSource::element("div")
                .at(1, 1)
                .child(NodeSource::element("span").at(1, 6)),
        ])
    }

    #[tokio::test]
    async fn test_verify_sorts_by_position() {
        let linter = Linter::builder()
            .rule(EveryElement)
            .build()
            .expect("build");
        assert_eq!(linter.rule_count(), 1);

        let result = linter.verify(&document()).await.expect("verify");
        let positions: Vec<_> = result
            .violations
            .iter()
            .map(|v| (v.location.line, v.location.column))
            .collect();
        assert_eq!(positions, vec![(1, 1), (1, 6), (3, 1)]);
        assert_eq!(result.violations[0].message, "Found div");
        assert_eq!(result.documents_checked, 1);
    }

    #[tokio::test]
    async fn test_config_disables_and_overrides() {
        let config = Config::parse(
            r#"
[rules.every-element]
severity = "info"

[rules.broken]
enabled = false
"#,
        )
        .expect("config");

        let linter = Linter::builder()
            .rule(EveryElement)
            .rule(Broken)
            .config(config)
            .build()
            .expect("build");

        let result = linter.verify(&document()).await.expect("verify");
        assert_eq!(result.violations.len(), 3);
        assert!(result.violations.iter().all(|v| v.severity == Severity::Info));
    }

    #[tokio::test]
    async fn test_config_keyed_by_code() {
        let config = Config::parse(
            r#"
[rules.T001]
severity = "warning"

[rules.T002]
value = false
"#,
        )
        .expect("config");

        let linter = Linter::builder()
            .rule(EveryElement)
            .rule(Broken)
            .config(config)
            .build()
            .expect("build");

        let result = linter.verify(&document()).await.expect("verify");
        assert_eq!(result.violations.len(), 3);
        assert!(result
            .violations
            .iter()
            .all(|v| v.severity == Severity::Warning));
    }

    #[tokio::test]
    async fn test_rule_failure_is_returned() {
        let linter = Linter::builder().rule(Broken).build().expect("build");
        let err = linter.verify(&document()).await.expect_err("should fail");
        assert!(matches!(err, LintError::Rule { ref rule, .. } if rule == "broken"));
        assert_eq!(err.to_string(), "Rule `broken` failed: boom");
    }

    #[test]
    fn test_locale_selection() {
        let linter = Linter::builder().locale("ja").build().expect("build");
        assert_eq!(linter.translator().locale(), "ja");

        let config = Config::parse("locale = \"ja\"").expect("config");
        let linter = Linter::builder().config(config).build().expect("build");
        assert_eq!(linter.translator().locale(), "ja");

        assert!(matches!(
            Linter::builder().locale("xx").build(),
            Err(LintError::Locale(_))
        ));
    }
}
