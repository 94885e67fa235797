//! Rule to require content in palpable-content elements.
//!
//! Elements such as `<p>`, `<span>` or `<button>` are expected to render
//! something. An element whose children are only whitespace or comments is
//! reported.
//!
//! # Allowed Patterns
//!
//! - Elements with `hidden` or `aria-hidden="true"`
//! - Elements with `aria-busy="true"` (content is still loading), unless
//!   `ignore_if_aria_busy` is disabled
//!
//! # Configuration
//!
//! - `extends_exposable_elements`: also check elements that are not palpable
//!   content but are exposed to assistive technology, such as `<li>` or
//!   `<td>` (default: true)
//! - `ignore_if_aria_busy`: skip elements marked `aria-busy="true"` (default: true)

use async_trait::async_trait;
use markup_lint_core::document::{Node, NodeKind};
use markup_lint_core::{Report, Rule, RuleConfig, RuleContext, RuleError, RuleOption, Severity};

/// Rule code for no-empty-palpable-content.
pub const CODE: &str = "ML003";

/// Rule name for no-empty-palpable-content.
pub const NAME: &str = "no-empty-palpable-content";

/// Elements that are palpable content regardless of their children.
///
/// Lists (`ul`, `ol`, `menu`, `dl`) are palpable only when they have items,
/// so an empty list is not reported here.
const PALPABLE_ELEMENTS: &[&str] = &[
    "a", "abbr", "address", "article", "aside", "b", "bdi", "bdo", "blockquote", "button",
    "cite", "code", "data", "details", "dfn", "div", "em", "fieldset", "figure", "footer",
    "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hgroup", "i", "ins", "kbd", "label",
    "main", "mark", "meter", "nav", "output", "p", "pre", "progress", "q", "ruby", "s", "samp",
    "search", "section", "small", "span", "strong", "sub", "sup", "table", "time", "u", "var",
];

/// Elements outside palpable content that still expose their text.
const EXPOSABLE_ELEMENTS: &[&str] = &[
    "caption", "dd", "dt", "figcaption", "legend", "li", "option", "summary", "td", "th",
    "title",
];

/// Requires palpable elements to have content.
#[derive(Debug, Clone)]
pub struct NoEmptyPalpableContent {
    /// Also check exposable elements such as `li` and `td`.
    pub extends_exposable_elements: bool,
    /// Skip elements with `aria-busy="true"`.
    pub ignore_if_aria_busy: bool,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoEmptyPalpableContent {
    fn default() -> Self {
        Self::new()
    }
}

impl NoEmptyPalpableContent {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            extends_exposable_elements: true,
            ignore_if_aria_busy: true,
            severity: Severity::Warning,
        }
    }

    /// Creates the rule from its configuration table.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        Self::new()
            .extends_exposable_elements(config.get_bool("extends_exposable_elements", true))
            .ignore_if_aria_busy(config.get_bool("ignore_if_aria_busy", true))
    }

    /// Sets whether exposable elements are checked too.
    #[must_use]
    pub fn extends_exposable_elements(mut self, extends: bool) -> Self {
        self.extends_exposable_elements = extends;
        self
    }

    /// Sets whether `aria-busy="true"` elements are skipped.
    #[must_use]
    pub fn ignore_if_aria_busy(mut self, ignore: bool) -> Self {
        self.ignore_if_aria_busy = ignore;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn is_palpable(&self, node: Node<'_>) -> bool {
        let name = node.node_name().to_ascii_lowercase();
        PALPABLE_ELEMENTS.contains(&name.as_str())
            || (self.extends_exposable_elements && EXPOSABLE_ELEMENTS.contains(&name.as_str()))
    }

    fn is_exempt(&self, node: Node<'_>) -> bool {
        let is_true = |attr: &str| {
            node.get_attribute(attr)
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
        };
        node.has_attribute("hidden")
            || is_true("aria-hidden")
            || (self.ignore_if_aria_busy && is_true("aria-busy"))
    }
}

fn has_content(node: Node<'_>) -> bool {
    node.children().any(|child| match child.kind() {
        NodeKind::Element => true,
        NodeKind::Text => !child.is_whitespace(),
        NodeKind::Comment | NodeKind::Doctype => false,
    })
}

#[async_trait]
impl Rule for NoEmptyPalpableContent {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires palpable-content elements to have content"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn default_options(&self) -> Vec<RuleOption> {
        vec![
            RuleOption::new(
                "extends_exposable_elements",
                true,
                "Also check exposable elements such as li and td",
            ),
            RuleOption::new(
                "ignore_if_aria_busy",
                true,
                "Skip elements marked aria-busy=\"true\"",
            ),
        ]
    }

    async fn verify(&self, ctx: &RuleContext<'_>) -> Result<(), RuleError> {
        ctx.document()
            .walk_on(NodeKind::Element, |node| async move {
                if !self.is_palpable(node) || self.is_exempt(node) || has_content(node) {
                    return Ok(());
                }
                ctx.report(Report::new(&node, ctx.t("Require {0}", &["content"])));
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lint, lint_with_translator};
    use markup_lint_core::document::{Document, NodeSource};
    use markup_lint_core::i18n::{LocaleSet, Translator};

    #[tokio::test]
    async fn test_detects_empty_elements() {
        let doc = Document::new(vec![NodeSource::element("div")
            .at(1, 1)
            .child(NodeSource::element("p").at(2, 3).child(NodeSource::text("  \n ")))
            .child(NodeSource::element("span").at(3, 3).child(NodeSource::comment("todo")))]);
        let violations = lint(&NoEmptyPalpableContent::new(), &doc).await;

        let positions: Vec<(usize, usize)> = violations
            .iter()
            .map(|v| (v.location.line, v.location.column))
            .collect();
        assert_eq!(positions, vec![(2, 3), (3, 3)]);
        assert_eq!(violations[0].message, "Require content");
        assert_eq!(violations[0].code, CODE);
    }

    #[tokio::test]
    async fn test_allows_content() {
        let doc = Document::new(vec![
            NodeSource::element("p").child(NodeSource::text("Hello")),
            NodeSource::element("button").child(NodeSource::element("img")),
            NodeSource::element("ul"),
            NodeSource::element("br"),
        ]);
        assert!(lint(&NoEmptyPalpableContent::new(), &doc).await.is_empty());
    }

    #[tokio::test]
    async fn test_hidden_elements_are_exempt() {
        let doc = Document::new(vec![
            NodeSource::element("div").attr("hidden", ""),
            NodeSource::element("span").attr("aria-hidden", "true"),
            NodeSource::element("span").attr("aria-hidden", "false"),
        ]);
        let violations = lint(&NoEmptyPalpableContent::new(), &doc).await;
        assert_eq!(violations.len(), 1);
    }

    #[tokio::test]
    async fn test_aria_busy_option() {
        let doc = Document::new(vec![NodeSource::element("section").attr("aria-busy", "true")]);

        assert!(lint(&NoEmptyPalpableContent::new(), &doc).await.is_empty());

        let strict = NoEmptyPalpableContent::new().ignore_if_aria_busy(false);
        assert_eq!(lint(&strict, &doc).await.len(), 1);
    }

    #[tokio::test]
    async fn test_extends_exposable_elements() {
        let doc = Document::new(vec![
            NodeSource::element("ul").child(NodeSource::element("LI")),
            NodeSource::element("my-card"),
        ]);
        assert_eq!(lint(&NoEmptyPalpableContent::new(), &doc).await.len(), 1);

        let rule = NoEmptyPalpableContent::new().extends_exposable_elements(false);
        assert!(lint(&rule, &doc).await.is_empty());
    }

    #[tokio::test]
    async fn test_japanese_message() {
        let t = Translator::new(LocaleSet::builtin("ja").expect("bundled"));
        let doc = Document::new(vec![NodeSource::element("p")]);
        let violations = lint_with_translator(&NoEmptyPalpableContent::new(), &doc, &t).await;
        assert_eq!(violations[0].message, "コンテンツが必要です");
    }

    #[test]
    fn test_from_config() {
        let config: RuleConfig = toml::from_str(
            r#"
extends_exposable_elements = false
ignore_if_aria_busy = false
"#,
        )
        .expect("parse");
        let rule = NoEmptyPalpableContent::from_config(&config);
        assert!(!rule.extends_exposable_elements);
        assert!(!rule.ignore_if_aria_busy);

        let defaults = NoEmptyPalpableContent::from_config(&RuleConfig::new());
        assert!(defaults.extends_exposable_elements);
        assert!(defaults.ignore_if_aria_busy);
    }
}
