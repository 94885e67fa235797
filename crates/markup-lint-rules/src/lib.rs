//! # markup-lint-rules
//!
//! Built-in lint rules for markup-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | ML001 | `invalid-attr` | Checks attribute existence and value shape against the specification table |
//! | ML002 | `class-naming` | Requires class names to match configured patterns |
//! | ML003 | `no-empty-palpable-content` | Requires palpable-content elements to have content |
//! | ML004 | `attr-duplication` | Forbids duplicate attributes on an element |
//!
//! ## Usage
//!
//! ```ignore
//! use markup_lint_core::Linter;
//! use markup_lint_rules::{ClassNaming, InvalidAttr};
//!
//! let linter = Linter::builder()
//!     .rule(InvalidAttr::new())
//!     .rule(ClassNaming::with_patterns(["^c-[a-z]+$"])?)
//!     .build()?;
//! ```
//!
//! Rule sets can also be built from configuration with [`configured_rules`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod attr_duplication;
pub mod class_naming;
pub mod invalid_attr;
pub mod no_empty_palpable_content;
mod presets;

pub use attr_duplication::AttrDuplication;
pub use class_naming::ClassNaming;
pub use invalid_attr::InvalidAttr;
pub use no_empty_palpable_content::NoEmptyPalpableContent;
pub use presets::{
    all_rules, configured_rules, create_rule, minimal_rules, recommended_rules, rule_id,
    strict_rules, Preset, RegistryError, RULE_NAMES,
};

/// Re-export core types for convenience.
pub use markup_lint_core::{Rule, Severity, Violation};

#[cfg(test)]
mod test_support {
    use markup_lint_core::document::Document;
    use markup_lint_core::i18n::Translator;
    use markup_lint_core::spec::SpecTable;
    use markup_lint_core::{Rule, RuleContext, Violation};

    /// Runs one rule over `doc` with the built-in table and English messages.
    pub async fn lint(rule: &dyn Rule, doc: &Document) -> Vec<Violation> {
        lint_with_translator(rule, doc, &Translator::english()).await
    }

    pub async fn lint_with_translator(
        rule: &dyn Rule,
        doc: &Document,
        t: &Translator,
    ) -> Vec<Violation> {
        let specs = SpecTable::html().expect("built-in table");
        let ctx = RuleContext::new(doc, &specs, t, rule);
        rule.verify(&ctx).await.expect("rule should not fail");
        ctx.into_violations()
    }
}
