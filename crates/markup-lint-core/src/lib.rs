//! # markup-lint-core
//!
//! Core framework for linting HTML-like markup documents.
//!
//! This crate provides the foundational traits and types for building
//! markup linters. It includes:
//!
//! - [`Rule`] trait for async, per-document rules
//! - [`document`] tree with its walker
//! - [`attr`] attribute value checkers and the type dispatcher
//! - [`spec`] attribute specification lookup
//! - [`i18n`] message translator
//! - [`Linter`] for orchestrating lint execution
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use markup_lint_core::{document::Document, Linter};
//!
//! let linter = Linter::builder()
//!     .rule(MyRule::new())
//!     .locale("ja")
//!     .build()?;
//!
//! let document = Document::from_json(&json)?;
//! let result = linter.verify(&document).await?;
//! for violation in result.by_rule("invalid-attr") {
//!     println!("{violation}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod attr;
pub mod document;
pub mod i18n;
pub mod spec;

mod config;
mod context;
mod linter;
mod rule;
mod types;

pub use config::{Config, ConfigError, RuleConfig};
pub use context::{Report, RuleContext, Scope};
pub use linter::{LintError, Linter, LinterBuilder};
pub use rule::{Rule, RuleBox, RuleError, RuleOption};
pub use types::{LintResult, Location, Severity, Suggestion, Violation, ViolationDiagnostic};
