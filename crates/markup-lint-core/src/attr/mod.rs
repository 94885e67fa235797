//! Attribute value validation.
//!
//! [`primitives`] holds the pure value checkers; [`check`] dispatches a
//! declared attribute type to them and produces a localized verdict.

pub mod check;
pub mod primitives;

pub use check::{attr_check, check_token, Invalid, InvalidKind, Verdict};
