//! Attribute type dispatcher.

use super::primitives::{
    float_check, int_check, non_zero_uint_check, number_check_with_unit, range, split_unit,
    uint_check, SplitUnit,
};
use crate::document::AttributeToken;
use crate::i18n::Translator;
use crate::spec::{AttributeSpec, AttributeType, SpecType};

/// `referrerpolicy` keywords, including the empty string.
pub const REFERRER_POLICIES: &[&str] = &[
    "",
    "no-referrer",
    "no-referrer-when-downgrade",
    "same-origin",
    "origin",
    "strict-origin",
    "origin-when-cross-origin",
    "strict-origin-when-cross-origin",
    "unsafe-url",
];

/// CSS `<blend-mode>` keywords.
pub const CSS_BLEND_MODES: &[&str] = &[
    "normal",
    "multiply",
    "screen",
    "overlay",
    "darken",
    "lighten",
    "color-dodge",
    "color-burn",
    "hard-light",
    "soft-light",
    "difference",
    "exclusion",
    "hue",
    "saturation",
    "color",
    "luminosity",
];

/// CSS `<angle>` units.
pub const CSS_ANGLE_UNITS: &[&str] = &["deg", "grad", "rad", "turn"];

const COLSPAN_MAX: f64 = 1000.0;
const ROWSPAN_MAX: f64 = 65534.0;

/// Why a value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidKind {
    /// The attribute is not declared for the element.
    NonExistent,
    /// The attribute is declared but the value does not fit its type.
    InvalidValue,
}

/// A rejected attribute with its localized message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invalid {
    /// Rejection kind.
    pub kind: InvalidKind,
    /// Localized, non-empty message.
    pub message: String,
}

/// Outcome of checking one attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The value is acceptable.
    Valid,
    /// The attribute or its value is rejected.
    Invalid(Invalid),
}

impl Verdict {
    fn invalid(kind: InvalidKind, message: String) -> Self {
        debug_assert!(!message.is_empty());
        Self::Invalid(Invalid { kind, message })
    }

    /// Returns true for [`Verdict::Valid`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the rejection, if any.
    #[must_use]
    pub fn into_invalid(self) -> Option<Invalid> {
        match self {
            Self::Valid => None,
            Self::Invalid(invalid) => Some(invalid),
        }
    }
}

/// Checks one attribute value against its declaration.
///
/// Outside custom-rule mode, `data-*`, `aria-*` and `role` are always
/// accepted; other rules own them. A missing `spec` means the attribute is not
/// allowed on the element. Types without a checker are accepted.
#[must_use]
pub fn attr_check(
    t: &Translator,
    name: &str,
    value: &str,
    is_custom_rule: bool,
    spec: Option<&AttributeSpec>,
) -> Verdict {
    if !is_custom_rule && is_delegated(name) {
        return Verdict::Valid;
    }

    let Some(spec) = spec else {
        return Verdict::invalid(
            InvalidKind::NonExistent,
            t.translate("\"{0*}\" attribute is disallow", &[name]),
        );
    };

    type_check(t, name, value, &spec.ty)
}

/// Checks an attribute token; tokens with a dynamic value are always valid.
#[must_use]
pub fn check_token(
    t: &Translator,
    token: &AttributeToken,
    is_custom_rule: bool,
    spec: Option<&AttributeSpec>,
) -> Verdict {
    if token.is_dynamic_value {
        return Verdict::Valid;
    }
    attr_check(t, &token.name, &token.value, is_custom_rule, spec)
}

fn is_delegated(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    let has_suffix = |prefix: &str| name.strip_prefix(prefix).is_some_and(|s| !s.is_empty());
    has_suffix("data-") || has_suffix("aria-") || name == "role"
}

fn type_check(t: &Translator, name: &str, value: &str, ty: &SpecType) -> Verdict {
    let ty = match ty {
        SpecType::Enum { values } => {
            return enum_check(t, name, value, values);
        }
        SpecType::Named(ty) => *ty,
    };

    match ty {
        AttributeType::NonEmptyString if value.is_empty() => {
            should_be(t, name, &t.translate("a non-empty string", &[]))
        }
        AttributeType::Int if !int_check(value) => {
            should_be(t, name, &t.translate("an integer", &[]))
        }
        AttributeType::Uint if !uint_check(value) => {
            should_be(t, name, &t.translate("a non-negative integer", &[]))
        }
        AttributeType::Float if !float_check(value) => {
            should_be(t, name, &t.translate("a floating-point number", &[]))
        }
        AttributeType::NonZeroUint if !non_zero_uint_check(value) => {
            should_be(t, name, &t.translate("a positive integer", &[]))
        }
        AttributeType::ZeroToOne if !range(value, 0.0, 1.0) => should_be(
            t,
            name,
            &t.translate("a number between {0} and {1}", &["0", "1"]),
        ),
        AttributeType::ColSpan => bounded_int(t, name, value, COLSPAN_MAX),
        AttributeType::RowSpan => bounded_int(t, name, value, ROWSPAN_MAX),
        AttributeType::TabIndex => tab_index(t, name, value),
        AttributeType::ReferrerPolicy => enum_check(t, name, value, REFERRER_POLICIES),
        AttributeType::CssBlendMode => enum_check(t, name, value, CSS_BLEND_MODES),
        AttributeType::CssAngle if !number_check_with_unit(value, CSS_ANGLE_UNITS) => should_be(
            t,
            name,
            &t.translate("an angle in {0*}", &[&t.list(CSS_ANGLE_UNITS)]),
        ),
        AttributeType::CssOpacity if !opacity_check(value) => should_be(
            t,
            name,
            &t.translate(
                "{0:c} or {1:c}",
                &[
                    &t.translate("a number between {0} and {1}", &["0", "1"]),
                    &t.translate("a percentage between {0} and {1}", &["0%", "100%"]),
                ],
            ),
        ),
        AttributeType::UrlHash if !value.starts_with('#') => should_be(
            t,
            name,
            &t.translate("a fragment starting with {0*}", &["\"#\""]),
        ),
        // No checker yet: Boolean, Function, Date, URL, colors, SVG and CSS
        // value types, and anything unknown.
        _ => Verdict::Valid,
    }
}

fn enum_check<S: AsRef<str>>(t: &Translator, name: &str, value: &str, values: &[S]) -> Verdict {
    let value = value.to_lowercase();
    if values.iter().any(|v| v.as_ref() == value) {
        return Verdict::Valid;
    }
    should_be(
        t,
        name,
        &t.translate("either {0*}", &[&t.list(values)]),
    )
}

fn bounded_int(t: &Translator, name: &str, value: &str, max: f64) -> Verdict {
    if !int_check(value) {
        return should_be(t, name, &t.translate("an integer", &[]));
    }
    if !range(value, 0.0, max) {
        let max = max.to_string();
        return should_be(
            t,
            name,
            &t.translate("an integer between {0} and {1}", &["0", &max]),
        );
    }
    Verdict::Valid
}

fn tab_index(t: &Translator, name: &str, value: &str) -> Verdict {
    if !int_check(value) {
        return should_be(t, name, &t.translate("an integer", &[]));
    }
    if range(value, f64::NEG_INFINITY, -2.0) {
        return Verdict::invalid(
            InvalidKind::InvalidValue,
            t.translate(
                "{0} behaves the same as {1} when it is less than {1}",
                &[&t.translate("the \"{0*}\" attribute", &[name]), "-1"],
            ),
        );
    }
    Verdict::Valid
}

fn opacity_check(value: &str) -> bool {
    match split_unit(value) {
        SplitUnit { num, unit: "%" } => range(num, 0.0, 100.0),
        SplitUnit { num, unit: "" } => range(num, 0.0, 1.0),
        _ => false,
    }
}

fn should_be(t: &Translator, name: &str, expected: &str) -> Verdict {
    Verdict::invalid(
        InvalidKind::InvalidValue,
        t.translate(
            "{0} should be {1:c}",
            &[&t.translate("the \"{0*}\" attribute", &[name]), expected],
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Span;

    fn check(ty: impl Into<SpecType>, value: &str) -> Verdict {
        let spec = AttributeSpec::new("x", ty);
        attr_check(&Translator::english(), "x", value, false, Some(&spec))
    }

    fn message(verdict: Verdict) -> String {
        verdict.into_invalid().map(|i| i.message).unwrap_or_default()
    }

    #[test]
    fn test_delegated_attributes_are_exempt() {
        let t = Translator::english();
        for name in ["data-foo", "aria-label", "role", "ARIA-hidden"] {
            assert_eq!(attr_check(&t, name, "", false, None), Verdict::Valid);
        }
        for name in ["data-n", "aria-x"] {
            let spec = AttributeSpec::new(name, AttributeType::Int);
            assert_eq!(attr_check(&t, name, "abc", false, Some(&spec)), Verdict::Valid);
        }
        // "data-" alone is not a data attribute
        assert!(!attr_check(&t, "data-", "", false, None).is_valid());
    }

    #[test]
    fn test_custom_rule_does_not_exempt() {
        let t = Translator::english();
        let verdict = attr_check(&t, "data-foo", "x", true, None);
        assert_eq!(
            verdict.into_invalid().map(|i| i.kind),
            Some(InvalidKind::NonExistent)
        );
    }

    #[test]
    fn test_missing_spec_is_non_existent() {
        let t = Translator::english();
        let invalid = attr_check(&t, "foo", "bar", false, None)
            .into_invalid()
            .expect("invalid");
        assert_eq!(invalid.kind, InvalidKind::NonExistent);
        insta::assert_snapshot!(invalid.message, @r#""foo" attribute is disallow"#);
    }

    #[test]
    fn test_enum_is_case_insensitive() {
        let ty = SpecType::enumeration(["ltr", "rtl", "auto"]);
        assert!(check(ty.clone(), "RTL").is_valid());
        assert!(check(SpecType::enumeration(["A"]), "a").is_valid());
        let invalid = check(ty, "up").into_invalid().expect("invalid");
        assert_eq!(invalid.kind, InvalidKind::InvalidValue);
        insta::assert_snapshot!(invalid.message, @r#"The "x" attribute should be either "ltr", "rtl", or "auto""#);
    }

    #[test]
    fn test_non_empty_string() {
        assert!(check(AttributeType::NonEmptyString, "a").is_valid());
        insta::assert_snapshot!(
            message(check(AttributeType::NonEmptyString, "")),
            @r#"The "x" attribute should be a non-empty string"#
        );
    }

    #[test]
    fn test_numeric_types() {
        assert!(check(AttributeType::Int, "-3").is_valid());
        assert!(!check(AttributeType::Int, "4.2").is_valid());
        assert!(check(AttributeType::Uint, "0").is_valid());
        assert!(!check(AttributeType::Uint, "-1").is_valid());
        assert!(check(AttributeType::Float, "1.5e3").is_valid());
        assert!(!check(AttributeType::Float, "abc").is_valid());
        assert!(check(AttributeType::NonZeroUint, "2").is_valid());
        assert!(!check(AttributeType::NonZeroUint, "0").is_valid());

        insta::assert_snapshot!(
            message(check(AttributeType::Uint, "-1")),
            @r#"The "x" attribute should be a non-negative integer"#
        );
    }

    #[test]
    fn test_zero_to_one() {
        assert!(check(AttributeType::ZeroToOne, "0").is_valid());
        assert!(check(AttributeType::ZeroToOne, "1").is_valid());
        assert!(!check(AttributeType::ZeroToOne, "1.5").is_valid());
    }

    #[test]
    fn test_colspan() {
        assert!(check(AttributeType::ColSpan, "1000").is_valid());
        assert!(check(AttributeType::ColSpan, "0").is_valid());
        assert!(!check(AttributeType::ColSpan, "1001").is_valid());
        assert!(!check(AttributeType::ColSpan, "-1").is_valid());
        insta::assert_snapshot!(
            message(check(AttributeType::ColSpan, "1001")),
            @r#"The "x" attribute should be an integer between 0 and 1000"#
        );
        insta::assert_snapshot!(
            message(check(AttributeType::ColSpan, "two")),
            @r#"The "x" attribute should be an integer"#
        );
    }

    #[test]
    fn test_rowspan() {
        assert!(check(AttributeType::RowSpan, "65534").is_valid());
        assert!(!check(AttributeType::RowSpan, "65535").is_valid());
    }

    #[test]
    fn test_tabindex() {
        assert!(check(AttributeType::TabIndex, "-1").is_valid());
        assert!(check(AttributeType::TabIndex, "0").is_valid());
        assert!(check(AttributeType::TabIndex, "5").is_valid());
        assert!(!check(AttributeType::TabIndex, "1.5").is_valid());

        let invalid = check(AttributeType::TabIndex, "-2")
            .into_invalid()
            .expect("invalid");
        assert_eq!(invalid.kind, InvalidKind::InvalidValue);
        insta::assert_snapshot!(
            invalid.message,
            @r#"The "x" attribute behaves the same as -1 when it is less than -1"#
        );
    }

    #[test]
    fn test_referrer_policy() {
        assert!(check(AttributeType::ReferrerPolicy, "no-referrer").is_valid());
        assert!(check(AttributeType::ReferrerPolicy, "").is_valid());
        assert!(!check(AttributeType::ReferrerPolicy, "bogus").is_valid());
    }

    #[test]
    fn test_blend_mode() {
        assert!(check(AttributeType::CssBlendMode, "color-dodge").is_valid());
        assert!(!check(AttributeType::CssBlendMode, "add").is_valid());
    }

    #[test]
    fn test_css_angle() {
        assert!(check(AttributeType::CssAngle, "90deg").is_valid());
        assert!(check(AttributeType::CssAngle, "0.25turn").is_valid());
        assert!(!check(AttributeType::CssAngle, "90").is_valid());
        insta::assert_snapshot!(
            message(check(AttributeType::CssAngle, "90px")),
            @r#"The "x" attribute should be an angle in "deg", "grad", "rad", or "turn""#
        );
    }

    #[test]
    fn test_css_opacity() {
        assert!(check(AttributeType::CssOpacity, "50%").is_valid());
        assert!(check(AttributeType::CssOpacity, "0.5").is_valid());
        assert!(!check(AttributeType::CssOpacity, "101%").is_valid());
        assert!(!check(AttributeType::CssOpacity, "1.1").is_valid());
        assert!(!check(AttributeType::CssOpacity, "0.5px").is_valid());
        insta::assert_snapshot!(
            message(check(AttributeType::CssOpacity, "2")),
            @r#"The "x" attribute should be a number between 0 and 1 or a percentage between 0% and 100%"#
        );
    }

    #[test]
    fn test_url_hash() {
        assert!(check(AttributeType::UrlHash, "#top").is_valid());
        assert!(!check(AttributeType::UrlHash, "top").is_valid());
    }

    #[test]
    fn test_unimplemented_types_are_valid() {
        for ty in [
            AttributeType::String,
            AttributeType::Boolean,
            AttributeType::Function,
            AttributeType::Date,
            AttributeType::Url,
            AttributeType::Color,
            AttributeType::SvgPathData,
            AttributeType::Unknown,
        ] {
            assert!(check(ty, "%%% not really valid %%%").is_valid());
        }
    }

    #[test]
    fn test_check_is_idempotent() {
        let first = check(AttributeType::TabIndex, "-7");
        let second = check(AttributeType::TabIndex, "-7");
        assert_eq!(first, second);
    }

    #[test]
    fn test_dynamic_token_is_never_invalid() {
        let t = Translator::english();
        let token = AttributeToken {
            name: "colspan".to_string(),
            value: "{{ span }}".to_string(),
            raw: "colspan=\"{{ span }}\"".to_string(),
            is_dynamic_value: true,
            name_span: Span::default(),
            value_span: None,
        };
        let spec = AttributeSpec::new("colspan", AttributeType::ColSpan);
        assert!(check_token(&t, &token, false, Some(&spec)).is_valid());
        assert!(check_token(&t, &token, false, None).is_valid());
    }
}
