//! Primitive value checkers.
//!
//! Every function here is total: unparseable input yields `false`, nothing
//! panics.

/// Returns true if `s` is an optionally signed base-10 integer.
#[must_use]
pub fn int_check(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Returns true if `s` is an integer greater than or equal to zero.
#[must_use]
pub fn uint_check(s: &str) -> bool {
    int_check(s) && !is_negative(s)
}

/// Returns true if `s` is an integer greater than zero.
#[must_use]
pub fn non_zero_uint_check(s: &str) -> bool {
    uint_check(s) && s.bytes().any(|b| (b'1'..=b'9').contains(&b))
}

/// Returns true if `s` is a base-10 floating point literal.
///
/// Accepts an optional sign, digits with an optional fractional part (or a
/// fraction with no integer part such as `.5`), and an optional exponent.
#[must_use]
pub fn float_check(s: &str) -> bool {
    let body = s.strip_prefix(['-', '+']).unwrap_or(s);
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
        None => (body, None),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (mantissa, None),
    };

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !frac_part.map_or(true, all_digits) {
        return false;
    }
    if int_part.is_empty() && frac_part.map_or(true, str::is_empty) {
        return false;
    }

    match exponent {
        Some(exp) => int_check(exp),
        None => true,
    }
}

/// A numeric operand accepted by [`range`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric<'a> {
    /// A raw attribute value, parsed as a float literal.
    Text(&'a str),
    /// An already numeric value.
    Number(f64),
}

impl<'a> From<&'a str> for Numeric<'a> {
    fn from(s: &'a str) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for Numeric<'_> {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl Numeric<'_> {
    fn to_f64(self) -> Option<f64> {
        match self {
            Self::Text(s) if float_check(s) => s.parse().ok(),
            Self::Text(_) => None,
            Self::Number(n) if n.is_nan() => None,
            Self::Number(n) => Some(n),
        }
    }
}

/// Returns true if `value` lies in `[min, max]` inclusive.
#[must_use]
pub fn range<'a>(value: impl Into<Numeric<'a>>, min: f64, max: f64) -> bool {
    value
        .into()
        .to_f64()
        .is_some_and(|n| min <= n && n <= max)
}

/// A value split into its numeric part and unit suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitUnit<'a> {
    /// Leading numeric text (not validated).
    pub num: &'a str,
    /// Trailing suffix without digits or dots.
    pub unit: &'a str,
}

/// Splits `s` into number and unit; the unit is the longest trailing suffix
/// containing no digit and no `.`.
#[must_use]
pub fn split_unit(s: &str) -> SplitUnit<'_> {
    let boundary = s
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_ascii_digit() || *c == '.')
        .map_or(0, |(i, c)| i + c.len_utf8());
    SplitUnit {
        num: &s[..boundary],
        unit: &s[boundary..],
    }
}

/// Returns true if `s` is a number followed by one of `allowed_units`.
#[must_use]
pub fn number_check_with_unit(s: &str, allowed_units: &[&str]) -> bool {
    let SplitUnit { num, unit } = split_unit(s);
    float_check(num) && allowed_units.contains(&unit)
}

fn is_negative(s: &str) -> bool {
    s.starts_with('-') && s[1..].bytes().any(|b| b != b'0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_check() {
        assert!(int_check("42"));
        assert!(int_check("-3"));
        assert!(int_check("+7"));
        assert!(int_check("00012"));
        assert!(!int_check("4.2"));
        assert!(!int_check(""));
        assert!(!int_check("-"));
        assert!(!int_check(" 1"));
        assert!(!int_check("1e3"));
        assert!(!int_check("12px"));
    }

    #[test]
    fn test_uint_check() {
        assert!(uint_check("0"));
        assert!(uint_check("-0"));
        assert!(uint_check("10"));
        assert!(!uint_check("-1"));
        assert!(!uint_check("1.0"));
    }

    #[test]
    fn test_non_zero_uint_check() {
        assert!(non_zero_uint_check("1"));
        assert!(non_zero_uint_check("010"));
        assert!(!non_zero_uint_check("0"));
        assert!(!non_zero_uint_check("000"));
        assert!(!non_zero_uint_check("-5"));
    }

    #[test]
    fn test_float_check() {
        assert!(float_check("1"));
        assert!(float_check("-1.5"));
        assert!(float_check(".5"));
        assert!(float_check("5."));
        assert!(float_check("1e10"));
        assert!(float_check("+2.5E-3"));
        assert!(!float_check(""));
        assert!(!float_check("."));
        assert!(!float_check("e5"));
        assert!(!float_check("1e"));
        assert!(!float_check("NaN"));
        assert!(!float_check("inf"));
        assert!(!float_check("1.2.3"));
    }

    #[test]
    fn test_range() {
        assert!(range("0", 0.0, 1.0));
        assert!(range("1", 0.0, 1.0));
        assert!(range("0.25", 0.0, 1.0));
        assert!(!range("1.5", 0.0, 1.0));
        assert!(!range("-0.1", 0.0, 1.0));
        assert!(!range("abc", 0.0, 1.0));
        assert!(range(0.5, 0.0, 1.0));
        assert!(!range(f64::NAN, 0.0, 1.0));
    }

    #[test]
    fn test_split_unit() {
        assert_eq!(split_unit("90deg"), SplitUnit { num: "90", unit: "deg" });
        assert_eq!(split_unit("50%"), SplitUnit { num: "50", unit: "%" });
        assert_eq!(split_unit("0.5"), SplitUnit { num: "0.5", unit: "" });
        assert_eq!(split_unit("turn"), SplitUnit { num: "", unit: "turn" });
        assert_eq!(split_unit("1e3rad"), SplitUnit { num: "1e3", unit: "rad" });
    }

    #[test]
    fn test_number_check_with_unit() {
        let units = ["deg", "rad"];
        assert!(number_check_with_unit("45deg", &units));
        assert!(number_check_with_unit("-1.5rad", &units));
        assert!(!number_check_with_unit("45", &units));
        assert!(!number_check_with_unit("deg", &units));
        assert!(!number_check_with_unit("45px", &units));
    }
}
