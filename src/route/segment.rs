//! Single-segment comparison between a request path and a match pattern.
//!
//! A pattern segment is either a literal, compared by exact string
//! equality, or a hint (`:int`, `:num`, `:str`) that captures the request
//! segment when it satisfies the hint and its optional qualifier:
//!
//! | Pattern          | Accepts                                        |
//! |------------------|------------------------------------------------|
//! | `:num`           | any numeric segment                            |
//! | `:num[5]`        | numerically equal to 5 (`5`, `5.0`, `5e0`)     |
//! | `:num[10-20]`    | 10 <= n <= 20, either bound may be left empty  |
//! | `:int`, `:int[..]` | as `:num`, but with no fractional part       |
//! | `:str`           | anything                                       |
//! | `:str[5]`        | exactly 5 bytes long                           |
//! | `:str[2-4]`      | 2 to 4 bytes long, either bound may be empty   |
//!
//! Qualifiers that do not parse (no closing bracket, non-numeric bounds)
//! never match, for every hint.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    Int,
    Num,
    Str,
}

impl Hint {
    const PREFIX_LEN: usize = 4;

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            ":int" => Some(Self::Int),
            ":num" => Some(Self::Num),
            ":str" => Some(Self::Str),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int => ":int",
            Self::Num => ":num",
            Self::Str => ":str",
        }
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The bracketed constraint following a hint.
#[derive(Debug, Clone, PartialEq)]
pub enum Qualifier {
    /// Bare hint, no brackets.
    Any,
    /// `[n]` on a numeric hint.
    Value(f64),
    /// `[min-max]` on a numeric hint.
    Range { min: Option<f64>, max: Option<f64> },
    /// `[n]` on `:str`.
    Length(usize),
    /// `[min-max]` on `:str`.
    LengthRange { min: Option<usize>, max: Option<usize> },
    /// Anything that did not parse. Holds the unparsed text.
    Malformed(String),
}

impl Qualifier {
    fn parse(hint: Hint, text: &str) -> Self {
        if text.is_empty() {
            return Self::Any;
        }

        let Some(bounds) = text
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        else {
            return Self::Malformed(text.to_string());
        };

        let parsed = match hint {
            Hint::Int | Hint::Num => match bounds.split_once('-') {
                None => parse_numeric(bounds).map(Self::Value),
                Some((min, max)) => optional_bound(min, parse_numeric)
                    .zip(optional_bound(max, parse_numeric))
                    .map(|(min, max)| Self::Range { min, max }),
            },
            Hint::Str => match bounds.split_once('-') {
                None => bounds.parse().ok().map(Self::Length),
                Some((min, max)) => optional_bound(min, |s| s.parse().ok())
                    .zip(optional_bound(max, |s| s.parse().ok()))
                    .map(|(min, max)| Self::LengthRange { min, max }),
            },
        };

        parsed.unwrap_or_else(|| Self::Malformed(text.to_string()))
    }

    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }

    #[allow(clippy::float_cmp)]
    fn accepts_number(&self, value: f64) -> bool {
        match *self {
            Self::Any => true,
            Self::Value(expected) => value == expected,
            Self::Range { min, max } => {
                min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
            }
            _ => false,
        }
    }

    fn accepts_length(&self, len: usize) -> bool {
        match *self {
            Self::Any => true,
            Self::Length(expected) => len == expected,
            Self::LengthRange { min, max } => {
                min.map_or(true, |min| len >= min) && max.map_or(true, |max| len <= max)
            }
            _ => false,
        }
    }
}

/// Empty text is an open bound; anything else must parse.
fn optional_bound<T>(text: &str, parse: impl Fn(&str) -> Option<T>) -> Option<Option<T>> {
    if text.is_empty() {
        Some(None)
    } else {
        parse(text).map(Some)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PatternSegment {
    Literal(String),
    Hinted {
        raw: String,
        hint: Hint,
        qualifier: Qualifier,
    },
    /// Contains a `:` but does not start with a known hint. Never matches.
    Unrecognized(String),
}

impl PatternSegment {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if !raw.contains(':') {
            return Self::Literal(raw.to_string());
        }

        let hint = raw.get(..Hint::PREFIX_LEN).and_then(Hint::from_prefix);
        match hint {
            Some(hint) => Self::Hinted {
                raw: raw.to_string(),
                hint,
                qualifier: Qualifier::parse(hint, &raw[Hint::PREFIX_LEN..]),
            },
            None => Self::Unrecognized(raw.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(raw) | Self::Hinted { raw, .. } | Self::Unrecognized(raw) => raw,
        }
    }

    /// Whether a matching request segment is captured as an argument.
    #[must_use]
    pub const fn captures(&self) -> bool {
        matches!(self, Self::Hinted { .. })
    }

    /// Slots the reverse builder fills with arguments.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.as_str().starts_with(':')
    }

    #[must_use]
    pub fn accepts(&self, candidate: &str) -> bool {
        match self {
            Self::Literal(literal) => literal == candidate,
            Self::Unrecognized(_) => false,
            Self::Hinted {
                hint: Hint::Num,
                qualifier,
                ..
            } => parse_numeric(candidate).is_some_and(|n| qualifier.accepts_number(n)),
            Self::Hinted {
                hint: Hint::Int,
                qualifier,
                ..
            } => parse_numeric(candidate)
                .filter(|n| n.fract() == 0.0)
                .is_some_and(|n| qualifier.accepts_number(n)),
            Self::Hinted {
                hint: Hint::Str,
                qualifier,
                ..
            } => qualifier.accepts_length(candidate.len()),
        }
    }
}

impl fmt::Display for PatternSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a match string (or request path) into its non-empty segments.
pub fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

#[must_use]
pub fn parse_pattern(pattern: &str) -> Vec<PatternSegment> {
    split_path(pattern).map(PatternSegment::parse).collect()
}

/// Parse a plain decimal number: optional sign, digits with an optional
/// fractional part, optional exponent. No whitespace, hex or `inf`/`nan`.
#[must_use]
pub fn parse_numeric(text: &str) -> Option<f64> {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => (&unsigned[..at], Some(&unsigned[at + 1..])),
        None => (unsigned, None),
    };

    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !all_digits(whole) || !all_digits(fraction) {
        return None;
    }

    if let Some(exponent) = exponent {
        let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
        if digits.is_empty() || !all_digits(digits) {
            return None;
        }
    }

    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(raw: &str) -> PatternSegment {
        PatternSegment::parse(raw)
    }

    #[test]
    fn numeric_detection() {
        assert_eq!(parse_numeric("1234"), Some(1234.0));
        assert_eq!(parse_numeric("-12.5"), Some(-12.5));
        assert_eq!(parse_numeric("+3"), Some(3.0));
        assert_eq!(parse_numeric(".5"), Some(0.5));
        assert_eq!(parse_numeric("5."), Some(5.0));
        assert_eq!(parse_numeric("1e3"), Some(1000.0));
        assert_eq!(parse_numeric("2E-1"), Some(0.2));
        for bad in ["", ".", "-", "abc", "12a", "1.2.3", "inf", "NaN", "0x1A", " 1", "1e", "1e+"] {
            assert_eq!(parse_numeric(bad), None, "{bad:?} should not be numeric");
        }
    }

    #[test]
    fn literal_segments_compare_exactly() {
        assert_eq!(seg("view"), PatternSegment::Literal("view".into()));
        assert!(seg("view").accepts("view"));
        assert!(!seg("view").accepts("View"));
        assert!(!seg("view").captures());
    }

    #[test]
    fn unknown_hint_never_matches() {
        let s = seg(":id");
        assert!(matches!(s, PatternSegment::Unrecognized(_)));
        assert!(!s.accepts("12"));
        assert!(s.is_placeholder());

        let s = seg("a:b");
        assert!(matches!(s, PatternSegment::Unrecognized(_)));
        assert!(!s.accepts("a:b"));
        assert!(!s.is_placeholder());
    }

    #[test]
    fn int_hint() {
        let s = seg(":int");
        assert!(s.captures());
        assert!(s.accepts("1234"));
        assert!(s.accepts("-7"));
        assert!(s.accepts("12.0"));
        assert!(!s.accepts("12.34"));
        assert!(!s.accepts("Nope"));
    }

    #[test]
    fn int_hint_with_range() {
        let s = seg(":int[1-10]");
        assert!(s.accepts("1"));
        assert!(s.accepts("10"));
        assert!(!s.accepts("11"));
        assert!(!s.accepts("5.5"));
    }

    #[test]
    fn num_hint_ranges() {
        let s = seg(":num[10-20]");
        assert!(s.accepts("15"));
        assert!(s.accepts("10"));
        assert!(s.accepts("20"));
        assert!(s.accepts("10.5"));
        assert!(!s.accepts("25"));
        assert!(!s.accepts("9.99"));
        assert!(!s.accepts("fifteen"));

        let open_max = seg(":num[10-]");
        assert!(open_max.accepts("1000000"));
        assert!(!open_max.accepts("9"));

        let open_min = seg(":num[-20]");
        assert!(open_min.accepts("-5"));
        assert!(!open_min.accepts("21"));
    }

    #[test]
    fn num_hint_exact_value_compares_numerically() {
        let s = seg(":num[5]");
        assert!(s.accepts("5"));
        assert!(s.accepts("5.0"));
        assert!(!s.accepts("6"));
    }

    #[test]
    fn str_hint_lengths() {
        assert!(seg(":str").accepts("anything at all"));

        let exact = seg(":str[5]");
        assert!(exact.accepts("abcde"));
        assert!(!exact.accepts("abcd"));
        assert!(!exact.accepts("abcdef"));

        let range = seg(":str[2-4]");
        assert!(!range.accepts("a"));
        assert!(range.accepts("ab"));
        assert!(range.accepts("abcd"));
        assert!(!range.accepts("abcde"));

        assert!(seg(":str[3-]").accepts("abcdefgh"));
        assert!(seg(":str[-3]").accepts("ab"));
    }

    #[test]
    fn malformed_qualifiers_fail_closed() {
        for raw in [":num[10-20", ":num10", ":num[a-b]", ":num[]", ":str[5", ":str[x]", ":int[1-2-3]"] {
            let s = seg(raw);
            match &s {
                PatternSegment::Hinted { qualifier, .. } => {
                    assert!(qualifier.is_malformed(), "{raw} should be malformed");
                }
                other => panic!("{raw} parsed as {other:?}"),
            }
            assert!(!s.accepts("15"), "{raw} must not match");
            assert!(!s.accepts("abcde"), "{raw} must not match");
        }
    }

    #[test]
    fn pattern_splitting_ignores_empty_segments() {
        let segments = parse_pattern("//view/:int///stuff/");
        let raw: Vec<&str> = segments.iter().map(PatternSegment::as_str).collect();
        assert_eq!(raw, ["view", ":int", "stuff"]);
        assert!(parse_pattern("/").is_empty());
    }
}
