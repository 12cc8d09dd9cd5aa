use once_cell::sync::Lazy;
use regex::Regex;

use super::data_type::DataType;

// Plain decimal notation with optional sign and exponent. Rejects the
// extras `f64::from_str` would otherwise let through (inf, NaN, infinity).
static FLOAT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?$").unwrap()
});

/// A trimmed input line tagged with its detected type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedLine<'a> {
    pub text: &'a str,
    pub data_type: DataType,
}

/// Decides whether a value is an integer, a float or a plain string.
///
/// Grammar, first match wins:
/// - empty or whitespace-only: string
/// - fits an `i64` (optional sign, ASCII digits): integer
/// - decimal float (optional sign, fraction, exponent): float
/// - anything else: string
///
/// Underscores, hex prefixes, type suffixes and the `NaN`/`Infinity`
/// literals are not numbers. Integers past the `i64` range fall through
/// to the float check.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeClassifier;

impl TypeClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, value: &str) -> DataType {
        let value = value.trim();
        if value.is_empty() {
            return DataType::String;
        }

        if parse_integer(value).is_some() {
            return DataType::Integer;
        }

        if parse_float(value).is_some() {
            return DataType::Float;
        }

        DataType::String
    }

    /// Trims the line and classifies what is left.
    pub fn classify_line<'a>(&self, line: &'a str) -> ClassifiedLine<'a> {
        let text = line.trim();
        ClassifiedLine {
            text,
            data_type: self.classify(text),
        }
    }
}

/// Parses an already trimmed value as a 64-bit signed integer.
pub fn parse_integer(value: &str) -> Option<i64> {
    value.parse().ok()
}

/// Parses an already trimmed value using the decimal float grammar.
pub fn parse_float(value: &str) -> Option<f64> {
    if !FLOAT_REGEX.is_match(value) {
        return None;
    }
    value.parse().ok()
}
