//! Numeric primitives: `decimal` and `positiveInt`.

use crate::{lexical_serde, TypeError, TypeResult};
use std::fmt;

/// FHIR `decimal`.
///
/// The original lexical form is preserved because trailing zeros carry precision in FHIR
/// (`1.50` and `1.5` are different values on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal(String);

impl Decimal {
    /// Parses a decimal literal, keeping its exact spelling.
    ///
    /// Fails with [`TypeError::Empty`] on empty input and [`TypeError::Invalid`] for anything
    /// that is not a plain or exponent decimal literal.
    pub fn parse(input: &str) -> TypeResult<Self> {
        if input.is_empty() {
            return Err(TypeError::Empty { kind: "decimal" });
        }
        if !is_decimal_literal(input) {
            return Err(TypeError::invalid(
                "decimal",
                input,
                "expected a decimal literal such as -1.50 or 2e3",
            ));
        }
        Ok(Self(input.to_owned()))
    }

    /// The literal as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value for comparisons. Precision beyond `f64` is lost.
    pub fn to_f64(&self) -> f64 {
        // The literal grammar is a subset of what `f64::from_str` accepts.
        self.0.parse().unwrap_or(f64::NAN)
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Self(value.to_string())
    }
}

/// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`
fn is_decimal_literal(input: &str) -> bool {
    let bytes = input.as_bytes();
    let mut i = 0;

    if bytes.first() == Some(&b'-') {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_len = i - int_start;
    if int_len == 0 || (int_len > 1 && bytes[int_start] == b'0') {
        return false;
    }

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == frac_start {
            return false;
        }
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}

/// FHIR `positiveInt`: an integer in `1..=2_147_483_647`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositiveInt(u32);

impl PositiveInt {
    const MAX: u32 = i32::MAX as u32;

    /// Fails with [`TypeError::Invalid`] for `0` or values above `i32::MAX`.
    pub fn new(value: u32) -> TypeResult<Self> {
        if value == 0 || value > Self::MAX {
            return Err(TypeError::invalid(
                "positiveInt",
                &value.to_string(),
                "must be between 1 and 2147483647",
            ));
        }
        Ok(Self(value))
    }

    /// Parses an unsigned integer literal, then applies the range rule of [`PositiveInt::new`].
    pub fn parse(input: &str) -> TypeResult<Self> {
        let value = input.parse::<u32>().map_err(|_| {
            TypeError::invalid("positiveInt", input, "not an unsigned integer")
        })?;
        Self::new(value)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for PositiveInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

lexical_serde!(Decimal);
lexical_serde!(PositiveInt);
