//! String-shaped primitives: `string`, `uri`, `code`, `id` and `markdown`.

use crate::{lexical_serde, TypeError, TypeResult};
use std::fmt;

/// FHIR `string`: text with at least one non-whitespace character.
///
/// Leading and trailing whitespace is trimmed on construction, so an element can never hold a
/// value that carries no information.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FhirString(String);

impl FhirString {
    /// Trims `input` and wraps it.
    ///
    /// Fails with [`TypeError::Empty`] when nothing is left after trimming.
    pub fn parse(input: &str) -> TypeResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(TypeError::Empty { kind: "string" });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The trimmed text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwraps into the owned, trimmed text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl PartialEq<str> for FhirString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for FhirString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl TryFrom<&str> for FhirString {
    type Error = TypeError;

    fn try_from(value: &str) -> TypeResult<Self> {
        Self::parse(value)
    }
}

impl TryFrom<String> for FhirString {
    type Error = TypeError;

    fn try_from(value: String) -> TypeResult<Self> {
        if value.trim().len() == value.len() && !value.is_empty() {
            return Ok(Self(value));
        }
        Self::parse(&value)
    }
}

/// FHIR `uri` (also used for `url` and `canonical`).
///
/// A URI is case-sensitive and must not contain whitespace. No further syntax is imposed:
/// FHIR allows URNs (`urn:uuid:...`, `urn:oid:...`) alongside absolute and relative URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uri(String);

impl Uri {
    /// Fails with [`TypeError::Empty`] on empty input and [`TypeError::Invalid`] when the
    /// input contains whitespace.
    pub fn parse(input: &str) -> TypeResult<Self> {
        if input.is_empty() {
            return Err(TypeError::Empty { kind: "uri" });
        }
        if input.chars().any(char::is_whitespace) {
            return Err(TypeError::invalid("uri", input, "whitespace is not allowed"));
        }
        Ok(Self(input.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// FHIR `code`: a token from a terminology or value set.
///
/// Codes have no leading or trailing whitespace and at most single spaces between words.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code(String);

impl Code {
    /// Fails with [`TypeError::Empty`] on blank input and [`TypeError::Invalid`] for leading,
    /// trailing or repeated whitespace.
    pub fn parse(input: &str) -> TypeResult<Self> {
        if input.trim().is_empty() {
            return Err(TypeError::Empty { kind: "code" });
        }
        if input.starts_with(' ') || input.ends_with(' ') {
            return Err(TypeError::invalid(
                "code",
                input,
                "leading or trailing whitespace is not allowed",
            ));
        }
        if input.contains("  ") || input.chars().any(|c| c.is_whitespace() && c != ' ') {
            return Err(TypeError::invalid(
                "code",
                input,
                "only single spaces may separate words",
            ));
        }
        Ok(Self(input.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// FHIR `id`: a logical identifier of 1 to 64 characters from `[A-Za-z0-9.-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(String);

impl Id {
    const MAX_LEN: usize = 64;

    /// Fails with [`TypeError::Empty`] on empty input and [`TypeError::Invalid`] when the input
    /// is too long or uses characters outside `[A-Za-z0-9.-]`.
    pub fn parse(input: &str) -> TypeResult<Self> {
        if input.is_empty() {
            return Err(TypeError::Empty { kind: "id" });
        }
        if input.len() > Self::MAX_LEN {
            return Err(TypeError::invalid(
                "id",
                input,
                "longer than 64 characters",
            ));
        }
        let ok = input
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'.' | b'-'));
        if !ok {
            return Err(TypeError::invalid(
                "id",
                input,
                "only alphanumeric, '.' and '-' are allowed",
            ));
        }
        Ok(Self(input.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// FHIR `markdown`: GitHub-flavoured markdown text.
///
/// Whitespace is significant in markdown, so the input is stored verbatim; only
/// whitespace-only content is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Markdown(String);

impl Markdown {
    /// Fails with [`TypeError::Empty`] when the input is blank.
    pub fn parse(input: &str) -> TypeResult<Self> {
        if input.trim().is_empty() {
            return Err(TypeError::Empty { kind: "markdown" });
        }
        Ok(Self(input.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! string_like {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl AsRef<str> for $ty {
                fn as_ref(&self) -> &str {
                    &self.0
                }
            }

            lexical_serde!($ty);
        )*
    };
}

string_like!(FhirString, Uri, Code, Id, Markdown);
