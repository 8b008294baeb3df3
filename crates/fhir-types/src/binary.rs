//! FHIR `base64Binary`.

use crate::{lexical_serde, TypeError, TypeResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;

/// Base64-encoded binary content (standard alphabet, padded).
///
/// The encoded text is kept as given; [`Base64Binary::decode`] yields the bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Base64Binary(String);

impl Base64Binary {
    /// Parses encoded text.
    ///
    /// Fails with [`TypeError::Empty`] on empty input and [`TypeError::Invalid`] when the text
    /// does not decode with the standard alphabet.
    pub fn parse(input: &str) -> TypeResult<Self> {
        if input.is_empty() {
            return Err(TypeError::Empty {
                kind: "base64Binary",
            });
        }
        STANDARD
            .decode(input)
            .map_err(|_| TypeError::invalid("base64Binary", input, "not valid base64"))?;
        Ok(Self(input.to_owned()))
    }

    /// Encodes raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(STANDARD.encode(bytes))
    }

    /// The encoded text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The decoded bytes.
    pub fn decode(&self) -> Vec<u8> {
        // Validated at construction.
        STANDARD.decode(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for Base64Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

lexical_serde!(Base64Binary);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_bytes() {
        let b = Base64Binary::from_bytes(b"citation");
        assert_eq!(b.as_str(), "Y2l0YXRpb24=");
        assert_eq!(b.decode(), b"citation");
        assert_eq!(Base64Binary::parse("Y2l0YXRpb24=").expect("valid"), b);
    }

    #[test]
    fn rejects_invalid_base64() {
        let err = Base64Binary::parse("not base64!").expect_err("invalid");
        assert!(matches!(
            err,
            TypeError::Invalid {
                kind: "base64Binary",
                ..
            }
        ));
        assert!(Base64Binary::parse("").is_err());
    }
}
