//! Validated FHIR primitive value types.
//!
//! Each wrapper guarantees, once constructed, that its content matches the lexical rules of the
//! corresponding FHIR primitive. Construction goes through `parse`/`new` and returns a
//! [`TypeError`] on malformed input, so a record builder never receives an invalid primitive.
//!
//! All wrappers serialise as their canonical lexical string and re-validate on deserialisation.

mod binary;
mod number;
mod temporal;
mod text;

pub use binary::Base64Binary;
pub use number::{Decimal, PositiveInt};
pub use temporal::{Date, DatePrecision, DateTime};
pub use text::{Code, FhirString, Id, Markdown, Uri};

/// Errors that can occur when constructing primitive values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// The input was empty or contained only whitespace.
    #[error("{kind} cannot be empty")]
    Empty { kind: &'static str },

    /// The input does not match the lexical form of the primitive.
    #[error("invalid {kind} '{value}': {reason}")]
    Invalid {
        kind: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl TypeError {
    pub(crate) fn invalid(kind: &'static str, value: &str, reason: &'static str) -> Self {
        Self::Invalid {
            kind,
            value: value.to_owned(),
            reason,
        }
    }
}

/// Result type for primitive construction.
pub type TypeResult<T> = Result<T, TypeError>;

/// Implements `Serialize`/`Deserialize` through the type's `Display` and `parse`.
macro_rules! lexical_serde {
    ($ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                <$ty>::parse(&s).map_err(serde::de::Error::custom)
            }
        }

        impl std::str::FromStr for $ty {
            type Err = TypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::parse(s)
            }
        }
    };
}

pub(crate) use lexical_serde;
