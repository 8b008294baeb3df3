//! FHIR R4B Citation object model.
//!
//! Every element type (datatypes, backbone elements and the `Citation` resource itself) is an
//! immutable record built through a builder:
//! - `build` constructs the record and runs structural validation (required fields, choice
//!   types, reference target kinds, "has value or children", record-specific rules)
//! - records compare structurally and cache their hash on first use
//! - `to_builder` starts a copy-and-modify round trip
//! - `accept` walks the whole tree with a [`Visitor`]
//!
//! Primitive values (`uri`, `date`, `positiveInt`, ...) come from the `fhir-types` crate and are
//! validated when they are constructed, before they reach a builder.

#[macro_use]
mod macros;

pub mod citation;
pub mod datatypes;
pub mod element;
mod options;
pub mod validation;
pub mod value;
pub mod visit;
pub mod visitors;

pub use citation::{Citation, CitationBuilder, PublicationStatus};
pub use element::{Element, Extension, ExtensionBuilder};
pub use options::{BuildOptions, SKIP_VALIDATION_ENV};
pub use validation::{Validate, ValidationError};
pub use value::{Value, ValueKind, ValueRef};
pub use visit::{Node, Visitor, Walk};

pub use fhir_types::TypeError;

#[cfg(test)]
pub(crate) fn string(text: &str) -> fhir_types::FhirString {
    fhir_types::FhirString::parse(text).expect("valid string")
}

/// Errors returned by the `fhir` crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    /// A record failed structural validation and was not constructed.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A primitive value did not match its lexical rules.
    #[error("invalid primitive: {0}")]
    InvalidPrimitive(#[from] TypeError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;
