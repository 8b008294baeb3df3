//! Structural validation.
//!
//! Each record validates its own children first and then applies its own rules, so the first
//! error reported is the innermost one in declaration order.

use crate::element::Element;
use crate::value::{Value, ValueKind};
use crate::{BuildOptions, FhirError, FhirResult};
use fhir_types::{
    Base64Binary, Code, Date, DateTime, Decimal, FhirString, Id, Markdown, PositiveInt, Uri,
};

/// Reasons a record cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{element}: missing required field '{field}'")]
    MissingRequired {
        element: &'static str,
        field: &'static str,
    },

    #[error("{element}.{field}: type {found} is not allowed (expected one of: {allowed})")]
    ChoiceType {
        element: &'static str,
        field: &'static str,
        found: ValueKind,
        allowed: String,
    },

    #[error("{element}.{field}: reference to {found} is not allowed (expected one of: {allowed})")]
    ReferenceTarget {
        element: &'static str,
        field: &'static str,
        found: String,
        allowed: String,
    },

    /// ele-1: every element must have a value or children.
    #[error("{element}: element must have a value or children")]
    Empty { element: &'static str },

    /// A record-specific rule such as per-1 or att-1.
    #[error("{element}: {key}: {message}")]
    Invariant {
        element: &'static str,
        key: &'static str,
        message: String,
    },
}

impl ValidationError {
    /// Name of the field the error is about, when it concerns a single field.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingRequired { field, .. }
            | Self::ChoiceType { field, .. }
            | Self::ReferenceTarget { field, .. } => Some(field),
            Self::Empty { .. } | Self::Invariant { .. } => None,
        }
    }

    pub fn element(&self) -> &'static str {
        match self {
            Self::MissingRequired { element, .. }
            | Self::ChoiceType { element, .. }
            | Self::ReferenceTarget { element, .. }
            | Self::Empty { element }
            | Self::Invariant { element, .. } => element,
        }
    }

    pub(crate) fn invariant(
        element: &'static str,
        key: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::Invariant {
            element,
            key,
            message: message.into(),
        }
    }
}

/// Structural validation of a record and everything it contains.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl<T: Validate + ?Sized> Validate for Box<T> {
    fn validate(&self) -> Result<(), ValidationError> {
        (**self).validate()
    }
}

macro_rules! always_valid {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Validate for $ty {
                fn validate(&self) -> Result<(), ValidationError> {
                    Ok(())
                }
            }
        )*
    };
}

// Primitives are checked when they are constructed.
always_valid!(
    bool,
    u32,
    String,
    FhirString,
    Base64Binary,
    Code,
    Date,
    DateTime,
    Decimal,
    Id,
    Markdown,
    PositiveInt,
    Uri,
);

/// Target kind of a reference-like value, when it can be determined locally.
pub trait ReferenceTarget {
    fn reference_target(&self) -> Option<&str>;
}

/// Checks that a choice value has one of the allowed types.
pub fn check_choice(
    element: &'static str,
    field: &'static str,
    value: &Value,
    allowed: &[ValueKind],
) -> Result<(), ValidationError> {
    let found = value.kind();
    if allowed.contains(&found) {
        return Ok(());
    }
    Err(ValidationError::ChoiceType {
        element,
        field,
        found,
        allowed: join(allowed.iter().map(|k| k.type_name())),
    })
}

/// Checks that a reference points at one of the allowed resource types.
///
/// References whose target cannot be determined locally (contained `#id` references, URNs,
/// identifier-only references) pass; they are resolved out of band.
pub fn check_reference_target<R: ReferenceTarget + ?Sized>(
    element: &'static str,
    field: &'static str,
    reference: &R,
    allowed: &[&str],
) -> Result<(), ValidationError> {
    match reference.reference_target() {
        Some(found) if !allowed.contains(&found) => Err(ValidationError::ReferenceTarget {
            element,
            field,
            found: found.to_owned(),
            allowed: join(allowed.iter().copied()),
        }),
        _ => Ok(()),
    }
}

fn join<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

/// Error for a required field that was never set on the builder.
pub(crate) fn missing(element: &'static str, field: &'static str) -> FhirError {
    let err = ValidationError::MissingRequired { element, field };
    tracing::debug!(element, field, "rejected build: missing required field");
    err.into()
}

/// Runs the record's rules unless `options` turns them off.
pub(crate) fn finish<T: Element>(record: T, options: BuildOptions) -> FhirResult<T> {
    if !options.validate() {
        tracing::warn!(
            element = record.element_name(),
            "built without structural validation"
        );
        return Ok(record);
    }

    match record.validate() {
        Ok(()) => Ok(record),
        Err(err) => {
            tracing::debug!(element = record.element_name(), error = %err, "rejected build");
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string;
    use crate::datatypes::{Coding, Reference};
    use crate::value::Value;

    #[test]
    fn choice_accepts_members_only() {
        let uri = Value::from(Uri::parse("http://example.org").expect("uri"));
        check_choice("X", "value", &uri, &[ValueKind::Uri, ValueKind::Reference])
            .expect("uri is allowed");

        let text = Value::from(string("plain"));
        let err = check_choice("X", "value", &text, &[ValueKind::Uri, ValueKind::Reference])
            .expect_err("string is not allowed");
        match err {
            ValidationError::ChoiceType {
                field,
                found,
                allowed,
                ..
            } => {
                assert_eq!(field, "value");
                assert_eq!(found, ValueKind::String);
                assert_eq!(allowed, "uri, Reference");
            }
            other => panic!("expected ChoiceType, got {other:?}"),
        }
    }

    #[test]
    fn reference_targets_are_checked_when_known() {
        let org = Reference::builder()
            .reference(string("Organization/acme"))
            .build()
            .expect("valid reference");
        check_reference_target("X", "publisher", &org, &["Organization"]).expect("allowed");

        let err = check_reference_target("X", "publisher", &org, &["Practitioner", "Person"])
            .expect_err("wrong kind");
        assert!(matches!(
            err,
            ValidationError::ReferenceTarget { ref found, .. } if found == "Organization"
        ));
        assert_eq!(err.field(), Some("publisher"));
    }

    #[test]
    fn unresolvable_references_pass() {
        let contained = Reference::builder()
            .reference(string("#org1"))
            .build()
            .expect("valid reference");
        check_reference_target("X", "publisher", &contained, &["Practitioner"])
            .expect("contained references are resolved elsewhere");

        let display_only = Reference::builder()
            .display(string("Some publisher"))
            .build()
            .expect("valid reference");
        check_reference_target("X", "publisher", &display_only, &["Practitioner"])
            .expect("no target to check");
    }

    #[test]
    fn unchecked_build_skips_rules_but_not_required_fields() {
        let empty = Coding::builder()
            .build_with(BuildOptions::unchecked())
            .expect("rules skipped");
        assert!(!empty.has_content());

        let err = Coding::builder().build().expect_err("empty coding");
        assert!(matches!(
            err,
            FhirError::Validation(ValidationError::Empty { element: "Coding" })
        ));
    }
}
