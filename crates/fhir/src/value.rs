//! Choice values (`value[x]`, `target[x]`, ...) and the borrowed scalars handed to visitors.

use crate::datatypes::{
    Address, Attachment, CodeableConcept, Coding, ContactPoint, HumanName, Identifier, Period,
    Quantity, Range, Reference,
};
use crate::validation::{ReferenceTarget, Validate, ValidationError};
use crate::visit::{Visitor, Walk};
use fhir_types::{
    Base64Binary, Code, Date, DateTime, Decimal, FhirString, Markdown, PositiveInt, Uri,
};
use std::fmt;

/// Closed set of types a choice field can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Boolean,
    Integer,
    PositiveInt,
    Decimal,
    String,
    Uri,
    Code,
    Markdown,
    Date,
    DateTime,
    Coding,
    CodeableConcept,
    Identifier,
    Reference,
    Attachment,
    Period,
    Quantity,
    Range,
    HumanName,
    Address,
    ContactPoint,
}

impl ValueKind {
    /// FHIR type name, also the suffix of the choice element name (`valueCodeableConcept`).
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::PositiveInt => "positiveInt",
            Self::Decimal => "decimal",
            Self::String => "string",
            Self::Uri => "uri",
            Self::Code => "code",
            Self::Markdown => "markdown",
            Self::Date => "date",
            Self::DateTime => "dateTime",
            Self::Coding => "Coding",
            Self::CodeableConcept => "CodeableConcept",
            Self::Identifier => "Identifier",
            Self::Reference => "Reference",
            Self::Attachment => "Attachment",
            Self::Period => "Period",
            Self::Quantity => "Quantity",
            Self::Range => "Range",
            Self::HumanName => "HumanName",
            Self::Address => "Address",
            Self::ContactPoint => "ContactPoint",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// An owned value of a choice field.
///
/// Which variants a given field accepts is declared on the field and checked by validation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Boolean(bool),
    Integer(i32),
    PositiveInt(PositiveInt),
    Decimal(Decimal),
    String(FhirString),
    Uri(Uri),
    Code(Code),
    Markdown(Markdown),
    Date(Date),
    DateTime(DateTime),
    Coding(Box<Coding>),
    CodeableConcept(Box<CodeableConcept>),
    Identifier(Box<Identifier>),
    Reference(Box<Reference>),
    Attachment(Box<Attachment>),
    Period(Box<Period>),
    Quantity(Box<Quantity>),
    Range(Box<Range>),
    HumanName(Box<HumanName>),
    Address(Box<Address>),
    ContactPoint(Box<ContactPoint>),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Integer(_) => ValueKind::Integer,
            Self::PositiveInt(_) => ValueKind::PositiveInt,
            Self::Decimal(_) => ValueKind::Decimal,
            Self::String(_) => ValueKind::String,
            Self::Uri(_) => ValueKind::Uri,
            Self::Code(_) => ValueKind::Code,
            Self::Markdown(_) => ValueKind::Markdown,
            Self::Date(_) => ValueKind::Date,
            Self::DateTime(_) => ValueKind::DateTime,
            Self::Coding(_) => ValueKind::Coding,
            Self::CodeableConcept(_) => ValueKind::CodeableConcept,
            Self::Identifier(_) => ValueKind::Identifier,
            Self::Reference(_) => ValueKind::Reference,
            Self::Attachment(_) => ValueKind::Attachment,
            Self::Period(_) => ValueKind::Period,
            Self::Quantity(_) => ValueKind::Quantity,
            Self::Range(_) => ValueKind::Range,
            Self::HumanName(_) => ValueKind::HumanName,
            Self::Address(_) => ValueKind::Address,
            Self::ContactPoint(_) => ValueKind::ContactPoint,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Self::Reference(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            Self::Uri(u) => Some(u.as_str()),
            Self::Code(c) => Some(c.as_str()),
            Self::Markdown(m) => Some(m.as_str()),
            _ => None,
        }
    }
}

macro_rules! value_from {
    (boxed $($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(Box::new(value))
                }
            }
        )*
    };
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

value_from!(
    Boolean(bool),
    Integer(i32),
    PositiveInt(PositiveInt),
    Decimal(Decimal),
    String(FhirString),
    Uri(Uri),
    Code(Code),
    Markdown(Markdown),
    Date(Date),
    DateTime(DateTime),
);

value_from!(
    boxed Coding(Coding),
    CodeableConcept(CodeableConcept),
    Identifier(Identifier),
    Reference(Reference),
    Attachment(Attachment),
    Period(Period),
    Quantity(Quantity),
    Range(Range),
    HumanName(HumanName),
    Address(Address),
    ContactPoint(ContactPoint),
);

impl Walk for Value {
    fn walk<'a>(&'a self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor<'a>) {
        match self {
            Self::Boolean(v) => visitor.visit_value(name, index, ValueRef::Boolean(*v)),
            Self::Integer(v) => visitor.visit_value(name, index, ValueRef::Integer(*v)),
            Self::PositiveInt(v) => visitor.visit_value(name, index, ValueRef::PositiveInt(*v)),
            Self::Decimal(v) => visitor.visit_value(name, index, ValueRef::Decimal(v)),
            Self::String(v) => visitor.visit_value(name, index, ValueRef::String(v.as_str())),
            Self::Uri(v) => visitor.visit_value(name, index, ValueRef::Uri(v)),
            Self::Code(v) => visitor.visit_value(name, index, ValueRef::Code(v.as_str())),
            Self::Markdown(v) => visitor.visit_value(name, index, ValueRef::Markdown(v)),
            Self::Date(v) => visitor.visit_value(name, index, ValueRef::Date(v)),
            Self::DateTime(v) => visitor.visit_value(name, index, ValueRef::DateTime(v)),
            Self::Coding(v) => v.walk(name, index, visitor),
            Self::CodeableConcept(v) => v.walk(name, index, visitor),
            Self::Identifier(v) => v.walk(name, index, visitor),
            Self::Reference(v) => v.walk(name, index, visitor),
            Self::Attachment(v) => v.walk(name, index, visitor),
            Self::Period(v) => v.walk(name, index, visitor),
            Self::Quantity(v) => v.walk(name, index, visitor),
            Self::Range(v) => v.walk(name, index, visitor),
            Self::HumanName(v) => v.walk(name, index, visitor),
            Self::Address(v) => v.walk(name, index, visitor),
            Self::ContactPoint(v) => v.walk(name, index, visitor),
        }
    }
}

impl Validate for Value {
    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Coding(v) => v.validate(),
            Self::CodeableConcept(v) => v.validate(),
            Self::Identifier(v) => v.validate(),
            Self::Reference(v) => v.validate(),
            Self::Attachment(v) => v.validate(),
            Self::Period(v) => v.validate(),
            Self::Quantity(v) => v.validate(),
            Self::Range(v) => v.validate(),
            Self::HumanName(v) => v.validate(),
            Self::Address(v) => v.validate(),
            Self::ContactPoint(v) => v.validate(),
            _ => Ok(()),
        }
    }
}

impl ReferenceTarget for Value {
    fn reference_target(&self) -> Option<&str> {
        self.as_reference().and_then(Reference::target_kind)
    }
}

/// A borrowed primitive, as offered to [`Visitor::visit_value`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ValueRef<'a> {
    Boolean(bool),
    Integer(i32),
    UnsignedInt(u32),
    PositiveInt(PositiveInt),
    Decimal(&'a Decimal),
    String(&'a str),
    Uri(&'a Uri),
    Code(&'a str),
    Id(&'a str),
    Markdown(&'a Markdown),
    Base64Binary(&'a Base64Binary),
    Date(&'a Date),
    DateTime(&'a DateTime),
}

impl ValueRef<'_> {
    /// FHIR primitive type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::UnsignedInt(_) => "unsignedInt",
            Self::PositiveInt(_) => "positiveInt",
            Self::Decimal(_) => "decimal",
            Self::String(_) => "string",
            Self::Uri(_) => "uri",
            Self::Code(_) => "code",
            Self::Id(_) => "id",
            Self::Markdown(_) => "markdown",
            Self::Base64Binary(_) => "base64Binary",
            Self::Date(_) => "date",
            Self::DateTime(_) => "dateTime",
        }
    }
}

impl fmt::Display for ValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::UnsignedInt(v) => write!(f, "{v}"),
            Self::PositiveInt(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::String(v) | Self::Code(v) | Self::Id(v) => f.write_str(v),
            Self::Uri(v) => write!(f, "{v}"),
            Self::Markdown(v) => write!(f, "{v}"),
            Self::Base64Binary(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{v}"),
            Self::DateTime(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string;

    #[test]
    fn conversions_pick_the_matching_kind() {
        assert_eq!(Value::from(string("text")).kind(), ValueKind::String);
        assert_eq!(Value::from(true).kind(), ValueKind::Boolean);
        assert_eq!(
            Value::from(Uri::parse("http://example.org").expect("uri")).kind(),
            ValueKind::Uri
        );
        let reference = Reference::builder()
            .reference(string("Citation/1"))
            .build()
            .expect("reference");
        let value = Value::from(reference.clone());
        assert_eq!(value.kind(), ValueKind::Reference);
        assert_eq!(value.as_reference(), Some(&reference));
        assert_eq!(value.reference_target(), Some("Citation"));
    }

    #[test]
    fn kind_names_follow_fhir_casing() {
        assert_eq!(ValueKind::DateTime.to_string(), "dateTime");
        assert_eq!(ValueKind::CodeableConcept.to_string(), "CodeableConcept");
    }

    #[test]
    fn value_refs_display_lexically() {
        let date = Date::parse("2021-04").expect("date");
        assert_eq!(ValueRef::Date(&date).to_string(), "2021-04");
        assert_eq!(ValueRef::Boolean(false).to_string(), "false");
        assert_eq!(ValueRef::Code("active").type_name(), "code");
    }
}
