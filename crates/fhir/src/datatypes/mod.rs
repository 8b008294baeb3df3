//! General-purpose FHIR datatypes used by the Citation resource.

mod annotation;
mod attachment;
mod coding;
mod contact;
mod identifier;
mod meta;
mod quantity;
mod reference;
mod temporal;
mod usage_context;

pub use annotation::{Annotation, AnnotationBuilder};
pub use attachment::{Attachment, AttachmentBuilder};
pub use coding::{CodeableConcept, CodeableConceptBuilder, Coding, CodingBuilder};
pub use contact::{
    Address, AddressBuilder, ContactDetail, ContactDetailBuilder, ContactPoint,
    ContactPointBuilder, HumanName, HumanNameBuilder,
};
pub use identifier::{Identifier, IdentifierBuilder};
pub use meta::{Meta, MetaBuilder};
pub use quantity::{Quantity, QuantityBuilder, Range, RangeBuilder};
pub use reference::{Reference, ReferenceBuilder};
pub use temporal::{Period, PeriodBuilder};
pub use usage_context::{UsageContext, UsageContextBuilder};
