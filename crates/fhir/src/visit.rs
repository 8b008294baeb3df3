//! Tree traversal.
//!
//! Every record is one variant of [`Node`]. A walk calls, for each record it reaches:
//!
//! 1. `pre_visit`: returning `false` skips the record entirely (no further callbacks);
//! 2. `visit_start`;
//! 3. `visit`: returning `false` skips the record's children;
//! 4. the children, in field declaration order, list entries in list order;
//! 5. `visit_end`;
//! 6. `post_visit`.
//!
//! Primitive fields are offered through `visit_value` only.

use crate::citation::{
    Abstract, AffiliationInfo, Citation, CitedArtifact, CitedArtifactClassification, Classification,
    ContributionInstance, Contributorship, ContributorshipSummary, DateOfPublication, Entry,
    Part, PeriodicRelease, PublicationForm, PublicationStatus, PublishedIn, RelatesTo,
    StatusDate, Summary, Title, Version, WebLocation, WhoClassified,
};
use crate::datatypes::{
    Address, Annotation, Attachment, CodeableConcept, Coding, ContactDetail, ContactPoint,
    HumanName, Identifier, Meta, Period, Quantity, Range, Reference, UsageContext,
};
use crate::element::{Element, Extension};
use crate::value::ValueRef;
use fhir_types::{
    Base64Binary, Code, Date, DateTime, Decimal, FhirString, Id, Markdown, PositiveInt, Uri,
};

/// Callbacks for a tree walk. Every method defaults to "continue, do nothing".
pub trait Visitor<'a> {
    fn pre_visit(&mut self, _node: Node<'a>) -> bool {
        true
    }

    fn visit_start(&mut self, _name: &str, _index: Option<usize>, _node: Node<'a>) {}

    fn visit(&mut self, _name: &str, _index: Option<usize>, _node: Node<'a>) -> bool {
        true
    }

    fn visit_end(&mut self, _name: &str, _index: Option<usize>, _node: Node<'a>) {}

    fn post_visit(&mut self, _node: Node<'a>) {}

    fn visit_value(&mut self, _name: &str, _index: Option<usize>, _value: ValueRef<'a>) {}
}

/// Anything that can appear in a record tree.
pub trait Walk {
    /// Offers `self` to `visitor` as the field `name` (entry `index` of a list field).
    fn walk<'a>(&'a self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor<'a>);
}

impl<T: Walk + ?Sized> Walk for Box<T> {
    fn walk<'a>(&'a self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor<'a>) {
        (**self).walk(name, index, visitor);
    }
}

/// Runs the callback protocol for one record.
pub fn walk_node<'a>(
    name: &str,
    index: Option<usize>,
    node: Node<'a>,
    visitor: &mut dyn Visitor<'a>,
) {
    if !visitor.pre_visit(node) {
        tracing::trace!(element = node.element_name(), name, "pruned by pre_visit");
        return;
    }
    visitor.visit_start(name, index, node);
    if visitor.visit(name, index, node) {
        node.visit_children(visitor);
    }
    visitor.visit_end(name, index, node);
    visitor.post_visit(node);
}

macro_rules! nodes {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        /// A borrowed record of any type.
        #[derive(Clone, Copy, Debug)]
        pub enum Node<'a> {
            $( $variant(&'a $ty), )*
        }

        impl<'a> Node<'a> {
            /// Element path of the record's type, e.g. `Citation.citedArtifact.title`.
            pub fn element_name(self) -> &'static str {
                match self {
                    $( Node::$variant(_) => <$ty>::ELEMENT, )*
                }
            }

            pub fn as_element(self) -> &'a dyn Element {
                match self {
                    $( Node::$variant(record) => record, )*
                }
            }

            pub(crate) fn visit_children(self, visitor: &mut dyn Visitor<'a>) {
                match self {
                    $( Node::$variant(record) => record.visit_fields(visitor), )*
                }
            }
        }
    };
}

nodes! {
    Extension => Extension,
    Meta => Meta,
    Coding => Coding,
    CodeableConcept => CodeableConcept,
    Identifier => Identifier,
    Reference => Reference,
    Attachment => Attachment,
    Period => Period,
    Quantity => Quantity,
    Range => Range,
    Annotation => Annotation,
    ContactPoint => ContactPoint,
    ContactDetail => ContactDetail,
    HumanName => HumanName,
    Address => Address,
    UsageContext => UsageContext,
    Citation => Citation,
    Summary => Summary,
    Classification => Classification,
    StatusDate => StatusDate,
    RelatesTo => RelatesTo,
    CitedArtifact => CitedArtifact,
    Version => Version,
    Title => Title,
    Abstract => Abstract,
    Part => Part,
    PublicationForm => PublicationForm,
    PublishedIn => PublishedIn,
    PeriodicRelease => PeriodicRelease,
    DateOfPublication => DateOfPublication,
    WebLocation => WebLocation,
    CitedArtifactClassification => CitedArtifactClassification,
    WhoClassified => WhoClassified,
    Contributorship => Contributorship,
    Entry => Entry,
    AffiliationInfo => AffiliationInfo,
    ContributionInstance => ContributionInstance,
    ContributorshipSummary => ContributorshipSummary,
}

impl<'a> Node<'a> {
    pub fn has_content(self) -> bool {
        self.as_element().has_content()
    }

    pub fn modifier_extension(self) -> &'a [Extension] {
        self.as_element().modifier_extension()
    }

    pub fn as_reference(self) -> Option<&'a Reference> {
        match self {
            Node::Reference(reference) => Some(reference),
            _ => None,
        }
    }
}

macro_rules! walk_scalar {
    ($($ty:ty => |$v:ident| $value:expr),* $(,)?) => {
        $(
            impl Walk for $ty {
                fn walk<'a>(
                    &'a self,
                    name: &str,
                    index: Option<usize>,
                    visitor: &mut dyn Visitor<'a>,
                ) {
                    let $v = self;
                    visitor.visit_value(name, index, $value);
                }
            }
        )*
    };
}

walk_scalar! {
    bool => |v| ValueRef::Boolean(*v),
    u32 => |v| ValueRef::UnsignedInt(*v),
    String => |v| ValueRef::String(v),
    FhirString => |v| ValueRef::String(v.as_str()),
    PositiveInt => |v| ValueRef::PositiveInt(*v),
    Decimal => |v| ValueRef::Decimal(v),
    Uri => |v| ValueRef::Uri(v),
    Code => |v| ValueRef::Code(v.as_str()),
    Id => |v| ValueRef::Id(v.as_str()),
    Markdown => |v| ValueRef::Markdown(v),
    Base64Binary => |v| ValueRef::Base64Binary(v),
    Date => |v| ValueRef::Date(v),
    DateTime => |v| ValueRef::DateTime(v),
    PublicationStatus => |v| ValueRef::Code(v.as_str()),
}
