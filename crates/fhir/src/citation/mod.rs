//! The `Citation` resource (FHIR R4B).
//!
//! A Citation describes a scholarly artifact (article, book, dataset, ...) and the
//! classification, status history and relationships of the citation record itself. The
//! artifact proper lives under [`CitedArtifact`].
//!
//! [`StatusDate`] and [`RelatesTo`] are used both at the top level and under `citedArtifact`
//! (FHIR declares the inner ones by content reference), so each is one type shared by both
//! positions.

mod contributorship;
mod cited_artifact;
mod publication;

pub use cited_artifact::{
    Abstract, AbstractBuilder, CitedArtifact, CitedArtifactBuilder, CitedArtifactClassification,
    CitedArtifactClassificationBuilder, Part, PartBuilder, Title, TitleBuilder, Version,
    VersionBuilder, WebLocation, WebLocationBuilder, WhoClassified, WhoClassifiedBuilder,
};
pub use contributorship::{
    AffiliationInfo, AffiliationInfoBuilder, ContributionInstance, ContributionInstanceBuilder,
    Contributorship, ContributorshipBuilder, ContributorshipSummary,
    ContributorshipSummaryBuilder, Entry, EntryBuilder,
};
pub use publication::{
    DateOfPublication, DateOfPublicationBuilder, PeriodicRelease, PeriodicReleaseBuilder,
    PublicationForm, PublicationFormBuilder, PublishedIn, PublishedInBuilder,
};

use crate::datatypes::{
    Annotation, CodeableConcept, ContactDetail, Identifier, Period, UsageContext,
};
use crate::validation::{Validate, ValidationError};
use crate::value::{Value, ValueKind};
use fhir_types::{Date, DateTime, FhirString, Markdown, TypeError, Uri};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of the citation record (required binding).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PublicationStatus {
    Draft,
    Active,
    Retired,
    Unknown,
}

impl PublicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Retired => "retired",
            Self::Unknown => "unknown",
        }
    }
}

impl FromStr for PublicationStatus {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "retired" => Ok(Self::Retired),
            "unknown" => Ok(Self::Unknown),
            _ => Err(TypeError::Invalid {
                kind: "PublicationStatus",
                value: s.to_owned(),
                reason: "expected draft, active, retired or unknown",
            }),
        }
    }
}

impl fmt::Display for PublicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Validate for PublicationStatus {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

fhir_record! {
    /// A description of a scholarly artifact and the citation record about it.
    resource Citation("Citation") builder CitationBuilder check citation_rules {
        /// Canonical identifier for this citation, represented as a globally unique URI.
        optional url("url"): Uri,
        list identifier + add_identifier("identifier"): Identifier,
        /// Business version of the citation.
        optional version("version"): FhirString,
        /// Computer-friendly name.
        optional name("name"): FhirString,
        optional title("title"): FhirString,
        required status("status"): PublicationStatus,
        /// For testing purposes, not real usage.
        optional experimental("experimental"): bool,
        /// Date last changed.
        optional date("date"): DateTime,
        optional publisher("publisher"): FhirString,
        list contact + add_contact("contact"): ContactDetail,
        /// Natural language description of the citation.
        optional description("description"): Markdown,
        list use_context + add_use_context("useContext"): UsageContext,
        list jurisdiction + add_jurisdiction("jurisdiction"): CodeableConcept,
        optional purpose("purpose"): Markdown,
        /// Use and/or publishing restrictions for the citation record, not the cited artifact.
        optional copyright("copyright"): Markdown,
        optional approval_date("approvalDate"): Date,
        optional last_review_date("lastReviewDate"): Date,
        /// When the citation record is expected to be used.
        optional effective_period("effectivePeriod"): Period,
        list author + add_author("author"): ContactDetail,
        list editor + add_editor("editor"): ContactDetail,
        list reviewer + add_reviewer("reviewer"): ContactDetail,
        list endorser + add_endorser("endorser"): ContactDetail,
        /// A human-readable display of the citation.
        list summary + add_summary("summary"): Summary,
        list classification + add_classification("classification"): Classification,
        /// Used for general notes and annotations not coded elsewhere.
        list note + add_note("note"): Annotation,
        /// The status of the citation record.
        list current_state + add_current_state("currentState"): CodeableConcept,
        list status_date + add_status_date("statusDate"): StatusDate,
        /// Artifact related to the citation record.
        list relates_to + add_relates_to("relatesTo"): RelatesTo,
        /// The article or artifact being described.
        optional cited_artifact("citedArtifact"): CitedArtifact,
    }
}

fhir_record! {
    /// A human-readable display of the citation.
    backbone Summary("Citation.summary") builder SummaryBuilder {
        /// Format for display of the citation.
        optional style("style"): CodeableConcept,
        required text("text"): Markdown,
    }
}

fhir_record! {
    /// The assignment to an organizing scheme.
    backbone Classification("Citation.classification") builder ClassificationBuilder {
        /// The kind of classifier (e.g. publication type, keyword).
        optional type_("type"): CodeableConcept,
        list classifier + add_classifier("classifier"): CodeableConcept,
    }
}

fhir_record! {
    /// An effective date or period for a status of the citation or the cited artifact.
    backbone StatusDate("Citation.statusDate") builder StatusDateBuilder {
        /// Classification of the status.
        required activity("activity"): CodeableConcept,
        /// Either occurred or expected.
        optional actual("actual"): bool,
        /// When the status started and/or ended.
        required period("period"): Period,
    }
}

fhir_record! {
    /// Another artifact this one is related to (replaces, is a comment on, ...).
    backbone RelatesTo("Citation.relatesTo") builder RelatesToBuilder {
        /// How the citation is related.
        required relationship_type("relationshipType"): CodeableConcept,
        list target_classifier + add_target_classifier("targetClassifier"): CodeableConcept,
        /// The article or artifact that the citation is related to.
        required target("target"): Value [
            ValueKind::Uri,
            ValueKind::Identifier,
            ValueKind::Reference,
            ValueKind::Attachment,
        ],
    }
}

/// cnl-0: name should be usable as an identifier for the module by machine processing
/// applications such as code generation.
fn citation_rules(citation: &Citation) -> Result<(), ValidationError> {
    let Some(name) = citation.name.as_ref().map(FhirString::as_str) else {
        return Ok(());
    };
    if !is_computable_name(name) {
        return Err(ValidationError::invariant(
            Citation::ELEMENT,
            "cnl-0",
            format!("name '{name}' must start with an upper-case letter and contain only letters, digits and '_'"),
        ));
    }
    Ok(())
}

/// `^[A-Z]([A-Za-z0-9_]){0,254}$`
fn is_computable_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && name.len() <= 255
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Citation {
    /// Status dates recorded anywhere in the resource: the citation's own, then the cited
    /// artifact's.
    pub fn all_status_dates(&self) -> impl Iterator<Item = &StatusDate> {
        self.status_date.iter().chain(
            self.cited_artifact
                .iter()
                .flat_map(|artifact| artifact.status_date()),
        )
    }
}
