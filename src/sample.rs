//! The citation the CLI inspects: Einstein's 1905 paper on special relativity.

use fhir::citation::{
    Abstract, AffiliationInfo, Classification, CitedArtifact, Contributorship, DateOfPublication,
    Entry, PeriodicRelease, PublicationForm, PublishedIn, RelatesTo, StatusDate, Summary, Title,
    WebLocation,
};
use fhir::datatypes::{CodeableConcept, Coding, HumanName, Identifier, Period, Reference};
use fhir::{BuildOptions, Citation, Extension, FhirResult, PublicationStatus};
use fhir_types::{Code, Date, DateTime, FhirString, Id, Markdown, PositiveInt, Uri};

const STATUS_TYPE: &str = "http://terminology.hl7.org/CodeSystem/citation-status-type";
const ARTIFACT_STATUS: &str = "http://terminology.hl7.org/CodeSystem/cited-artifact-status-type";
const CONTRIBUTOR_ROLE: &str = "http://terminology.hl7.org/CodeSystem/contributor-role";

fn concept(system: &str, code: &str, options: BuildOptions) -> FhirResult<CodeableConcept> {
    let coding = Coding::builder()
        .system(Uri::parse(system)?)
        .code(Code::parse(code)?)
        .build_with(options)?;
    CodeableConcept::from_coding(coding)
}

fn period_from(start: &str, options: BuildOptions) -> FhirResult<Period> {
    Period::builder()
        .start(DateTime::parse(start)?)
        .build_with(options)
}

fn reference(literal: &str, options: BuildOptions) -> FhirResult<Reference> {
    Reference::builder()
        .reference(FhirString::parse(literal)?)
        .build_with(options)
}

fn publication_form(options: BuildOptions) -> FhirResult<PublicationForm> {
    let journal = PublishedIn::builder()
        .type_(CodeableConcept::from_text("Periodical")?)
        .add_identifier(
            Identifier::builder()
                .system(Uri::parse("urn:ietf:rfc:3986")?)
                .value(FhirString::parse("ISSN 0003-3804")?)
                .build_with(options)?,
        )
        .title(FhirString::parse("Annalen der Physik")?)
        .publisher(reference("Organization/wiley-vch", options)?)
        .publisher_location(FhirString::parse("Leipzig")?)
        .build_with(options)?;

    let issue = PeriodicRelease::builder()
        .cited_medium(CodeableConcept::from_text("Print")?)
        .volume(FhirString::parse("322")?)
        .issue(FhirString::parse("10")?)
        .date_of_publication(
            DateOfPublication::builder()
                .date(Date::parse("1905")?)
                .year(FhirString::parse("1905")?)
                .build_with(options)?,
        )
        .build_with(options)?;

    PublicationForm::builder()
        .published_in(journal)
        .periodic_release(issue)
        .article_date(DateTime::parse("1905-06-30")?)
        .first_page(FhirString::parse("891")?)
        .last_page(FhirString::parse("921")?)
        .page_count(FhirString::parse("31")?)
        .build_with(options)
}

fn contributorship(options: BuildOptions) -> FhirResult<Contributorship> {
    let einstein = Entry::builder()
        .name(
            HumanName::builder()
                .family(FhirString::parse("Einstein")?)
                .add_given(FhirString::parse("Albert")?)
                .build_with(options)?,
        )
        .initials(FhirString::parse("A")?)
        .add_affiliation_info(
            AffiliationInfo::builder()
                .affiliation(FhirString::parse(
                    "Federal Office for Intellectual Property, Bern",
                )?)
                .build_with(options)?,
        )
        .add_contribution_type(concept(CONTRIBUTOR_ROLE, "author", options)?)
        .corresponding_contact(true)
        .list_order(PositiveInt::new(1)?)
        .build_with(options)?;

    Contributorship::builder()
        .complete(true)
        .add_entry(einstein)
        .build_with(options)
}

fn cited_artifact(options: BuildOptions) -> FhirResult<CitedArtifact> {
    let doi = Identifier::builder()
        .system(Uri::parse("https://doi.org")?)
        .value(FhirString::parse("10.1002/andp.19053221004")?)
        .build_with(options)?;

    let title = Title::builder()
        .add_type(CodeableConcept::from_text("primary")?)
        .language(CodeableConcept::from_text("German")?)
        .text(Markdown::parse("Zur Elektrodynamik bewegter Körper")?)
        .build_with(options)?;

    let translated = Title::builder()
        .add_type(CodeableConcept::from_text("translated")?)
        .text(Markdown::parse("On the Electrodynamics of Moving Bodies")?)
        .build_with(options)?;

    let summary = Abstract::builder()
        .text(Markdown::parse(
            "Introduces the special theory of relativity from two postulates: the principle \
             of relativity and the constancy of the speed of light.",
        )?)
        .build_with(options)?;

    let published = StatusDate::builder()
        .activity(concept(ARTIFACT_STATUS, "published-final", options)?)
        .actual(true)
        .period(period_from("1905-09-26", options)?)
        .build_with(options)?;

    let translation = RelatesTo::builder()
        .relationship_type(CodeableConcept::from_text("is-translated-by")?)
        .target(Uri::parse("https://en.wikisource.org/wiki/On_the_Electrodynamics_of_Moving_Bodies")?)
        .build_with(options)?;

    CitedArtifact::builder()
        .add_identifier(doi)
        .date_accessed(DateTime::parse("2023-01-15T09:30:00Z")?)
        .add_status_date(published)
        .title([title, translated])
        .add_abstract(summary)
        .add_relates_to(translation)
        .add_publication_form(publication_form(options)?)
        .add_web_location(
            WebLocation::builder()
                .type_(CodeableConcept::from_text("doi-based")?)
                .url(Uri::parse("https://doi.org/10.1002/andp.19053221004")?)
                .build_with(options)?,
        )
        .contributorship(contributorship(options)?)
        .build_with(options)
}

/// Builds the sample citation, validating every record unless `options` says otherwise.
pub fn einstein_1905(options: BuildOptions) -> FhirResult<Citation> {
    let curated = Extension::builder()
        .url(Uri::parse("http://example.org/fhir/StructureDefinition/curated-by")?)
        .value(FhirString::parse("Example Library")?)
        .build_with(options)?;

    Citation::builder()
        .id(Id::parse("einstein-1905")?)
        .add_extension(curated)
        .url(Uri::parse("http://example.org/fhir/Citation/einstein-1905")?)
        .name(FhirString::parse("Electrodynamics1905")?)
        .title(FhirString::parse(
            "Citation of Einstein 1905, On the Electrodynamics of Moving Bodies",
        )?)
        .status(PublicationStatus::Active)
        .date(DateTime::parse("2023-01-15")?)
        .publisher(FhirString::parse("Example Library")?)
        .add_summary(
            Summary::builder()
                .style(CodeableConcept::from_text("Vancouver")?)
                .text(Markdown::parse(
                    "Einstein A. Zur Elektrodynamik bewegter Körper. Ann Phys. \
                     1905;322(10):891-921.",
                )?)
                .build_with(options)?,
        )
        .add_classification(
            Classification::builder()
                .type_(CodeableConcept::from_text("citation-source")?)
                .add_classifier(CodeableConcept::from_text("Physics")?)
                .build_with(options)?,
        )
        .add_status_date(
            StatusDate::builder()
                .activity(concept(STATUS_TYPE, "approved", options)?)
                .actual(true)
                .period(period_from("2023-01-15", options)?)
                .build_with(options)?,
        )
        .add_relates_to(
            RelatesTo::builder()
                .relationship_type(CodeableConcept::from_text("cites")?)
                .target(reference("Citation/lorentz-1904", options)?)
                .build_with(options)?,
        )
        .cited_artifact(cited_artifact(options)?)
        .build_with(options)
}
