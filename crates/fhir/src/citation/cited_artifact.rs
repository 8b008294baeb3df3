use super::{Contributorship, PublicationForm, RelatesTo, StatusDate};
use crate::datatypes::{Annotation, CodeableConcept, Identifier, Reference};
use fhir_types::{Code, DateTime, FhirString, Markdown, Uri};

fhir_record! {
    /// The article or artifact being described.
    backbone CitedArtifact("Citation.citedArtifact") builder CitedArtifactBuilder {
        /// Unique identifier. May include DOI, PMID, PMCID, etc.
        list identifier + add_identifier("identifier"): Identifier,
        /// Identifier not unique to the cited artifact, e.g. a grant number.
        list related_identifier + add_related_identifier("relatedIdentifier"): Identifier,
        /// When the cited artifact was accessed.
        optional date_accessed("dateAccessed"): DateTime,
        optional version("version"): Version,
        list current_state + add_current_state("currentState"): CodeableConcept,
        list status_date + add_status_date("statusDate"): StatusDate,
        list title + add_title("title"): Title,
        list abstract_ + add_abstract("abstract"): Abstract,
        /// The component of the article or artifact.
        optional part("part"): Part,
        list relates_to + add_relates_to("relatesTo"): RelatesTo,
        list publication_form + add_publication_form("publicationForm"): PublicationForm,
        /// Used for any URL for the article or artifact cited.
        list web_location + add_web_location("webLocation"): WebLocation,
        list classification + add_classification("classification"): CitedArtifactClassification,
        /// Attribution of authors and other contributors.
        optional contributorship("contributorship"): Contributorship,
        list note + add_note("note"): Annotation,
    }
}

fhir_record! {
    /// The defined version of the cited artifact.
    backbone Version("Citation.citedArtifact.version") builder VersionBuilder {
        required value("value"): FhirString,
        /// Citation for the main version of the cited artifact.
        optional base_citation("baseCitation"): Reference => ["Citation"],
    }
}

fhir_record! {
    /// The title details of the article or artifact.
    backbone Title("Citation.citedArtifact.title") builder TitleBuilder {
        /// The kind of title (primary, subtitle, translated, ...).
        list type_ + add_type("type"): CodeableConcept,
        /// Used to express the specific language.
        optional language("language"): CodeableConcept,
        required text("text"): Markdown,
    }
}

fhir_record! {
    /// Summary of the article or artifact.
    backbone Abstract("Citation.citedArtifact.abstract") builder AbstractBuilder {
        optional type_("type"): CodeableConcept,
        optional language("language"): CodeableConcept,
        required text("text"): Markdown,
        /// Copyright notice for the abstract.
        optional copyright("copyright"): Markdown,
    }
}

fhir_record! {
    /// The component of the article or artifact.
    backbone Part("Citation.citedArtifact.part") builder PartBuilder {
        optional type_("type"): CodeableConcept,
        /// The specification of the component.
        optional value("value"): FhirString,
        /// The citation for the full article or artifact.
        optional base_citation("baseCitation"): Reference => ["Citation"],
    }
}

fhir_record! {
    /// Used for any URL for the article or artifact cited.
    backbone WebLocation("Citation.citedArtifact.webLocation") builder WebLocationBuilder {
        /// Code the reason for different URLs, e.g. abstract and full-text.
        optional type_("type"): CodeableConcept,
        optional url("url"): Uri,
    }
}

fhir_record! {
    /// The assignment to an organizing scheme.
    backbone CitedArtifactClassification("Citation.citedArtifact.classification")
        builder CitedArtifactClassificationBuilder
    {
        optional type_("type"): CodeableConcept,
        list classifier + add_classifier("classifier"): CodeableConcept,
        /// Provenance and copyright of classification.
        optional who_classified("whoClassified"): WhoClassified,
    }
}

fhir_record! {
    /// Provenance and copyright of a classification.
    backbone WhoClassified("Citation.citedArtifact.classification.whoClassified")
        builder WhoClassifiedBuilder
    {
        /// Person who created the classification.
        optional person("person"): Reference => ["Person", "Practitioner"],
        /// Organization who created the classification.
        optional organization("organization"): Reference => ["Organization"],
        /// The publisher of the classification, not the publisher of the article.
        optional publisher("publisher"): Reference => ["Organization"],
        optional classifier_copyright("classifierCopyright"): FhirString,
        /// Acceptable to re-use the classification.
        optional free_to_share("freeToShare"): bool,
    }
}

impl CitedArtifact {
    /// The primary title: the first title typed `primary`, else the first title.
    pub fn primary_title(&self) -> Option<&Title> {
        let is_primary = |title: &&Title| {
            title
                .type_
                .iter()
                .flat_map(|concept| concept.coding())
                .any(|coding| coding.code().map(Code::as_str) == Some("primary"))
        };
        self.title
            .iter()
            .find(is_primary)
            .or_else(|| self.title.first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::Coding;
    use crate::validation::ValidationError;
    use crate::{string, FhirError};

    fn title(text: &str, kind: Option<&str>) -> Title {
        let mut builder = Title::builder().text(Markdown::parse(text).expect("markdown"));
        if let Some(kind) = kind {
            builder = builder.add_type(CodeableConcept::from_coding(
                Coding::builder()
                    .code(Code::parse(kind).expect("code"))
                    .build()
                    .expect("coding"),
            )
            .expect("concept"));
        }
        builder.build().expect("title")
    }

    #[test]
    fn primary_title_prefers_the_typed_one() {
        let artifact = CitedArtifact::builder()
            .add_title(title("Sous-titre", Some("subtitle")))
            .add_title(title("Main title", Some("primary")))
            .build()
            .expect("artifact");
        assert_eq!(
            artifact.primary_title().map(|t| t.text().as_str()),
            Some("Main title")
        );

        let untyped = CitedArtifact::builder()
            .add_title(title("Only title", None))
            .build()
            .expect("artifact");
        assert_eq!(
            untyped.primary_title().map(|t| t.text().as_str()),
            Some("Only title")
        );
    }

    #[test]
    fn base_citation_must_point_to_a_citation() {
        let err = Version::builder()
            .value(string("2"))
            .base_citation(
                Reference::builder()
                    .reference(string("Organization/acme"))
                    .build()
                    .expect("reference"),
            )
            .build()
            .expect_err("wrong target");
        assert!(matches!(
            err,
            FhirError::Validation(ValidationError::ReferenceTarget {
                element: "Citation.citedArtifact.version",
                field: "baseCitation",
                ..
            })
        ));
    }

    #[test]
    fn who_classified_targets() {
        let person = Reference::builder()
            .reference(string("Person/p1"))
            .build()
            .expect("reference");
        WhoClassified::builder()
            .person(person.clone())
            .free_to_share(true)
            .build()
            .expect("person may classify");

        let err = WhoClassified::builder()
            .organization(person)
            .build()
            .expect_err("a person is not an organization");
        assert_eq!(
            match err {
                FhirError::Validation(e) => e.field(),
                _ => None,
            },
            Some("organization")
        );
    }

    #[test]
    fn unchecked_build_still_requires_text() {
        let untitled = TitleBuilder::default()
            .add_type(CodeableConcept::from_text("primary").expect("concept"))
            .build_with(crate::BuildOptions::unchecked());
        assert!(matches!(
            untitled,
            Err(FhirError::Validation(ValidationError::MissingRequired { field: "text", .. }))
        ));
    }
}
