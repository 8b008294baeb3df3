use crate::datatypes::{CodeableConcept, Identifier, Reference};
use fhir_types::{Date, DateTime, FhirString, Markdown};

fhir_record! {
    /// If multiple, used to represent alternative forms of the article that are not separate
    /// citations.
    backbone PublicationForm("Citation.citedArtifact.publicationForm")
        builder PublicationFormBuilder
    {
        /// The collection the cited article or artifact is published in.
        optional published_in("publishedIn"): PublishedIn,
        /// The specific issue in which the cited article resides.
        optional periodic_release("periodicRelease"): PeriodicRelease,
        /// The date the article was added to the database, or the date the article was
        /// released.
        optional article_date("articleDate"): DateTime,
        optional last_revision_date("lastRevisionDate"): DateTime,
        list language + add_language("language"): CodeableConcept,
        /// Entry number or identifier for inclusion in a database.
        optional accession_number("accessionNumber"): FhirString,
        /// Used for full display of pagination.
        optional page_string("pageString"): FhirString,
        optional first_page("firstPage"): FhirString,
        optional last_page("lastPage"): FhirString,
        /// Number of pages or screens.
        optional page_count("pageCount"): FhirString,
        /// Copyright notice for the full article or artifact.
        optional copyright("copyright"): Markdown,
    }
}

fhir_record! {
    /// The collection the cited article or artifact is published in.
    backbone PublishedIn("Citation.citedArtifact.publicationForm.publishedIn")
        builder PublishedInBuilder
    {
        /// Kind of container (e.g. Periodical, database, or book).
        optional type_("type"): CodeableConcept,
        /// Journal identifiers include ISSN, ISO Abbreviation and NLMuniqueID.
        list identifier + add_identifier("identifier"): Identifier,
        /// Name of the database or title of the book or journal.
        optional title("title"): FhirString,
        optional publisher("publisher"): Reference => ["Organization"],
        /// Geographic location of the publisher.
        optional publisher_location("publisherLocation"): FhirString,
    }
}

fhir_record! {
    /// The specific issue in which the cited article resides.
    backbone PeriodicRelease("Citation.citedArtifact.publicationForm.periodicRelease")
        builder PeriodicReleaseBuilder
    {
        /// Describes the form of the medium cited (Internet or Print).
        optional cited_medium("citedMedium"): CodeableConcept,
        optional volume("volume"): FhirString,
        optional issue("issue"): FhirString,
        optional date_of_publication("dateOfPublication"): DateOfPublication,
    }
}

fhir_record! {
    /// Defining the date on which the issue of the journal was published.
    ///
    /// The parts are free text because journals publish with dates like "Spring 2021"; `date`
    /// carries the computable form when one exists.
    backbone DateOfPublication(
        "Citation.citedArtifact.publicationForm.periodicRelease.dateOfPublication"
    ) builder DateOfPublicationBuilder {
        optional date("date"): Date,
        optional year("year"): FhirString,
        optional month("month"): FhirString,
        optional day("day"): FhirString,
        /// Spring, Summer, Fall/Autumn, Winter.
        optional season("season"): FhirString,
        /// Text representation of the date of publication.
        optional text("text"): FhirString,
    }
}

impl PublicationForm {
    /// `first-last` when both pages are known, else whatever pagination is given.
    pub fn pages(&self) -> Option<String> {
        match (&self.first_page, &self.last_page) {
            (Some(first), Some(last)) => Some(format!("{first}-{last}")),
            _ => self
                .page_string
                .as_ref()
                .or(self.first_page.as_ref())
                .map(|pages| pages.as_str().to_owned()),
        }
    }
}

impl DateOfPublication {
    /// Human readable form: `text`, else `date`, else the free-text parts.
    pub fn display(&self) -> Option<String> {
        if let Some(text) = &self.text {
            return Some(text.as_str().to_owned());
        }
        if let Some(date) = &self.date {
            return Some(date.to_string());
        }
        let parts: Vec<&str> = [&self.year, &self.season, &self.month, &self.day]
            .into_iter()
            .filter_map(|part| part.as_ref().map(FhirString::as_str))
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string;
    use crate::validation::ValidationError;
    use crate::FhirError;

    #[test]
    fn builds_a_journal_issue() {
        let issue = PeriodicRelease::builder()
            .volume(string("17"))
            .issue(string("10"))
            .date_of_publication(
                DateOfPublication::builder()
                    .date(Date::parse("1905").expect("date"))
                    .year(string("1905"))
                    .build()
                    .expect("date of publication"),
            )
            .build()
            .expect("periodic release");
        let form = PublicationForm::builder()
            .periodic_release(issue)
            .first_page(string("891"))
            .last_page(string("921"))
            .build()
            .expect("publication form");
        assert_eq!(form.pages().as_deref(), Some("891-921"));
        assert_eq!(
            form.periodic_release()
                .and_then(|r| r.date_of_publication())
                .and_then(DateOfPublication::display)
                .as_deref(),
            Some("1905")
        );
    }

    #[test]
    fn seasonal_dates_display_their_parts() {
        let spring = DateOfPublication::builder()
            .year(string("2021"))
            .season(string("Spring"))
            .build()
            .expect("date of publication");
        assert_eq!(spring.display().as_deref(), Some("2021 Spring"));
    }

    #[test]
    fn publisher_must_be_an_organization() {
        let err = PublishedIn::builder()
            .title(string("Annalen der Physik"))
            .publisher(
                Reference::builder()
                    .reference(string("Practitioner/p1"))
                    .build()
                    .expect("reference"),
            )
            .build()
            .expect_err("wrong publisher kind");
        assert!(matches!(
            err,
            FhirError::Validation(ValidationError::ReferenceTarget { field: "publisher", .. })
        ));
    }

    #[test]
    fn empty_publication_form_is_rejected() {
        let err = PublicationForm::builder().build().expect_err("empty");
        assert!(matches!(
            err,
            FhirError::Validation(ValidationError::Empty {
                element: "Citation.citedArtifact.publicationForm"
            })
        ));
    }
}
