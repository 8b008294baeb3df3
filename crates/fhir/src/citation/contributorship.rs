use crate::datatypes::{Address, CodeableConcept, ContactPoint, HumanName, Identifier};
use fhir_types::{DateTime, FhirString, Markdown, PositiveInt};

fhir_record! {
    /// Attribution of authors and other contributors.
    backbone Contributorship("Citation.citedArtifact.contributorship")
        builder ContributorshipBuilder
    {
        /// Indicates if the list includes all authors and/or contributors.
        optional complete("complete"): bool,
        list entry + add_entry("entry"): Entry,
        /// Used to record a display of the author/contributor list without separate coding for
        /// each list member.
        list summary + add_summary("summary"): ContributorshipSummary,
    }
}

fhir_record! {
    /// An individual entity named in the author list or contributor list.
    backbone Entry("Citation.citedArtifact.contributorship.entry") builder EntryBuilder {
        /// A name associated with the person.
        optional name("name"): HumanName,
        optional initials("initials"): FhirString,
        /// Used for collective or corporate name as an author.
        optional collective_name("collectiveName"): FhirString,
        /// Author identifier, e.g. ORCID.
        list identifier + add_identifier("identifier"): Identifier,
        list affiliation_info + add_affiliation_info("affiliationInfo"): AffiliationInfo,
        list address + add_address("address"): Address,
        list telecom + add_telecom("telecom"): ContactPoint,
        /// The specific contribution.
        list contribution_type + add_contribution_type("contributionType"): CodeableConcept,
        /// The role of the contributor (e.g. author, editor, reviewer).
        optional role("role"): CodeableConcept,
        list contribution_instance + add_contribution_instance("contributionInstance"): ContributionInstance,
        /// Indication of which contributor is the corresponding contributor for the role.
        optional corresponding_contact("correspondingContact"): bool,
        /// Used to code order of authors.
        optional list_order("listOrder"): PositiveInt,
    }
}

fhir_record! {
    /// Organizational affiliation.
    backbone AffiliationInfo("Citation.citedArtifact.contributorship.entry.affiliationInfo")
        builder AffiliationInfoBuilder
    {
        /// Display for the organization.
        optional affiliation("affiliation"): FhirString,
        /// Role within the organization, such as professional title.
        optional role("role"): FhirString,
        list identifier + add_identifier("identifier"): Identifier,
    }
}

fhir_record! {
    /// Contributions with accounting for time or number.
    backbone ContributionInstance(
        "Citation.citedArtifact.contributorship.entry.contributionInstance"
    ) builder ContributionInstanceBuilder {
        /// The specific contribution.
        required type_("type"): CodeableConcept,
        optional time("time"): DateTime,
    }
}

fhir_record! {
    /// Used to record a display of the author/contributor list.
    backbone ContributorshipSummary("Citation.citedArtifact.contributorship.summary")
        builder ContributorshipSummaryBuilder
    {
        /// Such as author list, contributorship statement, funding statement.
        optional type_("type"): CodeableConcept,
        /// The format for the display string.
        optional style("style"): CodeableConcept,
        /// Used to code the producer or rule for creating the display string.
        optional source("source"): CodeableConcept,
        required value("value"): Markdown,
    }
}

impl Contributorship {
    /// Entries sorted by `listOrder`; entries without one keep their relative order at the end.
    pub fn ordered_entries(&self) -> Vec<&Entry> {
        let mut entries: Vec<&Entry> = self.entry.iter().collect();
        entries.sort_by_key(|entry| entry.list_order.map_or(u32::MAX, PositiveInt::get));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string;
    use crate::validation::ValidationError;
    use crate::FhirError;

    fn author(family: &str, order: Option<u32>) -> Entry {
        let mut builder = Entry::builder().name(
            HumanName::builder()
                .family(string(family))
                .build()
                .expect("name"),
        );
        if let Some(order) = order {
            builder = builder.list_order(PositiveInt::new(order).expect("positive"));
        }
        builder.build().expect("entry")
    }

    #[test]
    fn entries_sort_by_list_order() {
        let contributorship = Contributorship::builder()
            .complete(true)
            .entry([author("Podolsky", Some(2)), author("Anon", None), author("Einstein", Some(1))])
            .build()
            .expect("contributorship");
        let families: Vec<_> = contributorship
            .ordered_entries()
            .into_iter()
            .filter_map(|e| e.name().and_then(|n| n.family()))
            .map(FhirString::as_str)
            .collect();
        assert_eq!(families, ["Einstein", "Podolsky", "Anon"]);
    }

    #[test]
    fn contribution_instance_requires_type() {
        let err = ContributionInstance::builder()
            .time(DateTime::parse("2023-01-01").expect("dateTime"))
            .build()
            .expect_err("no type");
        assert!(matches!(
            err,
            FhirError::Validation(ValidationError::MissingRequired {
                element: "Citation.citedArtifact.contributorship.entry.contributionInstance",
                field: "type"
            })
        ));
    }

    #[test]
    fn summary_value_is_required() {
        let err = ContributorshipSummary::builder()
            .style(CodeableConcept::from_text("Vancouver").expect("concept"))
            .build()
            .expect_err("no value");
        assert_eq!(
            match err {
                FhirError::Validation(e) => e.field(),
                _ => None,
            },
            Some("value")
        );
    }
}
