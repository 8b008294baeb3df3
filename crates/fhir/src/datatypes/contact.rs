use super::Period;
use crate::validation::ValidationError;
use fhir_types::{Code, FhirString, PositiveInt};

fhir_record! {
    /// Details for all kinds of technology-mediated contact points (phone, email, ...).
    datatype ContactPoint("ContactPoint") builder ContactPointBuilder check contact_point_rules {
        /// phone | fax | email | pager | url | sms | other
        optional system("system"): Code,
        /// The actual contact point details.
        optional value("value"): FhirString,
        /// home | work | temp | old | mobile
        optional use_("use"): Code,
        /// Preference order (1 = highest).
        optional rank("rank"): PositiveInt,
        optional period("period"): Period,
    }
}

fhir_record! {
    /// Contact information for a person or organization.
    datatype ContactDetail("ContactDetail") builder ContactDetailBuilder {
        optional name("name"): FhirString,
        list telecom + add_telecom("telecom"): ContactPoint,
    }
}

fhir_record! {
    /// A human's name, with the ability to identify parts and usage.
    datatype HumanName("HumanName") builder HumanNameBuilder {
        /// usual | official | temp | nickname | anonymous | old | maiden
        optional use_("use"): Code,
        /// Text representation of the full name.
        optional text("text"): FhirString,
        optional family("family"): FhirString,
        list given + add_given("given"): FhirString,
        list prefix + add_prefix("prefix"): FhirString,
        list suffix + add_suffix("suffix"): FhirString,
        optional period("period"): Period,
    }
}

fhir_record! {
    /// A postal or physical address.
    datatype Address("Address") builder AddressBuilder {
        /// home | work | temp | old | billing
        optional use_("use"): Code,
        /// postal | physical | both
        optional type_("type"): Code,
        optional text("text"): FhirString,
        /// Street name, number, direction & P.O. Box etc.
        list line + add_line("line"): FhirString,
        optional city("city"): FhirString,
        optional district("district"): FhirString,
        /// Sub-unit of country (abbreviations ok).
        optional state("state"): FhirString,
        optional postal_code("postalCode"): FhirString,
        optional country("country"): FhirString,
        optional period("period"): Period,
    }
}

/// cpt-2: a system is required if a value is provided.
fn contact_point_rules(contact: &ContactPoint) -> Result<(), ValidationError> {
    if contact.value.is_some() && contact.system.is_none() {
        return Err(ValidationError::invariant(
            ContactPoint::ELEMENT,
            "cpt-2",
            "a value requires a system",
        ));
    }
    Ok(())
}

impl HumanName {
    /// The name as it would be displayed: `text` if given, otherwise the parts joined.
    pub fn display(&self) -> String {
        if let Some(text) = &self.text {
            return text.as_str().to_owned();
        }
        self.prefix
            .iter()
            .chain(&self.given)
            .chain(&self.family)
            .chain(&self.suffix)
            .map(FhirString::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string;
    use crate::FhirError;

    #[test]
    fn contact_value_needs_system() {
        let err = ContactPoint::builder()
            .value(string("editor@example.org"))
            .build()
            .expect_err("no system");
        assert!(matches!(
            err,
            FhirError::Validation(ValidationError::Invariant { key: "cpt-2", .. })
        ));

        let email = ContactPoint::builder()
            .system(Code::parse("email").expect("code"))
            .value(string("editor@example.org"))
            .rank(PositiveInt::new(1).expect("rank"))
            .build()
            .expect("valid contact point");
        let detail = ContactDetail::builder()
            .name(string("Editorial office"))
            .add_telecom(email)
            .build()
            .expect("valid detail");
        assert_eq!(detail.telecom().len(), 1);
    }

    #[test]
    fn name_parts_keep_insertion_order() {
        let name = HumanName::builder()
            .family(string("Curie"))
            .add_given(string("Marie"))
            .add_given(string("Salomea"))
            .add_prefix(string("Dr."))
            .build()
            .expect("valid name");
        assert_eq!(name.given(), ["Marie", "Salomea"]);
        assert_eq!(name.display(), "Dr. Marie Salomea Curie");
    }

    #[test]
    fn address_lines_may_repeat() {
        let address = Address::builder()
            .line([string("1 Main St"), string("1 Main St")])
            .city(string("Springfield"))
            .build()
            .expect("valid address");
        assert_eq!(address.line().len(), 2);
        assert_eq!(address.postal_code(), None);
    }
}
