use super::{CodeableConcept, Period, Reference};
use fhir_types::{Code, FhirString, Uri};

fhir_record! {
    /// A business identifier: a value that is unique within the namespace named by `system`.
    datatype Identifier("Identifier") builder IdentifierBuilder {
        /// usual | official | temp | secondary | old
        optional use_("use"): Code,
        optional type_("type"): CodeableConcept,
        /// The namespace for the identifier value.
        optional system("system"): Uri,
        optional value("value"): FhirString,
        /// Time period when the identifier was valid for use.
        optional period("period"): Period,
        /// Organization that issued the identifier.
        optional assigner("assigner"): Reference => ["Organization"],
    }
}

impl Identifier {
    /// `system|value`, the usual search token form.
    pub fn token(&self) -> Option<String> {
        let value = self.value.as_ref()?;
        Some(match &self.system {
            Some(system) => format!("{system}|{value}"),
            None => value.as_str().to_owned(),
        })
    }
}
