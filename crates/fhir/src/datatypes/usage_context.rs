use super::Coding;
use crate::value::{Value, ValueKind};

fhir_record! {
    /// The context a resource is intended to be used in (gender, age, focus, venue, ...).
    datatype UsageContext("UsageContext") builder UsageContextBuilder {
        /// Type of context being specified.
        required code("code"): Coding,
        /// Value that defines the context.
        required value("value"): Value [
            ValueKind::CodeableConcept,
            ValueKind::Quantity,
            ValueKind::Range,
            ValueKind::Reference,
        ] => [
            "PlanDefinition",
            "ResearchStudy",
            "InsurancePlan",
            "HealthcareService",
            "Group",
            "Location",
            "Organization",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string;
    use crate::datatypes::CodeableConcept;
    use crate::validation::ValidationError;
    use crate::FhirError;
    use fhir_types::{Code, Uri};

    fn focus() -> Coding {
        Coding::builder()
            .system(Uri::parse("http://terminology.hl7.org/CodeSystem/usage-context-type").expect("uri"))
            .code(Code::parse("focus").expect("code"))
            .build()
            .expect("coding")
    }

    #[test]
    fn accepts_a_concept_value() {
        let context = UsageContext::builder()
            .code(focus())
            .value(CodeableConcept::from_text("COVID-19").expect("concept"))
            .build()
            .expect("valid usage context");
        assert_eq!(context.value().kind(), ValueKind::CodeableConcept);
    }

    #[test]
    fn rejects_values_outside_the_choice() {
        let err = UsageContext::builder()
            .code(focus())
            .value(string("COVID-19"))
            .build()
            .expect_err("string is not allowed");
        match err {
            FhirError::Validation(ValidationError::ChoiceType {
                element,
                field,
                found,
                ..
            }) => {
                assert_eq!(element, "UsageContext");
                assert_eq!(field, "value");
                assert_eq!(found, ValueKind::String);
            }
            other => panic!("expected ChoiceType, got {other:?}"),
        }
    }
}
