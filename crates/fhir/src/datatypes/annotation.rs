use crate::value::{Value, ValueKind};
use fhir_types::{DateTime, Markdown};

fhir_record! {
    /// A text note with optional attribution.
    datatype Annotation("Annotation") builder AnnotationBuilder {
        /// Individual responsible for the annotation: a Reference or a plain name.
        optional author("author"): Value [ValueKind::Reference, ValueKind::String]
            => ["Practitioner", "Patient", "RelatedPerson", "Organization"],
        /// When the annotation was made.
        optional time("time"): DateTime,
        required text("text"): Markdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string;
    use crate::datatypes::Reference;
    use crate::validation::ValidationError;
    use crate::FhirError;

    fn note() -> Markdown {
        Markdown::parse("Retracted by the journal.").expect("markdown")
    }

    #[test]
    fn author_may_be_a_name_or_a_reference() {
        let by_name = Annotation::builder()
            .author(string("J. Smith"))
            .text(note())
            .build()
            .expect("string author");
        assert_eq!(by_name.author().and_then(Value::as_str), Some("J. Smith"));

        let by_reference = Annotation::builder()
            .author(
                Reference::builder()
                    .reference(string("Practitioner/p1"))
                    .build()
                    .expect("reference"),
            )
            .text(note())
            .build()
            .expect("reference author");
        assert!(by_reference.author().and_then(Value::as_reference).is_some());
    }

    #[test]
    fn author_type_and_target_are_checked() {
        let err = Annotation::builder()
            .author(true)
            .text(note())
            .build()
            .expect_err("boolean author");
        assert!(matches!(
            err,
            FhirError::Validation(ValidationError::ChoiceType { field: "author", .. })
        ));

        let err = Annotation::builder()
            .author(
                Reference::builder()
                    .reference(string("Citation/c1"))
                    .build()
                    .expect("reference"),
            )
            .text(note())
            .build()
            .expect_err("citation author");
        assert!(matches!(
            err,
            FhirError::Validation(ValidationError::ReferenceTarget { field: "author", .. })
        ));
    }

    #[test]
    fn text_is_required() {
        let err = Annotation::builder().author(string("x")).build().expect_err("no text");
        assert!(matches!(
            err,
            FhirError::Validation(ValidationError::MissingRequired { field: "text", .. })
        ));
    }
}
