use crate::{FhirError, FhirResult};
use fhir_types::{Code, FhirString, Uri};

fhir_record! {
    /// A reference to a code defined by a terminology system.
    datatype Coding("Coding") builder CodingBuilder {
        /// Identity of the terminology system.
        optional system("system"): Uri,
        optional version("version"): FhirString,
        /// Symbol in syntax defined by the system.
        optional code("code"): Code,
        /// Representation defined by the system.
        optional display("display"): FhirString,
        /// If this coding was chosen directly by the user.
        optional user_selected("userSelected"): bool,
    }
}

fhir_record! {
    /// A concept that may be defined by one or more codes, plus a plain text rendering.
    datatype CodeableConcept("CodeableConcept") builder CodeableConceptBuilder {
        list coding + add_coding("coding"): Coding,
        /// Plain text representation of the concept.
        optional text("text"): FhirString,
    }
}

impl Coding {
    /// `true` when both codings name the same system and code.
    pub fn same_code(&self, other: &Coding) -> bool {
        self.code.is_some() && self.system == other.system && self.code == other.code
    }
}

impl CodeableConcept {
    /// A concept holding a single coding, with no text.
    pub fn from_coding(coding: Coding) -> FhirResult<Self> {
        Self::builder().add_coding(coding).build()
    }

    /// A text-only concept. Fails when `text` is blank.
    pub fn from_text(text: &str) -> FhirResult<Self> {
        Self::builder().text(FhirString::parse(text)?).build()
    }

    /// `true` if any coding matches `system` and `code`.
    pub fn has_coding(&self, system: &str, code: &str) -> bool {
        self.coding.iter().any(|c| {
            c.system.as_ref().map(Uri::as_str) == Some(system)
                && c.code.as_ref().map(Code::as_str) == Some(code)
        })
    }
}

impl TryFrom<Coding> for CodeableConcept {
    type Error = FhirError;

    fn try_from(coding: Coding) -> FhirResult<Self> {
        Self::from_coding(coding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string;
    use crate::validation::ValidationError;

    fn coding(system: &str, code: &str) -> Coding {
        Coding::builder()
            .system(Uri::parse(system).expect("uri"))
            .code(Code::parse(code).expect("code"))
            .build()
            .expect("valid coding")
    }

    #[test]
    fn round_trips_through_builder() {
        let original = CodeableConcept::builder()
            .add_coding(coding("http://example.org/cs", "a"))
            .text(string("A"))
            .build()
            .expect("valid concept");
        let copy = original.to_builder().build().expect("rebuild");
        assert_eq!(copy, original);
        assert_eq!(copy.hash_code(), original.hash_code());
    }

    #[test]
    fn replace_setter_discards_earlier_entries() {
        let concept = CodeableConcept::builder()
            .add_coding(coding("http://example.org/cs", "a"))
            .coding([coding("http://example.org/cs", "b"), coding("http://example.org/cs", "c")])
            .add_coding(coding("http://example.org/cs", "d"))
            .build()
            .expect("valid concept");
        let codes: Vec<_> = concept
            .coding()
            .iter()
            .filter_map(|c| c.code().map(Code::as_str))
            .collect();
        assert_eq!(codes, ["b", "c", "d"]);
    }

    #[test]
    fn empty_concept_is_rejected() {
        let err = CodeableConcept::builder().build().expect_err("empty");
        assert!(matches!(
            err,
            FhirError::Validation(ValidationError::Empty {
                element: "CodeableConcept"
            })
        ));
    }

    #[test]
    fn convenience_constructors_validate() {
        let text_only = CodeableConcept::from_text(" Free text ").expect("text only");
        assert_eq!(text_only.text().map(FhirString::as_str), Some("Free text"));

        let concept = CodeableConcept::try_from(coding("http://example.org/cs", "x"))
            .expect("coded concept");
        assert!(concept.has_coding("http://example.org/cs", "x"));
        assert!(!concept.has_coding("http://example.org/other", "x"));
    }

    #[test]
    fn blank_text_is_never_content() {
        let err = CodeableConcept::from_text("   ").expect_err("blank text");
        assert!(matches!(err, FhirError::InvalidPrimitive(_)));

        let err = FhirString::parse("").expect_err("empty display");
        assert_eq!(err, fhir_types::TypeError::Empty { kind: "string" });

        let concept = CodeableConcept::from_text("Shown").expect("text");
        let coding = Coding::builder()
            .display(FhirString::parse("  Shown  ").expect("trimmed"))
            .build()
            .expect("display is content");
        assert_eq!(coding.display(), concept.text());
    }

    #[test]
    fn same_code_ignores_display() {
        let a = coding("http://example.org/cs", "x");
        let b = a.to_builder().display(string("Shown")).build().expect("valid");
        assert_ne!(a, b);
        assert!(a.same_code(&b));
    }
}
