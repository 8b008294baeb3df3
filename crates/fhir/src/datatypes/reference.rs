use super::Identifier;
use crate::validation::ReferenceTarget;
use fhir_types::{FhirString, Uri};

fhir_record! {
    /// A reference from one resource to another.
    ///
    /// The target may be given as a literal `reference` (`Organization/123`, an absolute URL,
    /// `#contained-id`), a logical `identifier`, or both.
    datatype Reference("Reference") builder ReferenceBuilder {
        /// Literal reference, relative, internal or absolute URL.
        optional reference("reference"): FhirString,
        /// Type the reference refers to, e.g. `Patient`.
        optional type_("type"): Uri,
        /// Logical reference, when the literal reference is not known.
        boxed identifier("identifier"): Identifier,
        /// Text alternative for the resource.
        optional display("display"): FhirString,
    }
}

impl Reference {
    /// Resource type of the target, if it can be told without resolving the reference.
    ///
    /// An explicit `type` wins (the last path segment of the URI, so both `Patient` and
    /// `http://hl7.org/fhir/StructureDefinition/Patient` give `Patient`); otherwise the type is
    /// read from a literal reference of the form `[base/]Type/id[/_history/version]`.
    pub fn target_kind(&self) -> Option<&str> {
        if let Some(kind) = &self.type_ {
            let uri = kind.as_str();
            return uri.rsplit('/').next().filter(|s| !s.is_empty());
        }
        self.reference
            .as_ref()
            .map(FhirString::as_str)
            .and_then(literal_target_kind)
    }

    /// `true` for references to a resource contained in the same resource (`#id`).
    pub fn is_contained(&self) -> bool {
        self.reference
            .as_ref()
            .is_some_and(|r| r.as_str().starts_with('#'))
    }
}

fn literal_target_kind(literal: &str) -> Option<&str> {
    if literal.starts_with('#') || literal.starts_with("urn:") {
        return None;
    }
    let path = literal.split(['?', '#']).next().unwrap_or(literal);
    let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if let Some(history) = segments.iter().position(|s| *s == "_history") {
        segments.truncate(history);
    }
    let kind = *segments.iter().rev().nth(1)?;
    kind.starts_with(|c: char| c.is_ascii_uppercase())
        .then_some(kind)
}

impl ReferenceTarget for Reference {
    fn reference_target(&self) -> Option<&str> {
        self.target_kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string;

    fn literal(text: &str) -> Reference {
        Reference::builder()
            .reference(string(text))
            .build()
            .expect("valid reference")
    }

    #[test]
    fn reads_kind_from_literal_references() {
        assert_eq!(literal("Organization/acme").target_kind(), Some("Organization"));
        assert_eq!(
            literal("http://example.org/fhir/Citation/c1/_history/2").target_kind(),
            Some("Citation")
        );
        assert_eq!(literal("Practitioner/p1?x=1").target_kind(), Some("Practitioner"));
    }

    #[test]
    fn unresolvable_literals_have_no_kind() {
        assert_eq!(literal("#org1").target_kind(), None);
        assert_eq!(literal("urn:uuid:4e8a1a3e-0000-0000-0000-000000000000").target_kind(), None);
        assert_eq!(literal("acme").target_kind(), None);
        assert_eq!(literal("http://example.org/docs/page").target_kind(), None);
        assert!(literal("#org1").is_contained());
    }

    #[test]
    fn explicit_type_wins() {
        let reference = Reference::builder()
            .reference(string("Organization/acme"))
            .type_(Uri::parse("Practitioner").expect("uri"))
            .build()
            .expect("valid reference");
        assert_eq!(reference.target_kind(), Some("Practitioner"));

        let canonical = Reference::builder()
            .type_(Uri::parse("http://hl7.org/fhir/StructureDefinition/Patient").expect("uri"))
            .display(string("Someone"))
            .build()
            .expect("valid reference");
        assert_eq!(canonical.target_kind(), Some("Patient"));
    }

    #[test]
    fn identifier_is_boxed_but_transparent() {
        let identifier = Identifier::builder().value(string("x")).build().expect("identifier");
        let reference = Reference::builder()
            .identifier(identifier.clone())
            .build()
            .expect("valid reference");
        assert_eq!(reference.identifier(), Some(&identifier));
        assert_eq!(reference.to_builder().build().expect("rebuild"), reference);
    }
}
