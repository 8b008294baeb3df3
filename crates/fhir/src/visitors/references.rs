use super::PathStack;
use crate::datatypes::Reference;
use crate::visit::{Node, Visitor};

/// A reference found in a record tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedReference<'a> {
    /// Where the reference sits, e.g. `Citation.relatesTo[0].target`.
    pub path: String,
    pub reference: &'a Reference,
}

impl<'a> IndexedReference<'a> {
    /// Resource type of the target, when it can be told locally.
    pub fn target_kind(&self) -> Option<&'a str> {
        self.reference.target_kind()
    }
}

/// Collects every `Reference` in a tree, including those held by choice fields.
#[derive(Debug, Default)]
pub struct ReferenceIndex<'a> {
    stack: PathStack,
    references: Vec<IndexedReference<'a>>,
}

impl<'a> ReferenceIndex<'a> {
    /// An empty index, ready to be passed to `accept`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every reference found, in traversal order.
    pub fn references(&self) -> &[IndexedReference<'a>] {
        &self.references
    }

    /// References whose target is of the given resource type.
    pub fn to_kind<'s>(&'s self, kind: &'s str) -> impl Iterator<Item = &'s IndexedReference<'a>> {
        self.references
            .iter()
            .filter(move |r| r.target_kind() == Some(kind))
    }

    /// Consumes the index, returning its entries.
    pub fn into_references(self) -> Vec<IndexedReference<'a>> {
        self.references
    }
}

impl<'a> Visitor<'a> for ReferenceIndex<'a> {
    fn visit_start(&mut self, name: &str, index: Option<usize>, node: Node<'a>) {
        self.stack.enter(name, index);
        if let Some(reference) = node.as_reference() {
            self.references.push(IndexedReference {
                path: self.stack.current(),
                reference,
            });
        }
    }

    fn visit_end(&mut self, _name: &str, _index: Option<usize>, _node: Node<'a>) {
        self.stack.leave();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string;
    use crate::citation::{CitedArtifact, RelatesTo, Version};
    use crate::datatypes::{CodeableConcept, Identifier};
    use crate::{Citation, PublicationStatus};

    fn reference(literal: &str) -> Reference {
        Reference::builder()
            .reference(string(literal))
            .build()
            .expect("reference")
    }

    #[test]
    fn finds_references_at_every_depth() {
        let citation = Citation::builder()
            .status(PublicationStatus::Active)
            .add_identifier(
                Identifier::builder()
                    .value(string("123"))
                    .assigner(reference("Organization/nlm"))
                    .build()
                    .expect("identifier"),
            )
            .add_relates_to(
                RelatesTo::builder()
                    .relationship_type(CodeableConcept::from_text("replaces").expect("concept"))
                    .target(reference("Citation/old"))
                    .build()
                    .expect("relates to"),
            )
            .cited_artifact(
                CitedArtifact::builder()
                    .version(
                        Version::builder()
                            .value(string("2"))
                            .base_citation(reference("Citation/v1"))
                            .build()
                            .expect("version"),
                    )
                    .build()
                    .expect("artifact"),
            )
            .build()
            .expect("citation");

        let mut index = ReferenceIndex::new();
        citation.accept(&mut index);

        let found: Vec<(&str, Option<&str>)> = index
            .references()
            .iter()
            .map(|r| (r.path.as_str(), r.target_kind()))
            .collect();
        assert_eq!(
            found,
            [
                ("Citation.identifier[0].assigner", Some("Organization")),
                ("Citation.relatesTo[0].target", Some("Citation")),
                ("Citation.citedArtifact.version.baseCitation", Some("Citation")),
            ]
        );
        assert_eq!(index.to_kind("Citation").count(), 2);
    }
}
