use super::PathStack;
use crate::value::ValueRef;
use crate::visit::{Node, Visitor};

/// Collects the location of every record and primitive value, in traversal order.
///
/// Paths are written FHIRPath style with list positions, e.g.
/// `Citation.citedArtifact.title[0].text`.
#[derive(Debug, Default)]
pub struct PathCollector {
    stack: PathStack,
    paths: Vec<String>,
}

impl PathCollector {
    /// An empty collector, ready to be passed to `accept`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths collected so far, in traversal order.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Consumes the collector, returning its paths.
    pub fn into_paths(self) -> Vec<String> {
        self.paths
    }
}

impl<'a> Visitor<'a> for PathCollector {
    fn visit_start(&mut self, name: &str, index: Option<usize>, _node: Node<'a>) {
        self.stack.enter(name, index);
        self.paths.push(self.stack.current());
    }

    fn visit_end(&mut self, _name: &str, _index: Option<usize>, _node: Node<'a>) {
        self.stack.leave();
    }

    fn visit_value(&mut self, name: &str, index: Option<usize>, _value: ValueRef<'a>) {
        self.paths.push(self.stack.child(name, index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::citation::{CitedArtifact, Title};
    use crate::{Citation, PublicationStatus};
    use fhir_types::Markdown;

    #[test]
    fn paths_follow_declaration_order_with_indices() {
        let title = |text: &str| {
            Title::builder()
                .text(Markdown::parse(text).expect("markdown"))
                .build()
                .expect("title")
        };
        let citation = Citation::builder()
            .status(PublicationStatus::Draft)
            .cited_artifact(
                CitedArtifact::builder()
                    .add_title(title("First"))
                    .add_title(title("Second"))
                    .build()
                    .expect("artifact"),
            )
            .build()
            .expect("citation");

        let mut collector = PathCollector::new();
        citation.accept(&mut collector);

        assert_eq!(
            collector.into_paths(),
            [
                "Citation",
                "Citation.status",
                "Citation.citedArtifact",
                "Citation.citedArtifact.title[0]",
                "Citation.citedArtifact.title[0].text",
                "Citation.citedArtifact.title[1]",
                "Citation.citedArtifact.title[1].text",
            ]
        );
    }
}
