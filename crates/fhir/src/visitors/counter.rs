use crate::value::ValueRef;
use crate::visit::{Node, Visitor};
use std::collections::BTreeMap;

/// Counts records per element type, plus primitive values.
#[derive(Debug, Default)]
pub struct ElementCounter {
    elements: BTreeMap<&'static str, usize>,
    values: usize,
}

impl ElementCounter {
    /// A counter with every count at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record counts keyed by element path, in name order.
    pub fn counts(&self) -> &BTreeMap<&'static str, usize> {
        &self.elements
    }

    /// Number of records of `element`; `0` when none were seen.
    pub fn count(&self, element: &str) -> usize {
        self.elements.get(element).copied().unwrap_or(0)
    }

    /// Number of records of any type.
    pub fn total_elements(&self) -> usize {
        self.elements.values().sum()
    }

    /// Number of primitive values.
    pub fn values(&self) -> usize {
        self.values
    }
}

impl<'a> Visitor<'a> for ElementCounter {
    fn visit_start(&mut self, _name: &str, _index: Option<usize>, node: Node<'a>) {
        *self.elements.entry(node.element_name()).or_default() += 1;
    }

    fn visit_value(&mut self, _name: &str, _index: Option<usize>, _value: ValueRef<'a>) {
        self.values += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string;
    use crate::datatypes::{CodeableConcept, Coding};
    use fhir_types::Code;

    #[test]
    fn counts_records_and_values() {
        let concept = CodeableConcept::builder()
            .coding([
                Coding::builder().code(Code::parse("a").expect("code")).build().expect("coding"),
                Coding::builder().code(Code::parse("b").expect("code")).build().expect("coding"),
            ])
            .text(string("AB"))
            .build()
            .expect("concept");

        let mut counter = ElementCounter::new();
        concept.accept(&mut counter);

        assert_eq!(counter.count("Coding"), 2);
        assert_eq!(counter.count("CodeableConcept"), 1);
        assert_eq!(counter.count("Citation"), 0);
        assert_eq!(counter.total_elements(), 3);
        assert_eq!(counter.values(), 3);
    }
}
