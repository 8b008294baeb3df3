use super::PathStack;
use crate::element::Element;
use crate::visit::{Node, Visitor};

struct ModifierCheck<'k> {
    known_urls: &'k [&'k str],
    stack: PathStack,
    unrecognized: Vec<String>,
}

impl<'a> Visitor<'a> for ModifierCheck<'_> {
    fn visit_start(&mut self, name: &str, index: Option<usize>, node: Node<'a>) {
        self.stack.enter(name, index);
        for (i, extension) in node.modifier_extension().iter().enumerate() {
            if !self.known_urls.contains(&extension.url().as_str()) {
                self.unrecognized
                    .push(self.stack.child("modifierExtension", Some(i)));
            }
        }
    }

    fn visit_end(&mut self, _name: &str, _index: Option<usize>, _node: Node<'a>) {
        self.stack.leave();
    }
}

/// Paths of modifier extensions anywhere under `root` whose URL is not in `known_urls`.
///
/// A modifier extension changes the meaning of the record holding it, so a non-empty result
/// means the tree must not be processed as if the extension were absent.
pub fn unrecognized_modifier_extensions<E>(root: &E, known_urls: &[&str]) -> Vec<String>
where
    E: Element + ?Sized,
{
    let mut check = ModifierCheck {
        known_urls,
        stack: PathStack::default(),
        unrecognized: Vec::new(),
    };
    root.walk(root.element_name(), None, &mut check);
    if !check.unrecognized.is_empty() {
        tracing::debug!(
            element = root.element_name(),
            count = check.unrecognized.len(),
            "unrecognized modifier extensions"
        );
    }
    check.unrecognized
}
