//! Ready-made visitors.

mod counter;
mod modifiers;
mod paths;
mod references;

pub use counter::ElementCounter;
pub use modifiers::unrecognized_modifier_extensions;
pub use paths::PathCollector;
pub use references::{IndexedReference, ReferenceIndex};

/// Location of the node currently being visited, as a list of path segments.
#[derive(Debug, Default)]
pub(crate) struct PathStack {
    segments: Vec<String>,
}

impl PathStack {
    pub(crate) fn enter(&mut self, name: &str, index: Option<usize>) {
        self.segments.push(segment(name, index));
    }

    pub(crate) fn leave(&mut self) {
        self.segments.pop();
    }

    pub(crate) fn current(&self) -> String {
        self.segments.join(".")
    }

    /// Path of a child of the current node.
    pub(crate) fn child(&self, name: &str, index: Option<usize>) -> String {
        let child = segment(name, index);
        if self.segments.is_empty() {
            child
        } else {
            format!("{}.{child}", self.current())
        }
    }
}

fn segment(name: &str, index: Option<usize>) -> String {
    match index {
        Some(i) => format!("{name}[{i}]"),
        None => name.to_owned(),
    }
}
