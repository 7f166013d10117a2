//! Transitive closure computation over hierarchy edges.
//!
//! The underlying data is not guaranteed acyclic, so traversal uses an
//! explicit stack and a visited set: cycles terminate instead of looping,
//! and large hierarchies cannot overflow the call stack. The starting
//! identifier is never part of its own closure, cycle or not — only strict
//! ancestors/descendants are returned.

use std::collections::HashSet;

use crate::index::Navigator;

/// Which hierarchy a closure runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// `rdfs:subClassOf` edges between classes.
    ClassHierarchy,
    /// `rdfs:subPropertyOf` edges between properties.
    PropertyHierarchy,
}

impl Navigator {
    /// Returns the strict transitive ancestors of `iri` over the given
    /// hierarchy, in visit order. Dangling edges terminate silently;
    /// cycles are finite.
    #[must_use]
    pub fn ancestors_of(&self, iri: &str, kind: EdgeKind) -> Vec<String> {
        match kind {
            EdgeKind::ClassHierarchy => self.traverse(iri, |node| {
                self.lookup_class(node)
                    .map_or(&[], |class| class.superclasses.as_slice())
            }),
            EdgeKind::PropertyHierarchy => self.traverse(iri, |node| {
                self.property_by_iri(node)
                    .map_or(&[], |property| property.superproperties.as_slice())
            }),
        }
    }

    /// Returns the strict transitive descendants of `iri` over the given
    /// hierarchy, in visit order.
    #[must_use]
    pub fn descendants_of(&self, iri: &str, kind: EdgeKind) -> Vec<String> {
        match kind {
            EdgeKind::ClassHierarchy => self.traverse(iri, |node| self.direct_subclasses(node)),
            EdgeKind::PropertyHierarchy => {
                self.traverse(iri, |node| self.direct_subproperties(node))
            }
        }
    }

    fn traverse<'a>(&'a self, start: &str, edges: impl Fn(&str) -> &'a [String]) -> Vec<String> {
        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(start);
        let mut out: Vec<String> = Vec::new();
        let mut stack: Vec<&str> = vec![start];
        while let Some(node) = stack.pop() {
            for next in edges(node) {
                if visited.insert(next) {
                    out.push(next.clone());
                    stack.push(next);
                }
            }
        }
        out
    }
}
