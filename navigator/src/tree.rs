//! Browsable class hierarchy tree.
//!
//! The class hierarchy is a multi-parent DAG, not a strict tree: a class
//! with two known parents appears as a child under both. Rendering works by
//! repeated child membership rather than by duplicating identity — every
//! node keeps its single IRI.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::index::Navigator;

/// One class in the hierarchy display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// Class IRI.
    pub iri: String,
    /// Display label.
    pub label: String,
    /// Superclass IRIs that are themselves classes in the current
    /// collection. Dangling references are excluded here.
    pub parent_iris: Vec<String>,
}

/// The derived hierarchy: roots plus a child list per parent IRI, all in
/// case-insensitive label order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyTree {
    roots: Vec<TreeNode>,
    children_by_parent: HashMap<String, Vec<TreeNode>>,
}

impl HierarchyTree {
    /// Nodes without any known parent, in label order.
    #[must_use]
    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    /// Children of the given parent IRI, in label order. Unknown parents
    /// have no children.
    #[must_use]
    pub fn children_of(&self, parent_iri: &str) -> &[TreeNode] {
        self.children_by_parent
            .get(parent_iri)
            .map_or(&[], Vec::as_slice)
    }

    /// Total number of parent-child edges plus roots; a class with two
    /// known parents is counted once per edge.
    #[must_use]
    pub fn placement_count(&self) -> usize {
        self.roots.len()
            + self
                .children_by_parent
                .values()
                .map(Vec::len)
                .sum::<usize>()
    }
}

impl Navigator {
    /// Derives the hierarchy tree for the loaded class collection.
    #[must_use]
    pub fn hierarchy_tree(&self) -> HierarchyTree {
        let known: HashSet<&str> = self.classes().iter().map(|c| c.iri.as_str()).collect();

        // The class collection is already label-sorted, so iterating it in
        // order yields label-ordered roots and child lists.
        let mut roots = Vec::new();
        let mut children_by_parent: HashMap<String, Vec<TreeNode>> = HashMap::new();
        for class in self.classes() {
            let parent_iris: Vec<String> = class
                .superclasses
                .iter()
                .filter(|parent| known.contains(parent.as_str()))
                .cloned()
                .collect();
            let node = TreeNode {
                iri: class.iri.clone(),
                label: class.label.clone(),
                parent_iris,
            };
            if node.parent_iris.is_empty() {
                roots.push(node);
            } else {
                for parent in node.parent_iris.clone() {
                    children_by_parent.entry(parent).or_default().push(node.clone());
                }
            }
        }

        HierarchyTree {
            roots,
            children_by_parent,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::test_support::{class, snapshot};
    use crate::Navigator;

    fn navigator() -> Navigator {
        Navigator::new(snapshot(
            vec![
                class("http://ex/Thing", "Thing", &[]),
                class("http://ex/Record", "Record", &["http://ex/Thing"]),
                class(
                    "http://ex/RecordPart",
                    "Record Part",
                    &["http://ex/Record", "http://ex/Thing"],
                ),
                class("http://ex/Orphan", "Orphan", &["http://ex/unknown"]),
            ],
            vec![],
        ))
    }

    #[test]
    fn classes_with_no_known_parent_become_roots() {
        let tree = navigator().hierarchy_tree();
        let roots: Vec<&str> = tree.roots().iter().map(|n| n.label.as_str()).collect();
        // Orphan's only parent is dangling, so it is a root too.
        assert_eq!(roots, vec!["Orphan", "Thing"]);
    }

    #[test]
    fn multi_parent_classes_appear_under_each_parent() {
        let tree = navigator().hierarchy_tree();
        let under_thing: Vec<&str> = tree
            .children_of("http://ex/Thing")
            .iter()
            .map(|n| n.iri.as_str())
            .collect();
        assert_eq!(under_thing, vec!["http://ex/Record", "http://ex/RecordPart"]);
        let under_record: Vec<&str> = tree
            .children_of("http://ex/Record")
            .iter()
            .map(|n| n.iri.as_str())
            .collect();
        assert_eq!(under_record, vec!["http://ex/RecordPart"]);
    }

    #[test]
    fn dangling_parents_are_filtered_from_parent_iris() {
        let tree = navigator().hierarchy_tree();
        let orphan = tree
            .roots()
            .iter()
            .find(|n| n.iri == "http://ex/Orphan")
            .unwrap();
        assert!(orphan.parent_iris.is_empty());
    }

    #[test]
    fn sibling_order_is_case_insensitive_label_order() {
        let navigator = Navigator::new(snapshot(
            vec![
                class("http://ex/root", "root", &[]),
                class("http://ex/b", "beta", &["http://ex/root"]),
                class("http://ex/A", "Alpha", &["http://ex/root"]),
            ],
            vec![],
        ));
        let tree = navigator.hierarchy_tree();
        let children: Vec<&str> = tree
            .children_of("http://ex/root")
            .iter()
            .map(|n| n.label.as_str())
            .collect();
        assert_eq!(children, vec!["Alpha", "beta"]);
    }

    #[test]
    fn every_class_is_placed_once_per_valid_parent_edge() {
        let tree = navigator().hierarchy_tree();
        // Thing + Orphan as roots, Record under Thing, RecordPart under
        // Thing and under Record: five placements for four classes.
        assert_eq!(tree.placement_count(), 5);
    }
}
