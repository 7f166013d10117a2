//! Full-text substring search over labels and identifiers.

use serde::Serialize;

use rico_ontology::{local_name, PropertyKind};

use crate::index::Navigator;

/// One search result row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    /// Entity IRI.
    pub iri: String,
    /// Display label.
    pub label: String,
    /// Short description (may be empty).
    pub description: String,
    /// Property kind for property hits; `None` for class hits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<PropertyKind>,
}

impl Navigator {
    /// Searches the class collection. The query matches case-insensitively
    /// against label, full IRI, and the IRI's trailing segment; an empty or
    /// whitespace query matches everything. Results are in label order.
    #[must_use]
    pub fn search_classes(&self, query: &str) -> Vec<SearchHit> {
        let needle = query.trim().to_lowercase();
        let mut hits: Vec<SearchHit> = self
            .classes()
            .iter()
            .filter(|class| matches(&needle, &class.label, &class.iri))
            .map(|class| SearchHit {
                iri: class.iri.clone(),
                label: class.label.clone(),
                description: class
                    .scope_notes
                    .first()
                    .or_else(|| class.comments.first())
                    .or_else(|| class.ric_cm_notes.first())
                    .cloned()
                    .unwrap_or_default(),
                kind: None,
            })
            .collect();
        sort_hits(&mut hits);
        hits
    }

    /// Searches the property collection, optionally restricted to one kind
    /// before matching. Same matching and ordering rules as class search.
    #[must_use]
    pub fn search_properties(&self, kind: Option<PropertyKind>, query: &str) -> Vec<SearchHit> {
        let needle = query.trim().to_lowercase();
        let mut hits: Vec<SearchHit> = self
            .properties()
            .iter()
            .filter(|property| kind.is_none_or(|k| property.kind == k))
            .filter(|property| matches(&needle, &property.label, &property.iri))
            .map(|property| SearchHit {
                iri: property.iri.clone(),
                label: property.label.clone(),
                description: property.description.clone(),
                kind: Some(property.kind),
            })
            .collect();
        sort_hits(&mut hits);
        hits
    }
}

fn matches(needle: &str, label: &str, iri: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let haystack = format!("{} {} {}", label, iri, local_name(iri)).to_lowercase();
    haystack.contains(needle)
}

fn sort_hits(hits: &mut [SearchHit]) {
    hits.sort_by(|a, b| a.label.to_lowercase().cmp(&b.label.to_lowercase()));
}
