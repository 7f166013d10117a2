//! Detail view assembly: joins a class or property to everything that
//! references it.
//!
//! Dangling references stay renderable through stub references (IRI plus a
//! synthesized trailing-segment label). A property applies to a class when
//! the class or any of its ancestors appears in the property's domain (or
//! range) set — applicability is inherited down the class hierarchy, and
//! each matched row records which ancestor actually matched.

use std::collections::HashSet;

use serde::Serialize;

use rico_ontology::{local_name, PropertyEntity, PropertyKind};

use crate::closure::EdgeKind;
use crate::error::QueryError;
use crate::index::Navigator;

/// A resolved display reference to a class, or a stub for a dangling IRI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRef {
    /// Class IRI.
    pub iri: String,
    /// Resolved label, or the IRI's trailing segment for stubs.
    pub label: String,
    /// RiC-CM notes of the resolved class; empty for stubs.
    pub ric_cm_notes: Vec<String>,
}

/// A compact property reference used in hierarchy listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySummary {
    /// Property IRI.
    pub iri: String,
    /// Display label.
    pub label: String,
    /// First comment, or empty.
    pub description: String,
    /// Data or object property.
    pub kind: PropertyKind,
}

/// Which side of a property matched the requested class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSide {
    /// The class (or an ancestor) appears in the property's domain set.
    Domain,
    /// The class (or an ancestor) appears in the property's range set.
    Range,
}

/// One row in a class's applicable-property tables.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRow {
    /// Property IRI.
    pub iri: String,
    /// Property label.
    pub label: String,
    /// Data or object property.
    pub kind: PropertyKind,
    /// Side on which the property matched.
    pub matched_by: MatchSide,
    /// IRI of the class that actually matched (the class itself or one of
    /// its ancestors).
    pub via_class_iri: String,
    /// Label of the matching class.
    pub via_class_label: String,
    /// Classes on the opposite side (ranges for a domain match, domains
    /// for a range match), label-ordered, deduplicated.
    pub related: Vec<ClassRef>,
}

/// Per-column substring filters over a property-row table. Empty fields
/// pass everything.
#[derive(Debug, Clone, Default)]
pub struct RowFilter {
    /// Matches against the property label.
    pub property: String,
    /// Matches against the property kind name.
    pub kind: String,
    /// Matches against the via-class label.
    pub via_class: String,
    /// Matches against the joined labels of the related classes.
    pub related: String,
}

impl PropertyRow {
    /// Returns true if every filter column matches, case-insensitively.
    #[must_use]
    pub fn matches(&self, filter: &RowFilter) -> bool {
        let related = self
            .related
            .iter()
            .map(|r| r.label.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        contains(&self.label, &filter.property)
            && contains(self.kind.as_str(), &filter.kind)
            && contains(&self.via_class_label, &filter.via_class)
            && contains(&related, &filter.related)
    }
}

fn contains(value: &str, query: &str) -> bool {
    value
        .to_lowercase()
        .contains(&query.trim().to_lowercase())
}

/// The assembled detail view for one class.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDetails {
    /// The class itself, with its best description.
    pub entity: EntitySummary,
    /// Merged scope notes and comments, deduplicated, in first-appearance
    /// order.
    pub scope_notes: Vec<String>,
    /// RiC-CM corresponding-component notes.
    pub ric_cm_notes: Vec<String>,
    /// Full transitive superclass closure, resolved, label-ordered.
    pub superclasses: Vec<ClassRef>,
    /// Full transitive subclass closure, resolved, label-ordered.
    pub subclasses: Vec<ClassRef>,
    /// Properties applicable through the domain side.
    pub properties_by_domain: Vec<PropertyRow>,
    /// Properties applicable through the range side.
    pub properties_by_range: Vec<PropertyRow>,
}

/// IRI, label, and best description of a detailed entity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySummary {
    /// Entity IRI.
    pub iri: String,
    /// Display label.
    pub label: String,
    /// Best available description (may be empty).
    pub description: String,
}

/// The assembled detail view for one property.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetails {
    /// The property itself.
    pub property: PropertySummary,
    /// All comments, in document order.
    pub comments: Vec<String>,
    /// Declared domain classes, resolved, label-ordered.
    pub domains: Vec<ClassRef>,
    /// Declared range classes, resolved, label-ordered.
    pub ranges: Vec<ClassRef>,
    /// Union of the transitive descendants of every domain class — the
    /// more specific classes the property informally applies to.
    pub domain_descendants: Vec<ClassRef>,
    /// Union of the transitive descendants of every range class.
    pub range_descendants: Vec<ClassRef>,
    /// Full transitive superproperty closure; unresolvable IRIs dropped.
    pub superproperties: Vec<PropertySummary>,
    /// Full transitive subproperty closure; unresolvable IRIs dropped.
    pub subproperties: Vec<PropertySummary>,
}

impl Navigator {
    /// Assembles the detail view for a class.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::ClassNotFound`] if no class entity carries the
    /// IRI.
    pub fn class_details(&self, iri: &str) -> Result<ClassDetails, QueryError> {
        let class = self
            .lookup_class(iri)
            .ok_or_else(|| QueryError::ClassNotFound(iri.to_owned()))?;

        let ancestors = self.ancestors_of(iri, EdgeKind::ClassHierarchy);
        let descendants = self.descendants_of(iri, EdgeKind::ClassHierarchy);
        let mut inheritance: HashSet<&str> = ancestors.iter().map(String::as_str).collect();
        inheritance.insert(iri);

        let mut by_domain = Vec::new();
        let mut by_range = Vec::new();
        for property in self.properties() {
            for domain in &property.domains {
                if inheritance.contains(domain.as_str()) {
                    by_domain.push(self.property_row(
                        property,
                        MatchSide::Domain,
                        domain,
                        &property.ranges,
                    ));
                }
            }
            for range in &property.ranges {
                if inheritance.contains(range.as_str()) {
                    by_range.push(self.property_row(
                        property,
                        MatchSide::Range,
                        range,
                        &property.domains,
                    ));
                }
            }
        }

        let scope_notes = merged_notes(class.scope_notes.as_slice(), class.comments.as_slice());
        let description = scope_notes
            .first()
            .or_else(|| class.ric_cm_notes.first())
            .cloned()
            .unwrap_or_default();

        Ok(ClassDetails {
            entity: EntitySummary {
                iri: class.iri.clone(),
                label: class.label.clone(),
                description,
            },
            scope_notes,
            ric_cm_notes: class.ric_cm_notes.clone(),
            superclasses: self.class_refs(&ancestors),
            subclasses: self.class_refs(&descendants),
            properties_by_domain: finish_rows(by_domain),
            properties_by_range: finish_rows(by_range),
        })
    }

    /// Assembles the detail view for a property addressed by (IRI, kind).
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::PropertyNotFound`] if no entity of the
    /// requested kind carries the IRI.
    pub fn property_details(
        &self,
        iri: &str,
        kind: PropertyKind,
    ) -> Result<PropertyDetails, QueryError> {
        let property =
            self.lookup_property(iri, kind)
                .ok_or_else(|| QueryError::PropertyNotFound {
                    iri: iri.to_owned(),
                    kind,
                })?;

        let domain_descendants: Vec<String> = property
            .domains
            .iter()
            .flat_map(|class| self.descendants_of(class, EdgeKind::ClassHierarchy))
            .collect();
        let range_descendants: Vec<String> = property
            .ranges
            .iter()
            .flat_map(|class| self.descendants_of(class, EdgeKind::ClassHierarchy))
            .collect();

        Ok(PropertyDetails {
            property: summary(property),
            comments: property.comments.clone(),
            domains: self.class_refs(&property.domains),
            ranges: self.class_refs(&property.ranges),
            domain_descendants: self.class_refs(&domain_descendants),
            range_descendants: self.class_refs(&range_descendants),
            superproperties: self
                .property_summaries(&self.ancestors_of(iri, EdgeKind::PropertyHierarchy)),
            subproperties: self
                .property_summaries(&self.descendants_of(iri, EdgeKind::PropertyHierarchy)),
        })
    }

    /// Resolves an IRI to a display reference, synthesizing a stub when no
    /// class entity backs it.
    #[must_use]
    pub fn class_ref(&self, iri: &str) -> ClassRef {
        match self.lookup_class(iri) {
            Some(class) => ClassRef {
                iri: class.iri.clone(),
                label: class.label.clone(),
                ric_cm_notes: class.ric_cm_notes.clone(),
            },
            None => ClassRef {
                iri: iri.to_owned(),
                label: local_name(iri).to_owned(),
                ric_cm_notes: Vec::new(),
            },
        }
    }

    fn class_refs(&self, iris: &[String]) -> Vec<ClassRef> {
        let mut seen = HashSet::new();
        let mut refs: Vec<ClassRef> = iris
            .iter()
            .filter(|iri| seen.insert(iri.as_str()))
            .map(|iri| self.class_ref(iri))
            .collect();
        refs.sort_by(|a, b| a.label.to_lowercase().cmp(&b.label.to_lowercase()));
        refs
    }

    fn property_summaries(&self, iris: &[String]) -> Vec<PropertySummary> {
        let mut summaries: Vec<PropertySummary> = iris
            .iter()
            .filter_map(|iri| self.property_by_iri(iri))
            .map(summary)
            .collect();
        summaries.sort_by(|a, b| a.label.to_lowercase().cmp(&b.label.to_lowercase()));
        summaries
    }

    fn property_row(
        &self,
        property: &PropertyEntity,
        matched_by: MatchSide,
        via_class: &str,
        opposite: &[String],
    ) -> PropertyRow {
        PropertyRow {
            iri: property.iri.clone(),
            label: property.label.clone(),
            kind: property.kind,
            matched_by,
            via_class_iri: via_class.to_owned(),
            via_class_label: self.class_ref(via_class).label,
            related: self.class_refs(opposite),
        }
    }
}

fn summary(property: &PropertyEntity) -> PropertySummary {
    PropertySummary {
        iri: property.iri.clone(),
        label: property.label.clone(),
        description: property.description.clone(),
        kind: property.kind,
    }
}

/// Scope notes and comments merged into one list, deduplicated by exact
/// string, empties dropped.
fn merged_notes(scope_notes: &[String], comments: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for note in scope_notes.iter().chain(comments) {
        if !note.is_empty() && !out.contains(note) {
            out.push(note.clone());
        }
    }
    out
}

/// Deduplicates rows by (property IRI, side, via-class) and sorts by label.
fn finish_rows(rows: Vec<PropertyRow>) -> Vec<PropertyRow> {
    let mut seen = HashSet::new();
    let mut out: Vec<PropertyRow> = rows
        .into_iter()
        .filter(|row| {
            seen.insert((
                row.iri.clone(),
                row.matched_by,
                row.via_class_iri.clone(),
            ))
        })
        .collect();
    out.sort_by(|a, b| a.label.to_lowercase().cmp(&b.label.to_lowercase()));
    out
}
