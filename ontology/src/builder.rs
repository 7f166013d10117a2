//! Graph builder: orchestrates the scanner and annotation extractor over a
//! whole RiC-O document and produces the normalized [`Snapshot`].
//!
//! Classes are deduplicated by IRI and merged across repeated declarations,
//! including superclass assertions made in separate `rdf:Description`
//! blocks. Properties are collected one entity per declaration block, with
//! no merging by IRI and none across kinds. A declaration block without a
//! valid absolute `rdf:about` contributes nothing at all to the graph.

use std::collections::HashMap;

use chrono::{SecondsFormat, Utc};

use crate::annotations::{english_values, resource_refs, vendor_notes};
use crate::model::{
    is_absolute_http_iri, local_name, ClassEntity, PropertyEntity, PropertyKind, Snapshot,
};
use crate::scanner::{attr_value, ElementPattern};

/// In-progress class record, merged across declarations before the label
/// fallback and final sort are applied.
#[derive(Debug, Default)]
struct ClassDraft {
    labels: Vec<String>,
    scope_notes: Vec<String>,
    comments: Vec<String>,
    ric_cm_notes: Vec<String>,
    superclasses: Vec<String>,
}

/// Extracts the complete normalized graph from a RiC-O document.
#[must_use]
pub fn build(document: &str, source_file: &str) -> Snapshot {
    let label = ElementPattern::new("rdfs:label");
    let comment = ElementPattern::new("rdfs:comment");
    let scope_note = ElementPattern::new("skos:scopeNote");
    let subclass_of = ElementPattern::new("rdfs:subClassOf");

    let mut order: Vec<String> = Vec::new();
    let mut drafts: HashMap<String, ClassDraft> = HashMap::new();

    // Primary class declarations: annotations accumulate in first-appearance
    // order, deduplicated by exact string; superclass references union.
    for block in ElementPattern::new("owl:Class").blocks(document) {
        let Some(iri) = declared_iri(&block.attrs) else {
            continue;
        };
        if !drafts.contains_key(&iri) {
            order.push(iri.clone());
        }
        let draft = drafts.entry(iri).or_default();
        extend_unique(&mut draft.labels, english_values(&block.content, &label));
        extend_unique(
            &mut draft.scope_notes,
            english_values(&block.content, &scope_note),
        );
        extend_unique(&mut draft.comments, english_values(&block.content, &comment));
        extend_unique(&mut draft.ric_cm_notes, vendor_notes(&block.content));
        extend_unique(
            &mut draft.superclasses,
            resource_refs(&block.content, &subclass_of),
        );
    }

    // Hierarchy edges declared outside the primary declaration. A subject
    // never declared as owl:Class still gets an entity here, with only an
    // identifier and a synthesized label.
    for block in ElementPattern::new("rdf:Description").blocks(document) {
        let Some(iri) = declared_iri(&block.attrs) else {
            continue;
        };
        let supers = resource_refs(&block.content, &subclass_of);
        if supers.is_empty() {
            continue;
        }
        if !drafts.contains_key(&iri) {
            order.push(iri.clone());
        }
        let draft = drafts.entry(iri).or_default();
        extend_unique(&mut draft.superclasses, supers);
    }

    let mut properties = Vec::new();
    collect_properties(document, "owl:ObjectProperty", PropertyKind::Object, &mut properties);
    collect_properties(document, "owl:DatatypeProperty", PropertyKind::Data, &mut properties);
    link_subproperties(&mut properties);

    let mut classes: Vec<ClassEntity> = order
        .into_iter()
        .filter_map(|iri| drafts.remove(&iri).map(|draft| finish_class(iri, draft)))
        .collect();

    sort_by_label(&mut classes, |class| class.label.as_str());
    sort_by_label(&mut properties, |property| property.label.as_str());

    Snapshot {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        source_file: source_file.to_owned(),
        classes,
        properties,
    }
}

/// Reads and validates the subject IRI of a declaration block. Blocks
/// without an absolute http(s) IRI are skipped entirely.
fn declared_iri(attrs: &str) -> Option<String> {
    attr_value(attrs, "rdf:about").filter(|iri| is_absolute_http_iri(iri))
}

fn collect_properties(
    document: &str,
    tag: &str,
    kind: PropertyKind,
    out: &mut Vec<PropertyEntity>,
) {
    let label = ElementPattern::new("rdfs:label");
    let comment = ElementPattern::new("rdfs:comment");
    let domain = ElementPattern::new("rdfs:domain");
    let range = ElementPattern::new("rdfs:range");
    let subproperty_of = ElementPattern::new("rdfs:subPropertyOf");

    for block in ElementPattern::new(tag).blocks(document) {
        let Some(iri) = declared_iri(&block.attrs) else {
            continue;
        };
        let labels = english_values(&block.content, &label);
        let comments = english_values(&block.content, &comment);
        let display_label = labels
            .into_iter()
            .next()
            .unwrap_or_else(|| local_name(&iri).to_owned());
        let description = comments.first().cloned().unwrap_or_default();
        out.push(PropertyEntity {
            label: display_label,
            description,
            comments,
            kind,
            domains: resource_refs(&block.content, &domain),
            ranges: resource_refs(&block.content, &range),
            superproperties: resource_refs(&block.content, &subproperty_of),
            subproperties: Vec::new(),
            iri,
        });
    }
}

/// Derives the subproperty index: for every property P with superproperty
/// S, P's IRI is added to S's subproperty set. The super IRI need not have
/// an entity of its own for the index to carry it.
fn link_subproperties(properties: &mut [PropertyEntity]) {
    let mut index: HashMap<String, Vec<String>> = HashMap::new();
    for property in properties.iter() {
        for parent in &property.superproperties {
            let subs = index.entry(parent.clone()).or_default();
            if !subs.contains(&property.iri) {
                subs.push(property.iri.clone());
            }
        }
    }
    for property in properties.iter_mut() {
        property.subproperties = index.get(&property.iri).cloned().unwrap_or_default();
    }
}

fn finish_class(iri: String, draft: ClassDraft) -> ClassEntity {
    let label = draft
        .labels
        .into_iter()
        .next()
        .unwrap_or_else(|| local_name(&iri).to_owned());
    ClassEntity {
        label,
        scope_notes: draft.scope_notes,
        comments: draft.comments,
        ric_cm_notes: draft.ric_cm_notes,
        superclasses: draft.superclasses,
        iri,
    }
}

fn extend_unique(list: &mut Vec<String>, values: Vec<String>) {
    for value in values {
        if !list.contains(&value) {
            list.push(value);
        }
    }
}

/// Stable case-insensitive label sort shared by both collections.
fn sort_by_label<T>(items: &mut [T], label: impl Fn(&T) -> &str) {
    items.sort_by(|a, b| label(a).to_lowercase().cmp(&label(b).to_lowercase()));
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn repeated_class_declarations_merge_into_one_entity() {
        let doc = r#"
            <owl:Class rdf:about="http://ex/A">
              <rdfs:label xml:lang="en">Alpha</rdfs:label>
              <rdfs:comment xml:lang="en">First pass.</rdfs:comment>
            </owl:Class>
            <owl:Class rdf:about="http://ex/A">
              <rdfs:label xml:lang="en">Alpha</rdfs:label>
              <rdfs:comment xml:lang="en">Second pass.</rdfs:comment>
              <rdfs:subClassOf rdf:resource="http://ex/B"/>
            </owl:Class>"#;
        let snapshot = build(doc, "test.rdf");
        assert_eq!(snapshot.classes.len(), 1);
        let class = &snapshot.classes[0];
        assert_eq!(class.label, "Alpha");
        assert_eq!(class.comments, vec!["First pass.", "Second pass."]);
        assert_eq!(class.superclasses, vec!["http://ex/B"]);
    }

    #[test]
    fn french_labels_are_excluded_and_description_edges_merge() {
        // Scenario: class declared with en + fr labels, hierarchy edge
        // declared in a separate rdf:Description block.
        let doc = r#"
            <owl:Class rdf:about="http://ex/A">
              <rdfs:label xml:lang="en">Alpha</rdfs:label>
              <rdfs:label xml:lang="fr">Alphaxx</rdfs:label>
            </owl:Class>
            <rdf:Description rdf:about="http://ex/A">
              <rdfs:subClassOf rdf:resource="http://ex/B"/>
            </rdf:Description>"#;
        let snapshot = build(doc, "test.rdf");
        assert_eq!(snapshot.classes.len(), 1);
        assert_eq!(snapshot.classes[0].label, "Alpha");
        assert_eq!(snapshot.classes[0].superclasses, vec!["http://ex/B"]);
    }

    #[test]
    fn description_without_primary_declaration_creates_stub() {
        let doc = r#"
            <rdf:Description rdf:about="http://ex/onto#Stub">
              <rdfs:subClassOf rdf:resource="http://ex/Parent"/>
            </rdf:Description>"#;
        let snapshot = build(doc, "test.rdf");
        assert_eq!(snapshot.classes.len(), 1);
        assert_eq!(snapshot.classes[0].iri, "http://ex/onto#Stub");
        assert_eq!(snapshot.classes[0].label, "Stub");
        assert!(snapshot.classes[0].scope_notes.is_empty());
    }

    #[test]
    fn description_without_superclasses_contributes_nothing() {
        let doc = r#"
            <rdf:Description rdf:about="http://ex/A">
              <rdfs:comment xml:lang="en">Just prose.</rdfs:comment>
            </rdf:Description>"#;
        assert!(build(doc, "test.rdf").classes.is_empty());
    }

    #[test]
    fn block_without_valid_identifier_is_skipped_entirely() {
        let doc = r#"
            <owl:Class rdf:about="relative/name">
              <rdfs:label xml:lang="en">Ghost</rdfs:label>
            </owl:Class>
            <owl:Class>
              <rdfs:label xml:lang="en">Anonymous</rdfs:label>
            </owl:Class>"#;
        let snapshot = build(doc, "test.rdf");
        assert!(snapshot.classes.is_empty());
    }

    #[test]
    fn object_and_data_declarations_of_one_iri_stay_distinct() {
        let doc = r#"
            <owl:ObjectProperty rdf:about="http://ex/p">
              <rdfs:label xml:lang="en">predicate</rdfs:label>
            </owl:ObjectProperty>
            <owl:DatatypeProperty rdf:about="http://ex/p">
              <rdfs:label xml:lang="en">predicate</rdfs:label>
            </owl:DatatypeProperty>"#;
        let snapshot = build(doc, "test.rdf");
        assert_eq!(snapshot.properties.len(), 2);
        let kinds: Vec<PropertyKind> = snapshot.properties.iter().map(|p| p.kind).collect();
        assert!(kinds.contains(&PropertyKind::Object));
        assert!(kinds.contains(&PropertyKind::Data));
    }

    #[test]
    fn subproperty_index_is_exact_inverse_of_superproperties() {
        let doc = r#"
            <owl:ObjectProperty rdf:about="http://ex/parent">
              <rdfs:label xml:lang="en">parent</rdfs:label>
            </owl:ObjectProperty>
            <owl:ObjectProperty rdf:about="http://ex/childA">
              <rdfs:subPropertyOf rdf:resource="http://ex/parent"/>
            </owl:ObjectProperty>
            <owl:ObjectProperty rdf:about="http://ex/childB">
              <rdfs:subPropertyOf rdf:resource="http://ex/parent"/>
            </owl:ObjectProperty>"#;
        let snapshot = build(doc, "test.rdf");
        for property in &snapshot.properties {
            for parent in &property.superproperties {
                let parent_entity = snapshot
                    .properties
                    .iter()
                    .find(|p| &p.iri == parent)
                    .unwrap();
                assert!(parent_entity.subproperties.contains(&property.iri));
            }
        }
        let parent = snapshot
            .properties
            .iter()
            .find(|p| p.iri == "http://ex/parent")
            .unwrap();
        assert_eq!(
            parent.subproperties,
            vec!["http://ex/childA", "http://ex/childB"]
        );
    }

    #[test]
    fn property_label_and_description_fall_back() {
        let doc = r#"
            <owl:DatatypeProperty rdf:about="http://ex/onto#hasName">
              <rdfs:comment xml:lang="en">The name.</rdfs:comment>
              <rdfs:comment xml:lang="en">More detail.</rdfs:comment>
              <rdfs:domain rdf:resource="http://ex/A"/>
            </owl:DatatypeProperty>"#;
        let snapshot = build(doc, "test.rdf");
        let property = &snapshot.properties[0];
        assert_eq!(property.label, "hasName");
        assert_eq!(property.description, "The name.");
        assert_eq!(property.comments.len(), 2);
        assert_eq!(property.domains, vec!["http://ex/A"]);
    }

    #[test]
    fn collections_sort_case_insensitively_by_label() {
        let doc = r#"
            <owl:Class rdf:about="http://ex/b"><rdfs:label>beta</rdfs:label></owl:Class>
            <owl:Class rdf:about="http://ex/A"><rdfs:label>Alpha</rdfs:label></owl:Class>
            <owl:Class rdf:about="http://ex/Z"><rdfs:label>ZETA</rdfs:label></owl:Class>
            <owl:Class rdf:about="http://ex/g"><rdfs:label>gamma</rdfs:label></owl:Class>"#;
        let snapshot = build(doc, "test.rdf");
        let labels: Vec<&str> = snapshot.classes.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Alpha", "beta", "gamma", "ZETA"]);
    }

    #[test]
    fn snapshot_carries_provenance() {
        let snapshot = build("", "data/RiC-O_1-1.rdf");
        assert_eq!(snapshot.source_file, "data/RiC-O_1-1.rdf");
        assert!(snapshot.generated_at.ends_with('Z'));
    }
}
