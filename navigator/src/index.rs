//! Identifier-keyed indexes over a loaded snapshot.
//!
//! [`Navigator`] is a pure function of the snapshot: every derived map is
//! computed once at load time and the snapshot is never mutated afterwards.
//! Re-loading replaces the whole value (last load wins); there is no
//! incremental maintenance.

use std::collections::HashMap;

use rico_ontology::{ClassEntity, PropertyEntity, PropertyKind, Snapshot};

/// The query engine's state: the snapshot collections plus the lookup and
/// inverse-edge maps derived from them.
#[derive(Debug)]
pub struct Navigator {
    classes: Vec<ClassEntity>,
    properties: Vec<PropertyEntity>,
    class_by_iri: HashMap<String, usize>,
    property_by_key: HashMap<(String, PropertyKind), usize>,
    property_by_iri: HashMap<String, usize>,
    direct_subclasses: HashMap<String, Vec<String>>,
    direct_subproperties: HashMap<String, Vec<String>>,
}

impl Navigator {
    /// Builds the engine from a loaded snapshot.
    #[must_use]
    pub fn new(snapshot: Snapshot) -> Self {
        let Snapshot {
            classes,
            properties,
            ..
        } = snapshot;

        let mut class_by_iri = HashMap::new();
        let mut direct_subclasses: HashMap<String, Vec<String>> = HashMap::new();
        for (position, class) in classes.iter().enumerate() {
            class_by_iri.entry(class.iri.clone()).or_insert(position);
            for parent in &class.superclasses {
                let children = direct_subclasses.entry(parent.clone()).or_default();
                if !children.contains(&class.iri) {
                    children.push(class.iri.clone());
                }
            }
        }

        // Properties are addressed by the (IRI, kind) pair: an IRI declared
        // as both a data and an object property names two entities. The
        // kind-less map resolves hierarchy edges, which carry no kind in
        // the source markup; the first entity in label order wins there.
        let mut property_by_key = HashMap::new();
        let mut property_by_iri = HashMap::new();
        let mut direct_subproperties: HashMap<String, Vec<String>> = HashMap::new();
        for (position, property) in properties.iter().enumerate() {
            property_by_key
                .entry((property.iri.clone(), property.kind))
                .or_insert(position);
            property_by_iri.entry(property.iri.clone()).or_insert(position);
            for parent in &property.superproperties {
                let children = direct_subproperties.entry(parent.clone()).or_default();
                if !children.contains(&property.iri) {
                    children.push(property.iri.clone());
                }
            }
        }

        Self {
            classes,
            properties,
            class_by_iri,
            property_by_key,
            property_by_iri,
            direct_subclasses,
            direct_subproperties,
        }
    }

    /// Returns an engine over empty collections: the load-failure fallback.
    /// Every query degrades to an empty result or a not-found error.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Snapshot {
            generated_at: String::new(),
            source_file: String::new(),
            classes: Vec::new(),
            properties: Vec::new(),
        })
    }

    /// All class entities, in snapshot (label) order.
    #[must_use]
    pub fn classes(&self) -> &[ClassEntity] {
        &self.classes
    }

    /// All property entities, in snapshot (label) order.
    #[must_use]
    pub fn properties(&self) -> &[PropertyEntity] {
        &self.properties
    }

    /// Looks up a class by IRI. Returns `None` if not found.
    #[must_use]
    pub fn lookup_class(&self, iri: &str) -> Option<&ClassEntity> {
        self.class_by_iri.get(iri).map(|&i| &self.classes[i])
    }

    /// Looks up a property by its (IRI, kind) composite key. Returns `None`
    /// if no entity of that kind carries the IRI.
    #[must_use]
    pub fn lookup_property(&self, iri: &str, kind: PropertyKind) -> Option<&PropertyEntity> {
        self.property_by_key
            .get(&(iri.to_owned(), kind))
            .map(|&i| &self.properties[i])
    }

    /// Resolves a property IRI regardless of kind, for hierarchy-edge
    /// expansion and summary resolution.
    #[must_use]
    pub(crate) fn property_by_iri(&self, iri: &str) -> Option<&PropertyEntity> {
        self.property_by_iri.get(iri).map(|&i| &self.properties[i])
    }

    /// Direct subclasses of an IRI, in snapshot order.
    #[must_use]
    pub(crate) fn direct_subclasses(&self, iri: &str) -> &[String] {
        self.direct_subclasses.get(iri).map_or(&[], Vec::as_slice)
    }

    /// Direct subproperties of an IRI, in snapshot order.
    #[must_use]
    pub(crate) fn direct_subproperties(&self, iri: &str) -> &[String] {
        self.direct_subproperties.get(iri).map_or(&[], Vec::as_slice)
    }
}
