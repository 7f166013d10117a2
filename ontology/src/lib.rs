//! RiC-O ontology extraction.
//!
//! The `rico-ontology` crate turns the RiC-O (Records in Contexts Ontology)
//! RDF/XML document into a normalized, query-ready snapshot: classes
//! deduplicated and merged by IRI, properties collected per declaration
//! block, annotations filtered to English, cross-references resolved to
//! absolute IRIs, and both collections sorted case-insensitively by label.
//!
//! # Entry Point
//!
//! ```
//! let document = r#"
//!     <owl:Class rdf:about="http://ex/Record">
//!       <rdfs:label xml:lang="en">Record</rdfs:label>
//!     </owl:Class>"#;
//! let snapshot = rico_ontology::build(document, "example.rdf");
//! assert_eq!(snapshot.classes.len(), 1);
//! ```
//!
//! # Serialization
//!
//! The snapshot serializes to the `rico-data.json` artifact with
//! [`Snapshot::to_json_pretty`] and loads back with [`Snapshot::from_path`].

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod annotations;
pub mod builder;
pub mod model;
pub mod scanner;

pub use builder::build;
pub use model::{
    is_absolute_http_iri, local_name, ClassEntity, PropertyEntity, PropertyKind, Snapshot,
    SnapshotError,
};
