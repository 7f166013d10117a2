//! Core snapshot model types.
//!
//! These types represent the normalized RiC-O graph produced by the
//! extraction pass. The snapshot is immutable once built: the query engine
//! re-derives everything else from it. Wire field names (camelCase) match
//! the `rico-data.json` artifact consumed at runtime.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Whether a property relates a resource to a literal or to another resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    /// `owl:DatatypeProperty` — relates a resource to a literal value.
    Data,
    /// `owl:ObjectProperty` — relates two resources.
    Object,
}

impl PropertyKind {
    /// Returns the string value used on the wire and in CLI arguments.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyKind::Data => "data",
            PropertyKind::Object => "object",
        }
    }
}

impl std::fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized ontology class.
///
/// Classes are deduplicated by IRI during extraction: repeated declarations
/// merge their annotations (first-appearance order, exact-string dedup) and
/// union their superclass references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEntity {
    /// Absolute IRI, the sole primary key.
    pub iri: String,
    /// Best available label; falls back to the IRI's trailing segment.
    pub label: String,
    /// English `skos:scopeNote` values.
    pub scope_notes: Vec<String>,
    /// English `rdfs:comment` values.
    pub comments: Vec<String>,
    /// English RiC-CM corresponding-component notes.
    pub ric_cm_notes: Vec<String>,
    /// IRIs asserted via `rdfs:subClassOf`. May dangle; may form cycles.
    pub superclasses: Vec<String>,
}

/// A normalized ontology property.
///
/// Unlike classes, properties are *not* merged by IRI: every declaration
/// block yields one entity, and an IRI declared as both an object property
/// and a datatype property yields two independent entities addressed by
/// the (IRI, kind) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyEntity {
    /// Absolute IRI.
    pub iri: String,
    /// Best available label; falls back to the IRI's trailing segment.
    pub label: String,
    /// First English comment, or empty.
    pub description: String,
    /// All English comments, in document order (duplicates allowed).
    pub comments: Vec<String>,
    /// Data or object property.
    pub kind: PropertyKind,
    /// IRIs asserted via `rdfs:domain`.
    pub domains: Vec<String>,
    /// IRIs asserted via `rdfs:range`.
    pub ranges: Vec<String>,
    /// IRIs asserted via `rdfs:subPropertyOf`.
    pub superproperties: Vec<String>,
    /// Derived inverse of `superproperties` across the whole collection.
    pub subproperties: Vec<String>,
}

/// The serialized extraction artifact: provenance plus the two sorted
/// entity collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// RFC 3339 timestamp of the extraction run.
    pub generated_at: String,
    /// Provenance string naming the source document.
    pub source_file: String,
    /// Class entities, sorted case-insensitively by label.
    pub classes: Vec<ClassEntity>,
    /// Property entities, sorted case-insensitively by label.
    pub properties: Vec<PropertyEntity>,
}

/// Failure to load or parse a serialized snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The snapshot file could not be read.
    #[error("cannot read snapshot {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The snapshot content is not valid JSON for the expected shape.
    #[error("cannot parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Snapshot {
    /// Serializes the snapshot to pretty-printed JSON, the on-disk artifact
    /// format.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes a snapshot from a reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not a valid snapshot document.
    pub fn from_reader(reader: impl Read) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Loads a snapshot from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Extracts the trailing segment of an IRI: the fragment after the last
/// `#`, else the segment after the last `/`, else the IRI itself. A `#` or
/// `/` in final position does not count as a separator.
#[must_use]
pub fn local_name(iri: &str) -> &str {
    if let Some(pos) = iri.rfind('#') {
        if pos < iri.len() - 1 {
            return &iri[pos + 1..];
        }
    }
    if let Some(pos) = iri.rfind('/') {
        if pos < iri.len() - 1 {
            return &iri[pos + 1..];
        }
    }
    iri
}

/// Returns true if the value has an absolute `http://` or `https://` shape.
/// Relative and malformed references are dropped everywhere.
#[must_use]
pub fn is_absolute_http_iri(value: &str) -> bool {
    value
        .get(..7)
        .is_some_and(|p| p.eq_ignore_ascii_case("http://"))
        || value
            .get(..8)
            .is_some_and(|p| p.eq_ignore_ascii_case("https://"))
}
