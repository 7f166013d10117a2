//! Query failure conditions.
//!
//! Every variant is recoverable: callers surface it as an empty state or an
//! inline message, never as a fatal condition.

use rico_ontology::PropertyKind;

/// A query addressed an identifier (optionally with a kind) that does not
/// resolve in the loaded snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// No class entity carries the requested IRI.
    #[error("RiC-O class not found: {0}")]
    ClassNotFound(String),
    /// No property entity carries the requested (IRI, kind) pair. A data
    /// and an object property sharing an IRI are distinct entities; the
    /// kind must match the stored entity.
    #[error("RiC-O property not found: {iri} ({kind})")]
    PropertyNotFound {
        /// The requested property IRI.
        iri: String,
        /// The requested property kind.
        kind: PropertyKind,
    },
}
