//! Read-only query engine over the RiC-O snapshot.
//!
//! The `rico-navigator` crate consumes the snapshot produced by
//! [`rico_ontology`] and answers navigation queries: substring search,
//! class hierarchy tree, transitive super/sub closures, and detail views
//! joining a class or property to everything that references it.
//!
//! The engine is a pure function of the loaded snapshot. All state is
//! derived once at load time and never mutated; re-loading replaces the
//! whole [`Navigator`] value. Ephemeral display state (expand/collapse,
//! filter text) belongs to the caller and is passed in as plain
//! parameters.
//!
//! # Entry Point
//!
//! ```no_run
//! use std::path::Path;
//!
//! use rico_navigator::Navigator;
//! use rico_ontology::Snapshot;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let snapshot = Snapshot::from_path(Path::new("public/rico-data.json"))?;
//! let navigator = Navigator::new(snapshot);
//! for hit in navigator.search_classes("record") {
//!     println!("{} — {}", hit.label, hit.iri);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! A failed snapshot load degrades to [`Navigator::empty`]: every query
//! then answers with an empty result or a not-found error, never a crash.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod closure;
pub mod details;
pub mod error;
pub mod index;
pub mod search;
pub mod tree;

pub use closure::EdgeKind;
pub use details::{
    ClassDetails, ClassRef, EntitySummary, MatchSide, PropertyDetails, PropertyRow,
    PropertySummary, RowFilter,
};
pub use error::QueryError;
pub use index::Navigator;
pub use search::SearchHit;
pub use tree::{HierarchyTree, TreeNode};
