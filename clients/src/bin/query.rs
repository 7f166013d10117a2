//! `rico-query` — Terminal consumer of the RiC-O query engine.
//!
//! Loads the extracted snapshot and renders search results, the class
//! hierarchy tree, and class/property detail views. A not-found identifier
//! is reported inline and never aborts the process; only a failed snapshot
//! load is an error exit.
//!
//! **Usage:**
//! ```text
//! rico-query [--data <path>] classes [QUERY]
//! rico-query [--data <path>] data-properties [QUERY]
//! rico-query [--data <path>] object-properties [QUERY]
//! rico-query [--data <path>] tree
//! rico-query [--data <path>] class <IRI>
//! rico-query [--data <path>] property <IRI> --kind <data|object>
//! ```

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use rico_navigator::{
    ClassDetails, ClassRef, HierarchyTree, Navigator, PropertyDetails, PropertyRow, SearchHit,
    TreeNode,
};
use rico_ontology::{PropertyKind, Snapshot};

/// Browse the extracted RiC-O ontology snapshot.
#[derive(Parser)]
#[command(name = "rico-query", about = "Browse the RiC-O ontology snapshot")]
struct Args {
    /// Path to the snapshot artifact produced by rico-extract.
    #[arg(long, default_value = "public/rico-data.json")]
    data: PathBuf,

    /// Emit the view as JSON instead of formatted text.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search classes by label or identifier.
    Classes {
        /// Substring query; omit to list everything.
        query: Option<String>,
    },
    /// Search data properties by label or identifier.
    DataProperties {
        /// Substring query; omit to list everything.
        query: Option<String>,
    },
    /// Search object properties by label or identifier.
    ObjectProperties {
        /// Substring query; omit to list everything.
        query: Option<String>,
    },
    /// Print the class hierarchy tree.
    Tree,
    /// Show the detail view for a class.
    Class {
        /// Class IRI.
        iri: String,
    },
    /// Show the detail view for a property.
    Property {
        /// Property IRI.
        iri: String,
        /// Property kind; a data and an object property may share an IRI.
        #[arg(long, value_enum)]
        kind: KindArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    /// owl:DatatypeProperty
    Data,
    /// owl:ObjectProperty
    Object,
}

impl From<KindArg> for PropertyKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Data => PropertyKind::Data,
            KindArg::Object => PropertyKind::Object,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let snapshot = Snapshot::from_path(&args.data)
        .with_context(|| format!("cannot load snapshot {}", args.data.display()))?;
    let navigator = Navigator::new(snapshot);

    match args.command {
        Command::Classes { query } => {
            let hits = navigator.search_classes(query.as_deref().unwrap_or_default());
            if args.json {
                print_json(&hits)?;
            } else {
                print_hits(&hits);
            }
        }
        Command::DataProperties { query } => {
            let hits = navigator
                .search_properties(Some(PropertyKind::Data), query.as_deref().unwrap_or_default());
            if args.json {
                print_json(&hits)?;
            } else {
                print_hits(&hits);
            }
        }
        Command::ObjectProperties { query } => {
            let hits = navigator.search_properties(
                Some(PropertyKind::Object),
                query.as_deref().unwrap_or_default(),
            );
            if args.json {
                print_json(&hits)?;
            } else {
                print_hits(&hits);
            }
        }
        Command::Tree => {
            let tree = navigator.hierarchy_tree();
            if args.json {
                print_json(&tree)?;
            } else {
                print_tree(&tree);
            }
        }
        Command::Class { iri } => match navigator.class_details(&iri) {
            Ok(details) if args.json => print_json(&details)?,
            Ok(details) => print_class_details(&details),
            Err(err) => println!("{err}"),
        },
        Command::Property { iri, kind } => {
            match navigator.property_details(&iri, kind.into()) {
                Ok(details) if args.json => print_json(&details)?,
                Ok(details) => print_property_details(&details),
                Err(err) => println!("{err}"),
            }
        }
    }

    Ok(())
}

fn print_json(view: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(view)?);
    Ok(())
}

fn print_hits(hits: &[SearchHit]) {
    if hits.is_empty() {
        println!("No results.");
        return;
    }
    for hit in hits {
        println!("{} — {}", hit.label, hit.iri);
        if !hit.description.is_empty() {
            println!("    {}", hit.description);
        }
    }
    println!("({} results)", hits.len());
}

fn print_tree(tree: &HierarchyTree) {
    for root in tree.roots() {
        let mut path = HashSet::new();
        print_tree_node(tree, root, 0, &mut path);
    }
}

/// Prints a node and its children. The path guard keeps hierarchy cycles
/// from recursing forever; a node already on the current path is printed
/// once more with an ellipsis and not expanded.
fn print_tree_node<'a>(
    tree: &'a HierarchyTree,
    node: &'a TreeNode,
    depth: usize,
    path: &mut HashSet<&'a str>,
) {
    let indent = "  ".repeat(depth);
    if !path.insert(&node.iri) {
        println!("{indent}{} …", node.label);
        return;
    }
    println!("{indent}{}", node.label);
    for child in tree.children_of(&node.iri) {
        print_tree_node(tree, child, depth + 1, path);
    }
    path.remove(node.iri.as_str());
}

fn print_class_details(details: &ClassDetails) {
    println!("{}", details.entity.label);
    println!("  {}", details.entity.iri);
    if !details.entity.description.is_empty() {
        println!("\n{}", details.entity.description);
    }
    print_notes("Scope notes", &details.scope_notes);
    print_notes("RiC-CM correspondence", &details.ric_cm_notes);
    print_refs("Superclasses", &details.superclasses);
    print_refs("Subclasses", &details.subclasses);
    print_rows("Properties with this class as domain", &details.properties_by_domain);
    print_rows("Properties with this class as range", &details.properties_by_range);
}

fn print_property_details(details: &PropertyDetails) {
    println!("{} [{}]", details.property.label, details.property.kind);
    println!("  {}", details.property.iri);
    if !details.property.description.is_empty() {
        println!("\n{}", details.property.description);
    }
    print_notes("Comments", &details.comments);
    print_refs("Domains", &details.domains);
    print_refs("Ranges", &details.ranges);
    print_refs("Also applies from (domain subclasses)", &details.domain_descendants);
    print_refs("Also applies to (range subclasses)", &details.range_descendants);
    if !details.superproperties.is_empty() {
        println!("\nSuperproperties:");
        for prop in &details.superproperties {
            println!("  {} [{}] — {}", prop.label, prop.kind, prop.iri);
        }
    }
    if !details.subproperties.is_empty() {
        println!("\nSubproperties:");
        for prop in &details.subproperties {
            println!("  {} [{}] — {}", prop.label, prop.kind, prop.iri);
        }
    }
}

fn print_notes(heading: &str, notes: &[String]) {
    if notes.is_empty() {
        return;
    }
    println!("\n{heading}:");
    for note in notes {
        println!("  - {note}");
    }
}

fn print_refs(heading: &str, refs: &[ClassRef]) {
    if refs.is_empty() {
        return;
    }
    println!("\n{heading}:");
    for class_ref in refs {
        println!("  {} — {}", class_ref.label, class_ref.iri);
    }
}

fn print_rows(heading: &str, rows: &[PropertyRow]) {
    if rows.is_empty() {
        return;
    }
    println!("\n{heading}:");
    for row in rows {
        let related = row
            .related
            .iter()
            .map(|r| r.label.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "  {} [{}] via {} → {}",
            row.label, row.kind, row.via_class_label, related
        );
    }
}
