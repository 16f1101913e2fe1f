//! Ontology schema model for `owl2java`.
//!
//! Discovers classes, superclass edges and properties in an RDF repository
//! and materializes them as a [`SchemaGraph`] of [`ClassNode`]s, ready for
//! code generation.
//!
//! # Entry Point
//!
//! ```
//! use owl2java_schema::{load_classes, GraphRepository};
//!
//! let repo = GraphRepository::from_turtle_str(
//!     "@prefix owl: <http://www.w3.org/2002/07/owl#> .
//!      <http://example.org/Dog> a owl:Class .",
//! )?;
//! let graph = load_classes(&repo)?;
//! assert_eq!(graph.len(), 1);
//! # Ok::<(), owl2java_schema::SchemaError>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod error;
pub mod loader;
pub mod model;
pub mod names;
pub mod property;
pub mod repository;

pub use error::{Result, SchemaError};
pub use loader::{load_classes, load_superclasses};
pub use model::{local_name, namespace_iri, ClassNode, SchemaGraph};
pub use property::{load_properties, PropertyDef, PropertyKind};
pub use repository::{
    Binding, ClassRow, ClassVocabulary, GraphRepository, PropertyRow, RdfFormat,
    SchemaRepository,
};
