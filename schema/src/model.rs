//! Core schema model types.
//!
//! A [`SchemaGraph`] maps class IRIs to [`ClassNode`]s. The graph is built
//! once by [`load_classes`](crate::loader::load_classes) and is read-only
//! afterwards: code generation is a pure read over it.

use std::collections::BTreeMap;
use std::fmt;

use crate::property::PropertyDef;

/// One ontology class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNode {
    /// Full IRI (e.g., `"http://example.org/zoo#Dog"`).
    pub iri: String,
    /// The `rdfs:comment` of the class, if the schema provides one.
    pub comment: Option<String>,
    /// Full IRIs of direct superclasses (`rdfs:subClassOf`), in query order.
    ///
    /// Not deduplicated and not checked for cycles.
    pub superclasses: Vec<String>,
    /// Properties whose domain is this class, in discovery order.
    pub properties: Vec<PropertyDef>,
}

impl ClassNode {
    /// Creates a node with no comment, superclasses or properties.
    #[must_use]
    pub fn new(iri: impl Into<String>) -> Self {
        Self {
            iri: iri.into(),
            comment: None,
            superclasses: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Returns the local name of the class (the segment after the last `/` or `#`).
    #[must_use]
    pub fn local_name(&self) -> &str {
        local_name(&self.iri)
    }

    /// Returns true if the class declares no properties of its own.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl fmt::Display for ClassNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let props: Vec<&str> = self.properties.iter().map(|p| p.local_name()).collect();
        write!(
            f,
            "class {} extends [{}] {{ {} }}",
            self.local_name(),
            self.superclasses.join(", "),
            props.join(", ")
        )
    }
}

/// IRI-keyed mapping of every class discovered in the repository.
///
/// Iteration order is lexicographic by IRI so that generation runs are
/// reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaGraph {
    classes: BTreeMap<String, ClassNode>,
}

impl SchemaGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node, replacing any existing node with the same IRI.
    ///
    /// Returns the replaced node, if any.
    pub fn insert(&mut self, node: ClassNode) -> Option<ClassNode> {
        self.classes.insert(node.iri.clone(), node)
    }

    /// Looks up a class by its full IRI.
    #[must_use]
    pub fn get(&self, iri: &str) -> Option<&ClassNode> {
        self.classes.get(iri)
    }

    /// Iterates over all classes in IRI order.
    pub fn iter(&self) -> impl Iterator<Item = &ClassNode> {
        self.classes.values()
    }

    /// Returns the number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if the graph holds no classes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Returns the total number of properties across all classes.
    #[must_use]
    pub fn property_count(&self) -> usize {
        self.classes.values().map(|c| c.properties.len()).sum()
    }
}

impl FromIterator<ClassNode> for SchemaGraph {
    fn from_iter<I: IntoIterator<Item = ClassNode>>(iter: I) -> Self {
        let mut graph = Self::new();
        for node in iter {
            graph.insert(node);
        }
        graph
    }
}

/// Extracts the local name from a full IRI (after the last `/` or `#`).
#[must_use]
pub fn local_name(iri: &str) -> &str {
    let after_slash = iri.rsplit('/').next().unwrap_or(iri);
    after_slash.rsplit('#').next().unwrap_or(after_slash)
}

/// Returns the namespace part of an IRI: everything up to and including the
/// last `#` or `/`.
#[must_use]
pub fn namespace_iri(iri: &str) -> &str {
    match iri.rfind(['#', '/']) {
        Some(idx) => &iri[..=idx],
        None => iri,
    }
}

/// Standard IRI constants.
pub mod iris {
    /// OWL namespace.
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    /// RDF namespace.
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// RDFS namespace.
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    /// XSD namespace.
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

    /// `owl:Class`.
    pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
    /// `owl:Thing`.
    pub const OWL_THING: &str = "http://www.w3.org/2002/07/owl#Thing";
    /// `owl:DatatypeProperty`.
    pub const OWL_DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
    /// `owl:ObjectProperty`.
    pub const OWL_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
    /// `rdfs:Class`.
    pub const RDFS_CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";
    /// `rdfs:Literal`.
    pub const RDFS_LITERAL: &str = "http://www.w3.org/2000/01/rdf-schema#Literal";
}
