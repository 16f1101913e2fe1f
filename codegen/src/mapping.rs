//! Ontology → Java mapping tables.
//!
//! Deterministic mappings from class IRIs to Java packages, type names,
//! delegate instance names and output directories.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use owl2java_schema::names::{java_identifier, lower_first};
use owl2java_schema::{local_name, namespace_iri, SchemaGraph};

use crate::config::PackageConfig;

/// Package assigned to a namespace whose IRI yields no usable segment.
const FALLBACK_PACKAGE: &str = "ontology";

/// Assigns Java packages to ontology namespaces.
///
/// Explicit namespace mappings win; any other namespace gets a package
/// derived from its IRI.
#[derive(Debug, Clone, Default)]
pub struct PackageMapper {
    base_package: Option<String>,
    namespaces: BTreeMap<String, String>,
}

impl PackageMapper {
    /// Creates a mapper with no explicit mappings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mapper from the `[packages]` configuration table.
    pub fn from_config(config: &PackageConfig) -> Self {
        Self {
            base_package: config.base_package.clone(),
            namespaces: config.namespaces.clone(),
        }
    }

    /// Sets the prefix used for derived packages.
    pub fn with_base_package(mut self, base: impl Into<String>) -> Self {
        self.base_package = Some(base.into());
        self
    }

    /// Maps a namespace IRI to an explicit package.
    pub fn with_namespace(mut self, namespace: impl Into<String>, package: impl Into<String>) -> Self {
        self.namespaces.insert(namespace.into(), package.into());
        self
    }

    /// Returns the package for a namespace IRI.
    pub fn package_for_namespace(&self, namespace: &str) -> String {
        if let Some(package) = self.namespaces.get(namespace) {
            return package.clone();
        }
        let (host, path) = split_namespace(namespace);
        let mut segments: Vec<String> = match &self.base_package {
            Some(base) => base.split('.').map(str::to_string).collect(),
            None => host.iter().rev().filter(|l| **l != "www").map(|l| package_segment(l)).collect(),
        };
        segments.extend(path.iter().map(|s| package_segment(s)));
        segments.retain(|s| !s.is_empty());
        if segments.is_empty() {
            return FALLBACK_PACKAGE.to_string();
        }
        segments.join(".")
    }

    /// Assigns a package to every class in `graph` and to every superclass
    /// they reference.
    pub fn assign(&self, graph: &SchemaGraph) -> PackageMap {
        let mut map = PackageMap::default();
        for node in graph.iter() {
            for iri in std::iter::once(&node.iri).chain(node.superclasses.iter()) {
                if !map.contains(iri) {
                    map.insert(iri.clone(), self.package_for_namespace(namespace_iri(iri)));
                }
            }
        }
        map
    }
}

/// Class IRI → Java package lookup used during emission.
#[derive(Debug, Clone, Default)]
pub struct PackageMap {
    packages: HashMap<String, String>,
}

impl PackageMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the package of a class.
    pub fn insert(&mut self, class_iri: impl Into<String>, package: impl Into<String>) {
        self.packages.insert(class_iri.into(), package.into());
    }

    /// Returns true if the class has a package.
    pub fn contains(&self, class_iri: &str) -> bool {
        self.packages.contains_key(class_iri)
    }

    /// Returns the package of a class.
    ///
    /// # Errors
    ///
    /// Returns an error if no package was assigned to `class_iri`.
    pub fn namespace_for(&self, class_iri: &str) -> Result<&str> {
        self.packages
            .get(class_iri)
            .map(String::as_str)
            .ok_or_else(|| anyhow!("No package mapping for class <{class_iri}>"))
    }

    /// Returns the number of mapped classes.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Returns true if no class is mapped.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Returns the Java type name of a class (`".../zoo#Dog"` → `"Dog"`).
pub fn type_name(class_iri: &str) -> String {
    java_identifier(local_name(class_iri))
}

/// Returns the delegate field name for a superclass (`"Animal"` → `"animal"`).
pub fn instance_name(class_iri: &str) -> String {
    java_identifier(&lower_first(&type_name(class_iri)))
}

/// Converts a package into a relative directory (`"a.b.c"` → `a/b/c`).
pub fn package_dir(package: &str) -> PathBuf {
    package.split('.').collect()
}

/// Splits a namespace IRI into host labels and path segments.
fn split_namespace(namespace: &str) -> (Vec<&str>, Vec<&str>) {
    let Some((_, rest)) = namespace.split_once("://") else {
        // Non-hierarchical IRIs (`urn:isbn:...`) only contribute path segments.
        let rest = namespace.split_once(':').map_or(namespace, |(_, r)| r);
        return (Vec::new(), split_segments(rest));
    };
    let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
    let host = authority.rsplit('@').next().unwrap_or(authority);
    let host = host.split(':').next().unwrap_or(host);
    (host.split('.').filter(|l| !l.is_empty()).collect(), split_segments(path))
}

fn split_segments(path: &str) -> Vec<&str> {
    path.split(['/', '#', ':']).filter(|s| !s.is_empty()).collect()
}

/// Lower-cases and sanitizes one package segment.
fn package_segment(segment: &str) -> String {
    java_identifier(&segment.to_lowercase())
}
