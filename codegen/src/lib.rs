//! `owl2java` code generator.
//!
//! Projects an ontology [`SchemaGraph`] onto Java: every class becomes an
//! interface, and every class with properties also gets an implementation
//! class. Java has multiple interface inheritance but single class
//! inheritance, so an implementation realizes all of its superclass
//! interfaces and materializes inherited properties with one of two
//! layouts (see [`layout`]).
//!
//! ```text
//! <out>/org/example/zoo/Dog.java          ← interface
//! <out>/org/example/zoo/DogImpl.java      ← implementation
//! <out>/org/example/zoo/impl/DogImpl.java ← with separate implementations
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod config;
pub mod emit;
pub mod implementations;
pub mod interfaces;
pub mod layout;
pub mod mapping;

use std::path::{Path, PathBuf};

use anyhow::Result;
use owl2java_schema::{ClassNode, SchemaGraph};
use serde::Serialize;

pub use config::{GenerationOptions, GeneratorConfig, PackageConfig};
pub use layout::{Delegate, Flatten, LayoutContext, PropertyLayout};
pub use mapping::{PackageMap, PackageMapper};

use implementations::{implementation_name, implementation_package, render_implementation};
use interfaces::render_interface;
use mapping::{package_dir, type_name};

/// Report of what was generated.
#[derive(Debug, Default, Serialize)]
pub struct GenerationReport {
    /// Number of interfaces written.
    pub interface_count: usize,
    /// Number of implementation classes written.
    pub implementation_count: usize,
    /// Classes whose implementation was skipped because they have no properties.
    pub skipped: Vec<String>,
    /// Files written, relative to the output directory.
    pub files: Vec<String>,
}

/// Generates interfaces and implementations for every class in `graph`.
///
/// Classes are processed in IRI order.
///
/// # Errors
///
/// Returns an error if a referenced class or package mapping is missing, or
/// if any file cannot be written. Generation stops at the first error.
pub fn generate(
    graph: &SchemaGraph,
    packages: &PackageMap,
    out_dir: &Path,
    options: &GenerationOptions,
) -> Result<GenerationReport> {
    let mut report = GenerationReport::default();
    tracing::info!(
        "Generating {} classes into {} ({} layout)",
        graph.len(),
        out_dir.display(),
        layout::layout_for(options).name()
    );

    for node in graph.iter() {
        let path = emit_interface(node, out_dir, packages)?;
        report.interface_count += 1;
        report.files.push(relative(out_dir, &path));

        match emit_implementation(node, out_dir, packages, graph, options)? {
            Some(path) => {
                report.implementation_count += 1;
                report.files.push(relative(out_dir, &path));
            }
            None => report.skipped.push(node.iri.clone()),
        }
    }

    tracing::info!(
        "Generated {} interfaces and {} implementations",
        report.interface_count,
        report.implementation_count
    );
    Ok(report)
}

/// Writes the interface of `node` and returns its path.
///
/// # Errors
///
/// Returns an error if the class has no package or the file cannot be written.
pub fn emit_interface(node: &ClassNode, out_dir: &Path, packages: &PackageMap) -> Result<PathBuf> {
    let file = render_interface(node, packages)?;
    let path = out_dir
        .join(package_dir(&file.package))
        .join(format!("{}.java", type_name(&node.iri)));
    emit::write_file(&path, &file.finish())?;
    Ok(path)
}

/// Writes the implementation of `node`, if it has one, and returns its path.
///
/// # Errors
///
/// Returns an error if a referenced class or package is missing or the file
/// cannot be written.
pub fn emit_implementation(
    node: &ClassNode,
    out_dir: &Path,
    packages: &PackageMap,
    classes: &SchemaGraph,
    options: &GenerationOptions,
) -> Result<Option<PathBuf>> {
    let ctx = LayoutContext {
        classes,
        packages,
        options,
    };
    let Some(file) = render_implementation(node, &ctx)? else {
        tracing::debug!("<{}> has no properties; no implementation", node.iri);
        return Ok(None);
    };
    let path = implementation_path(out_dir, packages.namespace_for(&node.iri)?, &node.iri, options);
    emit::write_file(&path, &file.finish())?;
    Ok(Some(path))
}

/// Returns where the implementation of a class in `package` is written.
pub fn implementation_path(
    out_dir: &Path,
    package: &str,
    class_iri: &str,
    options: &GenerationOptions,
) -> PathBuf {
    out_dir
        .join(package_dir(&implementation_package(package, options)))
        .join(format!("{}.java", implementation_name(class_iri)))
}

fn relative(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
