//! Interface generation: ontology class → Java interface.
//!
//! The interface carries accessor signatures for the class's own properties
//! only. Superclass interfaces are not extended here; an implementation
//! class declares conformance to its own interface and to every superclass
//! interface directly.

use anyhow::Result;
use owl2java_schema::ClassNode;

use crate::emit::{class_comment, JavaFile};
use crate::layout::INDENT;
use crate::mapping::{type_name, PackageMap};

/// Builds the interface document for `node`.
///
/// Runs for every class, including those without properties.
///
/// # Errors
///
/// Returns an error if the class has no package.
pub fn render_interface(node: &ClassNode, packages: &PackageMap) -> Result<JavaFile> {
    let package = packages.namespace_for(&node.iri)?;
    let mut f = JavaFile::new(package, format!("public interface {}", type_name(&node.iri)));
    f.comment = class_comment(node);
    for p in &node.properties {
        f.member(p.render_accessors(INDENT, false, None));
    }
    Ok(f)
}
