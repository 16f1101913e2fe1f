//! Implementation generation: ontology class → concrete Java class.
//!
//! The implementation realizes its own interface plus the interface of every
//! direct superclass. It never extends another generated class; inherited
//! properties are materialized by the selected [`PropertyLayout`].
//!
//! [`PropertyLayout`]: crate::layout::PropertyLayout

use std::collections::BTreeSet;

use anyhow::Result;
use owl2java_schema::ClassNode;

use crate::config::GenerationOptions;
use crate::emit::{class_comment, JavaFile};
use crate::layout::{direct_superclasses, layout_for, LayoutContext};
use crate::mapping::{type_name, PackageMap};

/// Sub-package holding implementations when they are kept separate.
pub const IMPL_SUBPACKAGE: &str = "impl";

/// Import that makes the `@Predicate` field annotation available.
pub const PREDICATE_IMPORT: &str = "org.openimaj.rdf.serialize.Predicate";

/// Returns the package implementations of classes in `package` live in.
pub fn implementation_package(package: &str, options: &GenerationOptions) -> String {
    if options.separate_implementations {
        format!("{package}.{IMPL_SUBPACKAGE}")
    } else {
        package.to_string()
    }
}

/// Returns the implementation class name (`Dog` → `DogImpl`).
pub fn implementation_name(class_iri: &str) -> String {
    format!("{}Impl", type_name(class_iri))
}

/// Returns the wildcard import targets for the superclass packages of
/// `node`: deduplicated, sorted, and without the class's own package.
///
/// # Errors
///
/// Returns an error if the class or any superclass has no package.
pub fn import_set(node: &ClassNode, packages: &PackageMap) -> Result<Vec<String>> {
    let own = packages.namespace_for(&node.iri)?;
    let mut imports = BTreeSet::new();
    for iri in direct_superclasses(node) {
        imports.insert(packages.namespace_for(iri)?);
    }
    imports.remove(own);
    Ok(imports.into_iter().map(|p| format!("{p}.*")).collect())
}

/// Builds the implementation document for `node`.
///
/// Returns `None` for a class without properties: there is nothing to
/// store, so no implementation is generated.
///
/// # Errors
///
/// Returns an error if a referenced class is missing from the graph or has
/// no package.
pub fn render_implementation(node: &ClassNode, ctx: &LayoutContext<'_>) -> Result<Option<JavaFile>> {
    if node.is_empty() {
        return Ok(None);
    }

    let package = ctx.packages.namespace_for(&node.iri)?;
    let mut interfaces: Vec<String> = vec![type_name(&node.iri)];
    for iri in direct_superclasses(node) {
        let name = type_name(iri);
        if !interfaces.contains(&name) {
            interfaces.push(name);
        }
    }

    let mut f = JavaFile::new(
        implementation_package(package, ctx.options),
        format!(
            "public class {} implements {}",
            implementation_name(&node.iri),
            interfaces.join(", ")
        ),
    );

    if ctx.options.separate_implementations {
        f.import(format!("{package}.*"));
    }
    if ctx.options.generate_annotations {
        f.import(PREDICATE_IMPORT);
    }
    for target in import_set(node, ctx.packages)? {
        f.import(target);
    }

    f.comment = class_comment(node);

    let layout = layout_for(ctx.options);
    tracing::trace!("<{}>: {} layout", node.iri, layout.name());
    f.members = layout.members(node, ctx)?;
    Ok(Some(f))
}
