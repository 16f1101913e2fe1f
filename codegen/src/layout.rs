//! Inheritance layout strategies.
//!
//! Java allows a class to implement many interfaces but extend only one
//! class. A [`PropertyLayout`] decides how the properties a class inherits
//! from its direct superclasses are materialized in its implementation body:
//!
//! - [`Flatten`] copies every superclass property into the class as its own
//!   field with plain accessors.
//! - [`Delegate`] composes one private instance per superclass and forwards
//!   the inherited accessors to it.

use anyhow::{anyhow, Result};
use owl2java_schema::model::iris::OWL_THING;
use owl2java_schema::{ClassNode, PropertyDef, SchemaGraph};

use crate::config::GenerationOptions;
use crate::implementations::implementation_package;
use crate::mapping::{instance_name, type_name, PackageMap};

/// Indentation of class members.
pub const INDENT: &str = "\t";

/// Read-only view of the generation run handed to a layout.
#[derive(Debug, Clone, Copy)]
pub struct LayoutContext<'a> {
    /// Every class in the schema.
    pub classes: &'a SchemaGraph,
    /// Class IRI → package.
    pub packages: &'a PackageMap,
    /// Generation flags.
    pub options: &'a GenerationOptions,
}

/// Renders the member blocks of an implementation class.
pub trait PropertyLayout {
    /// Short strategy name for logs and reports.
    fn name(&self) -> &'static str;

    /// Returns the member blocks (fields, then accessors) for `node`.
    ///
    /// # Errors
    ///
    /// Returns an error if a superclass is missing from the schema graph or
    /// has no package.
    fn members(&self, node: &ClassNode, ctx: &LayoutContext<'_>) -> Result<Vec<String>>;
}

/// Returns the layout selected by `options`.
pub fn layout_for(options: &GenerationOptions) -> &'static dyn PropertyLayout {
    if options.flatten_class_structure {
        &Flatten
    } else {
        &Delegate
    }
}

/// Copies direct superclass properties into the class.
///
/// Only one level is copied: a superclass contributes its own properties,
/// not those of its ancestors.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flatten;

impl PropertyLayout for Flatten {
    fn name(&self) -> &'static str {
        "flatten"
    }

    fn members(&self, node: &ClassNode, ctx: &LayoutContext<'_>) -> Result<Vec<String>> {
        let mut properties: Vec<&PropertyDef> = node.properties.iter().collect();
        for superclass in superclass_nodes(node, ctx.classes)? {
            properties.extend(superclass.properties.iter());
        }

        let annotate = ctx.options.generate_annotations;
        let mut members: Vec<String> = properties
            .iter()
            .map(|p| p.render_field(INDENT, annotate))
            .collect();
        members.extend(properties.iter().map(|p| p.render_accessors(INDENT, true, None)));
        Ok(members)
    }
}

/// Composes one instance per direct superclass and forwards to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Delegate;

impl PropertyLayout for Delegate {
    fn name(&self) -> &'static str {
        "delegate"
    }

    fn members(&self, node: &ClassNode, ctx: &LayoutContext<'_>) -> Result<Vec<String>> {
        let annotate = ctx.options.generate_annotations;
        let mut members: Vec<String> = node
            .properties
            .iter()
            .map(|p| p.render_field(INDENT, annotate))
            .collect();

        // Instance names must be unique fields; the first superclass claiming a name keeps it.
        let mut delegates: Vec<(String, &ClassNode)> = Vec::new();
        for superclass in superclass_nodes(node, ctx.classes)? {
            let instance = instance_name(&superclass.iri);
            if delegates.iter().any(|(name, _)| *name == instance) {
                tracing::warn!(
                    "<{}>: superclass <{}> reuses delegate name `{instance}`; skipped",
                    node.iri,
                    superclass.iri
                );
                continue;
            }
            members.push(delegate_field(superclass, &instance, ctx)?);
            delegates.push((instance, superclass));
        }

        members.extend(
            node.properties
                .iter()
                .map(|p| p.render_accessors(INDENT, true, None)),
        );
        for (instance, superclass) in &delegates {
            members.extend(
                superclass
                    .properties
                    .iter()
                    .map(|p| p.render_accessors(INDENT, true, Some(instance.as_str()))),
            );
        }
        Ok(members)
    }
}

/// Renders the private field holding a superclass instance.
///
/// The field is initialized with the superclass implementation when one is
/// generated, i.e. when the superclass has properties of its own.
fn delegate_field(superclass: &ClassNode, instance: &str, ctx: &LayoutContext<'_>) -> Result<String> {
    let ty = type_name(&superclass.iri);
    let init = if superclass.is_empty() {
        String::new()
    } else {
        let package = ctx.packages.namespace_for(&superclass.iri)?;
        let package = implementation_package(package, ctx.options);
        format!(" = new {package}.{ty}Impl()")
    };
    Ok(format!(
        "{INDENT}/** {ty} instance */\n{INDENT}private {ty} {instance}{init};\n"
    ))
}

/// Returns the direct superclasses that shape the implementation, skipping
/// `owl:Thing`. Duplicates are kept.
pub fn direct_superclasses(node: &ClassNode) -> impl Iterator<Item = &str> {
    node.superclasses
        .iter()
        .map(String::as_str)
        .filter(|iri| *iri != OWL_THING)
}

/// Resolves [`direct_superclasses`] against the schema graph.
///
/// # Errors
///
/// Returns an error naming the first superclass absent from `classes`.
pub fn superclass_nodes<'a>(node: &ClassNode, classes: &'a SchemaGraph) -> Result<Vec<&'a ClassNode>> {
    direct_superclasses(node)
        .map(|iri| {
            classes
                .get(iri)
                .ok_or_else(|| anyhow!("<{}>: superclass <{iri}> is not a known class", node.iri))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use owl2java_schema::PropertyKind;

    use super::*;
    use crate::mapping::PackageMapper;

    const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    fn class(iri: &str, supers: &[&str], props: &[&str]) -> ClassNode {
        let mut node = ClassNode::new(iri);
        node.superclasses = supers.iter().map(|s| s.to_string()).collect();
        node.properties = props
            .iter()
            .map(|p| PropertyDef::new(*p, PropertyKind::Datatype).with_range(XSD_STRING))
            .collect();
        node
    }

    fn schema() -> SchemaGraph {
        [
            class("http://ex.org/z#Animal", &[], &["http://ex.org/z#name"]),
            class(
                "http://ex.org/z#Pet",
                &[],
                &["http://ex.org/z#owner", "http://ex.org/z#vet"],
            ),
            class(
                "http://ex.org/z#Dog",
                &["http://ex.org/z#Animal", "http://ex.org/z#Pet", OWL_THING],
                &["http://ex.org/z#breed"],
            ),
        ]
        .into_iter()
        .collect()
    }

    fn render(layout: &dyn PropertyLayout, options: GenerationOptions) -> Vec<String> {
        let classes = schema();
        let packages = PackageMapper::new().assign(&classes);
        let ctx = LayoutContext {
            classes: &classes,
            packages: &packages,
            options: &options,
        };
        let dog = classes.get("http://ex.org/z#Dog").unwrap();
        layout.members(dog, &ctx).unwrap()
    }

    fn field_names(members: &[String]) -> Vec<String> {
        members
            .iter()
            .filter_map(|m| m.lines().find(|l| l.trim_start().starts_with("private ")))
            .filter_map(|l| l.split_whitespace().nth(2))
            .map(|name| name.trim_end_matches(';').to_string())
            .collect()
    }

    #[test]
    fn flatten_orders_own_then_superclasses() {
        let members = render(&Flatten, GenerationOptions::default());

        // 4 properties: 4 fields + 4 accessor pairs.
        assert_eq!(members.len(), 8);
        assert_eq!(field_names(&members), vec!["breed", "name", "owner", "vet"]);
        assert!(members[4].contains("getBreed()"));
        assert!(members[5].contains("getName()"));
        assert!(members.iter().all(|m| !m.contains("this.animal")));
    }

    #[test]
    fn delegate_composes_one_instance_per_superclass() {
        let options = GenerationOptions {
            flatten_class_structure: false,
            ..GenerationOptions::default()
        };
        let members = render(&Delegate, options);
        let all = members.concat();

        assert_eq!(field_names(&members), vec!["breed", "animal", "pet"]);
        assert!(all.contains("private Animal animal = new org.ex.z.AnimalImpl();"));
        assert!(all.contains("return this.breed;"));
        assert!(all.contains("return this.animal.getName();"));
        assert!(all.contains("return this.pet.getOwner();"));
        assert!(all.contains("this.pet.setVet( vet );"));
        assert!(!all.contains("private String name;"));
    }

    #[test]
    fn unknown_superclass_is_an_error() {
        let classes: SchemaGraph = [class("http://ex.org/z#Dog", &["http://ex.org/z#Ghost"], &[])]
            .into_iter()
            .collect();
        let dog = classes.get("http://ex.org/z#Dog").unwrap();
        let err = superclass_nodes(dog, &classes).unwrap_err();
        assert!(err.to_string().contains("http://ex.org/z#Ghost"));
    }

    #[test]
    fn layout_selection() {
        assert_eq!(layout_for(&GenerationOptions::default()).name(), "flatten");
        let delegate = GenerationOptions {
            flatten_class_structure: false,
            ..GenerationOptions::default()
        };
        assert_eq!(layout_for(&delegate).name(), "delegate");
    }
}
