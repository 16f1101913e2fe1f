//! Property model: one ontology property as seen from its domain class.
//!
//! A [`PropertyDef`] renders itself as a Java field declaration and as a
//! getter/setter pair. Accessors can be rendered as bare signatures (for
//! interfaces), as bodies over a local field, or as bodies that forward to a
//! composed delegate instance.

use std::fmt::Write as FmtWrite;

use crate::error::Result;
use crate::model::iris::{OWL_DATATYPE_PROPERTY, OWL_OBJECT_PROPERTY, RDFS_LITERAL, XSD};
use crate::model::local_name;
use crate::names::{java_identifier, lower_first, upper_first};
use crate::repository::{Binding, SchemaRepository};

/// Whether a property is a datatype, object, or untyped RDF property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// `owl:DatatypeProperty`: relates a resource to a literal.
    Datatype,
    /// `owl:ObjectProperty`: relates two resources.
    Object,
    /// Any other `rdf:Property`.
    Plain,
}

/// One property of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDef {
    /// Full IRI.
    pub iri: String,
    /// Datatype, object or plain property.
    pub kind: PropertyKind,
    /// Full IRI of the range, or `None` if unspecified.
    pub range: Option<String>,
    /// The `rdfs:comment` of the property, if any.
    pub comment: Option<String>,
}

impl PropertyDef {
    /// Creates a property with no range and no comment.
    #[must_use]
    pub fn new(iri: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            iri: iri.into(),
            kind,
            range: None,
            comment: None,
        }
    }

    /// Sets the range IRI.
    #[must_use]
    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    /// Returns the local name of the property IRI.
    #[must_use]
    pub fn local_name(&self) -> &str {
        local_name(&self.iri)
    }

    /// Returns the Java field name (`"Breed"` → `"breed"`).
    #[must_use]
    pub fn field_name(&self) -> String {
        java_identifier(&lower_first(self.local_name()))
    }

    /// Returns the Java type used for the field and accessors.
    #[must_use]
    pub fn java_type(&self) -> &'static str {
        match (&self.range, self.kind) {
            (_, PropertyKind::Object) => "java.net.URI",
            (Some(range), _) => xsd_to_java_type(range).unwrap_or("java.net.URI"),
            (None, _) => "Object",
        }
    }

    /// Renders the field declaration, optionally annotated with the
    /// property IRI.
    #[must_use]
    pub fn render_field(&self, indent: &str, with_annotation: bool) -> String {
        let mut out = String::new();
        let doc = self.comment.as_deref().unwrap_or(&self.iri);
        let _ = writeln!(out, "{indent}/** {} */", single_line(doc));
        if with_annotation {
            let _ = writeln!(out, "{indent}@Predicate(\"{}\")", self.iri);
        }
        let _ = writeln!(
            out,
            "{indent}private {} {};",
            self.java_type(),
            self.field_name()
        );
        out
    }

    /// Renders the getter/setter pair.
    ///
    /// With `include_body == false` only the signatures are produced. With a
    /// body, accessors read and write `this.<field>`, or forward through
    /// `this.<instance>` when `delegate` names a composed instance.
    #[must_use]
    pub fn render_accessors(&self, indent: &str, include_body: bool, delegate: Option<&str>) -> String {
        let ty = self.java_type();
        let field = self.field_name();
        let suffix = upper_first(&field);
        let mut out = String::new();

        if !include_body {
            let _ = writeln!(out, "{indent}public {ty} get{suffix}();");
            let _ = writeln!(out);
            let _ = writeln!(out, "{indent}public void set{suffix}( final {ty} {field} );");
            return out;
        }

        let (read, write) = match delegate {
            Some(instance) => (
                format!("return this.{instance}.get{suffix}();"),
                format!("this.{instance}.set{suffix}( {field} );"),
            ),
            None => (
                format!("return this.{field};"),
                format!("this.{field} = {field};"),
            ),
        };

        let _ = writeln!(out, "{indent}public {ty} get{suffix}()");
        let _ = writeln!(out, "{indent}{{");
        let _ = writeln!(out, "{indent}\t{read}");
        let _ = writeln!(out, "{indent}}}");
        let _ = writeln!(out);
        let _ = writeln!(out, "{indent}public void set{suffix}( final {ty} {field} )");
        let _ = writeln!(out, "{indent}{{");
        let _ = writeln!(out, "{indent}\t{write}");
        let _ = writeln!(out, "{indent}}}");
        out
    }
}

/// Loads the properties whose `rdfs:domain` is `class_iri`, in query order.
///
/// Rows whose subject is not an IRI are skipped.
///
/// # Errors
///
/// Returns an error if the repository query fails.
pub fn load_properties<R: SchemaRepository + ?Sized>(
    class_iri: &str,
    repo: &R,
) -> Result<Vec<PropertyDef>> {
    let mut properties = Vec::new();
    for row in repo.property_rows(class_iri)? {
        let Some(iri) = row.property.as_iri() else {
            continue;
        };
        let kind = if row.types.iter().any(|t| t.as_iri() == Some(OWL_OBJECT_PROPERTY)) {
            PropertyKind::Object
        } else if row.types.iter().any(|t| t.as_iri() == Some(OWL_DATATYPE_PROPERTY)) {
            PropertyKind::Datatype
        } else {
            PropertyKind::Plain
        };
        properties.push(PropertyDef {
            iri: iri.to_string(),
            kind,
            range: row.range.as_ref().and_then(Binding::as_iri).map(str::to_string),
            comment: row.comment.as_ref().and_then(Binding::as_str).map(str::to_string),
        });
    }
    Ok(properties)
}

/// Maps an XSD (or `rdfs:Literal`) IRI to a boxed Java type.
#[must_use]
pub fn xsd_to_java_type(iri: &str) -> Option<&'static str> {
    if iri == RDFS_LITERAL {
        return Some("String");
    }
    let local = iri.strip_prefix(XSD)?;
    let ty = match local {
        "string" | "normalizedString" | "token" | "anyURI" | "language" | "Name" | "NCName" => {
            "String"
        }
        "boolean" => "Boolean",
        "int" | "integer" | "short" | "byte" | "nonNegativeInteger" | "positiveInteger"
        | "nonPositiveInteger" | "negativeInteger" | "unsignedInt" | "unsignedShort"
        | "unsignedByte" => "Integer",
        "long" | "unsignedLong" => "Long",
        "float" => "Float",
        "double" => "Double",
        "decimal" => "java.math.BigDecimal",
        "dateTime" | "date" | "time" => "java.util.Date",
        _ => "String",
    };
    Some(ty)
}

/// Folds line breaks so a comment fits on a single `/** ... */` line.
fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
