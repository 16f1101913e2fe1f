//! Builds a [`SchemaGraph`] from a [`SchemaRepository`].

use std::collections::HashMap;

use crate::error::Result;
use crate::model::{ClassNode, SchemaGraph};
use crate::property::load_properties;
use crate::repository::{Binding, ClassVocabulary, SchemaRepository};

/// Loads every class typed `owl:Class` or `rdfs:Class`.
///
/// Class rows are collected from both vocabularies first. When the same IRI
/// is returned more than once (dual-typed classes, or several comments) the
/// last row wins outright: its comment replaces, never merges with, any
/// earlier one. Superclasses and properties are then resolved once per
/// distinct class.
///
/// # Errors
///
/// Returns an error if any query fails; no partial graph is returned.
pub fn load_classes<R: SchemaRepository + ?Sized>(repo: &R) -> Result<SchemaGraph> {
    let mut order: Vec<String> = Vec::new();
    let mut comments: HashMap<String, Option<String>> = HashMap::new();

    for vocabulary in ClassVocabulary::ALL {
        let rows = repo.class_rows(vocabulary)?;
        tracing::debug!("{} rows typed <{}>", rows.len(), vocabulary.iri());
        for row in rows {
            let Some(iri) = row.class.as_iri() else {
                tracing::debug!("Skipping non-IRI class subject {:?}", row.class);
                continue;
            };
            let comment = row.comment.as_ref().and_then(Binding::as_str).map(str::to_string);
            if comments.insert(iri.to_string(), comment).is_none() {
                order.push(iri.to_string());
            }
        }
    }

    let mut graph = SchemaGraph::new();
    for iri in order {
        let comment = comments.remove(&iri).flatten();
        let superclasses = load_superclasses(&iri, repo)?;
        let properties = load_properties(&iri, repo)?;
        tracing::debug!(
            "Loaded <{iri}>: {} superclasses, {} properties",
            superclasses.len(),
            properties.len()
        );
        graph.insert(ClassNode {
            iri,
            comment,
            superclasses,
            properties,
        });
    }

    tracing::info!(
        "Loaded {} classes with {} properties",
        graph.len(),
        graph.property_count()
    );
    Ok(graph)
}

/// Returns the IRI-valued direct superclasses of `class_iri`, in query order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn load_superclasses<R: SchemaRepository + ?Sized>(
    class_iri: &str,
    repo: &R,
) -> Result<Vec<String>> {
    Ok(repo
        .superclass_rows(class_iri)?
        .iter()
        .filter_map(Binding::as_iri)
        .map(str::to_string)
        .collect())
}
