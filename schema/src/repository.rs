//! Schema query layer.
//!
//! [`SchemaRepository`] is the read-only query surface the loader depends on.
//! [`GraphRepository`] answers those queries from an in-memory `sophia` graph
//! populated from Turtle or N-Triples documents. Triples are kept in document
//! order, so superclasses and properties come back in the order they were
//! written.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use sophia_api::graph::Graph;
use sophia_api::ns::{owl, rdf, rdfs};
use sophia_api::source::TripleSource;
use sophia_api::term::matcher::Any;
use sophia_api::term::{IriRef, SimpleTerm, Term};
use sophia_api::triple::Triple;
use sophia_turtle::parser::{nt, turtle};
use walkdir::WalkDir;

use crate::error::{Result, SchemaError};
use crate::model::iris::{OWL_CLASS, RDFS_CLASS};

/// A value bound to a query variable, tagged with its RDF term kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// A resource identifier.
    Iri(String),
    /// A literal's lexical form.
    Literal(String),
    /// A blank node.
    Blank,
}

impl Binding {
    /// Returns the IRI if this binding is a proper resource identifier.
    #[must_use]
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Binding::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Returns the string value of an IRI or literal binding.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Binding::Iri(s) | Binding::Literal(s) => Some(s),
            Binding::Blank => None,
        }
    }
}

/// The two vocabularies recognized as meaning "is a class".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassVocabulary {
    /// `owl:Class`.
    Owl,
    /// `rdfs:Class`.
    Rdfs,
}

impl ClassVocabulary {
    /// Both vocabularies in the order the loader queries them.
    pub const ALL: [ClassVocabulary; 2] = [ClassVocabulary::Owl, ClassVocabulary::Rdfs];

    /// Returns the IRI of the class marker.
    #[must_use]
    pub fn iri(self) -> &'static str {
        match self {
            ClassVocabulary::Owl => OWL_CLASS,
            ClassVocabulary::Rdfs => RDFS_CLASS,
        }
    }
}

/// One row of a class-enumeration query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRow {
    /// The subject typed as a class.
    pub class: Binding,
    /// The optional `rdfs:comment` attached to the subject.
    pub comment: Option<Binding>,
}

/// One row of a property-enumeration query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRow {
    /// The subject whose `rdfs:domain` is the queried class.
    pub property: Binding,
    /// Every `rdf:type` of the property.
    pub types: Vec<Binding>,
    /// The first `rdfs:range` of the property, if any.
    pub range: Option<Binding>,
    /// The first `rdfs:comment` of the property, if any.
    pub comment: Option<Binding>,
}

/// Read operations the schema loader depends on.
pub trait SchemaRepository {
    /// Enumerates every subject typed as a class under `vocabulary`.
    ///
    /// A subject with several comments yields one row per comment; a subject
    /// with none yields a single row without a comment.
    ///
    /// # Errors
    ///
    /// Returns an error if the query cannot be evaluated.
    fn class_rows(&self, vocabulary: ClassVocabulary) -> Result<Vec<ClassRow>>;

    /// Enumerates the direct `rdfs:subClassOf` targets of `class_iri`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query cannot be evaluated.
    fn superclass_rows(&self, class_iri: &str) -> Result<Vec<Binding>>;

    /// Enumerates the properties whose `rdfs:domain` is `class_iri`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query cannot be evaluated.
    fn property_rows(&self, class_iri: &str) -> Result<Vec<PropertyRow>>;
}

/// RDF serialization accepted by [`GraphRepository`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    /// Turtle 1.1 (`.ttl`).
    Turtle,
    /// N-Triples (`.nt`).
    NTriples,
}

impl RdfFormat {
    /// Infers the format from a file extension; anything but `.nt` is Turtle.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("nt") => RdfFormat::NTriples,
            _ => RdfFormat::Turtle,
        }
    }

    fn is_rdf_file(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ttl") || ext.eq_ignore_ascii_case("nt"))
    }
}

type StoredTriple = [SimpleTerm<'static>; 3];

/// In-memory repository over a `sophia` graph.
///
/// Triples are stored once each, in the order they were first parsed.
#[derive(Debug, Default)]
pub struct GraphRepository {
    graph: Vec<StoredTriple>,
    seen: HashSet<StoredTriple>,
}

impl GraphRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository from an inline Turtle document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid Turtle.
    pub fn from_turtle_str(ttl: &str) -> Result<Self> {
        let mut repo = Self::new();
        repo.add_str(ttl, RdfFormat::Turtle, Path::new("<inline>"))?;
        Ok(repo)
    }

    /// Builds a repository from files or directories.
    ///
    /// Directories are walked recursively for `.ttl` and `.nt` files.
    ///
    /// # Errors
    ///
    /// Returns an error if any file cannot be read or parsed.
    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut repo = Self::new();
        for path in paths {
            repo.add_path(path.as_ref())?;
        }
        Ok(repo)
    }

    /// Loads one file, or every RDF file below a directory, into the repository.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed.
    pub fn add_path(&mut self, path: &Path) -> Result<()> {
        if path.is_dir() {
            let mut files: Vec<PathBuf> = Vec::new();
            for entry in WalkDir::new(path) {
                let entry = entry.map_err(|e| SchemaError::Io {
                    path: path.to_path_buf(),
                    source: e.into(),
                })?;
                if entry.file_type().is_file() && RdfFormat::is_rdf_file(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            files.sort();
            if files.is_empty() {
                return Err(SchemaError::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
            for file in &files {
                self.add_file(file)?;
            }
            return Ok(());
        }
        self.add_file(path)
    }

    fn add_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.add_str(&content, RdfFormat::from_path(path), path)
    }

    /// Parses `content` and appends its triples to the repository.
    ///
    /// A triple already present is not stored again.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid in `format`; nothing is
    /// added in that case.
    pub fn add_str(&mut self, content: &str, format: RdfFormat, origin: &Path) -> Result<()> {
        let parse_error = |message: String| SchemaError::Parse {
            path: origin.to_path_buf(),
            message,
        };
        let parsed: Vec<StoredTriple> = match format {
            RdfFormat::Turtle => turtle::parse_str(content)
                .collect_triples()
                .map_err(|e| parse_error(e.to_string()))?,
            RdfFormat::NTriples => nt::parse_str(content)
                .collect_triples()
                .map_err(|e| parse_error(e.to_string()))?,
        };

        let mut added = 0;
        for triple in parsed {
            if self.seen.insert(triple.clone()) {
                self.graph.push(triple);
                added += 1;
            }
        }
        tracing::debug!("Loaded {added} triples from {}", origin.display());
        Ok(())
    }

    /// Returns the number of distinct triples held.
    #[must_use]
    pub fn triple_count(&self) -> usize {
        self.graph.len()
    }

    /// Returns the first object of `(subject, predicate, ?)`.
    fn first_object<P: Term>(&self, subject: &str, predicate: P) -> Result<Option<Binding>> {
        Ok(self.objects(subject, predicate)?.into_iter().next())
    }

    /// Returns every object of `(subject, predicate, ?)` in graph order.
    fn objects<P: Term>(&self, subject: &str, predicate: P) -> Result<Vec<Binding>> {
        let mut out = Vec::new();
        for t in self
            .graph
            .triples_matching([IriRef::new_unchecked(subject)], [predicate], Any)
        {
            let t = t.map_err(|e| SchemaError::Query(e.to_string()))?;
            out.push(binding(t.o()));
        }
        Ok(out)
    }
}

impl SchemaRepository for GraphRepository {
    fn class_rows(&self, vocabulary: ClassVocabulary) -> Result<Vec<ClassRow>> {
        let marker = match vocabulary {
            ClassVocabulary::Owl => owl::Class,
            ClassVocabulary::Rdfs => rdfs::Class,
        };

        let mut rows = Vec::new();
        for t in self.graph.triples_matching(Any, [rdf::type_], [marker]) {
            let t = t.map_err(|e| SchemaError::Query(e.to_string()))?;
            let class = binding(t.s());
            let comments = match class.as_iri() {
                Some(iri) => self.objects(iri, rdfs::comment)?,
                None => Vec::new(),
            };
            if comments.is_empty() {
                rows.push(ClassRow {
                    class,
                    comment: None,
                });
            } else {
                for comment in comments {
                    rows.push(ClassRow {
                        class: class.clone(),
                        comment: Some(comment),
                    });
                }
            }
        }
        Ok(rows)
    }

    fn superclass_rows(&self, class_iri: &str) -> Result<Vec<Binding>> {
        self.objects(class_iri, rdfs::subClassOf)
    }

    fn property_rows(&self, class_iri: &str) -> Result<Vec<PropertyRow>> {
        let mut rows = Vec::new();
        for t in self
            .graph
            .triples_matching(Any, [rdfs::domain], [IriRef::new_unchecked(class_iri)])
        {
            let t = t.map_err(|e| SchemaError::Query(e.to_string()))?;
            let property = binding(t.s());
            let row = match property.as_iri() {
                Some(iri) => PropertyRow {
                    types: self.objects(iri, rdf::type_)?,
                    range: self.first_object(iri, rdfs::range)?,
                    comment: self.first_object(iri, rdfs::comment)?,
                    property,
                },
                None => PropertyRow {
                    property,
                    types: Vec::new(),
                    range: None,
                    comment: None,
                },
            };
            rows.push(row);
        }
        Ok(rows)
    }
}

/// Converts a `sophia` term into a [`Binding`].
fn binding<T: Term>(term: T) -> Binding {
    if let Some(iri) = term.iri() {
        Binding::Iri(iri.as_str().to_string())
    } else if let Some(lex) = term.lexical_form() {
        Binding::Literal(lex.to_string())
    } else {
        Binding::Blank
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZOO: &str = r#"
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
@prefix zoo: <http://example.org/zoo#> .

zoo:Animal a owl:Class ;
    rdfs:comment "A living creature." .

zoo:Dog a owl:Class ;
    rdfs:subClassOf zoo:Animal ;
    rdfs:subClassOf [ a owl:Restriction ] .

[] a owl:Class .

zoo:name a owl:DatatypeProperty ;
    rdfs:domain zoo:Animal ;
    rdfs:range xsd:string .
"#;

    #[test]
    fn class_rows_carry_optional_comment() {
        let repo = GraphRepository::from_turtle_str(ZOO).unwrap();
        let rows = repo.class_rows(ClassVocabulary::Owl).unwrap();

        assert_eq!(rows.len(), 3);
        let animal = rows
            .iter()
            .find(|r| r.class.as_iri() == Some("http://example.org/zoo#Animal"))
            .unwrap();
        assert_eq!(
            animal.comment,
            Some(Binding::Literal("A living creature.".to_string()))
        );
        assert!(rows.iter().any(|r| r.class == Binding::Blank));
        assert!(repo.class_rows(ClassVocabulary::Rdfs).unwrap().is_empty());
    }

    #[test]
    fn superclass_rows_include_blank_nodes() {
        let repo = GraphRepository::from_turtle_str(ZOO).unwrap();
        let supers = repo.superclass_rows("http://example.org/zoo#Dog").unwrap();

        assert_eq!(supers.len(), 2);
        assert!(supers.contains(&Binding::Iri("http://example.org/zoo#Animal".to_string())));
        assert!(supers.contains(&Binding::Blank));
    }

    #[test]
    fn property_rows_resolve_type_and_range() {
        let repo = GraphRepository::from_turtle_str(ZOO).unwrap();
        let rows = repo.property_rows("http://example.org/zoo#Animal").unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].range,
            Some(Binding::Iri(
                "http://www.w3.org/2001/XMLSchema#string".to_string()
            ))
        );
        assert!(rows[0].types.contains(&Binding::Iri(
            "http://www.w3.org/2002/07/owl#DatatypeProperty".to_string()
        )));
    }

    #[test]
    fn malformed_turtle_is_a_parse_error() {
        let err = GraphRepository::from_turtle_str("zoo:Dog a .").unwrap_err();
        assert!(matches!(err, SchemaError::Parse { .. }));
    }

    #[test]
    fn superclasses_follow_document_order() {
        // Pet is mentioned before Dog's subclass statement.
        let repo = GraphRepository::from_turtle_str(
            r#"
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix zoo: <http://example.org/zoo#> .

zoo:Pet rdfs:comment "Kept for company." .
zoo:Dog rdfs:subClassOf zoo:Animal , zoo:Pet .
"#,
        )
        .unwrap();

        assert_eq!(
            repo.superclass_rows("http://example.org/zoo#Dog").unwrap(),
            vec![
                Binding::Iri("http://example.org/zoo#Animal".to_string()),
                Binding::Iri("http://example.org/zoo#Pet".to_string()),
            ]
        );
    }

    #[test]
    fn properties_follow_document_order() {
        let repo = GraphRepository::from_turtle_str(
            r#"
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix zoo: <http://example.org/zoo#> .

zoo:weight rdfs:comment "Mentioned first." .
zoo:name rdfs:domain zoo:Animal .
zoo:weight rdfs:domain zoo:Animal .
"#,
        )
        .unwrap();
        let names: Vec<Binding> = repo
            .property_rows("http://example.org/zoo#Animal")
            .unwrap()
            .into_iter()
            .map(|row| row.property)
            .collect();

        assert_eq!(
            names,
            vec![
                Binding::Iri("http://example.org/zoo#name".to_string()),
                Binding::Iri("http://example.org/zoo#weight".to_string()),
            ]
        );
    }

    #[test]
    fn repeated_triples_are_stored_once() {
        let mut repo = GraphRepository::from_turtle_str(ZOO).unwrap();
        let count = repo.triple_count();
        repo.add_str(ZOO, RdfFormat::Turtle, Path::new("<again>")).unwrap();

        assert_eq!(repo.triple_count(), count);
        assert_eq!(repo.property_rows("http://example.org/zoo#Animal").unwrap().len(), 1);
    }

    #[test]
    fn directory_walk_accepts_upper_case_extensions() {
        assert!(RdfFormat::is_rdf_file(Path::new("zoo.TTL")));
        assert!(RdfFormat::is_rdf_file(Path::new("zoo.Nt")));
        assert!(!RdfFormat::is_rdf_file(Path::new("zoo.owl")));
    }

    #[test]
    fn format_is_inferred_from_extension() {
        assert_eq!(RdfFormat::from_path(Path::new("a.nt")), RdfFormat::NTriples);
        assert_eq!(RdfFormat::from_path(Path::new("a.ttl")), RdfFormat::Turtle);
        assert_eq!(RdfFormat::from_path(Path::new("a.owl")), RdfFormat::Turtle);
    }
}
