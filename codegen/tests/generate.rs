//! End-to-end generation: Turtle → schema graph → Java files on disk.

use std::fs;
use std::path::Path;

use owl2java_codegen::{generate, GenerationOptions, PackageMapper};
use owl2java_schema::{load_classes, GraphRepository, SchemaGraph};
use walkdir::WalkDir;

const ZOO: &str = r#"
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
@prefix zoo: <http://example.org/zoo#> .

zoo:Animal a owl:Class ;
    rdfs:comment "Any living creature kept at the zoo. Every animal has a name that keepers use when recording feeding schedules and veterinary visits." .

zoo:Dog a owl:Class ;
    rdfs:subClassOf zoo:Animal .

zoo:Enclosure a owl:Class .

zoo:name a owl:DatatypeProperty ;
    rdfs:domain zoo:Animal ;
    rdfs:range xsd:string .

zoo:breed a owl:DatatypeProperty ;
    rdfs:domain zoo:Dog ;
    rdfs:range xsd:string .
"#;

fn zoo() -> SchemaGraph {
    let repo = GraphRepository::from_turtle_str(ZOO).unwrap();
    load_classes(&repo).unwrap()
}

fn java_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|x| x == "java"))
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}

fn method_count(source: &str) -> usize {
    source
        .lines()
        .filter(|l| l.trim_start().starts_with("public ") && l.contains('('))
        .count()
}

#[test]
fn flatten_round_trip() {
    let graph = zoo();
    let packages = PackageMapper::new().assign(&graph);
    let out = tempfile::tempdir().unwrap();

    let report = generate(&graph, &packages, out.path(), &GenerationOptions::default()).unwrap();

    assert_eq!(report.interface_count, 3);
    assert_eq!(report.implementation_count, 2);
    assert_eq!(report.skipped, vec!["http://example.org/zoo#Enclosure"]);
    assert_eq!(
        java_files(out.path()),
        vec![
            "org/example/zoo/Animal.java",
            "org/example/zoo/AnimalImpl.java",
            "org/example/zoo/Dog.java",
            "org/example/zoo/DogImpl.java",
            "org/example/zoo/Enclosure.java",
        ]
    );

    let dog = fs::read_to_string(out.path().join("org/example/zoo/DogImpl.java")).unwrap();
    assert!(dog.starts_with("package org.example.zoo;\n\n/**\n * http://example.org/zoo#Dog\n */\n"));
    assert!(dog.contains("public class DogImpl implements Dog, Animal\n"));
    let breed = dog.find("private String breed;").unwrap();
    let name = dog.find("private String name;").unwrap();
    assert!(breed < name);
    assert_eq!(dog.matches("private ").count(), 2);
    assert_eq!(method_count(&dog), 4);
    assert!(!dog.contains("animal"));
}

#[test]
fn delegate_round_trip() {
    let graph = zoo();
    let packages = PackageMapper::new().assign(&graph);
    let out = tempfile::tempdir().unwrap();
    let options = GenerationOptions {
        flatten_class_structure: false,
        ..GenerationOptions::default()
    };

    generate(&graph, &packages, out.path(), &options).unwrap();

    let dog = fs::read_to_string(out.path().join("org/example/zoo/DogImpl.java")).unwrap();
    assert!(dog.contains("private String breed;"));
    assert!(dog.contains("private Animal animal = new org.example.zoo.AnimalImpl();"));
    assert!(!dog.contains("private String name;"));
    assert!(dog.contains("return this.breed;"));
    assert!(dog.contains("return this.animal.getName();"));
    assert!(dog.contains("this.animal.setName( name );"));
    assert_eq!(method_count(&dog), 4);
}

#[test]
fn wrapped_comment_and_interface_without_extends() {
    let graph = zoo();
    let packages = PackageMapper::new().assign(&graph);
    let out = tempfile::tempdir().unwrap();

    generate(&graph, &packages, out.path(), &GenerationOptions::default()).unwrap();

    let animal = fs::read_to_string(out.path().join("org/example/zoo/Animal.java")).unwrap();
    let comment: Vec<&str> = animal
        .lines()
        .filter(|l| l.starts_with(" * "))
        .collect();
    assert!(comment.len() > 1);
    assert!(comment.iter().all(|l| l.len() - 3 <= 80));
    assert!(!animal.contains("http://example.org/zoo#Animal"));

    let dog = fs::read_to_string(out.path().join("org/example/zoo/Dog.java")).unwrap();
    assert!(dog.contains("public interface Dog\n{\n"));
    assert!(!dog.contains("extends"));
    assert!(dog.contains("\tpublic String getBreed();"));
    assert!(!dog.contains("getName"));
}

#[test]
fn separate_implementations_live_in_impl_package() {
    let graph = zoo();
    let packages = PackageMapper::new()
        .with_namespace("http://example.org/zoo#", "com.acme.zoo")
        .assign(&graph);
    let out = tempfile::tempdir().unwrap();
    let options = GenerationOptions {
        generate_annotations: true,
        separate_implementations: true,
        ..GenerationOptions::default()
    };

    let report = generate(&graph, &packages, out.path(), &options).unwrap();

    assert!(report.files.contains(&"com/acme/zoo/impl/DogImpl.java".to_string()));
    assert!(report.files.contains(&"com/acme/zoo/Dog.java".to_string()));
    let dog = fs::read_to_string(out.path().join("com/acme/zoo/impl/DogImpl.java")).unwrap();
    assert!(dog.starts_with(
        "package com.acme.zoo.impl;\n\n\
         import com.acme.zoo.*;\n\
         import org.openimaj.rdf.serialize.Predicate;\n\n"
    ));
    assert!(dog.contains("@Predicate(\"http://example.org/zoo#name\")"));
}

#[test]
fn missing_package_mapping_aborts() {
    let graph = zoo();
    let out = tempfile::tempdir().unwrap();
    let err = generate(
        &graph,
        &owl2java_codegen::PackageMap::new(),
        out.path(),
        &GenerationOptions::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("No package mapping"));
}
