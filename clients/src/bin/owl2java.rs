//! `owl2java`: generates Java interfaces and implementations from an ontology.
//!
//! Loads one or more Turtle / N-Triples files (or directories of them) into
//! an in-memory repository, discovers the `owl:Class` / `rdfs:Class`
//! definitions, and writes one interface plus, for classes with properties,
//! one implementation class per ontology class.
//!
//! **Usage:**
//! ```text
//! owl2java <INPUT>... [--out <path>] [--config <file>] [--delegate] [--annotations] [--separate-impl]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use owl2java_codegen::config::load_config;
use owl2java_codegen::{generate, PackageMapper};
use owl2java_schema::{load_classes, GraphRepository};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Generate Java sources from an RDF ontology.
#[derive(Parser)]
#[command(
    name = "owl2java",
    about = "Generate Java interfaces and implementations from an OWL/RDFS ontology"
)]
struct Args {
    /// Turtle (.ttl) or N-Triples (.nt) files, or directories containing them.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory for generated source files.
    #[arg(long, default_value = "generated")]
    out: PathBuf,

    /// Configuration file (defaults to ./owl2java.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Copy superclass properties into each implementation.
    #[arg(long, conflicts_with = "delegate")]
    flatten: bool,

    /// Reach superclass properties through one composed instance per superclass.
    #[arg(long)]
    delegate: bool,

    /// Annotate fields with their predicate IRI.
    #[arg(long)]
    annotations: bool,

    /// Place implementations in an `impl` sub-package.
    #[arg(long)]
    separate_impl: bool,

    /// Map a namespace IRI to a package (`NAMESPACE=PACKAGE`); repeatable.
    #[arg(long = "package", value_name = "NAMESPACE=PACKAGE", value_parser = parse_package_mapping)]
    packages: Vec<(String, String)>,

    /// Prefix for packages derived from namespace IRIs.
    #[arg(long)]
    base_package: Option<String>,

    /// List the loaded classes without generating anything.
    #[arg(long)]
    list: bool,

    /// Print the generation report as JSON.
    #[arg(long)]
    json: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_package_mapping(s: &str) -> Result<(String, String), String> {
    match s.rsplit_once('=') {
        Some((ns, pkg)) if !ns.is_empty() && !pkg.is_empty() => {
            Ok((ns.to_string(), pkg.to_string()))
        }
        _ => Err(format!("expected NAMESPACE=PACKAGE, got `{s}`")),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut config = load_config(args.config.as_deref())?;
    if args.flatten {
        config.generation.flatten_class_structure = true;
    }
    if args.delegate {
        config.generation.flatten_class_structure = false;
    }
    config.generation.generate_annotations |= args.annotations;
    config.generation.separate_implementations |= args.separate_impl;
    if let Some(base) = args.base_package {
        config.packages.base_package = Some(base);
    }
    config.packages.namespaces.extend(args.packages);

    let repo = GraphRepository::from_paths(&args.inputs).context("Failed to load ontology")?;
    tracing::info!("Repository holds {} triples", repo.triple_count());
    let graph = load_classes(&repo).context("Failed to load class definitions")?;

    if args.list {
        for node in graph.iter() {
            println!("{node}");
        }
        return Ok(());
    }

    let packages = PackageMapper::from_config(&config.packages).assign(&graph);
    let report = generate(&graph, &packages, &args.out, &config.generation)?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
        return Ok(());
    }

    println!(
        "Generated {} interfaces, {} implementations ({} classes without properties)",
        report.interface_count,
        report.implementation_count,
        report.skipped.len()
    );
    println!("Files written ({}):", report.files.len());
    for file in &report.files {
        println!("  {file}");
    }
    Ok(())
}
