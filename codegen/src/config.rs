//! Generator configuration.
//!
//! Read from an optional `owl2java.toml`; command-line flags are applied on
//! top by the caller.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Generation policy flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Copy superclass properties into each implementation (`true`) or reach
    /// them through one composed instance per superclass (`false`).
    pub flatten_class_structure: bool,
    /// Annotate fields with `@Predicate` and import the annotation.
    pub generate_annotations: bool,
    /// Place implementations in an `impl` sub-package.
    pub separate_implementations: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            flatten_class_structure: true,
            generate_annotations: false,
            separate_implementations: false,
        }
    }
}

/// The `[packages]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    /// Prefix replacing the host-derived part of generated package names.
    pub base_package: Option<String>,
    /// Explicit namespace IRI → package mappings.
    pub namespaces: BTreeMap<String, String>,
}

/// Complete generator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Generation policy flags.
    pub generation: GenerationOptions,
    /// Package assignment.
    pub packages: PackageConfig,
}

/// Returns the configuration file looked up when none is given.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("owl2java.toml")
}

/// Loads the configuration.
///
/// An explicit `path` must exist. Without one, `owl2java.toml` in the
/// working directory is used when present and defaults otherwise.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let default = default_config_path();
            if !default.exists() {
                return Ok(GeneratorConfig::default());
            }
            default
        }
    };
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("Invalid config {}", path.display()))
}

/// Parses configuration from TOML text.
///
/// # Errors
///
/// Returns an error if the text is not valid TOML for [`GeneratorConfig`].
pub fn parse_config(contents: &str) -> Result<GeneratorConfig> {
    Ok(toml::from_str(contents)?)
}
