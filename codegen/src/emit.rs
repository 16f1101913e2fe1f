//! Java source document builder and file writer.
//!
//! Emitters assemble a [`JavaFile`] section by section (package, imports,
//! class comment, declaration, members) and serialize it with
//! [`JavaFile::finish`]. Nothing touches the filesystem until
//! [`write_file`] is called.

use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use owl2java_schema::ClassNode;

/// Column width for wrapped class comments.
pub const WRAP_WIDTH: usize = 80;

/// An in-memory Java compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaFile {
    /// Package declaration.
    pub package: String,
    /// Import targets in emission order (e.g. `"org.example.zoo.*"`).
    pub imports: Vec<String>,
    /// Class comment lines, without the ` * ` prefix.
    pub comment: Vec<String>,
    /// Type declaration line (e.g. `"public interface Dog"`).
    pub declaration: String,
    /// Member blocks, each ending with a newline.
    pub members: Vec<String>,
}

impl JavaFile {
    /// Creates an empty compilation unit.
    pub fn new(package: impl Into<String>, declaration: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            imports: Vec::new(),
            comment: Vec::new(),
            declaration: declaration.into(),
            members: Vec::new(),
        }
    }

    /// Appends an import target.
    pub fn import(&mut self, target: impl Into<String>) {
        self.imports.push(target.into());
    }

    /// Appends a member block.
    pub fn member(&mut self, block: impl Into<String>) {
        self.members.push(block.into());
    }

    /// Serializes the document to Java source text.
    pub fn finish(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "package {};", self.package);
        let _ = writeln!(out);

        if !self.imports.is_empty() {
            for target in &self.imports {
                let _ = writeln!(out, "import {target};");
            }
            let _ = writeln!(out);
        }

        let _ = writeln!(out, "/**");
        for line in &self.comment {
            if line.is_empty() {
                let _ = writeln!(out, " *");
            } else {
                let _ = writeln!(out, " * {line}");
            }
        }
        let _ = writeln!(out, " */");

        let _ = writeln!(out, "{}", self.declaration);
        let _ = writeln!(out, "{{");
        out.push_str(&self.members.join("\n"));
        let _ = writeln!(out, "}}");
        out
    }
}

/// Returns the class comment lines: the wrapped description, or the raw
/// IRI when the class has none.
pub fn class_comment(node: &ClassNode) -> Vec<String> {
    match &node.comment {
        Some(text) => wrap_text(text, WRAP_WIDTH),
        None => vec![node.iri.clone()],
    }
}

/// Greedy word wrap. Width is measured in characters. Line breaks in the
/// input are folded to spaces; a word longer than `width` is kept whole on
/// its own line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    for word in text.split_whitespace() {
        let word_width = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Writes `content` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be written.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write: {}", path.display()))?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}
