//! Textual include scanning.
//!
//! This is a line heuristic, not a preprocessor. A line counts as an include
//! when it contains `#include`, and the directive is the text between the
//! first pair of double quotes after that marker. Angle-bracket includes
//! are not collected here; see [`crate::flags::FlagMapping::resolve`] for
//! the detection pass that does recognise them.

use crate::{BatchError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

const INCLUDE_MARKER: &str = "#include";

/// A header named by a quoted include directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IncludeDirective(pub String);

impl IncludeDirective {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A discovered source file with its raw text.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Read a source from disk. Bytes that are not UTF-8 are replaced
    /// rather than failing the read.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| BatchError::SourceFileUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8_lossy(&bytes).into_owned();
        Ok(Self::new(path, content))
    }

    pub fn includes(&self) -> Vec<IncludeDirective> {
        extract_includes(&self.content)
    }
}

/// Collect the quoted include targets in `text`, one per matching line at most.
pub fn extract_includes(text: &str) -> Vec<IncludeDirective> {
    text.lines().filter_map(include_on_line).collect()
}

fn include_on_line(line: &str) -> Option<IncludeDirective> {
    let marker = line.find(INCLUDE_MARKER)?;
    let rest = &line[marker + INCLUDE_MARKER.len()..];
    let open = rest.find('"')?;
    let rest = &rest[open + 1..];
    let close = rest.find('"')?;
    Some(IncludeDirective(rest[..close].to_string()))
}

/// Read `path` and return its quoted include targets.
pub fn scan(path: &Path) -> Result<Vec<IncludeDirective>> {
    Ok(SourceFile::read(path)?.includes())
}
