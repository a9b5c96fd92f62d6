//! Source discovery in the project directory.

use crate::{BatchError, Result};
use std::path::{Path, PathBuf};

/// Lists the entries directly under a directory whose name ends in a given
/// extension.
pub trait SourceLister {
    /// Paths of the matching entries in `directory`.
    fn list(&self, directory: &Path, extension: &str) -> Result<Vec<PathBuf>>;
}

/// Lister backed by `std::fs::read_dir`. Not recursive.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLister;

impl SourceLister for FsLister {
    fn list(&self, directory: &Path, extension: &str) -> Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(directory).map_err(|source| {
            BatchError::DirectoryUnreadable {
                path: directory.to_path_buf(),
                source,
            }
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("skipping unreadable entry in {}: {}", directory.display(), e);
                    continue;
                }
            };

            // A directory named `foo.cpp` is not a source.
            if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }

            let path = entry.path();
            if has_extension(&path, extension) {
                files.push(path);
            }
        }

        // read_dir order is filesystem dependent; sort so output is stable.
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }
}

/// In-memory lister, returns the stored paths that match the filter.
#[derive(Debug, Clone, Default)]
pub struct StaticLister {
    files: Vec<PathBuf>,
}

impl StaticLister {
    pub fn new<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
        }
    }
}

impl SourceLister for StaticLister {
    fn list(&self, directory: &Path, extension: &str) -> Result<Vec<PathBuf>> {
        Ok(self
            .files
            .iter()
            .filter(|f| has_extension(f, extension))
            .map(|f| directory.join(f))
            .collect())
    }
}

/// Case-insensitive extension test, the way a `*.cpp` wildcard matches.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    let extension = extension.trim_start_matches('.');
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

/// File name component of a discovered source, lossily decoded.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
