//! Header to linker flag inference.

use crate::scanner::SourceFile;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Immutable table of known headers and the linker flag each one needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagMapping {
    entries: BTreeMap<String, String>,
}

impl Default for FlagMapping {
    fn default() -> Self {
        Self::from_pairs([
            ("windows.h", "-lgdi32"),
            ("wingdi.h", "-lgdi32"),
            ("shellapi.h", "-lshell32"),
            ("commdlg.h", "-lcomdlg32"),
        ])
    }
}

impl FlagMapping {
    /// Build a table from `(header, flag)` pairs.
    pub fn from_pairs<I, H, F>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (H, F)>,
        H: Into<String>,
        F: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(h, f)| (h.into(), f.into()))
                .collect(),
        }
    }

    /// Number of known headers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flag required by `header`, if it is a known header.
    pub fn flag_for(&self, header: &str) -> Option<&str> {
        self.entries.get(header).map(String::as_str)
    }

    /// `(header, flag)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(h, f)| (h.as_str(), f.as_str()))
    }

    /// Check every known header against the raw text of `sources`.
    ///
    /// A header is detected when any file contains `#include "H"` or
    /// `#include <H>`. Scanning for a header stops at the first file that
    /// matches.
    pub fn resolve(&self, sources: &[SourceFile]) -> ResolvedFlags {
        let mut flags = ResolvedFlags::default();

        for (header, flag) in self.iter() {
            let quoted = format!("#include \"{header}\"");
            let angled = format!("#include <{header}>");

            let hit = sources
                .iter()
                .find(|s| s.content.contains(&quoted) || s.content.contains(&angled));

            if let Some(source) = hit {
                tracing::debug!("{} found in {}, adding {}", header, source.path.display(), flag);
                flags.insert(flag);
            }
        }

        flags
    }
}

/// Deduplicated linker flags, iterated in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedFlags(BTreeSet<String>);

impl ResolvedFlags {
    /// Add a flag; returns false if it was already present.
    pub fn insert(&mut self, flag: impl Into<String>) -> bool {
        self.0.insert(flag.into())
    }

    pub fn contains(&self, flag: &str) -> bool {
        self.0.contains(flag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}
