//! Build script rendering and writing.
//!
//! The generated script has a fixed shape:
//!
//! ```text
//! @echo off
//! cd <project-dir>
//! <compiler> -o <artifact> "<prefix><entry>" <flag>... "<prefix><other>"...
//! pause
//! ```
//!
//! Each token on the compiler line is followed by one space, trailing one
//! included.

use crate::config::{GeneratorConfig, LineEnding};
use crate::flags::{FlagMapping, ResolvedFlags};
use crate::lister::file_name;
use crate::scanner::SourceFile;
use crate::{BatchError, Result};
use std::path::{Path, PathBuf};

/// The rendered build script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildScript {
    text: String,
}

impl BuildScript {
    /// The script text, exactly as written to disk.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Truncate `path` and write the whole script to it.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.text.as_bytes()).map_err(|source| {
            BatchError::ArtifactUnwritable {
                path: path.to_path_buf(),
                source,
            }
        })
    }
}

/// Produces build scripts for one project layout and flag table.
#[derive(Debug, Clone)]
pub struct ScriptGenerator {
    project_dir: PathBuf,
    entry: String,
    compiler: String,
    output: String,
    files_prefix: String,
    line_ending: LineEnding,
    mapping: FlagMapping,
}

impl ScriptGenerator {
    /// Create a generator from the project and script settings.
    ///
    /// The entry is reduced to its file name, since discovered files are
    /// matched against it by name.
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            project_dir: config.project.dir.clone(),
            entry: file_name(Path::new(&config.project.entry)),
            compiler: config.script.compiler.clone(),
            output: config.script.output.clone(),
            files_prefix: config.script.files_prefix.clone(),
            line_ending: config.script.line_ending,
            mapping: config.flags.clone(),
        }
    }

    /// Replace the flag table.
    pub fn with_mapping(mut self, mapping: FlagMapping) -> Self {
        self.mapping = mapping;
        self
    }

    /// Linker flags needed by the readable `sources`.
    pub fn resolve_flags(&self, sources: &[SourceFile]) -> ResolvedFlags {
        self.mapping.resolve(sources)
    }

    /// Whether `path` names the entry file, compared by file name alone.
    pub fn is_entry(&self, path: &Path) -> bool {
        file_name(path).eq_ignore_ascii_case(&self.entry)
    }

    /// Render the script for the discovered `files`.
    ///
    /// `sources` holds the text of the files that could be read; flags are
    /// detected from it. Every discovered file is listed regardless.
    pub fn generate(&self, files: &[PathBuf], sources: &[SourceFile]) -> BuildScript {
        let flags = self.resolve_flags(sources);
        self.render(files, &flags)
    }

    /// Render the script for `files` with an already resolved flag set.
    pub fn render(&self, files: &[PathBuf], flags: &ResolvedFlags) -> BuildScript {
        let eol = self.line_ending.as_str();
        let mut text = String::new();

        text.push_str(&format!("@echo off{eol}"));
        text.push_str(&format!("cd {}{eol}", self.project_dir.display()));

        text.push_str(&format!("{} -o {} ", self.compiler, self.output));
        text.push_str(&format!("\"{}{}\" ", self.files_prefix, self.entry));

        for flag in flags.iter() {
            text.push_str(flag);
            text.push(' ');
        }

        for file in files.iter().filter(|f| !self.is_entry(f)) {
            text.push_str(&format!("\"{}{}\" ", self.files_prefix, file_name(file)));
        }

        text.push_str(&format!("{eol}pause{eol}"));

        BuildScript { text }
    }
}
