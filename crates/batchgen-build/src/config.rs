//! Generator configuration types (batchgen.toml format).

use crate::flags::FlagMapping;
use crate::{BatchError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the config file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "batchgen.toml";

/// Root generator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Where sources are discovered.
    #[serde(default)]
    pub project: ProjectConfig,

    /// What the build script looks like and where it goes.
    #[serde(default)]
    pub script: ScriptConfig,

    /// Header to linker flag table.
    #[serde(default)]
    pub flags: FlagMapping,
}

/// Source discovery settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Directory scanned for sources; the script also `cd`s into it.
    pub dir: PathBuf,

    /// Source file extension, without the dot.
    pub extension: String,

    /// File always compiled first.
    pub entry: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".project"),
            extension: "cpp".to_string(),
            entry: "main.cpp".to_string(),
        }
    }
}

/// Build script settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// Path of the generated script.
    pub path: PathBuf,

    /// Compiler invoked by the script.
    pub compiler: String,

    /// Name passed to `-o`.
    pub output: String,

    /// Prefix put in front of every source file name.
    pub files_prefix: String,

    /// Line terminator used throughout the script.
    pub line_ending: LineEnding,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("compile.bat"),
            compiler: "g++".to_string(),
            output: "build.exe".to_string(),
            files_prefix: "Files/".to_string(),
            line_ending: LineEnding::Lf,
        }
    }
}

/// Line terminator of the generated script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineEnding {
    /// `\n`.
    #[default]
    Lf,
    /// `\r\n`, as written by Windows text-mode streams.
    Crlf,
}

impl LineEnding {
    /// The terminator itself.
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| BatchError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: GeneratorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` when given. Otherwise use `batchgen.toml` from the
    /// working directory if there is one, and the built-in defaults if not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Check the fields the generator relies on.
    pub fn validate(&self) -> Result<()> {
        if self.project.entry.trim().is_empty() {
            return Err(BatchError::Validation("project.entry must not be empty".into()));
        }
        let entry_name = Path::new(&self.project.entry).file_name().and_then(|n| n.to_str());
        if entry_name != Some(self.project.entry.as_str()) {
            return Err(BatchError::Validation(format!(
                "project.entry \"{}\" must be a bare file name",
                self.project.entry
            )));
        }
        if self.project.extension.trim_start_matches('.').is_empty() {
            return Err(BatchError::Validation("project.extension must not be empty".into()));
        }
        if self.script.compiler.trim().is_empty() {
            return Err(BatchError::Validation("script.compiler must not be empty".into()));
        }
        for (header, flag) in self.flags.iter() {
            if header.is_empty() || flag.is_empty() {
                return Err(BatchError::Validation(format!(
                    "flags entry \"{header}\" = \"{flag}\" must name both a header and a flag"
                )));
            }
        }
        Ok(())
    }

    /// Set the project directory.
    pub fn with_project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project.dir = dir.into();
        self
    }

    /// Set the script path.
    pub fn with_script_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.script.path = path.into();
        self
    }

    /// Set the entry file name.
    pub fn with_entry(mut self, entry: impl Into<String>) -> Self {
        self.project.entry = entry.into();
        self
    }

    /// Replace the flag table.
    pub fn with_flags(mut self, flags: FlagMapping) -> Self {
        self.flags = flags;
        self
    }
}
