//! Build script generation for small C++ projects.
//!
//! This crate provides:
//! - Source discovery in a single project directory
//! - A textual include scanner
//! - Linker flag inference from a header to flag table
//! - Rendering and writing of the `compile.bat` build script
//!
//! # Example
//!
//! ```toml
//! # batchgen.toml
//! [project]
//! dir = ".project"
//! entry = "main.cpp"
//!
//! [script]
//! path = "compile.bat"
//! compiler = "g++"
//! output = "build.exe"
//!
//! [flags]
//! "windows.h" = "-lgdi32"
//! "shellapi.h" = "-lshell32"
//! ```

mod config;
mod error;
mod flags;
mod lister;
mod notify;
mod pipeline;
mod scanner;
mod script;

pub use config::{GeneratorConfig, LineEnding, ProjectConfig, ScriptConfig, DEFAULT_CONFIG_FILE};
pub use error::{BatchError, Result};
pub use flags::{FlagMapping, ResolvedFlags};
pub use lister::{has_extension, FsLister, SourceLister, StaticLister};
pub use notify::{LogNotifier, Notice, NoticeKind, Notifier, RecordingNotifier, Severity};
pub use pipeline::{FileIncludes, Pipeline, RunReport, ScanReport, ScanResult};
pub use scanner::{extract_includes, scan, IncludeDirective, SourceFile};
pub use script::{BuildScript, ScriptGenerator};
