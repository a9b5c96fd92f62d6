//! One generator run: list, scan, generate, write.

use crate::config::GeneratorConfig;
use crate::flags::ResolvedFlags;
use crate::lister::{file_name, SourceLister};
use crate::notify::{Notice, Notifier};
use crate::scanner::{IncludeDirective, SourceFile};
use crate::script::{BuildScript, ScriptGenerator};
use crate::Result;
use serde::Serialize;
use std::path::PathBuf;

/// Includes found in one readable source.
#[derive(Debug, Clone, Serialize)]
pub struct FileIncludes {
    pub file: String,
    pub includes: Vec<IncludeDirective>,
}

/// Everything the lister and scanner learned about the project.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Every discovered file, readable or not.
    pub files: Vec<PathBuf>,
    /// Text of the files that could be read.
    pub sources: Vec<SourceFile>,
    /// Quoted includes of every readable file, in discovery order.
    pub includes: Vec<IncludeDirective>,
}

impl ScanResult {
    pub fn per_file(&self) -> Vec<FileIncludes> {
        self.sources
            .iter()
            .map(|s| FileIncludes {
                file: file_name(&s.path),
                includes: s.includes(),
            })
            .collect()
    }
}

/// Serializable summary printed by `batchgen scan --json`.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub project_dir: PathBuf,
    pub files: Vec<FileIncludes>,
    pub unreadable: Vec<String>,
    pub flags: ResolvedFlags,
}

impl ScanReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Result of a full run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub scan: ScanResult,
    pub flags: ResolvedFlags,
    pub script: BuildScript,
}

/// Drives a run against a lister and a notification sink.
pub struct Pipeline<'a, L, N> {
    config: &'a GeneratorConfig,
    lister: L,
    notifier: N,
}

impl<'a, L: SourceLister, N: Notifier> Pipeline<'a, L, N> {
    pub fn new(config: &'a GeneratorConfig, lister: L, notifier: N) -> Self {
        Self {
            config,
            lister,
            notifier,
        }
    }

    /// List the project directory. An unreadable directory is reported and
    /// treated as empty.
    pub fn discover(&self) -> Vec<PathBuf> {
        let project = &self.config.project;
        match self.lister.list(&project.dir, &project.extension) {
            Ok(files) => {
                for file in &files {
                    tracing::debug!("discovered {}", file.display());
                }
                files
            }
            Err(e) => {
                self.notifier.notify(&Notice::from(&e));
                Vec::new()
            }
        }
    }

    /// Read every discovered file once. Unreadable files are reported and
    /// contribute nothing.
    pub fn scan(&self) -> ScanResult {
        let files = self.discover();
        let mut sources = Vec::with_capacity(files.len());
        let mut includes = Vec::new();

        for path in &files {
            match SourceFile::read(path) {
                Ok(source) => {
                    includes.extend(source.includes());
                    sources.push(source);
                }
                Err(e) => self.notifier.notify(&Notice::from(&e)),
            }
        }

        ScanResult {
            files,
            sources,
            includes,
        }
    }

    /// Scan and summarise without producing a script.
    pub fn report(&self) -> ScanReport {
        let scan = self.scan();
        let flags = self.config.flags.resolve(&scan.sources);
        let unreadable = scan
            .files
            .iter()
            .filter(|f| !scan.sources.iter().any(|s| &s.path == *f))
            .map(|f| file_name(f))
            .collect();

        ScanReport {
            project_dir: self.config.project.dir.clone(),
            files: scan.per_file(),
            unreadable,
            flags,
        }
    }

    /// Scan and render the script without touching the artifact.
    pub fn render(&self) -> RunReport {
        let scan = self.scan();
        let generator = ScriptGenerator::new(self.config);
        let flags = generator.resolve_flags(&scan.sources);
        let script = generator.render(&scan.files, &flags);

        RunReport {
            scan,
            flags,
            script,
        }
    }

    /// Full run. The artifact is rewritten, and success is reported only
    /// once the write went through.
    pub fn run(&self) -> Result<RunReport> {
        let report = self.render();
        let path = &self.config.script.path;

        if let Err(e) = report.script.write_to(path) {
            self.notifier.notify(&Notice::from(&e));
            return Err(e);
        }

        tracing::info!(
            "wrote {} ({} files, {} includes, {} flags)",
            path.display(),
            report.scan.files.len(),
            report.scan.includes.len(),
            report.flags.len()
        );
        self.notifier.notify(&Notice::success());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lister::StaticLister;
    use crate::notify::{NoticeKind, RecordingNotifier};
    use tempfile::TempDir;

    #[test]
    fn test_missing_project_dir_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        let config = GeneratorConfig::default()
            .with_project_dir(dir.path().join("absent"))
            .with_script_path(dir.path().join("compile.bat"));
        let sink = RecordingNotifier::new();

        let report = Pipeline::new(&config, crate::FsLister, &sink).run().unwrap();

        assert!(report.scan.files.is_empty());
        assert_eq!(
            sink.kinds(),
            vec![NoticeKind::DirectoryUnreadable, NoticeKind::Success]
        );
    }

    #[test]
    fn test_listed_but_missing_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("main.cpp"), "#include \"windows.h\"\n").unwrap();
        let config = GeneratorConfig::default()
            .with_project_dir(dir.path())
            .with_script_path(dir.path().join("compile.bat"));
        let lister = StaticLister::new(["main.cpp", "ghost.cpp"]);
        let sink = RecordingNotifier::new();

        let report = Pipeline::new(&config, lister, &sink).render();

        assert_eq!(report.scan.files.len(), 2);
        assert_eq!(report.scan.sources.len(), 1);
        assert!(report.flags.contains("-lgdi32"));
        assert_eq!(sink.count(NoticeKind::SourceFileUnreadable), 1);
        assert!(report.script.as_str().contains("\"Files/ghost.cpp\""));
    }

    #[test]
    fn test_report_lists_unreadable() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.cpp"), "#include \"a.h\"\n").unwrap();
        let config = GeneratorConfig::default().with_project_dir(dir.path());
        let lister = StaticLister::new(["a.cpp", "gone.cpp"]);

        let report = Pipeline::new(&config, lister, RecordingNotifier::new()).report();

        assert_eq!(report.unreadable, vec!["gone.cpp"]);
        assert_eq!(report.files.len(), 1);
        assert_eq!(report.files[0].file, "a.cpp");
        assert_eq!(report.files[0].includes[0].as_str(), "a.h");
        assert!(report.flags.is_empty());

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["files"][0]["includes"][0], "a.h");
        assert_eq!(json["unreadable"][0], "gone.cpp");
        assert_eq!(json["flags"], serde_json::json!([]));
    }
}
