//! End-to-end runs against project trees on disk.

use batchgen_build::{
    BatchError, FlagMapping, FsLister, GeneratorConfig, NoticeKind, Pipeline, RecordingNotifier,
};
use std::path::Path;
use tempfile::TempDir;

/// Lay out `<root>/.project/<files>` and return a config pointing at it.
fn project(root: &Path, files: &[(&str, &str)]) -> GeneratorConfig {
    let dir = root.join(".project");
    std::fs::create_dir_all(&dir).unwrap();
    for (name, text) in files {
        std::fs::write(dir.join(name), text).unwrap();
    }

    GeneratorConfig::default()
        .with_project_dir(&dir)
        .with_script_path(root.join("compile.bat"))
}

fn script_lines(config: &GeneratorConfig) -> Vec<String> {
    std::fs::read_to_string(&config.script.path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Windows headers spread over two files resolve to both flags.
#[test]
fn test_main_and_util() {
    let root = TempDir::new().unwrap();
    let config = project(
        root.path(),
        &[
            ("main.cpp", "#include \"windows.h\"\nint main() { return 0; }\n"),
            ("util.cpp", "#include \"shellapi.h\"\nvoid util() {}\n"),
        ],
    );
    let sink = RecordingNotifier::new();

    Pipeline::new(&config, FsLister, &sink).run().unwrap();

    let lines = script_lines(&config);
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "@echo off");
    assert_eq!(lines[1], format!("cd {}", config.project.dir.display()));
    assert_eq!(
        lines[2],
        "g++ -o build.exe \"Files/main.cpp\" -lgdi32 -lshell32 \"Files/util.cpp\" "
    );
    assert_eq!(lines[3], "pause");
    assert_eq!(sink.kinds(), vec![NoticeKind::Success]);
}

/// An empty project still gets a complete script.
#[test]
fn test_empty_directory() {
    let root = TempDir::new().unwrap();
    let config = project(root.path(), &[]);

    Pipeline::new(&config, FsLister, RecordingNotifier::new())
        .run()
        .unwrap();

    let lines = script_lines(&config);
    assert_eq!(lines[0], "@echo off");
    assert_eq!(lines[2], "g++ -o build.exe \"Files/main.cpp\" ");
    assert_eq!(lines[3], "pause");
}

/// The entry file is emitted even when it was never discovered.
#[test]
fn test_entry_without_main() {
    let root = TempDir::new().unwrap();
    let config = project(root.path(), &[("other.cpp", "")]);

    Pipeline::new(&config, FsLister, RecordingNotifier::new())
        .run()
        .unwrap();

    assert_eq!(
        script_lines(&config)[2],
        "g++ -o build.exe \"Files/main.cpp\" \"Files/other.cpp\" "
    );
}

/// Two runs over the same tree write the same bytes.
#[test]
fn test_idempotent() {
    let root = TempDir::new().unwrap();
    let config = project(
        root.path(),
        &[
            ("main.cpp", "#include <commdlg.h>\n"),
            ("b.cpp", "#include \"wingdi.h\"\n"),
            ("a.cpp", "#include <windows.h>\n"),
        ],
    );

    Pipeline::new(&config, FsLister, RecordingNotifier::new()).run().unwrap();
    let first = std::fs::read(&config.script.path).unwrap();
    Pipeline::new(&config, FsLister, RecordingNotifier::new()).run().unwrap();
    let second = std::fs::read(&config.script.path).unwrap();

    assert_eq!(first, second);
}

/// Angle-bracket includes are invisible to the directive list but still
/// drive flag detection.
#[test]
fn test_angle_bracket_asymmetry() {
    let root = TempDir::new().unwrap();
    let config = project(
        root.path(),
        &[("main.cpp", "#include <vector>\n#include <windows.h>\n")],
    );

    let report = Pipeline::new(&config, FsLister, RecordingNotifier::new())
        .run()
        .unwrap();

    assert!(report.scan.includes.is_empty());
    assert!(report.flags.contains("-lgdi32"));
    assert!(script_lines(&config)[2].contains(" -lgdi32 "));
}

/// A flag appears exactly once when several headers map to it, and never
/// when its header is absent.
#[test]
fn test_flag_presence() {
    let root = TempDir::new().unwrap();
    let config = project(
        root.path(),
        &[
            ("main.cpp", "#include \"windows.h\"\n"),
            ("draw.cpp", "#include <wingdi.h>\n#include \"windows.h\"\n"),
        ],
    );

    Pipeline::new(&config, FsLister, RecordingNotifier::new()).run().unwrap();

    let line = &script_lines(&config)[2];
    assert_eq!(line.matches("-lgdi32").count(), 1);
    assert!(!line.contains("-lshell32"));
    assert!(!line.contains("-lcomdlg32"));
}

/// A substituted flag table replaces the built-in one.
#[test]
fn test_custom_flag_table() {
    let root = TempDir::new().unwrap();
    let config = project(
        root.path(),
        &[("main.cpp", "#include <winsock2.h>\n#include <windows.h>\n")],
    )
    .with_flags(FlagMapping::from_pairs([("winsock2.h", "-lws2_32")]));

    Pipeline::new(&config, FsLister, RecordingNotifier::new()).run().unwrap();

    assert_eq!(
        script_lines(&config)[2],
        "g++ -o build.exe \"Files/main.cpp\" -lws2_32 "
    );
}

/// A file that disappears between listing and reading contributes nothing.
#[cfg(unix)]
#[test]
fn test_unreadable_source() {
    let root = TempDir::new().unwrap();
    let config = project(root.path(), &[("main.cpp", "#include \"a.h\"\n")]);
    std::os::unix::fs::symlink(
        root.path().join("nowhere.cpp"),
        config.project.dir.join("dangling.cpp"),
    )
    .unwrap();
    let sink = RecordingNotifier::new();

    let report = Pipeline::new(&config, FsLister, &sink).run().unwrap();

    assert_eq!(report.scan.files.len(), 2);
    assert_eq!(report.scan.sources.len(), 1);
    assert_eq!(report.scan.includes.len(), 1);
    assert_eq!(
        sink.kinds(),
        vec![NoticeKind::SourceFileUnreadable, NoticeKind::Success]
    );
    assert!(script_lines(&config)[2].ends_with("\"Files/dangling.cpp\" "));
}

/// A script that cannot be written aborts the run without a success notice.
#[test]
fn test_unwritable_script() {
    let root = TempDir::new().unwrap();
    let config = project(root.path(), &[("main.cpp", "")])
        .with_script_path(root.path().join("no-such-dir").join("compile.bat"));
    let sink = RecordingNotifier::new();

    let err = Pipeline::new(&config, FsLister, &sink).run().unwrap_err();

    assert!(matches!(err, BatchError::ArtifactUnwritable { .. }));
    assert_eq!(sink.kinds(), vec![NoticeKind::ArtifactUnwritable]);
}
