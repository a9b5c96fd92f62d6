//! User-facing notifications.
//!
//! The pipeline never decides how a message is presented. It hands a
//! [`Notice`] to a [`Notifier`], and the host supplies the adapter: a log
//! line, a console message, or a recording sink for tests.

use std::cell::RefCell;
use std::fmt;

/// How a notice is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("Info"),
            Severity::Error => f.write_str("Error"),
        }
    }
}

/// Which of the observable run events a notice reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// The project directory could not be listed.
    DirectoryUnreadable,
    /// A discovered source could not be read.
    SourceFileUnreadable,
    /// The build script could not be written.
    ArtifactUnwritable,
    /// The build script was written.
    Success,
    /// The configuration could not be loaded.
    Config,
    /// A scan report could not be produced.
    Report,
}

/// A titled message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Event being reported.
    pub kind: NoticeKind,
    pub severity: Severity,
    /// Short headline, as shown in a dialog title or first line.
    pub title: String,
    /// Details, usually the underlying error.
    pub message: String,
}

impl Notice {
    /// Create an error notice.
    pub fn error(kind: NoticeKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Create an informational notice.
    pub fn info(kind: NoticeKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    /// The notice raised once the build script has been written.
    pub fn success() -> Self {
        Self::info(
            NoticeKind::Success,
            "Batch file updated successfully!",
            "the build script was regenerated",
        )
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl From<&crate::BatchError> for Notice {
    fn from(err: &crate::BatchError) -> Self {
        use crate::BatchError;

        let kind = match err {
            BatchError::DirectoryUnreadable { .. } => NoticeKind::DirectoryUnreadable,
            BatchError::SourceFileUnreadable { .. } => NoticeKind::SourceFileUnreadable,
            BatchError::ArtifactUnwritable { .. } => NoticeKind::ArtifactUnwritable,
            BatchError::ReadConfig { .. } | BatchError::ParseToml(_) | BatchError::Validation(_) => {
                NoticeKind::Config
            }
            BatchError::Json(_) => NoticeKind::Report,
        };
        Notice::error(kind, err.title(), err.to_string())
    }
}

/// A sink able to surface a titled message with a severity.
pub trait Notifier {
    fn notify(&self, notice: &Notice);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notice: &Notice) {
        (**self).notify(notice)
    }
}

/// Forwards notices to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) {
        match notice.severity {
            Severity::Info => tracing::info!(kind = ?notice.kind, "{}: {}", notice.title, notice.message),
            Severity::Error => tracing::error!(kind = ?notice.kind, "{}: {}", notice.title, notice.message),
        }
    }
}

/// Keeps every notice in memory, in the order raised.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    pub fn kinds(&self) -> Vec<NoticeKind> {
        self.notices.borrow().iter().map(|n| n.kind).collect()
    }

    pub fn count(&self, kind: NoticeKind) -> usize {
        self.notices.borrow().iter().filter(|n| n.kind == kind).count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices.borrow_mut().push(notice.clone());
    }
}
