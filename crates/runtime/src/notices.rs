use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// User-facing message raised at an error boundary.
///
/// Notices replace crashes: the worst outcome of any failure in the engine
/// is "previous state preserved, notice shown".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub sequence: u64,
    pub level: NoticeLevel,
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct NoticeBus {
    next_sequence: u64,
    notices: Vec<Notice>,
}

impl NoticeBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, level: NoticeLevel, kind: &'static str, message: impl Into<String>) {
        let message = message.into();
        match level {
            NoticeLevel::Info => tracing::info!(kind = kind, "{message}"),
            NoticeLevel::Warning | NoticeLevel::Error => tracing::warn!(kind = kind, "{message}"),
        }
        self.notices.push(Notice {
            sequence: self.next_sequence,
            level,
            kind,
            message,
        });
        self.next_sequence += 1;
    }

    pub fn info(&mut self, kind: &'static str, message: impl Into<String>) {
        self.emit(NoticeLevel::Info, kind, message);
    }

    pub fn warn(&mut self, kind: &'static str, message: impl Into<String>) {
        self.emit(NoticeLevel::Warning, kind, message);
    }

    pub fn error(&mut self, kind: &'static str, message: impl Into<String>) {
        self.emit(NoticeLevel::Error, kind, message);
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
