//! User-facing summary messages.
//!
//! The engine never shows anything itself; it hands a [`Notice`] to the
//! host, which turns it into a toast or alert.

/// Notice severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoticeLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// A short message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Title to display (single line)
    pub title: String,
    /// Optional body text
    pub body: Option<String>,
    pub level: NoticeLevel,
}

impl Notice {
    fn with_level(level: NoticeLevel, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: None,
            level,
        }
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::with_level(NoticeLevel::Info, title)
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::with_level(NoticeLevel::Success, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::with_level(NoticeLevel::Warning, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::with_level(NoticeLevel::Error, title)
    }

    /// Add a body to the notice
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}
