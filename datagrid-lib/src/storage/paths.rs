//! Platform-specific locations for persisted grid state.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Identifies the host application for directory lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatePaths {
    qualifier: String,
    organization: String,
    application: String,
}

impl StatePaths {
    /// Create paths for the given reverse-domain triple,
    /// e.g. `("com", "acme", "crm")`.
    pub fn new(
        qualifier: impl Into<String>,
        organization: impl Into<String>,
        application: impl Into<String>,
    ) -> Self {
        Self {
            qualifier: qualifier.into(),
            organization: organization.into(),
            application: application.into(),
        }
    }

    fn project_dirs(&self) -> Option<ProjectDirs> {
        ProjectDirs::from(&self.qualifier, &self.organization, &self.application)
    }

    /// Directory for persistent application data, or None if the home
    /// directory cannot be determined.
    ///
    /// - Linux: `$XDG_DATA_HOME/<app>` or `~/.local/share/<app>`
    /// - macOS: `~/Library/Application Support/<qualifier>.<org>.<app>`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\<org>\<app>\data`
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Path to the grid state database.
    pub fn state_db(&self) -> Option<PathBuf> {
        self.data_dir().map(|dir| dir.join("grid-state.db"))
    }
}
