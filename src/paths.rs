//! Default file locations for portable and installed modes.
//!
//! - **Portable mode**: a `.portable` marker next to the executable keeps the
//!   config and database in the executable's directory.
//! - **Installed mode** (default): files live in the per-user config directory
//!   (`%APPDATA%\padmap`, `~/.config/padmap`, ...).

use std::path::{Path, PathBuf};
use tracing::debug;

/// Application name used for directories in installed mode
const APP_NAME: &str = "padmap";

/// File name of the device mapping database
pub const DATABASE_FILE: &str = "gamepads.db";

/// File name of the optional YAML configuration
pub const CONFIG_FILE: &str = "padmap.yaml";

/// Resolved locations of padmap files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub config: PathBuf,
    pub database: PathBuf,
    pub is_portable: bool,
}

impl AppPaths {
    /// Detect paths based on the executable location and platform dirs
    pub fn detect() -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));

        if exe_dir.join(".portable").exists() {
            debug!("Portable mode (.portable marker in {})", exe_dir.display());
            return Self::in_dir(&exe_dir, true);
        }

        let base = dirs::config_dir().unwrap_or_else(|| exe_dir.clone()).join(APP_NAME);
        debug!("Installed mode (data dir: {})", base.display());
        Self::in_dir(&base, false)
    }

    /// Paths rooted at `dir`
    pub fn in_dir(dir: &Path, is_portable: bool) -> Self {
        Self {
            config: dir.join(CONFIG_FILE),
            database: dir.join(DATABASE_FILE),
            is_portable,
        }
    }

    /// Get the base directory (for displaying in logs)
    pub fn base_dir(&self) -> PathBuf {
        self.database
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
