//! External tool detection.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Information about an external tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    /// Name of the tool.
    pub name: String,
    /// Whether the tool is available.
    pub available: bool,
    /// Version string if available.
    pub version: Option<String>,
    /// Path to the tool executable.
    pub path: Option<PathBuf>,
}

/// Check if a tool is available and get its information.
///
/// # Example
///
/// ```no_run
/// use vidmeta_av::check_tool;
///
/// let info = check_tool("mediainfo");
/// if info.available {
///     println!("mediainfo version: {:?}", info.version);
/// }
/// ```
pub fn check_tool(name: &str) -> ToolInfo {
    check_tool_at(name, Path::new(name))
}

/// Check a tool invoked through an explicit executable path.
pub fn check_tool_at(name: &str, executable: &Path) -> ToolInfo {
    let result = Command::new(executable).arg("--version").output();

    match result {
        Ok(output) if output.status.success() => {
            // mediainfo prints "MediaInfo Command line," before the version line
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .last()
                .map(|s| s.to_string());

            ToolInfo {
                name: name.to_string(),
                available: true,
                version,
                path: which::which(executable).ok(),
            }
        }
        _ => ToolInfo {
            name: name.to_string(),
            available: false,
            version: None,
            path: None,
        },
    }
}

/// Check the tools used by the probing engines.
///
/// `mediainfo_path` overrides the `PATH` lookup for `mediainfo`.
pub fn check_tools(mediainfo_path: Option<&Path>) -> Vec<ToolInfo> {
    vec![match mediainfo_path {
        Some(path) => check_tool_at("mediainfo", path),
        None => check_tool("mediainfo"),
    }]
}

/// Require that a tool is available, returning its path.
///
/// # Errors
///
/// Returns an error if the tool is not found.
pub fn require_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| Error::tool_not_found(name))
}
