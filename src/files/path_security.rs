/*
 * Copyright (C) 2026 Mark Wells Dev
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

//! Path validation and containment checks for embedded files.
//!
//! Two layers guard every read: a structural check on the path string
//! (non-empty, allow-listed extension), and a containment check on the
//! resolved absolute path (substring denylist, then home/cwd/temp prefix,
//! then a stat to reject directories).

use std::path::{Path, PathBuf};
use tracing::debug;

use super::error::{FileError, ValidationError};

/// Substrings that disqualify a resolved path wherever they appear.
///
/// Matching is by substring, not by path segment, so `/srv/usrdata.md`
/// is rejected for containing `/usr`.
pub const SUSPICIOUS_PATTERNS: &[&str] = &[
    "..", "~", "/etc", "/var", "/usr", "/bin", "/sbin", "/dev", "/sys", "/proc",
];

/// Returns the extension of the final path element, including the dot.
///
/// Returns an empty string when the final element has no dot. A leading
/// dot counts, so `.bashrc` has extension `.bashrc`.
#[must_use]
pub fn extension_of(path: &str) -> &str {
    let name = path.rsplit(['/', std::path::MAIN_SEPARATOR]).next().unwrap_or(path);
    name.rfind('.').map_or("", |idx| &name[idx..])
}

/// The directories a file must live under to be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainmentRoots {
    /// The invoking user's home directory.
    pub home: PathBuf,
    /// The process working directory.
    pub cwd: PathBuf,
    /// The platform temp directory.
    pub temp: PathBuf,
}

impl ContainmentRoots {
    /// Looks up the home, working, and temp directories from the OS.
    ///
    /// # Errors
    ///
    /// Returns [`FileError::RootUnavailable`] if the home directory is unknown
    /// or the working directory cannot be read.
    pub fn discover() -> Result<Self, FileError> {
        let home = dirs::home_dir().ok_or(FileError::RootUnavailable {
            root: "home",
            reason: "no home directory for the current user".to_string(),
        })?;
        let cwd = std::env::current_dir().map_err(|e| FileError::RootUnavailable {
            root: "cwd",
            reason: e.to_string(),
        })?;
        let temp = std::env::temp_dir();

        Ok(Self { home, cwd, temp })
    }

    /// Plain string-prefix containment, not segment-aware.
    fn contains(&self, path: &str) -> bool {
        [&self.home, &self.cwd, &self.temp]
            .iter()
            .any(|root| path.starts_with(&*root.to_string_lossy()))
    }
}

/// Validates path shape and containment for file reads.
#[derive(Debug, Clone)]
pub struct PathValidator {
    /// Extensions (with leading dot) accepted by [`Self::validate`].
    allowed_extensions: Vec<String>,
}

impl PathValidator {
    /// Creates a validator accepting exactly the given extensions.
    pub fn new(allowed_extensions: Vec<String>) -> Self {
        debug!(
            "PathValidator initialized with {} allowed extension(s)",
            allowed_extensions.len()
        );
        Self { allowed_extensions }
    }

    /// Checks the path string without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path is empty or whitespace only.
    /// - The path has no extension.
    /// - The extension is not an exact, case-sensitive match in the allow-list.
    pub fn validate(&self, path: &str) -> Result<(), ValidationError> {
        if path.trim().is_empty() {
            return Err(ValidationError::PathRequired);
        }

        let extension = extension_of(path);
        if extension.is_empty() {
            return Err(ValidationError::ExtensionRequired {
                path: path.to_string(),
            });
        }

        if !self.allowed_extensions.iter().any(|allowed| allowed == extension) {
            return Err(ValidationError::ExtensionNotAllowed {
                extension: extension.to_string(),
                allowed: self.allowed_extensions.clone(),
            });
        }

        Ok(())
    }

    /// Runs the containment check against the current OS roots.
    ///
    /// # Errors
    ///
    /// See [`Self::check_security_within`]; also fails if the roots
    /// themselves cannot be discovered.
    pub fn check_security(&self, absolute: &Path) -> Result<(), FileError> {
        if let Some(pattern) = Self::suspicious_pattern(absolute) {
            return Err(FileError::SuspiciousPath {
                path: absolute.to_path_buf(),
                pattern,
            });
        }
        let roots = ContainmentRoots::discover()?;
        self.check_security_within(absolute, &roots)
    }

    /// Runs the containment check against explicit roots.
    ///
    /// The denylist runs first, then root containment, and only then a stat
    /// of the path, so an obviously hostile path never reaches the filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path contains a [`SUSPICIOUS_PATTERNS`] entry.
    /// - The path does not start with any of the roots.
    /// - The path cannot be stat'ed, or is a directory.
    pub fn check_security_within(
        &self,
        absolute: &Path,
        roots: &ContainmentRoots,
    ) -> Result<(), FileError> {
        if let Some(pattern) = Self::suspicious_pattern(absolute) {
            return Err(FileError::SuspiciousPath {
                path: absolute.to_path_buf(),
                pattern,
            });
        }

        if !roots.contains(&absolute.to_string_lossy()) {
            return Err(FileError::PathOutsideAllowed {
                path: absolute.to_path_buf(),
                home: roots.home.clone(),
                cwd: roots.cwd.clone(),
                temp: roots.temp.clone(),
            });
        }

        let metadata = std::fs::metadata(absolute).map_err(|e| FileError::StatFailed {
            path: absolute.to_path_buf(),
            source: e,
        })?;
        if metadata.is_dir() {
            return Err(FileError::PathIsDirectory {
                path: absolute.to_path_buf(),
            });
        }

        debug!("Path passed containment check: {}", absolute.display());
        Ok(())
    }

    fn suspicious_pattern(path: &Path) -> Option<&'static str> {
        let text = path.to_string_lossy();
        SUSPICIOUS_PATTERNS
            .iter()
            .copied()
            .find(|pattern| text.contains(pattern))
    }
}
