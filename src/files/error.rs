// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mark Wells <contact@markwells.dev>

//! Error taxonomy for file validation, secure reads, and containment checks.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Input-shape rejections raised before any filesystem access.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The path was empty or whitespace only.
    #[error("file path is required")]
    PathRequired,

    /// The final path element has no `.ext` suffix.
    #[error("file must have an extension: {path}")]
    ExtensionRequired {
        /// The rejected path.
        path: String,
    },

    /// The extension is not in the configured allow-list.
    #[error("file extension {extension} is not allowed. Allowed extensions: {}", allowed.join(", "))]
    ExtensionNotAllowed {
        /// The extension found on the path, including the leading dot.
        extension: String,
        /// The configured allow-list.
        allowed: Vec<String>,
    },

    /// A [`FileContent`](super::FileContent) carried no bytes.
    #[error("file content is required")]
    ContentRequired,
}

/// Errors produced by [`FileProcessor`](super::FileProcessor).
#[derive(Debug, Error)]
pub enum FileError {
    /// The path failed validation.
    #[error("file validation failed")]
    Validation(#[from] ValidationError),

    /// The path could not be made absolute.
    #[error("invalid file path {path}")]
    InvalidPath {
        /// The path as supplied by the caller.
        path: String,
        /// Underlying OS error.
        source: io::Error,
    },

    /// The resolved path contains a denylisted substring.
    #[error("security validation failed: {} contains suspicious pattern: {pattern}", path.display())]
    SuspiciousPath {
        /// The resolved absolute path.
        path: PathBuf,
        /// The denylist entry that matched.
        pattern: &'static str,
    },

    /// The resolved path is not under the home, working, or temp directory.
    #[error(
        "security validation failed: {} is outside allowed directories (home: {}, cwd: {}, tmp: {})",
        path.display(),
        home.display(),
        cwd.display(),
        temp.display()
    )]
    PathOutsideAllowed {
        /// The resolved absolute path.
        path: PathBuf,
        /// The user's home directory.
        home: PathBuf,
        /// The process working directory.
        cwd: PathBuf,
        /// The platform temp directory.
        temp: PathBuf,
    },

    /// The resolved path names a directory.
    #[error("path {} is a directory, not a file", path.display())]
    PathIsDirectory {
        /// The resolved absolute path.
        path: PathBuf,
    },

    /// One of the containment roots could not be determined.
    #[error("failed to determine {root} directory: {reason}")]
    RootUnavailable {
        /// Which root failed (`home` or `cwd`).
        root: &'static str,
        /// Why the lookup failed.
        reason: String,
    },

    /// Opening or reading the file failed.
    #[error("failed to read file {}", path.display())]
    ReadFailed {
        /// The path that was read.
        path: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },

    /// A stat call failed.
    #[error("failed to get file info for {}", path.display())]
    StatFailed {
        /// The path that was stat'ed.
        path: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },

    /// The content exceeds the configured ceiling.
    #[error("file {path} is too large ({actual} bytes, max {max} bytes)")]
    FileTooLarge {
        /// The path as supplied by the caller.
        path: String,
        /// Bytes actually read.
        actual: u64,
        /// Configured maximum.
        max: u64,
    },
}
