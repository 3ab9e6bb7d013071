// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mark Wells <contact@markwells.dev>

//! Secure file reads for prompt embedding.

use std::path::{Path, PathBuf};
use tracing::debug;

use super::error::{FileError, ValidationError};
use super::fence::fence;
use super::path_security::PathValidator;

/// Bytes read from disk by [`FileProcessor::process`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    /// The path as the caller supplied it, before resolution.
    pub path: String,
    /// The full file content.
    pub content: Vec<u8>,
    /// Size reported by the post-read stat.
    pub size: u64,
}

impl FileContent {
    /// Checks that both path and content are present.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is blank or the content is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.path.trim().is_empty() {
            return Err(ValidationError::PathRequired);
        }
        if self.content.is_empty() {
            return Err(ValidationError::ContentRequired);
        }
        Ok(())
    }
}

/// Reads files under a size ceiling and an extension allow-list.
///
/// Configuration is fixed at construction; build a new processor to change it.
#[derive(Debug, Clone)]
pub struct FileProcessor {
    max_file_size: u64,
    validator: PathValidator,
}

impl FileProcessor {
    /// Creates a processor with the given limits.
    pub fn new(max_file_size: u64, allowed_extensions: Vec<String>) -> Self {
        Self {
            max_file_size,
            validator: PathValidator::new(allowed_extensions),
        }
    }

    /// The configured size ceiling in bytes.
    #[must_use]
    pub const fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Checks path shape and extension. No filesystem access.
    ///
    /// # Errors
    ///
    /// See [`PathValidator::validate`].
    pub fn validate(&self, path: &str) -> Result<(), ValidationError> {
        self.validator.validate(path)
    }

    /// Checks an absolute path against the denylist and containment roots.
    ///
    /// # Errors
    ///
    /// See [`PathValidator::check_security`].
    pub fn check_security(&self, absolute: &Path) -> Result<(), FileError> {
        self.validator.check_security(absolute)
    }

    /// Validates, resolves, checks, reads, and size-limits a file.
    ///
    /// Relative paths are joined to the working directory without normalizing
    /// `..`, so any path containing a `..` segment is rejected as
    /// [`FileError::SuspiciousPath`] even when it would resolve inside an
    /// allowed root.
    ///
    /// The size ceiling is enforced after the whole file is in memory. The
    /// returned size comes from a second stat of the caller's path, which can
    /// disagree with the bytes read if the file changes in between.
    ///
    /// # Errors
    ///
    /// Returns an error if any stage fails; see [`FileError`].
    pub fn process(&self, path: &str) -> Result<FileContent, FileError> {
        self.validator.validate(path)?;

        let absolute = std::path::absolute(path).map_err(|e| FileError::InvalidPath {
            path: path.to_string(),
            source: e,
        })?;
        debug!("Resolved {path} to {}", absolute.display());

        self.validator.check_security(&absolute)?;

        let content = std::fs::read(&absolute).map_err(|e| FileError::ReadFailed {
            path: absolute.clone(),
            source: e,
        })?;

        let actual = content.len() as u64;
        if actual > self.max_file_size {
            return Err(FileError::FileTooLarge {
                path: path.to_string(),
                actual,
                max: self.max_file_size,
            });
        }

        let metadata = std::fs::metadata(path).map_err(|e| FileError::StatFailed {
            path: PathBuf::from(path),
            source: e,
        })?;
        debug!("Read {actual} bytes from {path}");

        Ok(FileContent {
            path: path.to_string(),
            content,
            size: metadata.len(),
        })
    }

    /// Fences `content` for embedding; see [`fence`].
    #[must_use]
    pub fn fence(&self, content: &[u8], display_name: &str) -> Vec<u8> {
        fence(content, display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};
    use std::fs;
    use tempfile::TempDir;

    fn processor(max: u64) -> FileProcessor {
        FileProcessor::new(max, vec![".go".to_string(), ".txt".to_string()])
    }

    fn setup_file(name: &str, content: &[u8]) -> Result<(TempDir, String)> {
        let dir = TempDir::new()?;
        let path = dir.path().join(name);
        fs::write(&path, content)?;
        let path = path
            .to_str()
            .ok_or_else(|| anyhow!("temp path is not UTF-8"))?
            .to_string();
        Ok((dir, path))
    }

    #[test]
    fn test_process_reads_file() -> Result<()> {
        let body = b"package main\n\nfunc main() {}\n";
        let (_dir, path) = setup_file("main.go", body)?;

        let file = processor(1024).process(&path)?;
        assert_eq!(file.path, path);
        assert_eq!(file.content, body);
        assert_eq!(file.size, fs::metadata(&path)?.len());
        assert!(file.validate().is_ok());
        Ok(())
    }

    #[test]
    fn test_process_size_at_limit_succeeds() -> Result<()> {
        let (_dir, path) = setup_file("notes.txt", b"12345")?;
        assert!(processor(5).process(&path).is_ok());
        Ok(())
    }

    #[test]
    fn test_process_too_large_fails() -> Result<()> {
        let (_dir, path) = setup_file("notes.txt", b"123456")?;
        let err = processor(5)
            .process(&path)
            .err()
            .ok_or_else(|| anyhow!("Expected error"))?;
        assert!(matches!(
            err,
            FileError::FileTooLarge {
                actual: 6,
                max: 5,
                ..
            }
        ));
        let message = err.to_string();
        assert!(
            message.contains("6 bytes") && message.contains("max 5 bytes"),
            "Error should report both sizes: {message}"
        );
        Ok(())
    }

    #[test]
    fn test_process_disallowed_extension_never_reads() {
        // The file does not exist; a read attempt would surface as a different error.
        let result = processor(1024).process("/nonexistent/secret.pem");
        assert!(matches!(
            result,
            Err(FileError::Validation(ValidationError::ExtensionNotAllowed { .. }))
        ));
    }

    #[test]
    fn test_process_missing_extension_fails() {
        let result = processor(1024).process("README");
        assert!(matches!(
            result,
            Err(FileError::Validation(ValidationError::ExtensionRequired { .. }))
        ));
    }

    #[test]
    fn test_process_empty_path_fails() {
        assert!(matches!(
            processor(1024).process("   "),
            Err(FileError::Validation(ValidationError::PathRequired))
        ));
    }

    #[test]
    fn test_process_traversal_is_suspicious() -> Result<()> {
        let (dir, _path) = setup_file("main.go", b"package main")?;
        let traversal = dir.path().join("sub").join("..").join("main.go");
        let traversal = traversal
            .to_str()
            .ok_or_else(|| anyhow!("temp path is not UTF-8"))?;
        assert!(matches!(
            processor(1024).process(traversal),
            Err(FileError::SuspiciousPath { pattern: "..", .. })
        ));
        Ok(())
    }

    #[test]
    fn test_process_system_path_is_suspicious() {
        let result = processor(1024).process("/etc/motd.txt");
        assert!(matches!(
            result,
            Err(FileError::SuspiciousPath { pattern: "/etc", .. })
        ));
    }

    #[test]
    fn test_process_directory_fails() -> Result<()> {
        let dir = TempDir::new()?;
        let sub = dir.path().join("pkg.go");
        fs::create_dir(&sub)?;
        let sub = sub.to_str().ok_or_else(|| anyhow!("temp path is not UTF-8"))?;
        assert!(matches!(
            processor(1024).process(sub),
            Err(FileError::PathIsDirectory { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_process_missing_file_fails() -> Result<()> {
        let dir = TempDir::new()?;
        let missing = dir.path().join("gone.go");
        let missing = missing
            .to_str()
            .ok_or_else(|| anyhow!("temp path is not UTF-8"))?;
        assert!(matches!(
            processor(1024).process(missing),
            Err(FileError::StatFailed { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_file_content_validate() {
        let empty = FileContent {
            path: "a.go".to_string(),
            content: Vec::new(),
            size: 0,
        };
        assert!(matches!(
            empty.validate(),
            Err(ValidationError::ContentRequired)
        ));

        let no_path = FileContent {
            path: " ".to_string(),
            content: b"x".to_vec(),
            size: 1,
        };
        assert!(matches!(
            no_path.validate(),
            Err(ValidationError::PathRequired)
        ));
    }

    #[test]
    fn test_processor_check_security() -> Result<()> {
        let (_dir, path) = setup_file("main.go", b"package main")?;
        let p = processor(1024);
        p.check_security(Path::new(&path))?;

        assert!(matches!(
            p.check_security(Path::new("/etc/x.txt")),
            Err(FileError::SuspiciousPath { pattern: "/etc", .. })
        ));
        Ok(())
    }

    #[test]
    fn test_process_relative_traversal_is_not_normalized() {
        // `sub/..` would resolve back into the working directory.
        assert!(matches!(
            processor(1024).process("sub/../main.go"),
            Err(FileError::SuspiciousPath { pattern: "..", .. })
        ));
    }

    #[test]
    fn test_processor_fence_matches_free_function() {
        let p = processor(1024);
        assert_eq!(p.fence(b"hello", "a.go"), fence(b"hello", "a.go"));
    }
}
