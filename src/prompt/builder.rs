// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mark Wells <contact@markwells.dev>

//! Prompt assembly from an instruction, presets, guidelines, and embedded content.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::collections::HashMap;
use tracing::{debug, warn};

use super::error::BuildError;
use super::types::{BuildRequest, Prompt};
use crate::files::{FileProcessor, fence};

/// Display name used when fencing image data.
const IMAGE_DISPLAY_NAME: &str = "image";

/// Presets registered by [`PromptBuilder::with_default_presets`].
pub const DEFAULT_PRESETS: &[(&str, &str)] = &[
    (
        "coding",
        "You are an expert software developer. Write clean, efficient, and well-documented code.",
    ),
    (
        "analysis",
        "You are an expert code analyst. Provide detailed analysis and insights.",
    ),
    (
        "documentation",
        "You are an expert technical writer. Create clear and comprehensive documentation.",
    ),
];

/// Assembles [`Prompt`]s, reading embedded files through a [`FileProcessor`].
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    files: FileProcessor,
    presets: HashMap<String, String>,
}

impl PromptBuilder {
    /// Creates a builder with no presets.
    pub fn new(files: FileProcessor) -> Self {
        Self {
            files,
            presets: HashMap::new(),
        }
    }

    /// Creates a builder with the `coding`, `analysis`, and `documentation` presets.
    pub fn with_default_presets(files: FileProcessor) -> Self {
        let mut builder = Self::new(files);
        for (task, message) in DEFAULT_PRESETS {
            builder
                .presets
                .insert((*task).to_string(), (*message).to_string());
        }
        builder
    }

    /// Registers or replaces a system message preset.
    ///
    /// # Errors
    ///
    /// Returns an error if `task` or `message` is blank.
    pub fn add_system_preset(
        &mut self,
        task: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<(), BuildError> {
        let task = task.into();
        let message = message.into();
        if task.trim().is_empty() {
            return Err(BuildError::TaskNameRequired);
        }
        if message.trim().is_empty() {
            return Err(BuildError::SystemMessageRequired);
        }
        self.presets.insert(task, message);
        Ok(())
    }

    /// Looks up a preset by task name.
    #[must_use]
    pub fn system_preset(&self, task: &str) -> Option<&str> {
        self.presets.get(task).map(String::as_str)
    }

    /// Registered preset names, sorted.
    #[must_use]
    pub fn system_presets(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.presets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Assembles a prompt from `request`.
    ///
    /// A literal system message takes precedence over a preset. Unknown
    /// preset names are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is invalid, the file cannot be
    /// read, or the image exceeds the size ceiling.
    pub fn build(&self, request: &BuildRequest) -> Result<Prompt, BuildError> {
        request.validate()?;

        let mut prompt = Prompt {
            user_prompt: request.prompt.clone(),
            ..Prompt::default()
        };

        if let Some(task) = request.task.as_deref().filter(|t| !t.is_empty()) {
            match self.system_preset(task) {
                Some(preset) => prompt.system_message = preset.to_string(),
                None => warn!("Unknown task preset '{task}', ignoring"),
            }
        }

        if let Some(message) = request.system_message.as_deref().filter(|m| !m.is_empty()) {
            prompt.system_message = message.to_string();
        }

        if let Some(guidelines) = request.guidelines.as_deref() {
            prompt.guidelines = guidelines.to_string();
        }

        if let Some(path) = request.file.as_deref().filter(|p| !p.is_empty()) {
            let file = self.files.process(path)?;
            prompt.file_content = fence(&file.content, &file.path);
            debug!("Embedded {} ({} bytes)", file.path, file.size);
        }

        if let Some(image) = request.image.as_deref() {
            let actual = image.len() as u64;
            let max = self.files.max_file_size();
            if actual > max {
                return Err(BuildError::ImageTooLarge { actual, max });
            }
            prompt.image_content = fence(STANDARD.encode(image).as_bytes(), IMAGE_DISPLAY_NAME);
            debug!("Embedded image ({actual} bytes)");
        }

        Ok(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::{FileError, ValidationError};
    use anyhow::{Result, anyhow};
    use std::fs;
    use tempfile::TempDir;

    fn builder(max: u64) -> PromptBuilder {
        PromptBuilder::with_default_presets(FileProcessor::new(
            max,
            vec![".go".to_string(), ".md".to_string()],
        ))
    }

    #[test]
    fn test_build_prompt_only() -> Result<()> {
        let prompt = builder(1024).build(&BuildRequest::new("Explain this code"))?;
        assert_eq!(prompt.user_prompt, "Explain this code");
        assert!(prompt.system_message.is_empty());
        assert!(prompt.file_content.is_empty());
        Ok(())
    }

    #[test]
    fn test_build_blank_prompt_fails() {
        assert!(matches!(
            builder(1024).build(&BuildRequest::new(" ")),
            Err(BuildError::PromptRequired)
        ));
    }

    #[test]
    fn test_build_uses_task_preset() -> Result<()> {
        let request = BuildRequest {
            task: Some("coding".to_string()),
            ..BuildRequest::new("Refactor this")
        };
        let prompt = builder(1024).build(&request)?;
        assert!(prompt.system_message.starts_with("You are an expert software developer"));
        Ok(())
    }

    #[test]
    fn test_literal_system_message_overrides_preset() -> Result<()> {
        let request = BuildRequest {
            task: Some("coding".to_string()),
            system_message: Some("You are a pirate.".to_string()),
            ..BuildRequest::new("Refactor this")
        };
        let prompt = builder(1024).build(&request)?;
        assert_eq!(prompt.system_message, "You are a pirate.");
        Ok(())
    }

    #[test]
    fn test_unknown_task_is_ignored() -> Result<()> {
        let request = BuildRequest {
            task: Some("poetry".to_string()),
            ..BuildRequest::new("Write")
        };
        let prompt = builder(1024).build(&request)?;
        assert!(prompt.system_message.is_empty());
        Ok(())
    }

    #[test]
    fn test_build_embeds_fenced_file() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("main.go");
        fs::write(&path, "package main")?;
        let path = path.to_str().ok_or_else(|| anyhow!("temp path is not UTF-8"))?;

        let request = BuildRequest {
            file: Some(path.to_string()),
            guidelines: Some("Be brief".to_string()),
            ..BuildRequest::new("Explain")
        };
        let prompt = builder(1024).build(&request)?;
        assert_eq!(
            prompt.file_content,
            format!("BEGIN {path}\n```go\npackage main\n```\nEND {path}").into_bytes()
        );
        assert_eq!(prompt.guidelines, "Be brief");
        Ok(())
    }

    #[test]
    fn test_build_propagates_file_errors() {
        let request = BuildRequest {
            file: Some("notes.pdf".to_string()),
            ..BuildRequest::new("Explain")
        };
        assert!(matches!(
            builder(1024).build(&request),
            Err(BuildError::File(FileError::Validation(
                ValidationError::ExtensionNotAllowed { .. }
            )))
        ));
    }

    #[test]
    fn test_build_embeds_image() -> Result<()> {
        let request = BuildRequest {
            image: Some(vec![0x89, b'P', b'N', b'G']),
            ..BuildRequest::new("Describe")
        };
        let prompt = builder(1024).build(&request)?;
        assert_eq!(prompt.image_content, b"BEGIN image\niVBORw==\nEND image");
        Ok(())
    }

    #[test]
    fn test_build_image_too_large() {
        let request = BuildRequest {
            image: Some(vec![0; 8]),
            ..BuildRequest::new("Describe")
        };
        assert!(matches!(
            builder(4).build(&request),
            Err(BuildError::ImageTooLarge { actual: 8, max: 4 })
        ));
    }

    #[test]
    fn test_add_system_preset_rejects_blank() {
        let mut b = builder(1024);
        assert!(matches!(
            b.add_system_preset(" ", "msg"),
            Err(BuildError::TaskNameRequired)
        ));
        assert!(matches!(
            b.add_system_preset("review", ""),
            Err(BuildError::SystemMessageRequired)
        ));
    }

    #[test]
    fn test_presets_are_listed_sorted() -> Result<()> {
        let mut b = builder(1024);
        b.add_system_preset("review", "You review code.")?;
        assert_eq!(
            b.system_presets(),
            vec!["analysis", "coding", "documentation", "review"]
        );
        assert_eq!(b.system_preset("review"), Some("You review code."));
        Ok(())
    }
}
