// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mark Wells <contact@markwells.dev>

//! Request and result types for prompt assembly.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Serialize, Serializer};
use std::fmt;

use super::error::BuildError;

/// Inputs to [`PromptBuilder::build`](super::PromptBuilder::build).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildRequest {
    /// The user instruction. Required.
    pub prompt: String,
    /// Path of a file to embed.
    pub file: Option<String>,
    /// Name of a system preset.
    pub task: Option<String>,
    /// Literal system message; overrides `task`.
    pub system_message: Option<String>,
    /// Guidelines block.
    pub guidelines: Option<String>,
    /// Raw image bytes to embed.
    pub image: Option<Vec<u8>>,
}

impl BuildRequest {
    /// Creates a request with only the user instruction set.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    /// Attaches an image given as standard base64.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::ImageDecode`] if `encoded` is not valid base64.
    pub fn with_base64_image(mut self, encoded: &str) -> Result<Self, BuildError> {
        self.image = Some(STANDARD.decode(encoded.trim())?);
        Ok(self)
    }

    /// Checks that the request can be built.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt is blank or both a file and an image are set.
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.prompt.trim().is_empty() {
            return Err(BuildError::PromptRequired);
        }
        if self.file.is_some() && self.image.is_some() {
            return Err(BuildError::FileAndImage);
        }
        Ok(())
    }
}

/// An assembled prompt.
///
/// Fenced blocks are kept as raw bytes. Only JSON output and [`Display`]
/// replace invalid UTF-8 with U+FFFD; [`Prompt::to_bytes`] is byte-exact.
///
/// [`Display`]: fmt::Display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Prompt {
    /// System message, from a preset or given literally.
    pub system_message: String,
    /// The user instruction.
    pub user_prompt: String,
    /// Fenced file content.
    #[serde(serialize_with = "serialize_lossy")]
    pub file_content: Vec<u8>,
    /// Fenced, base64-encoded image data.
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "serialize_lossy")]
    pub image_content: Vec<u8>,
    /// Guidelines block.
    pub guidelines: String,
}

fn serialize_lossy<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(bytes))
}

impl Prompt {
    /// Joins the non-empty parts with blank lines, user prompt last.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut parts: Vec<&[u8]> = Vec::new();

        if !self.system_message.is_empty() {
            parts.push(self.system_message.as_bytes());
        }
        if !self.guidelines.is_empty() {
            parts.extend([b"Guidelines:".as_slice(), self.guidelines.as_bytes()]);
        }
        if !self.file_content.is_empty() {
            parts.extend([b"File content:".as_slice(), self.file_content.as_slice()]);
        }
        if !self.image_content.is_empty() {
            parts.extend([b"Image:".as_slice(), self.image_content.as_slice()]);
        }
        parts.push(self.user_prompt.as_bytes());

        parts.join(b"\n\n".as_slice())
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.to_bytes()))
    }
}
