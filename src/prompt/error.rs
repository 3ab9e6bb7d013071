// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mark Wells <contact@markwells.dev>

//! Prompt assembly and template errors.

use thiserror::Error;

use crate::files::FileError;

/// Errors raised while assembling a prompt.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The user instruction was empty or whitespace only.
    #[error("prompt is required")]
    PromptRequired,

    /// A request carried both a file and an image.
    #[error("a prompt may embed a file or an image, not both")]
    FileAndImage,

    /// A preset was registered with a blank name.
    #[error("task name is required")]
    TaskNameRequired,

    /// A preset was registered with a blank message.
    #[error("system message is required")]
    SystemMessageRequired,

    /// The image argument was not valid base64.
    #[error("failed to decode image")]
    ImageDecode(#[from] base64::DecodeError),

    /// The decoded image exceeds the size ceiling.
    #[error("image is too large ({actual} bytes, max {max} bytes)")]
    ImageTooLarge {
        /// Decoded image size.
        actual: u64,
        /// Configured maximum.
        max: u64,
    },

    /// Reading the embedded file failed.
    #[error("failed to process file")]
    File(#[from] FileError),
}

/// Errors raised while parsing or rendering a template.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A `{{` was never closed.
    #[error("failed to parse template: unclosed placeholder at byte {0}")]
    Parse(usize),

    /// The placeholder pattern failed to compile.
    #[error("failed to compile placeholder pattern")]
    Pattern(#[from] regex::Error),

    /// A placeholder had no bound variable.
    #[error("failed to execute template: no value for variable '{0}'")]
    MissingVariable(String),
}
