// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mark Wells <contact@markwells.dev>

/// Prompt assembly and system presets.
mod builder;
/// Error types for prompt assembly and templates.
mod error;
/// Template variable substitution.
mod template;
/// Request and prompt types.
mod types;

pub use builder::{DEFAULT_PRESETS, PromptBuilder};
pub use error::{BuildError, TemplateError};
pub use template::TemplateBuilder;
pub use types::{BuildRequest, Prompt};
