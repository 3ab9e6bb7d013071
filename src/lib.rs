// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mark Wells <contact@markwells.dev>

//! Prompt Builder assembles text prompts for language models.
//!
//! A prompt combines a user instruction with an optional system message
//! (literal or from a named preset), a guidelines block, and either a file
//! or an image embedded as a fenced block. File reads go through an
//! extension allow-list, a path denylist, a home/cwd/temp containment
//! check, and a size ceiling.

/// Command-line output formatting and colors.
pub mod cli;
/// Configuration loading.
pub mod config;
/// Validated file reads and content fencing.
pub mod files;
/// Prompt assembly and templates.
pub mod prompt;
