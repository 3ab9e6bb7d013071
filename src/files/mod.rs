// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mark Wells <contact@markwells.dev>

/// Error types for file validation and reads.
mod error;
/// Begin/end marker fencing for embedded content.
pub mod fence;
/// Path validation and containment checks.
pub mod path_security;
/// Size-limited, validated file reads.
mod processor;

pub use error::{FileError, ValidationError};
pub use fence::fence;
pub use path_security::{ContainmentRoots, PathValidator};
pub use processor::{FileContent, FileProcessor};
