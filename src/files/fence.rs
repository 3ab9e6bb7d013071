// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mark Wells <contact@markwells.dev>

//! Content fencing: `BEGIN name` / optional code fence / raw bytes / `END name`.
//!
//! The markers are a textual convention for the consuming model. Content bytes
//! are copied verbatim, with no escaping and no UTF-8 repair, so a body
//! containing the marker text is not escaped either.

use super::path_security::extension_of;

/// Source extensions that get a fenced code block, with their language tag.
const CODE_LANGUAGES: &[(&str, &str)] = &[
    (".go", "go"),
    (".py", "python"),
    (".js", "javascript"),
    (".ts", "typescript"),
    (".java", "java"),
    (".cpp", "cpp"),
    (".c", "c"),
    (".h", "c"),
    (".cs", "csharp"),
    (".php", "php"),
    (".rb", "ruby"),
    (".rs", "rust"),
];

/// Returns `true` if `extension` (with leading dot) is a recognized source extension.
#[must_use]
pub fn is_code_extension(extension: &str) -> bool {
    CODE_LANGUAGES.iter().any(|(ext, _)| *ext == extension)
}

/// Returns the syntax-highlighting tag for `extension`, or `text` if unknown.
#[must_use]
pub fn language_for(extension: &str) -> &'static str {
    CODE_LANGUAGES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map_or("text", |(_, lang)| *lang)
}

/// Wraps `content` in begin/end markers named after `display_name`.
///
/// Code files additionally get a fenced block tagged with their language.
/// The result is bytes because `content` need not be valid UTF-8.
#[must_use]
pub fn fence(content: &[u8], display_name: &str) -> Vec<u8> {
    let extension = extension_of(display_name);
    let code = is_code_extension(extension);

    let mut out = Vec::with_capacity(content.len() + display_name.len() * 2 + 32);
    out.extend_from_slice(b"BEGIN ");
    out.extend_from_slice(display_name.as_bytes());
    out.push(b'\n');

    if code {
        out.extend_from_slice(b"```");
        out.extend_from_slice(language_for(extension).as_bytes());
        out.push(b'\n');
    }

    out.extend_from_slice(content);

    if code {
        out.extend_from_slice(b"\n```");
    }

    out.extend_from_slice(b"\nEND ");
    out.extend_from_slice(display_name.as_bytes());
    out
}
