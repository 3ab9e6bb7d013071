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

//! CLI utilities for prompt output formats and terminal colors.

use anyhow::{Context, Result};
use clap::ValueEnum;
use crossterm::tty::IsTty;
use std::io::{Write, stderr, stdout};

use crate::prompt::Prompt;

/// Configuration for color output on one stream
#[derive(Debug, Clone)]
pub struct ColorConfig {
    pub enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig for stdout, auto-detecting TTY unless nocolor is true
    pub fn new(nocolor: bool) -> Self {
        Self::detect(nocolor, stdout().is_tty())
    }

    /// Create a ColorConfig for stderr, auto-detecting TTY unless nocolor is true
    pub fn for_stderr(nocolor: bool) -> Self {
        Self::detect(nocolor, stderr().is_tty())
    }

    /// Colors are on only for a terminal and only without nocolor
    pub const fn detect(nocolor: bool, is_tty: bool) -> Self {
        Self {
            enabled: !nocolor && is_tty,
        }
    }

    /// ANSI escape code for red (errors)
    pub fn red(&self, s: &str) -> String {
        if self.enabled {
            format!("\x1b[31m{}\x1b[0m", s)
        } else {
            s.to_string()
        }
    }

    /// ANSI escape code for dim text
    pub fn dim(&self, s: &str) -> String {
        if self.enabled {
            format!("\x1b[2m{}\x1b[0m", s)
        } else {
            s.to_string()
        }
    }
}

/// How an assembled prompt is written out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON object of the prompt parts.
    Json,
    /// The prompt text only.
    Text,
    /// A `# Generated Prompt` heading with the prompt in a code block.
    #[default]
    Markdown,
}

/// Renders `prompt` in the requested format, with a trailing newline.
///
/// Text and markdown carry embedded file bytes unchanged; JSON is lossy for
/// invalid UTF-8.
pub fn format_prompt(prompt: &Prompt, format: OutputFormat) -> Result<Vec<u8>> {
    let mut rendered = Vec::new();
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut rendered, prompt).context("Failed to marshal JSON")?;
        }
        OutputFormat::Text => rendered.extend(prompt.to_bytes()),
        OutputFormat::Markdown => {
            rendered.extend_from_slice(b"# Generated Prompt\n\n```\n");
            rendered.extend(prompt.to_bytes());
            rendered.extend_from_slice(b"\n```");
        }
    }
    rendered.push(b'\n');
    Ok(rendered)
}

/// Writes `prompt` to `out` in the requested format.
pub fn write_prompt(out: &mut impl Write, prompt: &Prompt, format: OutputFormat) -> Result<()> {
    let rendered = format_prompt(prompt, format)?;
    out.write_all(&rendered).context("Failed to write prompt")?;
    out.flush().context("Failed to flush output")
}

/// Formats an error and its causes as `error: outer: inner: ...`.
pub fn format_error(err: &anyhow::Error, colors: &ColorConfig) -> String {
    format!("{}: {err:#}", colors.red("error"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn sample() -> Prompt {
        Prompt {
            system_message: "You are terse.".to_string(),
            user_prompt: "Explain".to_string(),
            ..Prompt::default()
        }
    }

    #[test]
    fn test_color_config_disabled() {
        let config = ColorConfig::new(true);
        assert!(!config.enabled);
        assert_eq!(config.red("test"), "test");
        assert_eq!(config.dim("test"), "test");
    }

    #[test]
    fn test_color_config_enabled() {
        let config = ColorConfig { enabled: true };
        assert_eq!(config.red("x"), "\x1b[31mx\x1b[0m");
    }

    #[test]
    fn test_color_config_follows_tty() {
        assert!(ColorConfig::detect(false, true).enabled);
        assert!(!ColorConfig::detect(false, false).enabled);
        assert!(!ColorConfig::detect(true, true).enabled);
    }

    #[test]
    fn test_format_text() -> Result<()> {
        assert_eq!(
            format_prompt(&sample(), OutputFormat::Text)?,
            b"You are terse.\n\nExplain\n"
        );
        Ok(())
    }

    #[test]
    fn test_format_markdown() -> Result<()> {
        assert_eq!(
            format_prompt(&sample(), OutputFormat::Markdown)?,
            b"# Generated Prompt\n\n```\nYou are terse.\n\nExplain\n```\n"
        );
        Ok(())
    }

    #[test]
    fn test_format_text_keeps_raw_bytes() -> Result<()> {
        let prompt = Prompt {
            user_prompt: "Explain".to_string(),
            file_content: b"BEGIN a.txt\n\xFF\xFE\nEND a.txt".to_vec(),
            ..Prompt::default()
        };
        let rendered = format_prompt(&prompt, OutputFormat::Markdown)?;
        assert!(
            rendered.windows(2).any(|w| w == b"\xFF\xFE"),
            "raw bytes missing: {rendered:?}"
        );
        Ok(())
    }

    #[test]
    fn test_format_json() -> Result<()> {
        let rendered = format_prompt(&sample(), OutputFormat::Json)?;
        assert_eq!(rendered.last(), Some(&b'\n'));
        let value: serde_json::Value = serde_json::from_slice(&rendered)?;
        assert_eq!(value["system_message"], "You are terse.");
        assert_eq!(value["user_prompt"], "Explain");
        assert_eq!(value["file_content"], "");
        assert_eq!(value["guidelines"], "");
        Ok(())
    }

    #[test]
    fn test_write_prompt() -> Result<()> {
        let mut buf = Vec::new();
        write_prompt(&mut buf, &sample(), OutputFormat::Text)?;
        assert_eq!(String::from_utf8(buf)?, "You are terse.\n\nExplain\n");
        Ok(())
    }

    #[test]
    fn test_format_error_includes_chain() {
        let err = anyhow!("permission denied").context("failed to read file a.go");
        let message = format_error(&err, &ColorConfig::for_stderr(true));
        assert_eq!(message, "error: failed to read file a.go: permission denied");
    }
}
