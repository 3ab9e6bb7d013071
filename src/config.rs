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

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

use crate::files::FileProcessor;
use crate::prompt::PromptBuilder;

/// Default size ceiling for embedded files (1 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Extensions accepted when no configuration overrides them.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &[
    ".go", ".py", ".js", ".ts", ".java", ".cpp", ".c", ".h", ".cs", ".php", ".rb", ".rs", ".txt",
    ".md",
];

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Maximum embedded file size in bytes (default: 1 MiB)
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Extensions, with leading dot, that may be embedded
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,

    /// Extra system presets keyed by task name (e.g., "review")
    #[serde(default)]
    pub presets: HashMap<String, String>,
}

const fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

fn default_allowed_extensions() -> Vec<String> {
    DEFAULT_ALLOWED_EXTENSIONS
        .iter()
        .map(|ext| (*ext).to_string())
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed_extensions: default_allowed_extensions(),
            presets: HashMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from standard paths or a specific file.
    pub fn load(explicit_file: Option<PathBuf>) -> Result<Self> {
        let user_config = dirs::config_dir()
            .map(|dir| dir.join("prompt-builder").join("config.toml"))
            .filter(|path| path.exists());
        Self::load_layers(user_config, explicit_file)
    }

    fn load_layers(user_config: Option<PathBuf>, explicit_file: Option<PathBuf>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // 1. Start with defaults
        builder = builder.set_default("max_file_size", DEFAULT_MAX_FILE_SIZE)?;

        // 2. Load from user config directory (~/.config/prompt-builder/config.toml)
        if let Some(path) = user_config {
            debug!("Loading user config from {}", path.display());
            builder = builder.add_source(config::File::from(path));
        }

        // 3. Load from explicit file if provided
        if let Some(path) = explicit_file {
            debug!("Loading config from {}", path.display());
            builder = builder.add_source(config::File::from(path));
        }

        // 4. Load from environment variables (PROMPT_BUILDER_MAX_FILE_SIZE, etc.)
        builder = builder.add_source(
            config::Environment::with_prefix("PROMPT_BUILDER")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("allowed_extensions"),
        );

        let config = builder
            .build()
            .context("Failed to build configuration")?;

        config.try_deserialize().context("Failed to deserialize configuration")
    }

    /// Builds the file processor described by this configuration.
    pub fn file_processor(&self) -> FileProcessor {
        FileProcessor::new(self.max_file_size, self.allowed_extensions.clone())
    }

    /// Builds a prompt builder with the default presets plus configured ones.
    pub fn prompt_builder(&self) -> Result<PromptBuilder> {
        let mut builder = PromptBuilder::with_default_presets(self.file_processor());
        for (task, message) in &self.presets {
            builder
                .add_system_preset(task.as_str(), message.as_str())
                .with_context(|| format!("Invalid preset '{task}' in configuration"))?;
        }
        Ok(builder)
    }
}
