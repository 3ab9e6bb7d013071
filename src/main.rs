// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mark Wells <contact@markwells.dev>

//! Prompt Builder CLI.
//!
//! Builds a prompt from flags and writes it to stdout, lists the available
//! system presets, or renders a template from JSON variables on stdin.

#![allow(clippy::print_stdout, reason = "CLI tool needs to output to stdout")]
#![allow(clippy::print_stderr, reason = "CLI tool needs to output to stderr")]

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use prompt_builder::cli::{self, ColorConfig, OutputFormat};
use prompt_builder::config::Config;
use prompt_builder::prompt::{BuildRequest, TemplateBuilder};

/// Command-line arguments for Prompt Builder.
#[derive(Parser, Debug)]
#[command(name = "prompt-builder")]
#[command(about = "Build LLM prompts from an instruction, presets, guidelines, and fenced file content")]
#[command(version = env!("PROMPT_BUILDER_VERSION"))]
#[command(after_help = "EXAMPLES:
  prompt-builder -p \"Explain this code\" -f main.go
  prompt-builder -p \"Refactor this\" -f app.py -t coding -g \"Follow PEP 8\"
  prompt-builder -p \"Analyze this code\" -f app.js -o json")]
struct Args {
    /// The subcommand to run. Without one, a prompt is built from the flags below.
    #[command(subcommand)]
    command: Option<Command>,

    /// User prompt text (required when building).
    #[arg(short, long)]
    prompt: Option<String>,

    /// File to embed in the prompt.
    #[arg(short, long)]
    file: Option<String>,

    /// Task preset for the system message (e.g., "coding").
    #[arg(short, long)]
    task: Option<String>,

    /// Custom system message. Overrides --task.
    #[arg(short, long = "system")]
    system_message: Option<String>,

    /// Guidelines to follow.
    #[arg(short, long)]
    guidelines: Option<String>,

    /// Base64-encoded image data to embed instead of a file.
    #[arg(short, long, conflicts_with = "file")]
    image: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    output: OutputFormat,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Maximum embedded file size in bytes.
    /// Overrides config file if set (default in config is 1 MiB).
    #[arg(long, global = true)]
    max_file_size: Option<u64>,

    /// Disable colored error output.
    #[arg(long, global = true)]
    nocolor: bool,
}

/// Subcommands supported by Prompt Builder.
#[derive(Subcommand, Debug)]
enum Command {
    /// List the available system presets.
    Presets,

    /// Render a template, reading a JSON object of variables from stdin.
    Render {
        /// Template text with `{{name}}` placeholders.
        #[arg(short, long)]
        template: String,
    },
}

/// Entry point for the Prompt Builder binary.
fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("prompt_builder=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let colors = ColorConfig::for_stderr(args.nocolor);
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", cli::format_error(&e, &colors));
            ExitCode::FAILURE
        }
    }
}

/// Dispatches to the selected command.
///
/// # Errors
///
/// Returns an error if the selected command fails.
fn run(mut args: Args) -> Result<()> {
    let mut config = Config::load(args.config.clone())?;

    // Override max_file_size if provided on CLI
    if let Some(max) = args.max_file_size {
        config.max_file_size = max;
    }

    match args.command.take() {
        None => run_build(args, &config),
        Some(Command::Presets) => run_presets(&config, &ColorConfig::new(args.nocolor)),
        Some(Command::Render { template }) => run_render(&template),
    }
}

/// Builds a prompt from the top-level flags and writes it to stdout.
///
/// # Errors
///
/// Returns an error if the request is invalid or the file cannot be embedded.
fn run_build(args: Args, config: &Config) -> Result<()> {
    let builder = config.prompt_builder()?;

    let mut request = BuildRequest {
        file: args.file,
        task: args.task,
        system_message: args.system_message,
        guidelines: args.guidelines,
        ..BuildRequest::new(args.prompt.unwrap_or_default())
    };
    if let Some(image) = args.image.as_deref() {
        request = request
            .with_base64_image(image)
            .context("Failed to convert flags to build request")?;
    }

    let prompt = builder.build(&request).context("Failed to build prompt")?;
    debug!("Built prompt with {:?} output", args.output);

    cli::write_prompt(&mut std::io::stdout().lock(), &prompt, args.output)
}

/// Lists preset names and messages.
///
/// # Errors
///
/// Returns an error if a configured preset is invalid.
fn run_presets(config: &Config, colors: &ColorConfig) -> Result<()> {
    let builder = config.prompt_builder()?;
    let names = builder.system_presets();
    let width = names.iter().map(|n| n.len()).max().unwrap_or(0);

    for name in names {
        let message = builder.system_preset(name).unwrap_or_default();
        println!("{name:<width$}  {}", colors.dim(message));
    }
    Ok(())
}

/// Renders a template with variables read from stdin.
///
/// # Errors
///
/// Returns an error if stdin is not a JSON object or the template fails.
fn run_render(template: &str) -> Result<()> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Error reading from stdin")?;

    let vars: serde_json::Value =
        serde_json::from_str(&input).context("Error unmarshaling JSON from stdin")?;
    let serde_json::Value::Object(vars) = vars else {
        bail!("Expected a JSON object of template variables on stdin");
    };

    let mut builder = TemplateBuilder::new(template).context("Error creating builder")?;
    builder.set_map(vars);
    let rendered = builder.build().context("Error building prompt")?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .context("Failed to write output")?;
    stdout.flush().context("Failed to flush output")
}
