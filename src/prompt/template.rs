// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mark Wells <contact@markwells.dev>

//! `{{ name }}` variable substitution for prompt templates.
//!
//! Placeholders may be written `{{name}}`, `{{ name }}`, or `{{.name}}`.

use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashMap;

use super::error::TemplateError;

const PLACEHOLDER: &str = r"\{\{\s*\.?([A-Za-z_][A-Za-z0-9_]*)\s*\}\}";

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Variable(String),
}

/// A parsed template plus the variables bound to it.
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
    segments: Vec<Segment>,
    vars: HashMap<String, Value>,
}

impl TemplateBuilder {
    /// Parses `template`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Parse`] if a `{{` is not closed by a
    /// well-formed placeholder.
    pub fn new(template: &str) -> Result<Self, TemplateError> {
        let placeholder = Regex::new(PLACEHOLDER)?;
        let mut segments = Vec::new();
        let mut last = 0;

        for caps in placeholder.captures_iter(template) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            Self::push_literal(&mut segments, template, last, whole.start())?;
            segments.push(Segment::Variable(name.as_str().to_string()));
            last = whole.end();
        }
        Self::push_literal(&mut segments, template, last, template.len())?;

        Ok(Self {
            segments,
            vars: HashMap::new(),
        })
    }

    fn push_literal(
        segments: &mut Vec<Segment>,
        template: &str,
        start: usize,
        end: usize,
    ) -> Result<(), TemplateError> {
        let text = &template[start..end];
        if let Some(offset) = text.find("{{") {
            return Err(TemplateError::Parse(start + offset));
        }
        if !text.is_empty() {
            segments.push(Segment::Literal(text.to_string()));
        }
        Ok(())
    }

    /// Binds a single variable.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Binds every entry of `vars`.
    pub fn set_map(&mut self, vars: Map<String, Value>) {
        self.vars.extend(vars);
    }

    /// Renders the template.
    ///
    /// String values are inserted as-is; other JSON values as their JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingVariable`] for a placeholder with no binding.
    pub fn build(&self) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Variable(name) => match self.vars.get(name) {
                    Some(Value::String(s)) => out.push_str(s),
                    Some(other) => out.push_str(&other.to_string()),
                    None => return Err(TemplateError::MissingVariable(name.clone())),
                },
            }
        }
        Ok(out)
    }
}
