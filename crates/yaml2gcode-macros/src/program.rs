//! Program model
//!
//! A fully loaded and validated description: boilerplate blocks, the macro
//! registry, and the top-level instruction list.

use std::path::Path;

use tracing::info;
use yaml2gcode_core::{LoadError, Result};

use crate::instruction::Instruction;
use crate::loader::{parse_document, parse_instructions, parse_macros, text_lines};
use crate::registry::MacroRegistry;

/// A loaded program, read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub init: Vec<String>,
    pub setup: Vec<String>,
    pub registry: MacroRegistry,
    pub commands: Vec<Instruction>,
    /// `None` means the default trailer is emitted
    pub finish: Option<Vec<String>>,
}

impl Program {
    /// Load a program from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let document = parse_document(text)?;
        let commands = document.commands.ok_or(LoadError::MissingCommands)?;

        let definitions = match &document.macros {
            Some(macros) => parse_macros(macros)?,
            None => Vec::new(),
        };
        let registry = MacroRegistry::build(definitions)?;

        let program = Self {
            init: text_lines("init", document.init.as_deref().unwrap_or_default())?,
            setup: text_lines("setup", document.setup.as_deref().unwrap_or_default())?,
            registry,
            commands: parse_instructions(&commands)?,
            finish: document
                .finish
                .as_deref()
                .map(|lines| text_lines("finish", lines))
                .transpose()?,
        };
        info!(
            "Loaded program: {} top-level instructions, {} macros",
            program.commands.len(),
            program.registry.len()
        );
        Ok(program)
    }

    /// Load a program from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LoadError::InputNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}
