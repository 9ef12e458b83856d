//! Code emitter
//!
//! Sequences a program into the final G-code text: init and setup blocks,
//! every top-level instruction, then the finish block or the default
//! trailer.

use tracing::{info, warn};
use yaml2gcode_core::{Error, Result};

use crate::interpreter::Interpreter;
use crate::program::Program;
use crate::writer::{Diagnostic, GcodeWriter, Prefix};

/// Trailer written when the program has no `finish` block.
pub const DEFAULT_TRAILER: &str = "M30 G00 Z10 M5";

/// Indentation unit for one level of macro nesting.
pub const DEFAULT_INDENT_UNIT: &str = " ";

/// Emitter options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterOptions {
    pub indent_unit: String,
    pub default_trailer: String,
    /// Fail the render if any inline diagnostic was produced
    pub strict: bool,
}

impl Default for EmitterOptions {
    fn default() -> Self {
        Self {
            indent_unit: DEFAULT_INDENT_UNIT.to_string(),
            default_trailer: DEFAULT_TRAILER.to_string(),
            strict: false,
        }
    }
}

/// Result of a render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Renders programs to G-code text
#[derive(Debug, Clone, Default)]
pub struct CodeEmitter {
    options: EmitterOptions,
}

impl CodeEmitter {
    pub fn new(options: EmitterOptions) -> Self {
        Self { options }
    }

    /// Render a program.
    ///
    /// Inline diagnostics are returned alongside the text; in strict mode
    /// any diagnostic turns into an error instead.
    pub fn render(&self, program: &Program) -> Result<Rendered> {
        let mut out = GcodeWriter::new();

        for line in program.init.iter().chain(&program.setup) {
            out.raw(line);
        }

        let interpreter = Interpreter::new(&program.registry);
        interpreter.expand_all(
            &program.commands,
            Prefix::root(&self.options.indent_unit),
            &mut out,
        );

        match &program.finish {
            Some(lines) => {
                for line in lines {
                    out.raw(line);
                }
            }
            None => out.raw(&self.options.default_trailer),
        }

        let (text, diagnostics) = out.into_parts();
        info!(
            "Rendered {} lines with {} inline diagnostics",
            text.lines().count(),
            diagnostics.len()
        );

        if self.options.strict {
            if let Some(first) = diagnostics.first() {
                warn!("Strict mode: rejecting output");
                return Err(Error::Strict {
                    count: diagnostics.len(),
                    first: first.message.clone(),
                });
            }
        }
        Ok(Rendered { text, diagnostics })
    }
}

/// Render a program with default options.
pub fn render(program: &Program) -> Result<String> {
    CodeEmitter::default().render(program).map(|r| r.text)
}
