//! G-code output buffer
//!
//! Collects emitted lines together with the inline diagnostics reported
//! while expanding. Every line is written with its indentation prefix and a
//! trailing newline.

use std::fmt;

use tracing::warn;
use yaml2gcode_core::Motion;

/// Indentation prefix: `unit` repeated `depth` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prefix<'a> {
    unit: &'a str,
    depth: usize,
}

impl<'a> Prefix<'a> {
    pub fn root(unit: &'a str) -> Self {
        Self { unit, depth: 0 }
    }

    pub fn deeper(self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl fmt::Display for Prefix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.depth {
            f.write_str(self.unit)?;
        }
        Ok(())
    }
}

/// Category of an inline diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    UnknownMacro,
    MalformedWaypoint,
    UnsupportedInstruction,
    UnsupportedCommand,
}

/// A recoverable problem, reported as a comment in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn unknown_macro(name: &str) -> Self {
        Self {
            kind: DiagnosticKind::UnknownMacro,
            message: format!("unknown macro `{}`", name),
        }
    }

    pub fn malformed_waypoint(line: &str) -> Self {
        Self {
            kind: DiagnosticKind::MalformedWaypoint,
            message: format!("malformed waypoint: {}", line),
        }
    }

    pub fn unsupported_instruction(kind: &str) -> Self {
        Self {
            kind: DiagnosticKind::UnsupportedInstruction,
            message: format!("unsupported instruction: {}", kind),
        }
    }

    pub fn unsupported_command(line: &str) -> Self {
        Self {
            kind: DiagnosticKind::UnsupportedCommand,
            message: format!("unsupported command: {}", line),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "; ERROR: {}", self.message)
    }
}

/// Output buffer for one render.
#[derive(Debug, Default)]
pub struct GcodeWriter {
    buf: String,
    diagnostics: Vec<Diagnostic>,
}

impl GcodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `text` as one line, verbatim.
    pub fn raw(&mut self, text: &str) {
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    /// Write one prefixed line.
    pub fn line(&mut self, prefix: Prefix<'_>, text: impl fmt::Display) {
        self.buf.push_str(&format!("{}{}\n", prefix, text));
    }

    pub fn blank_line(&mut self) {
        self.buf.push('\n');
    }

    pub fn motion(&mut self, prefix: Prefix<'_>, motion: &Motion) {
        self.line(prefix, motion);
    }

    /// Write an inline error comment and record the diagnostic.
    pub fn error(&mut self, prefix: Prefix<'_>, diagnostic: Diagnostic) {
        warn!("{}", diagnostic.message);
        self.line(prefix, &diagnostic);
        self.diagnostics.push(diagnostic);
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_parts(self) -> (String, Vec<Diagnostic>) {
        (self.buf, self.diagnostics)
    }
}
