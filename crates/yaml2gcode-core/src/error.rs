//! Error handling for yaml2gcode
//!
//! Provides error types for every layer of the translator:
//! - Parameter errors (instruction parameter strings)
//! - Load errors (document structure, input files)
//! - Macro errors (registry construction and lookup)
//!
//! Only fatal problems are represented here. Problems that are reported
//! inline as G-code comments never become an `Error`.
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Parameter error type
///
/// Raised while parsing the `<letter><number>` tokens of an instruction's
/// parameter string, or while validating the parsed values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A token's numeric part could not be parsed
    #[error("Invalid number in token '{token}'")]
    InvalidNumber {
        /// The offending token, verbatim.
        token: String,
    },

    /// A positional field could not be parsed as an integer
    #[error("Invalid count '{value}'")]
    InvalidCount {
        /// The text that failed to parse.
        value: String,
    },

    /// A required positional field is missing
    #[error("Missing required parameter: {0}")]
    Missing(String),

    /// A value must be strictly positive
    #[error("Parameter '{name}' must be positive, got {value}")]
    NotPositive {
        /// The parameter letter or name.
        name: String,
        /// The rejected value.
        value: f64,
    },

    /// A toolpath would need more steps than can be generated
    #[error("Parameter '{name}' needs {steps} steps, limit is {limit}")]
    TooManySteps {
        /// The parameter letter driving the step count.
        name: String,
        /// Requested number of steps.
        steps: f64,
        /// Largest accepted number of steps.
        limit: usize,
    },
}

/// Load error type
///
/// Represents problems with the input document itself.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The input file does not exist
    #[error("File '{}' does not exist", path.display())]
    InputNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The document has no top-level `commands` sequence
    #[error("No commands found in input document")]
    MissingCommands,

    /// The document is not valid YAML or does not have the expected shape
    #[error("Invalid document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An instruction payload has the wrong shape
    #[error("Invalid '{kind}' instruction: {reason}")]
    InvalidInstruction {
        /// The instruction kind.
        kind: String,
        /// Why the payload was rejected.
        reason: String,
    },

    /// An instruction's parameters could not be parsed
    #[error("Invalid '{kind}' parameters: {source}")]
    InvalidParameters {
        /// The instruction kind.
        kind: String,
        /// The underlying parameter error.
        #[source]
        source: ParameterError,
    },
}

/// Macro error type
///
/// Represents errors in the macro graph. Everything except `UnknownMacro`
/// is detected while the registry is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MacroError {
    /// Lookup of a macro that is not registered
    #[error("Unknown macro '{0}'")]
    UnknownMacro(String),

    /// An alias names a macro that is not registered
    #[error("Macro '{alias}' is an alias of unknown macro '{source_name}'")]
    UnknownAliasSource {
        /// The alias being resolved.
        alias: String,
        /// The missing source macro.
        source_name: String,
    },

    /// Aliases refer to each other in a loop
    #[error("Alias cycle: {}", chain.join(" -> "))]
    AliasCycle {
        /// The macros forming the cycle, first name repeated at the end.
        chain: Vec<String>,
    },

    /// Macros invoke each other in a loop
    #[error("Recursive macro invocation: {}", chain.join(" -> "))]
    RecursiveInvocation {
        /// The macros forming the cycle, first name repeated at the end.
        chain: Vec<String>,
    },
}

/// Main error type for yaml2gcode
#[derive(Error, Debug)]
pub enum Error {
    /// Load error
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Macro error
    #[error(transparent)]
    Macro(#[from] MacroError),

    /// Parameter error
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// Strict mode rejected a render that produced inline diagnostics
    #[error("{count} inline diagnostic(s) in strict mode, first: {first}")]
    Strict {
        /// Number of diagnostics produced.
        count: usize,
        /// The first diagnostic message.
        first: String,
    },

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this is a problem with the input document
    pub fn is_load_error(&self) -> bool {
        matches!(self, Error::Load(_) | Error::Parameter(_))
    }

    /// Check if this is a macro graph error
    pub fn is_macro_error(&self) -> bool {
        matches!(self, Error::Macro(_))
    }
}

/// Result type for yaml2gcode operations
pub type Result<T> = std::result::Result<T, Error>;
