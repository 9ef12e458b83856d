//! # yaml2gcode Macros
//!
//! The macro language front end and G-code back end:
//!
//! 1. **Loader** - YAML tree to typed instructions and macro definitions
//! 2. **Registry** - alias/rotation resolution and cycle checks
//! 3. **Interpreter** - recursive expansion of instructions
//! 4. **Emitter** - sequencing of boilerplate and expanded commands
//!
//! ```no_run
//! use yaml2gcode_macros::{render, Program};
//!
//! let program = Program::from_yaml_str("commands: [{macro: drill}]")?;
//! let gcode = render(&program)?;
//! # Ok::<(), yaml2gcode_core::Error>(())
//! ```

pub mod definition;
pub mod emitter;
pub mod instruction;
pub mod interpreter;
pub mod loader;
pub mod program;
pub mod registry;
pub mod writer;

pub use definition::{AliasSpec, MacroDefinition};
pub use emitter::{render, CodeEmitter, EmitterOptions, Rendered, DEFAULT_INDENT_UNIT, DEFAULT_TRAILER};
pub use instruction::{Instruction, RepeatMacro, Waypoint, WaypointLine};
pub use interpreter::Interpreter;
pub use program::Program;
pub use registry::MacroRegistry;
pub use writer::{Diagnostic, DiagnosticKind, GcodeWriter, Prefix};
