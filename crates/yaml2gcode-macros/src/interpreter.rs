//! Instruction interpreter
//!
//! Walks instructions recursively and writes their G-code. The registry is
//! only read: alias resolution and cycle checks happened when it was built,
//! so expansion cannot fail. Problems found here (unknown macros, malformed
//! waypoints, unsupported kinds or lines) become inline error comments.

use tracing::debug;
use yaml2gcode_core::Motion;

use crate::definition::MacroDefinition;
use crate::instruction::{Instruction, RepeatMacro, WaypointLine};
use crate::registry::MacroRegistry;
use crate::writer::{Diagnostic, GcodeWriter, Prefix};

/// Cursor and sticky macro threaded through a `macroPath`.
#[derive(Debug, Clone, Copy, Default)]
struct PathState<'r> {
    x: f64,
    y: f64,
    sticky: Option<&'r MacroDefinition>,
}

/// Expands instructions against a macro registry
#[derive(Debug, Clone, Copy)]
pub struct Interpreter<'r> {
    registry: &'r MacroRegistry,
}

impl<'r> Interpreter<'r> {
    pub fn new(registry: &'r MacroRegistry) -> Self {
        Self { registry }
    }

    /// Expand an instruction list written at `prefix`.
    ///
    /// Raw lines and unsupported kinds stay at `prefix`; every other
    /// instruction is expanded one level deeper.
    pub fn expand_all(&self, instructions: &[Instruction], prefix: Prefix<'_>, out: &mut GcodeWriter) {
        for instruction in instructions {
            let level = if instruction.is_inline() {
                prefix
            } else {
                prefix.deeper()
            };
            self.expand(instruction, level, out);
        }
    }

    /// Expand one instruction with its handler prefix.
    pub fn expand(&self, instruction: &Instruction, prefix: Prefix<'_>, out: &mut GcodeWriter) {
        match instruction {
            Instruction::RawLine(line) => self.expand_raw(line, prefix, out),
            Instruction::Macro(name) => self.expand_macro(name, prefix, out),
            Instruction::MacroPath(lines) => self.expand_path(lines, prefix, out),
            Instruction::PolarVector(params) => out.motion(prefix, &params.motion()),
            Instruction::PolarArcVector(params) => out.motion(prefix, &params.motion()),
            Instruction::Box(params) => {
                for motion in params.moves() {
                    out.motion(prefix, &motion);
                }
            }
            Instruction::RepeatMacro(repeat) => self.expand_repeat(repeat, prefix, out),
            Instruction::Unsupported(kind) => {
                out.error(prefix, Diagnostic::unsupported_instruction(kind))
            }
        }
    }

    fn expand_raw(&self, line: &str, prefix: Prefix<'_>, out: &mut GcodeWriter) {
        if line.starts_with(['G', 'M']) {
            out.line(prefix, line);
        } else {
            out.error(prefix, Diagnostic::unsupported_command(line));
        }
    }

    fn expand_macro(&self, name: &str, prefix: Prefix<'_>, out: &mut GcodeWriter) {
        if name.is_empty() {
            return;
        }
        match self.registry.lookup(name) {
            Ok(definition) => self.expand_definition(definition, prefix, out),
            Err(_) => out.error(prefix, Diagnostic::unknown_macro(name)),
        }
    }

    fn expand_definition(&self, definition: &MacroDefinition, prefix: Prefix<'_>, out: &mut GcodeWriter) {
        debug!(
            "Expanding macro '{}' at depth {}",
            definition.name,
            prefix.depth()
        );
        out.blank_line();
        out.line(prefix, format_args!("; Macro: {}", definition.display_label()));
        if let Some(description) = &definition.description {
            out.line(prefix, format_args!("; - {}", description));
        }
        self.expand_all(&definition.commands, prefix, out);
    }

    fn expand_path(&self, lines: &[WaypointLine], prefix: Prefix<'_>, out: &mut GcodeWriter) {
        let end = lines.iter().fold(PathState::default(), |state, line| {
            self.visit_waypoint(state, line, prefix, out)
        });
        out.motion(prefix, &Motion::rapid().x_nonzero(-end.x).y_nonzero(-end.y));
    }

    fn visit_waypoint(
        &self,
        state: PathState<'r>,
        line: &WaypointLine,
        prefix: Prefix<'_>,
        out: &mut GcodeWriter,
    ) -> PathState<'r> {
        let point = match line {
            WaypointLine::Point(point) => point,
            WaypointLine::Malformed(text) => {
                out.error(prefix, Diagnostic::malformed_waypoint(text));
                return state;
            }
        };

        out.motion(
            prefix,
            &Motion::rapid()
                .x_nonzero(point.x - state.x)
                .y_nonzero(point.y - state.y),
        );

        let sticky = match point.macro_name.as_deref() {
            Some(name) => match self.registry.get(name) {
                Some(definition) => Some(definition),
                None => {
                    out.error(prefix, Diagnostic::unknown_macro(name));
                    state.sticky
                }
            },
            None => state.sticky,
        };
        if let Some(definition) = sticky {
            self.expand_definition(definition, prefix, out);
        }

        PathState {
            x: point.x,
            y: point.y,
            sticky,
        }
    }

    fn expand_repeat(&self, repeat: &RepeatMacro, prefix: Prefix<'_>, out: &mut GcodeWriter) {
        for _ in 0..repeat.count.max(0) {
            if !repeat.line.is_empty() {
                out.line(prefix, &repeat.line);
            }
            self.expand_macro(&repeat.macro_name, prefix, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::MacroDefinition;

    fn registry() -> MacroRegistry {
        MacroRegistry::build(vec![
            MacroDefinition::new(
                "drill",
                vec![
                    Instruction::RawLine("G00 Z-5".into()),
                    Instruction::RawLine("G00 Z5".into()),
                ],
            )
            .with_label("Drill hole")
            .with_description("plunge and retract"),
            MacroDefinition::new("dot", vec![Instruction::RawLine("M3".into())]),
        ])
        .unwrap()
    }

    fn expand(registry: &MacroRegistry, instruction: Instruction) -> (String, usize) {
        let mut out = GcodeWriter::new();
        Interpreter::new(registry).expand(&instruction, Prefix::root(" "), &mut out);
        let (text, diagnostics) = out.into_parts();
        (text, diagnostics.len())
    }

    fn path(lines: &[&str]) -> Instruction {
        Instruction::MacroPath(lines.iter().map(|l| WaypointLine::parse(l)).collect())
    }

    #[test]
    fn test_raw_line_filter() {
        let registry = registry();
        assert_eq!(expand(&registry, Instruction::RawLine("M5".into())), ("M5\n".into(), 0));
        assert_eq!(
            expand(&registry, Instruction::RawLine("T1 M6".into())),
            ("; ERROR: unsupported command: T1 M6\n".into(), 1)
        );
    }

    #[test]
    fn test_macro_header_and_body() {
        let registry = registry();
        let (text, _) = expand(&registry, Instruction::Macro("drill".into()));
        assert_eq!(
            text,
            "\n; Macro: Drill hole\n; - plunge and retract\nG00 Z-5\nG00 Z5\n"
        );
    }

    #[test]
    fn test_empty_macro_name_is_silent() {
        let registry = registry();
        assert_eq!(expand(&registry, Instruction::Macro(String::new())), (String::new(), 0));
    }

    #[test]
    fn test_unknown_macro_is_inline() {
        let registry = registry();
        let (text, diagnostics) = expand(&registry, Instruction::Macro("ghost".into()));
        assert_eq!(text, "; ERROR: unknown macro `ghost`\n");
        assert_eq!(diagnostics, 1);
    }

    #[test]
    fn test_path_relative_moves_and_return() {
        let registry = registry();
        let (text, _) = expand(&registry, path(&["1 0", "1 1"]));
        assert_eq!(text, "G00 X1.0000\nG00 Y1.0000\nG00 X-1.0000 Y-1.0000\n");
    }

    #[test]
    fn test_path_sticky_macro() {
        let registry = registry();
        let (text, _) = expand(&registry, path(&["1 0 dot", "2 0", "2 2"]));
        assert_eq!(
            text,
            "G00 X1.0000\n\n; Macro: dot\nM3\n\
             G00 X1.0000\n\n; Macro: dot\nM3\n\
             G00 Y2.0000\n\n; Macro: dot\nM3\n\
             G00 X-2.0000 Y-2.0000\n"
        );
    }

    #[test]
    fn test_path_and_repeat_expand_at_handler_prefix() {
        let registry = MacroRegistry::build(vec![
            MacroDefinition::new("dot", vec![Instruction::RawLine("M3".into())]),
            MacroDefinition::new(
                "row",
                vec![
                    path(&["1 0 dot", "2 0"]),
                    Instruction::RepeatMacro(RepeatMacro::from_params("dot 1 G00 X1").unwrap()),
                ],
            ),
        ])
        .unwrap();

        let mut out = GcodeWriter::new();
        Interpreter::new(&registry).expand_all(
            &[Instruction::Macro("row".into())],
            Prefix::root(" "),
            &mut out,
        );
        assert_eq!(
            out.as_str(),
            "\n ; Macro: row\n\
             \x20 G00 X1.0000\n\n  ; Macro: dot\n  M3\n\
             \x20 G00 X1.0000\n\n  ; Macro: dot\n  M3\n\
             \x20 G00 X-2.0000\n\
             \x20 G00 X1\n\n  ; Macro: dot\n  M3\n"
        );
    }

    #[test]
    fn test_path_unknown_macro_keeps_previous() {
        let registry = registry();
        let (text, diagnostics) = expand(&registry, path(&["1 0 dot", "2 0 ghost"]));
        assert_eq!(diagnostics, 1);
        assert_eq!(text.matches("; Macro: dot").count(), 2);
        assert!(text.contains("; ERROR: unknown macro `ghost`\n"));
    }

    #[test]
    fn test_path_malformed_line_skipped() {
        let registry = registry();
        let (text, diagnostics) = expand(&registry, path(&["5", "1 1"]));
        assert_eq!(diagnostics, 1);
        assert_eq!(
            text,
            "; ERROR: malformed waypoint: 5\nG00 X1.0000 Y1.0000\nG00 X-1.0000 Y-1.0000\n"
        );
    }

    #[test]
    fn test_repeat_macro() {
        let registry = registry();
        let repeat = RepeatMacro::from_params("dot 2 G91 G00 X1").unwrap();
        let (text, _) = expand(&registry, Instruction::RepeatMacro(repeat));
        assert_eq!(
            text,
            "G91 G00 X1\n\n; Macro: dot\nM3\nG91 G00 X1\n\n; Macro: dot\nM3\n"
        );

        let repeat = RepeatMacro::from_params("dot -1").unwrap();
        assert_eq!(expand(&registry, Instruction::RepeatMacro(repeat)), (String::new(), 0));

        let repeat = RepeatMacro::from_params("ghost 2").unwrap();
        assert_eq!(expand(&registry, Instruction::RepeatMacro(repeat)).1, 2);
    }

    #[test]
    fn test_nested_indentation() {
        let registry = MacroRegistry::build(vec![
            MacroDefinition::new("inner", vec![Instruction::RawLine("G01 Z-1".into())]),
            MacroDefinition::new(
                "outer",
                vec![
                    Instruction::RawLine("G00 Z5".into()),
                    Instruction::Macro("inner".into()),
                ],
            ),
        ])
        .unwrap();

        let mut out = GcodeWriter::new();
        Interpreter::new(&registry).expand_all(
            &[Instruction::Macro("outer".into())],
            Prefix::root(" "),
            &mut out,
        );
        assert_eq!(
            out.as_str(),
            "\n ; Macro: outer\n G00 Z5\n\n  ; Macro: inner\n  G01 Z-1\n"
        );
    }

    #[test]
    fn test_unsupported_instruction_stays_at_list_level() {
        let registry = registry();
        let mut out = GcodeWriter::new();
        Interpreter::new(&registry).expand_all(
            &[Instruction::Unsupported("spiral".into())],
            Prefix::root(" ").deeper(),
            &mut out,
        );
        assert_eq!(out.as_str(), " ; ERROR: unsupported instruction: spiral\n");
    }
}
