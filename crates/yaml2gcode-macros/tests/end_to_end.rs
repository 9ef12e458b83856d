use yaml2gcode_macros::{render, CodeEmitter, Instruction, Program, WaypointLine};

const DRILL: &str = r#"
commands:
  - macro: drill
macros:
  drill:
    commands:
      - G00 Z-5
      - G00 Z5
"#;

fn position_of(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("`{}` not found in:\n{}", needle, haystack))
}

#[test]
fn test_drill_macro_end_to_end() {
    let program = Program::from_yaml_str(DRILL).unwrap();
    let gcode = render(&program).unwrap();

    assert_eq!(
        gcode,
        "\n ; Macro: drill\n G00 Z-5\n G00 Z5\nM30 G00 Z10 M5\n"
    );

    let header = position_of(&gcode, "; Macro: drill");
    let down = position_of(&gcode, "G00 Z-5");
    let up = position_of(&gcode, "G00 Z5\n");
    let trailer = position_of(&gcode, "M30 G00 Z10 M5");
    assert!(header < down && down < up && up < trailer);
}

#[test]
fn test_rendering_is_deterministic() {
    let text = r#"
init: [G21, G90]
macros:
  hole:
    label: Hole
    commands: [G01 Z-2, G00 Z2]
  ring:
    commands:
      - macroPath: ["5 0 hole", "0 5", "-5 0", "0 -5"]
  ring90:
    aliasOf: {macro: ring, rotate: 90}
commands:
  - macro: ring
  - macro: ring90
  - polarArcVector: R-3 S10 E80
  - box: W4 H2 D1 s0.5
  - repeatMacro: hole 2 G91 G00 X1
"#;
    let first = render(&Program::from_yaml_str(text).unwrap()).unwrap();
    for _ in 0..5 {
        let again = render(&Program::from_yaml_str(text).unwrap()).unwrap();
        assert_eq!(first, again);
    }
}

#[test]
fn test_alias_rotation_rewrites_waypoints() {
    let program = Program::from_yaml_str(
        r#"
macros:
  base:
    commands:
      - macroPath: ["1 0"]
  turned:
    aliasOf: {macro: base, rotate: 90}
commands: []
"#,
    )
    .unwrap();

    let turned = program.registry.lookup("turned").unwrap();
    assert_eq!(
        turned.commands,
        vec![Instruction::MacroPath(vec![WaypointLine::parse("0 -1")])]
    );
    let base = program.registry.lookup("base").unwrap();
    assert_eq!(
        base.commands,
        vec![Instruction::MacroPath(vec![WaypointLine::parse("1 0")])]
    );
}

#[test]
fn test_macro_path_moves() {
    let program = Program::from_yaml_str("commands:\n  - macroPath: [\"1 0\", \"1 1\"]\n").unwrap();
    let gcode = render(&program).unwrap();
    assert_eq!(
        gcode,
        " G00 X1.0000\n G00 Y1.0000\n G00 X-1.0000 Y-1.0000\nM30 G00 Z10 M5\n"
    );
}

#[test]
fn test_unknown_macro_does_not_abort() {
    let program = Program::from_yaml_str("commands:\n  - macro: ghost\n  - G00 Z5\n").unwrap();
    let rendered = CodeEmitter::default().render(&program).unwrap();
    assert!(rendered.text.contains("; ERROR: unknown macro `ghost`"));
    assert!(rendered.text.contains("G00 Z5\n"));
    assert!(rendered.text.ends_with("M30 G00 Z10 M5\n"));
    assert_eq!(rendered.diagnostics.len(), 1);
}

#[test]
fn test_box_single_level_terminates() {
    let program = Program::from_yaml_str("commands:\n  - box: W2 H2 D1 s1 d1\n").unwrap();
    let gcode = render(&program).unwrap();
    assert_eq!(gcode.matches("G01 Z-1.0000").count(), 1);
    assert!(gcode.contains(" G00 X1.0000 Y1.0000 Z1.0000\n"));
}

#[test]
fn test_box_zero_stepover_rejected() {
    assert!(Program::from_yaml_str("commands:\n  - box: W2 H2 D1 s0\n").is_err());
}

#[test]
fn test_polar_instructions() {
    let program = Program::from_yaml_str(
        "commands:\n  - polarVector: R10 A0\n  - polarArcVector: R5 S90 E0\n",
    )
    .unwrap();
    let gcode = render(&program).unwrap();
    assert!(gcode.starts_with(" G00 X0.0000 Y10.0000 ; polarVector\n"));
    assert!(gcode.contains(" G03 X-5.0000 Y5.0000 R5.0000 ; polarArcVector\n"));
}

#[test]
fn test_unsupported_entries_reported_inline() {
    let program = Program::from_yaml_str(
        r#"
macros:
  odd:
    commands:
      - T1 M6
      - spiral: R5
commands:
  - macro: odd
"#,
    )
    .unwrap();
    let rendered = CodeEmitter::default().render(&program).unwrap();
    assert!(rendered.text.contains(" ; ERROR: unsupported command: T1 M6\n"));
    assert!(rendered.text.contains(" ; ERROR: unsupported instruction: spiral\n"));
    assert_eq!(rendered.diagnostics.len(), 2);
}

#[test]
fn test_load_from_file() {
    use std::io::Write;

    let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
    file.write_all(DRILL.as_bytes()).unwrap();

    let program = Program::load(file.path()).unwrap();
    assert!(program.registry.contains("drill"));
    assert_eq!(program.commands.len(), 1);
}

#[test]
fn test_non_finite_parameters_rejected() {
    for text in [
        "commands:\n  - polarVector: Rinf A0\n",
        "commands:\n  - polarArcVector: RNaN S0 E90\n",
        "commands:\n  - box: W2 H2 Dinf d1\n",
        "commands:\n  - box: W2 H2 D1e17 d1\n",
    ] {
        let err = Program::from_yaml_str(text).unwrap_err();
        assert!(err.is_load_error(), "{}: {}", text, err);
    }
}

#[test]
fn test_non_finite_waypoint_reported_inline() {
    let program = Program::from_yaml_str("commands:\n  - macroPath: [\"inf 0\", \"1 0\"]\n").unwrap();
    let rendered = CodeEmitter::default().render(&program).unwrap();
    assert!(rendered.text.contains(" ; ERROR: malformed waypoint: inf 0\n"));
    assert!(!rendered.text.contains("Xinf"));
    assert_eq!(rendered.diagnostics.len(), 1);
}
