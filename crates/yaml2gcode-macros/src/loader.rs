//! YAML document loader
//!
//! Turns the generic YAML tree into typed instructions and macro
//! definitions. Structural problems and bad instruction parameters are
//! fatal here; nothing past this point re-parses numbers.

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};
use yaml2gcode_camtools::{BoxRasterParameters, PolarArcParameters, PolarVectorParameters};
use yaml2gcode_core::{LoadError, ParameterError};

use crate::definition::{AliasSpec, MacroDefinition};
use crate::instruction::{
    Instruction, RepeatMacro, WaypointLine, KIND_BOX, KIND_MACRO, KIND_MACRO_PATH,
    KIND_POLAR_ARC_VECTOR, KIND_POLAR_VECTOR, KIND_REPEAT_MACRO,
};

/// Top-level document shape
#[derive(Debug, Deserialize)]
pub(crate) struct Document {
    #[serde(default)]
    pub init: Option<Vec<Value>>,
    #[serde(default)]
    pub setup: Option<Vec<Value>>,
    #[serde(default)]
    pub macros: Option<Mapping>,
    #[serde(default)]
    pub commands: Option<Vec<Value>>,
    #[serde(default)]
    pub finish: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
struct MacroDocument {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    commands: Option<Vec<Value>>,
    #[serde(default, rename = "aliasOf")]
    alias_of: Option<AliasDocument>,
}

#[derive(Debug, Deserialize)]
struct AliasDocument {
    #[serde(rename = "macro")]
    source: String,
    #[serde(default)]
    rotate: Option<Value>,
}

/// Parse YAML text into the document shape.
pub(crate) fn parse_document(text: &str) -> Result<Document, LoadError> {
    let value: Value = serde_yaml::from_str(text)?;
    if value.is_null() {
        return Err(LoadError::MissingCommands);
    }
    Ok(serde_yaml::from_value(value)?)
}

/// Text of a scalar; `None` for sequences and mappings.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Literal text lines (`init`, `setup`, `finish`).
pub(crate) fn text_lines(section: &str, values: &[Value]) -> Result<Vec<String>, LoadError> {
    values
        .iter()
        .map(|value| {
            scalar_text(value).ok_or_else(|| LoadError::InvalidInstruction {
                kind: section.to_string(),
                reason: "expected a text line".to_string(),
            })
        })
        .collect()
}

/// Parse a command list. Strings are raw lines; a mapping yields one
/// instruction per key, in order.
pub fn parse_instructions(values: &[Value]) -> Result<Vec<Instruction>, LoadError> {
    let mut instructions = Vec::new();
    for value in values {
        match value {
            Value::Mapping(mapping) => {
                for (key, payload) in mapping {
                    let kind = scalar_text(key).ok_or_else(|| LoadError::InvalidInstruction {
                        kind: "?".to_string(),
                        reason: "instruction kind must be a scalar".to_string(),
                    })?;
                    instructions.push(parse_instruction(&kind, payload)?);
                }
            }
            Value::Null => {}
            Value::Sequence(_) => {
                return Err(LoadError::InvalidInstruction {
                    kind: "?".to_string(),
                    reason: "nested sequences are not instructions".to_string(),
                })
            }
            scalar => {
                if let Some(text) = scalar_text(scalar) {
                    instructions.push(Instruction::RawLine(text));
                }
            }
        }
    }
    Ok(instructions)
}

/// Parse one `kind: payload` entry.
pub fn parse_instruction(kind: &str, payload: &Value) -> Result<Instruction, LoadError> {
    let text = || {
        scalar_text(payload).ok_or_else(|| LoadError::InvalidInstruction {
            kind: kind.to_string(),
            reason: "expected a parameter string".to_string(),
        })
    };
    let params = |err: ParameterError| LoadError::InvalidParameters {
        kind: kind.to_string(),
        source: err,
    };

    let instruction = match kind {
        KIND_MACRO => Instruction::Macro(text()?.trim().to_string()),
        KIND_MACRO_PATH => Instruction::MacroPath(parse_waypoints(kind, payload)?),
        KIND_POLAR_VECTOR => {
            Instruction::PolarVector(PolarVectorParameters::from_params(&text()?).map_err(params)?)
        }
        KIND_POLAR_ARC_VECTOR => Instruction::PolarArcVector(
            PolarArcParameters::from_params(&text()?).map_err(params)?,
        ),
        KIND_BOX => Instruction::Box(BoxRasterParameters::from_params(&text()?).map_err(params)?),
        KIND_REPEAT_MACRO => {
            Instruction::RepeatMacro(RepeatMacro::from_params(&text()?).map_err(params)?)
        }
        other => {
            debug!("Unsupported instruction kind '{}'", other);
            Instruction::Unsupported(other.to_string())
        }
    };
    Ok(instruction)
}

fn parse_waypoints(kind: &str, payload: &Value) -> Result<Vec<WaypointLine>, LoadError> {
    let lines = match payload {
        Value::Null => return Ok(Vec::new()),
        Value::Sequence(lines) => lines,
        _ => {
            return Err(LoadError::InvalidInstruction {
                kind: kind.to_string(),
                reason: "expected a sequence of waypoint lines".to_string(),
            })
        }
    };
    lines
        .iter()
        .map(|line| {
            scalar_text(line)
                .map(|text| WaypointLine::parse(&text))
                .ok_or_else(|| LoadError::InvalidInstruction {
                    kind: kind.to_string(),
                    reason: "waypoint lines must be text".to_string(),
                })
        })
        .collect()
}

/// `aliasOf.rotate` in degrees. Numeric strings such as `"90"` are accepted.
fn rotation(name: &str, value: Option<&Value>) -> Result<Option<f64>, LoadError> {
    let degrees = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    match degrees {
        Some(degrees) if degrees.is_finite() => Ok(Some(degrees)),
        _ => Err(LoadError::InvalidInstruction {
            kind: "aliasOf".to_string(),
            reason: format!("macro '{}' has a non-numeric rotate value", name),
        }),
    }
}

/// Macro definitions in declaration order.
pub(crate) fn parse_macros(macros: &Mapping) -> Result<Vec<MacroDefinition>, LoadError> {
    let mut definitions = Vec::with_capacity(macros.len());
    for (key, body) in macros {
        let name = scalar_text(key).ok_or_else(|| LoadError::InvalidInstruction {
            kind: KIND_MACRO.to_string(),
            reason: "macro names must be scalars".to_string(),
        })?;
        let document: MacroDocument = match body {
            Value::Null => MacroDocument::default(),
            body => serde_yaml::from_value(body.clone())?,
        };

        let alias = match document.alias_of {
            Some(alias) => Some(AliasSpec {
                rotate: rotation(&name, alias.rotate.as_ref())?,
                source: alias.source,
            }),
            None => None,
        };
        let commands = match (&alias, document.commands) {
            (Some(_), Some(_)) => {
                warn!("Macro '{}' is an alias; its own commands are ignored", name);
                Vec::new()
            }
            (Some(_), None) => Vec::new(),
            (None, Some(values)) => parse_instructions(&values)?,
            (None, None) => {
                warn!("Macro '{}' has no commands", name);
                Vec::new()
            }
        };

        debug!("Loaded macro '{}' ({} commands)", name, commands.len());
        definitions.push(MacroDefinition {
            name,
            label: document.label,
            description: document.description,
            commands,
            alias,
        });
    }
    Ok(definitions)
}
