//! Instruction model
//!
//! The macro language knows a fixed set of instruction kinds. Each one is
//! parsed once, when the document is loaded, into an [`Instruction`]; its
//! parameters are validated at that point so that expansion itself cannot
//! fail.

use yaml2gcode_camtools::{
    rotate_waypoint, BoxRasterParameters, PolarArcParameters, PolarVectorParameters,
};
use yaml2gcode_core::{split_fields, ParameterError};

pub const KIND_BOX: &str = "box";
pub const KIND_MACRO: &str = "macro";
pub const KIND_MACRO_PATH: &str = "macroPath";
pub const KIND_POLAR_VECTOR: &str = "polarVector";
pub const KIND_POLAR_ARC_VECTOR: &str = "polarArcVector";
pub const KIND_REPEAT_MACRO: &str = "repeatMacro";

/// One instruction of a command list or macro body.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// A literal command line, written as a bare string
    RawLine(String),
    /// Invoke a registered macro; an empty name does nothing
    Macro(String),
    /// Visit absolute waypoints, expanding the sticky macro at each one
    MacroPath(Vec<WaypointLine>),
    PolarVector(PolarVectorParameters),
    PolarArcVector(PolarArcParameters),
    Box(BoxRasterParameters),
    RepeatMacro(RepeatMacro),
    /// An instruction kind the interpreter does not know
    Unsupported(String),
}

impl Instruction {
    /// Kind name as written in the document.
    pub fn kind(&self) -> &str {
        match self {
            Self::RawLine(_) => "raw",
            Self::Macro(_) => KIND_MACRO,
            Self::MacroPath(_) => KIND_MACRO_PATH,
            Self::PolarVector(_) => KIND_POLAR_VECTOR,
            Self::PolarArcVector(_) => KIND_POLAR_ARC_VECTOR,
            Self::Box(_) => KIND_BOX,
            Self::RepeatMacro(_) => KIND_REPEAT_MACRO,
            Self::Unsupported(kind) => kind.as_str(),
        }
    }

    /// Whether this instruction is written at its list's own indentation
    /// rather than one level deeper.
    pub fn is_inline(&self) -> bool {
        matches!(self, Self::RawLine(_) | Self::Unsupported(_))
    }

    /// Names of the macros this instruction may invoke.
    pub fn invoked_macros(&self) -> Vec<&str> {
        match self {
            Self::Macro(name) if !name.is_empty() => vec![name.as_str()],
            Self::RepeatMacro(repeat) => vec![repeat.macro_name.as_str()],
            Self::MacroPath(lines) => lines
                .iter()
                .filter_map(|line| match line {
                    WaypointLine::Point(point) => point.macro_name.as_deref(),
                    WaypointLine::Malformed(_) => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Copy of this instruction with path waypoints rotated by `degrees`.
    ///
    /// Only a `MacroPath` changes; macros it invokes are not rotated.
    pub fn rotated(&self, degrees: f64) -> Instruction {
        match self {
            Self::MacroPath(lines) => Self::MacroPath(
                lines
                    .iter()
                    .map(|line| line.rotated(degrees))
                    .collect(),
            ),
            other => other.clone(),
        }
    }
}

/// An absolute path coordinate, optionally naming a macro to run there.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
    pub macro_name: Option<String>,
}

/// One line of a `macroPath` payload.
#[derive(Debug, Clone, PartialEq)]
pub enum WaypointLine {
    Point(Waypoint),
    /// Fewer than two finite numeric fields; kept verbatim for the inline error
    Malformed(String),
}

impl WaypointLine {
    /// Parse `X Y [macro]`.
    ///
    /// The third field is a macro tag only when it is the last one; lines
    /// with four or more fields keep their coordinates and carry no tag.
    pub fn parse(line: &str) -> Self {
        let fields = split_fields(line);
        let coords = match fields.as_slice() {
            [x, y, ..] => finite(x).zip(finite(y)),
            _ => None,
        };
        let macro_name = match fields.as_slice() {
            [_, _, name] => Some(name.to_string()),
            _ => None,
        };
        match coords {
            Some((x, y)) => Self::Point(Waypoint { x, y, macro_name }),
            None => Self::Malformed(line.to_string()),
        }
    }

    fn rotated(&self, degrees: f64) -> Self {
        match self {
            Self::Point(point) => {
                let (x, y) = rotate_waypoint(point.x, point.y, degrees);
                Self::Point(Waypoint {
                    x,
                    y,
                    macro_name: point.macro_name.clone(),
                })
            }
            Self::Malformed(text) => Self::Malformed(text.clone()),
        }
    }
}

fn finite(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// `repeatMacro` payload: `<macro> <count> [literal line…]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatMacro {
    pub macro_name: String,
    pub count: i64,
    /// Emitted before every expansion when non-empty
    pub line: String,
}

impl RepeatMacro {
    pub fn from_params(params: &str) -> Result<Self, ParameterError> {
        let fields = split_fields(params);
        let macro_name = fields
            .first()
            .ok_or_else(|| ParameterError::Missing("macro name".to_string()))?;
        let count = fields
            .get(1)
            .ok_or_else(|| ParameterError::Missing("count".to_string()))?;
        let count = count
            .parse::<i64>()
            .map_err(|_| ParameterError::InvalidCount {
                value: count.to_string(),
            })?;
        Ok(Self {
            macro_name: macro_name.to_string(),
            count,
            line: fields[2..].join(" "),
        })
    }
}
