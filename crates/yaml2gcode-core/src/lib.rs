//! # yaml2gcode Core
//!
//! Core types and utilities shared by the yaml2gcode crates: the error
//! hierarchy, fixed-precision motion command formatting, and the
//! `<letter><number>` parameter tokenizer.

pub mod error;
pub mod format;
pub mod params;

pub use error::{Error, LoadError, MacroError, ParameterError, Result};
pub use format::{format_coord, round_coord, Motion, MotionCode, COORD_PRECISION};
pub use params::{split_fields, tokens, ParamToken};
