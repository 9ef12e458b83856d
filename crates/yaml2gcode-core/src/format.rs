//! Fixed-precision G-code formatting
//!
//! Every coordinate, radius and depth in the output goes through
//! [`format_coord`], so the whole stream shares one rounding rule: the exact
//! binary value is rounded to 4 decimals, ties to even. This is what Rust's
//! `{:.4}` does. A negative value that rounds to zero keeps its sign.

use std::fmt;

/// Digits after the decimal point for every emitted number.
pub const COORD_PRECISION: usize = 4;

/// Format a coordinate with exactly [`COORD_PRECISION`] decimals.
pub fn format_coord(value: f64) -> String {
    format!("{:.*}", COORD_PRECISION, value)
}

/// Round a value the way it would appear in emitted text.
pub fn round_coord(value: f64) -> f64 {
    format_coord(value).parse().unwrap_or(value)
}

/// Motion word of a command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionCode {
    /// G00
    Rapid,
    /// G01
    Linear,
    /// G02
    ArcCw,
    /// G03
    ArcCcw,
}

impl MotionCode {
    pub fn word(self) -> &'static str {
        match self {
            Self::Rapid => "G00",
            Self::Linear => "G01",
            Self::ArcCw => "G02",
            Self::ArcCcw => "G03",
        }
    }
}

impl fmt::Display for MotionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}

/// A single motion command with optional axis words and an inline tag.
///
/// Axis words are written in the order X, Y, Z, R.
#[derive(Debug, Clone, PartialEq)]
pub struct Motion {
    pub code: MotionCode,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub r: Option<f64>,
    pub tag: Option<&'static str>,
}

impl Motion {
    pub fn new(code: MotionCode) -> Self {
        Self {
            code,
            x: None,
            y: None,
            z: None,
            r: None,
            tag: None,
        }
    }

    pub fn rapid() -> Self {
        Self::new(MotionCode::Rapid)
    }

    pub fn linear() -> Self {
        Self::new(MotionCode::Linear)
    }

    pub fn x(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    pub fn y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    pub fn z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    pub fn r(mut self, r: f64) -> Self {
        self.r = Some(r);
        self
    }

    /// Set X only when it is non-zero (`-0.0` counts as zero).
    pub fn x_nonzero(self, x: f64) -> Self {
        if x != 0.0 {
            self.x(x)
        } else {
            self
        }
    }

    /// Set Y only when it is non-zero (`-0.0` counts as zero).
    pub fn y_nonzero(self, y: f64) -> Self {
        if y != 0.0 {
            self.y(y)
        } else {
            self
        }
    }

    /// Append `; tag` after the axis words.
    pub fn tagged(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }
}

impl fmt::Display for Motion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)?;
        let words = [('X', self.x), ('Y', self.y), ('Z', self.z), ('R', self.r)];
        for (letter, value) in words {
            if let Some(value) = value {
                write!(f, " {}{}", letter, format_coord(value))?;
            }
        }
        if let Some(tag) = self.tag {
            write!(f, " ; {}", tag)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_coord_precision() {
        assert_eq!(format_coord(1.0), "1.0000");
        assert_eq!(format_coord(-2.5), "-2.5000");
        assert_eq!(format_coord(1.23456), "1.2346");
        assert_eq!(format_coord(1.23454), "1.2345");
    }

    #[test]
    fn test_format_coord_ties_round_to_even() {
        // Exact binary ties at the fifth decimal.
        assert_eq!(format_coord(1.03125), "1.0312");
        assert_eq!(format_coord(1.09375), "1.0938");
        assert_eq!(format_coord(0.15625), "0.1562");
        assert_eq!(format_coord(-1.03125), "-1.0312");
    }

    #[test]
    fn test_format_coord_negative_zero_keeps_sign() {
        assert_eq!(format_coord(-0.00001), "-0.0000");
        assert_eq!(format_coord(0.00001), "0.0000");
    }

    #[test]
    fn test_round_coord() {
        assert_eq!(round_coord(0.123456), 0.1235);
        assert_eq!(round_coord(-1.0), -1.0);
    }

    #[test]
    fn test_motion_display() {
        let m = Motion::rapid().x(1.0).y(-2.0).tagged("polarVector");
        assert_eq!(m.to_string(), "G00 X1.0000 Y-2.0000 ; polarVector");

        let m = Motion::new(MotionCode::ArcCcw).x(0.5).y(0.5).r(3.0);
        assert_eq!(m.to_string(), "G03 X0.5000 Y0.5000 R3.0000");

        let m = Motion::linear().z(-1.0);
        assert_eq!(m.to_string(), "G01 Z-1.0000");
    }

    #[test]
    fn test_motion_nonzero_axes() {
        let m = Motion::rapid().x_nonzero(0.0).y_nonzero(1.0);
        assert_eq!(m.to_string(), "G00 Y1.0000");

        let m = Motion::rapid().x_nonzero(-0.0).y_nonzero(0.0);
        assert_eq!(m.to_string(), "G00");
    }
}
