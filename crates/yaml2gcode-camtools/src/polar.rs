//! Polar vectors and arcs
//!
//! Angles are in degrees, measured clockwise from the +Y axis, so a point at
//! radius `R` and angle `θ` sits at `(R·sin θ, R·cos θ)`.

use yaml2gcode_core::{tokens, Motion, MotionCode, ParameterError};

/// Cartesian point at `radius` and `angle_deg` (clockwise from +Y).
pub fn polar_point(radius: f64, angle_deg: f64) -> (f64, f64) {
    let theta = angle_deg.to_radians();
    (radius * theta.sin(), radius * theta.cos())
}

/// Delta of a polar vector.
///
/// Without `start_deg` this is the point at `angle_deg`. With it, the delta
/// runs from the start-angle point to the target-angle point. A negative
/// radius negates the result.
pub fn polar_vector(radius: f64, angle_deg: f64, start_deg: Option<f64>) -> (f64, f64) {
    let direction = if radius < 0.0 { -1.0 } else { 1.0 };
    let radius = radius.abs();
    let (mut x, mut y) = polar_point(radius, angle_deg);
    if let Some(start) = start_deg {
        let (sx, sy) = polar_point(radius, start);
        x -= sx;
        y -= sy;
    }
    (direction * x, direction * y)
}

/// Parameters for a `polarVector` instruction: `R` radius, `A` angle,
/// `S` optional start angle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarVectorParameters {
    pub radius: f64,
    pub angle: f64,
    pub start_angle: Option<f64>,
}

impl PolarVectorParameters {
    pub fn from_params(params: &str) -> Result<Self, ParameterError> {
        let mut parsed = Self::default();
        for token in tokens(params) {
            match token.letter {
                'R' => parsed.radius = token.number()?,
                'A' => parsed.angle = token.number()?,
                'S' => parsed.start_angle = Some(token.number()?),
                _ => {}
            }
        }
        Ok(parsed)
    }

    pub fn delta(&self) -> (f64, f64) {
        polar_vector(self.radius, self.angle, self.start_angle)
    }

    pub fn motion(&self) -> Motion {
        let (x, y) = self.delta();
        Motion::rapid().x(x).y(y).tagged("polarVector")
    }
}

/// Parameters for a `polarArcVector` instruction: `R` radius, `S` start
/// angle, `E` end angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarArcParameters {
    /// Unsigned radius
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    /// Set when any `R` token was negative
    pub reversed: bool,
}

impl PolarArcParameters {
    pub fn new(radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            radius: radius.abs(),
            start_angle,
            end_angle,
            reversed: radius < 0.0,
        }
    }

    pub fn from_params(params: &str) -> Result<Self, ParameterError> {
        let mut parsed = Self::new(0.0, 0.0, 0.0);
        for token in tokens(params) {
            match token.letter {
                'R' => {
                    let radius = token.number()?;
                    parsed.reversed |= radius < 0.0;
                    parsed.radius = radius.abs();
                }
                'S' => parsed.start_angle = token.number()?,
                'E' => parsed.end_angle = token.number()?,
                _ => {}
            }
        }
        Ok(parsed)
    }

    /// `G03` when the radius was negative or the sweep runs backwards.
    pub fn code(&self) -> MotionCode {
        if self.reversed || self.end_angle < self.start_angle {
            MotionCode::ArcCcw
        } else {
            MotionCode::ArcCw
        }
    }

    pub fn delta(&self) -> (f64, f64) {
        let (x1, y1) = polar_point(self.radius, self.start_angle);
        let (x2, y2) = polar_point(self.radius, self.end_angle);
        (x2 - x1, y2 - y1)
    }

    pub fn motion(&self) -> Motion {
        let (x, y) = self.delta();
        Motion::new(self.code())
            .x(x)
            .y(y)
            .r(self.radius)
            .tagged("polarArcVector")
    }
}

/// Arc from `start_deg` to `end_deg` on a circle of `radius`.
pub fn polar_arc_vector(radius: f64, start_deg: f64, end_deg: f64) -> Motion {
    PolarArcParameters::new(radius, start_deg, end_deg).motion()
}
