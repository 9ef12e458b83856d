//! Waypoint rotation used when aliasing macros.

use yaml2gcode_core::round_coord;

/// Rotate `(x, y)` clockwise by `degrees` about the origin.
///
/// `x' = x·cos θ + y·sin θ`, `y' = −x·sin θ + y·cos θ`.
pub fn rotate_point(x: f64, y: f64, degrees: f64) -> (f64, f64) {
    let (s, c) = degrees.to_radians().sin_cos();
    (x * c + y * s, -x * s + y * c)
}

/// Rotate and round to output precision.
pub fn rotate_waypoint(x: f64, y: f64, degrees: f64) -> (f64, f64) {
    let (x, y) = rotate_point(x, y, degrees);
    (round_coord(x), round_coord(y))
}
