//! # yaml2gcode CAM Tools
//!
//! Geometry primitives behind the macro language's toolpath instructions.
//! Everything here is pure: parameters in, motion commands or Cartesian
//! deltas out.
//!
//! ## Primitives
//!
//! - **Polar Vector**: a rapid move given as radius and angle, optionally
//!   relative to a start angle
//! - **Polar Arc Vector**: a `G02`/`G03` arc between two angles on a circle
//! - **Box Raster**: a multi-level boustrophedon pocket
//! - **Rotation**: clockwise rotation of path waypoints, used by macro aliases

pub mod polar;
pub mod raster;
pub mod rotation;

pub use polar::{
    polar_arc_vector, polar_point, polar_vector, PolarArcParameters, PolarVectorParameters,
};
pub use raster::{BoxRasterParameters, MAX_RASTER_STEPS};
pub use rotation::{rotate_point, rotate_waypoint};
