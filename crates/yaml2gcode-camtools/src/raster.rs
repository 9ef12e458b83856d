//! Box raster toolpath
//!
//! Clears a `width × height` rectangle with a boustrophedon raster, one pass
//! per Z level. Within a level the tool sweeps along Y, stepping over in X
//! between sweeps; the X step direction flips on every level so consecutive
//! levels run back over the area instead of jumping to the start corner.

use tracing::debug;
use yaml2gcode_core::{tokens, Motion, ParameterError};

/// Upper bound on Z levels, on sweeps per level, and on their product.
pub const MAX_RASTER_STEPS: usize = 1_000_000;

fn steps_to_cover(extent: f64, step: f64) -> f64 {
    if extent > 0.0 {
        (extent / step).ceil()
    } else {
        0.0
    }
}

/// Parameters for a `box` instruction.
///
/// Tokens: `W` width, `H` height, `D` total depth, `s` stepover,
/// `d` depth per level, `o` Z offset above the material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxRasterParameters {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub stepover: f64,
    pub z_step: f64,
    pub z_offset: f64,
}

impl Default for BoxRasterParameters {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            depth: 0.0,
            stepover: 0.1,
            z_step: 1.0,
            z_offset: 0.0,
        }
    }
}

impl BoxRasterParameters {
    pub fn from_params(params: &str) -> Result<Self, ParameterError> {
        let mut parsed = Self::default();
        for token in tokens(params) {
            match token.letter {
                'W' => parsed.width = token.number()?,
                'H' => parsed.height = token.number()?,
                'D' => parsed.depth = token.number()?,
                's' => parsed.stepover = token.number()?,
                'd' => parsed.z_step = token.number()?,
                'o' => parsed.z_offset = token.number()?,
                _ => {}
            }
        }
        debug!(?parsed, "box raster parameters");
        parsed.validate()?;
        Ok(parsed)
    }

    /// Reject parameters that would never finish the raster.
    ///
    /// Besides positive steps, the number of Z levels and sweeps must stay
    /// within [`MAX_RASTER_STEPS`], which also keeps every `z += step` and
    /// `x += step` making progress.
    pub fn validate(&self) -> Result<(), ParameterError> {
        let fields = [
            ('W', self.width),
            ('H', self.height),
            ('D', self.depth),
            ('s', self.stepover),
            ('d', self.z_step),
            ('o', self.z_offset),
        ];
        if let Some((letter, value)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ParameterError::InvalidNumber {
                token: format!("{}{}", letter, value),
            });
        }

        if self.width > 0.0 && !(self.stepover > 0.0) {
            return Err(ParameterError::NotPositive {
                name: "s".to_string(),
                value: self.stepover,
            });
        }
        if self.depth > 0.0 && !(self.z_step > 0.0) {
            return Err(ParameterError::NotPositive {
                name: "d".to_string(),
                value: self.z_step,
            });
        }

        let sweeps = steps_to_cover(self.width, self.stepover);
        let levels = steps_to_cover(self.depth, self.z_step);
        let too_many = |name: &str, steps: f64| ParameterError::TooManySteps {
            name: name.to_string(),
            steps,
            limit: MAX_RASTER_STEPS,
        };
        if levels > MAX_RASTER_STEPS as f64 {
            return Err(too_many("d", levels));
        }
        if sweeps > MAX_RASTER_STEPS as f64 {
            return Err(too_many("s", sweeps));
        }
        if levels * sweeps > MAX_RASTER_STEPS as f64 {
            return Err(too_many("s", levels * sweeps));
        }
        Ok(())
    }

    /// Number of Z levels the raster visits.
    pub fn level_count(&self) -> usize {
        let mut levels = 0;
        let mut z = 0.0;
        while z < self.depth {
            z += self.z_step;
            levels += 1;
        }
        levels
    }

    /// The raster as a sequence of motion commands.
    ///
    /// Callers must have validated the parameters; unvalidated steps may
    /// never terminate.
    pub fn moves(&self) -> Vec<Motion> {
        let mut moves = Vec::new();

        if self.z_offset > 0.0 {
            moves.push(Motion::linear().z(self.z_offset));
        }
        moves.push(
            Motion::linear()
                .x(-self.width / 2.0)
                .y(-self.height / 2.0),
        );

        let mut z = 0.0;
        let mut sweep_sign = 1.0;
        let mut step_sign = 1.0;
        while z < self.depth {
            moves.push(Motion::linear().z(-self.z_step));
            z += self.z_step;

            let mut x = 0.0;
            while x < self.width {
                moves.push(Motion::linear().y(sweep_sign * self.height));
                sweep_sign = -sweep_sign;
                x += self.stepover;
                if x < self.width {
                    moves.push(Motion::linear().x(step_sign * self.stepover));
                }
            }
            step_sign = -step_sign;
        }

        moves.push(
            Motion::rapid()
                .x(self.width / 2.0)
                .y(self.height / 2.0)
                .z(self.depth),
        );
        moves
    }
}
