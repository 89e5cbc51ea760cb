//! Motion leaves: the atomic fragments blend nodes compose.

use serde::{Deserialize, Serialize};

/// Clamped linear map from an input range to an output range.
///
/// Copier leaves carry one of these. The input range doubles as the leaf's
/// claimed support range: values outside `[in_min, in_max]` clamp to the
/// nearest boundary before mapping.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Remap {
    pub in_min: f32,
    pub in_max: f32,
    pub out_min: f32,
    pub out_max: f32,
}

impl Remap {
    pub fn new(in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> Self {
        Self {
            in_min,
            in_max,
            out_min,
            out_max,
        }
    }

    /// Identity passthrough over `[min, max]`.
    pub fn identity(min: f32, max: f32) -> Self {
        Self::new(min, max, min, max)
    }

    /// Uniform scale by `k` over the input range `[min, max]`.
    pub fn scaled(min: f32, max: f32, k: f32) -> Self {
        Self::new(min, max, min * k, max * k)
    }

    /// Apply the map to `x`, clamping into the input range first.
    ///
    /// Origin-preserving maps (identity, uniform scale) are computed as a
    /// plain multiplication so they stay exact instead of picking up lerp
    /// rounding across a wide input range.
    pub fn apply(&self, x: f32) -> f32 {
        let x = x.max(self.in_min).min(self.in_max);
        let span = self.in_max - self.in_min;
        if span == 0.0 {
            return self.out_min;
        }
        let slope = (self.out_max - self.out_min) / span;
        if self.out_min == self.in_min * slope {
            return x * slope;
        }
        self.out_min + (x - self.in_min) * slope
    }
}

/// An atomic animation fragment.
///
/// Leaves either force a target signal to a fixed constant or mirror another
/// signal through a [`Remap`]; the blend nodes above them decide with what
/// weight each leaf contributes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Motion {
    /// Drives `target` to `value` while the leaf has weight.
    Set { target: String, value: f32 },
    /// Drives `target` to `remap(source)` while the leaf has weight.
    Copy {
        target: String,
        source: String,
        remap: Remap,
    },
}

impl Motion {
    /// The signal this leaf writes.
    pub fn target(&self) -> &str {
        match self {
            Motion::Set { target, .. } | Motion::Copy { target, .. } => target,
        }
    }
}
