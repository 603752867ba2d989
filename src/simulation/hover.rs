//! Hover highlight state and the smoothed display scale
//!
//! The viewer sets `hovered` on pointer enter/leave. The scale is a
//! critically damped spring toward `1.0` (idle) or the hover scale, advanced
//! with wall-clock time. None of this feeds back into motion.

/// Critically damped spring on a single scalar.
///
/// Uses the closed-form solution, so any step length is stable and the value
/// never overshoots a target it approaches from rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedScalar {
    pub value: f64,
    pub velocity: f64,
    pub stiffness: f64, // angular frequency, 1/s
}

impl SmoothedScalar {
    pub fn new(value: f64, stiffness: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
            stiffness,
        }
    }

    /// Move toward `target` over `dt` seconds and return the new value
    pub fn advance(&mut self, target: f64, dt: f64) -> f64 {
        if dt <= 0.0 {
            return self.value;
        }

        let w = self.stiffness;
        let offset = self.value - target;
        let decay = (-w * dt).exp();

        // x(t) = (x0 + (v0 + w x0) t) e^{-wt}
        let b = self.velocity + w * offset;
        self.value = target + (offset + b * dt) * decay;
        self.velocity = (self.velocity - w * b * dt) * decay;

        self.value
    }
}

pub const IDLE_SCALE: f64 = 1.0;
pub const DEFAULT_HOVER_SCALE: f64 = 1.1;
pub const DEFAULT_HOVER_STIFFNESS: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverState {
    pub hovered: bool, // pointer is currently over this body
    pub hover_scale: f64, // scale target while hovered
    pub scale: SmoothedScalar,
}

impl HoverState {
    pub fn new(hover_scale: f64, stiffness: f64) -> Self {
        Self {
            hovered: false,
            hover_scale,
            scale: SmoothedScalar::new(IDLE_SCALE, stiffness),
        }
    }

    pub fn target(&self) -> f64 {
        if self.hovered {
            self.hover_scale
        } else {
            IDLE_SCALE
        }
    }

    /// Advance the display scale by `dt` seconds
    pub fn animate(&mut self, dt: f64) -> f64 {
        let target = self.target();
        self.scale.advance(target, dt)
    }

    pub fn display_scale(&self) -> f64 {
        self.scale.value
    }
}

impl Default for HoverState {
    fn default() -> Self {
        Self::new(DEFAULT_HOVER_SCALE, DEFAULT_HOVER_STIFFNESS)
    }
}
