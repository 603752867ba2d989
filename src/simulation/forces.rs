//! Velocity influences for the floating bodies
//!
//! Each term implements [`Influence`] and returns the velocity change it
//! contributes to one body for the current frame. [`InfluenceSet`] sums the
//! terms in the order they were added.

use crate::simulation::params::{Attractor, Parameters};
use crate::simulation::registry::BodyRegistry;
use crate::simulation::states::NVec3;

/// Per-frame external input consumed by the influences
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    pub pointer: NVec3, // influence point in scene space
}

impl FrameInput {
    pub fn new(pointer: NVec3) -> Self {
        Self { pointer }
    }
}

/// Unit vector along `v`, or zero when `v` has no usable length
pub fn direction(v: NVec3) -> NVec3 {
    v.try_normalize(f64::EPSILON).unwrap_or_else(NVec3::zeros)
}

/// Trait for velocity sources acting on a single body
/// `x` is the body's position at the start of its update
pub trait Influence {
    fn velocity_delta(&self, i: usize, x: &NVec3, input: &FrameInput, registry: &BodyRegistry) -> NVec3;
}

/// Ordered collection of influence terms
pub struct InfluenceSet {
    terms: Vec<Box<dyn Influence + Send + Sync>>,
}

impl InfluenceSet {
    /// Create an empty influence set
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// Attraction, pointer repulsion and local avoidance, in that order
    pub fn standard(attractor: &Attractor, params: &Parameters) -> Self {
        Self::new()
            .with(Attraction {
                center: attractor.center,
                radius: attractor.radius,
                strength: params.attraction_strength,
            })
            .with(PointerRepulsion {
                strength: params.repulsion_strength,
                radius: params.influence_radius,
            })
            .with(LocalAvoidance {
                min_spacing: params.min_spacing,
                strength: params.avoidance_strength,
            })
    }

    /// Add an influence term
    pub fn with(mut self, term: impl Influence + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Sum of every term's contribution for body `i` at `x`
    pub fn accumulate(&self, i: usize, x: &NVec3, input: &FrameInput, registry: &BodyRegistry) -> NVec3 {
        let mut dv = NVec3::zeros();
        for term in &self.terms {
            dv += term.velocity_delta(i, x, input, registry);
        }
        dv
    }
}

impl Default for InfluenceSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Constant-magnitude pull toward the attractor, only while outside its radius.
/// Inside the radius nothing is added; this is not a restoring spring.
pub struct Attraction {
    pub center: NVec3,
    pub radius: f64,
    pub strength: f64,
}

impl Influence for Attraction {
    fn velocity_delta(&self, _i: usize, x: &NVec3, _input: &FrameInput, _registry: &BodyRegistry) -> NVec3 {
        let to_center = self.center - x;
        if to_center.norm() > self.radius {
            direction(to_center) * self.strength
        } else {
            NVec3::zeros()
        }
    }
}

/// Push away from the influence point with linear falloff:
/// `strength` at zero distance, zero at `radius`
pub struct PointerRepulsion {
    pub strength: f64,
    pub radius: f64,
}

impl Influence for PointerRepulsion {
    fn velocity_delta(&self, _i: usize, x: &NVec3, input: &FrameInput, _registry: &BodyRegistry) -> NVec3 {
        let away = x - input.pointer;
        let d = away.norm();
        if d < self.radius {
            direction(away) * self.strength * (1.0 - d / self.radius)
        } else {
            NVec3::zeros()
        }
    }
}

/// Fixed-size push away from every other body closer than `min_spacing`.
///
/// Reads the live registry, so during a frame pass lower indices have already
/// been moved and higher ones have not.
pub struct LocalAvoidance {
    pub min_spacing: f64,
    pub strength: f64,
}

impl Influence for LocalAvoidance {
    fn velocity_delta(&self, i: usize, x: &NVec3, _input: &FrameInput, registry: &BodyRegistry) -> NVec3 {
        let mut dv = NVec3::zeros();
        for (j, xj) in registry.all().iter().enumerate() {
            if j == i {
                continue;
            }
            let apart = x - xj;
            if apart.norm() < self.min_spacing {
                dv += direction(apart) * self.strength;
            }
        }
        dv
    }
}
