//! Tuning table for the motion rule
//!
//! `Parameters` holds the per-frame constants:
//! - damping and the three velocity influences (attraction, repulsion, avoidance),
//! - the soft surface shell around the attractor

use super::states::NVec3;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub attraction_strength: f64, // pull toward attractor when outside its radius
    pub repulsion_strength: f64, // max push away from the influence point
    pub damping: f64, // velocity decay applied before new influences
    pub influence_radius: f64, // influence point repels within this distance
    pub min_spacing: f64, // bodies closer than this push apart
    pub avoidance_strength: f64, // push between too-close bodies
    pub shell_margin: f64, // shell radius = attractor radius + margin
    pub surface_lerp: f64, // fraction of the gap to the shell closed per frame
    pub surface_velocity_scale: f64, // extra damping near the shell
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            attraction_strength: 0.02,
            repulsion_strength: 0.3,
            damping: 0.95,
            influence_radius: 4.0,
            min_spacing: 0.6,
            avoidance_strength: 0.02,
            shell_margin: 0.5,
            surface_lerp: 0.2,
            surface_velocity_scale: 0.8,
        }
    }
}

/// The fixed central body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attractor {
    pub center: NVec3,
    pub radius: f64, // moon radius R
}

impl Attractor {
    /// Attractor at the origin
    pub fn at_origin(radius: f64) -> Self {
        Self {
            center: NVec3::zeros(),
            radius,
        }
    }
}
