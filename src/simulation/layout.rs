//! Starting positions for the floating bodies
//!
//! Bodies are split across stacked rings around the vertical axis. Each ring
//! gets an even share of the bodies (the first rings take the remainder),
//! evenly spaced in angle, each body with its own jittered radius and height.
//! Spawn overlaps are not prevented; local avoidance pulls them apart.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::states::NVec3;

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    pub base_radius: f64, // ring radius before jitter
    pub radius_jitter: f64, // up to this much is added to the radius
    pub vertical_jitter: f64, // height spread is +/- this
    pub layer_spacing: f64, // height step between rings
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            base_radius: 5.0,
            radius_jitter: 2.0,
            vertical_jitter: 2.0,
            layer_spacing: 1.5,
        }
    }
}

/// Number of bodies placed on ring `layer`
pub fn layer_share(total: usize, layers: usize, layer: usize) -> usize {
    let base = total / layers;
    if layer < total % layers {
        base + 1
    } else {
        base
    }
}

/// Generate `total` starting positions over `layers` rings.
/// `seed = None` draws the seed from system entropy.
pub fn ring_layout(total: usize, layers: usize, params: &LayoutParams, seed: Option<u64>) -> Vec<NVec3> {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    ring_layout_with(total, layers, params, &mut rng)
}

/// Same as [`ring_layout`] with a caller-supplied RNG
pub fn ring_layout_with<R: Rng>(total: usize, layers: usize, params: &LayoutParams, rng: &mut R) -> Vec<NVec3> {
    let mut positions = Vec::with_capacity(total);
    if total == 0 || layers == 0 {
        return positions;
    }

    for layer in 0..layers {
        let count = layer_share(total, layers, layer);
        for k in 0..count {
            let angle = k as f64 / count as f64 * TAU;
            let radius = params.base_radius + rng.gen::<f64>() * params.radius_jitter;
            let height = (rng.gen::<f64>() * 2.0 - 1.0) * params.vertical_jitter
                + layer as f64 * params.layer_spacing;

            positions.push(NVec3::new(angle.cos() * radius, height, angle.sin() * radius));
        }
    }

    positions
}
