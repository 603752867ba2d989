//! Core state types for the floating-body simulation.
//!
//! - `Body`   – per-body simulation state (velocity, shape kind, hover state)
//! - `System` – all bodies plus the shared position registry and frame counter
//!
//! Positions are not stored on `Body`; they live in the [`BodyRegistry`] so that
//! every body's update can read everyone else's current position.

use nalgebra::Vector3;

use super::hover::HoverState;
use super::registry::BodyRegistry;

pub type NVec3 = Vector3<f64>;

/// Shape tag handed to the renderer. Has no effect on motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Cube,
    Sphere,
    Torus,
}

impl BodyKind {
    /// Round-robin assignment by body index
    pub fn for_index(i: usize) -> Self {
        match i % 3 {
            0 => BodyKind::Cube,
            1 => BodyKind::Sphere,
            _ => BodyKind::Torus,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub v: NVec3, // velocity, position units per frame
    pub kind: BodyKind, // display shape
    pub hover: HoverState, // pointer-over flag and smoothed display scale
}

impl Body {
    /// Body at rest with a given kind
    pub fn at_rest(kind: BodyKind) -> Self {
        Self {
            v: NVec3::zeros(),
            kind,
            hover: HoverState::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<Body>, // per-body state, indexed like the registry
    pub registry: BodyRegistry, // current positions
    pub frame: u64, // completed frame passes
}

impl System {
    /// Build a system from starting positions, all bodies at rest.
    /// Kinds are assigned round-robin by index.
    pub fn from_positions(positions: Vec<NVec3>) -> Self {
        let bodies = (0..positions.len())
            .map(|i| Body::at_rest(BodyKind::for_index(i)))
            .collect();

        Self {
            bodies,
            registry: BodyRegistry::new(positions),
            frame: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Largest body speed this frame
    pub fn max_speed(&self) -> f64 {
        self.bodies.iter().map(|b| b.v.norm()).fold(0.0, f64::max)
    }
}
