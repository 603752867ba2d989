//! Build a fully-initialized scene from configuration
//!
//! Takes a `SceneConfig` (YAML-facing) and produces the runtime bundle
//! `Scene` containing:
//! - session settings (`Engine`)
//! - tuning constants (`Parameters`) and the `Attractor`
//! - system state (`System`, bodies at rest on the ring layout)
//! - the active influence set (`InfluenceSet`)
//!
//! The scene is inserted into Bevy as a `Resource` and advanced once per frame.

use bevy::log::info;
use bevy::prelude::Resource;

use crate::configuration::config::SceneConfig;
use crate::simulation::engine::Engine;
use crate::simulation::forces::{FrameInput, InfluenceSet};
use crate::simulation::hover::HoverState;
use crate::simulation::integrator::step_frame;
use crate::simulation::layout::ring_layout;
use crate::simulation::params::{Attractor, Parameters};
use crate::simulation::states::{NVec3, System};

/// Bevy resource representing one running scene session
#[derive(Resource)]
pub struct Scene {
    pub engine: Engine,
    pub parameters: Parameters,
    pub attractor: Attractor,
    pub system: System,
    pub forces: InfluenceSet,
}

impl Scene {
    pub fn build_scene(cfg: &SceneConfig) -> Self {
        let engine = cfg.engine();
        let parameters = cfg.parameters();
        let attractor = cfg.attractor();

        // Bodies: ring layout, at rest, kinds round-robin
        let positions = ring_layout(engine.body_count, engine.layers, &cfg.layout(), engine.seed);
        let mut system = System::from_positions(positions);
        for body in system.bodies.iter_mut() {
            body.hover = HoverState::new(cfg.hover.scale, cfg.hover.stiffness);
        }

        let forces = InfluenceSet::standard(&attractor, &parameters);

        Self {
            engine,
            parameters,
            attractor,
            system,
            forces,
        }
    }

    /// Scene with explicit starting positions and the standard influences
    pub fn from_positions(positions: Vec<NVec3>, attractor: Attractor, parameters: Parameters) -> Self {
        let engine = Engine {
            body_count: positions.len(),
            layers: 1,
            seed: None,
        };
        let forces = InfluenceSet::standard(&attractor, &parameters);

        Self {
            engine,
            parameters,
            attractor,
            system: System::from_positions(positions),
            forces,
        }
    }

    /// Log the session settings
    pub fn log_summary(&self) {
        info!(
            "scene: {} bodies on {} layers, moon radius {}, seed {:?}",
            self.system.len(),
            self.engine.layers,
            self.attractor.radius,
            self.engine.seed
        );
    }

    /// Advance every body by one frame with the given influence point
    pub fn step(&mut self, pointer: NVec3) {
        let Scene {
            system,
            parameters,
            attractor,
            forces,
            ..
        } = self;

        step_frame(system, forces, parameters, attractor, &FrameInput::new(pointer));
    }

    /// Mean distance of the bodies from the attractor center
    pub fn mean_radius(&self) -> f64 {
        let positions = self.system.registry.all();
        if positions.is_empty() {
            return 0.0;
        }
        let total: f64 = positions.iter().map(|x| (x - self.attractor.center).norm()).sum();
        total / positions.len() as f64
    }
}
