//! Configuration types for loading scenes from YAML.
//!
//! A scene file is a thin, `serde`-deserializable description of a session:
//!
//! - [`EngineConfig`]    – body count, ring layers and layout seed
//! - [`AttractorConfig`] – the central moon
//! - [`TuningConfig`]    – constants of the per-frame motion rule
//! - [`LayoutConfig`]    – starting ring geometry
//! - [`HoverConfig`]     – hover scale animation
//! - [`SceneConfig`]     – top-level wrapper
//!
//! Every field has a default; missing sections and fields fall back to it.
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   body_count: 48
//!   layers: 3
//!   seed: 7                  # optional, absent -> entropy-seeded layout
//!
//! attractor:
//!   radius: 3.0
//!
//! tuning:
//!   attraction_strength: 0.02
//!   repulsion_strength: 0.3
//!   damping: 0.95
//!   influence_radius: 4.0
//!   min_spacing: 0.6
//!   avoidance_strength: 0.02
//!   shell_margin: 0.5
//!   surface_lerp: 0.2
//!   surface_velocity_scale: 0.8
//!
//! layout:
//!   base_radius: 5.0
//!   radius_jitter: 2.0
//!   vertical_jitter: 2.0
//!   layer_spacing: 1.5
//!
//! hover:
//!   scale: 1.1
//!   stiffness: 12.0
//! ```

use anyhow::{ensure, Result};
use serde::Deserialize;

use crate::simulation::engine::Engine;
use crate::simulation::hover::{DEFAULT_HOVER_SCALE, DEFAULT_HOVER_STIFFNESS};
use crate::simulation::layout::LayoutParams;
use crate::simulation::params::{Attractor, Parameters};

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub body_count: usize, // number of floating bodies
    pub layers: usize, // rings in the starting layout
    pub seed: Option<u64>, // layout seed, makes runs reproducible
}

impl Default for EngineConfig {
    fn default() -> Self {
        let e = Engine::default();
        Self {
            body_count: e.body_count,
            layers: e.layers,
            seed: e.seed,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AttractorConfig {
    pub radius: f64, // moon radius
}

impl Default for AttractorConfig {
    fn default() -> Self {
        Self { radius: 3.0 }
    }
}

/// Motion-rule constants. Defaults are the reference tuning.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TuningConfig {
    pub attraction_strength: f64,
    pub repulsion_strength: f64,
    pub damping: f64,
    pub influence_radius: f64,
    pub min_spacing: f64,
    pub avoidance_strength: f64,
    pub shell_margin: f64,
    pub surface_lerp: f64,
    pub surface_velocity_scale: f64,
}

impl Default for TuningConfig {
    fn default() -> Self {
        let p = Parameters::default();
        Self {
            attraction_strength: p.attraction_strength,
            repulsion_strength: p.repulsion_strength,
            damping: p.damping,
            influence_radius: p.influence_radius,
            min_spacing: p.min_spacing,
            avoidance_strength: p.avoidance_strength,
            shell_margin: p.shell_margin,
            surface_lerp: p.surface_lerp,
            surface_velocity_scale: p.surface_velocity_scale,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LayoutConfig {
    pub base_radius: f64,
    pub radius_jitter: f64,
    pub vertical_jitter: f64,
    pub layer_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let l = LayoutParams::default();
        Self {
            base_radius: l.base_radius,
            radius_jitter: l.radius_jitter,
            vertical_jitter: l.vertical_jitter,
            layer_spacing: l.layer_spacing,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct HoverConfig {
    pub scale: f64, // display scale while hovered
    pub stiffness: f64, // spring angular frequency
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_HOVER_SCALE,
            stiffness: DEFAULT_HOVER_STIFFNESS,
        }
    }
}

/// Top-level scene configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SceneConfig {
    pub engine: EngineConfig,
    pub attractor: AttractorConfig,
    pub tuning: TuningConfig,
    pub layout: LayoutConfig,
    pub hover: HoverConfig,
}

impl SceneConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let cfg: SceneConfig = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations the motion rule cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(self.engine.body_count > 0, "engine.body_count must be at least 1");
        ensure!(self.engine.layers > 0, "engine.layers must be at least 1");

        let r = self.attractor.radius;
        ensure!(r.is_finite() && r > 0.0, "attractor.radius must be positive, got {r}");

        let t = &self.tuning;
        let tuning = [
            ("attraction_strength", t.attraction_strength),
            ("repulsion_strength", t.repulsion_strength),
            ("damping", t.damping),
            ("influence_radius", t.influence_radius),
            ("min_spacing", t.min_spacing),
            ("avoidance_strength", t.avoidance_strength),
            ("shell_margin", t.shell_margin),
            ("surface_lerp", t.surface_lerp),
            ("surface_velocity_scale", t.surface_velocity_scale),
        ];
        for (name, value) in tuning {
            ensure!(value.is_finite(), "tuning.{name} must be finite, got {value}");
        }
        ensure!(
            (0.0..=1.0).contains(&t.damping),
            "tuning.damping must be within [0, 1], got {}",
            t.damping
        );
        ensure!(
            t.influence_radius > 0.0,
            "tuning.influence_radius must be positive, got {}",
            t.influence_radius
        );

        let l = &self.layout;
        ensure!(
            l.base_radius.is_finite() && l.layer_spacing.is_finite(),
            "layout.base_radius and layout.layer_spacing must be finite"
        );
        ensure!(
            l.radius_jitter >= 0.0 && l.vertical_jitter >= 0.0,
            "layout jitter must not be negative"
        );

        ensure!(
            self.hover.stiffness.is_finite() && self.hover.stiffness > 0.0,
            "hover.stiffness must be positive, got {}",
            self.hover.stiffness
        );

        Ok(())
    }

    pub fn engine(&self) -> Engine {
        Engine {
            body_count: self.engine.body_count,
            layers: self.engine.layers,
            seed: self.engine.seed,
        }
    }

    pub fn attractor(&self) -> Attractor {
        Attractor::at_origin(self.attractor.radius)
    }

    pub fn parameters(&self) -> Parameters {
        let t = &self.tuning;
        Parameters {
            attraction_strength: t.attraction_strength,
            repulsion_strength: t.repulsion_strength,
            damping: t.damping,
            influence_radius: t.influence_radius,
            min_spacing: t.min_spacing,
            avoidance_strength: t.avoidance_strength,
            shell_margin: t.shell_margin,
            surface_lerp: t.surface_lerp,
            surface_velocity_scale: t.surface_velocity_scale,
        }
    }

    pub fn layout(&self) -> LayoutParams {
        LayoutParams {
            base_radius: self.layout.base_radius,
            radius_jitter: self.layout.radius_jitter,
            vertical_jitter: self.layout.vertical_jitter,
            layer_spacing: self.layout.layer_spacing,
        }
    }
}
