//! Per-frame motion integration for the floating bodies
//!
//! One frame pass updates every body once, strictly by ascending index, and
//! commits each new position to the registry before the next body is read.
//! Local avoidance is therefore asymmetric within a frame: body `i` sees the
//! already-moved position of every `j < i` and last frame's position of every
//! `j > i`.

use super::forces::{direction, FrameInput, InfluenceSet};
use super::params::{Attractor, Parameters};
use super::states::{NVec3, System};

/// Advance body `i` by one frame and commit its new position.
///
/// Damping, then influences, then one explicit Euler step (velocity is in
/// position units per frame), then the surface shell correction.
pub fn step_body(
    i: usize,
    sys: &mut System,
    forces: &InfluenceSet,
    params: &Parameters,
    attractor: &Attractor,
    input: &FrameInput,
) {
    let mut x = sys.registry.get(i);
    let body = &mut sys.bodies[i];

    body.v *= params.damping;
    body.v += forces.accumulate(i, &x, input, &sys.registry);

    x += body.v;

    surface_constraint(&mut x, &mut body.v, attractor, params);

    sys.registry.set(i, x);
}

/// Soft shell at `R + shell_margin` around the attractor.
///
/// Inside the shell the position closes `surface_lerp` of the gap to the
/// shell point along the ray from the center, and velocity is scaled by
/// `surface_velocity_scale`. A body pushed inward faster than the correction
/// can still sink below the shell.
pub fn surface_constraint(x: &mut NVec3, v: &mut NVec3, attractor: &Attractor, params: &Parameters) {
    let shell_radius = attractor.radius + params.shell_margin;
    let offset = *x - attractor.center;

    if offset.norm() < shell_radius {
        let shell_point = attractor.center + direction(offset) * shell_radius;
        *x = x.lerp(&shell_point, params.surface_lerp);
        *v *= params.surface_velocity_scale;
    }
}

/// Run one frame pass over all bodies in index order
pub fn step_frame(
    sys: &mut System,
    forces: &InfluenceSet,
    params: &Parameters,
    attractor: &Attractor,
    input: &FrameInput,
) {
    for i in 0..sys.bodies.len() {
        step_body(i, sys, forces, params, attractor, input);
    }

    sys.frame += 1;
}
