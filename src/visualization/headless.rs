//! Windowless runner
//!
//! Drives the same frame pass as the viewer from bevy's schedule loop, with a
//! scripted influence point circling the moon, then exits.

use bevy::app::AppExit;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use crate::simulation::scenario::Scene;
use crate::simulation::states::NVec3;

/// Radius of the scripted pointer's circle around the moon
const POINTER_ORBIT: f64 = 6.0;

#[derive(Resource)]
struct HeadlessRun {
    frames: u64, // stop after this many frame passes
    report_every: u64,
}

/// Influence point circling the origin in the z = 0 plane
pub fn orbiting_pointer(frame: u64, radius: f64) -> NVec3 {
    let angle = frame as f64 * 0.02;
    NVec3::new(angle.cos() * radius, angle.sin() * radius, 0.0)
}

pub fn run_headless(scene: Scene, frames: u64) {
    App::new()
        .insert_resource(scene)
        .insert_resource(HeadlessRun {
            frames,
            report_every: 60,
        })
        .add_plugins((MinimalPlugins, LogPlugin::default()))
        .add_systems(Startup, headless_start)
        .add_systems(Update, (headless_step, headless_report).chain())
        .run();
}

fn headless_start(scene: Res<Scene>, run: Res<HeadlessRun>) {
    scene.log_summary();
    info!("headless: running {} frames", run.frames);
}

fn headless_step(mut scene: ResMut<Scene>, run: Res<HeadlessRun>) {
    let frame = scene.system.frame;
    if frame >= run.frames {
        return;
    }
    scene.step(orbiting_pointer(frame, POINTER_ORBIT));
}

fn headless_report(scene: Res<Scene>, run: Res<HeadlessRun>, mut exit: EventWriter<AppExit>) {
    let frame = scene.system.frame;

    if frame % run.report_every == 0 {
        debug!(
            "frame {frame}: mean radius {:.3}, max speed {:.4}",
            scene.mean_radius(),
            scene.system.max_speed()
        );
    }

    if frame >= run.frames {
        info!(
            "headless: {} bodies after {frame} frames, mean radius {:.3}, max speed {:.4}",
            scene.system.len(),
            scene.mean_radius(),
            scene.system.max_speed()
        );
        exit.send(AppExit::Success);
    }
}
