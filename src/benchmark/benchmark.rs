use std::time::Instant;

use crate::configuration::config::SceneConfig;
use crate::simulation::scenario::Scene;
use crate::visualization::headless::orbiting_pointer;

/// Scene of `n` bodies on the default rings with a fixed seed
fn make_scene(n: usize) -> Scene {
    let mut cfg = SceneConfig::default();
    cfg.engine.body_count = n;
    cfg.engine.seed = Some(42);
    Scene::build_scene(&cfg)
}

/// Mean wall time of one frame pass in milliseconds
fn time_frames(scene: &mut Scene, frames: u64) -> f64 {
    let t0 = Instant::now();
    for f in 0..frames {
        scene.step(orbiting_pointer(f, 6.0));
    }
    t0.elapsed().as_secs_f64() * 1000.0 / frames as f64
}

pub fn bench_frames() {
    // Local avoidance checks every pair, so cost grows with n^2
    let ns = [48, 96, 192, 384, 768];
    let frames = 200;

    for n in ns {
        let mut scene = make_scene(n);

        // Warm up
        time_frames(&mut scene, 10);

        let ms = time_frames(&mut scene, frames);
        println!("N = {n:4}, frame = {ms:8.4} ms");
    }
}

/// Frame cost for a sweep of n
/// Paste output directly into a spreadsheet to graph
pub fn bench_frames_curve() {
    println!("N,frame_ms");

    for n in (48..=1536).step_by(48) {
        // Large n: fewer frames to keep the sweep short
        let frames = if n <= 480 { 100 } else { 20 };

        let mut scene = make_scene(n);
        let ms = time_frames(&mut scene, frames);

        println!("{},{:.6}", n, ms);
    }
}
