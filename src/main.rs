use moonfield::{SceneConfig, Scene};
use moonfield::{run_3d, run_headless};
use moonfield::{bench_frames, bench_frames_curve};

use anyhow::{Context, Result};
use clap::Parser;

use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Floating bodies drifting around a glowing moon")]
struct Args {
    /// Scene file under scenarios/
    #[arg(short, long, default_value = "default.yaml")]
    file: String,

    /// Run the simulation without a window
    #[arg(long)]
    headless: bool,

    /// Frame passes to run in headless mode
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Time frame passes for a range of body counts and exit
    #[arg(long)]
    bench: bool,

    /// Like --bench, but print a CSV sweep
    #[arg(long)]
    bench_csv: bool,
}

// load here to keep main clean
fn load_scene_config(file_name: &str) -> Result<SceneConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let text = fs::read_to_string(&config_path)
        .with_context(|| format!("reading scene file {}", config_path.display()))?;
    SceneConfig::from_yaml_str(&text)
        .with_context(|| format!("parsing scene file {}", config_path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        bench_frames();
        return Ok(());
    }
    if args.bench_csv {
        bench_frames_curve();
        return Ok(());
    }

    let scene_cfg = load_scene_config(&args.file)?;
    let scene = Scene::build_scene(&scene_cfg);

    if args.headless {
        run_headless(scene, args.frames);
    } else {
        run_3d(scene);
    }

    Ok(())
}
