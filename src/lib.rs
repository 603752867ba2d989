pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, BodyKind, System, NVec3};
pub use simulation::registry::BodyRegistry;
pub use simulation::params::{Attractor, Parameters};
pub use simulation::forces::{Influence, InfluenceSet, FrameInput, Attraction, PointerRepulsion, LocalAvoidance};
pub use simulation::integrator::{step_body, step_frame, surface_constraint};
pub use simulation::layout::{ring_layout, LayoutParams};
pub use simulation::hover::{HoverState, SmoothedScalar};
pub use simulation::scenario::Scene;

pub use configuration::config::{SceneConfig, EngineConfig, AttractorConfig, TuningConfig, LayoutConfig, HoverConfig};

pub use visualization::{moonfield_vis3d::run_3d, headless::run_headless};

pub use benchmark::benchmark::{bench_frames, bench_frames_curve};
