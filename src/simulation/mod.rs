pub mod states;
pub mod registry;
pub mod params;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod layout;
pub mod hover;
pub mod scenario;
