//! Session-level settings
//!
//! Body count, ring layers and layout seed used when building a `Scene`

#[derive(Debug, Clone)]
pub struct Engine {
    pub body_count: usize, // number of floating bodies
    pub layers: usize, // rings in the starting layout
    pub seed: Option<u64>, // None = entropy-seeded layout
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            body_count: 48,
            layers: 3,
            seed: None,
        }
    }
}
