//! Shared, ordered store of body positions.
//!
//! One slot per body, indexed by body id and fixed in length for the session.
//! Each frame pass overwrites slots in place in ascending index order, so a
//! reader in the middle of a pass sees current-frame positions for lower
//! indices and previous-frame positions for higher ones.

use super::states::NVec3;

#[derive(Debug, Clone, Default)]
pub struct BodyRegistry {
    positions: Vec<NVec3>,
}

impl BodyRegistry {
    pub fn new(positions: Vec<NVec3>) -> Self {
        Self { positions }
    }

    /// Current position of body `i`.
    ///
    /// # Panics
    /// If `i` is out of range. That means the body list and the registry were
    /// built with different sizes.
    pub fn get(&self, i: usize) -> NVec3 {
        self.check(i);
        self.positions[i]
    }

    /// Overwrite the position of body `i` in place.
    ///
    /// # Panics
    /// If `i` is out of range.
    pub fn set(&mut self, i: usize, x: NVec3) {
        self.check(i);
        self.positions[i] = x;
    }

    /// Live view of every slot, in index order
    pub fn all(&self) -> &[NVec3] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn check(&self, i: usize) {
        assert!(
            i < self.positions.len(),
            "body index {i} out of range for registry of {} slots",
            self.positions.len()
        );
    }
}
