//! Fills the per-face payload with reproducible random values.

use geodesic_sphere::{FaceVisitor, VisitedFace};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// Writes a uniform random value in `[min, max)` to every face it visits.
pub(crate) struct RandomPayloadVisitor {
    rng: Xoshiro256StarStar,
    min: f32,
    max: f32,
    visited: usize,
    lowest: f32,
    highest: f32,
}

impl RandomPayloadVisitor {
    /// Caller guarantees `min < max` (see `Config::validate`).
    pub(crate) fn new(seed: u64, min: f32, max: f32) -> Self {
        Self {
            rng: Xoshiro256StarStar::seed_from_u64(seed),
            min,
            max,
            visited: 0,
            lowest: f32::INFINITY,
            highest: f32::NEG_INFINITY,
        }
    }

    pub(crate) fn visited(&self) -> usize {
        self.visited
    }

    /// Smallest and largest value written so far, if any face was visited.
    pub(crate) fn range(&self) -> Option<(f32, f32)> {
        (self.visited > 0).then_some((self.lowest, self.highest))
    }
}

impl FaceVisitor for RandomPayloadVisitor {
    fn visit(&mut self, face: &mut VisitedFace<'_>) {
        let value = self.rng.gen_range(self.min..self.max);
        face.set_data(value);
        self.visited += 1;
        self.lowest = self.lowest.min(value);
        self.highest = self.highest.max(value);
        tracing::trace!(face = %face.id(), level = face.level(), value, "set face payload");
    }
}
