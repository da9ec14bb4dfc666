use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Randomness source handed to sketches.
///
/// Sketches draw jitter, spawn positions and branch angles from the runner-owned stream, which
/// is not reproducible across runs unless the runner was built with a seed. Deterministic
/// layers use [`SketchRng::with_seed`], which never touches the main stream.
#[derive(Clone, Debug)]
pub struct SketchRng {
    inner: StdRng,
}

impl SketchRng {
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Run `f` against a fresh generator seeded with `seed`.
    pub fn with_seed<T>(seed: u64, f: impl FnOnce(&mut SketchRng) -> T) -> T {
        let mut scoped = Self::seeded(seed);
        f(&mut scoped)
    }

    /// Uniform sample in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.inner.gen_range(0.0..1.0)
    }

    /// Uniform sample in `[lo, hi)`; returns `lo` for an empty interval.
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        if hi > lo {
            self.inner.gen_range(lo..hi)
        } else {
            lo
        }
    }

    /// Uniform integer in `[lo, hi)`; returns `lo` for an empty interval.
    pub fn range_usize(&mut self, lo: usize, hi: usize) -> usize {
        if hi > lo {
            self.inner.gen_range(lo..hi)
        } else {
            lo
        }
    }

    pub fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }
}

impl Default for SketchRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
