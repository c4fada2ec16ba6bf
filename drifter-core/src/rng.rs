//! Deterministic RNG hierarchy.
//!
//! A master seed generates sub-seeds for each `(scope, index)` pair, e.g.
//! `("kfold", 0)` for the shuffled fold split or `("stress", i)` for the i-th
//! stress-test sample. Sub-seeds are derived via BLAKE3, so a consumer's
//! stream does not depend on how many draws other consumers made first.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Deterministic RNG hierarchy rooted at one master seed.
#[derive(Debug, Clone)]
pub struct RngHierarchy {
    master_seed: u64,
}

impl RngHierarchy {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Derive the sub-seed for `(scope, index)`. Independent of derivation
    /// order.
    pub fn sub_seed(&self, scope: &str, index: u64) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(scope.as_bytes());
        hasher.update(&index.to_le_bytes());
        let hash = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }

    /// Seeded `StdRng` for `(scope, index)`.
    pub fn rng_for(&self, scope: &str, index: u64) -> StdRng {
        StdRng::seed_from_u64(self.sub_seed(scope, index))
    }
}
