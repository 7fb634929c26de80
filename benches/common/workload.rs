//! Seeded key streams for the top-N benchmarks.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Zipf};

#[derive(Debug, Clone, Copy)]
pub enum Workload {
    /// Uniform keys in `[0, universe)`.
    Uniform,
    /// Zipf-distributed keys; rank 1 is key 0.
    Zipfian { exponent: f64 },
}

#[derive(Debug, Clone, Copy)]
pub struct WorkloadSpec {
    pub universe: u64,
    pub workload: Workload,
    pub seed: u64,
}

impl WorkloadSpec {
    /// Materializes `len` keys so generation stays out of the timed loop.
    pub fn keys(self, len: usize) -> Vec<u64> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let universe = self.universe.max(1);
        match self.workload {
            Workload::Uniform => (0..len).map(|_| rng.random::<u64>() % universe).collect(),
            Workload::Zipfian { exponent } => {
                let zipf = Zipf::new(universe as f64, exponent).expect("valid zipf parameters");
                (0..len)
                    .map(|_| zipf.sample(&mut rng) as u64 - 1)
                    .collect()
            },
        }
    }
}
