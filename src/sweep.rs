//! Embarrassingly parallel parameter sweeps.
//!
//! Each run owns its grid, energetics, and RNG stream, so runs never share
//! mutable state; rayon distributes them across threads. Seeds derive from
//! a base seed plus the run index, making a sweep reproducible run by run.

use crate::energetics::Energetics;
use crate::environment::Environment;
use crate::error::Result;
use crate::monte_carlo::{MonteCarlo, MonteCarloOutput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

/// Run one simulation per environment in parallel on `lx` by `ly` grids.
///
/// Run `i` draws from an [`StdRng`] seeded with `base_seed + i`, so the
/// result for a given `(environment, index, base_seed)` triple does not
/// depend on thread scheduling. The first failing run's error is returned.
pub fn sweep_environments(
    environments: &[Environment],
    mc: &MonteCarlo,
    lx: usize,
    ly: usize,
    base_seed: u64,
) -> Result<Vec<Vec<MonteCarloOutput>>> {
    environments
        .par_iter()
        .enumerate()
        .map(|(i, &env)| {
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(i as u64));
            mc.simulate(&Energetics::new(env), lx, ly, &mut rng)
        })
        .collect()
}
