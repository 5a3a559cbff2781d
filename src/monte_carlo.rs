use crate::energetics::Energetics;
use crate::error::{Error, Result};
use crate::grid::{random_point, Grid};
use rand::Rng;
use serde::Deserialize;
use std::path::Path;

/// Validated parameters controlling a single Metropolis simulation run.
///
/// JSON field names follow the original config format
/// (`{"EtaMinimum": 1e-12, "TotalSteps": 1000, "RecordInterval": 10}`).
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct MonteCarlo {
    /// Floor added to the acceptance draw so the logarithm never sees zero.
    #[serde(rename = "EtaMinimum")]
    eta_minimum: f64,
    /// Number of steps to simulate.
    #[serde(rename = "TotalSteps")]
    total_steps: usize,
    /// Steps between grid snapshots; 0 means record only the final grid.
    #[serde(rename = "RecordInterval", default)]
    record_interval: usize,
}

/// Per-step record of the macroscopic observables, with a grid snapshot on
/// recording steps.
#[derive(Clone, Debug, PartialEq)]
pub struct MonteCarloOutput {
    /// Active sites at this step.
    pub active_sites: usize,
    /// Complete dimers at this step.
    pub dimers: usize,
    /// Size of the largest active cluster at this step.
    pub largest_cluster_size: usize,
    /// Grid snapshot, present only on recording steps.
    pub grid: Option<Grid>,
}

impl MonteCarlo {
    /// Validated construction.
    pub fn new(eta_minimum: f64, total_steps: usize, record_interval: usize) -> Result<Self> {
        MonteCarlo {
            eta_minimum,
            total_steps,
            record_interval,
        }
        .validated()
    }

    fn validated(self) -> Result<Self> {
        if !(self.eta_minimum > 0.0) {
            return Err(Error::InvalidMonteCarlo("EtaMinimum must be positive"));
        }
        if self.total_steps == 0 {
            return Err(Error::InvalidMonteCarlo("TotalSteps must be positive"));
        }
        Ok(self)
    }

    /// Load and validate parameters from a JSON string.
    pub fn from_json_str(data: &str) -> Result<Self> {
        let mc: MonteCarlo = serde_json::from_str(data)?;
        mc.validated()
    }

    /// Load and validate parameters from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    /// Acceptance-draw floor.
    pub fn eta_minimum(&self) -> f64 {
        self.eta_minimum
    }

    /// Steps per simulation run.
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Snapshot interval (0: final grid only).
    pub fn record_interval(&self) -> usize {
        self.record_interval
    }

    /// Trial-flip a uniformly random site with Metropolis acceptance.
    ///
    /// Energy-lowering flips are always taken. An energy-raising flip is
    /// taken when `ln(eta + eta_minimum) <= -beta * dE` for a fresh draw
    /// `eta ~ U[0, 1)`; the floor keeps the logarithm finite at `eta = 0`
    /// and must stay small enough not to distort the Boltzmann statistics.
    /// Returns whether the trial was accepted; the grid is already updated
    /// on acceptance.
    pub fn step<R: Rng>(&self, energetics: &Energetics, grid: &mut Grid, rng: &mut R) -> bool {
        let p = random_point(grid.lx(), grid.ly(), rng);
        let energy_change = energetics.site_flip_energy(grid, p);
        if energy_change < 0.0 {
            grid.toggle(p);
            return true;
        }
        let log_eta = (rng.gen::<f64>() + self.eta_minimum).ln();
        if log_eta <= energetics.log_boltzmann(energy_change) {
            grid.toggle(p);
            return true;
        }
        false
    }

    /// Run a full simulation from a random starting grid, returning one
    /// output record per step.
    ///
    /// The initial active-site count is the zero-coupling equilibrium
    /// estimate `lx * ly * exp(-beta * delta)`. Observables are recorded
    /// before each trial flip, so the first record describes the initial
    /// grid. Snapshots land every `record_interval` steps starting at step
    /// 0, or on the final step alone when the interval is 0.
    pub fn simulate<R: Rng>(
        &self,
        energetics: &Energetics,
        lx: usize,
        ly: usize,
        rng: &mut R,
    ) -> Result<Vec<MonteCarloOutput>> {
        let expected_active =
            ((lx * ly) as f64 * energetics.boltzmann(energetics.delta())) as usize;
        let mut grid = Grid::random_constrained(lx, ly, expected_active, rng)?;
        let mut outputs = Vec::with_capacity(self.total_steps);
        for time in 0..self.total_steps {
            let snapshot = if self.record_interval > 0 {
                time % self.record_interval == 0
            } else {
                time + 1 == self.total_steps
            };
            outputs.push(MonteCarloOutput {
                active_sites: grid.active_site_count(),
                dimers: grid.dimer_count(),
                largest_cluster_size: grid.largest_cluster().map_or(0, |c| c.len()),
                grid: snapshot.then(|| grid.clone()),
            });
            self.step(energetics, &mut grid, rng);
        }
        Ok(outputs)
    }
}
