use crate::environment::Environment;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::matrix::SymmetricMatrix;
use crate::point::Point;
use crate::solve1d::solve_bracketed;

/// Energy model coupling the atomic lattice configuration to the
/// electronic structure.
///
/// The atomic part charges `delta` per active site and refunds `v` per
/// complete dimer. The electronic part is a two-orbital tight-binding
/// Hamiltonian over the active sites, diagonalized to produce the spectrum
/// behind the Fermi energy and chemical potential.
#[derive(Clone, Copy, Debug)]
pub struct Energetics {
    env: Environment,
}

impl Energetics {
    /// Wrap a validated environment.
    pub fn new(env: Environment) -> Self {
        Energetics { env }
    }

    /// Inverse temperature.
    pub fn beta(&self) -> f64 {
        self.env.beta
    }

    /// Site activation energy.
    pub fn delta(&self) -> f64 {
        self.env.delta
    }

    /// Dimer binding energy.
    pub fn v(&self) -> f64 {
        self.env.v
    }

    /// Boltzmann factor `exp(-beta * energy)`.
    pub fn boltzmann(&self, energy: f64) -> f64 {
        (-self.env.beta * energy).exp()
    }

    /// Logarithm of the Boltzmann factor, `-beta * energy`.
    pub fn log_boltzmann(&self, energy: f64) -> f64 {
        -self.env.beta * energy
    }

    /// Total atomic energy of the configuration, ignoring the electrons:
    /// `delta * active_sites - v * dimers`.
    pub fn atomic_hamiltonian(&self, grid: &Grid) -> f64 {
        self.env.delta * grid.active_site_count() as f64
            - self.env.v * grid.dimer_count() as f64
    }

    /// Energy change from toggling the site at `p`, without mutating the
    /// grid. Activating costs `+delta`, deactivating refunds it, and the
    /// prospective dimer-count change contributes `-dimer_change * v`.
    pub fn site_flip_energy(&self, grid: &Grid, p: Point) -> f64 {
        let atomic = if grid.get(p) {
            -self.env.delta
        } else {
            self.env.delta
        };
        atomic - f64::from(grid.dimer_change(p)) * self.env.v
    }

    /// Tight-binding Hamiltonians `(alpha, beta)` over the active sites,
    /// each sized to the full lattice.
    ///
    /// Alpha-orbital electrons hop only along dimer-direction bonds; beta
    /// orbital electrons hop along dimer and diagonal bonds. Each bond is
    /// visited from both endpoints, hence the factor of 1/2 on the
    /// amplitudes. Neither orbital hops between inactive sites.
    pub fn electron_hamiltonian(&self, grid: &Grid) -> (SymmetricMatrix, SymmetricMatrix) {
        let sites = grid.site_count();
        let mut alpha = SymmetricMatrix::new(sites);
        let mut beta = SymmetricMatrix::new(sites);
        let (lx, ly) = (grid.lx(), grid.ly());
        let active = grid.active_sites();
        for &p in active.iter() {
            let id = p.to_index(lx, ly);
            alpha.add(id, id, self.env.epsilon_alpha);
            beta.add(id, id, self.env.epsilon_beta);
            for n in grid.dimer_neighbors(p) {
                if grid.get(n) {
                    let nid = n.to_index(lx, ly);
                    alpha.add(id, nid, -self.env.t_alpha / 2.0);
                    beta.add(id, nid, -self.env.t_beta_dimer / 2.0);
                }
            }
            for n in grid.diag_neighbors(p) {
                if grid.get(n) {
                    let nid = n.to_index(lx, ly);
                    beta.add(id, nid, -self.env.t_beta_diag / 2.0);
                }
            }
        }
        (alpha, beta)
    }

    /// Sorted electronic energy levels from both orbital channels. Each
    /// level is doubly spin-degenerate, so it holds two particles.
    pub fn electron_energies(&self, grid: &Grid) -> Vec<f64> {
        let (alpha, beta) = self.electron_hamiltonian(grid);
        let (mut energies, _) = alpha.eigensystem();
        let (beta_energies, _) = beta.eigensystem();
        energies.extend(beta_energies);
        energies.sort_by(|a, b| a.partial_cmp(b).expect("non-finite electron energy"));
        energies
    }

    /// Zero-temperature Fermi energy for `particle_count` electrons: fill
    /// `ceil(particle_count / 2)` levels from the bottom and report the
    /// highest occupied level.
    pub fn fermi_energy(&self, grid: &Grid, particle_count: usize) -> Result<f64> {
        if particle_count == 0 {
            return Err(Error::FermiUndefined(particle_count));
        }
        let energies = self.electron_energies(grid);
        let num_occupied = (particle_count + 1) / 2;
        if num_occupied > energies.len() {
            return Err(Error::NotEnoughLevels {
                levels: energies.len(),
                particles: particle_count,
            });
        }
        Ok(energies[num_occupied - 1])
    }

    /// Grand-canonical electron count at chemical potential `mu`:
    /// `sum 2 * fermi_dist(E - mu)` over the levels.
    pub fn num_electrons(&self, energies: &[f64], mu: f64) -> f64 {
        energies.iter().map(|&e| 2.0 * fermi_dist(e - mu)).sum()
    }

    /// Solve for the chemical potential at which the occupation sums to
    /// `particle_count`.
    ///
    /// The occupation is monotonic in `mu`, so the root is searched on the
    /// fixed bracket `[-100 delta, 100 delta]`.
    pub fn find_mu(&self, grid: &Grid, particle_count: usize) -> Result<f64> {
        let energies = self.electron_energies(grid);
        let residual = |mu: f64| particle_count as f64 - self.num_electrons(&energies, mu);
        let mu_max = 100.0 * self.env.delta;
        let eps = 1e-9;
        solve_bracketed(residual, -mu_max, mu_max, eps, eps)
    }
}

/// Fermi-Dirac occupation `1 / (exp(x) + 1)` of a dimensionless energy.
pub fn fermi_dist(x: f64) -> f64 {
    1.0 / (x.exp() + 1.0)
}
