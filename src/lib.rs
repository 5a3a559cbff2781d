#![deny(
    missing_docs,
    unreachable_pub,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]

//! `vo2mc` simulates a 2D lattice model of a metal-insulator transition
//! (inspired by VO2) using Metropolis Monte Carlo over a boolean
//! active/inactive site grid coupled to a two-orbital tight-binding
//! Hamiltonian.
//!
//! Sites live on a centered rectangular (rhombic) lattice: active sites
//! pair into dimers along the x direction and connect into clusters
//! through dimer and diagonal bonds. The energy model charges `Delta` per
//! active site, refunds `V` per complete dimer, and diagonalizes the
//! tight-binding Hamiltonian over the active sites for the electronic
//! observables (Fermi energy, chemical potential).
//!
//! RNGs are injected everywhere randomness is consumed, so runs are
//! deterministic under a fixed seed and independent runs can execute in
//! parallel (see the `parallel-sweeps` feature).
//!
//! # Basic Example
//! ```
//! use vo2mc::{Energetics, Environment, MonteCarlo};
//! use rand::prelude::*;
//!
//! // beta = 1, Delta = 1, V = 0.5
//! let env = Environment::new(1.0, 1.0, 0.5).unwrap();
//! let energetics = Energetics::new(env);
//!
//! // 100 steps on an 8x8 grid, snapshotting every 10 steps.
//! let mc = MonteCarlo::new(1e-12, 100, 10).unwrap();
//! let mut rng = StdRng::seed_from_u64(0xdecaf);
//! let outputs = mc.simulate(&energetics, 8, 8, &mut rng).unwrap();
//! assert_eq!(outputs.len(), 100);
//! ```

/// Energy model: atomic Hamiltonian, tight-binding electronic structure,
/// Fermi energy, and chemical potential.
pub mod energetics;
/// Physical parameters, loadable from JSON.
pub mod environment;
/// Typed failures for construction, configuration, and numerics.
pub mod error;
/// The boolean lattice state and its dimer and cluster statistics.
pub mod grid;
/// Sparse symmetric matrix builder feeding the eigensolver.
pub mod matrix;
/// The Metropolis driver producing per-step observables.
pub mod monte_carlo;
/// Lattice coordinates and index conversions.
pub mod point;
/// Constant-time set of lattice points.
pub mod point_set;
/// Bracketed one-dimensional root finding.
pub mod solve1d;
/// Parallel parameter sweeps.
#[cfg(feature = "parallel-sweeps")]
pub mod sweep;

pub use energetics::{fermi_dist, Energetics};
pub use environment::Environment;
pub use error::{Error, Result};
pub use grid::{random_point, Grid};
pub use matrix::SymmetricMatrix;
pub use monte_carlo::{MonteCarlo, MonteCarloOutput};
pub use point::Point;
pub use point_set::PointSet;
pub use solve1d::solve_bracketed;
