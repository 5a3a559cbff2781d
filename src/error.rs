use thiserror::Error;

/// Failures surfaced by grid construction, configuration loading, and the
/// numerical collaborators.
///
/// Out-of-bounds coordinate or matrix access is a caller bug and panics
/// instead of returning one of these.
#[derive(Error, Debug)]
pub enum Error {
    /// Grid input was empty or non-rectangular.
    #[error("grid data must be rectangular and contain at least one site")]
    GridShape,
    /// Grid dimensions must both be at least one.
    #[error("invalid grid dimensions {0}x{1}")]
    GridDims(usize, usize),
    /// Environment parameters failed validation.
    #[error("invalid environment: {0}")]
    InvalidEnvironment(&'static str),
    /// Monte Carlo parameters failed validation.
    #[error("invalid Monte Carlo parameters: {0}")]
    InvalidMonteCarlo(&'static str),
    /// Fermi energy requested for zero particles.
    #[error("Fermi energy not defined for particle count {0}")]
    FermiUndefined(usize),
    /// The electronic spectrum has fewer levels than the particles need.
    #[error("spectrum has {levels} levels but {particles} particles were requested")]
    NotEnoughLevels {
        /// Available doubly-degenerate levels.
        levels: usize,
        /// Requested particle count.
        particles: usize,
    },
    /// The root-finder bracket does not straddle a sign change.
    #[error("bracket [{0}, {1}] does not contain a sign change")]
    NotBracketed(f64, f64),
    /// The root finder exhausted its iteration budget before meeting the
    /// requested tolerance.
    #[error("root finder failed to converge within the iteration budget")]
    NoConvergence,
    /// A configuration file could not be read.
    #[error("config read error: {0}")]
    ConfigIo(#[from] std::io::Error),
    /// Configuration JSON could not be decoded.
    #[error("config decode error: {0}")]
    ConfigDecode(#[from] serde_json::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
