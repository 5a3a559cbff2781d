use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Physical parameters of the lattice and the two-orbital electronic model.
///
/// `beta` is the inverse temperature, `delta` the energy cost of activating
/// a site, and `v` the energy gained from a completed dimer. The remaining
/// fields are the tight-binding on-site energies and hopping amplitudes of
/// the alpha and beta orbital channels; they default to zero when absent
/// from a config, which switches the electronic Hamiltonian off.
///
/// JSON field names follow the original config format
/// (`{"Beta": 1.0, "Delta": 1.0, "V": 0.5, ...}`); unknown keys are
/// ignored.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Environment {
    /// Inverse temperature.
    #[serde(rename = "Beta")]
    pub beta: f64,
    /// Energy cost of activating a site.
    #[serde(rename = "Delta")]
    pub delta: f64,
    /// Energy gained by completing a dimer.
    #[serde(rename = "V")]
    pub v: f64,
    /// On-site energy of the alpha orbital.
    #[serde(rename = "Epsilon_alpha", default)]
    pub epsilon_alpha: f64,
    /// On-site energy of the beta orbital.
    #[serde(rename = "Epsilon_beta", default)]
    pub epsilon_beta: f64,
    /// Dimer-direction hopping amplitude of the alpha orbital.
    #[serde(rename = "T_alpha", default)]
    pub t_alpha: f64,
    /// Dimer-direction hopping amplitude of the beta orbital.
    #[serde(rename = "T_beta_dimer", default)]
    pub t_beta_dimer: f64,
    /// Diagonal-direction hopping amplitude of the beta orbital.
    #[serde(rename = "T_beta_diag", default)]
    pub t_beta_diag: f64,
}

impl Environment {
    /// Validated construction from the atomic parameters, with the
    /// tight-binding parameters zeroed.
    pub fn new(beta: f64, delta: f64, v: f64) -> Result<Self> {
        Environment {
            beta,
            delta,
            v,
            epsilon_alpha: 0.0,
            epsilon_beta: 0.0,
            t_alpha: 0.0,
            t_beta_dimer: 0.0,
            t_beta_diag: 0.0,
        }
        .validated()
    }

    /// Check parameter ranges, returning the environment on success.
    /// The negated comparisons also reject NaN.
    pub fn validated(self) -> Result<Self> {
        if !(self.beta > 0.0) {
            return Err(Error::InvalidEnvironment("Beta must be positive"));
        }
        if !(self.delta > 0.0) {
            return Err(Error::InvalidEnvironment("Delta must be positive"));
        }
        if !(self.v > 0.0) {
            return Err(Error::InvalidEnvironment("V must be positive"));
        }
        Ok(self)
    }

    /// Load and validate an environment from a JSON string.
    pub fn from_json_str(data: &str) -> Result<Self> {
        let env: Environment = serde_json::from_str(data)?;
        env.validated()
    }

    /// Load and validate an environment from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_json() {
        let env = Environment::from_json_str(r#"{"Delta": 1.0, "V": 0.5, "Beta": 2.0}"#).unwrap();
        assert_eq!(env.delta, 1.0);
        assert_eq!(env.v, 0.5);
        assert_eq!(env.beta, 2.0);
        // absent tight-binding parameters default to zero
        assert_eq!(env.t_alpha, 0.0);
        assert_eq!(env.epsilon_beta, 0.0);
    }

    #[test]
    fn from_json_ignores_unknown_keys() {
        let env =
            Environment::from_json_str(r#"{"Delta": 1.0, "V": 0.5, "Beta": 1.0, "Extra": 3}"#)
                .unwrap();
        assert_eq!(env.delta, 1.0);
    }

    #[test]
    fn validation_rejects_non_positive_parameters() {
        assert!(matches!(
            Environment::new(0.0, 1.0, 0.5),
            Err(Error::InvalidEnvironment(_))
        ));
        assert!(matches!(
            Environment::new(1.0, -1.0, 0.5),
            Err(Error::InvalidEnvironment(_))
        ));
        assert!(matches!(
            Environment::new(1.0, 1.0, 0.0),
            Err(Error::InvalidEnvironment(_))
        ));
        assert!(matches!(
            Environment::new(f64::NAN, 1.0, 0.5),
            Err(Error::InvalidEnvironment(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        assert!(matches!(
            Environment::from_json_str("{"),
            Err(Error::ConfigDecode(_))
        ));
        // missing required field
        assert!(matches!(
            Environment::from_json_str(r#"{"Delta": 1.0}"#),
            Err(Error::ConfigDecode(_))
        ));
    }
}
