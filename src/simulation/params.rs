//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - fixed integration step size `dt`,
//! - softening length and gravitational constant (`eps`, `g`),
//! - optional minimum separation for coincident bodies,
//! - random seed used to generate the cluster
//!
//! The reference cluster constants live here as well, so the initializer and
//! the force law agree on units (SI throughout)

use crate::error::{SimError, SimResult};

/// Gravitational constant (m^3 kg^-1 s^-2)
pub const G: f64 = 6.674e-11;

/// Softening length (m), added in quadrature to the separation
pub const SOFTENING: f64 = 1e16;

/// Fixed step size (s)
pub const DT: f64 = 2e12;

/// Standard deviation of the initial positions (m)
pub const POSITION_SCALE: f64 = 4.2e16;

/// Scale of the initial tangential velocity seed (1/s)
pub const TANGENTIAL_SCALE: f64 = 4e-15;

/// Gamma(shape, scale) draw multiplied by `MASS_SCALE` gives a body's mass
pub const MASS_SHAPE: f64 = 1.5;
pub const MASS_GAMMA_SCALE: f64 = 1.0;
pub const MASS_SCALE: f64 = 2e30;

/// radius = mass / RADIUS_MASS_DIVISOR
pub const RADIUS_MASS_DIVISOR: f64 = 0.25e29;

pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64, // step size
    pub g: f64, // gravitational constant
    pub eps: f64, // softening
    pub min_separation: Option<f64>, // floor for the direction denominator, None = propagate NaN
    pub seed: u64, // deterministic seed
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            dt: DT,
            g: G,
            eps: SOFTENING,
            min_separation: None,
            seed: DEFAULT_SEED,
        }
    }
}

impl Parameters {
    /// Reject parameter sets the integrator cannot run with
    pub fn validate(&self) -> SimResult<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimError::InvalidArgument(format!("dt must be positive and finite, got {}", self.dt)));
        }
        if !(self.g.is_finite() && self.g > 0.0) {
            return Err(SimError::InvalidArgument(format!("G must be positive and finite, got {}", self.g)));
        }
        if !(self.eps.is_finite() && self.eps >= 0.0) {
            return Err(SimError::InvalidArgument(format!("eps must be non-negative and finite, got {}", self.eps)));
        }
        if let Some(s) = self.min_separation {
            if !(s.is_finite() && s > 0.0) {
                return Err(SimError::InvalidArgument(format!("min_separation must be positive and finite, got {s}")));
            }
        }
        Ok(())
    }
}
