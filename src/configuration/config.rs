//! Configuration types for loading cluster scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – engine options (force pass scheduling)
//! - [`ParametersConfig`] – numerical parameters and physical constants
//! - [`ClusterConfig`]    – size and initial velocity mode of a random cluster
//! - [`BodyConfig`]       – optional explicit initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Every field has a default, so an empty document is the reference cluster
//! (50 stars, reference constants, seed 42).
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   force_pass: "direct"    # or "parallel"
//!
//! parameters:
//!   dt: 2.0e12              # fixed step size (s)
//!   G: 6.674e-11            # gravitational constant
//!   eps: 1.0e16             # softening length (m)
//!   min_separation: 1.0e10  # optional, omit to let coincident bodies produce NaN
//!   seed: 42                # deterministic seed
//!
//! cluster:
//!   stars: 50
//!   initial_velocity: true  # tangential velocity seed
//!
//! # optional: replaces the random cluster
//! bodies:
//!   - x: [ 0.0, 0.0 ]
//!     v: [ 0.0, 0.0 ]
//!     m: 1.0e30
//!   - x: [ 4.2e16, 0.0 ]
//!     v: [ 0.0, 0.0 ]
//!     m: 1.0e30
//!     color: -1.0e30
//! ```

use serde::Deserialize;

use crate::simulation::params::{DEFAULT_SEED, DT, G, SOFTENING};

/// Which force pass the engine runs
/// force_pass: "direct"` or `force_pass: "parallel"
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ForcePassConfig {
    #[default]
    #[serde(rename = "direct")] // Sequential double loop over ordered pairs
    Direct,

    #[serde(rename = "parallel")] // Per-target rayon tasks, same result as direct
    Parallel,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub force_pass: ForcePassConfig,
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub dt: f64, // time step size
    #[serde(rename = "G")]
    pub g: f64, // gravitational constant
    pub eps: f64, // softening - bounds the force magnitude at small separations
    pub min_separation: Option<f64>, // floor on the direction denominator
    pub seed: u64, // deterministic seed to make runs reproducable
}

impl Default for ParametersConfig {
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

/// Random cluster request. `stars` is signed so a bad file surfaces as a
/// validation error rather than a parse error
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ClusterConfig {
    pub stars: i64,
    pub initial_velocity: bool,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            stars: 50,
            initial_velocity: false,
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 2], // initial position (m)
    #[serde(default)]
    pub v: [f64; 2], // initial velocity (m/s)
    pub m: f64, // mass (kg)
    #[serde(default)]
    pub color: Option<f64>, // defaults to the mass
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub engine: EngineConfig, // Engine-level configuration
    pub parameters: ParametersConfig, // Global numerical and physical parameters
    pub cluster: ClusterConfig, // Random cluster, used when `bodies` is empty
    pub bodies: Vec<BodyConfig>, // Explicit initial state, overrides `cluster`
}
