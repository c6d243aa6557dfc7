//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - the cluster at t = 0, either sampled from the seeded generator or taken
//!   from the explicit body list

use log::info;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::error::{SimError, SimResult};
use crate::simulation::cluster::Cluster;
use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2};

/// The runtime bundle a driver steps and polls
#[derive(Debug, Clone)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub cluster: Cluster,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> SimResult<Self> {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            dt: p_cfg.dt,
            g: p_cfg.g,
            eps: p_cfg.eps,
            min_separation: p_cfg.min_separation,
            seed: p_cfg.seed,
        };
        parameters.validate()?;

        // Engine (runtime) from EngineConfig
        let engine = Engine::from(&cfg.engine);

        let cluster = if cfg.bodies.is_empty() {
            // Random cluster from a generator owned by this build only
            let stars = usize::try_from(cfg.cluster.stars).map_err(|_| {
                SimError::InvalidArgument(format!("star count must be non-negative, got {}", cfg.cluster.stars))
            })?;
            let mut rng = ChaChaRng::seed_from_u64(parameters.seed);
            Cluster::generate_with(stars, cfg.cluster.initial_velocity, &parameters, &mut rng)?
        } else {
            // Bodies: map `BodyConfig` -> runtime `Body` using nalgebra vectors
            let bodies = cfg
                .bodies
                .iter()
                .map(|bc: &BodyConfig| {
                    Body::new(
                        NVec2::new(bc.x[0], bc.x[1]),
                        NVec2::new(bc.v[0], bc.v[1]),
                        bc.m,
                        bc.color.unwrap_or(bc.m),
                    )
                })
                .collect::<SimResult<Vec<_>>>()?;
            Cluster::from_bodies(bodies, &parameters)?
        };
        let cluster = cluster.with_force_pass(engine.force_pass);

        info!(
            "built scenario: {} bodies, dt = {:e} s, force pass {:?}, seed {}",
            cluster.len(),
            parameters.dt,
            engine.force_pass,
            parameters.seed
        );

        Ok(Self {
            engine,
            parameters,
            cluster,
        })
    }
}
