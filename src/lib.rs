pub mod simulation;
pub mod configuration;
pub mod benchmark;
pub mod error;

pub use simulation::states::{Body, NVec2, StarSnapshot};
pub use simulation::forces::{ForcePass, SoftenedGravity, accumulate_forces};
pub use simulation::integrator::symplectic_euler_step;
pub use simulation::sampling::ClusterSampler;
pub use simulation::cluster::Cluster;
pub use simulation::params::Parameters;
pub use simulation::scenario::Scenario;

pub use configuration::config::{EngineConfig, ForcePassConfig, ParametersConfig, ClusterConfig, BodyConfig, ScenarioConfig};

pub use error::{SimError, SimResult};

pub use benchmark::benchmark::bench_step;
