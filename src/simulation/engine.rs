//! High-level runtime engine settings
//!
//! Selects how the force pass is scheduled when building and running a `Scenario`

use crate::configuration::config::{EngineConfig, ForcePassConfig};
use crate::simulation::forces::ForcePass;

#[derive(Debug, Clone, Default)]
pub struct Engine {
    pub force_pass: ForcePass, // direct or parallel
}

impl From<&EngineConfig> for Engine {
    fn from(cfg: &EngineConfig) -> Self {
        let force_pass = match cfg.force_pass {
            ForcePassConfig::Direct => ForcePass::Direct,
            ForcePassConfig::Parallel => ForcePass::Parallel,
        };
        Self { force_pass }
    }
}
