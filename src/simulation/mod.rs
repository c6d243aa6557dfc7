pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod sampling;
pub mod cluster;
pub mod scenario;
