//! The cluster: a fixed, ordered set of bodies evolved together
//!
//! A `Cluster` owns its bodies, the force law and the step size. Drivers call
//! [`Cluster::advance`] on their own cadence and read [`Cluster::snapshot`]
//! afterwards; nothing is held between calls

use log::{debug, warn};
use rand::Rng;

use crate::error::SimResult;
use crate::simulation::forces::{ForcePass, SoftenedGravity};
use crate::simulation::integrator::symplectic_euler_step;
use crate::simulation::params::Parameters;
use crate::simulation::sampling::ClusterSampler;
use crate::simulation::states::{Body, NVec2, StarSnapshot};

#[derive(Debug, Clone)]
pub struct Cluster {
    bodies: Vec<Body>, // fixed length for the cluster's lifetime
    gravity: SoftenedGravity,
    dt: f64, // step size
    force_pass: ForcePass,
    t: f64, // elapsed simulation time
    steps: u64,
    degenerate: bool, // a step has already produced non-finite state
}

impl Cluster {
    /// Build a random cluster of `n` stars with the reference parameters
    pub fn generate<R: Rng>(n: usize, use_initial_tangential_velocity: bool, rng: &mut R) -> SimResult<Self> {
        Self::generate_with(n, use_initial_tangential_velocity, &Parameters::default(), rng)
    }

    /// Build a random cluster of `n` stars using `params` for the dynamics
    pub fn generate_with<R: Rng>(
        n: usize,
        use_initial_tangential_velocity: bool,
        params: &Parameters,
        rng: &mut R,
    ) -> SimResult<Self> {
        let sampler = ClusterSampler::new(use_initial_tangential_velocity)?;
        let bodies = sampler.sample_bodies(n, rng)?;
        Self::from_bodies(bodies, params)
    }

    /// Wrap an explicit set of bodies
    pub fn from_bodies(bodies: Vec<Body>, params: &Parameters) -> SimResult<Self> {
        params.validate()?;

        Ok(Self {
            bodies,
            gravity: SoftenedGravity::from_parameters(params),
            dt: params.dt,
            force_pass: ForcePass::default(),
            t: 0.0,
            steps: 0,
            degenerate: false,
        })
    }

    pub fn with_force_pass(mut self, force_pass: ForcePass) -> Self {
        self.force_pass = force_pass;
        self
    }

    /// Run one full step: reset, accumulate, integrate
    pub fn advance(&mut self) {
        if self.bodies.is_empty() {
            return;
        }

        symplectic_euler_step(&mut self.bodies, &self.gravity, self.dt, self.force_pass);
        self.t += self.dt;
        self.steps += 1;

        if !self.degenerate && self.bodies.iter().any(|b| !b.is_finite()) {
            self.degenerate = true;
            warn!(
                "step {}: non-finite body state, coincident bodies without a minimum separation?",
                self.steps
            );
        }
        debug!("step {} done, t = {:e} s", self.steps, self.t);
    }

    /// Per-body `(x, y, radius, color)` in body order
    pub fn snapshot(&self) -> Vec<StarSnapshot> {
        self.bodies.iter().map(Body::snapshot).collect()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn gravity(&self) -> &SoftenedGravity {
        &self.gravity
    }

    pub fn force_pass(&self) -> ForcePass {
        self.force_pass
    }

    pub fn elapsed(&self) -> f64 {
        self.t
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(Body::mass).sum()
    }

    pub fn total_momentum(&self) -> NVec2 {
        self.bodies.iter().fold(NVec2::zeros(), |p, b| p + b.momentum())
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    /// Mass-weighted mean position, `None` for an empty cluster
    pub fn center_of_mass(&self) -> Option<NVec2> {
        if self.bodies.is_empty() {
            return None;
        }
        let weighted = self.bodies.iter().fold(NVec2::zeros(), |acc, b| acc + b.position * b.mass());
        Some(weighted / self.total_mass())
    }
}
