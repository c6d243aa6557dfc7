//! Stochastic initial conditions for a star cluster
//!
//! Positions are isotropic Gaussian, masses follow a Gamma distribution (long
//! right tail: few heavy stars, many light ones), and colors are a bipolar
//! mass-derived signal with Gaussian jitter for a diverging color map.
//!
//! All randomness comes from the generator passed in, so a fixed seed
//! reproduces the same cluster

use rand::Rng;
use rand_distr::{Bernoulli, Distribution, Gamma, StandardNormal};

use crate::error::{SimError, SimResult};
use crate::simulation::params::{
    MASS_GAMMA_SCALE, MASS_SCALE, MASS_SHAPE, POSITION_SCALE, TANGENTIAL_SCALE,
};
use crate::simulation::states::{Body, NVec2};

pub struct ClusterSampler {
    mass: Gamma<f64>,
    flip: Bernoulli,
    tangential: bool, // seed a velocity perpendicular to the position
}

impl ClusterSampler {
    pub fn new(tangential: bool) -> SimResult<Self> {
        let mass = Gamma::new(MASS_SHAPE, MASS_GAMMA_SCALE)
            .map_err(|e| SimError::InvalidArgument(format!("mass distribution: {e}")))?;
        let flip = Bernoulli::new(0.5)
            .map_err(|e| SimError::InvalidArgument(format!("color sign distribution: {e}")))?;

        Ok(Self { mass, flip, tangential })
    }

    /// Draw one star. Draw order: x, y, mass, color sign, color jitter
    pub fn sample_body<R: Rng>(&self, rng: &mut R) -> SimResult<Body> {
        let x: f64 = StandardNormal.sample(rng);
        let y: f64 = StandardNormal.sample(rng);
        let position = NVec2::new(x, y) * POSITION_SCALE;

        // Rotate the position by -90 degrees; only a qualitative orbit seed
        let velocity = if self.tangential {
            NVec2::new(position.y, -position.x) * TANGENTIAL_SCALE
        } else {
            NVec2::zeros()
        };

        let mass = MASS_SCALE * self.mass.sample(rng);

        let mut color = mass;
        if self.flip.sample(rng) {
            color = -mass;
        }
        let jitter: f64 = StandardNormal.sample(rng);
        color += jitter;

        Body::new(position, velocity, mass, color)
    }

    pub fn sample_bodies<R: Rng>(&self, n: usize, rng: &mut R) -> SimResult<Vec<Body>> {
        (0..n).map(|_| self.sample_body(rng)).collect()
    }
}
