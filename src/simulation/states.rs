//! Core state types for the cluster simulation
//!
//! Defines the 2D point mass `Body` (using `NVec2`) together with the
//! per-step rendering projection `StarSnapshot`.
//!
//! A body owns its kinematic state (position, velocity, accumulated force)
//! and two immutable visual hints (radius, color) fixed at creation

use nalgebra::Vector2;

use crate::error::{SimError, SimResult};
use crate::simulation::forces::SoftenedGravity;
use crate::simulation::params::RADIUS_MASS_DIVISOR;

pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone)]
pub struct Body {
    pub position: NVec2, // m
    pub velocity: NVec2, // m/s
    force: NVec2, // N, only meaningful within one step
    mass: f64, // kg
    radius: f64, // render size, derived from mass
    color: f64, // signed render hint
}

impl Body {
    /// Create a body at rest force-wise. Fails unless `mass` is positive and finite
    pub fn new(position: NVec2, velocity: NVec2, mass: f64, color: f64) -> SimResult<Self> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimError::InvalidArgument(format!("body mass must be positive and finite, got {mass}")));
        }

        Ok(Self {
            position,
            velocity,
            force: NVec2::zeros(),
            mass,
            radius: mass / RADIUS_MASS_DIVISOR,
            color,
        })
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn color(&self) -> f64 {
        self.color
    }

    /// Force accumulated so far in the current step
    pub fn force(&self) -> NVec2 {
        self.force
    }

    pub fn reset_force(&mut self) {
        self.force = NVec2::zeros();
    }

    /// Add the pull of `other` on this body. `other` must be a different body
    pub fn accumulate_force_from(&mut self, other: &Body, gravity: &SoftenedGravity) {
        let f = gravity.force_on(self, other);
        self.force += f;
    }

    /// Overwrite the accumulated force (used by the parallel force pass)
    pub(crate) fn set_force(&mut self, force: NVec2) {
        self.force = force;
    }

    /// Semi-implicit Euler: kick with the current force, then drift with the new velocity
    pub fn integrate(&mut self, dt: f64) {
        self.velocity += self.force / self.mass * dt;
        self.position += self.velocity * dt;
    }

    pub fn momentum(&self) -> NVec2 {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }

    /// False once a degenerate encounter has poisoned the state with NaN/inf
    pub fn is_finite(&self) -> bool {
        self.position.iter().chain(self.velocity.iter()).all(|c| c.is_finite())
    }

    pub fn snapshot(&self) -> StarSnapshot {
        StarSnapshot {
            x: self.position.x,
            y: self.position.y,
            radius: self.radius,
            color: self.color,
        }
    }
}

/// What a renderer needs to draw one star
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarSnapshot {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: f64,
}
