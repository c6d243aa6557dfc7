//! Fixed-step time integrator for the cluster
//!
//! One step is three strict phases: reset every force, accumulate every pair,
//! integrate every body. A phase finishes for all bodies before the next starts

use super::forces::{accumulate_forces, ForcePass, SoftenedGravity};
use super::states::Body;

/// Advance `bodies` by one semi-implicit Euler step of length `dt`
pub fn symplectic_euler_step(bodies: &mut [Body], gravity: &SoftenedGravity, dt: f64, pass: ForcePass) {
    if bodies.is_empty() { // no bodies, nothing to do
        return;
    }

    // Reset: forces never carry over between steps
    for b in bodies.iter_mut() {
        b.reset_force();
    }

    // Accumulate: all O(n^2) contributions land before anyone moves
    accumulate_forces(gravity, bodies, pass);

    // Kick then drift: v_n+1 = v_n + dt F/m, x_n+1 = x_n + dt v_n+1
    for b in bodies.iter_mut() {
        b.integrate(dt);
    }
}
