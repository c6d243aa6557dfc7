//! Force contributors for the cluster engine
//!
//! Defines the softened Newtonian pair force and the O(n^2) force pass that
//! fills every body's force buffer, either sequentially or on the rayon pool

use rayon::prelude::*;

use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2};

/// How the all-pairs force pass is scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForcePass {
    #[default]
    Direct, // one thread, plain double loop
    Parallel, // one rayon task per target body
}

/// 2D Newtonian gravity with softening
///
/// The magnitude is softened, `F = -G m1 m2 / (r^2 + eps^2)`, but the direction
/// is normalized by the bare separation `r`. Two bodies at exactly the same
/// position therefore give `0 / 0 = NaN` unless `min_separation` is set, in
/// which case `r` is floored and a coincident pair contributes zero force
#[derive(Debug, Clone)]
pub struct SoftenedGravity {
    pub g: f64, // gravitational constant
    pub eps: f64, // softening length
    pub min_separation: Option<f64>, // floor for the direction denominator
}

impl Default for SoftenedGravity {
    fn default() -> Self {
        Self::from_parameters(&Parameters::default())
    }
}

impl SoftenedGravity {
    pub fn from_parameters(params: &Parameters) -> Self {
        Self {
            g: params.g,
            eps: params.eps,
            min_separation: params.min_separation,
        }
    }

    /// Force exerted on `target` by `source`
    pub fn force_on(&self, target: &Body, source: &Body) -> NVec2 {
        // d points from source to target, so a negative F pulls target back along -d
        let dx = target.position.x - source.position.x;
        let dy = target.position.y - source.position.y;
        let r2 = dx * dx + dy * dy;
        let mut r = r2.sqrt();
        if let Some(floor) = self.min_separation {
            r = r.max(floor);
        }

        let f = -self.g * target.mass() * source.mass() / (r2 + self.eps * self.eps);

        NVec2::new(f * dx / r, f * dy / r)
    }
}

/// Accumulate every pairwise force into `bodies`.
/// Forces must already be reset; no body is integrated here
pub fn accumulate_forces(gravity: &SoftenedGravity, bodies: &mut [Body], pass: ForcePass) {
    match pass {
        ForcePass::Direct => accumulate_direct(gravity, bodies),
        ForcePass::Parallel => accumulate_parallel(gravity, bodies),
    }
}

fn accumulate_direct(gravity: &SoftenedGravity, bodies: &mut [Body]) {
    let n = bodies.len();

    // Every ordered pair (i, j), i != j. The pair is visited twice, once per target
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let (target, source) = pair_mut(bodies, i, j);
            target.accumulate_force_from(source, gravity);
        }
    }
}

fn accumulate_parallel(gravity: &SoftenedGravity, bodies: &mut [Body]) {
    // Each task reads the whole (frozen) cluster and sums sources in ascending j,
    // the same order as the direct pass, so both modes agree bit for bit
    let frozen: &[Body] = bodies;
    let totals: Vec<NVec2> = (0..frozen.len())
        .into_par_iter()
        .map(|i| {
            let target = &frozen[i];
            let mut total = target.force();
            for (j, source) in frozen.iter().enumerate() {
                if i != j {
                    total += gravity.force_on(target, source);
                }
            }
            total
        })
        .collect();

    for (body, total) in bodies.iter_mut().zip(totals) {
        body.set_force(total);
    }
}

/// Split out a mutable target and a shared source from the same slice
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &Body) {
    if i < j {
        let (lo, hi) = bodies.split_at_mut(j);
        (&mut lo[i], &hi[0])
    } else {
        let (lo, hi) = bodies.split_at_mut(i);
        (&mut hi[0], &lo[j])
    }
}
