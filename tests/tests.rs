use approx::assert_relative_eq;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use clustersim::simulation::params::{DT, G, MASS_SCALE, RADIUS_MASS_DIVISOR, SOFTENING, TANGENTIAL_SCALE};
use clustersim::{
    Body, Cluster, ForcePass, NVec2, Parameters, Scenario, ScenarioConfig, SimError, SoftenedGravity,
};

/// Body at rest at (x, y)
pub fn body_at(x: f64, y: f64, m: f64) -> Body {
    Body::new(NVec2::new(x, y), NVec2::zeros(), m, m).unwrap()
}

/// Two equal-mass stars on the x axis, `dist` apart, released from rest
pub fn two_body_cluster(dist: f64, m: f64) -> Cluster {
    let bodies = vec![body_at(0.0, 0.0, m), body_at(dist, 0.0, m)];
    Cluster::from_bodies(bodies, &Parameters::default()).unwrap()
}

/// Reference random cluster for a given seed
pub fn seeded_cluster(n: usize, tangential: bool, seed: u64) -> Cluster {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    Cluster::generate(n, tangential, &mut rng).unwrap()
}

pub fn scenario_from_yaml(yaml: &str) -> Result<Scenario, SimError> {
    let cfg: ScenarioConfig = serde_yaml::from_str(yaml).expect("test yaml must parse");
    Scenario::build_scenario(cfg)
}

// ==================================================================================
// Body tests
// ==================================================================================

#[test]
fn body_radius_derived_from_mass() {
    let b = body_at(0.0, 0.0, 3e30);
    assert_eq!(b.radius(), 3e30 / RADIUS_MASS_DIVISOR);
    assert_relative_eq!(b.radius(), 120.0, max_relative = 1e-12);
}

#[test]
fn body_rejects_non_positive_mass() {
    for m in [0.0, -1e30, f64::NAN, f64::INFINITY] {
        let res = Body::new(NVec2::zeros(), NVec2::zeros(), m, 0.0);
        assert!(
            matches!(res, Err(SimError::InvalidArgument(_))),
            "mass {} should be rejected",
            m
        );
    }
}

#[test]
fn reset_force_clears_accumulated_force() {
    let gravity = SoftenedGravity::default();
    let mut a = body_at(0.0, 0.0, 1e30);
    let b = body_at(1e16, 0.0, 1e30);

    a.accumulate_force_from(&b, &gravity);
    assert!(a.force().norm() > 0.0);

    a.reset_force();
    assert_eq!(a.force(), NVec2::zeros());
}

#[test]
fn force_matches_softened_formula() {
    let gravity = SoftenedGravity::default();
    let (m1, m2) = (2e30, 5e29);
    let a = body_at(0.0, 0.0, m1);
    let b = body_at(SOFTENING, 0.0, m2);

    // r == eps, so the magnitude is G m1 m2 / (2 eps^2)
    let f = gravity.force_on(&a, &b);
    let expected = G * m1 * m2 / (2.0 * SOFTENING * SOFTENING);

    assert_relative_eq!(f.x, expected, max_relative = 1e-12);
    assert_eq!(f.y, 0.0);
}

#[test]
fn force_accumulates_over_sources() {
    let gravity = SoftenedGravity::default();
    let mut a = body_at(0.0, 0.0, 1e30);
    let left = body_at(-3e16, 0.0, 1e30);
    let right = body_at(3e16, 0.0, 1e30);

    // Symmetric pulls cancel
    a.accumulate_force_from(&left, &gravity);
    a.accumulate_force_from(&right, &gravity);

    assert!(a.force().x.abs() < 1e-6 * gravity.force_on(&a, &right).x.abs());
}

#[test]
fn gravity_newton_third_law() {
    let gravity = SoftenedGravity::default();
    let a = body_at(1.3e16, -2.0e16, 3.1e30);
    let b = body_at(-4.0e16, 0.7e16, 0.4e30);

    let f_ab = gravity.force_on(&a, &b);
    let f_ba = gravity.force_on(&b, &a);
    let net = f_ab + f_ba;

    assert!(net.norm() < 1e-12 * f_ab.norm(), "Forces not opposite: {:?} vs {:?}", f_ab, f_ba);
}

#[test]
fn gravity_points_toward_other_body() {
    let gravity = SoftenedGravity::default();
    let a = body_at(0.0, 0.0, 1e30);
    let b = body_at(2e16, 3e16, 1e30);

    let f = gravity.force_on(&a, &b);
    let toward = b.position - a.position;

    assert!(f.dot(&toward) > 0.0, "Force is not toward second body");
}

#[test]
fn coincident_bodies_propagate_nan_by_default() {
    let gravity = SoftenedGravity::default();
    let a = body_at(1e16, 1e16, 1e30);
    let b = body_at(1e16, 1e16, 1e30);

    let f = gravity.force_on(&a, &b);
    assert!(f.x.is_nan() && f.y.is_nan());
}

#[test]
fn coincident_bodies_with_min_separation_feel_nothing() {
    let gravity = SoftenedGravity {
        min_separation: Some(1e10),
        ..SoftenedGravity::default()
    };
    let a = body_at(1e16, 1e16, 1e30);
    let b = body_at(1e16, 1e16, 1e30);

    assert_eq!(gravity.force_on(&a, &b), NVec2::zeros());
}

#[test]
fn min_separation_leaves_distant_pairs_alone() {
    let plain = SoftenedGravity::default();
    let floored = SoftenedGravity {
        min_separation: Some(1e10),
        ..SoftenedGravity::default()
    };
    let a = body_at(0.0, 0.0, 1e30);
    let b = body_at(4e16, 1e16, 2e30);

    assert_eq!(plain.force_on(&a, &b), floored.force_on(&a, &b));
}

#[test]
fn integrate_is_semi_implicit() {
    let gravity = SoftenedGravity::default();
    let mut a = body_at(0.0, 0.0, 1e30);
    let b = body_at(4.2e16, 0.0, 1e30);
    a.velocity = NVec2::new(0.0, 1e3);

    a.accumulate_force_from(&b, &gravity);
    let f = a.force();
    let v_expected = NVec2::new(0.0, 1e3) + f / a.mass() * DT;

    a.integrate(DT);

    assert_relative_eq!(a.velocity.x, v_expected.x, max_relative = 1e-12);
    assert_relative_eq!(a.velocity.y, v_expected.y, max_relative = 1e-12);
    // Drift uses the velocity that was just updated
    assert_relative_eq!(a.position.x, v_expected.x * DT, max_relative = 1e-12);
    assert_relative_eq!(a.position.y, v_expected.y * DT, max_relative = 1e-12);
}

// ==================================================================================
// Cluster step tests
// ==================================================================================

#[test]
fn two_body_step_attracts_symmetrically() {
    let mut cluster = two_body_cluster(4.2e16, 1e30);
    cluster.advance();

    let v0 = cluster.bodies()[0].velocity;
    let v1 = cluster.bodies()[1].velocity;

    assert!(v0.x > 0.0, "body 0 should move toward body 1");
    assert!(v1.x < 0.0, "body 1 should move toward body 0");
    assert_relative_eq!(v0.x.abs(), v1.x.abs(), max_relative = 1e-12);
    assert_eq!(v0.y, 0.0);
    assert_eq!(cluster.steps(), 1);
    assert_eq!(cluster.elapsed(), DT);
}

#[test]
fn momentum_is_conserved_over_a_step() {
    let mut cluster = seeded_cluster(60, true, 11);
    let before: Vec<NVec2> = cluster.bodies().iter().map(|b| b.momentum()).collect();
    let p_before = cluster.total_momentum();

    cluster.advance();

    // Scale of the exchanged momentum, so the check is relative
    let exchanged: f64 = cluster
        .bodies()
        .iter()
        .zip(&before)
        .map(|(b, p0)| (b.momentum() - p0).norm())
        .sum();
    let drift = (cluster.total_momentum() - p_before).norm();

    assert!(exchanged > 0.0);
    assert!(drift <= 1e-10 * exchanged, "momentum drift {} vs exchanged {}", drift, exchanged);
}

#[test]
fn snapshot_order_is_stable_across_steps() {
    let mut cluster = seeded_cluster(25, false, 3);
    let initial = cluster.snapshot();

    for _ in 0..5 {
        cluster.advance();
        let snap = cluster.snapshot();

        assert_eq!(snap.len(), initial.len());
        for (s, s0) in snap.iter().zip(&initial) {
            assert_eq!(s.radius, s0.radius);
            assert_eq!(s.color, s0.color);
        }
    }

    // Positions in the snapshot track the bodies, in order
    for (s, b) in cluster.snapshot().iter().zip(cluster.bodies()) {
        assert_eq!((s.x, s.y), (b.position.x, b.position.y));
    }
}

#[test]
fn empty_cluster_is_a_no_op() {
    let mut cluster = seeded_cluster(0, true, 1);
    assert!(cluster.is_empty());

    for _ in 0..3 {
        cluster.advance();
        assert!(cluster.snapshot().is_empty());
    }
    assert_eq!(cluster.steps(), 0);
    assert_eq!(cluster.center_of_mass(), None);
}

#[test]
fn single_body_drifts_freely() {
    let b = Body::new(NVec2::zeros(), NVec2::new(1.0, -2.0), 1e30, 0.0).unwrap();
    let mut cluster = Cluster::from_bodies(vec![b], &Parameters::default()).unwrap();

    cluster.advance();

    let moved = &cluster.bodies()[0];
    assert_eq!(moved.velocity, NVec2::new(1.0, -2.0));
    assert_eq!(moved.position, NVec2::new(DT, -2.0 * DT));
}

#[test]
fn parallel_pass_matches_direct_pass() {
    let mut direct = seeded_cluster(80, true, 5);
    let mut parallel = direct.clone().with_force_pass(ForcePass::Parallel);
    assert_eq!(parallel.force_pass(), ForcePass::Parallel);

    for _ in 0..4 {
        direct.advance();
        parallel.advance();
    }

    assert_eq!(direct.snapshot(), parallel.snapshot());
}

#[test]
fn coincident_pair_poisons_the_cluster_by_default() {
    let bodies = vec![body_at(1e16, 0.0, 1e30), body_at(1e16, 0.0, 1e30)];
    let mut cluster = Cluster::from_bodies(bodies, &Parameters::default()).unwrap();

    cluster.advance();

    assert!(cluster.bodies().iter().all(|b| !b.is_finite()));
}

#[test]
fn coincident_pair_stays_put_with_min_separation() {
    let params = Parameters {
        min_separation: Some(1e10),
        ..Parameters::default()
    };
    let bodies = vec![body_at(1e16, 0.0, 1e30), body_at(1e16, 0.0, 1e30)];
    let mut cluster = Cluster::from_bodies(bodies, &params).unwrap();

    cluster.advance();

    for b in cluster.bodies() {
        assert!(b.is_finite());
        assert_eq!(b.position, NVec2::new(1e16, 0.0));
    }
}

#[test]
fn cluster_rejects_bad_parameters() {
    let bad = [
        Parameters { dt: 0.0, ..Parameters::default() },
        Parameters { dt: f64::NAN, ..Parameters::default() },
        Parameters { g: -1.0, ..Parameters::default() },
        Parameters { eps: -1.0, ..Parameters::default() },
        Parameters { min_separation: Some(0.0), ..Parameters::default() },
    ];
    for p in bad {
        assert!(
            matches!(Cluster::from_bodies(Vec::new(), &p), Err(SimError::InvalidArgument(_))),
            "{:?} should be rejected",
            p
        );
    }
}

// ==================================================================================
// Initialization tests
// ==================================================================================

#[test]
fn generated_masses_are_positive() {
    let cluster = seeded_cluster(500, false, 42);
    assert_eq!(cluster.len(), 500);
    assert!(cluster.bodies().iter().all(|b| b.mass() > 0.0));
}

#[test]
fn generated_masses_follow_gamma_mean() {
    let cluster = seeded_cluster(4000, false, 42);

    // Gamma(1.5, 1) has mean 1.5
    let mean = cluster.total_mass() / cluster.len() as f64 / MASS_SCALE;
    assert!((mean - 1.5).abs() < 0.1, "Mean {} should be close to 1.5", mean);
}

#[test]
fn generated_colors_are_bipolar_mass() {
    let cluster = seeded_cluster(200, false, 9);
    let mut negative = 0;

    for b in cluster.bodies() {
        // Unit jitter is far below the resolution of a ~1e30 mass
        assert_relative_eq!(b.color().abs(), b.mass(), max_relative = 1e-12);
        if b.color() < 0.0 {
            negative += 1;
        }
    }

    assert!(negative > 60 && negative < 140, "{} negative colors out of 200", negative);
}

#[test]
fn tangential_velocity_is_perpendicular() {
    let cluster = seeded_cluster(50, true, 2);

    for b in cluster.bodies() {
        let expected = NVec2::new(b.position.y, -b.position.x) * TANGENTIAL_SCALE;
        assert_eq!(b.velocity, expected);
        assert!(b.velocity.dot(&b.position).abs() <= 1e-12 * b.velocity.norm() * b.position.norm());
    }
}

#[test]
fn without_flag_bodies_start_at_rest() {
    let cluster = seeded_cluster(50, false, 2);
    assert!(cluster.bodies().iter().all(|b| b.velocity == NVec2::zeros()));
}

#[test]
fn same_seed_same_cluster() {
    let a = seeded_cluster(40, true, 1234);
    let b = seeded_cluster(40, true, 1234);
    let c = seeded_cluster(40, true, 4321);

    assert_eq!(a.snapshot(), b.snapshot());
    assert_ne!(a.snapshot(), c.snapshot());
}

// ==================================================================================
// Scenario tests
// ==================================================================================

#[test]
fn empty_scenario_is_reference_cluster() {
    let scenario = scenario_from_yaml("{}").unwrap();

    assert_eq!(scenario.cluster.len(), 50);
    assert_eq!(scenario.parameters.dt, DT);
    assert_eq!(scenario.cluster.gravity().g, G);
    assert_eq!(scenario.cluster.force_pass(), ForcePass::Direct);

    // Same seed through the scenario layer gives the same cluster
    assert_eq!(scenario.cluster.snapshot(), seeded_cluster(50, false, 42).snapshot());
}

#[test]
fn scenario_rejects_negative_star_count() {
    let res = scenario_from_yaml("cluster:\n  stars: -3\n");
    assert!(matches!(res, Err(SimError::InvalidArgument(_))));
}

#[test]
fn scenario_accepts_zero_stars() {
    let scenario = scenario_from_yaml("cluster:\n  stars: 0\n").unwrap();
    assert!(scenario.cluster.is_empty());
}

#[test]
fn scenario_with_explicit_bodies() {
    let yaml = r#"
engine:
  force_pass: "parallel"
bodies:
  - x: [ 0.0, 0.0 ]
    m: 1.0e30
  - x: [ 4.2e16, 0.0 ]
    v: [ 0.0, 5.0 ]
    m: 2.0e30
    color: -7.0
"#;
    let scenario = scenario_from_yaml(yaml).unwrap();
    let bodies = scenario.cluster.bodies();

    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0].color(), 1.0e30);
    assert_eq!(bodies[1].color(), -7.0);
    assert_eq!(bodies[1].velocity, NVec2::new(0.0, 5.0));
    assert_eq!(scenario.cluster.force_pass(), ForcePass::Parallel);
}

#[test]
fn scenario_rejects_massless_body() {
    let yaml = "bodies:\n  - x: [ 0.0, 0.0 ]\n    m: 0.0\n";
    assert!(matches!(scenario_from_yaml(yaml), Err(SimError::InvalidArgument(_))));
}

#[test]
fn scenario_rejects_bad_step_size() {
    let yaml = "parameters:\n  dt: -1.0\n";
    assert!(matches!(scenario_from_yaml(yaml), Err(SimError::InvalidArgument(_))));
}
