use approx::assert_relative_eq;

use orbitsim::presets::{earth_sun, EARTH_MASS, EARTH_SPEED, SUN_MASS};
use orbitsim::{Acceleration, NewtonianGravity, Rk4};
use orbitsim::{BodyId, BodySpec, Engine, NVec2, Parameters, PointMass, SimError, SingularityPolicy};
use orbitsim::{Scenario, ScenarioConfig, AU, DAY, G};

/// Parameters in units where G = 1
pub fn unit_params() -> Parameters {
    Parameters {
        g: 1.0,
        dt: 0.01,
        ..Parameters::default()
    }
}

/// Two bodies separated along the x axis, at rest
pub fn two_body(dist: f64, m1: f64, m2: f64) -> Vec<BodySpec> {
    vec![
        BodySpec::new("a", m1, NVec2::new(-dist / 2.0, 0.0), NVec2::zeros()),
        BodySpec::new("b", m2, NVec2::new(dist / 2.0, 0.0), NVec2::zeros()),
    ]
}

/// Three equal masses close enough that one step visibly couples them
pub fn tight_triple() -> Vec<BodySpec> {
    vec![
        BodySpec::new("p", 1.0, NVec2::new(0.0, 0.0), NVec2::new(0.0, 0.3)),
        BodySpec::new("q", 1.0, NVec2::new(1.0, 0.0), NVec2::new(0.0, -0.2)),
        BodySpec::new("r", 1.0, NVec2::new(0.4, 0.9), NVec2::new(-0.1, 0.0)),
    ]
}

fn point_masses(specs: &[BodySpec]) -> Vec<PointMass> {
    specs
        .iter()
        .map(|s| PointMass::new(s.position, s.velocity, s.mass))
        .collect()
}

fn state_of(engine: &Engine, name: &str) -> (NVec2, NVec2) {
    let id = engine.find(name).unwrap();
    let body = engine.body(id).unwrap();
    (body.position(), body.velocity())
}

// ==================================================================================
// Acceleration field tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let specs = vec![
        BodySpec::new("a", 3.0e24, NVec2::new(-AU, 0.0), NVec2::zeros()),
        BodySpec::new("b", 7.0e26, NVec2::new(0.3 * AU, 0.7 * AU), NVec2::zeros()),
    ];
    let bodies = point_masses(&specs);
    let gravity = NewtonianGravity::new(G, SingularityPolicy::Reject);

    let a1 = gravity.acceleration(bodies[0].x, BodyId::from(0), &bodies).unwrap();
    let a2 = gravity.acceleration(bodies[1].x, BodyId::from(1), &bodies).unwrap();

    let f1 = a1 * bodies[0].m;
    let net = f1 + a2 * bodies[1].m;

    assert!(net.norm() <= 1e-12 * f1.norm(), "Net force not zero: {:?}", net);
}

#[test]
fn gravity_points_toward_other_body() {
    let bodies = point_masses(&two_body(2.0, 1.0, 1.0));
    let gravity = NewtonianGravity::new(1.0, SingularityPolicy::Reject);

    let a1 = gravity.acceleration(bodies[0].x, BodyId::from(0), &bodies).unwrap();
    let dx = bodies[1].x - bodies[0].x;

    assert!(a1.dot(&dx) > 0.0, "Acceleration is not toward second body");
}

#[test]
fn gravity_inverse_square_law() {
    let near = point_masses(&two_body(1.0, 1.0, 1.0));
    let far = point_masses(&two_body(2.0, 1.0, 1.0));
    let gravity = NewtonianGravity::new(1.0, SingularityPolicy::Reject);

    let a_r = gravity.acceleration(near[0].x, BodyId::from(0), &near).unwrap();
    let a_2r = gravity.acceleration(far[0].x, BodyId::from(0), &far).unwrap();

    assert_relative_eq!(a_r.norm() / a_2r.norm(), 4.0, epsilon = 1e-12);
}

#[test]
fn identical_bodies_both_pull() {
    // two indistinguishable bodies stacked on each other, and a probe
    let stacked = PointMass::new(NVec2::zeros(), NVec2::zeros(), 2.0);
    let bodies = vec![stacked, stacked, PointMass::new(NVec2::new(1.0, 0.0), NVec2::zeros(), 1.0)];
    let gravity = NewtonianGravity::new(1.0, SingularityPolicy::Reject);

    let a = gravity.acceleration(bodies[2].x, BodyId::from(2), &bodies).unwrap();

    // each contributes G m / r^2 = 2 towards the origin
    assert_relative_eq!(a.x, -4.0, epsilon = 1e-12);
    assert_relative_eq!(a.y, 0.0);
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn rk4_uses_only_start_of_step_positions_of_others() {
    let bodies = point_masses(&two_body(1.0, 1.0, 1.0));
    let gravity = NewtonianGravity::new(1.0, SingularityPolicy::Reject);
    let rk4 = Rk4::new();

    let before = bodies.clone();
    let d0 = rk4.advance(BodyId::from(0), 0.1, &bodies, &gravity).unwrap();
    let d1 = rk4.advance(BodyId::from(1), 0.1, &bodies, &gravity).unwrap();

    assert_eq!(bodies, before);
    // symmetric pair: mirror-image deltas
    assert_relative_eq!(d0.dx.x, -d1.dx.x, epsilon = 1e-15);
    assert_relative_eq!(d0.dv.x, -d1.dv.x, epsilon = 1e-15);
    assert!(d0.dv.x > 0.0);
}

// ==================================================================================
// Engine tests
// ==================================================================================

#[test]
fn single_body_moves_in_a_straight_line() {
    for dt in [1.0, DAY, 1.0e7] {
        let x0 = NVec2::new(3.0e9, -2.0e9);
        let v0 = NVec2::new(1200.0, 35.0);
        let spec = BodySpec::new("lonely", EARTH_MASS, x0, v0);
        let mut engine = Engine::initialize(vec![spec], Parameters::default()).unwrap();

        for _ in 0..50 {
            engine.step(dt).unwrap();
        }

        let (x, v) = state_of(&engine, "lonely");
        let expected = x0 + v0 * (50.0 * dt);
        assert_eq!(v, v0);
        assert_relative_eq!(x.x, expected.x, max_relative = 1e-12);
        assert_relative_eq!(x.y, expected.y, max_relative = 1e-12);
    }
}

#[test]
fn energy_conserved_over_one_orbit() {
    // low-mass probe on a circular orbit of radius 1 around M = 1
    let specs = vec![
        BodySpec::new("central", 1.0, NVec2::zeros(), NVec2::zeros()),
        BodySpec::new("probe", 1.0e-6, NVec2::new(-1.0, 0.0), NVec2::new(0.0, 1.0)),
    ];
    let period = 2.0 * std::f64::consts::PI;
    let steps = 1000;
    let params = Parameters {
        dt: period / steps as f64,
        ..unit_params()
    };
    let mut engine = Engine::initialize(specs, params).unwrap();

    let e0 = engine.total_energy();
    engine.run(steps).unwrap();
    let e1 = engine.total_energy();

    let drift = ((e1 - e0) / e0).abs();
    assert!(drift < 1e-3, "Energy drift too large: {}", drift);
}

#[test]
fn earth_returns_after_one_year() {
    let mut engine = Engine::initialize(earth_sun(), Parameters::default()).unwrap();
    let earth = engine.find("Earth").unwrap();
    let start = engine.body(earth).unwrap().position();
    assert_eq!(start, NVec2::new(-AU, 0.0));
    assert_eq!(engine.body(earth).unwrap().velocity(), NVec2::new(0.0, EARTH_SPEED));

    engine.run(365).unwrap();

    let end = engine.body(earth).unwrap().position();
    let miss = (end - start).norm();
    assert!(miss < 0.03 * AU, "Earth missed its start by {} AU", miss / AU);
    assert_relative_eq!(end.norm(), AU, max_relative = 0.01);
}

#[test]
fn history_cap_keeps_latest_positions_in_order() {
    let params = Parameters {
        history_cap: Some(1400),
        ..Parameters::default()
    };
    let mut engine = Engine::initialize(earth_sun(), params).unwrap();
    let earth = engine.find("Earth").unwrap();

    let mut seen = Vec::new();
    for _ in 0..1500 {
        engine.advance().unwrap();
        seen.push(engine.body(earth).unwrap().position());
    }

    let trail = engine.body(earth).unwrap().trajectory();
    assert_eq!(trail.len(), 1400);
    assert!(trail.iter().eq(seen[100..].iter()));
    assert_eq!(engine.body(earth).unwrap().velocity_history().len(), 1400);
}

#[test]
fn unbounded_history_keeps_every_step() {
    let mut engine = Engine::initialize(earth_sun(), Parameters::batch()).unwrap();
    engine.run(1500).unwrap();
    for body in engine.bodies() {
        assert_eq!(body.trajectory().len(), 1500);
    }
}

#[test]
fn step_is_independent_of_body_order() {
    let forward = tight_triple();
    let mut reversed = tight_triple();
    reversed.reverse();

    let mut a = Engine::initialize(forward, unit_params()).unwrap();
    let mut b = Engine::initialize(reversed, unit_params()).unwrap();
    for _ in 0..5 {
        a.step(0.1).unwrap();
        b.step(0.1).unwrap();
    }

    for name in ["p", "q", "r"] {
        let (xa, va) = state_of(&a, name);
        let (xb, vb) = state_of(&b, name);
        assert!((xa - xb).norm() < 1e-12, "{name}: {xa:?} vs {xb:?}");
        assert!((va - vb).norm() < 1e-12, "{name}: {va:?} vs {vb:?}");
    }
}

#[test]
fn naive_sequential_update_depends_on_order() {
    // update each body in place as soon as its delta is known
    fn naive_step(bodies: &mut [PointMass], dt: f64) {
        let gravity = NewtonianGravity::new(1.0, SingularityPolicy::Reject);
        for i in 0..bodies.len() {
            let d = Rk4::new().advance(BodyId::from(i), dt, bodies, &gravity).unwrap();
            bodies[i].x += d.dx;
            bodies[i].v += d.dv;
        }
    }

    let mut forward = point_masses(&tight_triple());
    let mut reversed = forward.clone();
    reversed.reverse();

    naive_step(&mut forward, 0.1);
    naive_step(&mut reversed, 0.1);

    // body "p" is first in one order and last in the other
    let gap = (forward[0].x - reversed[2].x).norm();
    assert!(gap > 1e-6, "sequential update unexpectedly order-free: {gap}");
}

#[test]
fn singularity_rejects_step_without_side_effects() {
    let specs = vec![
        BodySpec::new("a", 1.0, NVec2::new(5.0, 5.0), NVec2::new(1.0, 0.0)),
        BodySpec::new("b", 1.0, NVec2::new(5.0, 5.0), NVec2::new(0.0, 1.0)),
    ];
    let mut engine = Engine::initialize(specs, unit_params()).unwrap();

    let err = engine.step(0.1).unwrap_err();
    assert_eq!(
        err,
        SimError::Singularity {
            body: BodyId::from(0),
            other: BodyId::from(1)
        }
    );

    assert_eq!(engine.steps(), 0);
    assert_eq!(engine.elapsed(), 0.0);
    for body in engine.bodies() {
        assert_eq!(body.position(), NVec2::new(5.0, 5.0));
        assert!(body.trajectory().is_empty());
    }
}

#[test]
fn clamp_lets_coincident_bodies_pass() {
    let specs = vec![
        BodySpec::new("a", 1.0, NVec2::new(5.0, 5.0), NVec2::new(1.0, 0.0)),
        BodySpec::new("b", 1.0, NVec2::new(5.0, 5.0), NVec2::new(-1.0, 0.0)),
    ];
    let params = Parameters {
        singularity: SingularityPolicy::Clamp { min_separation: 0.1 },
        ..unit_params()
    };
    let mut engine = Engine::initialize(specs, params).unwrap();
    engine.run(100).unwrap();

    for body in engine.bodies() {
        let x = body.position();
        assert!(x.x.is_finite() && x.y.is_finite());
    }
    // equal and opposite pulls keep total momentum at zero
    assert!(engine.total_momentum().norm() < 1e-9);
}

#[test]
fn initialize_rejects_bad_input() {
    let none: Vec<BodySpec> = Vec::new();
    assert_eq!(Engine::initialize(none, Parameters::default()).unwrap_err(), SimError::NoBodies);

    for mass in [0.0, -1.0, f64::NAN] {
        let specs = vec![
            BodySpec::new("ok", 1.0, NVec2::zeros(), NVec2::zeros()),
            BodySpec::new("bad", mass, NVec2::new(1.0, 0.0), NVec2::zeros()),
        ];
        match Engine::initialize(specs, Parameters::default()) {
            Err(SimError::NonPositiveMass { name, .. }) => assert_eq!(name, "bad"),
            other => panic!("expected NonPositiveMass, got {:?}", other),
        }
    }

    let params = Parameters {
        g: -1.0,
        ..Parameters::default()
    };
    assert!(matches!(
        Engine::initialize(earth_sun(), params),
        Err(SimError::InvalidParameter(_))
    ));
}

#[test]
fn snapshot_reports_derived_quantities() {
    let mut engine = Engine::initialize(earth_sun(), Parameters::default()).unwrap();
    engine.run(10).unwrap();

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.steps, 10);
    assert_eq!(snapshot.t, 10.0 * DAY);

    let names: Vec<_> = snapshot.bodies.iter().map(|b| b.name).collect();
    assert_eq!(names, ["Sun", "Earth"]);

    for b in &snapshot.bodies {
        assert_relative_eq!(b.kinetic_energy, 0.5 * b.mass * b.velocity.norm_squared(), max_relative = 1e-12);
        assert_relative_eq!(b.momentum_component, b.mass * b.velocity.y, max_relative = 1e-12);
        assert_eq!(b.trajectory.len(), 10);
        assert_eq!(b.trajectory.last(), Some(&b.position));
    }
    assert_eq!(snapshot.bodies[0].mass, SUN_MASS);
}

// ==================================================================================
// Scenario tests
// ==================================================================================

#[test]
fn bundled_scenarios_build() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios");
    for file in ["earth_sun.yaml", "inner_planets.yaml", "close_pass.yaml"] {
        let reader = std::fs::File::open(dir.join(file)).unwrap();
        let cfg = ScenarioConfig::from_reader(reader).unwrap();
        let mut scenario = Scenario::build_scenario(cfg).unwrap();
        scenario.engine.run(scenario.steps.min(50)).unwrap();
    }
}

#[test]
fn close_pass_stays_finite_through_the_encounter() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/close_pass.yaml");
    let cfg = ScenarioConfig::from_reader(std::fs::File::open(path).unwrap()).unwrap();
    let Scenario { mut engine, steps } = Scenario::build_scenario(cfg).unwrap();
    assert!(matches!(
        engine.parameters().singularity,
        SingularityPolicy::Clamp { .. }
    ));

    // the pair meets near the origin well before the last step
    let mut closest = f64::INFINITY;
    for _ in 0..steps {
        engine.advance().unwrap();
        let (xa, _) = state_of(&engine, "A");
        let (xb, _) = state_of(&engine, "B");
        closest = closest.min((xb - xa).norm());
    }

    assert_eq!(engine.steps(), steps);
    assert!(closest < 0.5, "bodies never came close: {closest}");
    for body in engine.bodies() {
        let (x, v) = (body.position(), body.velocity());
        assert!(x.iter().chain(v.iter()).all(|c| c.is_finite()), "{}: {x:?} {v:?}", body.name());
    }
    assert!(engine.total_energy().is_finite());
    // equal masses released at rest: the momentum stays balanced
    assert!(engine.total_momentum().norm() < 1e-9);
}
