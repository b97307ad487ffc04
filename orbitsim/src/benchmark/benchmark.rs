use std::time::Instant;

use crate::simulation::engine::Engine;
use crate::simulation::error::SimResult;
use crate::simulation::forces::{Acceleration, NewtonianGravity};
use crate::simulation::params::{Parameters, SingularityPolicy, AU};
use crate::simulation::states::{BodyId, BodySpec, NVec2, PointMass};

/// Helper to build `n` deterministic bodies spread over a few AU
pub fn make_bodies(n: usize) -> Vec<BodySpec> {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            // deterministic positions, no rand needed
            let x = NVec2::new((i_f * 0.37).sin() * 5.0 * AU, (i_f * 0.13).cos() * 5.0 * AU);
            BodySpec::new(format!("b{i}"), 1.0e24, x, NVec2::zeros())
        })
        .collect()
}

/// Clamped: the generated cloud can put two bodies arbitrarily close
fn make_params() -> Parameters {
    Parameters {
        singularity: SingularityPolicy::Clamp { min_separation: 1.0e6 },
        ..Parameters::default()
    }
}

/// Time one full field evaluation (every body, one stage) for growing n
pub fn bench_gravity() {
    let ns = [100, 200, 400, 800, 1600];
    let gravity = NewtonianGravity::from_params(&make_params());

    println!("N,field_ms");
    for n in ns {
        let points: Vec<PointMass> = make_bodies(n)
            .into_iter()
            .map(|b| PointMass::new(b.position, b.velocity, b.mass))
            .collect();

        let t0 = Instant::now();
        let mut sink = NVec2::zeros();
        for (i, p) in points.iter().enumerate() {
            if let Ok(a) = gravity.acceleration(p.x, BodyId(i), &points) {
                sink += a;
            }
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0;

        println!("{n},{ms:.6}");
        log::debug!("N = {n}: field sum {sink:?}");
    }
}

/// Time `Engine::step` for growing n.
/// Output is CSV, paste it straight into a spreadsheet to graph
pub fn bench_step() -> SimResult<()> {
    println!("N,step_ms");

    for n in (100..=1600).step_by(100) {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 400 { 5 } else { 1 };

        let mut engine = Engine::initialize(make_bodies(n), make_params())?;

        // Warm-up
        engine.advance()?;

        let t0 = Instant::now();
        engine.run(steps)?;
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{n},{ms:.6}");
    }
    Ok(())
}
