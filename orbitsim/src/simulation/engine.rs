//! The N-body engine
//!
//! Owns the ordered set of bodies and is the only way to mutate them.
//! One `step` is two-phase:
//! - compute: every body's RK4 delta against one start-of-step snapshot
//! - commit: apply all deltas, push histories, refresh derived quantities
//!
//! Nothing is written until every delta has been computed and checked, so a
//! step is independent of body order and a failing step leaves no trace

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::error::{SimError, SimResult};
use super::forces::{Acceleration, NewtonianGravity};
use super::integrator::{Delta, Rk4};
use super::params::Parameters;
use super::states::{Body, BodyId, BodySpec, History, NVec2, PointMass};

#[derive(Debug, Clone)]
pub struct Engine {
    bodies: Vec<Body>,
    gravity: NewtonianGravity,
    integrator: Rk4,
    parameters: Parameters,
    t: f64, // elapsed simulated time
    steps: u64,
}

/// Read-only view of one body after a committed step
#[derive(Debug, Clone, Copy)]
pub struct BodyState<'a> {
    pub id: BodyId,
    pub name: &'a str,
    pub position: NVec2,
    pub velocity: NVec2,
    pub mass: f64,
    pub kinetic_energy: f64,
    pub momentum_component: f64,
    pub color: [u8; 3],
    pub visibility_threshold: f64,
    pub trajectory: &'a History<NVec2>,
}

/// State of every body, in initialisation order, plus the clock
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub t: f64,
    pub steps: u64,
    pub bodies: Vec<BodyState<'a>>,
}

impl Engine {
    /// Build the owned body set. Fails on an empty list, any mass that is
    /// not a positive finite number, or invalid parameters
    pub fn initialize<I>(specs: I, parameters: Parameters) -> SimResult<Self>
    where
        I: IntoIterator<Item = BodySpec>,
    {
        parameters.validate()?;

        let cap = parameters.history_cap;
        let bodies = specs
            .into_iter()
            .map(|spec| {
                if !(spec.mass.is_finite() && spec.mass > 0.0) {
                    return Err(SimError::NonPositiveMass {
                        name: spec.name,
                        mass: spec.mass,
                    });
                }
                if !spec.position.iter().chain(spec.velocity.iter()).all(|c| c.is_finite()) {
                    return Err(SimError::InvalidParameter(format!(
                        "body `{}` has a non-finite initial state",
                        spec.name
                    )));
                }
                Ok(Body::from_spec(spec, cap))
            })
            .collect::<SimResult<Vec<_>>>()?;

        if bodies.is_empty() {
            return Err(SimError::NoBodies);
        }

        log::debug!(
            "engine initialised: {} bodies, dt = {} s, history cap = {:?}",
            bodies.len(),
            parameters.dt,
            cap
        );

        Ok(Self {
            bodies,
            gravity: NewtonianGravity::from_params(&parameters),
            integrator: Rk4::new(),
            parameters,
            t: 0.0,
            steps: 0,
        })
    }

    /// Advance every body by `dt` seconds
    pub fn step(&mut self, dt: f64) -> SimResult<()> {
        if !dt.is_finite() {
            return Err(SimError::InvalidParameter(format!("dt must be finite, got {dt}")));
        }

        // Phase 1: freeze the start-of-step state and compute all deltas
        let snapshot: Vec<PointMass> = self.bodies.iter().map(Body::point_mass).collect();
        let deltas = compute_deltas(&self.integrator, &self.gravity, &snapshot, dt)?;

        // Reject before touching anything if a committed value would blow up
        for (i, (pm, d)) in snapshot.iter().zip(&deltas).enumerate() {
            let x = pm.x + d.dx;
            let v = pm.v + d.dv;
            if !x.iter().chain(v.iter()).all(|c| c.is_finite()) {
                return Err(SimError::NonFinite { body: BodyId(i) });
            }
        }

        // Phase 2: commit
        for (body, d) in self.bodies.iter_mut().zip(deltas) {
            body.commit(d.dx, d.dv);
        }
        self.t += dt;
        self.steps += 1;

        log::trace!("step {} committed, t = {} s", self.steps, self.t);
        Ok(())
    }

    /// One step of the configured `dt`
    pub fn advance(&mut self) -> SimResult<()> {
        self.step(self.parameters.dt)
    }

    /// `steps` consecutive steps of the configured `dt`; stops at the first error
    pub fn run(&mut self, steps: u64) -> SimResult<()> {
        for _ in 0..steps {
            self.advance()?;
        }
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let bodies = self
            .bodies
            .iter()
            .enumerate()
            .map(|(i, b)| BodyState {
                id: BodyId(i),
                name: b.name(),
                position: b.position(),
                velocity: b.velocity(),
                mass: b.mass(),
                kinetic_energy: b.kinetic_energy(),
                momentum_component: b.momentum_component(),
                color: b.color(),
                visibility_threshold: b.visibility_threshold(),
                trajectory: b.trajectory(),
            })
            .collect();

        Snapshot {
            t: self.t,
            steps: self.steps,
            bodies,
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    /// First body with the given name
    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.bodies.iter().position(|b| b.name() == name).map(BodyId)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Simulated seconds since initialisation
    pub fn elapsed(&self) -> f64 {
        self.t
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    /// Sum of the pair potentials over unordered pairs, -G m_i m_j / r_ij
    /// outside any clamped core
    pub fn potential_energy(&self) -> f64 {
        let mut u = 0.0;
        for (i, bi) in self.bodies.iter().enumerate() {
            for bj in &self.bodies[i + 1..] {
                let r = (bj.x - bi.x).norm();
                u += self.gravity.pair_potential(bi.m, bj.m, r);
            }
        }
        u
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }

    pub fn total_momentum(&self) -> NVec2 {
        self.bodies
            .iter()
            .fold(NVec2::zeros(), |p, b| p + b.momentum())
    }
}

#[cfg(not(feature = "parallel"))]
fn compute_deltas<F>(integrator: &Rk4, field: &F, snapshot: &[PointMass], dt: f64) -> SimResult<Vec<Delta>>
where
    F: Acceleration,
{
    (0..snapshot.len())
        .map(|i| integrator.advance(BodyId(i), dt, snapshot, field))
        .collect()
}

// Each body reads only the shared snapshot, so the outer loop splits freely.
// Results come back in body order, identical to the sequential path
#[cfg(feature = "parallel")]
fn compute_deltas<F>(integrator: &Rk4, field: &F, snapshot: &[PointMass], dt: f64) -> SimResult<Vec<Delta>>
where
    F: Acceleration + Sync,
{
    (0..snapshot.len())
        .into_par_iter()
        .map(|i| integrator.advance(BodyId(i), dt, snapshot, field))
        .collect()
}
