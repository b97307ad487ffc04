//! Fixed-step RK4 integrator for one body against a frozen snapshot
//!
//! The body being advanced moves through the intermediate Runge–Kutta points;
//! every other body stays where the snapshot put it for all four stages.
//! The result is a delta, applied later by the engine's commit phase

use super::error::{SimError, SimResult};
use super::forces::Acceleration;
use super::states::{BodyId, NVec2, PointMass};

/// Position and velocity increments for one body over one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delta {
    pub dx: NVec2,
    pub dv: NVec2,
}

impl Delta {
    fn is_finite(&self) -> bool {
        self.dx.iter().chain(self.dv.iter()).all(|c| c.is_finite())
    }
}

/// Classical 4th-order Runge–Kutta on dx/dt = v, dv/dt = a(x)
#[derive(Debug, Clone, Copy, Default)]
pub struct Rk4;

impl Rk4 {
    pub fn new() -> Self {
        Self
    }

    /// Advance body `id` of `bodies` by `dt`, sampling `field` four times
    pub fn advance<F>(&self, id: BodyId, dt: f64, bodies: &[PointMass], field: &F) -> SimResult<Delta>
    where
        F: Acceleration + ?Sized,
    {
        let body = bodies.get(id.0).ok_or_else(|| {
            SimError::InvalidParameter(format!("body {} out of range for {} bodies", id.0, bodies.len()))
        })?;
        let x0 = body.x;
        let v0 = body.v;
        let half_dt = 0.5 * dt;

        // stage 1: at the start point
        let k1 = v0;
        let m1 = field.acceleration(x0, id, bodies)?;

        // stage 2: half step along k1
        let k2 = v0 + m1 * half_dt;
        let m2 = field.acceleration(x0 + k1 * half_dt, id, bodies)?;

        // stage 3: half step along k2
        let k3 = v0 + m2 * half_dt;
        let m3 = field.acceleration(x0 + k2 * half_dt, id, bodies)?;

        // stage 4: full step along k3
        let k4 = v0 + m3 * dt;
        let m4 = field.acceleration(x0 + k3 * dt, id, bodies)?;

        let sixth = dt / 6.0;
        let delta = Delta {
            dx: sixth * (k1 + 2.0 * k2 + 2.0 * k3 + k4),
            dv: sixth * (m1 + 2.0 * m2 + 2.0 * m3 + m4),
        };

        if !delta.is_finite() {
            return Err(SimError::NonFinite { body: id });
        }
        Ok(delta)
    }
}
