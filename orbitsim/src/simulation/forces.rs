//! Acceleration fields for the n-body engine
//!
//! Defines the [`Acceleration`] trait the integrator samples at each RK4
//! stage, and direct Newtonian gravity implementing it

use super::error::{SimError, SimResult};
use super::params::{Parameters, SingularityPolicy};
use super::states::{BodyId, NVec2, PointMass};

/// Net acceleration at an arbitrary point due to a set of bodies.
///
/// `exclude` names the body being evaluated; it is skipped by index so that
/// two bodies with identical state still act on each other
pub trait Acceleration {
    fn acceleration(&self, location: NVec2, exclude: BodyId, bodies: &[PointMass]) -> SimResult<NVec2>;
}

/// 2D Newtonian gravity, direct O(n) sum per query point
#[derive(Debug, Clone)]
pub struct NewtonianGravity {
    pub g: f64, // gravitational constant
    pub singularity: SingularityPolicy,
}

impl NewtonianGravity {
    pub fn new(g: f64, singularity: SingularityPolicy) -> Self {
        Self { g, singularity }
    }

    pub fn from_params(params: &Parameters) -> Self {
        Self::new(params.g, params.singularity)
    }

    /// Potential energy of a pair at separation `dist`, matching the force
    /// this field applies. Under `Clamp` the force inside `min_separation` is
    /// linear in `dist`, so the potential there is the matching harmonic core,
    /// continuous with `-G m1 m2 / r` at the boundary
    pub fn pair_potential(&self, m1: f64, m2: f64, dist: f64) -> f64 {
        let gmm = self.g * m1 * m2;
        match self.singularity {
            SingularityPolicy::Clamp { min_separation: eps } if dist < eps => {
                gmm * (dist * dist / (2.0 * eps * eps * eps) - 1.5 / eps)
            }
            _ => -gmm / dist,
        }
    }
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, location: NVec2, exclude: BodyId, bodies: &[PointMass]) -> SimResult<NVec2> {
        let mut a = NVec2::zeros();

        for (j, bj) in bodies.iter().enumerate() {
            if j == exclude.0 {
                continue;
            }

            // r points from the query location towards body j
            let r = bj.x - location;
            let dist = r.norm();

            // a += G m_j r / |r|^3
            let coef = match self.singularity {
                SingularityPolicy::Reject => {
                    if dist == 0.0 {
                        return Err(SimError::Singularity {
                            body: exclude,
                            other: BodyId(j),
                        });
                    }
                    self.g * bj.m / (dist * dist * dist)
                }
                SingularityPolicy::Clamp { min_separation } => {
                    // coincident: no direction to pull in
                    if dist == 0.0 {
                        continue;
                    }
                    let d = dist.max(min_separation);
                    self.g * bj.m / (d * d * d)
                }
            };

            a += coef * r;
        }

        if !(a.x.is_finite() && a.y.is_finite()) {
            return Err(SimError::NonFinite { body: exclude });
        }
        Ok(a)
    }
}
