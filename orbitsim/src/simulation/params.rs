//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - gravitational constant `g`,
//! - fixed step size `dt` (seconds),
//! - trajectory history cap (`None` keeps the whole run),
//! - what to do when two bodies coincide (`SingularityPolicy`)

use super::error::{SimError, SimResult};

/// Gravitational constant, m^3 kg^-1 s^-2
pub const G: f64 = 6.67430e-11;
/// Astronomical unit, m
pub const AU: f64 = 1.495978707e11;
/// Seconds in one day
pub const DAY: f64 = 86400.0;
/// Trail length kept by the real-time viewer
pub const REALTIME_HISTORY_CAP: usize = 1400;

/// Treatment of zero separation in the acceleration sum.
/// Applied to every pair at every stage
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SingularityPolicy {
    /// Fail the step with `SimError::Singularity`
    #[default]
    Reject,
    /// Use `max(|r|, min_separation)` as the distance; a zero separation
    /// has no direction and contributes nothing
    Clamp { min_separation: f64 },
}

#[derive(Debug, Clone)]
pub struct Parameters {
    pub g: f64, // gravitational constant
    pub dt: f64, // step size
    pub history_cap: Option<usize>, // trajectory window length
    pub singularity: SingularityPolicy,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            g: G,
            dt: DAY,
            history_cap: None,
            singularity: SingularityPolicy::Reject,
        }
    }
}

impl Parameters {
    /// Batch settings: one-day step, full history
    pub fn batch() -> Self {
        Self::default()
    }

    /// Real-time settings: one-day step, history capped for the viewer's trails
    pub fn realtime() -> Self {
        Self {
            history_cap: Some(REALTIME_HISTORY_CAP),
            ..Self::default()
        }
    }

    /// Step size of `days` whole days
    pub fn with_days(mut self, days: f64) -> Self {
        self.dt = DAY * days;
        self
    }

    pub fn validate(&self) -> SimResult<()> {
        if !self.g.is_finite() || self.g <= 0.0 {
            return Err(SimError::InvalidParameter(format!("G must be positive, got {}", self.g)));
        }
        if !self.dt.is_finite() {
            return Err(SimError::InvalidParameter(format!("dt must be finite, got {}", self.dt)));
        }
        if self.history_cap == Some(0) {
            return Err(SimError::InvalidParameter("history cap must be at least 1".into()));
        }
        if let SingularityPolicy::Clamp { min_separation } = self.singularity {
            if !min_separation.is_finite() || min_separation <= 0.0 {
                return Err(SimError::InvalidParameter(format!(
                    "clamp separation must be positive, got {min_separation}"
                )));
            }
        }
        Ok(())
    }
}
