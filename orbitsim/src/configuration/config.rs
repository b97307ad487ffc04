//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – step size, history cap, singularity handling, G
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An Earth–Sun scenario matching these types:
//!
//! ```yaml
//! parameters:
//!   G: 6.67430e-11          # optional, defaults to 6.67430e-11
//!   days: 1                 # dt = 86400 * days
//!   steps: 365              # optional, number of steps for a batch run
//!   history_cap: 1400       # optional, absent keeps the full history
//!   singularity: reject     # or `clamp: 1.0e3` (minimum separation in m)
//!
//! bodies:
//!   - name: Sun
//!     m: 1.98892e30
//!     x: [ 0.0, 0.0 ]
//!     v: [ 0.0, 0.0 ]
//!     color: [ 255, 255, 0 ]
//!   - name: Earth
//!     m: 5.9742e24
//!     x: [ -1.495978707e11, 0.0 ]
//!     v: [ 0.0, 29783.0 ]
//! ```
//!
//! Positions and velocities are SI (m, m/s). The engine maps this
//! configuration into its runtime types when the scenario is built.

use serde::Deserialize;

use crate::simulation::params::{SingularityPolicy, G};

/// How coincident bodies are treated, as written in YAML
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SingularityConfig {
    #[default]
    Reject, // fail the step
    Clamp(f64), // minimum separation in meters
}

impl From<SingularityConfig> for SingularityPolicy {
    fn from(cfg: SingularityConfig) -> Self {
        match cfg {
            SingularityConfig::Reject => SingularityPolicy::Reject,
            SingularityConfig::Clamp(min_separation) => SingularityPolicy::Clamp { min_separation },
        }
    }
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    #[serde(rename = "G", default = "default_g")]
    pub g: f64, // gravitational constant
    #[serde(default = "default_days")]
    pub days: f64, // step size in days
    #[serde(default)]
    pub steps: Option<u64>, // batch length, in steps
    #[serde(default)]
    pub history_cap: Option<usize>, // trajectory window, None = unbounded
    #[serde(default, with = "serde_yaml::with::singleton_map")]
    pub singularity: SingularityConfig, // `reject` or `clamp: <m>`
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            g: default_g(),
            days: default_days(),
            steps: None,
            history_cap: None,
            singularity: SingularityConfig::default(),
        }
    }
}

fn default_g() -> f64 {
    G
}

fn default_days() -> f64 {
    1.0
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: String,
    pub m: f64, // mass, kg
    pub x: Vec<f64>, // initial position [x, y], m
    pub v: Vec<f64>, // initial velocity [vx, vy], m/s
    #[serde(default = "default_color")]
    pub color: [u8; 3], // presentation only
    #[serde(default)]
    pub vis: f64, // viewer visibility threshold, presentation only
}

fn default_color() -> [u8; 3] {
    [255, 255, 255]
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub parameters: ParametersConfig,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(src: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(src)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }
}
