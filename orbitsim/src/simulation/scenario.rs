//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! (`Scenario`) containing:
//! - numerical parameters (`Parameters`)
//! - the engine with its bodies at t = 0 (`Engine`)
//! - the run length for batch mode
//!
//! Front ends (batch export, a viewer) consume a `Scenario` and drive its
//! engine; none of them mutate bodies directly

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::simulation::engine::Engine;
use crate::simulation::error::{SimError, SimResult};
use crate::simulation::params::{Parameters, DAY};
use crate::simulation::states::{BodySpec, NVec2};

/// Days in the default batch run
pub const DEFAULT_RUN_DAYS: f64 = 365.0;

/// Runtime bundle built from a [`ScenarioConfig`]
#[derive(Debug, Clone)]
pub struct Scenario {
    pub engine: Engine,
    pub steps: u64, // batch length
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> SimResult<Self> {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            g: p_cfg.g,
            dt: DAY * p_cfg.days,
            history_cap: p_cfg.history_cap,
            singularity: p_cfg.singularity.into(),
        };

        // Bodies: map `BodyConfig` -> `BodySpec` using nalgebra vectors
        let specs = cfg
            .bodies
            .iter()
            .map(body_spec)
            .collect::<SimResult<Vec<_>>>()?;

        let steps = match p_cfg.steps {
            Some(steps) => steps,
            None => default_steps(parameters.dt),
        };

        let engine = Engine::initialize(specs, parameters)?;

        Ok(Self { engine, steps })
    }

    /// Wrap an already-built engine with the default one-year run length
    pub fn from_engine(engine: Engine) -> Self {
        let steps = default_steps(engine.parameters().dt);
        Self { engine, steps }
    }
}

/// Steps needed to cover one year at step size `dt`
pub fn default_steps(dt: f64) -> u64 {
    if dt > 0.0 {
        (DEFAULT_RUN_DAYS * DAY / dt).ceil() as u64
    } else {
        0
    }
}

fn body_spec(bc: &BodyConfig) -> SimResult<BodySpec> {
    let x = vec2(&bc.name, "x", &bc.x)?;
    let v = vec2(&bc.name, "v", &bc.v)?;
    Ok(BodySpec::new(bc.name.clone(), bc.m, x, v)
        .with_color(bc.color)
        .with_visibility(bc.vis))
}

fn vec2(name: &str, field: &str, values: &[f64]) -> SimResult<NVec2> {
    match values {
        [x, y] => Ok(NVec2::new(*x, *y)),
        _ => Err(SimError::InvalidParameter(format!(
            "body `{name}`: `{field}` needs exactly 2 components, got {}",
            values.len()
        ))),
    }
}
