pub mod simulation;
pub mod configuration;
pub mod export;
pub mod benchmark;

pub use simulation::states::{Body, BodyId, BodySpec, History, NVec2, PointMass};
pub use simulation::error::{SimError, SimResult};
pub use simulation::params::{Parameters, SingularityPolicy, AU, DAY, G, REALTIME_HISTORY_CAP};
pub use simulation::forces::{Acceleration, NewtonianGravity};
pub use simulation::integrator::{Delta, Rk4};
pub use simulation::engine::{BodyState, Engine, Snapshot};
pub use simulation::scenario::Scenario;
pub use simulation::presets;

pub use configuration::config::{BodyConfig, ParametersConfig, ScenarioConfig, SingularityConfig};

pub use export::csv::{export_trajectories, write_trajectories};

pub use benchmark::benchmark::{bench_gravity, bench_step};
