use orbitsim::{bench_gravity, bench_step, export_trajectories, presets};
use orbitsim::{Engine, Parameters, Scenario, ScenarioConfig, SimResult, REALTIME_HISTORY_CAP};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    EarthSun,
    Inner,
    Solar,
    Resonance,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Run all steps at once, keep the full history
    Batch,
    /// Pace steps at `--fps`, keep a capped trail and poll snapshots per frame
    Realtime,
}

#[derive(Parser, Debug)]
#[command(about = "2D gravitational N-body integrator")]
struct Args {
    /// Scenario YAML, either a path or a file name under `scenarios/`
    #[arg(short, long, conflicts_with = "preset")]
    file: Option<String>,

    /// Built-in initial conditions
    #[arg(short, long, value_enum, default_value = "inner")]
    preset: Preset,

    #[arg(short, long, value_enum, default_value = "batch")]
    mode: Mode,

    /// Step size in days, overrides the scenario
    #[arg(short, long)]
    days: Option<f64>,

    /// Number of steps, overrides the scenario
    #[arg(short, long)]
    steps: Option<u64>,

    /// Write trajectories as CSV when the run ends
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Frames per second in realtime mode
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Run the step benchmark instead of a simulation
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.exists() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg = ScenarioConfig::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn build_scenario(args: &Args) -> Result<Scenario> {
    let mut cfg = match &args.file {
        Some(file_name) => load_scenario_from_yaml(file_name)?,
        None => {
            let specs = match args.preset {
                Preset::EarthSun => presets::earth_sun(),
                Preset::Inner => presets::inner_planets(),
                Preset::Solar => presets::solar_system(),
                Preset::Resonance => presets::kirkwood_resonances(),
            };
            let mut params = match args.mode {
                Mode::Batch => Parameters::batch(),
                Mode::Realtime => Parameters::realtime(),
            };
            if let Some(days) = args.days {
                params = params.with_days(days);
            }
            let mut scenario = Scenario::from_engine(Engine::initialize(specs, params)?);
            if let Some(steps) = args.steps {
                scenario.steps = steps;
            }
            return Ok(scenario);
        }
    };

    // CLI flags override the YAML
    if let Some(days) = args.days {
        cfg.parameters.days = days;
    }
    if let Some(steps) = args.steps {
        cfg.parameters.steps = Some(steps);
    }
    if args.mode == Mode::Realtime && cfg.parameters.history_cap.is_none() {
        cfg.parameters.history_cap = Some(REALTIME_HISTORY_CAP);
    }

    Ok(Scenario::build_scenario(cfg)?)
}

fn run_batch(engine: &mut Engine, steps: u64) -> SimResult<()> {
    let report_every = (steps / 12).max(1);
    for _ in 0..steps {
        engine.advance()?;
        if engine.steps() % report_every == 0 {
            log::debug!(
                "t = {:.1} d, E_kin = {:.6e} J, E_tot = {:.6e} J",
                engine.elapsed() / orbitsim::DAY,
                engine.kinetic_energy(),
                engine.total_energy()
            );
        }
    }
    Ok(())
}

fn run_realtime(engine: &mut Engine, steps: u64, fps: u32) -> SimResult<()> {
    let frame = Duration::from_secs_f64(1.0 / f64::from(fps.max(1)));
    let mut last_report = Instant::now();

    for _ in 0..steps {
        let start = Instant::now();
        engine.advance()?;

        // what a viewer would read each frame
        let snapshot = engine.snapshot();
        if last_report.elapsed() >= Duration::from_secs(1) {
            for b in &snapshot.bodies {
                log::debug!(
                    "{:>10}: x = ({:.4e}, {:.4e}) m, trail {}",
                    b.name,
                    b.position.x,
                    b.position.y,
                    b.trajectory.len()
                );
            }
            last_report = Instant::now();
        }

        if let Some(rest) = frame.checked_sub(start.elapsed()) {
            thread::sleep(rest);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.bench {
        bench_gravity();
        bench_step()?;
        return Ok(());
    }

    let Scenario { mut engine, steps } = build_scenario(&args).context("failed to build scenario")?;

    log::info!(
        "{:?} run: {} bodies, dt = {} s, {} steps",
        args.mode,
        engine.len(),
        engine.parameters().dt,
        steps
    );

    let e0 = engine.total_energy();
    match args.mode {
        Mode::Batch => run_batch(&mut engine, steps)?,
        Mode::Realtime => run_realtime(&mut engine, steps, args.fps)?,
    }
    let e1 = engine.total_energy();

    let drift = ((e1 - e0) / e0).abs();
    if drift > 1e-3 {
        log::warn!("relative energy drift {drift:.3e} over {steps} steps");
    }
    log::info!(
        "finished at t = {:.1} d, relative energy drift {drift:.3e}",
        engine.elapsed() / orbitsim::DAY
    );

    for b in engine.snapshot().bodies {
        log::info!(
            "{:>10}: x = ({:.4e}, {:.4e}) m, v = ({:.4e}, {:.4e}) m/s, E_kin = {:.4e} J, p_y = {:.4e} kg m/s",
            b.name,
            b.position.x,
            b.position.y,
            b.velocity.x,
            b.velocity.y,
            b.kinetic_energy,
            b.momentum_component
        );
    }

    if let Some(path) = &args.csv {
        let rows = export_trajectories(&engine, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("trajectories exported to {} ({rows} rows)", path.display());
    }

    Ok(())
}
