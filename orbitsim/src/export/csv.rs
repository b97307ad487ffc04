//! Trajectory export for external charting
//!
//! One row per retained history entry:
//! `body,step,t,x,y,vx,vy`
//! `step` counts from 1 (the first committed step); with a capped history the
//! first row of a body is the oldest step still in its window.
//! Names holding a comma, quote or line break are quoted with inner quotes
//! doubled, as RFC 4180 readers expect

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::simulation::engine::Engine;

pub const HEADER: &str = "body,step,t,x,y,vx,vy";

fn field(raw: &str) -> Cow<'_, str> {
    if raw.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", raw.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(raw)
    }
}

pub fn write_trajectories<W: Write>(engine: &Engine, mut out: W) -> io::Result<usize> {
    writeln!(out, "{HEADER}")?;

    let dt = engine.parameters().dt;
    let steps = engine.steps();
    let mut rows = 0;

    for body in engine.bodies() {
        let name = field(body.name());
        let positions = body.trajectory();
        let velocities = body.velocity_history();
        let first = steps + 1 - positions.len() as u64;

        for (k, (x, v)) in positions.iter().zip(velocities.iter()).enumerate() {
            let step = first + k as u64;
            writeln!(
                out,
                "{},{},{},{},{},{},{}",
                name,
                step,
                step as f64 * dt,
                x.x,
                x.y,
                v.x,
                v.y
            )?;
            rows += 1;
        }
    }

    out.flush()?;
    Ok(rows)
}

pub fn export_trajectories(engine: &Engine, path: impl AsRef<Path>) -> io::Result<usize> {
    let file = File::create(path)?;
    write_trajectories(engine, BufWriter::new(file))
}
