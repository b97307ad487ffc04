//! Core state types for the N-body simulation.
//!
//! Defines the per-body record and the pieces it is built from:
//! - `NVec2`   2D vector (nalgebra)
//! - `BodyId`  stable index of a body inside its engine
//! - `History` trajectory window, capped or unbounded
//! - `Body`    one point mass with derived quantities and its histories
//! - `PointMass` the frozen view of a body used during one step

use std::collections::VecDeque;

use nalgebra::Vector2;

pub type NVec2 = Vector2<f64>;

/// Index of a body in the engine's ordered collection.
/// Assigned once at initialisation and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub(crate) usize);

impl BodyId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for BodyId {
    fn from(index: usize) -> Self {
        BodyId(index)
    }
}

/// Insertion-ordered sequence of past values, oldest first.
///
/// With a cap the history is a sliding window: pushing past the cap evicts
/// the oldest entry. Without one it keeps everything for the whole run.
#[derive(Debug, Clone)]
pub struct History<T> {
    items: VecDeque<T>,
    cap: Option<usize>,
}

impl<T> History<T> {
    pub fn new(cap: Option<usize>) -> Self {
        let items = match cap {
            Some(cap) => VecDeque::with_capacity(cap + 1),
            None => VecDeque::new(),
        };
        Self { items, cap }
    }

    pub fn push(&mut self, item: T) {
        self.items.push_back(item);
        if let Some(cap) = self.cap {
            while self.items.len() > cap {
                self.items.pop_front();
            }
        }
    }

    pub fn cap(&self) -> Option<usize> {
        self.cap
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.items.iter()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.back()
    }

    /// The two halves of the ring buffer in chronological order; the second
    /// is empty whenever the buffer happens to be contiguous
    pub fn as_slices(&self) -> (&[T], &[T]) {
        self.items.as_slices()
    }
}

/// Initial condition for one body, consumed by `Engine::initialize`
#[derive(Debug, Clone)]
pub struct BodySpec {
    pub name: String,
    pub mass: f64,
    pub position: NVec2,
    pub velocity: NVec2,
    pub color: [u8; 3],
    pub visibility_threshold: f64,
}

impl BodySpec {
    pub fn new(name: impl Into<String>, mass: f64, position: NVec2, velocity: NVec2) -> Self {
        Self {
            name: name.into(),
            mass,
            position,
            velocity,
            color: [255, 255, 255],
            visibility_threshold: 0.0,
        }
    }

    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_visibility(mut self, threshold: f64) -> Self {
        self.visibility_threshold = threshold;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub(crate) name: String,
    pub(crate) x: NVec2, // position
    pub(crate) v: NVec2, // velocity
    pub(crate) m: f64, // mass, > 0
    pub(crate) kinetic: f64,
    pub(crate) momentum: NVec2,
    pub(crate) trajectory: History<NVec2>,
    pub(crate) velocities: History<NVec2>,
    pub(crate) color: [u8; 3],
    pub(crate) vis: f64, // opaque to the core, read by the viewer
}

impl Body {
    /// Caller guarantees `spec.mass > 0`; checked by `Engine::initialize`
    pub(crate) fn from_spec(spec: BodySpec, cap: Option<usize>) -> Self {
        let mut body = Self {
            name: spec.name,
            x: spec.position,
            v: spec.velocity,
            m: spec.mass,
            kinetic: 0.0,
            momentum: NVec2::zeros(),
            trajectory: History::new(cap),
            velocities: History::new(cap),
            color: spec.color,
            vis: spec.visibility_threshold,
        };
        body.refresh_derived();
        body
    }

    /// Apply one committed RK4 delta and record the result
    pub(crate) fn commit(&mut self, dx: NVec2, dv: NVec2) {
        self.x += dx;
        self.v += dv;
        self.trajectory.push(self.x);
        self.velocities.push(self.v);
        self.refresh_derived();
    }

    fn refresh_derived(&mut self) {
        self.kinetic = 0.5 * self.m * self.v.norm_squared();
        self.momentum = self.m * self.v;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> NVec2 {
        self.x
    }

    pub fn velocity(&self) -> NVec2 {
        self.v
    }

    pub fn mass(&self) -> f64 {
        self.m
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.kinetic
    }

    /// Full linear momentum `m * v`
    pub fn momentum(&self) -> NVec2 {
        self.momentum
    }

    /// The y component of the momentum, the single axis tracked for display
    pub fn momentum_component(&self) -> f64 {
        self.momentum.y
    }

    pub fn trajectory(&self) -> &History<NVec2> {
        &self.trajectory
    }

    pub fn velocity_history(&self) -> &History<NVec2> {
        &self.velocities
    }

    pub fn color(&self) -> [u8; 3] {
        self.color
    }

    pub fn visibility_threshold(&self) -> f64 {
        self.vis
    }

    pub(crate) fn point_mass(&self) -> PointMass {
        PointMass {
            x: self.x,
            v: self.v,
            m: self.m,
        }
    }
}

/// Frozen position/velocity/mass of one body at the start of a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMass {
    pub x: NVec2,
    pub v: NVec2,
    pub m: f64,
}

impl PointMass {
    pub fn new(x: NVec2, v: NVec2, m: f64) -> Self {
        Self { x, v, m }
    }
}
