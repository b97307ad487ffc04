//! Built-in initial conditions
//!
//! All bodies start on the negative x axis with a purely +y velocity, so
//! every orbit begins at its leftmost point and runs counter-clockwise.
//! Values are SI (m, m/s, kg)

use super::params::AU;
use super::states::{BodySpec, NVec2};

const YELLOW: [u8; 3] = [255, 255, 0];
const DARK_GREY: [u8; 3] = [80, 78, 81];
const WHITE: [u8; 3] = [255, 255, 255];
const GREEN: [u8; 3] = [0, 128, 0];
const RED: [u8; 3] = [255, 0, 0];
const ORANGE: [u8; 3] = [255, 140, 0];
const GOLD: [u8; 3] = [255, 215, 0];
const DARK_BLUE: [u8; 3] = [0, 0, 139];
const BLUE: [u8; 3] = [100, 149, 237];
const BROWN: [u8; 3] = [139, 69, 19];
const CYAN: [u8; 3] = [0, 255, 255];

pub const SUN_MASS: f64 = 1.98892e30;
pub const EARTH_MASS: f64 = 5.9742e24;
/// Circular orbital speed of the Earth preset, m/s
pub const EARTH_SPEED: f64 = 29783.0;

/// Sun offset from the barycentre of the full planetary set, m
const SUN_OFFSET: f64 = 8.5126e-3 * AU;
/// Sun drift balancing the planets' total momentum, m/s
const SUN_DRIFT: f64 = -16.0;

/// Asteroid mass used for the resonance probes, kg
const ASTEROID_MASS: f64 = 0.95e15;

/// Viewer zoom (pixels per meter) below which a body is hidden
fn vis(pixels_per_au: f64) -> f64 {
    pixels_per_au / AU
}

fn planet(name: &str, mass: f64, distance_au: f64, speed: f64, color: [u8; 3]) -> BodySpec {
    BodySpec::new(
        name,
        mass,
        NVec2::new(-distance_au * AU, 0.0),
        NVec2::new(0.0, speed),
    )
    .with_color(color)
}

pub fn sun_at_rest() -> BodySpec {
    BodySpec::new("Sun", SUN_MASS, NVec2::zeros(), NVec2::zeros()).with_color(YELLOW)
}

pub fn earth() -> BodySpec {
    planet("Earth", EARTH_MASS, 1.0, EARTH_SPEED, GREEN)
}

/// Sun and Earth only; one year is one orbit
pub fn earth_sun() -> Vec<BodySpec> {
    vec![sun_at_rest(), earth()]
}

/// Sun at rest with the four terrestrial planets
pub fn inner_planets() -> Vec<BodySpec> {
    vec![
        sun_at_rest(),
        planet("Mercury", 3.285e23, 0.39, 47360.0, DARK_GREY),
        planet("Venus", 4.867e24, 0.7233, 35020.0, WHITE),
        earth(),
        planet("Mars", 6.39e23, 1.524, 24080.0, RED),
    ]
}

/// Sun at rest with all eight planets
pub fn solar_system() -> Vec<BodySpec> {
    let mut bodies = inner_planets();
    bodies.extend([
        planet("Jupiter", 1.89813e27, 5.2026, 13060.0, ORANGE),
        planet("Saturn", 5.683e26, 9.5322, 9670.0, GOLD),
        planet("Uranus", 8.681e25, 19.22, 6790.0, CYAN),
        planet("Neptune", 1.024e26, 30.07, 5450.0, BLUE),
    ]);
    bodies
}

/// Viewer set: the eight planets around a Sun offset and drifting to cancel
/// their momentum, extended with three asteroid probes at the 2:1, 3:1 and
/// 5:1 Kirkwood resonances with Jupiter. The probes are light enough that
/// they barely perturb the planets. Jupiter is given a thousandth of the
/// Sun's mass here, slightly above its real value
pub fn kirkwood_resonances() -> Vec<BodySpec> {
    vec![
        BodySpec::new(
            "Sun",
            SUN_MASS,
            NVec2::new(SUN_OFFSET, 0.0),
            NVec2::new(0.0, SUN_DRIFT),
        )
        .with_color(YELLOW)
        .with_visibility(vis(10.0)),
        planet("Asteroid1", ASTEROID_MASS, 3.279, 16448.0, BROWN).with_visibility(vis(10.0)),
        planet("Asteroid2", ASTEROID_MASS, 2.502, 18832.0, BROWN).with_visibility(vis(10.0)),
        planet("Asteroid3", ASTEROID_MASS, 1.780, 22328.0, BROWN).with_visibility(vis(10.0)),
        planet("Mercury", 3.285e23, 0.39, 47360.0, DARK_GREY).with_visibility(vis(150.0)),
        planet("Venus", 4.867e24, 0.7233, 35020.0, WHITE).with_visibility(vis(120.0)),
        planet("Earth", EARTH_MASS, 1.0, EARTH_SPEED, DARK_BLUE).with_visibility(vis(80.0)),
        planet("Mars", 6.39e23, 1.524, 24080.0, RED).with_visibility(vis(50.0)),
        planet("Jupiter", 1.98892e27, 5.2026, 13060.0, ORANGE).with_visibility(vis(10.0)),
        planet("Saturn", 5.683e26, 9.5322, 9670.0, GOLD).with_visibility(vis(10.0)),
        planet("Uranus", 8.681e25, 19.22, 6790.0, BLUE).with_visibility(vis(10.0)),
        planet("Neptune", 1.024e26, 30.07, 5450.0, DARK_BLUE).with_visibility(vis(10.0)),
    ]
}
