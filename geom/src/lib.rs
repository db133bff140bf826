//! Geographic primitives for inspecting road geometry: GPS points, great-circle distances and
//! bearings, and the angle arithmetic used to compare the directions of roads meeting at a
//! junction.

mod angle;
mod distance;
mod gps;

pub use crate::angle::{Angle, DiffMode};
pub use crate::distance::Distance;
pub use crate::gps::LonLat;

/// Compare floats within an epsilon. Useful in tests.
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon
}
