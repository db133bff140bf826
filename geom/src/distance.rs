use std::{cmp, fmt};

use serde::{Deserialize, Serialize};

/// A distance, in meters. Can be negative.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Distance(f64);

// By construction, Distance is a finite f64.
impl Eq for Distance {}

#[allow(clippy::derive_ord_xor_partial_ord)] // false positive
impl Ord for Distance {
    fn cmp(&self, other: &Distance) -> cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Distance {
    /// Creates a distance in meters.
    pub fn meters(value: f64) -> Distance {
        if !value.is_finite() {
            panic!("Bad Distance {}", value);
        }

        Distance(value)
    }

    /// Unchecked, for constants.
    pub const fn const_meters(value: f64) -> Distance {
        Distance(value)
    }

    /// Returns the distance in meters. Prefer to work with type-safe `Distance`s.
    pub fn inner_meters(self) -> f64 {
        self.0
    }
}

/// Always 2 decimal places, like "12.34m"
impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.2}m", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatting() {
        assert_eq!(Distance::meters(8.0).to_string(), "8.00m");
        assert_eq!(Distance::meters(12.345).to_string(), "12.35m");
    }

    #[test]
    fn ordering() {
        let mut dists = vec![Distance::meters(15.0), Distance::meters(0.0), Distance::meters(12.5)];
        dists.sort();
        assert_eq!(
            dists,
            vec![Distance::meters(0.0), Distance::meters(12.5), Distance::meters(15.0)]
        );
    }

    #[test]
    #[should_panic]
    fn reject_nan() {
        Distance::meters(f64::NAN);
    }
}
