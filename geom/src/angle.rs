use std::fmt;

use serde::{Deserialize, Serialize};

/// An angle, stored in degrees. Not normalized; bearings and planar headings may be negative or
/// exceed 360 until `normalized_degrees` is used.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Angle(f64);

/// How `Angle::diff` reports the difference between an inbound and an outbound direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiffMode {
    /// The signed difference wrapped into [-180, 180]. Two roads meeting in a straight line at a
    /// junction produce +/-180.
    Absolute,
    /// The signed turn a vehicle makes going from the inbound to the outbound direction; going
    /// straight through is 0.
    Turn,
}

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    pub fn degrees(degs: f64) -> Angle {
        Angle(degs)
    }

    pub fn radians(rads: f64) -> Angle {
        Angle(rads.to_degrees())
    }

    /// The raw value in degrees, possibly negative.
    pub fn to_degrees(self) -> f64 {
        self.0
    }

    /// In [0, 360)
    pub fn normalized_degrees(self) -> f64 {
        let degs = self.0 % 360.0;
        if degs < 0.0 {
            degs + 360.0
        } else {
            degs
        }
    }

    /// Compares two directions measured at the same point. `inbound` and `outbound` are
    /// absolute directions leaving a junction along each road.
    ///
    /// ```
    /// use geom::{Angle, DiffMode};
    /// let diff = |a, b, mode| Angle::diff(Angle::degrees(a), Angle::degrees(b), mode);
    /// assert_eq!(diff(0.0, 90.0, DiffMode::Absolute), 90.0);
    /// assert_eq!(diff(0.0, 90.0, DiffMode::Turn), -90.0);
    /// assert_eq!(diff(0.0, 170.0, DiffMode::Absolute), 170.0);
    /// assert_eq!(diff(0.0, 170.0, DiffMode::Turn), -10.0);
    /// ```
    pub fn diff(inbound: Angle, outbound: Angle, mode: DiffMode) -> f64 {
        let mut a = outbound.0 - inbound.0;
        if a > 180.0 {
            a -= 360.0;
        }
        if a < -180.0 {
            a += 360.0;
        }
        match mode {
            DiffMode::Absolute => a,
            DiffMode::Turn => {
                if a > 0.0 {
                    a - 180.0
                } else {
                    a + 180.0
                }
            }
        }
    }

    /// The magnitude of the wrapped difference, in [0, 180].
    pub fn abs_diff(inbound: Angle, outbound: Angle) -> f64 {
        Angle::diff(inbound, outbound, DiffMode::Absolute).abs()
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.2}°", self.0)
    }
}
