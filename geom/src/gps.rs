use std::fmt;

use geo::{Bearing, HaversineDistance, Point};
use serde::{Deserialize, Serialize};

use crate::{Angle, Distance};

// The same radius the haversine formula in `geo` uses
const MEAN_EARTH_RADIUS_M: f64 = 6_371_008.8;

/// longitude is x, latitude is y
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct LonLat {
    pub longitude: f64,
    pub latitude: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> LonLat {
        LonLat {
            longitude: lon,
            latitude: lat,
        }
    }

    fn to_point(self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    /// Great-circle surface distance, using the haversine formula and the mean earth radius.
    pub fn gps_dist(self, other: LonLat) -> Distance {
        Distance::meters(self.to_point().haversine_distance(&other.to_point()))
    }

    /// The initial great-circle bearing towards another point, clockwise from north, in [0, 360).
    pub fn bearing_to(self, other: LonLat) -> Angle {
        let bearing = self.to_point().bearing(other.to_point());
        Angle::degrees(Angle::degrees(bearing).normalized_degrees())
    }

    /// The heading towards another point, treating longitude and latitude as flat x and y. This is
    /// counter-clockwise from east and ignores the projection entirely, so it's only meaningful
    /// for comparing two short, nearby lines with each other.
    pub fn planar_heading_to(self, other: LonLat) -> Angle {
        Angle::radians((other.latitude - self.latitude).atan2(other.longitude - self.longitude))
    }

    /// A point offset by some distance east and north. Only accurate for short distances away
    /// from the poles. Useful for constructing test geometry.
    pub fn offset_meters(self, east: f64, north: f64) -> LonLat {
        let meters_per_degree = MEAN_EARTH_RADIUS_M.to_radians();
        LonLat::new(
            self.longitude + east / (meters_per_degree * self.latitude.to_radians().cos()),
            self.latitude + north / meters_per_degree,
        )
    }

    pub fn to_position(self) -> Vec<f64> {
        vec![self.longitude, self.latitude]
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LonLat({0}, {1})", self.longitude, self.latitude)
    }
}
