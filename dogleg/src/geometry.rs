use std::{error, fmt};

use geom::{Angle, Distance, LonLat};
use map_model::{JunctionID, Segment, SegmentID};

/// Problems extracting a piece of a segment's geometry.
#[derive(Clone, Debug, PartialEq)]
pub enum GeometryError {
    /// The segment doesn't have enough points to have the requested sub-segment. This only fails
    /// the one check that needed it.
    InsufficientGeometry {
        segment: SegmentID,
        points: usize,
        needed: usize,
    },
    /// Something referenced by a fork doesn't exist anymore.
    SegmentNotFound(SegmentID),
    JunctionNotFound(JunctionID),
    /// The segment doesn't end at the junction.
    NotConnected(SegmentID, JunctionID),
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GeometryError::InsufficientGeometry {
                segment,
                points,
                needed,
            } => write!(
                f,
                "{} only has {} points, but needs at least {}",
                segment, points, needed
            ),
            GeometryError::SegmentNotFound(s) => write!(f, "{} not found", s),
            GeometryError::JunctionNotFound(j) => write!(f, "{} not found", j),
            GeometryError::NotConnected(s, j) => write!(f, "{} isn't connected to {}", s, j),
        }
    }
}

impl error::Error for GeometryError {}

/// The straight line between two consecutive points of a segment, oriented away from the
/// junction for outgoing legs and towards it for the incoming leg.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubSegment {
    pub pt1: LonLat,
    pub pt2: LonLat,
}

impl SubSegment {
    pub fn length(&self) -> Distance {
        self.pt1.gps_dist(self.pt2)
    }

    pub fn planar_heading(&self) -> Angle {
        self.pt1.planar_heading_to(self.pt2)
    }

    pub fn points(&self) -> Vec<LonLat> {
        vec![self.pt1, self.pt2]
    }
}

fn require_points(s: &Segment, needed: usize) -> Result<(), GeometryError> {
    if s.geometry.len() < needed {
        return Err(GeometryError::InsufficientGeometry {
            segment: s.id,
            points: s.geometry.len(),
            needed,
        });
    }
    Ok(())
}

/// The sub-segment of the incoming leg right before the junction it travels towards, ending at
/// the junction.
pub fn incoming_last_sub_segment(s: &Segment) -> Result<SubSegment, GeometryError> {
    require_points(s, 2)?;
    let g = &s.geometry;
    let len = g.len();
    Ok(if s.is_a_to_b() {
        SubSegment {
            pt1: g[len - 2],
            pt2: g[len - 1],
        }
    } else {
        SubSegment {
            pt1: g[1],
            pt2: g[0],
        }
    })
}

/// The off-ramp's second sub-segment counting from the junction, skipping the first short hop.
pub fn offramp_second_sub_segment(s: &Segment) -> Result<SubSegment, GeometryError> {
    require_points(s, 3)?;
    let g = &s.geometry;
    let len = g.len();
    Ok(if s.is_a_to_b() {
        SubSegment {
            pt1: g[1],
            pt2: g[2],
        }
    } else {
        SubSegment {
            pt1: g[len - 2],
            pt2: g[len - 3],
        }
    })
}

/// The continuation's first sub-segment, starting at the junction.
pub fn continuation_first_sub_segment(s: &Segment) -> Result<SubSegment, GeometryError> {
    require_points(s, 2)?;
    let g = &s.geometry;
    let len = g.len();
    Ok(if s.is_a_to_b() {
        SubSegment {
            pt1: g[0],
            pt2: g[1],
        }
    } else {
        SubSegment {
            pt1: g[len - 1],
            pt2: g[len - 2],
        }
    })
}

/// The bearing of a segment as seen from the junction, looking along the segment, in [0, 360).
pub fn angle_at_junction(s: &Segment, j: JunctionID) -> Result<Angle, GeometryError> {
    require_points(s, 2)?;
    let g = &s.geometry;
    let len = g.len();
    let (at_junction, next) = if s.from_junction == Some(j) {
        (g[0], g[1])
    } else if s.to_junction == Some(j) {
        (g[len - 1], g[len - 2])
    } else {
        return Err(GeometryError::NotConnected(s.id, j));
    };
    let angle = at_junction.bearing_to(next);
    trace!("Angle from {} to {}: {}", j, s.id, angle);
    Ok(angle)
}
