use std::fmt;

use serde::{Deserialize, Serialize};

use geom::LonLat;

use crate::JunctionID;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentID(pub usize);

impl fmt::Display for SegmentID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Segment #{}", self.0)
    }
}

/// Segments belonging to the same roundabout share this.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoundaboutID(pub usize);

impl fmt::Display for RoundaboutID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Roundabout #{}", self.0)
    }
}

/// The road classification of a segment. Serialized as the numeric code the map editor uses.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum RoadType {
    Street,
    PrimaryStreet,
    Freeway,
    Ramp,
    WalkingTrail,
    MajorHighway,
    MinorHighway,
    OffRoad,
    PedestrianBoardwalk,
    Ferry,
    Stairway,
    PrivateRoad,
    Railroad,
    Runway,
    ParkingLotRoad,
    NarrowStreet,
    Other(u8),
}

impl RoadType {
    /// Only these can lead into a dogleg. Ramps are deliberately excluded.
    pub fn is_highway(self) -> bool {
        matches!(
            self,
            RoadType::Freeway | RoadType::MajorHighway | RoadType::MinorHighway
        )
    }

    pub fn is_ramp(self) -> bool {
        self == RoadType::Ramp
    }
}

impl From<u8> for RoadType {
    fn from(code: u8) -> RoadType {
        match code {
            1 => RoadType::Street,
            2 => RoadType::PrimaryStreet,
            3 => RoadType::Freeway,
            4 => RoadType::Ramp,
            5 => RoadType::WalkingTrail,
            6 => RoadType::MajorHighway,
            7 => RoadType::MinorHighway,
            8 => RoadType::OffRoad,
            10 => RoadType::PedestrianBoardwalk,
            15 => RoadType::Ferry,
            16 => RoadType::Stairway,
            17 => RoadType::PrivateRoad,
            18 => RoadType::Railroad,
            19 => RoadType::Runway,
            20 => RoadType::ParkingLotRoad,
            22 => RoadType::NarrowStreet,
            x => RoadType::Other(x),
        }
    }
}

impl From<RoadType> for u8 {
    fn from(rt: RoadType) -> u8 {
        match rt {
            RoadType::Street => 1,
            RoadType::PrimaryStreet => 2,
            RoadType::Freeway => 3,
            RoadType::Ramp => 4,
            RoadType::WalkingTrail => 5,
            RoadType::MajorHighway => 6,
            RoadType::MinorHighway => 7,
            RoadType::OffRoad => 8,
            RoadType::PedestrianBoardwalk => 10,
            RoadType::Ferry => 15,
            RoadType::Stairway => 16,
            RoadType::PrivateRoad => 17,
            RoadType::Railroad => 18,
            RoadType::Runway => 19,
            RoadType::ParkingLotRoad => 20,
            RoadType::NarrowStreet => 22,
            RoadType::Other(x) => x,
        }
    }
}

/// Which way traffic may travel along a segment. A is the first point of the geometry, B the
/// last.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Direction {
    TwoWay,
    AtoB,
    BtoA,
}

/// A road edge between two junctions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentID,
    /// Ordered from A to B, always at least 2 points.
    pub geometry: Vec<LonLat>,
    pub direction: Direction,
    pub road_type: RoadType,
    pub roundabout: Option<RoundaboutID>,
    /// The junction at A. Missing while a segment is still being drawn.
    pub from_junction: Option<JunctionID>,
    /// The junction at B.
    pub to_junction: Option<JunctionID>,
}

impl Segment {
    pub fn is_one_way(&self) -> bool {
        self.direction != Direction::TwoWay
    }

    pub fn is_a_to_b(&self) -> bool {
        self.direction == Direction::AtoB
    }

    /// The junction that traffic on this segment travels towards. For a two-way segment, this is
    /// arbitrarily the `from_junction`.
    pub fn far_junction(&self) -> Option<JunctionID> {
        if self.is_a_to_b() {
            self.to_junction
        } else {
            self.from_junction
        }
    }

    /// Does traffic on this segment flow into the junction?
    pub fn enters(&self, j: JunctionID) -> bool {
        match self.direction {
            Direction::TwoWay => self.touches(j),
            Direction::AtoB => self.to_junction == Some(j),
            Direction::BtoA => self.from_junction == Some(j),
        }
    }

    /// Does traffic on this segment flow away from the junction?
    pub fn leaves(&self, j: JunctionID) -> bool {
        match self.direction {
            Direction::TwoWay => self.touches(j),
            Direction::AtoB => self.from_junction == Some(j),
            Direction::BtoA => self.to_junction == Some(j),
        }
    }

    pub fn touches(&self, j: JunctionID) -> bool {
        self.from_junction == Some(j) || self.to_junction == Some(j)
    }
}
