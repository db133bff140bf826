// Not every test file uses every helper.
#![allow(dead_code)]

use abstutil::Timer;
use geom::LonLat;
use map_model::raw::{RawJunction, RawMap, RawSegment};
use map_model::{Direction, JunctionID, Map, RoadType, SegmentID};

pub const INCOMING: SegmentID = SegmentID(1);
pub const CONTINUATION: SegmentID = SegmentID(2);
pub const OFFRAMP: SegmentID = SegmentID(3);
pub const FORK: JunctionID = JunctionID(100);

/// Describes a fork at the equator, where the incoming highway arrives from the west.
pub struct Layout {
    /// Draw every segment from B to A
    pub flip: bool,
    pub incoming_length: f64,
    /// Compass bearing of the continuation, leaving the fork
    pub continuation_bearing: f64,
    /// Compass bearing of the off-ramp's first, short hop
    pub ramp_bearing: f64,
    /// The off-ramp has only 2 points when this is `None`
    pub ramp_second_length: Option<f64>,
    /// Counter-clockwise from east
    pub ramp_second_heading: f64,
}

impl Default for Layout {
    fn default() -> Layout {
        Layout {
            flip: false,
            incoming_length: 20.0,
            continuation_bearing: 90.0,
            ramp_bearing: 125.0,
            ramp_second_length: Some(15.0),
            ramp_second_heading: -2.0,
        }
    }
}

impl Layout {
    pub fn raw(&self) -> RawMap {
        let j = LonLat::new(0.0, 0.0);

        let incoming = vec![j.offset_meters(-self.incoming_length, 0.0), j];
        let continuation = vec![j, towards(j, self.continuation_bearing, 50.0)];
        let mut offramp = vec![j, towards(j, self.ramp_bearing, 10.0)];
        if let Some(length) = self.ramp_second_length {
            let heading = self.ramp_second_heading.to_radians();
            let last = offramp[1];
            offramp.push(last.offset_meters(length * heading.cos(), length * heading.sin()));
        }

        RawMap {
            name: "fork".to_string(),
            segments: vec![
                self.one_way(INCOMING.0, RoadType::Freeway, incoming, 10, FORK.0),
                self.one_way(CONTINUATION.0, RoadType::Freeway, continuation, FORK.0, 200),
                self.one_way(OFFRAMP.0, RoadType::Ramp, offramp, FORK.0, 300),
            ],
            junctions: vec![RawJunction::new(
                FORK.0,
                vec![INCOMING.0, CONTINUATION.0, OFFRAMP.0],
            )],
            banned_turns: Vec::new(),
        }
    }

    pub fn map(&self) -> Map {
        build(self.raw())
    }

    // The points are in the direction of travel.
    fn one_way(
        &self,
        id: usize,
        road_type: RoadType,
        mut travel: Vec<LonLat>,
        start_node: usize,
        end_node: usize,
    ) -> RawSegment {
        if self.flip {
            travel.reverse();
            RawSegment::new(id, road_type, Direction::BtoA, end_node, start_node, &travel)
        } else {
            RawSegment::new(id, road_type, Direction::AtoB, start_node, end_node, &travel)
        }
    }
}

pub fn build(raw: RawMap) -> Map {
    Map::create_from_raw(raw, &mut Timer::throwaway())
}

pub fn segment_mut(raw: &mut RawMap, id: SegmentID) -> &mut RawSegment {
    raw.segments
        .iter_mut()
        .find(|s| s.id == Some(id.0 as i64))
        .unwrap()
}

fn towards(pt: LonLat, bearing: f64, meters: f64) -> LonLat {
    let bearing = bearing.to_radians();
    pt.offset_meters(meters * bearing.sin(), meters * bearing.cos())
}
