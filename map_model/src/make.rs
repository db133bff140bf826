use std::collections::{BTreeMap, BTreeSet};

use anyhow::{bail, Context, Result};

use abstutil::{prettyprint_usize, Timer};
use geom::LonLat;

use crate::raw::{RawJunction, RawMap, RawSegment, RawTurn};
use crate::{
    Direction, Junction, JunctionID, Map, RoadType, RoundaboutID, Segment, SegmentID, TurnID,
};

impl Map {
    /// Converts a snapshot, skipping (with a warning) any record that's missing something
    /// required. Partial records never make it into the `Map`.
    pub fn create_from_raw(raw: RawMap, timer: &mut Timer) -> Map {
        timer.start("convert raw map");
        let mut map = Map {
            name: raw.name,
            segments: BTreeMap::new(),
            junctions: BTreeMap::new(),
            banned_turns: BTreeSet::new(),
        };
        let mut skipped = 0;

        for rs in &raw.segments {
            match to_segment(rs) {
                Ok(s) => {
                    if map.segments.contains_key(&s.id) {
                        timer.warn(format!("Skipping duplicate {}", s.id));
                        skipped += 1;
                    } else {
                        map.segments.insert(s.id, s);
                    }
                }
                Err(err) => {
                    timer.warn(format!("Skipping segment {:?}: {}", rs.id, err));
                    skipped += 1;
                }
            }
        }

        for rj in &raw.junctions {
            match to_junction(rj) {
                Ok(j) => {
                    for s in &j.segments {
                        if !map.segments.contains_key(s) {
                            // Still keep the junction; the host might be in the middle of an edit.
                            timer.warn(format!("{} references missing {}", j.id, s));
                        }
                    }
                    if map.junctions.contains_key(&j.id) {
                        timer.warn(format!("Skipping duplicate {}", j.id));
                        skipped += 1;
                    } else {
                        map.junctions.insert(j.id, j);
                    }
                }
                Err(err) => {
                    timer.warn(format!("Skipping junction {:?}: {}", rj.id, err));
                    skipped += 1;
                }
            }
        }

        for rt in &raw.banned_turns {
            match to_turn(rt) {
                Ok(t) => {
                    map.banned_turns.insert(t);
                }
                Err(err) => {
                    timer.warn(format!("Skipping banned turn {:?}: {}", rt, err));
                    skipped += 1;
                }
            }
        }

        info!(
            "{} has {} segments, {} junctions, {} banned turns. Skipped {} bad records",
            map.name,
            prettyprint_usize(map.segments.len()),
            prettyprint_usize(map.junctions.len()),
            prettyprint_usize(map.banned_turns.len()),
            prettyprint_usize(skipped)
        );
        timer.stop("convert raw map");
        map
    }
}

fn to_segment(rs: &RawSegment) -> Result<Segment> {
    let id = match rs.id {
        Some(id) => SegmentID(to_index(id)?),
        None => bail!("missing id"),
    };
    let geometry = match rs.geometry {
        Some(ref geom) => to_polyline(geom)?,
        None => bail!("{} is missing geometry", id),
    };
    let road_type = match rs.road_type {
        Some(code) => RoadType::from(
            u8::try_from(code).with_context(|| format!("{} has road type {}", id, code))?,
        ),
        None => bail!("{} is missing a road type", id),
    };
    let direction = match (rs.is_two_way, rs.is_a_to_b) {
        (Some(true), _) => Direction::TwoWay,
        (Some(false), Some(true)) => Direction::AtoB,
        (Some(false), Some(false)) => Direction::BtoA,
        (Some(false), None) => bail!("{} is one-way, but doesn't say which way", id),
        (None, _) => bail!("{} is missing its direction", id),
    };
    Ok(Segment {
        id,
        geometry,
        direction,
        road_type,
        roundabout: rs.junction_id.map(to_index).transpose()?.map(RoundaboutID),
        from_junction: rs.from_node_id.map(to_index).transpose()?.map(JunctionID),
        to_junction: rs.to_node_id.map(to_index).transpose()?.map(JunctionID),
    })
}

// Hosts use negative IDs for objects that haven't been saved yet.
fn to_index(id: i64) -> Result<usize> {
    usize::try_from(id).with_context(|| format!("unusable ID {}", id))
}

fn to_polyline(geom: &geojson::Geometry) -> Result<Vec<LonLat>> {
    let positions = match geom.value {
        geojson::Value::LineString(ref positions) => positions,
        _ => bail!("geometry isn't a LineString"),
    };
    if positions.len() < 2 {
        bail!("geometry only has {} points", positions.len());
    }
    let mut pts = Vec::new();
    for pos in positions {
        if pos.len() < 2 {
            bail!("position {:?} doesn't have a longitude and latitude", pos);
        }
        if !pos[0].is_finite() || !pos[1].is_finite() {
            bail!("position {:?} isn't finite", pos);
        }
        pts.push(LonLat::new(pos[0], pos[1]));
    }
    Ok(pts)
}

fn to_junction(rj: &RawJunction) -> Result<Junction> {
    let id = match rj.id {
        Some(id) => JunctionID(to_index(id)?),
        None => bail!("missing id"),
    };
    let segments = match rj.connected_segment_ids {
        Some(ref ids) => ids
            .iter()
            .map(|s| to_index(*s).map(SegmentID))
            .collect::<Result<Vec<_>>>()?,
        None => bail!("{} is missing its connected segments", id),
    };
    Ok(Junction { id, segments })
}

fn to_turn(rt: &RawTurn) -> Result<TurnID> {
    match (rt.from_segment_id, rt.to_segment_id, rt.node_id) {
        (Some(from), Some(to), Some(parent)) => Ok(TurnID {
            parent: JunctionID(to_index(parent)?),
            from: SegmentID(to_index(from)?),
            to: SegmentID(to_index(to)?),
        }),
        _ => bail!("incomplete turn"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RoadNetwork;

    fn pt(lon: f64, lat: f64) -> LonLat {
        LonLat::new(lon, lat)
    }

    // Segment 1 flows into junction 100, segment 2 flows out, and segment 3 is two-way.
    fn raw_map() -> RawMap {
        RawMap {
            name: "tiny".to_string(),
            segments: vec![
                RawSegment::new(
                    1,
                    RoadType::Freeway,
                    Direction::AtoB,
                    10,
                    100,
                    &[pt(0.0, 0.0), pt(0.001, 0.0)],
                ),
                RawSegment::new(
                    2,
                    RoadType::Freeway,
                    Direction::BtoA,
                    200,
                    100,
                    &[pt(0.002, 0.0), pt(0.001, 0.0)],
                ),
                RawSegment::new(
                    3,
                    RoadType::Street,
                    Direction::TwoWay,
                    100,
                    300,
                    &[pt(0.001, 0.0), pt(0.001, 0.001)],
                ),
            ],
            junctions: vec![RawJunction::new(100, vec![1, 2, 3])],
            banned_turns: vec![RawTurn {
                from_segment_id: Some(1),
                to_segment_id: Some(3),
                node_id: Some(100),
            }],
        }
    }

    #[test]
    fn convert_complete_records() {
        let map = Map::create_from_raw(raw_map(), &mut Timer::throwaway());
        assert_eq!(map.get_name(), "tiny");
        assert_eq!(map.all_segments().len(), 3);
        let s2 = map.get_s(SegmentID(2));
        assert_eq!(s2.direction, Direction::BtoA);
        assert_eq!(s2.far_junction(), Some(JunctionID(200)));
        assert_eq!(
            map.get_j(JunctionID(100)).segments,
            vec![SegmentID(1), SegmentID(2), SegmentID(3)]
        );
    }

    #[test]
    fn reject_partial_records() {
        let mut raw = raw_map();
        let mut no_geom = RawSegment::new(4, RoadType::Ramp, Direction::AtoB, 1, 2, &[]);
        no_geom.geometry = None;
        let one_point = RawSegment::new(5, RoadType::Ramp, Direction::AtoB, 1, 2, &[pt(0.0, 0.0)]);
        let line = [pt(0.0, 0.0), pt(1.0, 1.0)];
        let mut no_direction = RawSegment::new(6, RoadType::Ramp, Direction::AtoB, 1, 2, &line);
        no_direction.is_a_to_b = None;
        let mut no_type = RawSegment::new(7, RoadType::Ramp, Direction::AtoB, 1, 2, &line);
        no_type.road_type = None;
        raw.segments.extend(vec![no_geom, one_point, no_direction, no_type]);
        raw.junctions.push(RawJunction {
            id: Some(500),
            connected_segment_ids: None,
        });

        let mut timer = Timer::throwaway();
        let map = Map::create_from_raw(raw, &mut timer);
        assert_eq!(map.all_segments().len(), 3);
        assert!(map.junction(JunctionID(500)).is_none());
        assert_eq!(timer.warnings().len(), 5);
    }

    #[test]
    fn turn_permissions() {
        let map = Map::create_from_raw(raw_map(), &mut Timer::throwaway());
        let j = JunctionID(100);
        // Straight through
        assert!(map.is_turn_allowed(SegmentID(1), SegmentID(2), j));
        // Against the one-way direction of segment 2
        assert!(!map.is_turn_allowed(SegmentID(2), SegmentID(1), j));
        // Explicitly banned
        assert!(!map.is_turn_allowed(SegmentID(1), SegmentID(3), j));
        // Two-way segments go both ways
        assert!(map.is_turn_allowed(SegmentID(3), SegmentID(2), j));
        // Not at this junction
        assert!(!map.is_turn_allowed(SegmentID(1), SegmentID(2), JunctionID(10)));
        assert!(!map.is_turn_allowed(SegmentID(1), SegmentID(1), j));
        assert!(!map.is_turn_allowed(SegmentID(1), SegmentID(99), j));
    }

    #[test]
    fn unsaved_records_only_lose_themselves() {
        let json = r#"{
            "segments": [
                {
                    "id": 1,
                    "geometry": {"type": "LineString", "coordinates": [[4.0, 50.0], [4.001, 50.0]]},
                    "road_type": 3,
                    "is_two_way": true
                },
                {
                    "id": -5,
                    "geometry": {"type": "LineString", "coordinates": [[4.0, 50.0], [4.0, 50.001]]},
                    "road_type": 3,
                    "is_two_way": true
                },
                {
                    "id": 2,
                    "geometry": {"type": "LineString", "coordinates": [[4.0, 50.0], [4.0, 50.001]]},
                    "road_type": 300,
                    "is_two_way": true
                }
            ],
            "junctions": [
                {"id": -1, "connected_segment_ids": [1]},
                {"id": 10, "connected_segment_ids": [1, -5]}
            ],
            "banned_turns": [{"from_segment_id": 1, "to_segment_id": -5, "node_id": 10}]
        }"#;
        let raw: RawMap = serde_json::from_str(json).unwrap();
        let mut timer = Timer::throwaway();
        let map = Map::create_from_raw(raw, &mut timer);
        assert_eq!(map.all_segments().len(), 1);
        assert_eq!(map.get_s(SegmentID(1)).direction, Direction::TwoWay);
        assert!(map.maybe_get_j(JunctionID(10)).is_none());
        // Segment -5 and 2, junctions -1 and 10, and the banned turn
        assert_eq!(timer.warnings().len(), 5);
    }

    #[test]
    fn parse_snapshot_json() {
        let json = r#"{
            "name": "json",
            "segments": [{
                "id": 7,
                "geometry": {"type": "LineString", "coordinates": [[4.0, 50.0], [4.001, 50.0]]},
                "road_type": 4,
                "is_two_way": false,
                "is_a_to_b": false,
                "junction_id": 3,
                "from_node_id": 1
            }]
        }"#;
        let raw: RawMap = serde_json::from_str(json).unwrap();
        let map = Map::create_from_raw(raw, &mut Timer::throwaway());
        let s = map.get_s(SegmentID(7));
        assert_eq!(s.road_type, RoadType::Ramp);
        assert_eq!(s.direction, Direction::BtoA);
        assert_eq!(s.roundabout, Some(RoundaboutID(3)));
        assert_eq!(s.to_junction, None);
        assert_eq!(s.far_junction(), Some(JunctionID(1)));
    }
}
