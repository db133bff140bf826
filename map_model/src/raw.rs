//! The snapshot format a host exports its road network in. Every field is optional here, because
//! hosts mid-edit produce partial records. Numbers are signed too, since a host hands out negative
//! IDs to objects that haven't been saved yet. `Map::create_from_raw` decides what to keep.

use serde::{Deserialize, Serialize};

use geom::LonLat;

use crate::{Direction, RoadType};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawMap {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub segments: Vec<RawSegment>,
    #[serde(default)]
    pub junctions: Vec<RawJunction>,
    #[serde(default)]
    pub banned_turns: Vec<RawTurn>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSegment {
    pub id: Option<i64>,
    /// A GeoJSON LineString, ordered from A to B
    pub geometry: Option<geojson::Geometry>,
    /// The numeric road type code
    pub road_type: Option<i64>,
    pub is_two_way: Option<bool>,
    /// Only needed for one-way segments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_a_to_b: Option<bool>,
    /// Set for segments that belong to a roundabout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub junction_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_node_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_node_id: Option<i64>,
}

impl RawSegment {
    /// A complete record, connecting two nodes.
    pub fn new(
        id: usize,
        road_type: RoadType,
        direction: Direction,
        from_node_id: usize,
        to_node_id: usize,
        pts: &[LonLat],
    ) -> RawSegment {
        RawSegment {
            id: Some(id as i64),
            geometry: Some(geojson::Geometry::new(geojson::Value::LineString(
                pts.iter().map(|pt| pt.to_position()).collect(),
            ))),
            road_type: Some(u8::from(road_type).into()),
            is_two_way: Some(direction == Direction::TwoWay),
            is_a_to_b: match direction {
                Direction::TwoWay => None,
                Direction::AtoB => Some(true),
                Direction::BtoA => Some(false),
            },
            junction_id: None,
            from_node_id: Some(from_node_id as i64),
            to_node_id: Some(to_node_id as i64),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawJunction {
    pub id: Option<i64>,
    pub connected_segment_ids: Option<Vec<i64>>,
}

impl RawJunction {
    pub fn new(id: usize, connected_segment_ids: Vec<usize>) -> RawJunction {
        RawJunction {
            id: Some(id as i64),
            connected_segment_ids: Some(
                connected_segment_ids
                    .into_iter()
                    .map(|s| s as i64)
                    .collect(),
            ),
        }
    }
}

/// A turn that's explicitly forbidden, even though the segment directions would allow it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTurn {
    pub from_segment_id: Option<i64>,
    pub to_segment_id: Option<i64>,
    pub node_id: Option<i64>,
}
