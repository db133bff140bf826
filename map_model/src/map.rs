use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;

use abstutil::Timer;

use crate::raw::RawMap;
use crate::{Junction, JunctionID, RoadNetwork, Segment, SegmentID, TurnID};

/// An immutable snapshot of a road network.
#[derive(Clone, Debug)]
pub struct Map {
    pub(crate) name: String,
    pub(crate) segments: BTreeMap<SegmentID, Segment>,
    pub(crate) junctions: BTreeMap<JunctionID, Junction>,
    pub(crate) banned_turns: BTreeSet<TurnID>,
}

impl Map {
    /// Load a snapshot from a JSON file in the `RawMap` format.
    pub fn load(path: &str, timer: &mut Timer) -> Result<Map> {
        timer.start(&format!("load {}", path));
        let raw: Result<RawMap> = abstutil::read_json(path);
        timer.stop(&format!("load {}", path));
        Ok(Map::create_from_raw(raw?, timer))
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_s(&self, id: SegmentID) -> &Segment {
        &self.segments[&id]
    }

    pub fn get_j(&self, id: JunctionID) -> &Junction {
        &self.junctions[&id]
    }

    pub fn maybe_get_s(&self, id: SegmentID) -> Option<&Segment> {
        self.segments.get(&id)
    }

    pub fn maybe_get_j(&self, id: JunctionID) -> Option<&Junction> {
        self.junctions.get(&id)
    }

    pub fn is_turn_banned(&self, turn: TurnID) -> bool {
        self.banned_turns.contains(&turn)
    }
}

impl RoadNetwork for Map {
    fn segment(&self, id: SegmentID) -> Option<&Segment> {
        self.maybe_get_s(id)
    }

    fn junction(&self, id: JunctionID) -> Option<&Junction> {
        self.maybe_get_j(id)
    }

    /// Allowed when traffic can physically flow from one segment into the other through the
    /// junction, and the turn isn't explicitly banned.
    fn is_turn_allowed(&self, from: SegmentID, to: SegmentID, at: JunctionID) -> bool {
        if from == to {
            return false;
        }
        let (src, dst) = match (self.maybe_get_s(from), self.maybe_get_s(to)) {
            (Some(src), Some(dst)) => (src, dst),
            _ => return false,
        };
        match self.maybe_get_j(at) {
            Some(j) if j.segments.contains(&from) && j.segments.contains(&to) => {}
            _ => return false,
        }
        if !src.enters(at) || !dst.leaves(at) {
            return false;
        }
        !self.is_turn_banned(TurnID {
            parent: at,
            from,
            to,
        })
    }

    fn all_segments(&self) -> Vec<&Segment> {
        self.segments.values().collect()
    }
}
