use std::fmt;

use serde::{Deserialize, Serialize};

use map_model::{JunctionID, RoadNetwork, RoadType, RoundaboutID, Segment, SegmentID};

/// A 3-way fork where a one-way highway splits into an off-ramp and a continuation of the same
/// highway.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ForkCandidate {
    pub incoming: SegmentID,
    pub continuation: SegmentID,
    pub offramp: SegmentID,
    pub junction: JunctionID,
}

impl fmt::Display for ForkCandidate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Dogleg at {} (incoming {}, continuation {}, off-ramp {})",
            self.junction, self.incoming, self.continuation, self.offramp
        )
    }
}

/// Why a segment doesn't lead into a dogleg. This is the usual outcome, not an error.
#[derive(Clone, Debug, PartialEq)]
pub enum Rejection {
    MissingSegment(SegmentID),
    TwoWay,
    NotHighway(RoadType),
    Roundabout(RoundaboutID),
    /// The segment has no junction at the end it travels towards, or it doesn't exist. Happens
    /// while a segment is being drawn.
    UnresolvedJunction,
    NotThreeWay(JunctionID, usize),
    TurnNotAllowed(SegmentID),
    SecondRamp(SegmentID),
    TwoWayRamp(SegmentID),
    SecondContinuation(SegmentID),
    TwoWayContinuation(SegmentID),
    OtherRoadType(SegmentID, RoadType),
    /// Didn't find both an off-ramp and a continuation.
    Incomplete,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Rejection::MissingSegment(s) => write!(f, "{} doesn't exist", s),
            Rejection::TwoWay => write!(f, "two-way"),
            Rejection::NotHighway(rt) => write!(f, "{:?} isn't a highway", rt),
            Rejection::Roundabout(r) => write!(f, "part of {}", r),
            Rejection::UnresolvedJunction => write!(f, "no junction at the end"),
            Rejection::NotThreeWay(j, n) => write!(f, "{} has {} segments, not 3", j, n),
            Rejection::TurnNotAllowed(s) => write!(f, "can't turn into {}", s),
            Rejection::SecondRamp(s) => write!(f, "{} is a second ramp", s),
            Rejection::TwoWayRamp(s) => write!(f, "ramp {} is two-way", s),
            Rejection::SecondContinuation(s) => write!(f, "{} is a second continuation", s),
            Rejection::TwoWayContinuation(s) => write!(f, "continuation {} is two-way", s),
            Rejection::OtherRoadType(s, rt) => write!(f, "{} is a {:?}", s, rt),
            Rejection::Incomplete => write!(f, "didn't find both an off-ramp and a continuation"),
        }
    }
}

/// Like `detect_fork`, for a segment that might not exist.
pub fn detect_fork_by_id<N: RoadNetwork + ?Sized>(
    net: &N,
    id: SegmentID,
) -> Result<ForkCandidate, Rejection> {
    match net.segment(id) {
        Some(s) => detect_fork(net, s),
        None => {
            debug!("{} not found", id);
            Err(Rejection::MissingSegment(id))
        }
    }
}

/// Decides if this segment is the incoming leg of a dogleg. The first rule that fails wins; there's
/// no backtracking.
pub fn detect_fork<N: RoadNetwork + ?Sized>(
    net: &N,
    incoming: &Segment,
) -> Result<ForkCandidate, Rejection> {
    trace!("Checking {}", incoming.id);
    if !incoming.is_one_way() {
        return Err(Rejection::TwoWay);
    }
    if !incoming.road_type.is_highway() {
        return Err(Rejection::NotHighway(incoming.road_type));
    }
    if let Some(r) = incoming.roundabout {
        return Err(Rejection::Roundabout(r));
    }

    let junction = match incoming.far_junction().and_then(|j| net.junction(j)) {
        Some(j) => j,
        None => return Err(Rejection::UnresolvedJunction),
    };
    if junction.segments.len() != 3 {
        return Err(Rejection::NotThreeWay(junction.id, junction.segments.len()));
    }

    let mut offramp: Option<SegmentID> = None;
    let mut continuation: Option<SegmentID> = None;
    for id in junction.other_segments(incoming.id) {
        // A dangling reference is handled like a missing leg.
        let other = abstutil::skip_fail!(net.segment(id));

        if !net.is_turn_allowed(incoming.id, id, junction.id) {
            debug!("{}: can't turn into {}", incoming.id, id);
            return Err(Rejection::TurnNotAllowed(id));
        }

        if other.road_type.is_ramp() {
            if offramp.is_some() {
                return Err(Rejection::SecondRamp(id));
            }
            if !other.is_one_way() {
                return Err(Rejection::TwoWayRamp(id));
            }
            offramp = Some(id);
        } else if other.road_type == incoming.road_type {
            if continuation.is_some() {
                return Err(Rejection::SecondContinuation(id));
            }
            if !other.is_one_way() {
                return Err(Rejection::TwoWayContinuation(id));
            }
            continuation = Some(id);
        } else {
            return Err(Rejection::OtherRoadType(id, other.road_type));
        }
    }

    match (continuation, offramp) {
        (Some(continuation), Some(offramp)) => {
            let candidate = ForkCandidate {
                incoming: incoming.id,
                continuation,
                offramp,
                junction: junction.id,
            };
            debug!("Found {}", candidate);
            Ok(candidate)
        }
        _ => {
            debug!("{}: dogleg almost detected at {}", incoming.id, junction.id);
            Err(Rejection::Incomplete)
        }
    }
}
