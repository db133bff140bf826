use crate::{Junction, JunctionID, Segment, SegmentID};

/// Read-only queries against a road network owned by someone else. Lookups return `None` for IDs
/// that don't resolve, which happens when the network is being edited concurrently.
pub trait RoadNetwork {
    fn segment(&self, id: SegmentID) -> Option<&Segment>;

    fn junction(&self, id: JunctionID) -> Option<&Junction>;

    /// Can traffic go from one segment into another at this junction?
    fn is_turn_allowed(&self, from: SegmentID, to: SegmentID, at: JunctionID) -> bool;

    /// Every segment, in a stable order.
    fn all_segments(&self) -> Vec<&Segment>;
}
