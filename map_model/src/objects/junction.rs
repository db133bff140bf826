use std::fmt;

use serde::{Deserialize, Serialize};

use crate::SegmentID;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JunctionID(pub usize);

impl fmt::Display for JunctionID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Junction #{}", self.0)
    }
}

/// A node where segments meet. Dead-ends have a single segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Junction {
    pub id: JunctionID,
    /// The order is whatever the source data used and isn't meaningful.
    pub segments: Vec<SegmentID>,
}

impl Junction {
    /// Every incident segment except one.
    pub fn other_segments(&self, except: SegmentID) -> impl Iterator<Item = SegmentID> + '_ {
        self.segments.iter().cloned().filter(move |s| *s != except)
    }
}
