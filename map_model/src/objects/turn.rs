use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{JunctionID, SegmentID};

/// Turns are uniquely identified by their (from, to) segments and the junction where they happen.
/// The junction is needed to distinguish two segments meeting at both ends.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TurnID {
    pub parent: JunctionID,
    pub from: SegmentID,
    pub to: SegmentID,
}

impl fmt::Display for TurnID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TurnID({}, {}, {})", self.from, self.to, self.parent)
    }
}
