//! Finds doglegs: a one-way highway segment forking into an off-ramp and a continuation of the
//! same highway at a 3-way junction. Each fork is then checked against a few geometric
//! heuristics, so that an editor can fix the ones that won't produce good navigation
//! instructions.
//!
//! Finding candidates (`detect_fork`) only looks at topology. Validating them (`validate`) only
//! looks at geometry. Neither modifies the network.

#[macro_use]
extern crate log;

mod candidate;
mod geometry;
mod scan;
mod thresholds;
mod validate;

pub use crate::candidate::{detect_fork, detect_fork_by_id, ForkCandidate, Rejection};
pub use crate::geometry::{
    angle_at_junction, continuation_first_sub_segment, incoming_last_sub_segment,
    offramp_second_sub_segment, GeometryError, SubSegment,
};
pub use crate::scan::{check_segments, Scan};
pub use crate::thresholds::Thresholds;
pub use crate::validate::{validate, Check, Label, Measurement, Outcome, ValidationResult};
