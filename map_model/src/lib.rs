//! A read-only road network: segments with polyline geometry, the junctions connecting them, and
//! which turns are permitted. Everything else in the workspace consumes the network through the
//! `RoadNetwork` trait, so a host application can expose its own graph without copying it into a
//! `Map`.

#[macro_use]
extern crate log;

mod make;
mod map;
mod network;
mod objects;
pub mod raw;

pub use crate::map::Map;
pub use crate::network::RoadNetwork;
pub use crate::objects::junction::{Junction, JunctionID};
pub use crate::objects::segment::{Direction, RoadType, RoundaboutID, Segment, SegmentID};
pub use crate::objects::turn::TurnID;
