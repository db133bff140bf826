//! Utilities shared by every crate in the workspace: logging, timing, and reading/writing JSON
//! files.

#[macro_use]
extern crate log;

mod io;
pub mod logger;
mod time;

pub use crate::io::{read_json, to_json, write_json};
pub use crate::time::{elapsed_seconds, prettyprint_time, prettyprint_usize, Timer};

const PROGRESS_FREQUENCY_SECONDS: f64 = 0.2;

// Thanks https://stackoverflow.com/a/49806368
#[macro_export]
macro_rules! skip_fail {
    ($res:expr) => {
        match $res {
            Some(val) => val,
            None => {
                continue;
            }
        }
    };
}
