use serde::Serialize;

use abstutil::{prettyprint_usize, Timer};
use map_model::{RoadNetwork, SegmentID};

use crate::{detect_fork, validate, Thresholds, ValidationResult};

/// Everything found by checking a whole network.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Scan {
    /// One result per detected dogleg, in segment order
    pub findings: Vec<ValidationResult>,
    /// Doglegs that couldn't be validated at all
    pub errors: Vec<(SegmentID, String)>,
    pub num_segments: usize,
    pub num_candidates: usize,
}

impl Scan {
    pub fn valid(&self) -> impl Iterator<Item = &ValidationResult> {
        self.findings.iter().filter(|r| r.is_valid())
    }

    pub fn invalid(&self) -> impl Iterator<Item = &ValidationResult> {
        self.findings.iter().filter(|r| !r.is_valid())
    }
}

/// Detects and validates every dogleg in the network. Problems with one fork never stop the scan.
pub fn check_segments<N: RoadNetwork + ?Sized>(
    net: &N,
    thresholds: &Thresholds,
    short_circuit: bool,
    timer: &mut Timer,
) -> Scan {
    let segments = net.all_segments();
    let mut scan = Scan {
        num_segments: segments.len(),
        ..Default::default()
    };

    timer.start_iter("check segments for doglegs", segments.len());
    for s in segments {
        timer.next();
        let candidate = match detect_fork(net, s) {
            Ok(c) => c,
            Err(rejection) => {
                trace!("{}: {}", s.id, rejection);
                continue;
            }
        };
        scan.num_candidates += 1;
        match validate(net, &candidate, thresholds, short_circuit) {
            Ok(result) => {
                if !result.is_valid() {
                    debug!("{} has {} problems", candidate, result.failures().len());
                }
                scan.findings.push(result);
            }
            Err(err) => {
                timer.warn(format!("{}: {:#}", s.id, err));
                scan.errors.push((s.id, format!("{:#}", err)));
            }
        }
    }

    info!(
        "Checked {} segments, found {} doglegs, {} of them invalid",
        prettyprint_usize(scan.num_segments),
        prettyprint_usize(scan.num_candidates),
        prettyprint_usize(scan.invalid().count())
    );
    scan
}
