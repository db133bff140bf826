use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use geom::{Angle, Distance};
use map_model::{RoadNetwork, Segment, SegmentID};

use crate::geometry::{
    angle_at_junction, continuation_first_sub_segment, incoming_last_sub_segment,
    offramp_second_sub_segment, GeometryError,
};
use crate::{ForkCandidate, Thresholds};

/// The independent geometric checks, in the order they're evaluated and reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Check {
    IncomingLength,
    OfframpLength,
    /// The angle between the incoming highway and the continuation
    Angle1,
    /// The angle between the continuation and the off-ramp
    Angle2,
    Delta,
}

impl Check {
    pub const ALL: [Check; 5] = [
        Check::IncomingLength,
        Check::OfframpLength,
        Check::Angle1,
        Check::Angle2,
        Check::Delta,
    ];

    fn label_prefix(self) -> &'static str {
        match self {
            Check::IncomingLength | Check::OfframpLength => "",
            Check::Angle1 => "_._: ",
            Check::Angle2 => "⑂: ",
            Check::Delta => "Δ: ",
        }
    }
}

/// What a failing check measured.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Measurement {
    Length(Distance),
    Angle(Angle),
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Measurement::Length(d) => write!(f, "{}", d),
            Measurement::Angle(a) => write!(f, "{}", a),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    Pass,
    /// The measurement is missing when there wasn't enough geometry to measure anything.
    Fail(Option<Measurement>),
}

/// Text describing a failed check, to draw near the fork.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Label {
    pub check: Check,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub candidate: ForkCandidate,
    /// Only report the first problem?
    pub short_circuit: bool,
    outcomes: BTreeMap<Check, Outcome>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.outcomes.values().all(|o| *o == Outcome::Pass)
    }

    pub fn outcome(&self, check: Check) -> Outcome {
        self.outcomes
            .get(&check)
            .cloned()
            .unwrap_or(Outcome::Fail(None))
    }

    pub fn passed(&self, check: Check) -> bool {
        self.outcome(check) == Outcome::Pass
    }

    /// Only set when the check failed.
    pub fn measurement(&self, check: Check) -> Option<Measurement> {
        match self.outcome(check) {
            Outcome::Pass => None,
            Outcome::Fail(m) => m,
        }
    }

    pub fn incoming_length(&self) -> Option<Distance> {
        self.length(Check::IncomingLength)
    }

    pub fn offramp_length(&self) -> Option<Distance> {
        self.length(Check::OfframpLength)
    }

    pub fn angle1(&self) -> Option<Angle> {
        self.angle(Check::Angle1)
    }

    pub fn angle2(&self) -> Option<Angle> {
        self.angle(Check::Angle2)
    }

    pub fn delta(&self) -> Option<Angle> {
        self.angle(Check::Delta)
    }

    fn length(&self, check: Check) -> Option<Distance> {
        match self.measurement(check) {
            Some(Measurement::Length(d)) => Some(d),
            _ => None,
        }
    }

    fn angle(&self, check: Check) -> Option<Angle> {
        match self.measurement(check) {
            Some(Measurement::Angle(a)) => Some(a),
            _ => None,
        }
    }

    /// Every failed check, in order.
    pub fn failures(&self) -> Vec<(Check, Option<Measurement>)> {
        Check::ALL
            .iter()
            .filter_map(|check| match self.outcome(*check) {
                Outcome::Pass => None,
                Outcome::Fail(m) => Some((*check, m)),
            })
            .collect()
    }

    /// The failures a caller should show. In short-circuit mode, that's just the first.
    pub fn reported_failures(&self) -> Vec<(Check, Option<Measurement>)> {
        let mut failures = self.failures();
        if self.short_circuit {
            failures.truncate(1);
        }
        failures
    }

    pub fn labels(&self) -> Vec<Label> {
        self.reported_failures()
            .into_iter()
            .filter_map(|(check, m)| {
                m.map(|m| Label {
                    check,
                    text: format!("{}{}", check.label_prefix(), m),
                })
            })
            .collect()
    }
}

/// Runs every geometric check against a fork. Failing checks are a normal outcome; this only
/// returns an error when the candidate doesn't match the network, like when a segment it
/// references has disappeared.
pub fn validate<N: RoadNetwork + ?Sized>(
    net: &N,
    candidate: &ForkCandidate,
    thresholds: &Thresholds,
    short_circuit: bool,
) -> Result<ValidationResult> {
    validate_inner(net, candidate, thresholds, short_circuit)
        .with_context(|| format!("validating {}", candidate))
}

fn validate_inner<N: RoadNetwork + ?Sized>(
    net: &N,
    candidate: &ForkCandidate,
    thresholds: &Thresholds,
    short_circuit: bool,
) -> Result<ValidationResult> {
    let get = |id: SegmentID| -> Result<&Segment, GeometryError> {
        net.segment(id).ok_or(GeometryError::SegmentNotFound(id))
    };
    let incoming = get(candidate.incoming)?;
    let continuation = get(candidate.continuation)?;
    let offramp = get(candidate.offramp)?;
    let j = candidate.junction;
    if net.junction(j).is_none() {
        return Err(GeometryError::JunctionNotFound(j).into());
    }

    let mut outcomes = BTreeMap::new();

    // Every check runs, even after one fails, so all measurements are available.
    outcomes.insert(Check::IncomingLength, {
        match check_local(incoming_last_sub_segment(incoming))? {
            Some(sub) => {
                let length = sub.length();
                debug!("Length of {}: {}", incoming.id, length);
                judge(
                    thresholds.incoming_length_ok(length),
                    Measurement::Length(length),
                )
            }
            None => Outcome::Fail(None),
        }
    });

    outcomes.insert(Check::OfframpLength, {
        match check_local(offramp_second_sub_segment(offramp))? {
            Some(sub) => {
                let length = sub.length();
                debug!("Length of off-ramp {}: {}", offramp.id, length);
                judge(
                    thresholds.offramp_length_ok(length),
                    Measurement::Length(length),
                )
            }
            None => Outcome::Fail(None),
        }
    });

    outcomes.insert(Check::Angle1, {
        let angle = Angle::abs_diff(
            angle_at_junction(incoming, j)?,
            angle_at_junction(continuation, j)?,
        );
        debug!("Angle 1: {}", angle);
        judge(
            thresholds.angle1_ok(angle),
            Measurement::Angle(Angle::degrees(angle)),
        )
    });

    outcomes.insert(Check::Angle2, {
        let angle = Angle::abs_diff(
            angle_at_junction(continuation, j)?,
            angle_at_junction(offramp, j)?,
        );
        debug!("Angle 2: {}", angle);
        judge(
            thresholds.angle2_ok(angle),
            Measurement::Angle(Angle::degrees(angle)),
        )
    });

    outcomes.insert(Check::Delta, {
        match check_local(offramp_second_sub_segment(offramp))? {
            Some(ramp) => {
                let highway = continuation_first_sub_segment(continuation)?;
                let delta = Angle::abs_diff(highway.planar_heading(), ramp.planar_heading());
                debug!("Delta: {}", delta);
                judge(
                    thresholds.delta_ok(delta),
                    Measurement::Angle(Angle::degrees(delta)),
                )
            }
            None => Outcome::Fail(None),
        }
    });

    Ok(ValidationResult {
        candidate: *candidate,
        short_circuit,
        outcomes,
    })
}

fn judge(ok: bool, measurement: Measurement) -> Outcome {
    if ok {
        Outcome::Pass
    } else {
        Outcome::Fail(Some(measurement))
    }
}

/// Insufficient geometry only fails one check; anything else means the candidate is broken.
fn check_local<T>(result: Result<T, GeometryError>) -> Result<Option<T>, GeometryError> {
    match result {
        Ok(x) => Ok(Some(x)),
        Err(err @ GeometryError::InsufficientGeometry { .. }) => {
            debug!("{}", err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
