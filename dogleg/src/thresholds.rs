use serde::{Deserialize, Serialize};

use geom::Distance;

/// The limits a well-formed dogleg has to respect. All bounds are strict.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// The last sub-segment of the incoming highway must be longer than this.
    pub incoming_min_length: Distance,
    /// The second sub-segment of the off-ramp must be longer than this.
    pub offramp_min_length: Distance,
    /// The angle between the incoming highway and its continuation, in degrees.
    pub angle1_min: f64,
    pub angle1_max: f64,
    /// The angle between the continuation and the off-ramp, in degrees.
    pub angle2_min: f64,
    pub angle2_max: f64,
    /// Maximum difference between the heading of the continuation's first sub-segment and the
    /// off-ramp's second sub-segment, in degrees.
    pub delta_max: f64,
}

impl Default for Thresholds {
    fn default() -> Thresholds {
        Thresholds {
            incoming_min_length: Distance::const_meters(12.0),
            offramp_min_length: Distance::const_meters(12.0),
            angle1_min: 170.0,
            angle1_max: 190.0,
            angle2_min: 20.0,
            angle2_max: 55.0,
            delta_max: 10.0,
        }
    }
}

impl Thresholds {
    pub fn incoming_length_ok(&self, length: Distance) -> bool {
        length > self.incoming_min_length
    }

    pub fn offramp_length_ok(&self, length: Distance) -> bool {
        length > self.offramp_min_length
    }

    pub fn angle1_ok(&self, degrees: f64) -> bool {
        degrees > self.angle1_min && degrees < self.angle1_max
    }

    pub fn angle2_ok(&self, degrees: f64) -> bool {
        degrees > self.angle2_min && degrees < self.angle2_max
    }

    pub fn delta_ok(&self, degrees: f64) -> bool {
        degrees < self.delta_max
    }

    /// Human-readable descriptions of every rule, for editors.
    pub fn describe_rules(&self) -> Vec<String> {
        vec![
            format!(
                "[_._]: should be between {}° and {}°",
                self.angle1_min, self.angle1_max
            ),
            format!(
                "[⑂]: should be between {}° and {}°",
                self.angle2_min, self.angle2_max
            ),
            format!(
                "The 2nd subsegment of the offramp should be at least {} long",
                self.offramp_min_length
            ),
            format!(
                "The last subsegment of the incoming highway should be at least {} long",
                self.incoming_min_length
            ),
            format!(
                "Δ: The heading of the 1st subsegment of the outgoing highway and the 2nd \
                 subsegment of the offramp may differ by at most {}°",
                self.delta_max
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_strict() {
        let t = Thresholds::default();
        assert!(!t.incoming_length_ok(Distance::meters(12.0)));
        assert!(t.incoming_length_ok(Distance::meters(12.001)));
        assert!(!t.offramp_length_ok(Distance::meters(12.0)));
        assert!(!t.offramp_length_ok(Distance::meters(8.0)));

        assert!(!t.angle1_ok(170.0));
        assert!(!t.angle1_ok(190.0));
        assert!(t.angle1_ok(170.01));
        assert!(t.angle1_ok(180.0));

        assert!(!t.angle2_ok(20.0));
        assert!(!t.angle2_ok(55.0));
        assert!(t.angle2_ok(35.0));

        assert!(!t.delta_ok(10.0));
        assert!(t.delta_ok(2.0));
    }

    #[test]
    fn rules_mention_limits() {
        let rules = Thresholds::default().describe_rules();
        assert_eq!(rules.len(), 5);
        assert_eq!(rules[0], "[_._]: should be between 170° and 190°");
        assert!(rules[2].contains("12.00m"));
    }
}
