//! Draws findings as GeoJSON, so an editor can see what's wrong with each fork.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};

use dogleg::{
    incoming_last_sub_segment, offramp_second_sub_segment, Check, SubSegment, ValidationResult,
};
use geom::LonLat;
use map_model::RoadNetwork;

pub fn make_overlay<N: RoadNetwork + ?Sized>(
    net: &N,
    findings: &[ValidationResult],
) -> FeatureCollection {
    let mut features = Vec::new();
    for result in findings {
        features.extend(draw_fork(net, result));
    }
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn draw_fork<N: RoadNetwork + ?Sized>(net: &N, result: &ValidationResult) -> Vec<Feature> {
    let mut features = Vec::new();
    let candidate = &result.candidate;
    let incoming = match net
        .segment(candidate.incoming)
        .and_then(|s| incoming_last_sub_segment(s).ok())
    {
        Some(sub) => sub,
        None => {
            warn!("Can't draw {}", candidate);
            return features;
        }
    };
    // The ramp might not have a second sub-segment at all
    let ramp = net
        .segment(candidate.offramp)
        .and_then(|s| offramp_second_sub_segment(s).ok());

    // In short-circuit mode, only the first failure gets drawn as an error.
    let reported = result.reported_failures();
    let length_failed = |check: Check| reported.iter().any(|(c, m)| *c == check && m.is_some());
    features.push(leg(
        &incoming,
        length_failed(Check::IncomingLength),
        !result.is_valid(),
    ));
    if let Some(ref ramp) = ramp {
        features.push(leg(
            ramp,
            length_failed(Check::OfframpLength),
            !result.is_valid(),
        ));
    }

    for label in result.labels() {
        let (pt, x_offset, y_offset) = match label.check {
            Check::IncomingLength => (incoming.pt1, 30, 30),
            Check::Angle1 => (incoming.pt2, 30, -30),
            Check::Angle2 => (incoming.pt2, 30, 30),
            Check::OfframpLength => match ramp {
                Some(ref ramp) => (ramp.pt1, -30, -30),
                None => continue,
            },
            Check::Delta => match ramp {
                Some(ref ramp) => (ramp.pt1, 30, 30),
                None => continue,
            },
        };
        let mut properties = JsonObject::new();
        properties.insert("label".to_string(), label.text.into());
        properties.insert("xOffset".to_string(), x_offset.into());
        properties.insert("yOffset".to_string(), y_offset.into());
        features.push(feature(Value::Point(pt.to_position()), properties));
    }
    features
}

// Legs whose length is wrong are errors; the other legs of an invalid fork are warnings.
fn leg(sub: &SubSegment, length_failed: bool, invalid: bool) -> Feature {
    let mut properties = JsonObject::new();
    if length_failed {
        properties.insert("isError".to_string(), true.into());
    } else {
        properties.insert("isWarning".to_string(), invalid.into());
    }
    let pts: Vec<Vec<f64>> = sub.points().into_iter().map(LonLat::to_position).collect();
    feature(Value::LineString(pts), properties)
}

fn feature(value: Value, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use abstutil::Timer;
    use dogleg::{detect_fork_by_id, validate, Thresholds};
    use map_model::raw::{RawJunction, RawMap, RawSegment};
    use map_model::{Direction, Map, RoadType, SegmentID};

    // An incoming freeway from the west, continuing east, with an off-ramp whose second
    // sub-segment is too short.
    fn map() -> Map {
        map_with_incoming(20.0)
    }

    fn map_with_incoming(incoming_length: f64) -> Map {
        let j = LonLat::new(0.0, 0.0);
        let bend = j.offset_meters(8.19, -5.74);
        let raw = RawMap {
            name: "overlay".to_string(),
            segments: vec![
                RawSegment::new(
                    1,
                    RoadType::Freeway,
                    Direction::AtoB,
                    10,
                    100,
                    &[j.offset_meters(-incoming_length, 0.0), j],
                ),
                RawSegment::new(
                    2,
                    RoadType::Freeway,
                    Direction::AtoB,
                    100,
                    200,
                    &[j, j.offset_meters(50.0, 0.0)],
                ),
                RawSegment::new(
                    3,
                    RoadType::Ramp,
                    Direction::AtoB,
                    100,
                    300,
                    &[j, bend, bend.offset_meters(8.0, 0.0)],
                ),
            ],
            junctions: vec![RawJunction::new(100, vec![1, 2, 3])],
            banned_turns: Vec::new(),
        };
        Map::create_from_raw(raw, &mut Timer::throwaway())
    }

    fn property<'a>(f: &'a Feature, key: &str) -> Option<&'a serde_json::Value> {
        f.properties.as_ref().and_then(|p| p.get(key))
    }

    #[test]
    fn short_ramp_is_an_error() {
        let map = map();
        let candidate = detect_fork_by_id(&map, SegmentID(1)).unwrap();
        let result = validate(&map, &candidate, &Thresholds::default(), false).unwrap();
        assert!(!result.is_valid());

        let overlay = make_overlay(&map, &[result]);
        // Two legs and one label
        assert_eq!(overlay.features.len(), 3);
        let incoming = &overlay.features[0];
        assert_eq!(property(incoming, "isWarning"), Some(&true.into()));
        assert_eq!(property(incoming, "isError"), None);
        let ramp = &overlay.features[1];
        assert_eq!(property(ramp, "isError"), Some(&true.into()));
        let label = &overlay.features[2];
        assert_eq!(property(label, "label"), Some(&"8.00m".into()));
        assert_eq!(property(label, "xOffset"), Some(&(-30).into()));
    }

    #[test]
    fn short_circuit_only_flags_the_first_failure() {
        let map = map_with_incoming(8.0);
        let candidate = detect_fork_by_id(&map, SegmentID(1)).unwrap();
        let result = validate(&map, &candidate, &Thresholds::default(), true).unwrap();
        assert_eq!(result.failures().len(), 2);

        let overlay = make_overlay(&map, &[result]);
        assert_eq!(overlay.features.len(), 3);
        assert_eq!(property(&overlay.features[0], "isError"), Some(&true.into()));
        let ramp = &overlay.features[1];
        assert_eq!(property(ramp, "isError"), None);
        assert_eq!(property(ramp, "isWarning"), Some(&true.into()));
        assert_eq!(property(&overlay.features[2], "label"), Some(&"8.00m".into()));

        // Without short-circuiting, both legs are errors
        let result = validate(&map, &candidate, &Thresholds::default(), false).unwrap();
        let overlay = make_overlay(&map, &[result]);
        assert_eq!(overlay.features.len(), 4);
        assert_eq!(property(&overlay.features[1], "isError"), Some(&true.into()));
    }

    #[test]
    fn valid_forks_are_plain() {
        let map = map();
        let candidate = detect_fork_by_id(&map, SegmentID(1)).unwrap();
        let thresholds = Thresholds {
            offramp_min_length: geom::Distance::meters(5.0),
            ..Default::default()
        };
        let result = validate(&map, &candidate, &thresholds, false).unwrap();
        assert!(result.is_valid());

        let overlay = make_overlay(&map, &[result]);
        assert_eq!(overlay.features.len(), 2);
        for f in &overlay.features {
            assert_eq!(property(f, "isWarning"), Some(&false.into()));
        }
    }
}
