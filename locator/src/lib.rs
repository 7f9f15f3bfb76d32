//! Nearest-marker selection: which unfound marker is closest to the current
//! viewport center, and which way the compass should point to reach it.

pub mod geodesy;

use std::sync::Arc;

use common::{
    geo::GeoPoint,
    marker::{Marker, MarkerId, MarkerSet},
    node::{Node, NodeConfig},
    viewport::Viewport,
};
use pubsub::{PubSub, Publisher, Subscription};
use serde::Deserialize;

pub use geodesy::{bearing_degrees, distance_km, wrap_180};

/// The current compass target: the nearest unfound marker, the initial bearing
/// towards it in degrees [0, 360) and the great-circle distance in kilometers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompassFix {
    pub marker: MarkerId,
    pub bearing_deg: f64,
    pub distance_km: f64,
}

/// Returns the unfound candidate closest to `viewer` together with the initial
/// bearing towards it, or `None` when every candidate has been found.
///
/// Ties are broken by the first occurrence in input order. This is a pure
/// function over its inputs and is simply re-run on every viewport or
/// marker-set change.
pub fn nearest(viewer: GeoPoint, candidates: &[Marker]) -> Option<(&Marker, f64)> {
    candidates
        .iter()
        .filter(|m| !m.found)
        .map(|m| (m, geodesy::distance_km(viewer, m.position)))
        .min_by(|(_, d1), (_, d2)| d1.total_cmp(d2))
        .map(|(m, _)| (m, geodesy::bearing_degrees(viewer, m.position)))
}

/// Wires [`nearest`] to the topics: consumes viewport and marker-set updates
/// and republishes a [`CompassFix`] whenever the answer changes.
pub struct LocatorNode {
    sub_viewport: Subscription<Viewport>,
    sub_markers: Subscription<MarkerSet>,
    pub_fix: Publisher<CompassFix>,

    viewer: Option<GeoPoint>,
    markers: Option<Arc<MarkerSet>>,
    last_fix: Option<CompassFix>,
}

#[derive(Clone, Deserialize)]
pub struct LocatorNodeConfig {
    topic_viewport: String,
    topic_markers: String,
    topic_fix: String,
}

impl NodeConfig for LocatorNodeConfig {
    fn instantiate(&self, pubsub: &mut PubSub) -> Box<dyn Node> {
        Box::new(LocatorNode {
            sub_viewport: pubsub.subscribe(&self.topic_viewport),
            sub_markers: pubsub.subscribe(&self.topic_markers),
            pub_fix: pubsub.publish(&self.topic_fix),
            viewer: None,
            markers: None,
            last_fix: None,
        })
    }
}

impl Node for LocatorNode {
    fn update(&mut self) {
        let mut changed = false;

        if let Some(vp) = self.sub_viewport.latest() {
            self.viewer = Some(vp.center);
            changed = true;
        }
        if let Some(set) = self.sub_markers.latest() {
            self.markers = Some(set);
            changed = true;
        }

        if !changed {
            return;
        }

        let (Some(viewer), Some(markers)) = (self.viewer, self.markers.as_ref()) else {
            return;
        };

        // every marker found: no new fix, the compass keeps its last one
        let Some((marker, bearing)) = nearest(viewer, &markers.markers) else {
            return;
        };

        let fix = CompassFix {
            marker: marker.id,
            bearing_deg: bearing,
            distance_km: geodesy::distance_km(viewer, marker.position),
        };

        if self.last_fix.map_or(true, |f| f.marker != fix.marker) {
            tracing::debug!(marker = %fix.marker, distance_km = fix.distance_km, "compass retargeted");
        }

        if Some(fix) != self.last_fix {
            self.pub_fix.publish(Arc::new(fix));
            self.last_fix = Some(fix);
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn marker(id: u32, latitude: f64, longitude: f64, found: bool) -> Marker {
        Marker {
            id: MarkerId(id),
            position: GeoPoint::new(latitude, longitude),
            target: false,
            found,
            label: String::new(),
        }
    }

    #[test]
    fn lone_candidate_at_the_viewer_position_is_selected() {
        let viewer = GeoPoint::new(12.0, 34.0);
        let candidates = [marker(1, 12.0, 34.0, false)];

        let (m, _) = nearest(viewer, &candidates).unwrap();
        assert_eq!(m.id, MarkerId(1));
        assert_relative_eq!(distance_km(viewer, m.position), 0.0);
    }

    #[test]
    fn all_found_yields_no_target() {
        let candidates = [marker(1, 10.0, 0.0, true), marker(2, 1.0, 0.0, true)];
        assert!(nearest(GeoPoint::new(0.0, 0.0), &candidates).is_none());
    }

    #[test]
    fn found_markers_are_never_selected_even_when_closest() {
        let candidates = [marker(1, 1.0, 0.0, true), marker(2, 10.0, 0.0, false)];

        let (m, _) = nearest(GeoPoint::new(0.0, 0.0), &candidates).unwrap();
        assert_eq!(m.id, MarkerId(2));
    }

    #[test]
    fn ties_go_to_the_first_candidate_in_input_order() {
        // equidistant, due east and due west
        let candidates = [marker(7, 0.0, 5.0, false), marker(8, 0.0, -5.0, false)];

        let (m, _) = nearest(GeoPoint::new(0.0, 0.0), &candidates).unwrap();
        assert_eq!(m.id, MarkerId(7));
    }

    #[test]
    fn closer_candidate_wins_with_northward_bearing() {
        let viewer = GeoPoint::new(0.0, 0.0);
        let candidates = [marker(1, 10.0, 0.0, false), marker(2, 1.0, 0.0, false)];

        let (m, bearing) = nearest(viewer, &candidates).unwrap();
        assert_eq!(m.id, MarkerId(2));
        assert_relative_eq!(bearing, 0.0);
        assert_relative_eq!(distance_km(viewer, m.position), 111.195, epsilon = 1e-3);
    }

    #[test]
    fn finding_the_nearest_moves_the_fix_to_the_next_closest() {
        let viewer = GeoPoint::new(0.0, 0.0);
        let mut candidates = [marker(1, 10.0, 0.0, false), marker(2, 1.0, 0.0, false)];

        let (m, _) = nearest(viewer, &candidates).unwrap();
        assert_eq!(m.id, MarkerId(2));

        candidates[1].found = true;

        let (m, _) = nearest(viewer, &candidates).unwrap();
        assert_eq!(m.id, MarkerId(1));
    }

    #[test]
    fn node_publishes_a_fix_from_topic_updates() {
        let mut pubsub = PubSub::new();
        let config = LocatorNodeConfig {
            topic_viewport: "map/viewport".into(),
            topic_markers: "game/markers".into(),
            topic_fix: "compass/fix".into(),
        };
        let mut node = config.instantiate(&mut pubsub);

        let mut pub_viewport = pubsub.publish::<Viewport>("map/viewport");
        let mut pub_markers = pubsub.publish::<MarkerSet>("game/markers");
        let mut sub_fix = pubsub.subscribe::<CompassFix>("compass/fix");

        pub_viewport.publish(Arc::new(Viewport::new(GeoPoint::new(0.0, 0.0), 4.0, 1.0, 18.0)));
        pub_markers.publish(Arc::new(MarkerSet {
            round: 1,
            markers: vec![marker(1, 10.0, 0.0, false), marker(2, 1.0, 0.0, false)],
        }));

        pubsub.tick();
        node.update();
        pubsub.tick();

        let fix = sub_fix.try_recv().unwrap();
        assert_eq!(fix.marker, MarkerId(2));
        assert_relative_eq!(fix.bearing_deg, 0.0);
        assert_relative_eq!(fix.distance_km, 111.195, epsilon = 1e-3);

        // same inputs again: no duplicate fix
        node.update();
        pubsub.tick();
        assert!(sub_fix.try_recv().is_none());
    }
}
