use std::sync::Arc;

use common::{
    marker::{MarkerId, MarkerSet},
    node::{Node, NodeConfig},
    view::MapView,
};
use egui::{Align2, Color32, FontId, Stroke};
use pubsub::{PubSub, Publisher, Subscription};
use serde::Deserialize;

/// Radius in pixels within which a click counts as hitting a marker.
const PICK_RADIUS: f32 = 12.0;

const UNFOUND: Color32 = Color32::from_rgb(240, 200, 60);
const TARGET: Color32 = Color32::from_rgb(60, 160, 75);
const DECOY: Color32 = Color32::from_rgb(200, 70, 60);

/// Draws the round's markers on the map canvas and turns clicks on them into
/// guesses.
pub struct MarkersNode {
    sub_markers: Subscription<MarkerSet>,
    pub_guess: Publisher<MarkerId>,

    markers: Option<Arc<MarkerSet>>,
}

#[derive(Clone, Deserialize)]
pub struct MarkersNodeConfig {
    topic_markers: String,
    topic_guess: String,
}

impl NodeConfig for MarkersNodeConfig {
    fn instantiate(&self, pubsub: &mut PubSub) -> Box<dyn Node> {
        Box::new(MarkersNode {
            sub_markers: pubsub.subscribe(&self.topic_markers),
            pub_guess: pubsub.publish(&self.topic_guess),
            markers: None,
        })
    }
}

impl Node for MarkersNode {
    fn update(&mut self) {
        if let Some(set) = self.sub_markers.latest() {
            self.markers = Some(set);
        }
    }

    fn draw(&mut self, _ui: &egui::Ui, map: &mut MapView<'_>) {
        let Some(set) = self.markers.clone() else {
            return;
        };
        let painter = map.painter;

        for marker in &set.markers {
            let pos = map.projection.to_screen(marker.position);
            if !map.projection.is_visible(pos) {
                continue;
            }

            if marker.found {
                let fill = if marker.target { TARGET } else { DECOY };
                painter.circle(pos, 8.0, fill, Stroke::new(1.5, Color32::WHITE));
                painter.text(
                    pos + egui::vec2(0.0, -12.0),
                    Align2::CENTER_BOTTOM,
                    &marker.label,
                    FontId::proportional(12.0),
                    Color32::from_gray(40),
                );
            } else {
                painter.circle(pos, 10.0, UNFOUND, Stroke::new(1.5, Color32::from_gray(60)));
                painter.text(
                    pos,
                    Align2::CENTER_CENTER,
                    "?",
                    FontId::proportional(13.0),
                    Color32::from_gray(40),
                );
            }
        }

        // a click guesses the nearest unfound marker within the pick radius
        if let Some(click) = map.clicked {
            let hit = set
                .markers
                .iter()
                .filter(|m| !m.found)
                .map(|m| (m, map.projection.to_screen(m.position).distance(click)))
                .filter(|(_, d)| *d <= PICK_RADIUS)
                .min_by(|(_, d1), (_, d2)| d1.total_cmp(d2));

            if let Some((marker, _)) = hit {
                self.pub_guess.publish(Arc::new(marker.id));
            }
        }
    }
}
