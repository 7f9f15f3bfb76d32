//! Round bookkeeping for the hidden-marker game: one node owns the marker
//! collection, consumes guesses and republishes snapshots.

pub mod round;
pub mod source;

use std::sync::Arc;

use common::{
    marker::{MarkerId, MarkerSet},
    node::{Node, NodeConfig},
    view::MapView,
};
use pubsub::{PubSub, Publisher, Subscription};
use serde::Deserialize;
use web_time::Instant;

use crate::{
    round::Round,
    source::{markers_from_specs, MarkerSource, MarkerSourceConfig},
};

pub struct GameNode {
    pub_markers: Publisher<MarkerSet>,
    sub_guess: Subscription<MarkerId>,

    source: Box<dyn MarkerSource>,
    round: Round,
    next_id: u32,
    source_error: Option<String>,

    started: Instant,
    won_at: Option<Instant>,
    dirty: bool,
}

#[derive(Clone, Deserialize)]
pub struct GameNodeConfig {
    topic_markers: String,
    topic_guess: String,

    source: MarkerSourceConfig,
}

impl NodeConfig for GameNodeConfig {
    fn instantiate(&self, pubsub: &mut PubSub) -> Box<dyn Node> {
        let mut node = GameNode {
            pub_markers: pubsub.publish(&self.topic_markers),
            sub_guess: pubsub.subscribe(&self.topic_guess),
            source: self.source.build(),
            round: Round::default(),
            next_id: 0,
            source_error: None,
            started: Instant::now(),
            won_at: None,
            dirty: false,
        };
        node.new_round();
        Box::new(node)
    }
}

impl GameNode {
    fn new_round(&mut self) {
        let loaded = self
            .source
            .load()
            .and_then(|specs| markers_from_specs(&specs, self.next_id));

        match loaded {
            Ok(markers) => {
                self.next_id += markers.len() as u32;
                self.round = self.round.next(markers);
                self.source_error = None;
                self.started = Instant::now();
                self.won_at = None;
                self.dirty = true;
                tracing::info!(
                    round = self.round.number(),
                    markers = self.round.total(),
                    "new round started"
                );
            }
            Err(e) => {
                tracing::error!("could not load markers: {e:#}");
                self.source_error = Some(format!("{e:#}"));
            }
        }
    }

    fn elapsed_secs(&self) -> u64 {
        let end = self.won_at.unwrap_or_else(Instant::now);
        end.duration_since(self.started).as_secs()
    }
}

impl Node for GameNode {
    fn update(&mut self) {
        while let Some(id) = self.sub_guess.try_recv() {
            // the round is over once the target has been found
            if self.round.is_won() {
                continue;
            }

            match self.round.guess(*id) {
                Some(marker) if marker.target => {
                    self.won_at = Some(Instant::now());
                    self.dirty = true;
                    tracing::info!(marker = %marker.id, "target found, round won");
                }
                Some(marker) => {
                    self.dirty = true;
                    tracing::info!(marker = %marker.id, label = marker.label.as_str(), "decoy revealed");
                }
                None => {} // unknown id or already revealed
            }
        }

        if self.dirty {
            self.pub_markers.publish(Arc::new(self.round.snapshot()));
            self.dirty = false;
        }
    }

    fn draw(&mut self, ui: &egui::Ui, _map: &mut MapView<'_>) {
        egui::Window::new("Game")
            .default_width(220.0)
            .show(ui.ctx(), |ui| {
                if let Some(error) = &self.source_error {
                    ui.colored_label(egui::Color32::RED, error);
                }

                ui.label(format!("Round {}", self.round.number()));
                ui.label(format!("Source: {}", self.source.describe()));
                ui.label(format!(
                    "Revealed {} of {} markers",
                    self.round.found_count(),
                    self.round.total()
                ));
                ui.label(format!("Elapsed: {} s", self.elapsed_secs()));

                if self.round.is_won() {
                    ui.colored_label(egui::Color32::DARK_GREEN, "Target found, you win!");
                } else {
                    ui.label("The target is still hiding.");
                }

                if ui.button("New round").clicked() {
                    self.new_round();
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use common::geo::GeoPoint;

    use crate::source::MarkerSpec;

    use super::*;

    fn config() -> GameNodeConfig {
        let markers = vec![
            MarkerSpec {
                latitude: 38.25343,
                longitude: 140.85597,
                target: true,
                label: "hit".into(),
            },
            MarkerSpec {
                latitude: 60.28382,
                longitude: -43.38484,
                target: false,
                label: "miss".into(),
            },
        ];
        GameNodeConfig {
            topic_markers: "game/markers".into(),
            topic_guess: "game/guess".into(),
            source: MarkerSourceConfig::Static { markers },
        }
    }

    #[test]
    fn publishes_the_initial_snapshot() {
        let mut pubsub = PubSub::new();
        let mut sub = pubsub.subscribe::<MarkerSet>("game/markers");
        let mut node = config().instantiate(&mut pubsub);

        node.update();
        pubsub.tick();

        let set = sub.try_recv().unwrap();
        assert_eq!(set.round, 1);
        assert_eq!(set.markers.len(), 2);
        assert_eq!(set.remaining_count(), 2);
    }

    #[test]
    fn a_guess_reveals_the_marker_in_the_next_snapshot() {
        let mut pubsub = PubSub::new();
        let mut sub = pubsub.subscribe::<MarkerSet>("game/markers");
        let mut pub_guess = pubsub.publish::<MarkerId>("game/guess");
        let mut node = config().instantiate(&mut pubsub);

        node.update();
        pubsub.tick();
        let first = sub.latest().unwrap();
        let decoy = first
            .markers
            .iter()
            .find(|m| !m.target)
            .map(|m| m.id)
            .unwrap();

        pub_guess.publish(Arc::new(decoy));
        pubsub.tick();
        node.update();
        pubsub.tick();

        let set = sub.latest().unwrap();
        assert!(set.get(decoy).unwrap().found);
        assert_eq!(set.remaining_count(), 1);
        assert_eq!(GeoPoint::new(60.28382, -43.38484), set.get(decoy).unwrap().position);
    }
}
