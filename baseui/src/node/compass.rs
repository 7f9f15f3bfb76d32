use common::{
    node::{Node, NodeConfig},
    view::MapView,
};
use egui::{Align2, Color32, FontId, Sense, Stroke, Vec2};
use locator::CompassFix;
use pubsub::{PubSub, Subscription};
use serde::Deserialize;

/// Dial with a needle pointing towards the nearest unfound marker.
pub struct CompassNode {
    sub_fix: Subscription<CompassFix>,
    fix: Option<CompassFix>,
}

#[derive(Clone, Deserialize)]
pub struct CompassNodeConfig {
    topic_fix: String,
}

impl NodeConfig for CompassNodeConfig {
    fn instantiate(&self, pubsub: &mut PubSub) -> Box<dyn Node> {
        Box::new(CompassNode {
            sub_fix: pubsub.subscribe(&self.topic_fix),
            fix: None,
        })
    }
}

impl Node for CompassNode {
    fn update(&mut self) {
        if let Some(fix) = self.sub_fix.latest() {
            self.fix = Some(*fix);
        }
    }

    fn draw(&mut self, ui: &egui::Ui, _map: &mut MapView<'_>) {
        egui::Window::new("Compass")
            .resizable(false)
            .show(ui.ctx(), |ui| {
                let (response, painter) = ui.allocate_painter(Vec2::splat(110.0), Sense::hover());
                let center = response.rect.center();
                let radius = 48.0;

                painter.circle(
                    center,
                    radius,
                    Color32::from_gray(245),
                    Stroke::new(1.5, Color32::from_gray(120)),
                );

                for (label, angle) in [("N", 0.0_f32), ("E", 90.0), ("S", 180.0), ("W", 270.0)] {
                    let dir = Vec2::angled((angle - 90.0).to_radians());
                    painter.text(
                        center + dir * (radius - 10.0),
                        Align2::CENTER_CENTER,
                        label,
                        FontId::proportional(11.0),
                        Color32::from_gray(120),
                    );
                }

                if let Some(fix) = self.fix {
                    // bearing 0 is up on screen, growing clockwise
                    let theta = fix.bearing_deg.to_radians() as f32;
                    let dir = Vec2::new(theta.sin(), -theta.cos());
                    painter.arrow(
                        center - dir * (radius * 0.35),
                        dir * (radius * 1.15),
                        Stroke::new(2.5, Color32::from_rgb(200, 60, 50)),
                    );
                }

                match self.fix {
                    Some(fix) => {
                        ui.label(format!(
                            "{:.0}\u{b0}  {:.0} km",
                            fix.bearing_deg, fix.distance_km
                        ));
                    }
                    None => {
                        ui.label("no target");
                    }
                }
            });
    }
}
