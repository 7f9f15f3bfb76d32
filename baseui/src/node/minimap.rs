use std::sync::Arc;

use common::{
    geo::GeoPoint,
    node::{Node, NodeConfig},
    view::{MapProjection, MapView},
    viewport::Viewport,
};
use egui::{Color32, Pos2, Sense, Stroke, Vec2};
use pubsub::{PubSub, Publisher, Subscription};
use serde::Deserialize;

fn default_zoom() -> f64 {
    1.0
}

/// Small fixed-zoom overview in its own window, synchronized with the primary
/// map: it follows the primary viewport center, and dragging or clicking
/// inside it moves the primary map instead.
pub struct MinimapNode {
    sub_viewport: Subscription<Viewport>,
    pub_recenter: Publisher<GeoPoint>,

    center: GeoPoint,
    zoom: f64,
    /// While the pointer is over the minimap, incoming viewport updates are
    /// ignored so they do not fight the interaction.
    active: bool,
}

#[derive(Clone, Deserialize)]
pub struct MinimapNodeConfig {
    topic_viewport: String,
    topic_recenter: String,

    #[serde(default = "default_zoom")]
    zoom: f64,
}

impl NodeConfig for MinimapNodeConfig {
    fn instantiate(&self, pubsub: &mut PubSub) -> Box<dyn Node> {
        Box::new(MinimapNode {
            sub_viewport: pubsub.subscribe(&self.topic_viewport),
            pub_recenter: pubsub.publish(&self.topic_recenter),
            center: GeoPoint::default(),
            zoom: self.zoom,
            active: false,
        })
    }
}

impl Node for MinimapNode {
    fn update(&mut self) {
        if let Some(vp) = self.sub_viewport.latest() {
            if !self.active {
                self.center = vp.center;
            }
        }
    }

    fn draw(&mut self, ui: &egui::Ui, _map: &mut MapView<'_>) {
        egui::Window::new("Minimap")
            .resizable(false)
            .show(ui.ctx(), |ui| {
                let (response, painter) =
                    ui.allocate_painter(Vec2::new(360.0, 200.0), Sense::click_and_drag());

                self.active = response.hovered();

                let rect = response.rect;
                let viewport = Viewport::new(self.center, self.zoom, self.zoom, self.zoom);
                let projection = MapProjection::new(viewport, rect);

                painter.rect_filled(rect, 0.0, Color32::from_rgb(176, 205, 222));

                // coarse grid so the overview reads as a map
                let stroke = Stroke::new(0.5, Color32::from_gray(150));
                for lon in (-180..180).step_by(45) {
                    let x = projection.to_screen(GeoPoint::new(0.0, lon as f64)).x;
                    painter.line_segment(
                        [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
                        stroke,
                    );
                }
                for lat in (-60..=80).step_by(20) {
                    let y = projection.to_screen(GeoPoint::new(lat as f64, 0.0)).y;
                    painter.line_segment(
                        [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
                        stroke,
                    );
                }

                // where the primary map currently is
                let pos = projection.to_screen(self.center);
                let accent = Color32::from_rgb(30, 100, 200);
                painter.circle_filled(pos, 3.5, accent);
                painter.circle(pos, 7.0, Color32::TRANSPARENT, Stroke::new(1.0, accent));

                // dragging or clicking jumps the primary map there
                if response.dragged() || response.clicked() {
                    if let Some(pointer) = response.interact_pointer_pos() {
                        let target = projection.to_geo(pointer);
                        self.center = target;
                        self.pub_recenter.publish(Arc::new(target));
                    }
                }
            });
    }
}
