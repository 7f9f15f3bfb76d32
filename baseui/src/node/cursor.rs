use common::{
    node::{Node, NodeConfig},
    view::MapView,
};
use pubsub::PubSub;
use serde::Deserialize;

/// Shows the geographic coordinates under the mouse pointer.
pub struct CursorNode {}

#[derive(Clone, Deserialize)]
pub struct CursorNodeConfig {}

impl NodeConfig for CursorNodeConfig {
    fn instantiate(&self, _pubsub: &mut PubSub) -> Box<dyn Node> {
        Box::new(CursorNode {})
    }
}

impl Node for CursorNode {
    fn draw(&mut self, ui: &egui::Ui, map: &mut MapView<'_>) {
        egui::Window::new("Cursor").show(ui.ctx(), |ui| {
            match map.pointer {
                Some(p) => ui.label(p.to_string()),
                None => ui.label("outside the map"),
            };
        });
    }
}
