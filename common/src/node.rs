use pubsub::PubSub;

use crate::view::MapView;

/// A Node is an entity that can publish and react to subscribed messages as
/// well as draw itself, both into floating windows and onto the map canvas.
pub trait Node {
    /// Allows the Node to update itself and perform logic. Note that this is
    /// called once per frame on the rendering thread and as such should be
    /// kept brief.
    fn update(&mut self) {}

    /// Draws the UI of the Node as well as anything that goes onto the map
    /// canvas via the [`MapView`].
    fn draw(&mut self, _ui: &egui::Ui, _map: &mut MapView<'_>) {}

    /// Called when the Node should terminate.
    fn terminate(&mut self) {}
}

pub trait NodeConfig {
    /// Constructs a new Node object. This should also subscribe or request
    /// permission to publish via the Publish/Subscribe mechanism.
    fn instantiate(&self, pubsub: &mut PubSub) -> Box<dyn Node>;
}
