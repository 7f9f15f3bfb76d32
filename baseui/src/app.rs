use std::sync::Arc;

use common::{
    geo::GeoPoint,
    node::Node,
    view::{MapProjection, MapView},
    viewport::Viewport,
};
use pubsub::{PubSub, Publisher, Subscription};

use crate::{config::Config, editor::ConfigEditor};

/// Background color of the map canvas.
const OCEAN: egui::Color32 = egui::Color32::from_rgb(176, 205, 222);

pub struct App {
    pubsub: PubSub,
    nodes: Vec<Box<dyn Node>>,

    viewport: Viewport,
    pub_viewport: Publisher<Viewport>,
    sub_recenter: Subscription<GeoPoint>,
    /// Last viewport sent out, so panning only publishes actual changes.
    published: Option<Viewport>,

    editor: ConfigEditor,
    show_editor: bool,
}

impl App {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        let mut pubsub = PubSub::new();
        let nodes = config.instantiate_nodes(&mut pubsub);
        let pub_viewport = pubsub.publish(&config.settings.topic_viewport);
        let sub_recenter = pubsub.subscribe(&config.settings.topic_recenter);

        Self {
            pubsub,
            nodes,
            viewport: config.settings.viewport(),
            pub_viewport,
            sub_recenter,
            published: None,
            editor: ConfigEditor::new(),
            show_editor: false,
        }
    }

    /// Tears down the current node graph and builds the one described by
    /// `config`. Everything starts from scratch, including the game round.
    fn apply_config(&mut self, config: &Config) {
        for n in self.nodes.iter_mut() {
            n.terminate();
        }

        let mut pubsub = PubSub::new();
        self.nodes = config.instantiate_nodes(&mut pubsub);
        self.pub_viewport = pubsub.publish(&config.settings.topic_viewport);
        self.sub_recenter = pubsub.subscribe(&config.settings.topic_recenter);
        self.pubsub = pubsub;
        self.viewport = config.settings.viewport();
        self.published = None;
    }

    /// The primary map: fills the central panel, pans on drag, zooms on
    /// scroll and hands a [`MapView`] to every node for drawing.
    fn map_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());

        // recenter requests from the minimap
        if let Some(center) = self.sub_recenter.latest() {
            self.viewport.recenter(*center);
        }

        if response.dragged() {
            let delta = response.drag_delta();
            self.viewport.pan(egui::Vec2::new(-delta.x, -delta.y));
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.scroll_delta.y);
            if scroll != 0.0 {
                self.viewport.zoom_by((scroll / 240.0) as f64);
            }
        }

        if self.published != Some(self.viewport) {
            self.pub_viewport.publish(Arc::new(self.viewport));
            self.published = Some(self.viewport);
        }

        painter.rect_filled(response.rect, 0.0, OCEAN);

        let projection = MapProjection::new(self.viewport, response.rect);
        let mut map = MapView {
            painter: &painter,
            projection,
            pointer: response.hover_pos().map(|p| projection.to_geo(p)),
            clicked: response
                .clicked()
                .then(|| response.interact_pointer_pos())
                .flatten(),
        };

        for n in self.nodes.iter_mut() {
            n.draw(ui, &mut map);
        }
    }
}

impl eframe::App for App {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for n in self.nodes.iter_mut() {
            n.update();
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                #[cfg(not(target_arch = "wasm32"))] // no File->Quit on web pages!
                ui.menu_button("File", |ui| {
                    if ui.button("Quit").clicked() {
                        _frame.close();
                    }
                });
                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_editor, "Config editor");
                });
            });
        });

        if self.show_editor {
            let mut applied = None;
            let mut open = true;
            egui::Window::new("Config editor")
                .open(&mut open)
                .default_width(420.0)
                .show(ctx, |ui| {
                    applied = self.editor.draw(ui);
                });
            self.show_editor = open;

            if let Some(config) = applied {
                self.apply_config(&config);
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.map_canvas(ui);
            });

        self.pubsub.tick();
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        for n in self.nodes.iter_mut() {
            n.terminate();
        }
    }
}
