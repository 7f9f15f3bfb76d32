use crate::config::Config;

/// In-app yaml editor for the game configuration. The text is re-parsed on
/// every change; applying a valid config rebuilds the whole node graph.
pub struct ConfigEditor {
    selected: usize,
    source: String,
    confirm_open: bool,
    presets: Vec<(&'static str, &'static str)>,

    parsed: Option<serde_yaml::Result<Config>>,
}

impl ConfigEditor {
    pub fn new() -> Self {
        let presets = vec![
            ("classic", include_str!("../../config/classic.yaml")),
            ("training", include_str!("../../config/training.yaml")),
        ];

        let mut editor = Self {
            selected: 0,
            source: presets[0].1.to_owned(),
            confirm_open: false,
            presets,
            parsed: None,
        };
        editor.parse_source();
        editor
    }

    fn parse_source(&mut self) {
        self.parsed = Some(serde_yaml::from_str::<Config>(&self.source));
    }

    /// Draws the editor. Returns a config when the user applies a valid one.
    pub fn draw(&mut self, ui: &mut egui::Ui) -> Option<Config> {
        let mut result: Option<Config> = None;

        ui.set_enabled(!self.confirm_open);

        ui.horizontal(|ui| {
            egui::ComboBox::from_label("Preset")
                .selected_text(self.presets[self.selected].0)
                .show_ui(ui, |ui| {
                    for (i, (name, _)) in self.presets.iter().enumerate() {
                        ui.selectable_value(&mut self.selected, i, *name);
                    }
                });
            if ui.button("Load").clicked() {
                self.confirm_open = true;
            }
        });

        let edited = ui
            .add(
                egui::TextEdit::multiline(&mut self.source)
                    .code_editor()
                    .desired_rows(18)
                    .desired_width(f32::INFINITY),
            )
            .changed();
        if edited {
            self.parse_source();
        }

        // show the result of trying to convert it to a valid config object
        match &self.parsed {
            Some(Ok(c)) => {
                ui.label(format!("OK: {} nodes", c.nodes.len()));
            }
            Some(Err(e)) => {
                ui.label(format!("ERR:\n{e}"));
            }
            None => {
                ui.label("Start typing");
            }
        }

        if let Some(Ok(c)) = &self.parsed {
            if ui.button("Apply").clicked() {
                result = Some(c.clone());
            }
        }

        if self.confirm_open {
            egui::Window::new("Load preset?")
                .collapsible(false)
                .resizable(false)
                .show(ui.ctx(), |ui| {
                    ui.label(format!(
                        "Replace the editor contents with the '{}' preset?",
                        self.presets[self.selected].0
                    ));
                    ui.horizontal(|ui| {
                        if ui.button("Replace").clicked() {
                            self.source = self.presets[self.selected].1.to_owned();
                            self.parse_source();
                            self.confirm_open = false;
                        }
                        if ui.button("Cancel").clicked() {
                            self.confirm_open = false;
                        }
                    });
                });
        }

        result
    }
}

impl Default for ConfigEditor {
    fn default() -> Self {
        Self::new()
    }
}
