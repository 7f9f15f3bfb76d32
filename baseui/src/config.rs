use std::fs;

use anyhow::anyhow;
use common::{
    geo::GeoPoint,
    node::{Node, NodeConfig as _},
    viewport::Viewport,
};
use game::GameNodeConfig;
use locator::LocatorNodeConfig;
use pubsub::PubSub;
use serde::Deserialize;

use crate::node::{
    compass::CompassNodeConfig, cursor::CursorNodeConfig, graticule::GraticuleNodeConfig,
    markers::MarkersNodeConfig, minimap::MinimapNodeConfig,
};

#[derive(Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,

    pub nodes: Vec<NodeConfig>,
}

/// Initial placement and zoom limits of the primary map, plus the topics the
/// map canvas itself talks on.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,

    pub topic_viewport: String,
    pub topic_recenter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            latitude: 49.71821,
            longitude: -1.94327,
            zoom: 4.0,
            min_zoom: 1.0,
            max_zoom: 18.0,
            topic_viewport: "map/viewport".to_owned(),
            topic_recenter: "map/recenter".to_owned(),
        }
    }
}

impl Settings {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            GeoPoint::new(self.latitude, self.longitude),
            self.zoom,
            self.min_zoom,
            self.max_zoom,
        )
    }
}

#[derive(Clone, Deserialize)]
pub enum NodeConfig {
    Game(GameNodeConfig),
    Locator(LocatorNodeConfig),
    Graticule(GraticuleNodeConfig),
    Markers(MarkersNodeConfig),
    Minimap(MinimapNodeConfig),
    Compass(CompassNodeConfig),
    Cursor(CursorNodeConfig),
}

impl NodeConfig {
    fn instantiate(&self, pubsub: &mut PubSub) -> Box<dyn Node> {
        use NodeConfig::*;
        match self {
            Game(c) => c.instantiate(pubsub),
            Locator(c) => c.instantiate(pubsub),
            Graticule(c) => c.instantiate(pubsub),
            Markers(c) => c.instantiate(pubsub),
            Minimap(c) => c.instantiate(pubsub),
            Compass(c) => c.instantiate(pubsub),
            Cursor(c) => c.instantiate(pubsub),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        // read file contents
        let contents = fs::read_to_string(path)?;

        serde_yaml::from_str(&contents).map_err(|e| anyhow!(e))
    }

    /// The built-in game used when no config file is given.
    pub fn classic() -> anyhow::Result<Self> {
        serde_yaml::from_str(include_str!("../../config/classic.yaml")).map_err(|e| anyhow!(e))
    }

    pub fn instantiate_nodes(&self, pubsub: &mut PubSub) -> Vec<Box<dyn Node>> {
        self.nodes
            .iter()
            .map(|config| config.instantiate(pubsub))
            .collect()
    }
}
