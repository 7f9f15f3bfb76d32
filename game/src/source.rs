//! Where a round's markers come from.
//!
//! The game never cares how the collection was obtained; anything that can
//! produce a list of [`MarkerSpec`] entries can drive a round.

use std::{fs, path::PathBuf};

use anyhow::{bail, Context};
use common::{
    geo::GeoPoint,
    marker::{Marker, MarkerId},
};
use serde::Deserialize;

/// One marker entry as written in configuration files.
#[derive(Clone, Debug, Deserialize)]
pub struct MarkerSpec {
    pub latitude: f64,
    pub longitude: f64,

    /// Marks the single real target of the set.
    #[serde(default)]
    pub target: bool,

    pub label: String,
}

/// A capability that yields the marker entries for a new round.
pub trait MarkerSource {
    fn load(&self) -> anyhow::Result<Vec<MarkerSpec>>;

    /// Short description for the game window.
    fn describe(&self) -> String;
}

/// Selects and configures a marker source.
#[derive(Clone, Deserialize)]
pub enum MarkerSourceConfig {
    /// Markers listed inline in the app configuration.
    Static { markers: Vec<MarkerSpec> },

    /// Markers read from a standalone yaml file holding a top-level list of
    /// entries.
    File { path: PathBuf },
}

impl MarkerSourceConfig {
    pub fn build(&self) -> Box<dyn MarkerSource> {
        match self {
            MarkerSourceConfig::Static { markers } => Box::new(StaticSource {
                specs: markers.clone(),
            }),
            MarkerSourceConfig::File { path } => Box::new(FileSource { path: path.clone() }),
        }
    }
}

struct StaticSource {
    specs: Vec<MarkerSpec>,
}

impl MarkerSource for StaticSource {
    fn load(&self) -> anyhow::Result<Vec<MarkerSpec>> {
        Ok(self.specs.clone())
    }

    fn describe(&self) -> String {
        format!("{} inline markers", self.specs.len())
    }
}

struct FileSource {
    path: PathBuf,
}

impl MarkerSource for FileSource {
    fn load(&self) -> anyhow::Result<Vec<MarkerSpec>> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("could not read marker file {}", self.path.display()))?;
        serde_yaml::from_str(&contents)
            .with_context(|| format!("could not parse marker file {}", self.path.display()))
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Turns loaded entries into markers, assigning session-unique ids starting at
/// `first_id`. A set must contain exactly one target.
pub fn markers_from_specs(specs: &[MarkerSpec], first_id: u32) -> anyhow::Result<Vec<Marker>> {
    let targets = specs.iter().filter(|s| s.target).count();
    if targets != 1 {
        bail!("a marker set needs exactly one target, got {targets}");
    }

    Ok(specs
        .iter()
        .enumerate()
        .map(|(i, s)| Marker {
            id: MarkerId(first_id + i as u32),
            position: GeoPoint::new(s.latitude, s.longitude),
            target: s.target,
            found: false,
            label: s.label.clone(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(latitude: f64, target: bool) -> MarkerSpec {
        MarkerSpec {
            latitude,
            longitude: 0.0,
            target,
            label: "x".into(),
        }
    }

    #[test]
    fn ids_are_assigned_sequentially_from_the_offset() {
        let markers = markers_from_specs(&[spec(1.0, true), spec(2.0, false)], 7).unwrap();
        assert_eq!(markers[0].id, MarkerId(7));
        assert_eq!(markers[1].id, MarkerId(8));
        assert!(markers.iter().all(|m| !m.found));
    }

    #[test]
    fn a_set_without_a_target_is_rejected() {
        let err = markers_from_specs(&[spec(1.0, false)], 0).unwrap_err();
        assert!(err.to_string().contains("exactly one target"));
    }

    #[test]
    fn a_set_with_two_targets_is_rejected() {
        assert!(markers_from_specs(&[spec(1.0, true), spec(2.0, true)], 0).is_err());
    }

    #[test]
    fn marker_entries_parse_from_yaml() {
        let specs: Vec<MarkerSpec> = serde_yaml::from_str(
            r#"
- { latitude: 38.25343, longitude: 140.85597, target: true, label: "Found me!" }
- { latitude: 60.28382, longitude: -43.38484, label: "Brr." }
"#,
        )
        .unwrap();

        assert_eq!(specs.len(), 2);
        assert!(specs[0].target);
        assert!(!specs[1].target);
    }
}
