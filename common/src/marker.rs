use std::fmt::Display;

use crate::geo::GeoPoint;

/// Identifies a marker within a single session. Ids are assigned by the marker
/// source when a round is loaded; a new round gets fresh ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u32);

impl Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single marker on the map.
#[derive(Clone, Debug)]
pub struct Marker {
    pub id: MarkerId,

    pub position: GeoPoint,

    /// True for the one real target of the round, false for the decoys.
    pub target: bool,

    /// Set exactly once, when the player reveals the marker. Never cleared
    /// within a round.
    pub found: bool,

    /// Text shown once the marker has been revealed.
    pub label: String,
}

/// An immutable snapshot of all markers of the current round. Republished in
/// full after every state change.
#[derive(Clone, Debug, Default)]
pub struct MarkerSet {
    /// Counts up every time the collection is replaced by a new round.
    pub round: u64,

    pub markers: Vec<Marker>,
}

impl MarkerSet {
    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    pub fn found_count(&self) -> usize {
        self.markers.iter().filter(|m| m.found).count()
    }

    pub fn remaining_count(&self) -> usize {
        self.markers.len() - self.found_count()
    }
}
