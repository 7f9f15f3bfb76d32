use common::marker::{Marker, MarkerId, MarkerSet};

/// State of one game round: the marker collection plus the win outcome.
///
/// Found flags only ever go from false to true within a round; starting the
/// next round replaces the whole collection.
#[derive(Clone, Debug, Default)]
pub struct Round {
    number: u64,
    markers: Vec<Marker>,
    outcome: Option<MarkerId>,
}

impl Round {
    /// Starts the next round with a fresh marker collection.
    pub fn next(&self, markers: Vec<Marker>) -> Round {
        Round {
            number: self.number + 1,
            markers,
            outcome: None,
        }
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn total(&self) -> usize {
        self.markers.len()
    }

    pub fn found_count(&self) -> usize {
        self.markers.iter().filter(|m| m.found).count()
    }

    /// The target marker that won the round, if it has been found.
    pub fn outcome(&self) -> Option<MarkerId> {
        self.outcome
    }

    pub fn is_won(&self) -> bool {
        self.outcome.is_some()
    }

    /// Marks a guessed marker as found and returns it if the guess revealed
    /// it. Unknown ids and markers that are already found return `None`; the
    /// found flag never goes back to false.
    pub fn guess(&mut self, id: MarkerId) -> Option<&Marker> {
        let marker = self.markers.iter_mut().find(|m| m.id == id)?;
        if marker.found {
            return None;
        }

        marker.found = true;
        if marker.target {
            self.outcome = Some(id);
        }

        Some(marker)
    }

    pub fn snapshot(&self) -> MarkerSet {
        MarkerSet {
            round: self.number,
            markers: self.markers.clone(),
        }
    }
}
