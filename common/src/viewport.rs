use egui::Vec2;

use crate::{geo::GeoPoint, mercator};

/// The visible region of the primary map: a center coordinate plus zoom level,
/// together with the zoom limits the map was configured with. The center is
/// also the "viewer position" the nearest-marker search runs from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub center: GeoPoint,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Viewport {
    pub fn new(center: GeoPoint, zoom: f64, min_zoom: f64, max_zoom: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
        }
    }

    /// Moves the center by the given screen-pixel delta at the current zoom.
    /// Longitude wraps across the antimeridian, latitude stops at the edge of
    /// the mercator square.
    pub fn pan(&mut self, delta: Vec2) {
        let mut w = mercator::to_world(self.center, self.zoom);
        w.x += delta.x as f64;
        w.y += delta.y as f64;
        self.center = mercator::from_world(w, self.zoom);
    }

    pub fn zoom_by(&mut self, delta: f64) {
        self.zoom = (self.zoom + delta).clamp(self.min_zoom, self.max_zoom);
    }

    pub fn recenter(&mut self, center: GeoPoint) {
        self.center = center;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(GeoPoint::new(0.0, 0.0), 0.0, 0.0, 18.0)
    }

    #[test]
    fn pan_east_wraps_longitude() {
        let mut vp = viewport();
        // half the world eastwards at zoom 0 lands on the antimeridian
        vp.pan(Vec2::new(128.0, 0.0));
        assert_relative_eq!(vp.center.longitude, -180.0, epsilon = 1e-9);
        assert_relative_eq!(vp.center.latitude, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn pan_north_stops_at_the_mercator_edge() {
        let mut vp = viewport();
        vp.pan(Vec2::new(0.0, -10_000.0));
        assert_relative_eq!(vp.center.latitude, mercator::MAX_LATITUDE, epsilon = 1e-3);
    }

    #[test]
    fn zoom_is_clamped_to_the_configured_range() {
        let mut vp = viewport();
        vp.zoom_by(100.0);
        assert_relative_eq!(vp.zoom, 18.0);
        vp.zoom_by(-100.0);
        assert_relative_eq!(vp.zoom, 0.0);
    }
}
