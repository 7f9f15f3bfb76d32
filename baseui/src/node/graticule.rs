use common::{
    geo::GeoPoint,
    mercator,
    node::{Node, NodeConfig},
    view::{MapProjection, MapView},
};
use egui::{Color32, Pos2, Stroke};
use pubsub::PubSub;
use serde::Deserialize;

/// Background grid of meridians and parallels. The game map has no tile
/// layer, so the graticule is what makes the canvas read as a map.
pub struct GraticuleNode {}

#[derive(Clone, Deserialize)]
pub struct GraticuleNodeConfig {}

impl NodeConfig for GraticuleNodeConfig {
    fn instantiate(&self, _pubsub: &mut PubSub) -> Box<dyn Node> {
        Box::new(GraticuleNode {})
    }
}

/// Degree steps to choose from, finest first.
const STEPS: &[f64] = &[
    0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.0, 5.0, 10.0, 15.0, 30.0, 45.0,
];

/// Finest step that still keeps neighbouring lines a readable distance apart.
fn step_for(zoom: f64) -> f64 {
    let px_per_degree = mercator::world_size(zoom) / 360.0;
    STEPS
        .iter()
        .copied()
        .find(|step| step * px_per_degree >= 60.0)
        .unwrap_or(45.0)
}

fn stroke_for(degrees: f64, minor: Stroke, major: Stroke) -> Stroke {
    // accent the equator / prime meridian
    let wrapped = (degrees + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped.abs() < 1e-6 {
        major
    } else {
        minor
    }
}

impl GraticuleNode {
    fn draw_grid(&self, projection: &MapProjection, painter: &egui::Painter) {
        let rect = projection.rect();
        let step = step_for(projection.zoom());

        let minor = Stroke::new(0.5, Color32::from_gray(155));
        let major = Stroke::new(1.2, Color32::from_gray(110));

        let nw = projection.to_geo(rect.left_top());
        let se = projection.to_geo(rect.right_bottom());

        // meridians; the visible span may cross the antimeridian, so walk
        // east from the left edge until past the right edge
        let start = (nw.longitude / step).floor() * step;
        let span = (se.longitude - nw.longitude).rem_euclid(360.0);
        let count = (span / step).ceil() as i32 + 1;
        for i in 0..=count {
            let lon = start + i as f64 * step;
            let x = projection.to_screen(GeoPoint::new(0.0, lon)).x;
            painter.line_segment(
                [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
                stroke_for(lon, minor, major),
            );
        }

        // parallels, south to north within the mercator square
        let mut lat = (se.latitude / step).floor() * step;
        while lat <= nw.latitude + step {
            if lat.abs() <= mercator::MAX_LATITUDE {
                let y = projection.to_screen(GeoPoint::new(lat, nw.longitude)).y;
                painter.line_segment(
                    [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
                    stroke_for(lat, minor, major),
                );
            }
            lat += step;
        }
    }
}

impl Node for GraticuleNode {
    fn draw(&mut self, _ui: &egui::Ui, map: &mut MapView<'_>) {
        self.draw_grid(&map.projection, map.painter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_gets_finer_as_zoom_increases() {
        assert_eq!(step_for(1.0), 45.0);
        assert!(step_for(8.0) < step_for(4.0));
        assert_eq!(step_for(30.0), 0.01);
    }
}
