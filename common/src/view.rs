use egui::{Painter, Pos2, Rect, Vec2};
use nalgebra::Point2;

use crate::{geo::GeoPoint, mercator, viewport::Viewport};

/// Maps geographic coordinates onto a screen rectangle for one frame of
/// drawing. The viewport center sits at the center of the rectangle.
#[derive(Clone, Copy)]
pub struct MapProjection {
    viewport: Viewport,
    rect: Rect,
    center_world: Point2<f64>,
}

impl MapProjection {
    pub fn new(viewport: Viewport, rect: Rect) -> Self {
        Self {
            viewport,
            rect,
            center_world: mercator::to_world(viewport.center, viewport.zoom),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn zoom(&self) -> f64 {
        self.viewport.zoom
    }

    pub fn to_screen(&self, p: GeoPoint) -> Pos2 {
        let w = mercator::to_world(p, self.viewport.zoom);
        let size = mercator::world_size(self.viewport.zoom);

        // draw the copy of the point nearest to the viewport center so that
        // markers stay visible across the antimeridian
        let mut dx = w.x - self.center_world.x;
        if dx > size / 2.0 {
            dx -= size;
        } else if dx < -size / 2.0 {
            dx += size;
        }
        let dy = w.y - self.center_world.y;

        self.rect.center() + Vec2::new(dx as f32, dy as f32)
    }

    pub fn to_geo(&self, pos: Pos2) -> GeoPoint {
        let d = pos - self.rect.center();
        mercator::from_world(
            Point2::new(
                self.center_world.x + d.x as f64,
                self.center_world.y + d.y as f64,
            ),
            self.viewport.zoom,
        )
    }

    /// Whether a screen position is worth drawing (inside the canvas plus a
    /// small margin for partially visible shapes).
    pub fn is_visible(&self, pos: Pos2) -> bool {
        self.rect.expand(24.0).contains(pos)
    }
}

/// Everything a node needs to draw itself onto the map canvas during the
/// current frame.
pub struct MapView<'a> {
    pub painter: &'a Painter,

    pub projection: MapProjection,

    /// Geographic position under the mouse pointer while it hovers the canvas.
    pub pointer: Option<GeoPoint>,

    /// Screen position of a primary click on the canvas this frame.
    pub clicked: Option<Pos2>,
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn projection() -> MapProjection {
        let viewport = Viewport::new(GeoPoint::new(38.25343, 140.85597), 5.0, 0.0, 18.0);
        let rect = Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(800.0, 600.0));
        MapProjection::new(viewport, rect)
    }

    #[test]
    fn viewport_center_projects_to_rect_center() {
        let proj = projection();
        let center = proj.to_screen(GeoPoint::new(38.25343, 140.85597));
        assert_relative_eq!(center.x, 400.0, epsilon = 1e-3);
        assert_relative_eq!(center.y, 300.0, epsilon = 1e-3);
    }

    #[test]
    fn screen_round_trip_matches() {
        let proj = projection();
        let p = proj.to_geo(Pos2::new(620.0, 130.0));
        let back = proj.to_screen(p);
        assert_relative_eq!(back.x, 620.0, epsilon = 1e-2);
        assert_relative_eq!(back.y, 130.0, epsilon = 1e-2);
    }
}
