//! Web-Mercator conversions between geographic coordinates and "world pixels".
//!
//! The world is laid out the way slippy maps do it: at zoom `z` the full
//! longitude range and the latitudes within [`MAX_LATITUDE`] map onto a square
//! of `256 * 2^z` pixels, with x growing east from the antimeridian and y
//! growing south from the northern edge.

use std::f64::consts::PI;

use nalgebra::Point2;

use crate::geo::GeoPoint;

/// Side length in pixels of the whole world at zoom 0.
pub const TILE_SIZE: f64 = 256.0;

/// Latitude bound of the square Web-Mercator world.
pub const MAX_LATITUDE: f64 = 85.05113;

/// Side length in pixels of the whole world at the given zoom level.
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2f64.powf(zoom)
}

pub fn to_world(p: GeoPoint, zoom: f64) -> Point2<f64> {
    let size = world_size(zoom);

    let x = (p.longitude + 180.0) / 360.0 * size;

    let lat = p
        .latitude
        .clamp(-MAX_LATITUDE, MAX_LATITUDE)
        .to_radians();
    let y = (1.0 - ((lat.tan() + 1.0 / lat.cos()).ln()) / PI) / 2.0 * size;

    Point2::new(x, y)
}

pub fn from_world(p: Point2<f64>, zoom: f64) -> GeoPoint {
    let size = world_size(zoom);

    // x wraps around the antimeridian, y is clamped at the poles
    let longitude = p.x.rem_euclid(size) / size * 360.0 - 180.0;
    let y = p.y.clamp(0.0, size);
    let latitude = (PI * (1.0 - 2.0 * y / size)).sinh().atan().to_degrees();

    GeoPoint::new(latitude, longitude)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn world_corners_at_zoom_zero() {
        let nw = to_world(GeoPoint::new(MAX_LATITUDE, -180.0), 0.0);
        assert_relative_eq!(nw.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(nw.y, 0.0, epsilon = 1e-3);

        let origin = to_world(GeoPoint::new(0.0, 0.0), 0.0);
        assert_relative_eq!(origin.x, 128.0);
        assert_relative_eq!(origin.y, 128.0, epsilon = 1e-9);
    }

    #[test]
    fn round_trip_preserves_position() {
        let p = GeoPoint::new(49.71821, -1.94327);
        let back = from_world(to_world(p, 7.0), 7.0);
        assert_relative_eq!(back.latitude, p.latitude, epsilon = 1e-9);
        assert_relative_eq!(back.longitude, p.longitude, epsilon = 1e-9);
    }

    #[test]
    fn latitude_is_clamped_to_the_mercator_square() {
        let pole = to_world(GeoPoint::new(90.0, 0.0), 0.0);
        let limit = to_world(GeoPoint::new(MAX_LATITUDE, 0.0), 0.0);
        assert_relative_eq!(pole.y, limit.y);
    }

    #[test]
    fn x_wraps_across_the_antimeridian() {
        let p = from_world(Point2::new(256.0 + 12.8, 100.0), 0.0);
        assert_relative_eq!(p.longitude, -162.0, epsilon = 1e-9);
    }
}
