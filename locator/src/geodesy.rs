//! Great-circle math on the mean-radius sphere.

use common::geo::GeoPoint;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Great-circle distance between two points in kilometers (haversine).
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let dphi = (b.latitude - a.latitude).to_radians();
    let dlambda = (b.longitude - a.longitude).to_radians();

    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Initial compass bearing (forward azimuth) from `a` towards `b` in degrees,
/// normalized to [0, 360). 0 points north, angles grow clockwise.
pub fn bearing_degrees(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let dlambda = (b.longitude - a.longitude).to_radians();

    let y = dlambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlambda.cos();

    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// Folds an angle in degrees into (-180, 180].
pub fn wrap_180(degrees: f64) -> f64 {
    let d = degrees.rem_euclid(360.0);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let p = GeoPoint::new(38.25343, 140.85597);
        assert_relative_eq!(distance_km(p, p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (GeoPoint::new(49.71821, -1.94327), GeoPoint::new(38.25343, 140.85597)),
            (GeoPoint::new(-33.20488, -70.81294), GeoPoint::new(60.28382, -43.38484)),
            (GeoPoint::new(0.0, 179.9), GeoPoint::new(0.0, -179.9)),
        ];
        for (a, b) in pairs {
            assert_relative_eq!(distance_km(a, b), distance_km(b, a), epsilon = 1e-9);
        }
    }

    #[test]
    fn one_degree_of_latitude_is_111_km() {
        let d = distance_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
        assert_relative_eq!(d, 111.195, epsilon = 1e-3);
    }

    #[test]
    fn quarter_turn_along_the_equator() {
        let d = distance_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 90.0));
        assert_relative_eq!(d, std::f64::consts::PI * EARTH_RADIUS_KM / 2.0, epsilon = 1e-6);
    }

    #[test]
    fn cardinal_bearings() {
        let origin = GeoPoint::new(0.0, 0.0);
        assert_relative_eq!(bearing_degrees(origin, GeoPoint::new(10.0, 0.0)), 0.0);
        assert_relative_eq!(bearing_degrees(origin, GeoPoint::new(0.0, 10.0)), 90.0);
        assert_relative_eq!(bearing_degrees(origin, GeoPoint::new(-10.0, 0.0)), 180.0);
        assert_relative_eq!(bearing_degrees(origin, GeoPoint::new(0.0, -10.0)), 270.0);
    }

    #[test]
    fn bearing_stays_in_range() {
        let a = GeoPoint::new(38.25343, 140.85597);
        let b = GeoPoint::new(49.71821, -1.94327);
        let bearing = bearing_degrees(a, b);
        assert!((0.0..360.0).contains(&bearing));
    }

    #[test]
    fn wrap_180_folds_into_signed_range() {
        assert_relative_eq!(wrap_180(270.0), -90.0);
        assert_relative_eq!(wrap_180(180.0), 180.0);
        assert_relative_eq!(wrap_180(-190.0), 170.0);
        assert_relative_eq!(wrap_180(360.0), 0.0);
    }
}
