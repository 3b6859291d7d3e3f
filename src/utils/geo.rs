//! Great-circle distance on a spherical Earth.

use crate::core::models::Location;

/// Earth radius used by the haversine formula, in meters.
pub const EARTH_RADIUS_M: f64 = 6_378_100.0;

fn hsin(theta: f64) -> f64 {
    (theta / 2.0).sin().powi(2)
}

/// Haversine distance between two points in meters.
///
/// Accurate for the small distances a city-scale hunt deals with; it degrades
/// near antipodal points.
#[must_use]
pub fn distance(a: &Location, b: &Location) -> f64 {
    let la1 = a.latitude.to_radians();
    let lo1 = a.longitude.to_radians();
    let la2 = b.latitude.to_radians();
    let lo2 = b.longitude.to_radians();

    let h = hsin(la2 - la1) + la1.cos() * la2.cos() * hsin(lo2 - lo1);

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Whether `point` lies strictly inside the circle of `radius_m` around `center`.
#[must_use]
pub fn within(center: &Location, point: &Location, radius_m: f64) -> bool {
    distance(center, point) < radius_m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_to_self() {
        let p = Location::new(48.143_296, 11.596_526);
        assert!(distance(&p, &p).abs() < f64::EPSILON);
    }

    #[test]
    fn symmetric() {
        let a = Location::new(48.158_967, 11.490_981);
        let b = Location::new(48.166_302, 11.568_141);
        assert!((distance(&a, &b) - distance(&b, &a)).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = Location::new(10.0, 20.0);
        let b = Location::new(11.0, 20.0);
        let d = distance(&a, &b);
        // R * pi / 180 for the 6378.1 km radius
        assert!((d - 111_319.0).abs() < 50.0, "got {d}");
    }

    #[test]
    fn geofence_boundary_is_exclusive() {
        let center = Location::new(0.0, 0.0);
        let point = Location::new(1.0, 0.0);
        let d = distance(&center, &point);
        assert!(!within(&center, &point, d));
        assert!(within(&center, &point, d + 1.0));
    }
}
