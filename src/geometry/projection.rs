use geo::Point;

use crate::domain::Center;

/// Mean earth radius in meters (IUGG)
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Below this distance (meters) a point is treated as the projection origin
const ORIGIN_EPSILON_M: f64 = 1e-9;

/// Spherical azimuthal-equidistant projection centered on the site
///
/// Local coordinates are meters with x pointing east and y pointing north. The
/// distance of a local point from the origin is the great-circle distance of the
/// corresponding geographic point from the center, at any latitude.
///
/// Geographic points are `geo::Point` with x = longitude, y = latitude (degrees).
#[derive(Debug, Clone)]
pub struct AzimuthalEquidistant {
    center: Center,
    sin_lat0: f64,
    cos_lat0: f64,
}

impl AzimuthalEquidistant {
    /// Create a projection centered at the given site
    pub fn new(center: Center) -> Self {
        let lat0 = center.lat.to_radians();
        Self {
            center,
            sin_lat0: lat0.sin(),
            cos_lat0: lat0.cos(),
        }
    }

    /// The site as a geographic point
    pub fn origin(&self) -> Point<f64> {
        Point::new(self.center.lon, self.center.lat)
    }

    /// Project a geographic point to local meters
    ///
    /// # Returns
    /// * (x, y) in meters, x east and y north of the center
    pub fn to_local(&self, geo: Point<f64>) -> (f64, f64) {
        let lat = geo.y().to_radians();
        let dlon = (geo.x() - self.center.lon).to_radians();
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_dlon, cos_dlon) = dlon.sin_cos();

        // Angular distance, haversine form
        let dlat = lat - self.center.lat.to_radians();
        let h = (dlat / 2.0).sin().powi(2) + self.cos_lat0 * cos_lat * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * h.sqrt().atan2((1.0 - h).max(0.0).sqrt());

        if c * EARTH_RADIUS_M < ORIGIN_EPSILON_M {
            return (0.0, 0.0);
        }

        let k = EARTH_RADIUS_M * c / c.sin();
        let x = k * cos_lat * sin_dlon;
        let y = k * (self.cos_lat0 * sin_lat - self.sin_lat0 * cos_lat * cos_dlon);

        (x, y)
    }

    /// Inverse of [`to_local`](Self::to_local)
    pub fn to_geo(&self, x: f64, y: f64) -> Point<f64> {
        let rho = x.hypot(y);
        if rho < ORIGIN_EPSILON_M {
            return self.origin();
        }

        let c = rho / EARTH_RADIUS_M;
        let (sin_c, cos_c) = c.sin_cos();

        let lat = (cos_c * self.sin_lat0 + y * sin_c * self.cos_lat0 / rho)
            .clamp(-1.0, 1.0)
            .asin();
        let dlon = (x * sin_c).atan2(rho * self.cos_lat0 * cos_c - y * self.sin_lat0 * sin_c);

        Point::new(normalize_lon(self.center.lon + dlon.to_degrees()), lat.to_degrees())
    }
}

fn normalize_lon(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // keep +180 rather than folding it to -180
    if wrapped == -180.0 && lon > 0.0 { 180.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> AzimuthalEquidistant {
        AzimuthalEquidistant::new(Center::new(10.0, 45.0))
    }

    #[test]
    fn test_center_maps_to_origin() {
        let proj = site();
        let (x, y) = proj.to_local(Point::new(10.0, 45.0));
        assert!(x.abs() < 1e-6);
        assert!(y.abs() < 1e-6);

        let p = proj.to_geo(0.0, 0.0);
        assert_eq!(p, Point::new(10.0, 45.0));
    }

    #[test]
    fn test_north_100m() {
        let proj = site();
        let p = proj.to_geo(0.0, 100.0);

        // Due north keeps longitude; 100m ≈ 0.000899° of latitude
        assert!((p.x() - 10.0).abs() < 1e-12);
        let expected_dlat = (100.0 / EARTH_RADIUS_M).to_degrees();
        assert!((p.y() - 45.0 - expected_dlat).abs() < 1e-9);
    }

    #[test]
    fn test_east_is_positive_x() {
        let proj = site();
        let (x, y) = proj.to_local(Point::new(10.001, 45.0));
        assert!(x > 0.0);
        // Small poleward bulge of the great circle: y is ~0 but not exact
        assert!(y.abs() < 0.1);

        // Longitude degrees shrink with cos(lat)
        let expected = 0.001_f64.to_radians() * EARTH_RADIUS_M * 45.0_f64.to_radians().cos();
        assert!((x - expected).abs() < 0.01);
    }

    #[test]
    fn test_distance_preserved() {
        let proj = AzimuthalEquidistant::new(Center::new(-122.4194, 37.7749));
        for bearing in [0.0_f64, 37.0, 90.0, 181.0, 270.0, 359.0] {
            let theta = bearing.to_radians();
            let p = proj.to_geo(250.0 * theta.sin(), 250.0 * theta.cos());
            let (x, y) = proj.to_local(p);
            assert!((x.hypot(y) - 250.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_round_trip() {
        let proj = site();
        for &(lon, lat) in &[
            (10.0, 45.0),
            (10.0012, 45.0),
            (9.9971, 45.0008),
            (10.003, 44.997),
            (9.999, 44.9991),
        ] {
            let original = Point::new(lon, lat);
            let (x, y) = proj.to_local(original);
            let back = proj.to_geo(x, y);
            assert!((back.x() - lon).abs() < 1e-9, "lon {} -> {}", lon, back.x());
            assert!((back.y() - lat).abs() < 1e-9, "lat {} -> {}", lat, back.y());
        }
    }

    #[test]
    fn test_round_trip_across_antimeridian() {
        let proj = AzimuthalEquidistant::new(Center::new(179.9995, -16.5));
        let p = proj.to_geo(200.0, 0.0);
        assert!(p.x() < 0.0);

        let (x, y) = proj.to_local(p);
        assert!((x - 200.0).abs() < 1e-6);
        assert!(y.abs() < 1e-6);
    }

    #[test]
    fn test_normalize_lon() {
        assert_eq!(normalize_lon(10.0), 10.0);
        assert_eq!(normalize_lon(190.0), -170.0);
        assert_eq!(normalize_lon(-190.0), 170.0);
        assert_eq!(normalize_lon(180.0), 180.0);
    }
}
