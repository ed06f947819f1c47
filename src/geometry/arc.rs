//! Arc sampling around the site
//!
//! # Angle convention
//!
//! Angles are compass bearings in degrees: 0° points north and angles grow
//! clockwise (90° east, 180° south). A sample at bearing θ and radius r sits at
//!
//! ```text
//! x = r · sin(θ)    (east)
//! y = r · cos(θ)    (north)
//! ```
//!
//! Note sin on the horizontal axis and cos on the vertical one. Swapping them
//! mirrors the chart about the NE diagonal and sectors land on the wrong bearings.

use geo::Point;

use super::AzimuthalEquidistant;

/// Default number of segments per arc
pub const DEFAULT_ARC_POINTS: usize = 30;

/// Sample an arc around the projection center
///
/// # Arguments
/// * `radius` - Distance from the site in meters
/// * `start_deg`, `end_deg` - Bearings bounding the arc
/// * `segments` - Number of segments; `segments + 1` points are returned
///
/// # Returns
/// * Points in (lon, lat), evenly spaced in bearing from `start_deg` to
///   `end_deg`, both ends included
pub fn sample_arc(
    projection: &AzimuthalEquidistant,
    radius: f64,
    start_deg: f64,
    end_deg: f64,
    segments: usize,
) -> Vec<Point<f64>> {
    // A zero-segment arc still yields its start point
    let steps = segments.max(1) as f64;

    (0..=segments)
        .map(|i| {
            let theta = (start_deg + (end_deg - start_deg) * i as f64 / steps).to_radians();
            let (x, y) = local_arc_point(radius, theta);
            projection.to_geo(x, y)
        })
        .collect()
}

/// Local (x, y) at bearing `theta` (radians) and distance `radius`
#[inline]
fn local_arc_point(radius: f64, theta: f64) -> (f64, f64) {
    (radius * theta.sin(), radius * theta.cos())
}
