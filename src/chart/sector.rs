use geo::{LineString, Point, Polygon};

use crate::domain::{RiskTable, SectorPolygon, Tier};
use crate::error::{ChartError, Result};
use crate::geometry::{AzimuthalEquidistant, DEFAULT_ARC_POINTS, sample_arc};

/// Default inner radius in meters
pub const DEFAULT_INNER_RADIUS: f64 = 100.0;
/// Default outer radius in meters
pub const DEFAULT_OUTER_RADIUS: f64 = 200.0;

/// Chart dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartParams {
    /// Radius of the inner disc in meters
    pub inner_radius: f64,
    /// Outer edge of the annulus in meters
    pub outer_radius: f64,
    /// Segments per arc
    pub arc_points: usize,
}

impl Default for ChartParams {
    fn default() -> Self {
        Self {
            inner_radius: DEFAULT_INNER_RADIUS,
            outer_radius: DEFAULT_OUTER_RADIUS,
            arc_points: DEFAULT_ARC_POINTS,
        }
    }
}

impl ChartParams {
    pub fn with_radii(mut self, inner: f64, outer: f64) -> Self {
        self.inner_radius = inner;
        self.outer_radius = outer;
        self
    }

    pub fn with_arc_points(mut self, arc_points: usize) -> Self {
        self.arc_points = arc_points;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.inner_radius.is_finite() && self.inner_radius > 0.0) {
            return Err(ChartError::InvalidParameters(format!(
                "inner radius must be positive, got {}",
                self.inner_radius
            )));
        }
        if !(self.outer_radius.is_finite() && self.outer_radius > self.inner_radius) {
            return Err(ChartError::InvalidParameters(format!(
                "outer radius ({}) must exceed inner radius ({})",
                self.outer_radius, self.inner_radius
            )));
        }
        if self.arc_points == 0 {
            return Err(ChartError::InvalidParameters(
                "arc needs at least one segment".to_string(),
            ));
        }
        Ok(())
    }
}

/// Sector polygons for both tiers, one per direction each
#[derive(Debug, Clone, Default)]
pub struct NestedChart {
    pub inner: Vec<SectorPolygon>,
    pub outer: Vec<SectorPolygon>,
}

impl NestedChart {
    pub fn len(&self) -> usize {
        self.inner.len() + self.outer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty() && self.outer.is_empty()
    }
}

/// Bearing span `[start, end)` in degrees of the `index`-th of `count` equal sectors
pub fn sector_span(index: usize, count: usize) -> (f64, f64) {
    let width = 360.0 / count as f64;
    let start = index as f64 * width;
    (start, start + width)
}

/// Build the inner and outer sector polygons for every direction
///
/// # Algorithm
/// For direction i of N, spanning bearings `[i·360/N, (i+1)·360/N)`:
/// - Inner: center → inner arc → center, a filled pie slice
/// - Outer: outer arc followed by the reversed inner arc, an annulus strip that
///   never touches the center
///
/// Risk labels are looked up per sector; a direction missing from a tier fails
/// with [`ChartError::MissingRisk`] when that tier's sector is assembled.
pub fn build_chart(
    risks: &RiskTable,
    projection: &AzimuthalEquidistant,
    params: &ChartParams,
) -> Result<NestedChart> {
    params.validate()?;

    let directions = risks.directions();
    let mut chart = NestedChart {
        inner: Vec::with_capacity(directions.len()),
        outer: Vec::with_capacity(directions.len()),
    };
    let center = projection.origin();

    for (i, direction) in directions.iter().enumerate() {
        let (start, end) = sector_span(i, directions.len());

        let inner_arc = sample_arc(projection, params.inner_radius, start, end, params.arc_points);
        let inner_risk = risks.risk(Tier::Inner, direction)?;
        chart.inner.push(SectorPolygon::new(
            direction,
            Tier::Inner,
            inner_risk,
            pie_slice(center, &inner_arc),
        ));

        let outer_arc = sample_arc(projection, params.outer_radius, start, end, params.arc_points);
        let outer_risk = risks.risk(Tier::Outer, direction)?;
        chart.outer.push(SectorPolygon::new(
            direction,
            Tier::Outer,
            outer_risk,
            annulus_strip(&outer_arc, &inner_arc),
        ));
    }

    Ok(chart)
}

fn pie_slice(center: Point<f64>, arc: &[Point<f64>]) -> Polygon<f64> {
    let mut ring = Vec::with_capacity(arc.len() + 2);
    ring.push(center.0);
    ring.extend(arc.iter().map(|p| p.0));
    ring.push(center.0);
    Polygon::new(LineString::new(ring), Vec::new())
}

fn annulus_strip(outer_arc: &[Point<f64>], inner_arc: &[Point<f64>]) -> Polygon<f64> {
    let ring: Vec<_> = outer_arc
        .iter()
        .chain(inner_arc.iter().rev())
        .map(|p| p.0)
        .collect();
    // Polygon::new closes the ring by repeating the first outer-arc vertex
    Polygon::new(LineString::new(ring), Vec::new())
}
