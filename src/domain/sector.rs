use geo::Polygon;

use super::Tier;

/// One direction's wedge in one tier, ready for serialization
#[derive(Debug, Clone)]
pub struct SectorPolygon {
    pub direction: String,
    pub tier: Tier,
    pub risk: String,
    /// Ring in (lon, lat); geo closes it on construction
    pub polygon: Polygon<f64>,
}

impl SectorPolygon {
    pub fn new(direction: &str, tier: Tier, risk: &str, polygon: Polygon<f64>) -> Self {
        Self {
            direction: direction.to_string(),
            tier,
            risk: risk.to_string(),
            polygon,
        }
    }

    /// Value of the `Area` property, e.g. `N_R2`
    pub fn area(&self) -> String {
        self.tier.area_label(&self.direction)
    }
}
