pub mod risk;
pub mod sector;
pub mod tier;

pub use risk::{Center, RiskTable};
pub use sector::SectorPolygon;
pub use tier::Tier;
