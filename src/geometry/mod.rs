pub mod arc;
pub mod projection;

pub use arc::{DEFAULT_ARC_POINTS, sample_arc};
pub use projection::AzimuthalEquidistant;
