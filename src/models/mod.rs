pub mod satellite;

pub use satellite::{Color, Satellite, SatelliteId, SatelliteKind};
