pub mod geodetic;

pub use geodetic::{vector_to_geodetic, GeodeticBasis, GeodeticPoint, OrbitalBasis, ViewBasis};
