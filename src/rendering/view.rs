use super::projection::Viewport;
use crate::config::{CanvasSize, SimulationConfig};
use crate::coordinates::{vector_to_geodetic, GeodeticBasis, GeodeticPoint, OrbitalBasis, ViewBasis};
use crate::models::Satellite;
use serde::Serialize;
use std::fmt;

/// Which velocity component a view annotates. The main view shows the net
/// angular speed, the auxiliary views look down the U and V axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViewMode {
    Net,
    U,
    V,
}

impl ViewMode {
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Net => "Net",
            ViewMode::U => "U-comp",
            ViewMode::V => "V-comp",
        }
    }

    pub fn component(&self, satellite: &Satellite) -> f64 {
        match self {
            ViewMode::Net => satellite.angular_speed(),
            ViewMode::U => satellite.speed_u,
            ViewMode::V => satellite.speed_v,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub mode: ViewMode,
    pub center: GeodeticPoint,
    pub basis: ViewBasis,
    pub canvas: CanvasSize,
    pub viewport: Viewport,
}

impl View {
    pub fn new(mode: ViewMode, center: GeodeticPoint, canvas: CanvasSize, earth_radius: f64) -> Self {
        View {
            mode,
            center,
            basis: GeodeticBasis::from_point(center),
            canvas,
            viewport: Viewport::centered(canvas.width, canvas.height, earth_radius),
        }
    }

    /// The main view hides trajectory arcs that pass below the surface.
    pub fn is_primary(&self) -> bool {
        self.mode == ViewMode::Net
    }

    /// Main view over the reference point, plus two auxiliary views centered
    /// where the orbital tangent axes pierce the sphere.
    pub fn standard_set(orbit: &OrbitalBasis, config: &SimulationConfig) -> [View; 3] {
        [
            View::new(
                ViewMode::Net,
                orbit.center(),
                config.main_canvas,
                config.main_earth_radius_px,
            ),
            View::new(
                ViewMode::U,
                vector_to_geodetic(&orbit.tangent_u),
                config.aux_canvas,
                config.aux_earth_radius_px,
            ),
            View::new(
                ViewMode::V,
                vector_to_geodetic(&orbit.tangent_v),
                config.aux_canvas,
                config.aux_earth_radius_px,
            ),
        ]
    }
}
