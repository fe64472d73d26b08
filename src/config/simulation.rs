use crate::constants::*;
use crate::coordinates::GeodeticPoint;
use crate::errors::SimulationError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "orbiscope";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Tunable parameters of the simulation. Every field has a default, so a
/// config file only needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub gm: f64,
    pub escape_radius: f64,
    pub radial_damping: f64,
    pub radial_fall_speed: f64,
    pub altitude_scale_km: f64,
    pub trajectory_step: f64,
    pub crossings_per_satellite: usize,
    pub interval_count: usize,
    pub dedup_tolerance_ms: i64,
    pub padding_ms: i64,
    pub main_canvas: CanvasSize,
    pub aux_canvas: CanvasSize,
    pub main_earth_radius_px: f64,
    pub aux_earth_radius_px: f64,
    pub marker_radius_px: f64,
    /// Used by the driver when no location is given on the command line.
    pub default_location: Option<GeodeticPoint>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gm: GM,
            escape_radius: ESCAPE_RADIUS,
            radial_damping: RADIAL_DAMPING,
            radial_fall_speed: RADIAL_FALL_SPEED,
            altitude_scale_km: ALTITUDE_SCALE_KM,
            trajectory_step: TRAJECTORY_STEP,
            crossings_per_satellite: CROSSINGS_PER_SATELLITE,
            interval_count: INTERVAL_COUNT,
            dedup_tolerance_ms: DEDUP_TOLERANCE_MS,
            padding_ms: PADDING_MS,
            main_canvas: CanvasSize::new(600.0, 600.0),
            aux_canvas: CanvasSize::new(400.0, 300.0),
            main_earth_radius_px: MAIN_EARTH_RADIUS_PX,
            aux_earth_radius_px: AUX_EARTH_RADIUS_PX,
            marker_radius_px: MARKER_RADIUS_PX,
            default_location: None,
        }
    }
}

impl SimulationConfig {
    pub fn from_file(path: &Path) -> Result<Self, SimulationError> {
        let contents = fs::read_to_string(path)?;
        let config: SimulationConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the user config file if there is one, otherwise the defaults.
    pub fn load() -> Result<Self, SimulationError> {
        match Self::default_path() {
            Some(path) if path.exists() => {
                log::info!("Loading configuration from {}", path.display());
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.gm.is_finite() && self.gm > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "gm must be positive, got {}",
                self.gm
            )));
        }
        if !(self.escape_radius > BODY_RADIUS) {
            return Err(SimulationError::InvalidConfig(format!(
                "escape_radius must exceed the body radius, got {}",
                self.escape_radius
            )));
        }
        if !(self.trajectory_step.is_finite() && self.trajectory_step > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "trajectory_step must be positive, got {}",
                self.trajectory_step
            )));
        }
        if !(self.altitude_scale_km > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "altitude_scale_km must be positive, got {}",
                self.altitude_scale_km
            )));
        }
        if !(self.radial_fall_speed.is_finite() && self.radial_fall_speed > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "radial_fall_speed must be positive, got {}",
                self.radial_fall_speed
            )));
        }
        if !(self.radial_damping.is_finite() && self.radial_damping >= 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "radial_damping must be a non-negative number, got {}",
                self.radial_damping
            )));
        }
        if self.padding_ms <= 0 {
            return Err(SimulationError::InvalidConfig(format!(
                "padding_ms must be positive, got {}",
                self.padding_ms
            )));
        }
        if self.dedup_tolerance_ms < 0 {
            return Err(SimulationError::InvalidConfig(format!(
                "dedup_tolerance_ms must not be negative, got {}",
                self.dedup_tolerance_ms
            )));
        }
        if self.interval_count == 0 || self.crossings_per_satellite == 0 {
            return Err(SimulationError::InvalidConfig(
                "interval_count and crossings_per_satellite must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn altitude_to_radius(&self, altitude_km: f64) -> f64 {
        BODY_RADIUS + altitude_km / self.altitude_scale_km
    }

    pub fn radius_to_altitude(&self, radius: f64) -> f64 {
        (radius - BODY_RADIUS) * self.altitude_scale_km
    }
}
