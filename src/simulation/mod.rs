pub mod frame;
pub mod propagator;
pub mod requests;

pub use frame::{FrameLoop, FrameOutput, FrameToken};
pub use propagator::OrbitPropagator;
pub use requests::{parse_list_index, AddSatelliteRequest, OrbitType};

use crate::config::SimulationConfig;
use crate::constants::{DEFAULT_PRESET_ALTITUDE_KM, DEMO_ALTITUDES_KM, DEMO_BASE_SPEED, PI};
use crate::coordinates::{GeodeticBasis, GeodeticPoint, OrbitalBasis};
use crate::errors::SimulationError;
use crate::fsm::TerminalEvent;
use crate::models::{Color, Satellite, SatelliteId};
use crate::physics::energy::{is_bound, specific_energy};
use crate::physics::orbital::OrbitalMechanics;
use crate::rendering::{render_frame, TextureSampler, View, ViewFrame};
use crate::scheduling::{compute_next_free_intervals, Interval};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};

/// Custom satellites enter the simulation a quarter turn from the reference point.
const CUSTOM_START_ANGLE: f64 = PI / 2.0;

/// Owns the satellite list and the orbital basis. Every mutation goes
/// through `&mut self`; renderers and the scheduler borrow it read-only.
pub struct Simulation {
    config: SimulationConfig,
    reference: GeodeticPoint,
    orbital_basis: OrbitalBasis,
    satellites: Vec<Satellite>,
    propagator: OrbitPropagator,
    next_id: u64,
    elapsed: f64,
    last_frame_ms: Option<f64>,
}

impl Simulation {
    /// Empty simulation anchored at `reference`.
    pub fn new(reference: GeodeticPoint, config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        info!(
            "Simulation anchored at lat {:.4}, lon {:.4}",
            reference.latitude, reference.longitude
        );
        Ok(Self {
            orbital_basis: GeodeticBasis::from_point(reference),
            propagator: OrbitPropagator::new(&config),
            config,
            reference,
            satellites: Vec::new(),
            next_id: 1,
            elapsed: 0.0,
            last_frame_ms: None,
        })
    }

    /// Starts from the host's geolocation result with the demo constellation
    /// in orbit. A failed lookup means there is nothing to start.
    pub fn start(
        location: Result<GeodeticPoint, String>,
        config: SimulationConfig,
    ) -> Result<Self, SimulationError> {
        let reference = location.map_err(|reason| {
            warn!("Geolocation failed: {}", reason);
            SimulationError::Geolocation(reason)
        })?;
        let mut simulation = Self::new(reference, config)?;
        simulation.spawn_demo_constellation();
        Ok(simulation)
    }

    fn allocate_id(&mut self) -> SatelliteId {
        let id = SatelliteId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn spawn_demo_constellation(&mut self) {
        for (k, altitude_km) in DEMO_ALTITUDES_KM.iter().enumerate() {
            let radius = self.config.altitude_to_radius(*altitude_km);
            let omega = OrbitalMechanics::circular_angular_speed(radius, self.config.gm);
            let id = self.allocate_id();
            let satellite = Satellite::demo(
                id,
                format!("Demo {}", k + 1),
                Color::from_palette(k),
                radius,
                k as f64 * PI / 5.0,
                DEMO_BASE_SPEED,
                omega - DEMO_BASE_SPEED,
            );
            debug!(
                "Spawned {} at r={:.3} with angular speed {:.4}",
                satellite.name,
                radius,
                satellite.angular_speed()
            );
            self.satellites.push(satellite);
        }
        info!("Demo constellation ready: {} satellites", DEMO_ALTITUDES_KM.len());
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn reference(&self) -> GeodeticPoint {
        self.reference
    }

    pub fn orbital_basis(&self) -> &OrbitalBasis {
        &self.orbital_basis
    }

    pub fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }

    pub fn satellite(&self, id: SatelliteId) -> Option<&Satellite> {
        self.satellites.iter().find(|s| s.id == id)
    }

    /// Simulated seconds since start.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Propagates every satellite by `dt` seconds. Crashed and escaped
    /// satellites are gone from the list when this returns.
    pub fn tick(&mut self, dt: f64) -> Vec<TerminalEvent> {
        if !dt.is_finite() || dt <= 0.0 {
            return Vec::new();
        }
        self.elapsed += dt;
        self.propagator.propagate(&mut self.satellites, dt, self.elapsed)
    }

    /// Frame clock entry point. The first frame only records its timestamp.
    pub fn on_frame(&mut self, timestamp_ms: f64) -> Vec<TerminalEvent> {
        let dt = match self.last_frame_ms {
            Some(last) => (timestamp_ms - last) / 1000.0,
            None => 0.0,
        };
        self.last_frame_ms = Some(timestamp_ms);
        self.tick(dt)
    }

    /// Validates and applies an add request. Nothing changes on error.
    pub fn add_satellite(
        &mut self,
        request: AddSatelliteRequest,
    ) -> Result<SatelliteId, SimulationError> {
        if let Err(e) = request.validate() {
            warn!("Rejected satellite request: {}", e);
            return Err(e);
        }

        let color = Color::from_palette(self.satellites.len());
        let gm = self.config.gm;
        let satellite = match request {
            AddSatelliteRequest::Explicit {
                speed_u,
                speed_v,
                altitude_km,
                name,
            } => {
                // A negative U component flips the whole vector and the direction of travel
                let (speed_u, speed_v, sense) = if speed_u < 0.0 {
                    (-speed_u, -speed_v, -1.0)
                } else {
                    (speed_u, speed_v, 1.0)
                };
                let radius = self.config.altitude_to_radius(altitude_km);
                let id = self.allocate_id();
                Satellite::custom(
                    id,
                    name.unwrap_or_else(|| format!("{}-{}", color, id.0)),
                    color,
                    radius,
                    CUSTOM_START_ANGLE,
                    speed_u,
                    speed_v,
                    sense * speed_u.hypot(speed_v),
                    gm,
                )
            }
            AddSatelliteRequest::Preset { orbit_type, name } => {
                let radius = self.config.altitude_to_radius(DEFAULT_PRESET_ALTITUDE_KM);
                let omega =
                    orbit_type.speed_factor() * OrbitalMechanics::circular_angular_speed(radius, gm);
                let id = self.allocate_id();
                let satellite = Satellite::custom(
                    id,
                    name,
                    color,
                    radius,
                    CUSTOM_START_ANGLE,
                    omega,
                    0.0,
                    omega,
                    gm,
                );
                let energy = specific_energy(radius, 0.0, satellite.angular_momentum, gm);
                info!(
                    "Preset {} orbit for {}: specific energy {:.4} ({})",
                    orbit_type,
                    satellite.name,
                    energy,
                    if is_bound(radius, 0.0, satellite.angular_momentum, gm) {
                        "bound"
                    } else {
                        "unbound"
                    }
                );
                satellite
            }
        };

        info!(
            "Added satellite {} ({}) at r={:.3}, angular speed {:.4}",
            satellite.name,
            satellite.id,
            satellite.radius,
            satellite.angular_speed()
        );
        let id = satellite.id;
        self.satellites.push(satellite);
        Ok(id)
    }

    pub fn remove_satellite(&mut self, id: SatelliteId) -> Result<Satellite, SimulationError> {
        let index = self
            .satellites
            .iter()
            .position(|s| s.id == id)
            .ok_or(SimulationError::UnknownSatellite(id))?;
        let removed = self.satellites.remove(index);
        info!("Deleted satellite {} ({})", removed.name, removed.id);
        Ok(removed)
    }

    /// Deletes by the 1-based position the user typed.
    pub fn remove_satellite_at(&mut self, input: &str) -> Result<Satellite, SimulationError> {
        let index = parse_list_index(input, self.satellites.len()).map_err(|e| {
            warn!("Rejected delete request '{}': {}", input, e);
            e
        })?;
        let removed = self.satellites.remove(index);
        info!("Deleted satellite {} ({})", removed.name, removed.id);
        Ok(removed)
    }

    /// Main view plus the U and V auxiliary views.
    pub fn views(&self) -> [View; 3] {
        View::standard_set(&self.orbital_basis, &self.config)
    }

    pub fn render(
        &self,
        views: &[View],
        texture: Option<&dyn TextureSampler>,
    ) -> Result<Vec<ViewFrame>, SimulationError> {
        render_frame(views, &self.satellites, &self.orbital_basis, &self.config, texture)
    }

    pub fn free_intervals(&self, now: DateTime<Utc>) -> Vec<Interval> {
        compute_next_free_intervals(&self.satellites, now, &self.config)
    }

    /// One line per satellite, numbered from 1 as the delete prompt expects.
    pub fn summary(&self) -> Vec<String> {
        self.satellites
            .iter()
            .enumerate()
            .map(|(i, s)| {
                format!(
                    "Sat {}: Color: {}, speedU: {:.2}, speedV: {:.2}, Altitude: {} km",
                    i + 1,
                    s.color,
                    s.speed_u,
                    s.speed_v,
                    self.config.radius_to_altitude(s.radius).round() as i64
                )
            })
            .collect()
    }
}
