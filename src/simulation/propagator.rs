use crate::config::SimulationConfig;
use crate::constants::ANGULAR_MOMENTUM_EPSILON;
use crate::fsm::{TerminalEvent, TerminalEventDetector};
use crate::integrators::Euler;
use crate::models::{Satellite, SatelliteKind};
use crate::physics::dynamics::{
    CircularDynamics, RadialFallDynamics, RadialState, TwoBodyDynamics,
};
use log::{debug, info};

/// Advances satellites by a time step and retires the ones that crash or escape.
pub struct OrbitPropagator {
    gm: f64,
    damping: f64,
    fall_speed: f64,
    detector: TerminalEventDetector,
}

impl OrbitPropagator {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            gm: config.gm,
            damping: config.radial_damping,
            fall_speed: config.radial_fall_speed,
            detector: TerminalEventDetector::new(config.escape_radius),
        }
    }

    /// Moves one satellite forward by `dt` seconds.
    pub fn step(&self, satellite: &mut Satellite, dt: f64) {
        let state = RadialState {
            radius: satellite.radius,
            radial_velocity: satellite.radial_velocity,
            angle: satellite.true_anomaly_angle,
        };

        let next = match satellite.kind {
            SatelliteKind::Demo => {
                Euler::new(CircularDynamics::new(satellite.angular_speed())).integrate(&state, dt)
            }
            SatelliteKind::Custom if satellite.angular_momentum.abs() < ANGULAR_MOMENTUM_EPSILON => {
                Euler::new(RadialFallDynamics::new(self.fall_speed)).integrate(&state, dt)
            }
            SatelliteKind::Custom => Euler::new(TwoBodyDynamics::new(
                satellite.angular_momentum,
                self.gm,
                self.damping,
            ))
            .integrate(&state, dt),
        };

        satellite.radius = next.radius;
        satellite.radial_velocity = next.radial_velocity;
        satellite.true_anomaly_angle = next.angle;
        satellite.refresh_elements(self.gm);

        debug!(
            "Satellite {} update: r={:.3}, vr={:.3}, angle={:.3}, angularSpeed={:.3}",
            satellite.name,
            satellite.radius,
            satellite.radial_velocity,
            satellite.true_anomaly_angle,
            satellite.angular_speed()
        );
    }

    /// Steps every satellite, then removes those that reached a terminal
    /// state before returning, so later readers never see them.
    pub fn propagate(
        &self,
        satellites: &mut Vec<Satellite>,
        dt: f64,
        time: f64,
    ) -> Vec<TerminalEvent> {
        let mut events = Vec::new();
        for satellite in satellites.iter_mut() {
            self.step(satellite, dt);
            if let Some(event) = self.detector.evaluate_transition(satellite, time) {
                events.push(event);
            }
        }

        if !events.is_empty() {
            satellites.retain(|s| !s.state.is_terminal());
            for event in &events {
                info!(
                    "Removed satellite {} ({}): {}",
                    event.name, event.id, event.state
                );
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{GM, TWO_PI};
    use crate::fsm::OrbitState;
    use crate::models::{Color, SatelliteId};
    use crate::physics::orbital::OrbitalMechanics;
    use approx::assert_abs_diff_eq;

    fn custom(radius: f64, angular_speed: f64) -> Satellite {
        Satellite::custom(
            SatelliteId(1),
            "custom",
            Color::Orange,
            radius,
            0.0,
            angular_speed.abs(),
            0.0,
            angular_speed,
            GM,
        )
    }

    #[test]
    fn demo_satellite_completes_a_turn() {
        let propagator = OrbitPropagator::new(&SimulationConfig::default());
        let mut sat = Satellite::demo(SatelliteId(1), "d", Color::Red, 1.6, 0.5, 0.1, 0.0);
        let omega = sat.angular_speed();
        let steps = 600;
        let dt = TWO_PI / omega / steps as f64;
        for _ in 0..steps {
            propagator.step(&mut sat, dt);
        }
        assert_abs_diff_eq!(sat.radius, 1.6, epsilon = 1e-12);
        assert_abs_diff_eq!(sat.true_anomaly_angle - 0.5, TWO_PI, epsilon = 1e-9);
    }

    #[test]
    fn circular_two_body_orbit_is_stable() {
        let propagator = OrbitPropagator::new(&SimulationConfig::default());
        let r0 = 1.8;
        let mut sat = custom(r0, OrbitalMechanics::circular_angular_speed(r0, GM));
        let h0 = sat.angular_momentum;
        for _ in 0..5000 {
            propagator.step(&mut sat, 1.0 / 60.0);
        }
        assert_abs_diff_eq!(sat.radius, r0, epsilon = 1e-6);
        assert_eq!(sat.angular_momentum, h0);
        assert!(sat.elements.unwrap().eccentricity < 1e-5);
    }

    #[test]
    fn crash_is_removed_in_the_same_tick() {
        let propagator = OrbitPropagator::new(&SimulationConfig::default());
        let mut falling = custom(1.05, 0.0);
        falling.radial_velocity = -0.5;
        let mut sats = vec![falling, custom(1.8, 0.15)];
        sats[1].id = SatelliteId(2);

        let events = propagator.propagate(&mut sats, 0.1, 0.1);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, SatelliteId(1));
        assert_eq!(events[0].state, OrbitState::Crashed);
        assert_abs_diff_eq!(events[0].radius, 1.0, epsilon = 1e-12);
        assert_eq!(sats.len(), 1);
        assert_eq!(sats[0].id, SatelliteId(2));
    }

    #[test]
    fn fast_satellite_escapes() {
        let config = SimulationConfig {
            escape_radius: 3.0,
            radial_damping: 1.0,
            ..SimulationConfig::default()
        };
        let propagator = OrbitPropagator::new(&config);
        let r0 = 1.5;
        let mut sats = vec![custom(r0, 2.0 * OrbitalMechanics::circular_angular_speed(r0, GM))];

        let mut events = Vec::new();
        for i in 0..10_000 {
            events = propagator.propagate(&mut sats, 0.05, i as f64 * 0.05);
            if !events.is_empty() {
                break;
            }
        }
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].state, OrbitState::Escaped);
        assert!(sats.is_empty());
    }

    #[test]
    fn radial_fall_without_velocity_uses_fall_speed() {
        let propagator = OrbitPropagator::new(&SimulationConfig::default());
        let mut sat = custom(1.5, 0.0);
        propagator.step(&mut sat, 1.0);
        assert_abs_diff_eq!(sat.radius, 1.4, epsilon = 1e-12);
        assert!(sat.elements.is_none());
    }
}
