use super::orbit_states::OrbitState;
use crate::constants::BODY_RADIUS;
use crate::models::{Satellite, SatelliteId};
use log::warn;
use serde::Serialize;

/// A satellite leaving the simulation, reported from the tick that detected it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerminalEvent {
    pub id: SatelliteId,
    pub name: String,
    pub state: OrbitState,
    pub radius: f64,
    pub time: f64,
}

pub struct TerminalEventDetector {
    escape_radius: f64,
}

impl TerminalEventDetector {
    pub fn new(escape_radius: f64) -> Self {
        Self { escape_radius }
    }

    pub fn classify(&self, radius: f64) -> OrbitState {
        if radius <= BODY_RADIUS {
            OrbitState::Crashed
        } else if radius > self.escape_radius {
            OrbitState::Escaped
        } else {
            OrbitState::Orbiting
        }
    }

    fn transition_to(&self, satellite: &mut Satellite, new_state: OrbitState, time: f64) {
        if satellite.state != new_state {
            warn!(
                "Satellite {} ({}) at t={:.2}s: {} -> {} (r={:.3})",
                satellite.name, satellite.id, time, satellite.state, new_state, satellite.radius
            );
            satellite.state = new_state;
        }
    }

    /// Updates the satellite's state and returns an event when it just became terminal.
    pub fn evaluate_transition(
        &self,
        satellite: &mut Satellite,
        time: f64,
    ) -> Option<TerminalEvent> {
        let was_terminal = satellite.state.is_terminal();
        let new_state = self.classify(satellite.radius);
        self.transition_to(satellite, new_state, time);

        if new_state.is_terminal() && !was_terminal {
            Some(TerminalEvent {
                id: satellite.id,
                name: satellite.name.clone(),
                state: new_state,
                radius: satellite.radius,
                time,
            })
        } else {
            None
        }
    }
}
