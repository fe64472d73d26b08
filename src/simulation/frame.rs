use super::Simulation;
use crate::errors::SimulationError;
use crate::fsm::TerminalEvent;
use crate::rendering::{TextureSampler, View, ViewFrame};
use std::rc::{Rc, Weak};

/// Keeps a `FrameLoop` running. Dropping it, or calling `cancel`, stops the loop.
#[derive(Debug)]
pub struct FrameToken {
    _alive: Rc<()>,
}

impl FrameToken {
    pub fn cancel(self) {}
}

#[derive(Debug)]
pub struct FrameOutput {
    pub events: Vec<TerminalEvent>,
    pub frames: Result<Vec<ViewFrame>, SimulationError>,
}

/// Step function the host's frame clock calls with its timestamp.
pub struct FrameLoop {
    alive: Weak<()>,
    views: Vec<View>,
}

impl FrameLoop {
    pub fn register(views: Vec<View>) -> (FrameLoop, FrameToken) {
        let token = FrameToken {
            _alive: Rc::new(()),
        };
        let frame_loop = FrameLoop {
            alive: Rc::downgrade(&token._alive),
            views,
        };
        (frame_loop, token)
    }

    pub fn is_active(&self) -> bool {
        self.alive.strong_count() > 0
    }

    pub fn views(&self) -> &[View] {
        &self.views
    }

    /// Advances the simulation to `timestamp_ms` and renders every view.
    /// Returns `None` once the token is gone.
    pub fn step(
        &self,
        simulation: &mut Simulation,
        timestamp_ms: f64,
        texture: Option<&dyn TextureSampler>,
    ) -> Option<FrameOutput> {
        if !self.is_active() {
            return None;
        }
        let events = simulation.on_frame(timestamp_ms);
        let frames = simulation.render(&self.views, texture);
        Some(FrameOutput { events, frames })
    }
}
