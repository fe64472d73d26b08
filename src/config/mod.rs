pub mod simulation;

pub use simulation::{CanvasSize, SimulationConfig};
