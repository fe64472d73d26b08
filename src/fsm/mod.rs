pub mod orbit_states;
pub mod state_machine;

pub use orbit_states::OrbitState;
pub use state_machine::{TerminalEvent, TerminalEventDetector};
