use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrbitState {
    Orbiting,
    Crashed,
    Escaped,
}

impl OrbitState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OrbitState::Orbiting)
    }
}

impl fmt::Display for OrbitState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OrbitState::Orbiting => write!(f, "Orbiting"),
            OrbitState::Crashed => write!(f, "Crashed"),
            OrbitState::Escaped => write!(f, "Escaped"),
        }
    }
}
