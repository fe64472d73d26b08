use crate::models::SatelliteId;
use std::{
    error::Error,
    fmt, io,
    num::{ParseFloatError, ParseIntError},
};

#[derive(Debug)]
pub enum SimulationError {
    InvalidInput { field: &'static str, reason: String },
    ParseFloatError(ParseFloatError),
    ParseIntError(ParseIntError),
    UnknownSatellite(SatelliteId),
    IndexOutOfRange { index: usize, len: usize },
    Geolocation(String),
    ResourceLoad(String),
    InvalidConfig(String),
    IoError(io::Error),
    ConfigError(serde_json::Error),
    CsvError(csv::Error),
}

impl SimulationError {
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        SimulationError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Input errors leave the simulation untouched and are shown to the user.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            SimulationError::InvalidInput { .. }
                | SimulationError::ParseFloatError(_)
                | SimulationError::ParseIntError(_)
                | SimulationError::UnknownSatellite(_)
                | SimulationError::IndexOutOfRange { .. }
                | SimulationError::Geolocation(_)
                | SimulationError::ResourceLoad(_)
        )
    }
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidInput { field, reason } => {
                write!(f, "Invalid {}: {}", field, reason)
            }
            SimulationError::ParseFloatError(e) => write!(f, "Please enter a number ({})", e),
            SimulationError::ParseIntError(e) => write!(f, "Please enter a whole number ({})", e),
            SimulationError::UnknownSatellite(id) => write!(f, "No satellite with id {}", id),
            SimulationError::IndexOutOfRange { index, len } => write!(
                f,
                "Invalid index {}. Please enter a value between 1 and {}",
                index, len
            ),
            SimulationError::Geolocation(e) => write!(f, "Location unavailable: {}", e),
            SimulationError::ResourceLoad(e) => write!(f, "Failed to load resource: {}", e),
            SimulationError::InvalidConfig(e) => write!(f, "Invalid configuration: {}", e),
            SimulationError::IoError(e) => write!(f, "I/O error: {}", e),
            SimulationError::ConfigError(e) => write!(f, "Configuration parsing error: {}", e),
            SimulationError::CsvError(e) => write!(f, "CSV writing error: {}", e),
        }
    }
}

impl Error for SimulationError {}

// Implement `From<T>` conversions for automatic error mapping
impl From<ParseFloatError> for SimulationError {
    fn from(err: ParseFloatError) -> Self {
        SimulationError::ParseFloatError(err)
    }
}

impl From<ParseIntError> for SimulationError {
    fn from(err: ParseIntError) -> Self {
        SimulationError::ParseIntError(err)
    }
}

impl From<io::Error> for SimulationError {
    fn from(err: io::Error) -> Self {
        SimulationError::IoError(err)
    }
}

impl From<serde_json::Error> for SimulationError {
    fn from(err: serde_json::Error) -> Self {
        SimulationError::ConfigError(err)
    }
}

impl From<csv::Error> for SimulationError {
    fn from(err: csv::Error) -> Self {
        SimulationError::CsvError(err)
    }
}
