use crate::errors::SimulationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ready-made launch profiles, expressed as a multiple of circular speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrbitType {
    Circular,
    Elliptical,
    Escape,
    Suborbital,
}

impl OrbitType {
    pub fn speed_factor(&self) -> f64 {
        match self {
            OrbitType::Circular => 1.0,
            OrbitType::Elliptical => 1.2,
            OrbitType::Escape => 1.5,
            OrbitType::Suborbital => 0.5,
        }
    }
}

impl fmt::Display for OrbitType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OrbitType::Circular => write!(f, "circular"),
            OrbitType::Elliptical => write!(f, "elliptical"),
            OrbitType::Escape => write!(f, "escape"),
            OrbitType::Suborbital => write!(f, "suborbital"),
        }
    }
}

impl FromStr for OrbitType {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circular" => Ok(OrbitType::Circular),
            "elliptical" | "elliptic" => Ok(OrbitType::Elliptical),
            "escape" | "hyperbolic" => Ok(OrbitType::Escape),
            "suborbital" => Ok(OrbitType::Suborbital),
            other => Err(SimulationError::invalid_input(
                "orbit type",
                format!("unknown orbit type '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AddSatelliteRequest {
    /// Angular speed components along U and V (rad/s) and altitude in km.
    Explicit {
        speed_u: f64,
        speed_v: f64,
        altitude_km: f64,
        name: Option<String>,
    },
    Preset {
        orbit_type: OrbitType,
        name: String,
    },
}

impl AddSatelliteRequest {
    /// Builds an explicit request from raw form fields.
    pub fn parse(speed_u: &str, speed_v: &str, altitude_km: &str) -> Result<Self, SimulationError> {
        let request = AddSatelliteRequest::Explicit {
            speed_u: speed_u.trim().parse()?,
            speed_v: speed_v.trim().parse()?,
            altitude_km: altitude_km.trim().parse()?,
            name: None,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn preset(orbit_type: &str, name: &str) -> Result<Self, SimulationError> {
        let request = AddSatelliteRequest::Preset {
            orbit_type: orbit_type.parse()?,
            name: name.trim().to_string(),
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        match self {
            AddSatelliteRequest::Explicit {
                speed_u,
                speed_v,
                altitude_km,
                name,
            } => {
                if !speed_u.is_finite() {
                    return Err(SimulationError::invalid_input("speedU", "must be a number"));
                }
                if !speed_v.is_finite() {
                    return Err(SimulationError::invalid_input("speedV", "must be a number"));
                }
                if !altitude_km.is_finite() || *altitude_km < 0.0 {
                    return Err(SimulationError::invalid_input(
                        "altitude",
                        "must be a non-negative number",
                    ));
                }
                if matches!(name, Some(n) if n.trim().is_empty()) {
                    return Err(SimulationError::invalid_input("name", "must not be empty"));
                }
                Ok(())
            }
            AddSatelliteRequest::Preset { name, .. } => {
                if name.trim().is_empty() {
                    return Err(SimulationError::invalid_input("name", "must not be empty"));
                }
                Ok(())
            }
        }
    }
}

/// Converts a 1-based list position typed by the user to an index.
pub fn parse_list_index(input: &str, len: usize) -> Result<usize, SimulationError> {
    let position: usize = input.trim().parse()?;
    if position == 0 || position > len {
        return Err(SimulationError::IndexOutOfRange {
            index: position,
            len,
        });
    }
    Ok(position - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn parses_explicit_request() {
        let request = AddSatelliteRequest::parse(" 0.1", "-0.05 ", "300").unwrap();
        assert_eq!(
            request,
            AddSatelliteRequest::Explicit {
                speed_u: 0.1,
                speed_v: -0.05,
                altitude_km: 300.0,
                name: None,
            }
        );
    }

    #[test_case("abc", "0.1", "100"; "non numeric speedU")]
    #[test_case("0.1", "", "100"; "empty speedV")]
    #[test_case("0.1", "0.1", "ten"; "non numeric altitude")]
    fn rejects_non_numeric_fields(u: &str, v: &str, alt: &str) {
        assert!(matches!(
            AddSatelliteRequest::parse(u, v, alt),
            Err(SimulationError::ParseFloatError(_))
        ));
    }

    #[test_case("0.1", "0.1", "-5"; "negative altitude")]
    #[test_case("NaN", "0.1", "100"; "nan speed")]
    #[test_case("0.1", "inf", "100"; "infinite speed")]
    fn rejects_invalid_values(u: &str, v: &str, alt: &str) {
        let err = AddSatelliteRequest::parse(u, v, alt).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidInput { .. }));
        assert!(err.is_user_facing());
    }

    #[test_case("Circular", OrbitType::Circular)]
    #[test_case(" elliptic ", OrbitType::Elliptical)]
    #[test_case("HYPERBOLIC", OrbitType::Escape)]
    #[test_case("suborbital", OrbitType::Suborbital)]
    fn parses_orbit_types(input: &str, expected: OrbitType) {
        assert_eq!(input.parse::<OrbitType>().unwrap(), expected);
    }

    #[test]
    fn preset_requires_name_and_known_type() {
        assert!(AddSatelliteRequest::preset("circular", "Hubble").is_ok());
        assert!(AddSatelliteRequest::preset("circular", "  ").is_err());
        assert!(AddSatelliteRequest::preset("spiral", "X").is_err());
    }

    #[test_case("1", 3, Ok(0))]
    #[test_case(" 3 ", 3, Ok(2))]
    #[test_case("0", 3, Err(()); "zero is not a position")]
    #[test_case("4", 3, Err(()); "past the end")]
    #[test_case("-1", 3, Err(()); "negative")]
    #[test_case("one", 3, Err(()); "not a number")]
    fn list_index(input: &str, len: usize, expected: Result<usize, ()>) {
        assert_eq!(parse_list_index(input, len).map_err(|_| ()), expected);
    }
}
