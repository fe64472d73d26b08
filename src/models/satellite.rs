use crate::coordinates::OrbitalBasis;
use crate::fsm::OrbitState;
use crate::physics::orbital::{ConicElements, OrbitalMechanics};
use nalgebra as na;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SatelliteId(pub u64);

impl fmt::Display for SatelliteId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Orange,
    Pink,
}

impl Color {
    pub const PALETTE: [Color; 7] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Purple,
        Color::Orange,
        Color::Pink,
    ];

    /// Palette entry for the n-th satellite, wrapping around.
    pub fn from_palette(index: usize) -> Color {
        Self::PALETTE[index % Self::PALETTE.len()]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
            Color::Orange => "orange",
            Color::Pink => "pink",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Demo satellites move on fixed circles; custom ones follow two-body dynamics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SatelliteKind {
    Demo,
    Custom,
}

#[derive(Debug, Clone, Serialize)]
pub struct Satellite {
    pub id: SatelliteId,
    pub name: String,
    pub color: Color,
    pub kind: SatelliteKind,

    // Kinematic state (radius 1 is the body surface)
    pub radius: f64,
    pub radial_velocity: f64,
    pub angular_momentum: f64,
    pub true_anomaly_angle: f64,

    // Orientation of the orbital plane
    pub speed_u: f64,
    pub speed_v: f64,
    pub plane_angle: f64,

    /// Conic shape of custom orbits, refreshed after every propagation step.
    pub elements: Option<ConicElements>,
    pub state: OrbitState,
}

impl Satellite {
    /// Circular-policy satellite. The angular speed is the magnitude of the
    /// `(speed_u, speed_v)` components and the plane angle their direction.
    pub fn demo(
        id: SatelliteId,
        name: impl Into<String>,
        color: Color,
        radius: f64,
        angle: f64,
        speed_u: f64,
        speed_v: f64,
    ) -> Self {
        let angular_speed = speed_u.hypot(speed_v);
        Satellite {
            id,
            name: name.into(),
            color,
            kind: SatelliteKind::Demo,
            radius,
            radial_velocity: 0.0,
            angular_momentum: angular_speed * radius * radius,
            true_anomaly_angle: angle,
            speed_u,
            speed_v,
            plane_angle: speed_v.atan2(speed_u),
            elements: None,
            state: OrbitState::Orbiting,
        }
    }

    /// Two-body satellite starting with no radial velocity. `angular_speed`
    /// carries the direction of travel: negative values orbit retrograde.
    #[allow(clippy::too_many_arguments)]
    pub fn custom(
        id: SatelliteId,
        name: impl Into<String>,
        color: Color,
        radius: f64,
        angle: f64,
        speed_u: f64,
        speed_v: f64,
        angular_speed: f64,
        gm: f64,
    ) -> Self {
        let mut satellite = Satellite {
            id,
            name: name.into(),
            color,
            kind: SatelliteKind::Custom,
            radius,
            radial_velocity: 0.0,
            angular_momentum: angular_speed * radius * radius,
            true_anomaly_angle: angle,
            speed_u,
            speed_v,
            plane_angle: speed_v.atan2(speed_u),
            elements: None,
            state: OrbitState::Orbiting,
        };
        satellite.refresh_elements(gm);
        satellite
    }

    pub fn is_demo(&self) -> bool {
        self.kind == SatelliteKind::Demo
    }

    /// `h / r²`, zero when the satellite sits at the center.
    pub fn angular_speed(&self) -> f64 {
        if self.radius > 0.0 {
            self.angular_momentum / (self.radius * self.radius)
        } else {
            0.0
        }
    }

    pub fn refresh_elements(&mut self, gm: f64) {
        if self.kind == SatelliteKind::Custom {
            self.elements = OrbitalMechanics::conic_elements(
                self.radius,
                self.radial_velocity,
                self.angular_momentum,
                self.true_anomaly_angle,
                gm,
            );
        }
    }

    /// In-plane unit vector a quarter turn ahead of `C_orbit`.
    pub fn plane_direction(&self, basis: &OrbitalBasis) -> na::Vector3<f64> {
        let (sin_a, cos_a) = self.plane_angle.sin_cos();
        basis.tangent_u * cos_a + basis.tangent_v * sin_a
    }

    /// Point at `radius` and in-plane angle `angle` on this satellite's orbital plane.
    pub fn point_on_plane(&self, basis: &OrbitalBasis, radius: f64, angle: f64) -> na::Vector3<f64> {
        let dir = self.plane_direction(basis);
        let (sin_a, cos_a) = angle.sin_cos();
        (basis.forward * cos_a + dir * sin_a) * radius
    }

    pub fn position(&self, basis: &OrbitalBasis) -> na::Vector3<f64> {
        self.point_on_plane(basis, self.radius, self.true_anomaly_angle)
    }
}
