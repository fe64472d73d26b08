use crate::constants::{ANGULAR_MOMENTUM_EPSILON, ECCENTRICITY_EPSILON, TWO_PI};
use serde::Serialize;

/// Planar conic orbit derived from a radial state.
///
///   eccentricity: 0 circle, <1 ellipse, 1 parabola, >1 hyperbola
///   semi_latus_rectum: p = h²/GM
///   true_anomaly: current angle from periapsis, along the direction of travel [rad]
///   periapsis_argument: in-plane angle of periapsis measured from `C_orbit` [rad]
///   sense: +1 prograde, -1 retrograde
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConicElements {
    pub eccentricity: f64,
    pub semi_latus_rectum: f64,
    pub true_anomaly: f64,
    pub periapsis_argument: f64,
    pub sense: f64,
}

impl ConicElements {
    pub fn is_bound(&self) -> bool {
        self.eccentricity < 1.0
    }

    pub fn is_circular(&self) -> bool {
        self.eccentricity == 0.0
    }

    /// r(f) = p / (1 + e·cos f). Non-positive or infinite past the asymptotes.
    pub fn radius_at(&self, true_anomaly: f64) -> f64 {
        self.semi_latus_rectum / (1.0 + self.eccentricity * true_anomaly.cos())
    }

    /// True-anomaly interval covering the whole path.
    pub fn anomaly_range(&self) -> (f64, f64) {
        if self.is_bound() {
            (0.0, TWO_PI)
        } else {
            let limit = (-1.0 / self.eccentricity).acos();
            (-limit, limit)
        }
    }

    /// In-plane angle, measured like `true_anomaly_angle`, of the point at `true_anomaly`.
    pub fn in_plane_angle(&self, true_anomaly: f64) -> f64 {
        self.periapsis_argument + self.sense * true_anomaly
    }
}

pub struct OrbitalMechanics;

impl OrbitalMechanics {
    /// Derives the conic through `(r, vr, h)` from the two-body relations
    ///   e·cos f = h²/(GM·r) − 1
    ///   e·sin f = vr·|h|/GM
    /// Returns `None` without angular momentum, where the path is a radial line.
    pub fn conic_elements(
        radius: f64,
        radial_velocity: f64,
        angular_momentum: f64,
        angle: f64,
        gm: f64,
    ) -> Option<ConicElements> {
        if angular_momentum.abs() < ANGULAR_MOMENTUM_EPSILON || radius <= 0.0 {
            return None;
        }
        let h2 = angular_momentum * angular_momentum;
        let semi_latus_rectum = h2 / gm;
        let a = h2 / (gm * radius) - 1.0;
        let b = radial_velocity * angular_momentum.abs() / gm;

        let (eccentricity, true_anomaly) = {
            let e = a.hypot(b);
            if e < ECCENTRICITY_EPSILON {
                (0.0, 0.0)
            } else {
                (e, b.atan2(a))
            }
        };
        let sense = angular_momentum.signum();

        Some(ConicElements {
            eccentricity,
            semi_latus_rectum,
            true_anomaly,
            periapsis_argument: angle - sense * true_anomaly,
            sense,
        })
    }

    /// ω = sqrt(GM / r³)
    pub fn circular_angular_speed(radius: f64, gm: f64) -> f64 {
        (gm / radius.powi(3)).sqrt()
    }

    /// Time for one revolution at angular rate `omega`, `None` when not moving.
    pub fn angular_period(omega: f64) -> Option<f64> {
        if omega == 0.0 || !omega.is_finite() {
            None
        } else {
            Some(TWO_PI / omega.abs())
        }
    }

    /// Wraps an angle into [0, 2π).
    pub fn normalize_angle(angle: f64) -> f64 {
        let wrapped = angle.rem_euclid(TWO_PI);
        // rem_euclid can round up to exactly 2π for tiny negative inputs
        if wrapped >= TWO_PI {
            0.0
        } else {
            wrapped
        }
    }
}
