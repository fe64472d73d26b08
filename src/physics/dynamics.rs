use super::gravity::radial_acceleration;
use std::ops::{Add, Mul};

pub trait EquationsOfMotion {
    type State;

    fn compute_derivative(&self, state: &Self::State) -> Self::State;
}

/// Polar state of a satellite in its orbital plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RadialState {
    pub radius: f64,
    pub radial_velocity: f64,
    pub angle: f64,
}

impl Add for RadialState {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        RadialState {
            radius: self.radius + other.radius,
            radial_velocity: self.radial_velocity + other.radial_velocity,
            angle: self.angle + other.angle,
        }
    }
}

impl Mul<f64> for RadialState {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        RadialState {
            radius: self.radius * scalar,
            radial_velocity: self.radial_velocity * scalar,
            angle: self.angle * scalar,
        }
    }
}

/// Fixed-radius motion at a constant angular rate.
pub struct CircularDynamics {
    angular_speed: f64,
}

impl CircularDynamics {
    pub fn new(angular_speed: f64) -> Self {
        Self { angular_speed }
    }
}

impl EquationsOfMotion for CircularDynamics {
    type State = RadialState;

    fn compute_derivative(&self, _state: &RadialState) -> RadialState {
        RadialState {
            angle: self.angular_speed,
            ..RadialState::default()
        }
    }
}

/// Two-body motion with conserved angular momentum. The radial acceleration
/// is scaled by `damping`.
pub struct TwoBodyDynamics {
    angular_momentum: f64,
    gm: f64,
    damping: f64,
}

impl TwoBodyDynamics {
    pub fn new(angular_momentum: f64, gm: f64, damping: f64) -> Self {
        Self {
            angular_momentum,
            gm,
            damping,
        }
    }
}

impl EquationsOfMotion for TwoBodyDynamics {
    type State = RadialState;

    fn compute_derivative(&self, state: &RadialState) -> RadialState {
        let r = state.radius;
        RadialState {
            radius: state.radial_velocity,
            radial_velocity: self.damping * radial_acceleration(r, self.angular_momentum, self.gm),
            angle: if r > 0.0 {
                self.angular_momentum / (r * r)
            } else {
                0.0
            },
        }
    }
}

/// Straight fall toward the center for satellites with no angular momentum.
/// An inbound radial velocity is kept; otherwise the body falls at `fall_speed`.
pub struct RadialFallDynamics {
    fall_speed: f64,
}

impl RadialFallDynamics {
    pub fn new(fall_speed: f64) -> Self {
        Self { fall_speed }
    }
}

impl EquationsOfMotion for RadialFallDynamics {
    type State = RadialState;

    fn compute_derivative(&self, state: &RadialState) -> RadialState {
        let radius = if state.radial_velocity < 0.0 {
            state.radial_velocity
        } else {
            -self.fall_speed
        };
        RadialState {
            radius,
            ..RadialState::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GM;
    use approx::assert_abs_diff_eq;

    #[test]
    fn two_body_derivative() {
        let dynamics = TwoBodyDynamics::new(0.5, GM, 0.1);
        let state = RadialState {
            radius: 2.0,
            radial_velocity: 0.03,
            angle: 1.0,
        };
        let d = dynamics.compute_derivative(&state);
        assert_abs_diff_eq!(d.radius, 0.03, epsilon = 1e-12);
        assert_abs_diff_eq!(d.radial_velocity, 0.1 * (0.25 / 8.0 - GM / 4.0), epsilon = 1e-12);
        assert_abs_diff_eq!(d.angle, 0.125, epsilon = 1e-12);
    }

    #[test]
    fn radial_fall_keeps_inbound_velocity() {
        let dynamics = RadialFallDynamics::new(0.1);
        let inbound = RadialState {
            radius: 1.05,
            radial_velocity: -0.5,
            angle: 0.0,
        };
        let outbound = RadialState {
            radial_velocity: 0.2,
            ..inbound
        };
        assert_eq!(dynamics.compute_derivative(&inbound).radius, -0.5);
        assert_eq!(dynamics.compute_derivative(&outbound).radius, -0.1);
    }

    #[test]
    fn state_arithmetic() {
        let a = RadialState {
            radius: 1.0,
            radial_velocity: 2.0,
            angle: 3.0,
        };
        let b = a * 2.0 + a;
        assert_eq!(
            b,
            RadialState {
                radius: 3.0,
                radial_velocity: 6.0,
                angle: 9.0
            }
        );
    }
}
