use crate::physics::dynamics::{EquationsOfMotion, RadialState};

/// Semi-implicit Euler: each component is advanced with a derivative that
/// already sees the components updated before it (radial velocity, then
/// radius, then angle).
pub struct Euler<T: EquationsOfMotion<State = RadialState>> {
    eom: T,
}

impl<T: EquationsOfMotion<State = RadialState>> Euler<T> {
    pub fn new(eom: T) -> Self {
        Euler { eom }
    }

    pub fn integrate(&self, state: &RadialState, dt: f64) -> RadialState {
        let mut next = *state;

        next.radial_velocity += self.eom.compute_derivative(&next).radial_velocity * dt;
        next.radius += self.eom.compute_derivative(&next).radius * dt;
        next.angle += self.eom.compute_derivative(&next).angle * dt;

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{GM, TWO_PI};
    use crate::physics::dynamics::{CircularDynamics, RadialFallDynamics, TwoBodyDynamics};
    use approx::assert_abs_diff_eq;

    #[test]
    fn circular_motion_returns_after_one_period() {
        let omega = 0.25;
        let integrator = Euler::new(CircularDynamics::new(omega));
        let steps = 1000;
        let dt = TWO_PI / omega / steps as f64;
        let start = RadialState {
            radius: 1.5,
            radial_velocity: 0.0,
            angle: 0.4,
        };
        let mut state = start;
        for _ in 0..steps {
            state = integrator.integrate(&state, dt);
        }
        assert_abs_diff_eq!(state.radius, start.radius, epsilon = 1e-12);
        assert_abs_diff_eq!(state.angle - start.angle, TWO_PI, epsilon = 1e-9);
    }

    #[test]
    fn radius_uses_updated_radial_velocity() {
        let integrator = Euler::new(TwoBodyDynamics::new(0.0, GM, 1.0));
        let start = RadialState {
            radius: 2.0,
            radial_velocity: 0.0,
            angle: 0.0,
        };
        let next = integrator.integrate(&start, 0.5);
        let accel = -GM / 4.0;
        assert_abs_diff_eq!(next.radial_velocity, accel * 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(next.radius, 2.0 + accel * 0.25, epsilon = 1e-12);
    }

    #[test]
    fn radial_fall_is_linear() {
        let integrator = Euler::new(RadialFallDynamics::new(0.1));
        let mut state = RadialState {
            radius: 1.05,
            radial_velocity: -0.5,
            angle: 0.3,
        };
        state = integrator.integrate(&state, 0.1);
        assert_abs_diff_eq!(state.radius, 1.0, epsilon = 1e-12);
        assert_eq!(state.radial_velocity, -0.5);
        assert_eq!(state.angle, 0.3);
    }
}
