/// Radial acceleration in the rotating orbital plane: centrifugal term minus gravity.
pub fn radial_acceleration(radius: f64, angular_momentum: f64, gm: f64) -> f64 {
    let h2 = angular_momentum * angular_momentum;
    h2 / radius.powi(3) - gm / (radius * radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GM;
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    #[test_case(1.0, 0.0, -GM; "pure gravity at the surface")]
    #[test_case(2.0, 0.0, -GM / 4.0; "pure gravity at two radii")]
    #[test_case(1.6, (GM * 1.6_f64).sqrt(), 0.0; "balanced circular orbit")]
    #[test_case(1.0, 1.0, 1.0 - GM; "centrifugal dominates")]
    fn test_radial_acceleration(radius: f64, h: f64, expected: f64) {
        assert_abs_diff_eq!(radial_acceleration(radius, h, GM), expected, epsilon = 1e-12);
    }
}
