/// Specific orbital energy ½(vr² + (h/r)²) − GM/r. Negative means bound.
pub fn specific_energy(radius: f64, radial_velocity: f64, angular_momentum: f64, gm: f64) -> f64 {
    let transverse = angular_momentum / radius;
    0.5 * (radial_velocity * radial_velocity + transverse * transverse) - gm / radius
}

pub fn is_bound(radius: f64, radial_velocity: f64, angular_momentum: f64, gm: f64) -> bool {
    specific_energy(radius, radial_velocity, angular_momentum, gm) < 0.0
}
