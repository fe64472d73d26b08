use crate::errors::SimulationError;
use nalgebra as na;
use serde::{Deserialize, Serialize};

/// Latitude/longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodeticPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeodeticPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, SimulationError> {
        if !latitude.is_finite() || latitude.abs() > 90.0 {
            return Err(SimulationError::invalid_input(
                "latitude",
                format!("{} is outside [-90, 90]", latitude),
            ));
        }
        if !longitude.is_finite() {
            return Err(SimulationError::invalid_input(
                "longitude",
                format!("{} is not a finite angle", longitude),
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Orthonormal frame anchored at a geodetic point.
///
/// `forward` points from the sphere center through the point, `tangent_u`
/// and `tangent_v` span the local tangent plane. At the poles `tangent_u`
/// no longer depends on longitude; the frame stays orthonormal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticBasis {
    pub forward: na::Vector3<f64>,
    pub tangent_u: na::Vector3<f64>,
    pub tangent_v: na::Vector3<f64>,
}

/// Frame in which satellite orbital-plane angles are measured.
pub type OrbitalBasis = GeodeticBasis;

/// Frame used to project 3D points into one camera's 2D plane.
pub type ViewBasis = GeodeticBasis;

impl GeodeticBasis {
    pub fn from_lat_lon(latitude_deg: f64, longitude_deg: f64) -> Self {
        let (slat, clat) = latitude_deg.to_radians().sin_cos();
        let (slon, clon) = longitude_deg.to_radians().sin_cos();

        GeodeticBasis {
            forward: na::Vector3::new(clat * clon, clat * slon, slat),
            tangent_u: na::Vector3::new(slon, -clon, 0.0),
            tangent_v: na::Vector3::new(slat * clon, slat * slon, -clat),
        }
    }

    pub fn from_point(point: GeodeticPoint) -> Self {
        Self::from_lat_lon(point.latitude, point.longitude)
    }

    pub fn center(&self) -> GeodeticPoint {
        vector_to_geodetic(&self.forward)
    }
}

/// Recovers the geodetic point a unit vector passes through.
pub fn vector_to_geodetic(v: &na::Vector3<f64>) -> GeodeticPoint {
    GeodeticPoint {
        latitude: v.z.clamp(-1.0, 1.0).asin().to_degrees(),
        longitude: v.y.atan2(v.x).to_degrees(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use test_case::test_case;

    fn assert_orthonormal(basis: &GeodeticBasis) {
        assert_abs_diff_eq!(basis.forward.norm(), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(basis.tangent_u.norm(), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(basis.tangent_v.norm(), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(basis.forward.dot(&basis.tangent_u), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(basis.forward.dot(&basis.tangent_v), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(basis.tangent_u.dot(&basis.tangent_v), 0.0, epsilon = 1e-9);
    }

    #[test_case(0.0, 0.0; "equator prime meridian")]
    #[test_case(48.8566, 2.3522; "paris")]
    #[test_case(-33.87, 151.21; "sydney")]
    #[test_case(90.0, 45.0; "north pole")]
    #[test_case(-90.0, -120.0; "south pole")]
    #[test_case(12.0, 540.0; "longitude past a full turn")]
    fn basis_is_orthonormal(lat: f64, lon: f64) {
        assert_orthonormal(&GeodeticBasis::from_lat_lon(lat, lon));
    }

    #[test]
    fn random_points_give_orthonormal_bases() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let lat = rng.gen_range(-90.0..=90.0);
            let lon = rng.gen_range(-180.0..=180.0);
            assert_orthonormal(&GeodeticBasis::from_lat_lon(lat, lon));
        }
    }

    #[test]
    fn equator_basis_axes() {
        let basis = GeodeticBasis::from_lat_lon(0.0, 0.0);
        assert_abs_diff_eq!(basis.forward, na::Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(basis.tangent_u, na::Vector3::new(0.0, -1.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(basis.tangent_v, na::Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-12);
    }

    #[test]
    fn pole_basis_stays_orthonormal() {
        let a = GeodeticBasis::from_lat_lon(90.0, 10.0);
        let b = GeodeticBasis::from_lat_lon(90.0, 100.0);
        assert_abs_diff_eq!(a.forward, b.forward, epsilon = 1e-12);
        assert_abs_diff_eq!(a.forward, na::Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
        // Only longitude orients the tangent plane at the pole
        for basis in [a, b] {
            assert_orthonormal(&basis);
            assert_abs_diff_eq!(basis.tangent_u.z, 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(basis.tangent_v.z, 0.0, epsilon = 1e-12);
        }
        assert!((a.tangent_u - b.tangent_u).norm() > 0.1);
    }

    #[test_case(48.8566, 2.3522)]
    #[test_case(-45.0, -170.0)]
    #[test_case(0.0, 179.0)]
    fn center_inverts_construction(lat: f64, lon: f64) {
        let center = GeodeticBasis::from_lat_lon(lat, lon).center();
        assert_abs_diff_eq!(center.latitude, lat, epsilon = 1e-9);
        assert_abs_diff_eq!(center.longitude, lon, epsilon = 1e-9);
    }

    #[test]
    fn auxiliary_centers_from_tangents() {
        let basis = GeodeticBasis::from_lat_lon(30.0, 40.0);
        let u_center = vector_to_geodetic(&basis.tangent_u);
        let v_center = vector_to_geodetic(&basis.tangent_v);
        // U lies on the equator a quarter turn west of the reference meridian
        assert_abs_diff_eq!(u_center.latitude, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(u_center.longitude, -50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v_center.latitude, -60.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v_center.longitude, 40.0, epsilon = 1e-9);
    }

    #[test_case(91.0, 0.0; "latitude too large")]
    #[test_case(f64::NAN, 0.0; "nan latitude")]
    #[test_case(0.0, f64::INFINITY; "infinite longitude")]
    fn rejects_invalid_points(lat: f64, lon: f64) {
        assert!(GeodeticPoint::new(lat, lon).is_err());
    }
}
