use crate::coordinates::ViewBasis;
use nalgebra as na;
use serde::Serialize;

/// A point expressed in a view's frame. `z` points toward the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub visible: bool,
}

impl ProjectedPoint {
    pub fn rho2(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }
}

/// Projects `pos` onto the view plane and tests it against the unit sphere.
///
/// A point is visible outside the sphere's silhouette, or in front of the
/// camera-facing hemisphere.
pub fn project(pos: &na::Vector3<f64>, view: &ViewBasis) -> ProjectedPoint {
    let x = pos.dot(&view.tangent_u);
    let y = pos.dot(&view.tangent_v);
    let z = pos.dot(&view.forward);

    ProjectedPoint {
        x,
        y,
        z,
        visible: is_visible(x, y, z),
    }
}

/// Occlusion test on view-plane coordinates.
pub fn is_visible(x: f64, y: f64, z: f64) -> bool {
    let rho2 = x * x + y * y;
    rho2 > 1.0 || z >= (1.0 - rho2).max(0.0).sqrt()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Placement of the unit sphere on a drawing surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center_x: f64,
    pub center_y: f64,
    pub earth_radius: f64,
}

impl Viewport {
    pub fn centered(width: f64, height: f64, earth_radius: f64) -> Self {
        Self {
            center_x: width / 2.0,
            center_y: height / 2.0,
            earth_radius,
        }
    }

    /// View-plane to pixels, with y growing downward.
    pub fn to_screen(&self, point: &ProjectedPoint) -> ScreenPoint {
        ScreenPoint {
            x: self.center_x + self.earth_radius * point.x,
            y: self.center_y - self.earth_radius * point.y,
        }
    }

    pub fn to_view_plane(&self, px: f64, py: f64) -> (f64, f64) {
        (
            (px - self.center_x) / self.earth_radius,
            (self.center_y - py) / self.earth_radius,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::GeodeticBasis;
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    fn view() -> ViewBasis {
        GeodeticBasis::from_lat_lon(35.0, -80.0)
    }

    fn in_view(x: f64, y: f64, z: f64) -> na::Vector3<f64> {
        let v = view();
        v.tangent_u * x + v.tangent_v * y + v.forward * z
    }

    #[test_case(0.0, 0.0, 1.0, true; "facing the camera center")]
    #[test_case(0.0, 0.0, -1.0, false; "directly behind the sphere")]
    #[test_case(0.6, 0.0, 0.8, true; "on the near surface")]
    #[test_case(0.6, 0.0, 0.5, false; "under the near surface")]
    #[test_case(0.6, 0.0, -0.8, false; "on the far hemisphere")]
    #[test_case(1.0, 0.0, 0.0, true; "on the silhouette")]
    #[test_case(1.2, 0.3, -2.0, true; "behind but outside the silhouette")]
    #[test_case(0.0, 0.0, 0.0, false; "at the center")]
    fn occlusion(x: f64, y: f64, z: f64, expected: bool) {
        assert_eq!(is_visible(x, y, z), expected);
    }

    #[test_case(0.1, -0.2, 1.5, true; "in front of the sphere")]
    #[test_case(0.1, -0.2, -1.5, false; "behind the sphere")]
    #[test_case(-0.9, 0.9, -1.0, true; "behind but outside the silhouette")]
    #[test_case(0.3, 0.4, 0.7, false; "inside the sphere")]
    fn projection_in_view_frame(x: f64, y: f64, z: f64, expected: bool) {
        let projected = project(&in_view(x, y, z), &view());
        assert_abs_diff_eq!(projected.x, x, epsilon = 1e-12);
        assert_abs_diff_eq!(projected.y, y, epsilon = 1e-12);
        assert_abs_diff_eq!(projected.z, z, epsilon = 1e-12);
        assert_abs_diff_eq!(projected.rho2(), x * x + y * y, epsilon = 1e-12);
        assert_eq!(projected.visible, expected);
    }

    #[test]
    fn screen_mapping_flips_y() {
        let viewport = Viewport::centered(600.0, 600.0, 300.0);
        let p = ProjectedPoint {
            x: 0.5,
            y: 0.5,
            z: 0.0,
            visible: true,
        };
        assert_eq!(viewport.to_screen(&p), ScreenPoint { x: 450.0, y: 150.0 });
        assert_eq!(viewport.to_view_plane(450.0, 150.0), (0.5, 0.5));
    }
}
