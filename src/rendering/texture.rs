//! Globe surface lookup.
//!
//! Maps pixels of a view onto texture coordinates of an equirectangular day
//! map. Decoding the image and filling the drawing surface stay with the host.

use super::view::View;
use crate::constants::{PI, TEXTURE_LONGITUDE_OFFSET, TWO_PI};
use crate::coordinates::ViewBasis;
use crate::errors::SimulationError;

const MARKER_HALF_WIDTH: f64 = 0.02;
const BACKGROUND: [u8; 3] = [0, 0, 0];
const MARKER: [u8; 3] = [255, 0, 0];

/// Host capability: color of the texture at `u` (0 west edge, 1 east edge)
/// and `v` (0 top row, 1 bottom row).
pub trait TextureSampler {
    fn sample(&self, u: f64, v: f64) -> [u8; 3];
}

/// Decoded RGB texture, row-major from the top.
#[derive(Debug, Clone)]
pub struct EquirectTexture {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl EquirectTexture {
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<[u8; 3]>) -> Result<Self, SimulationError> {
        if width == 0 || height == 0 {
            return Err(SimulationError::ResourceLoad(format!(
                "texture has no pixels ({}x{})",
                width, height
            )));
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(SimulationError::ResourceLoad(format!(
                "texture is {}x{} but holds {} pixels",
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }
}

impl TextureSampler for EquirectTexture {
    fn sample(&self, u: f64, v: f64) -> [u8; 3] {
        let w = self.width as i64;
        let h = self.height as i64;
        let x = ((u * w as f64).floor() as i64).rem_euclid(w);
        let y = ((v * h as f64).floor() as i64).clamp(0, h - 1);
        self.pixels[(y * w + x) as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlobePixel {
    Background,
    Marker,
    Surface { u: f64, v: f64 },
}

/// Texture coordinates of the sphere point seen at view-plane `(x, y)`, if
/// that point is on the disk.
pub fn texture_coordinates(basis: &ViewBasis, x: f64, y: f64) -> Option<(f64, f64)> {
    let r2 = x * x + y * y;
    if r2 > 1.0 {
        return None;
    }
    let z = (1.0 - r2).sqrt();
    let p = basis.tangent_u * x + basis.tangent_v * y + basis.forward * z;

    let u = (0.5 - p.y.atan2(p.x) / TWO_PI + TEXTURE_LONGITUDE_OFFSET).rem_euclid(1.0);
    let v = p.z.clamp(-1.0, 1.0).asin() / PI + 0.5;
    Some((u, 1.0 - v))
}

pub fn globe_pixel(view: &View, px: f64, py: f64) -> GlobePixel {
    let (x, y) = view.viewport.to_view_plane(px, py);
    if view.is_primary()
        && x.abs() < MARKER_HALF_WIDTH
        && y.abs() < MARKER_HALF_WIDTH
        && x * x + y * y <= 1.0
    {
        return GlobePixel::Marker;
    }
    match texture_coordinates(&view.basis, x, y) {
        Some((u, v)) => GlobePixel::Surface { u, v },
        None => GlobePixel::Background,
    }
}

/// Final color of one pixel of the globe layer.
pub fn shade(view: &View, px: f64, py: f64, texture: &dyn TextureSampler) -> [u8; 3] {
    match globe_pixel(view, px, py) {
        GlobePixel::Background => BACKGROUND,
        GlobePixel::Marker => MARKER,
        GlobePixel::Surface { u, v } => texture.sample(u, v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasSize;
    use crate::coordinates::{GeodeticBasis, GeodeticPoint};
    use crate::rendering::view::ViewMode;
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    fn view(mode: ViewMode, lat: f64, lon: f64) -> View {
        View::new(
            mode,
            GeodeticPoint {
                latitude: lat,
                longitude: lon,
            },
            CanvasSize::new(600.0, 600.0),
            300.0,
        )
    }

    #[test_case(0.0, 0.0, 0.925, 0.5; "prime meridian on the equator")]
    #[test_case(0.0, 90.0, 0.675, 0.5; "ninety east")]
    #[test_case(45.0, 0.0, 0.925, 0.25; "mid latitude north")]
    fn center_texture_coordinates(lat: f64, lon: f64, u: f64, v: f64) {
        let basis = GeodeticBasis::from_lat_lon(lat, lon);
        let (tu, tv) = texture_coordinates(&basis, 0.0, 0.0).unwrap();
        assert_abs_diff_eq!(tu, u, epsilon = 1e-9);
        assert_abs_diff_eq!(tv, v, epsilon = 1e-9);
    }

    #[test]
    fn outside_the_disk_is_background() {
        let basis = GeodeticBasis::from_lat_lon(0.0, 0.0);
        assert!(texture_coordinates(&basis, 0.8, 0.8).is_none());
        assert_eq!(globe_pixel(&view(ViewMode::U, 0.0, 0.0), 5.0, 5.0), GlobePixel::Background);
    }

    #[test]
    fn main_view_marks_the_reference_point() {
        assert_eq!(globe_pixel(&view(ViewMode::Net, 10.0, 10.0), 300.0, 300.0), GlobePixel::Marker);
        assert!(matches!(
            globe_pixel(&view(ViewMode::V, 10.0, 10.0), 300.0, 300.0),
            GlobePixel::Surface { .. }
        ));
    }

    #[test]
    fn texture_sampling_wraps_and_clamps() {
        let pixels = vec![[1, 0, 0], [2, 0, 0], [3, 0, 0], [4, 0, 0]];
        let texture = EquirectTexture::from_pixels(2, 2, pixels).unwrap();
        assert_eq!(texture.sample(0.0, 0.0), [1, 0, 0]);
        assert_eq!(texture.sample(0.75, 0.25), [2, 0, 0]);
        assert_eq!(texture.sample(1.25, 0.9), [3, 0, 0]);
        assert_eq!(texture.sample(0.5, 1.0), [4, 0, 0]);
    }

    #[test]
    fn shade_uses_texture_on_the_disk() {
        let texture = EquirectTexture::from_pixels(1, 1, vec![[10, 20, 30]]).unwrap();
        let v = view(ViewMode::Net, 0.0, 0.0);
        assert_eq!(shade(&v, 400.0, 300.0, &texture), [10, 20, 30]);
        assert_eq!(shade(&v, 300.0, 300.0, &texture), MARKER);
        assert_eq!(shade(&v, 0.0, 0.0, &texture), BACKGROUND);
    }

    #[test_case(0, 0, vec![]; "empty")]
    #[test_case(2, 2, vec![[0, 0, 0]; 3]; "too few pixels")]
    fn rejects_malformed_texture(width: u32, height: u32, pixels: Vec<[u8; 3]>) {
        assert!(matches!(
            EquirectTexture::from_pixels(width, height, pixels),
            Err(SimulationError::ResourceLoad(_))
        ));
    }
}
