use super::orbital::ConicElements;
use crate::constants::{BODY_RADIUS, TWO_PI};
use crate::coordinates::OrbitalBasis;
use crate::models::{Satellite, SatelliteKind};
use nalgebra as na;

/// One step along a sampled path. `Break` lifts the pen so disjoint arcs are
/// not joined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSample {
    Point(na::Vector3<f64>),
    Break,
}

#[derive(Debug, Clone, Copy)]
enum PathShape {
    Circle { radius: f64 },
    Conic(ConicElements),
}

/// Builds the full orbit path of a satellite in orbital-basis space.
pub struct TrajectorySampler<'a> {
    basis: &'a OrbitalBasis,
    step: f64,
    hide_inside_body: bool,
}

impl<'a> TrajectorySampler<'a> {
    pub fn new(basis: &'a OrbitalBasis, step: f64) -> Self {
        Self {
            basis,
            step,
            hide_inside_body: false,
        }
    }

    /// Break conic paths where they pass below the surface.
    pub fn hide_inside_body(mut self, hide: bool) -> Self {
        self.hide_inside_body = hide;
        self
    }

    pub fn sample(&self, satellite: &Satellite) -> Trajectory {
        let shape = match (satellite.kind, satellite.elements) {
            (SatelliteKind::Custom, Some(elements)) => Some(PathShape::Conic(elements)),
            (SatelliteKind::Custom, None) => None,
            (SatelliteKind::Demo, _) => Some(PathShape::Circle {
                radius: satellite.radius,
            }),
        };

        let (start, end) = match shape {
            Some(PathShape::Conic(elements)) => elements.anomaly_range(),
            _ => (0.0, TWO_PI),
        };
        let count = match shape {
            Some(_) if self.step > 0.0 => ((end - start) / self.step).floor() as usize + 1,
            _ => 0,
        };

        Trajectory {
            forward: self.basis.forward,
            direction: satellite.plane_direction(self.basis),
            shape: shape.unwrap_or(PathShape::Circle { radius: 0.0 }),
            start,
            step: self.step,
            count,
            index: 0,
            hide_inside_body: self.hide_inside_body,
        }
    }
}

/// Finite, restartable (by cloning) sequence of path samples.
#[derive(Debug, Clone)]
pub struct Trajectory {
    forward: na::Vector3<f64>,
    direction: na::Vector3<f64>,
    shape: PathShape,
    start: f64,
    step: f64,
    count: usize,
    index: usize,
    hide_inside_body: bool,
}

impl Trajectory {
    fn point(&self, radius: f64, angle: f64) -> na::Vector3<f64> {
        let (sin_a, cos_a) = angle.sin_cos();
        (self.forward * cos_a + self.direction * sin_a) * radius
    }
}

impl Iterator for Trajectory {
    type Item = PathSample;

    fn next(&mut self) -> Option<PathSample> {
        if self.index >= self.count {
            return None;
        }
        let param = self.start + self.index as f64 * self.step;
        self.index += 1;

        let sample = match self.shape {
            PathShape::Circle { radius } => PathSample::Point(self.point(radius, param)),
            PathShape::Conic(elements) => {
                let r = elements.radius_at(param);
                if !r.is_finite() || r <= 0.0 || (self.hide_inside_body && r < BODY_RADIUS) {
                    PathSample::Break
                } else {
                    PathSample::Point(self.point(r, elements.in_plane_angle(param)))
                }
            }
        };
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Trajectory {}
