use super::projection::{project, ScreenPoint};
use super::texture::TextureSampler;
use super::view::{View, ViewMode};
use crate::config::SimulationConfig;
use crate::constants::BODY_RADIUS;
use crate::coordinates::OrbitalBasis;
use crate::errors::SimulationError;
use crate::models::{Color, Satellite};
use crate::physics::trajectory::{PathSample, TrajectorySampler};
use log::debug;
use serde::Serialize;

const LABEL_RIGHT_MARGIN: f64 = 180.0;
const LABEL_TOP: f64 = 50.0;
const LABEL_SPACING: f64 = 40.0;

/// Vector drawing commands in screen pixels, consumed by the host surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    BeginPath { color: Color },
    MoveTo { point: ScreenPoint },
    LineTo { point: ScreenPoint },
    Stroke,
    FillCircle { center: ScreenPoint, radius: f64, color: Color },
    Text { position: ScreenPoint, text: String, color: Color },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewFrame {
    pub mode: ViewMode,
    pub commands: Vec<DrawCommand>,
}

impl ViewFrame {
    pub fn markers(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
    }
}

/// Projects path samples and emits move/line commands. Hidden points and
/// breaks lift the pen. Returns the number of visible points.
pub fn trace_path(
    commands: &mut Vec<DrawCommand>,
    samples: impl Iterator<Item = PathSample>,
    view: &View,
) -> usize {
    let mut pen_down = false;
    let mut visible_points = 0;

    for sample in samples {
        let projected = match sample {
            PathSample::Point(pos) => project(&pos, &view.basis),
            PathSample::Break => {
                pen_down = false;
                continue;
            }
        };
        if !projected.visible {
            pen_down = false;
            continue;
        }
        let point = view.viewport.to_screen(&projected);
        commands.push(if pen_down {
            DrawCommand::LineTo { point }
        } else {
            DrawCommand::MoveTo { point }
        });
        pen_down = true;
        visible_points += 1;
    }
    visible_points
}

/// Orbit curves, satellite markers and, on auxiliary views, speed labels.
pub fn render_view(
    view: &View,
    satellites: &[Satellite],
    orbit: &OrbitalBasis,
    config: &SimulationConfig,
) -> ViewFrame {
    let mut commands = Vec::new();
    let sampler =
        TrajectorySampler::new(orbit, config.trajectory_step).hide_inside_body(view.is_primary());

    for satellite in satellites.iter().filter(|s| s.radius >= BODY_RADIUS) {
        commands.push(DrawCommand::BeginPath {
            color: satellite.color,
        });
        let visible = trace_path(&mut commands, sampler.sample(satellite), view);
        commands.push(DrawCommand::Stroke);
        debug!(
            "Satellite {} trajectory in {} view: r={:.3}, visible points={}",
            satellite.name, view.mode, satellite.radius, visible
        );
    }

    for satellite in satellites.iter().filter(|s| s.radius >= BODY_RADIUS) {
        let projected = project(&satellite.position(orbit), &view.basis);
        if projected.visible {
            commands.push(DrawCommand::FillCircle {
                center: view.viewport.to_screen(&projected),
                radius: config.marker_radius_px,
                color: satellite.color,
            });
        } else {
            debug!(
                "Satellite {} hidden in {} view: rho2={:.2}, z={:.2}",
                satellite.name,
                view.mode,
                projected.rho2(),
                projected.z
            );
        }
    }

    if !view.is_primary() {
        for (i, satellite) in satellites.iter().enumerate() {
            commands.push(DrawCommand::Text {
                position: ScreenPoint {
                    x: view.canvas.width - LABEL_RIGHT_MARGIN,
                    y: LABEL_TOP + i as f64 * LABEL_SPACING,
                },
                text: format!(
                    "Sat {} {}: {:.2} rad/s",
                    i + 1,
                    view.mode.label(),
                    view.mode.component(satellite)
                ),
                color: satellite.color,
            });
        }
    }

    ViewFrame {
        mode: view.mode,
        commands,
    }
}

/// Renders every view. Without a loaded texture nothing is drawn.
pub fn render_frame(
    views: &[View],
    satellites: &[Satellite],
    orbit: &OrbitalBasis,
    config: &SimulationConfig,
    texture: Option<&dyn TextureSampler>,
) -> Result<Vec<ViewFrame>, SimulationError> {
    if texture.is_none() {
        return Err(SimulationError::ResourceLoad(
            "earth texture is not loaded".to_string(),
        ));
    }
    Ok(views
        .iter()
        .map(|view| render_view(view, satellites, orbit, config))
        .collect())
}
