pub mod draw;
pub mod projection;
pub mod texture;
pub mod view;

pub use draw::{render_frame, render_view, DrawCommand, ViewFrame};
pub use projection::{project, ProjectedPoint, ScreenPoint, Viewport};
pub use texture::{EquirectTexture, TextureSampler};
pub use view::{View, ViewMode};
